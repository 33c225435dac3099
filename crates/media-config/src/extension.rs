//! RTP header extensions (RFC 8285) carried through the session

use serde::{Deserialize, Serialize};

/// One RTP header extension element, client schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtpHeaderExtension {
    /// Local identifier negotiated for this extension (1..=14 for one-byte form)
    pub local_id: u8,
    /// Raw extension payload
    pub data: Vec<u8>,
}

impl RtpHeaderExtension {
    pub fn new(local_id: u8, data: Vec<u8>) -> Self {
        Self { local_id, data }
    }
}
