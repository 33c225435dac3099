//! Call quality statistics reported by the media engine

use serde::{Deserialize, Serialize};

use crate::types::CodecType;

/// Aggregated call statistics delivered with `on_call_quality_changed`.
///
/// Counters are cumulative since session open; jitter and round-trip values
/// cover the most recent measurement window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallQuality {
    /// RTP packets sent by this endpoint
    pub num_rtp_packets_transmitted: u32,
    /// RTP packets received from the peer
    pub num_rtp_packets_received: u32,
    /// Transmitted packets reported lost by the peer
    pub num_rtp_packets_transmitted_lost: u32,
    /// Expected but never received packets
    pub num_rtp_packets_not_received: u32,
    /// Average relative jitter in milliseconds
    pub average_relative_jitter_millis: u32,
    /// Maximum relative jitter in milliseconds
    pub max_relative_jitter_millis: u32,
    /// Average round trip time in milliseconds
    pub average_round_trip_time_millis: u32,
    /// Codec in use when the stats were captured
    pub codec_type: Option<CodecType>,
}
