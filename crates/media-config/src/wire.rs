//! Wire/transport schema
//!
//! Payloads exchanged with the in-process media engine over its command
//! channel. The shape is flat (the engine unmarshals field by field) and the
//! remote address travels as an `ip:port` string, so decoding back into the
//! client schema is fallible. Framing is plain `bincode`.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::quality::CallQuality;
use crate::types::{
    AccessNetwork, AmrMode, CodecType, EvsBandwidth, EvsMode, MediaDirection, MediaProtocolType,
    RtpError, SessionResult, SessionState,
};

/// AMR parameters, wire schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmrPayload {
    pub mode: AmrMode,
    pub octet_aligned: bool,
    pub max_redundancy_millis: u32,
}

/// EVS parameters, wire schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvsPayload {
    pub bandwidth: EvsBandwidth,
    pub mode: EvsMode,
    pub channel_aware_mode: u8,
    pub header_full_only_tx: bool,
    pub header_full_only_rx: bool,
}

/// RTCP parameters, wire schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtcpPayload {
    pub cname: String,
    pub transmit_port: u16,
    pub interval_sec: u32,
    pub xr_blocks: u32,
}

/// Flattened session configuration, wire schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub direction: MediaDirection,
    pub access_network: AccessNetwork,
    /// Remote endpoint as `ip:port`, empty-handed when unset
    pub remote_address: Option<String>,
    pub rtcp: Option<RtcpPayload>,
    pub max_mtu_bytes: u32,
    pub dscp: u8,
    pub rx_payload_type: u8,
    pub tx_payload_type: u8,
    pub sampling_rate_khz: u8,
    pub ptime_millis: u8,
    pub max_ptime_millis: u8,
    pub codec: CodecType,
    pub tx_codec_mode_request: u8,
    pub dtx_enabled: bool,
    pub amr: Option<AmrPayload>,
    pub evs: Option<EvsPayload>,
    pub dtmf_payload_type: u8,
    pub dtmf_sampling_rate_khz: u8,
}

/// Quality thresholds, wire schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualityThresholdPayload {
    pub rtp_inactivity_millis: u32,
    pub rtcp_inactivity_millis: u32,
    pub loss_period_millis: u32,
    pub loss_rate_percent: u32,
    pub jitter_period_millis: u32,
    pub jitter_millis: u32,
}

/// RTP header extension, wire schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExtensionPayload {
    pub id: u8,
    pub data: Vec<u8>,
}

/// Commands sent to the in-process engine for an already-open session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionRequest {
    Modify(SessionPayload),
    AddConfig(SessionPayload),
    DeleteConfig(SessionPayload),
    ConfirmConfig(SessionPayload),
    SendDtmf { digit: char, duration_millis: u32 },
    StartDtmf { digit: char },
    StopDtmf,
    SendHeaderExtension(Vec<HeaderExtensionPayload>),
    SetQualityThreshold(QualityThresholdPayload),
}

/// Events emitted by the in-process engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionIndication {
    OpenSuccess { handle: u64 },
    OpenFailure { error: RtpError },
    ModifyResponse { config: SessionPayload, result: SessionResult },
    AddConfigResponse { config: SessionPayload, result: SessionResult },
    ConfirmConfigResponse { config: SessionPayload, result: SessionResult },
    SessionChanged { state: SessionState },
    FirstMediaPacket { config: SessionPayload },
    HeaderExtensionReceived { extensions: Vec<HeaderExtensionPayload> },
    MediaInactivity { packet_type: MediaProtocolType, duration_millis: u32 },
    PacketLoss { percentage: u32 },
    Jitter { jitter_millis: u32 },
    AnbrQuery { config: SessionPayload },
    DtmfReceived { digit: char },
    CallQualityChanged { quality: CallQuality },
}

impl SessionRequest {
    /// Frame the request for the engine channel.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ConfigError::WireEncode(e.to_string()))
    }

    /// Unframe a request received from the engine channel.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| ConfigError::WireDecode(e.to_string()))
    }
}

impl SessionIndication {
    /// Frame the indication for the listener channel.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ConfigError::WireEncode(e.to_string()))
    }

    /// Unframe an indication received from the listener channel.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| ConfigError::WireDecode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_frames_through_bincode() {
        let request = SessionRequest::SendDtmf { digit: '5', duration_millis: 140 };
        let bytes = request.encode().unwrap();
        assert_eq!(SessionRequest::decode(&bytes).unwrap(), request);
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let request = SessionRequest::StopDtmf;
        let bytes = request.encode().unwrap();
        let err = SessionRequest::decode(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, ConfigError::WireDecode(_)));
    }
}
