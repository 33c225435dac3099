//! Hardware-abstraction schema
//!
//! Mirror of the radio HAL session types. The offloaded engine only speaks
//! this schema; [`crate::translate`] converts to and from the client schema.
//! Field names and nesting follow the HAL, which is why they disagree with
//! [`crate::audio`] (e.g. `rtp_packet_loss_rate` vs `packet_loss_threshold`).

use serde::{Deserialize, Serialize};

use crate::types::{AccessNetwork, AmrMode, CodecType, EvsBandwidth, EvsMode, MediaDirection};

/// Remote RTP endpoint, HAL schema. Address travels as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtpAddress {
    pub ip_address: String,
    pub port_number: u16,
}

/// AMR parameters, HAL schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmrParams {
    pub amr_mode: AmrMode,
    pub octet_aligned: bool,
    pub max_redundancy_millis: u32,
}

/// EVS parameters, HAL schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvsParams {
    pub bandwidth: EvsBandwidth,
    pub evs_mode: EvsMode,
    pub channel_aware_mode: u8,
    pub use_header_full_only_on_tx: bool,
    pub use_header_full_only_on_rx: bool,
}

/// Codec-specific parameter union, tagged by variant.
///
/// The tag is authoritative: translation back to the client schema keys off
/// this variant, not off [`CodecParams::codec_type`], because the two can
/// disagree in configs assembled by the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecSpecificParams {
    Amr(AmrParams),
    Evs(EvsParams),
}

/// Codec parameters, HAL schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecParams {
    pub codec_type: CodecType,
    pub rx_payload_type_number: u8,
    pub tx_payload_type_number: u8,
    pub sampling_rate_khz: u8,
    pub tx_codec_mode_request: u8,
    pub dtx_enabled: bool,
    pub codec_specific_params: Option<CodecSpecificParams>,
}

/// DTMF parameters, HAL schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtmfParams {
    pub payload_type_number: u8,
    pub sampling_rate_khz: u8,
}

/// Per-session transport parameters, HAL schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtpSessionParams {
    pub ptime_millis: u8,
    pub max_ptime_millis: u8,
    pub max_mtu_bytes: u32,
    pub dscp: u8,
    pub dtmf_params: Option<DtmfParams>,
    pub codec_params: Option<CodecParams>,
}

/// RTCP parameters, HAL schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtcpConfig {
    pub canonical_name: String,
    pub transmit_port: u16,
    pub transmit_interval_sec: u32,
    pub rtcp_xr_blocks: u32,
}

/// Full RTP session configuration, HAL schema.
///
/// Every sub-object is independently optional; a config with nothing but a
/// direction is valid on the wire and must translate without panicking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtpConfig {
    pub direction: MediaDirection,
    pub access_network: AccessNetwork,
    pub remote_address: Option<RtpAddress>,
    pub session_params: Option<RtpSessionParams>,
    pub rtcp_config: Option<RtcpConfig>,
}

/// Media quality thresholds, HAL schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaQualityThreshold {
    pub rtp_inactivity_timer_millis: u32,
    pub rtcp_inactivity_timer_millis: u32,
    pub rtp_packet_loss_duration_millis: u32,
    pub rtp_packet_loss_rate: u32,
    pub jitter_duration_millis: u32,
    pub rtp_jitter_millis: u32,
}

/// RTP header extension, HAL schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtpHeaderExtension {
    pub local_id: u8,
    pub data: Vec<u8>,
}
