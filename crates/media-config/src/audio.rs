//! Client-facing audio session configuration
//!
//! `AudioConfig` is the schema the VoIP application speaks. It is translated
//! to the hardware schema ([`crate::hal`]) for the offloaded engine and to
//! the wire schema ([`crate::wire`]) for the in-process engine by
//! [`crate::translate`].

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::types::{AccessNetwork, AmrMode, CodecType, EvsBandwidth, EvsMode, MediaDirection};

/// AMR codec parameters negotiated for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmrParams {
    /// Negotiated AMR mode (bitrate class)
    pub mode: AmrMode,
    /// Octet-aligned payload format when true, bandwidth-efficient otherwise
    pub octet_aligned: bool,
    /// Maximum duplicated frame offset in milliseconds, 0 disables redundancy
    pub max_redundancy_millis: u32,
}

/// EVS codec parameters negotiated for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvsParams {
    /// Negotiated audio bandwidth
    pub bandwidth: EvsBandwidth,
    /// Negotiated EVS mode (bitrate class)
    pub mode: EvsMode,
    /// Channel-aware mode offset, 0 disables channel-aware coding
    pub channel_aware_mode: u8,
    /// Restrict transmitted payloads to header-full format
    pub use_header_full_only_tx: bool,
    /// Restrict received payloads to header-full format
    pub use_header_full_only_rx: bool,
}

/// RTCP transmission parameters for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtcpConfig {
    /// Canonical name (CNAME) carried in sender/receiver reports
    pub canonical_name: String,
    /// Remote port RTCP packets are sent to
    pub transmit_port: u16,
    /// RTCP report interval in seconds, 0 disables transmission
    pub interval_sec: u32,
    /// Bitmask of negotiated RTCP-XR report block types
    pub rtcp_xr_block_types: u32,
}

/// Full configuration of one audio RTP session, client schema.
///
/// Exactly one of `amr_params` / `evs_params` is expected to be populated,
/// matching `codec_type` (both absent for PCMA/PCMU). The builder does not
/// enforce this; the invariant is owned by the caller assembling the config
/// from negotiation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Direction of the media flow
    pub media_direction: MediaDirection,
    /// Radio access network the session runs over
    pub access_network: AccessNetwork,
    /// Remote RTP socket address, `None` until the peer is known
    pub remote_rtp_address: Option<SocketAddr>,
    /// RTCP parameters, `None` disables RTCP handling
    pub rtcp_config: Option<RtcpConfig>,
    /// Maximum transfer unit in bytes
    pub max_mtu_bytes: u32,
    /// Differentiated services field code point
    pub dscp: u8,
    /// RTP payload type number for the receive direction
    pub rx_payload_type_number: u8,
    /// RTP payload type number for the transmit direction
    pub tx_payload_type_number: u8,
    /// Audio sampling rate in kHz
    pub sampling_rate_khz: u8,
    /// Recommended media frame duration in milliseconds
    pub ptime_millis: u8,
    /// Maximum media frame duration in milliseconds
    pub max_ptime_millis: u8,
    /// Negotiated audio codec
    pub codec_type: CodecType,
    /// CMR value requested for the transmit direction, 15 means no request
    pub tx_codec_mode_request: u8,
    /// Discontinuous transmission (silence suppression) enabled
    pub dtx_enabled: bool,
    /// AMR parameters, populated for AMR/AMR-WB
    pub amr_params: Option<AmrParams>,
    /// EVS parameters, populated for EVS
    pub evs_params: Option<EvsParams>,
    /// RTP payload type number for DTMF events
    pub dtmf_payload_type_number: u8,
    /// DTMF sampling rate in kHz
    pub dtmf_sampling_rate_khz: u8,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            media_direction: MediaDirection::NoFlow,
            access_network: AccessNetwork::Unknown,
            remote_rtp_address: None,
            rtcp_config: None,
            max_mtu_bytes: 0,
            dscp: 0,
            rx_payload_type_number: 0,
            tx_payload_type_number: 0,
            sampling_rate_khz: 0,
            ptime_millis: 0,
            max_ptime_millis: 0,
            codec_type: CodecType::AmrWb,
            tx_codec_mode_request: 0,
            dtx_enabled: false,
            amr_params: None,
            evs_params: None,
            dtmf_payload_type_number: 0,
            dtmf_sampling_rate_khz: 0,
        }
    }
}

impl AudioConfig {
    /// Start building a config from type defaults.
    pub fn builder() -> AudioConfigBuilder {
        AudioConfigBuilder::new()
    }
}

/// Builder for [`AudioConfig`].
///
/// Accepts any field combination; malformed configs are rejected by the
/// engine through response events, not here.
#[derive(Debug, Default)]
pub struct AudioConfigBuilder {
    config: AudioConfig,
}

impl AudioConfigBuilder {
    pub fn new() -> Self {
        Self { config: AudioConfig::default() }
    }

    pub fn media_direction(mut self, direction: MediaDirection) -> Self {
        self.config.media_direction = direction;
        self
    }

    pub fn access_network(mut self, network: AccessNetwork) -> Self {
        self.config.access_network = network;
        self
    }

    pub fn remote_rtp_address(mut self, addr: Option<SocketAddr>) -> Self {
        self.config.remote_rtp_address = addr;
        self
    }

    pub fn rtcp_config(mut self, rtcp: Option<RtcpConfig>) -> Self {
        self.config.rtcp_config = rtcp;
        self
    }

    pub fn max_mtu_bytes(mut self, mtu: u32) -> Self {
        self.config.max_mtu_bytes = mtu;
        self
    }

    pub fn dscp(mut self, dscp: u8) -> Self {
        self.config.dscp = dscp;
        self
    }

    pub fn rx_payload_type_number(mut self, pt: u8) -> Self {
        self.config.rx_payload_type_number = pt;
        self
    }

    pub fn tx_payload_type_number(mut self, pt: u8) -> Self {
        self.config.tx_payload_type_number = pt;
        self
    }

    pub fn sampling_rate_khz(mut self, rate: u8) -> Self {
        self.config.sampling_rate_khz = rate;
        self
    }

    pub fn ptime_millis(mut self, ptime: u8) -> Self {
        self.config.ptime_millis = ptime;
        self
    }

    pub fn max_ptime_millis(mut self, max_ptime: u8) -> Self {
        self.config.max_ptime_millis = max_ptime;
        self
    }

    pub fn codec_type(mut self, codec: CodecType) -> Self {
        self.config.codec_type = codec;
        self
    }

    pub fn tx_codec_mode_request(mut self, cmr: u8) -> Self {
        self.config.tx_codec_mode_request = cmr;
        self
    }

    pub fn dtx_enabled(mut self, enabled: bool) -> Self {
        self.config.dtx_enabled = enabled;
        self
    }

    pub fn amr_params(mut self, params: Option<AmrParams>) -> Self {
        self.config.amr_params = params;
        self
    }

    pub fn evs_params(mut self, params: Option<EvsParams>) -> Self {
        self.config.evs_params = params;
        self
    }

    pub fn dtmf_payload_type_number(mut self, pt: u8) -> Self {
        self.config.dtmf_payload_type_number = pt;
        self
    }

    pub fn dtmf_sampling_rate_khz(mut self, rate: u8) -> Self {
        self.config.dtmf_sampling_rate_khz = rate;
        self
    }

    pub fn build(self) -> AudioConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_populates_all_fields() {
        let config = AudioConfig::builder()
            .media_direction(MediaDirection::TransmitReceive)
            .access_network(AccessNetwork::Eutran)
            .remote_rtp_address(Some("192.168.1.20:10000".parse().unwrap()))
            .codec_type(CodecType::Amr)
            .amr_params(Some(AmrParams {
                mode: AmrMode::Mode4,
                octet_aligned: true,
                max_redundancy_millis: 0,
            }))
            .sampling_rate_khz(8)
            .ptime_millis(20)
            .build();

        assert_eq!(config.media_direction, MediaDirection::TransmitReceive);
        assert_eq!(config.codec_type, CodecType::Amr);
        assert_eq!(config.amr_params.unwrap().mode, AmrMode::Mode4);
        assert!(config.evs_params.is_none());
        assert_eq!(config.remote_rtp_address.unwrap().port(), 10000);
    }

    #[test]
    fn builder_accepts_partial_configs() {
        // Validation is deliberately absent: an EVS config with AMR params
        // builds fine and is rejected by the engine at open time.
        let config = AudioConfig::builder()
            .codec_type(CodecType::Evs)
            .amr_params(Some(AmrParams {
                mode: AmrMode::Mode0,
                octet_aligned: false,
                max_redundancy_millis: 0,
            }))
            .build();
        assert_eq!(config.codec_type, CodecType::Evs);
        assert!(config.amr_params.is_some());
        assert!(config.remote_rtp_address.is_none());
    }

    #[test]
    fn config_survives_json_round_trip() {
        let config = AudioConfig::builder()
            .remote_rtp_address(Some("10.0.0.7:20000".parse().unwrap()))
            .rtcp_config(Some(RtcpConfig {
                canonical_name: "cname@example.net".to_string(),
                transmit_port: 20001,
                interval_sec: 5,
                rtcp_xr_block_types: 0,
            }))
            .codec_type(CodecType::Evs)
            .evs_params(Some(EvsParams {
                bandwidth: EvsBandwidth::WideBand,
                mode: EvsMode::Mode7,
                channel_aware_mode: 3,
                use_header_full_only_tx: true,
                use_header_full_only_rx: false,
            }))
            .build();

        let json = serde_json::to_string(&config).unwrap();
        let restored: AudioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
