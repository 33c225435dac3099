//! Bidirectional configuration translation
//!
//! Pure functions converting between the client schema ([`crate::audio`]),
//! the hardware schema ([`crate::hal`]) and the wire schema ([`crate::wire`]).
//! Conversions are total over every combination of optional-field presence:
//! an absent remote address becomes an explicit `None` on the other side,
//! never a panic, and an absent `session_params` sub-object leaves MTU, DSCP,
//! ptime, codec and DTMF fields at type defaults.

use std::net::SocketAddr;

use crate::audio::{AmrParams, AudioConfig, EvsParams, RtcpConfig};
use crate::error::{ConfigError, Result};
use crate::extension::RtpHeaderExtension;
use crate::hal;
use crate::threshold::MediaQualityThreshold;
use crate::types::CodecType;
use crate::wire;

fn build_hal_address(config: &AudioConfig) -> Option<hal::RtpAddress> {
    config.remote_rtp_address.map(|addr| hal::RtpAddress {
        ip_address: addr.ip().to_string(),
        port_number: addr.port(),
    })
}

fn build_hal_codec_params(config: &AudioConfig) -> hal::CodecParams {
    let codec_specific_params = match config.codec_type {
        CodecType::Amr | CodecType::AmrWb => {
            config.amr_params.map(|amr| {
                hal::CodecSpecificParams::Amr(hal::AmrParams {
                    amr_mode: amr.mode,
                    octet_aligned: amr.octet_aligned,
                    max_redundancy_millis: amr.max_redundancy_millis,
                })
            })
        }
        CodecType::Evs => {
            config.evs_params.map(|evs| {
                hal::CodecSpecificParams::Evs(hal::EvsParams {
                    bandwidth: evs.bandwidth,
                    evs_mode: evs.mode,
                    channel_aware_mode: evs.channel_aware_mode,
                    use_header_full_only_on_tx: evs.use_header_full_only_tx,
                    use_header_full_only_on_rx: evs.use_header_full_only_rx,
                })
            })
        }
        CodecType::Pcma | CodecType::Pcmu => None,
    };

    hal::CodecParams {
        codec_type: config.codec_type,
        rx_payload_type_number: config.rx_payload_type_number,
        tx_payload_type_number: config.tx_payload_type_number,
        sampling_rate_khz: config.sampling_rate_khz,
        tx_codec_mode_request: config.tx_codec_mode_request,
        dtx_enabled: config.dtx_enabled,
        codec_specific_params,
    }
}

fn build_hal_session_params(config: &AudioConfig) -> hal::RtpSessionParams {
    hal::RtpSessionParams {
        ptime_millis: config.ptime_millis,
        max_ptime_millis: config.max_ptime_millis,
        max_mtu_bytes: config.max_mtu_bytes,
        dscp: config.dscp,
        dtmf_params: Some(hal::DtmfParams {
            payload_type_number: config.dtmf_payload_type_number,
            sampling_rate_khz: config.dtmf_sampling_rate_khz,
        }),
        codec_params: Some(build_hal_codec_params(config)),
    }
}

fn build_hal_rtcp(config: &AudioConfig) -> Option<hal::RtcpConfig> {
    config.rtcp_config.as_ref().map(|rtcp| hal::RtcpConfig {
        canonical_name: rtcp.canonical_name.clone(),
        transmit_port: rtcp.transmit_port,
        transmit_interval_sec: rtcp.interval_sec,
        rtcp_xr_blocks: rtcp.rtcp_xr_block_types,
    })
}

/// Converts a client [`AudioConfig`] to the hardware schema.
pub fn to_rtp_config(config: &AudioConfig) -> hal::RtpConfig {
    hal::RtpConfig {
        direction: config.media_direction,
        access_network: config.access_network,
        remote_address: build_hal_address(config),
        session_params: Some(build_hal_session_params(config)),
        rtcp_config: build_hal_rtcp(config),
    }
}

fn client_address(config: &hal::RtpConfig) -> Option<SocketAddr> {
    // An unparseable HAL address string is treated the same as an absent one.
    config.remote_address.as_ref().and_then(|addr| {
        addr.ip_address
            .parse()
            .ok()
            .map(|ip| SocketAddr::new(ip, addr.port_number))
    })
}

fn client_rtcp(config: &hal::RtpConfig) -> Option<RtcpConfig> {
    config.rtcp_config.as_ref().map(|rtcp| RtcpConfig {
        canonical_name: rtcp.canonical_name.clone(),
        transmit_port: rtcp.transmit_port,
        interval_sec: rtcp.transmit_interval_sec,
        rtcp_xr_block_types: rtcp.rtcp_xr_blocks,
    })
}

fn codec_specific(config: &hal::RtpConfig) -> Option<&hal::CodecSpecificParams> {
    config
        .session_params
        .as_ref()
        .and_then(|session| session.codec_params.as_ref())
        .and_then(|codec| codec.codec_specific_params.as_ref())
}

/// AMR params extracted by the union tag, not by the nominal codec type:
/// the two fields can disagree in peer-assembled configs.
fn client_amr_params(config: &hal::RtpConfig) -> Option<AmrParams> {
    match codec_specific(config) {
        Some(hal::CodecSpecificParams::Amr(amr)) => Some(AmrParams {
            mode: amr.amr_mode,
            octet_aligned: amr.octet_aligned,
            max_redundancy_millis: amr.max_redundancy_millis,
        }),
        _ => None,
    }
}

fn client_evs_params(config: &hal::RtpConfig) -> Option<EvsParams> {
    match codec_specific(config) {
        Some(hal::CodecSpecificParams::Evs(evs)) => Some(EvsParams {
            bandwidth: evs.bandwidth,
            mode: evs.evs_mode,
            channel_aware_mode: evs.channel_aware_mode,
            use_header_full_only_tx: evs.use_header_full_only_on_tx,
            use_header_full_only_rx: evs.use_header_full_only_on_rx,
        }),
        _ => None,
    }
}

/// Converts a hardware-schema [`hal::RtpConfig`] to the client schema.
pub fn to_audio_config(config: &hal::RtpConfig) -> AudioConfig {
    let mut audio = AudioConfig {
        media_direction: config.direction,
        access_network: config.access_network,
        remote_rtp_address: client_address(config),
        rtcp_config: client_rtcp(config),
        amr_params: client_amr_params(config),
        evs_params: client_evs_params(config),
        ..AudioConfig::default()
    };

    if let Some(session) = &config.session_params {
        audio.max_mtu_bytes = session.max_mtu_bytes;
        audio.dscp = session.dscp;
        audio.ptime_millis = session.ptime_millis;
        audio.max_ptime_millis = session.max_ptime_millis;

        if let Some(dtmf) = &session.dtmf_params {
            audio.dtmf_payload_type_number = dtmf.payload_type_number;
            audio.dtmf_sampling_rate_khz = dtmf.sampling_rate_khz;
        }

        if let Some(codec) = &session.codec_params {
            audio.codec_type = codec.codec_type;
            audio.rx_payload_type_number = codec.rx_payload_type_number;
            audio.tx_payload_type_number = codec.tx_payload_type_number;
            audio.sampling_rate_khz = codec.sampling_rate_khz;
            audio.tx_codec_mode_request = codec.tx_codec_mode_request;
            audio.dtx_enabled = codec.dtx_enabled;
        }
    }

    audio
}

/// Converts client quality thresholds to the hardware schema.
pub fn to_hal_threshold(threshold: &MediaQualityThreshold) -> hal::MediaQualityThreshold {
    hal::MediaQualityThreshold {
        rtp_inactivity_timer_millis: threshold.rtp_inactivity_timer_millis,
        rtcp_inactivity_timer_millis: threshold.rtcp_inactivity_timer_millis,
        rtp_packet_loss_duration_millis: threshold.packet_loss_period_millis,
        rtp_packet_loss_rate: threshold.packet_loss_threshold,
        jitter_duration_millis: threshold.jitter_period_millis,
        rtp_jitter_millis: threshold.jitter_threshold_millis,
    }
}

/// Converts hardware-schema quality thresholds to the client schema.
pub fn to_threshold(threshold: &hal::MediaQualityThreshold) -> MediaQualityThreshold {
    MediaQualityThreshold {
        rtp_inactivity_timer_millis: threshold.rtp_inactivity_timer_millis,
        rtcp_inactivity_timer_millis: threshold.rtcp_inactivity_timer_millis,
        packet_loss_period_millis: threshold.rtp_packet_loss_duration_millis,
        packet_loss_threshold: threshold.rtp_packet_loss_rate,
        jitter_period_millis: threshold.jitter_duration_millis,
        jitter_threshold_millis: threshold.rtp_jitter_millis,
    }
}

/// Converts a client header extension to the hardware schema.
pub fn to_hal_extension(extension: &RtpHeaderExtension) -> hal::RtpHeaderExtension {
    hal::RtpHeaderExtension { local_id: extension.local_id, data: extension.data.clone() }
}

/// Converts a hardware-schema header extension to the client schema.
pub fn to_extension(extension: &hal::RtpHeaderExtension) -> RtpHeaderExtension {
    RtpHeaderExtension { local_id: extension.local_id, data: extension.data.clone() }
}

/// Converts a client [`AudioConfig`] to the wire schema.
pub fn to_session_payload(config: &AudioConfig) -> wire::SessionPayload {
    wire::SessionPayload {
        direction: config.media_direction,
        access_network: config.access_network,
        remote_address: config.remote_rtp_address.map(|addr| addr.to_string()),
        rtcp: config.rtcp_config.as_ref().map(|rtcp| wire::RtcpPayload {
            cname: rtcp.canonical_name.clone(),
            transmit_port: rtcp.transmit_port,
            interval_sec: rtcp.interval_sec,
            xr_blocks: rtcp.rtcp_xr_block_types,
        }),
        max_mtu_bytes: config.max_mtu_bytes,
        dscp: config.dscp,
        rx_payload_type: config.rx_payload_type_number,
        tx_payload_type: config.tx_payload_type_number,
        sampling_rate_khz: config.sampling_rate_khz,
        ptime_millis: config.ptime_millis,
        max_ptime_millis: config.max_ptime_millis,
        codec: config.codec_type,
        tx_codec_mode_request: config.tx_codec_mode_request,
        dtx_enabled: config.dtx_enabled,
        amr: config.amr_params.map(|amr| wire::AmrPayload {
            mode: amr.mode,
            octet_aligned: amr.octet_aligned,
            max_redundancy_millis: amr.max_redundancy_millis,
        }),
        evs: config.evs_params.map(|evs| wire::EvsPayload {
            bandwidth: evs.bandwidth,
            mode: evs.mode,
            channel_aware_mode: evs.channel_aware_mode,
            header_full_only_tx: evs.use_header_full_only_tx,
            header_full_only_rx: evs.use_header_full_only_rx,
        }),
        dtmf_payload_type: config.dtmf_payload_type_number,
        dtmf_sampling_rate_khz: config.dtmf_sampling_rate_khz,
    }
}

/// Converts a wire-schema payload back to the client schema.
///
/// Fallible: the wire schema carries the remote endpoint as an `ip:port`
/// string which may not parse.
pub fn audio_config_from_payload(payload: &wire::SessionPayload) -> Result<AudioConfig> {
    let remote_rtp_address = match &payload.remote_address {
        Some(text) => Some(text.parse::<SocketAddr>().map_err(|_| {
            ConfigError::InvalidAddress { address: text.clone() }
        })?),
        None => None,
    };

    Ok(AudioConfig {
        media_direction: payload.direction,
        access_network: payload.access_network,
        remote_rtp_address,
        rtcp_config: payload.rtcp.as_ref().map(|rtcp| RtcpConfig {
            canonical_name: rtcp.cname.clone(),
            transmit_port: rtcp.transmit_port,
            interval_sec: rtcp.interval_sec,
            rtcp_xr_block_types: rtcp.xr_blocks,
        }),
        max_mtu_bytes: payload.max_mtu_bytes,
        dscp: payload.dscp,
        rx_payload_type_number: payload.rx_payload_type,
        tx_payload_type_number: payload.tx_payload_type,
        sampling_rate_khz: payload.sampling_rate_khz,
        ptime_millis: payload.ptime_millis,
        max_ptime_millis: payload.max_ptime_millis,
        codec_type: payload.codec,
        tx_codec_mode_request: payload.tx_codec_mode_request,
        dtx_enabled: payload.dtx_enabled,
        amr_params: payload.amr.map(|amr| AmrParams {
            mode: amr.mode,
            octet_aligned: amr.octet_aligned,
            max_redundancy_millis: amr.max_redundancy_millis,
        }),
        evs_params: payload.evs.map(|evs| EvsParams {
            bandwidth: evs.bandwidth,
            mode: evs.mode,
            channel_aware_mode: evs.channel_aware_mode,
            use_header_full_only_tx: evs.header_full_only_tx,
            use_header_full_only_rx: evs.header_full_only_rx,
        }),
        dtmf_payload_type_number: payload.dtmf_payload_type,
        dtmf_sampling_rate_khz: payload.dtmf_sampling_rate_khz,
    })
}

/// Converts client quality thresholds to the wire schema.
pub fn to_threshold_payload(threshold: &MediaQualityThreshold) -> wire::QualityThresholdPayload {
    wire::QualityThresholdPayload {
        rtp_inactivity_millis: threshold.rtp_inactivity_timer_millis,
        rtcp_inactivity_millis: threshold.rtcp_inactivity_timer_millis,
        loss_period_millis: threshold.packet_loss_period_millis,
        loss_rate_percent: threshold.packet_loss_threshold,
        jitter_period_millis: threshold.jitter_period_millis,
        jitter_millis: threshold.jitter_threshold_millis,
    }
}

/// Converts a client header extension to the wire schema.
pub fn to_extension_payload(extension: &RtpHeaderExtension) -> wire::HeaderExtensionPayload {
    wire::HeaderExtensionPayload { id: extension.local_id, data: extension.data.clone() }
}

/// Converts a wire-schema header extension to the client schema.
pub fn extension_from_payload(payload: &wire::HeaderExtensionPayload) -> RtpHeaderExtension {
    RtpHeaderExtension { local_id: payload.id, data: payload.data.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccessNetwork, AmrMode, EvsBandwidth, EvsMode, MediaDirection};

    fn full_audio_config() -> AudioConfig {
        AudioConfig::builder()
            .media_direction(MediaDirection::TransmitReceive)
            .access_network(AccessNetwork::Eutran)
            .remote_rtp_address(Some("198.51.100.7:30000".parse().unwrap()))
            .rtcp_config(Some(RtcpConfig {
                canonical_name: "endpoint-a".to_string(),
                transmit_port: 30001,
                interval_sec: 5,
                rtcp_xr_block_types: 0,
            }))
            .max_mtu_bytes(1500)
            .dscp(46)
            .rx_payload_type_number(96)
            .tx_payload_type_number(96)
            .sampling_rate_khz(16)
            .ptime_millis(20)
            .max_ptime_millis(240)
            .codec_type(CodecType::AmrWb)
            .tx_codec_mode_request(15)
            .dtx_enabled(true)
            .amr_params(Some(AmrParams {
                mode: AmrMode::Mode8,
                octet_aligned: true,
                max_redundancy_millis: 0,
            }))
            .dtmf_payload_type_number(100)
            .dtmf_sampling_rate_khz(16)
            .build()
    }

    #[test]
    fn hal_round_trip_is_identity_for_matching_tag() {
        let original = to_rtp_config(&full_audio_config());
        let round_tripped = to_rtp_config(&to_audio_config(&original));
        assert_eq!(round_tripped, original);
    }

    #[test]
    fn client_round_trip_preserves_full_config() {
        let config = full_audio_config();
        assert_eq!(to_audio_config(&to_rtp_config(&config)), config);
    }

    #[test]
    fn absent_remote_address_maps_to_unset() {
        let config = AudioConfig::builder().codec_type(CodecType::Pcmu).build();
        let rtp = to_rtp_config(&config);
        assert!(rtp.remote_address.is_none());
        assert!(to_audio_config(&rtp).remote_rtp_address.is_none());
    }

    #[test]
    fn union_tag_wins_over_nominal_codec_type() {
        // codec_type says EVS but the union carries AMR: the AMR variant
        // decides which client field is populated.
        let mut rtp = to_rtp_config(&full_audio_config());
        if let Some(session) = rtp.session_params.as_mut() {
            if let Some(codec) = session.codec_params.as_mut() {
                codec.codec_type = CodecType::Evs;
            }
        }
        let audio = to_audio_config(&rtp);
        assert_eq!(audio.codec_type, CodecType::Evs);
        assert!(audio.amr_params.is_some());
        assert!(audio.evs_params.is_none());
    }

    #[test]
    fn absent_session_params_leaves_type_defaults() {
        let rtp = hal::RtpConfig {
            direction: MediaDirection::ReceiveOnly,
            access_network: AccessNetwork::Iwlan,
            remote_address: None,
            session_params: None,
            rtcp_config: None,
        };
        let audio = to_audio_config(&rtp);
        assert_eq!(audio.media_direction, MediaDirection::ReceiveOnly);
        assert_eq!(audio.max_mtu_bytes, 0);
        assert_eq!(audio.dtmf_payload_type_number, 0);
        assert!(audio.amr_params.is_none() && audio.evs_params.is_none());
    }

    #[test]
    fn unparseable_hal_address_is_treated_as_unset() {
        let mut rtp = to_rtp_config(&full_audio_config());
        rtp.remote_address = Some(hal::RtpAddress {
            ip_address: "not-an-ip".to_string(),
            port_number: 9,
        });
        assert!(to_audio_config(&rtp).remote_rtp_address.is_none());
    }

    #[test]
    fn evs_config_translates_through_hal() {
        let config = AudioConfig::builder()
            .codec_type(CodecType::Evs)
            .evs_params(Some(EvsParams {
                bandwidth: EvsBandwidth::SuperWideBand,
                mode: EvsMode::Mode7,
                channel_aware_mode: 3,
                use_header_full_only_tx: false,
                use_header_full_only_rx: false,
            }))
            .build();
        let audio = to_audio_config(&to_rtp_config(&config));
        assert_eq!(audio.evs_params, config.evs_params);
        assert!(audio.amr_params.is_none());
    }

    #[test]
    fn wire_round_trip_preserves_full_config() {
        let config = full_audio_config();
        let payload = to_session_payload(&config);
        assert_eq!(audio_config_from_payload(&payload).unwrap(), config);
    }

    #[test]
    fn wire_payload_with_bad_address_fails_to_translate() {
        let mut payload = to_session_payload(&full_audio_config());
        payload.remote_address = Some("garbage".to_string());
        assert!(matches!(
            audio_config_from_payload(&payload),
            Err(ConfigError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn threshold_maps_between_schema_field_names() {
        let threshold = MediaQualityThreshold::builder()
            .rtp_inactivity_timer_millis(20)
            .rtcp_inactivity_timer_millis(20)
            .packet_loss_period_millis(10000)
            .packet_loss_threshold(1)
            .jitter_period_millis(300)
            .jitter_threshold_millis(5000)
            .build();
        let hal = to_hal_threshold(&threshold);
        assert_eq!(hal.rtp_packet_loss_duration_millis, 10000);
        assert_eq!(hal.rtp_packet_loss_rate, 1);
        assert_eq!(hal.rtp_jitter_millis, 5000);
        assert_eq!(to_threshold(&hal), threshold);
    }
}
