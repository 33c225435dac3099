//! Codec capability negotiation
//!
//! Deterministically selects a mutually supported value per dimension (codec
//! type, AMR mode, EVS bandwidth, EVS mode) from two endpoints' advertised
//! capability sets. Each dimension walks a fixed priority order and returns
//! the first value both sides support, so the result never depends on set
//! iteration order and both endpoints compute the same answer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::audio::{AmrParams, EvsParams};
use crate::types::{AmrMode, CodecType, EvsBandwidth, EvsMode};

/// Codec priority order: AMR first, G.711 variants as the last resort.
pub const CODEC_PRIORITY: [CodecType; 5] = [
    CodecType::Amr,
    CodecType::AmrWb,
    CodecType::Evs,
    CodecType::Pcma,
    CodecType::Pcmu,
];

/// Capabilities one endpoint advertises during the pre-open handshake.
/// Consumed once by negotiation, not retained by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    pub codecs: HashSet<CodecType>,
    pub amr_modes: HashSet<AmrMode>,
    pub evs_bandwidths: HashSet<EvsBandwidth>,
    pub evs_modes: HashSet<EvsMode>,
}

impl DeviceCapabilities {
    /// Everything this implementation can do; useful for loopback setups.
    pub fn all() -> Self {
        Self {
            codecs: CODEC_PRIORITY.iter().copied().collect(),
            amr_modes: AmrMode::ALL.iter().copied().collect(),
            evs_bandwidths: EvsBandwidth::ALL.iter().copied().collect(),
            evs_modes: EvsMode::ALL.iter().copied().collect(),
        }
    }
}

/// Outcome of a successful negotiation: the agreed codec plus the
/// codec-specific parameters to embed in the session's `AudioConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityNegotiationResult {
    pub codec_type: CodecType,
    pub amr_params: Option<AmrParams>,
    pub evs_params: Option<EvsParams>,
}

fn first_common<T: Copy + Eq + std::hash::Hash>(
    priority: &[T],
    local: &HashSet<T>,
    remote: &HashSet<T>,
) -> Option<T> {
    priority.iter().copied().find(|value| local.contains(value) && remote.contains(value))
}

/// First codec both endpoints support, in [`CODEC_PRIORITY`] order.
pub fn negotiate_codec(local: &DeviceCapabilities, remote: &DeviceCapabilities) -> Option<CodecType> {
    first_common(&CODEC_PRIORITY, &local.codecs, &remote.codecs)
}

/// Lowest AMR mode both endpoints support.
pub fn negotiate_amr_mode(local: &DeviceCapabilities, remote: &DeviceCapabilities) -> Option<AmrMode> {
    first_common(&AmrMode::ALL, &local.amr_modes, &remote.amr_modes)
}

/// Narrowest EVS bandwidth both endpoints support.
pub fn negotiate_evs_bandwidth(
    local: &DeviceCapabilities,
    remote: &DeviceCapabilities,
) -> Option<EvsBandwidth> {
    first_common(&EvsBandwidth::ALL, &local.evs_bandwidths, &remote.evs_bandwidths)
}

/// Lowest EVS mode both endpoints support.
pub fn negotiate_evs_mode(local: &DeviceCapabilities, remote: &DeviceCapabilities) -> Option<EvsMode> {
    first_common(&EvsMode::ALL, &local.evs_modes, &remote.evs_modes)
}

/// Negotiates all dimensions needed by the agreed codec.
///
/// Mode/bandwidth dimensions are only consulted when the codec requires
/// them; G.711 needs nothing beyond the codec type itself. Returns `None`
/// when no common codec exists, or when the agreed codec needs a mode or
/// bandwidth and that dimension has no common value — callers apply the
/// [`fallback_result`] policy rather than failing the call.
pub fn negotiate(
    local: &DeviceCapabilities,
    remote: &DeviceCapabilities,
) -> Option<CapabilityNegotiationResult> {
    let codec_type = negotiate_codec(local, remote)?;

    match codec_type {
        CodecType::Amr | CodecType::AmrWb => {
            let mode = negotiate_amr_mode(local, remote)?;
            Some(CapabilityNegotiationResult {
                codec_type,
                amr_params: Some(AmrParams {
                    mode,
                    octet_aligned: false,
                    max_redundancy_millis: 0,
                }),
                evs_params: None,
            })
        }
        CodecType::Evs => {
            let bandwidth = negotiate_evs_bandwidth(local, remote)?;
            let mode = negotiate_evs_mode(local, remote)?;
            Some(CapabilityNegotiationResult {
                codec_type,
                amr_params: None,
                evs_params: Some(EvsParams {
                    bandwidth,
                    mode,
                    channel_aware_mode: 0,
                    use_header_full_only_tx: false,
                    use_header_full_only_rx: false,
                }),
            })
        }
        CodecType::Pcma | CodecType::Pcmu => Some(CapabilityNegotiationResult {
            codec_type,
            amr_params: None,
            evs_params: None,
        }),
    }
}

/// Hard-coded policy fallback applied by callers when negotiation finds no
/// match: AMR-WB at mode 4. Preserved exactly; never surfaced as an error.
pub fn fallback_result() -> CapabilityNegotiationResult {
    CapabilityNegotiationResult {
        codec_type: CodecType::AmrWb,
        amr_params: Some(AmrParams {
            mode: AmrMode::Mode4,
            octet_aligned: false,
            max_redundancy_millis: 0,
        }),
        evs_params: None,
    }
}
