//! # imsmedia-config: Session Configuration Schemas & Negotiation
//!
//! Configuration layer of the IMS media service. Three incompatible schemas
//! describe the same audio RTP session:
//!
//! - **Client schema** ([`audio`], [`threshold`], [`extension`], [`quality`])
//!   — what the VoIP application speaks
//! - **Hardware schema** ([`hal`]) — what the offloaded (modem) engine speaks
//! - **Wire schema** ([`wire`]) — what crosses the channel to the in-process
//!   engine
//!
//! [`translate`] converts between them with pure, total functions, and
//! [`negotiation`] picks a mutually supported codec/mode/bandwidth from two
//! endpoints' capability sets ahead of session open.
//!
//! ## Usage
//!
//! ```rust
//! use imsmedia_config::negotiation::{self, DeviceCapabilities};
//! use imsmedia_config::{translate, AudioConfig};
//!
//! let result = negotiation::negotiate(&DeviceCapabilities::all(), &DeviceCapabilities::all())
//!     .unwrap_or_else(negotiation::fallback_result);
//!
//! let config = AudioConfig::builder()
//!     .codec_type(result.codec_type)
//!     .amr_params(result.amr_params)
//!     .evs_params(result.evs_params)
//!     .build();
//!
//! let hal_config = translate::to_rtp_config(&config);
//! assert_eq!(translate::to_audio_config(&hal_config), config);
//! ```

pub mod audio;
pub mod error;
pub mod extension;
pub mod hal;
pub mod negotiation;
pub mod quality;
pub mod threshold;
pub mod translate;
pub mod types;
pub mod wire;

pub use audio::{AmrParams, AudioConfig, AudioConfigBuilder, EvsParams, RtcpConfig};
pub use error::{ConfigError, Result};
pub use extension::RtpHeaderExtension;
pub use negotiation::{CapabilityNegotiationResult, DeviceCapabilities};
pub use quality::CallQuality;
pub use threshold::{MediaQualityThreshold, MediaQualityThresholdBuilder};
pub use types::{
    AccessNetwork, AmrMode, CodecType, EvsBandwidth, EvsMode, MediaDirection, MediaProtocolType,
    RtpError, SessionResult, SessionState,
};
