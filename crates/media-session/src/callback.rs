//! Client callback surface
//!
//! The session actor delivers every backend outcome through this trait.
//! Implementations run on the session's own task: keep them short and
//! non-blocking. A returned error is logged by the actor and never retried;
//! it cannot crash or stop the session.

use imsmedia_config::{
    AudioConfig, CallQuality, MediaProtocolType, RtpError, RtpHeaderExtension, SessionResult,
    SessionState,
};

use crate::error::CallbackError;
use crate::session::AudioSession;

/// Result type for callback delivery.
pub type CallbackResult = std::result::Result<(), CallbackError>;

/// Per-session event callbacks. All methods default to `Ok(())` so clients
/// implement only what they subscribe to.
#[allow(unused_variables)]
pub trait AudioSessionCallback: Send + Sync {
    /// Session opened; the handle can be used for further commands.
    fn on_open_session_success(&self, session: AudioSession) -> CallbackResult {
        Ok(())
    }

    /// Session open failed; the session id is already deregistered and no
    /// further events follow.
    fn on_open_session_failure(&self, error: RtpError) -> CallbackResult {
        Ok(())
    }

    fn on_modify_session_response(&self, config: AudioConfig, result: SessionResult) -> CallbackResult {
        Ok(())
    }

    fn on_add_config_response(&self, config: AudioConfig, result: SessionResult) -> CallbackResult {
        Ok(())
    }

    fn on_confirm_config_response(&self, config: AudioConfig, result: SessionResult) -> CallbackResult {
        Ok(())
    }

    /// Backend reported a new session state; applied verbatim beforehand.
    fn on_session_changed(&self, state: SessionState) -> CallbackResult {
        Ok(())
    }

    fn on_first_media_packet_received(&self, config: AudioConfig) -> CallbackResult {
        Ok(())
    }

    fn on_header_extension_received(&self, extensions: Vec<RtpHeaderExtension>) -> CallbackResult {
        Ok(())
    }

    fn notify_media_inactivity(
        &self,
        packet_type: MediaProtocolType,
        duration_millis: u32,
    ) -> CallbackResult {
        Ok(())
    }

    fn notify_packet_loss(&self, percentage: u32) -> CallbackResult {
        Ok(())
    }

    fn notify_jitter(&self, jitter_millis: u32) -> CallbackResult {
        Ok(())
    }

    /// The engine asks the client to run an ANBR query for the given config.
    fn on_trigger_anbr_query(&self, config: AudioConfig) -> CallbackResult {
        Ok(())
    }

    fn on_dtmf_received(&self, digit: char) -> CallbackResult {
        Ok(())
    }

    fn on_call_quality_changed(&self, quality: CallQuality) -> CallbackResult {
        Ok(())
    }
}
