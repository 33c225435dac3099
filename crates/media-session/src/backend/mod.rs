//! Dual media-backend abstraction
//!
//! A session talks to exactly one of two engines fixed at construction: the
//! in-process software RTP stack ([`LocalBackend`]) or the hardware-offloaded
//! engine behind a cross-process interface ([`OffloadBackend`]). Both expose
//! the same one-way-command contract and report every failure as an event,
//! never as a synchronous error to the session actor; a command that cannot
//! be sent is logged and dropped here.
//!
//! Dispatch is a tagged enum matched exhaustively — there is no runtime type
//! inspection and no re-selection after construction.

mod local;
mod offload;

pub use local::{LocalBackend, LocalEngineRequest, LocalEngineSender};
pub use offload::{
    OffloadBackend, OffloadEvent, OffloadServiceRequest, OffloadServiceSender,
    OffloadSessionHandle, OffloadSessionRequest,
};

use imsmedia_config::{AudioConfig, MediaQualityThreshold, RtpHeaderExtension};
use tracing::warn;

use crate::events::LocalEndpoint;

/// DTMF duration used when a start/stop pair is collapsed into a single
/// timed event on the local path.
pub(crate) const DTMF_DEFAULT_DURATION_MILLIS: u32 = 140;

/// Which engine a session is bound to. Chosen once at session creation,
/// never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Offload,
}

/// Live backend session handle delivered with `OpenSuccess`.
#[derive(Debug)]
pub enum BackendSession {
    /// Opaque native instance handle of the in-process engine
    Local { handle: u64 },
    /// Remote session object of the offloaded engine
    Offload(OffloadSessionHandle),
}

/// One session's backend, tagged by variant.
#[derive(Debug)]
pub enum Backend {
    Local(LocalBackend),
    Offload(OffloadBackend),
}

impl Backend {
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Local(_) => BackendKind::Local,
            Backend::Offload(_) => BackendKind::Offload,
        }
    }

    /// True once `attach` stored a live backend session handle.
    pub fn is_attached(&self) -> bool {
        match self {
            Backend::Local(local) => local.is_attached(),
            Backend::Offload(offload) => offload.is_attached(),
        }
    }

    /// Stores the handle delivered by `OpenSuccess` and, on the offload
    /// path, registers the event listener on the remote session object.
    pub fn attach(&mut self, session: BackendSession) {
        match (self, session) {
            (Backend::Local(local), BackendSession::Local { handle }) => local.attach(handle),
            (Backend::Offload(offload), BackendSession::Offload(handle)) => offload.attach(handle),
            (backend, session) => {
                warn!(
                    kind = ?backend.kind(),
                    session = ?session,
                    "Ignoring backend session handle of the wrong variant"
                );
            }
        }
    }

    pub fn open(&self, endpoint: LocalEndpoint, config: &AudioConfig) {
        match self {
            Backend::Local(local) => local.open(endpoint, config),
            Backend::Offload(offload) => offload.open(endpoint, config),
        }
    }

    pub fn close(&self) {
        match self {
            Backend::Local(local) => local.close(),
            Backend::Offload(offload) => offload.close(),
        }
    }

    pub fn modify_session(&self, config: &AudioConfig) {
        match self {
            Backend::Local(local) => local.modify_session(config),
            Backend::Offload(offload) => offload.modify_session(config),
        }
    }

    pub fn add_config(&self, config: &AudioConfig) {
        match self {
            Backend::Local(local) => local.add_config(config),
            Backend::Offload(offload) => offload.add_config(config),
        }
    }

    pub fn delete_config(&self, config: &AudioConfig) {
        match self {
            Backend::Local(local) => local.delete_config(config),
            Backend::Offload(offload) => offload.delete_config(config),
        }
    }

    pub fn confirm_config(&self, config: &AudioConfig) {
        match self {
            Backend::Local(local) => local.confirm_config(config),
            Backend::Offload(offload) => offload.confirm_config(config),
        }
    }

    pub fn send_dtmf(&self, digit: char, duration_millis: u32) {
        match self {
            Backend::Local(local) => local.send_dtmf(digit, duration_millis),
            Backend::Offload(offload) => offload.send_dtmf(digit, duration_millis),
        }
    }

    pub fn start_dtmf(&self, digit: char) {
        match self {
            // The local engine has no continuous-tone entry point; a start
            // is forwarded as a send with the default duration.
            Backend::Local(local) => local.send_dtmf(digit, DTMF_DEFAULT_DURATION_MILLIS),
            Backend::Offload(offload) => offload.start_dtmf(digit),
        }
    }

    pub fn stop_dtmf(&self) {
        match self {
            // Nothing to stop on the local path, see start_dtmf.
            Backend::Local(_) => {}
            Backend::Offload(offload) => offload.stop_dtmf(),
        }
    }

    pub fn send_header_extension(&self, extensions: &[RtpHeaderExtension]) {
        match self {
            Backend::Local(local) => local.send_header_extension(extensions),
            Backend::Offload(offload) => offload.send_header_extension(extensions),
        }
    }

    pub fn set_media_quality_threshold(&self, threshold: &MediaQualityThreshold) {
        match self {
            Backend::Local(local) => local.set_media_quality_threshold(threshold),
            Backend::Offload(offload) => offload.set_media_quality_threshold(threshold),
        }
    }
}
