//! Audio media session control plane for IMS voice calls.
//!
//! Each session runs as its own task, fed by a single ordered inbox that
//! carries client commands and backend events alike. A session is bound at
//! creation to one of two media backends: the in-process software RTP
//! engine or the hardware-offloaded engine behind a cross-process channel.
//! Every command is fire-and-forget; outcomes and spontaneous engine
//! notifications are delivered through [`AudioSessionCallback`].
//!
//! Sessions are created and looked up through a [`SessionRegistry`], which
//! issues process-unique ids and routes closes. The capability handshake
//! with the remote endpoint lives in [`handshake`] and feeds the codec
//! negotiation in `imsmedia_config::negotiation`.
//!
//! ```no_run
//! use std::sync::Arc;
//! use imsmedia_config::AudioConfig;
//! use imsmedia_session::{
//!     AudioSessionCallback, BackendKind, LocalEndpoint, SessionRegistry,
//! };
//!
//! struct Quiet;
//! impl AudioSessionCallback for Quiet {}
//!
//! # fn endpoints() -> (imsmedia_session::LocalEngineSender, imsmedia_session::OffloadServiceSender) { unimplemented!() }
//! # async fn demo() {
//! let (local_engine, offload_service) = endpoints();
//! let registry = SessionRegistry::new(local_engine, offload_service);
//! let endpoint = LocalEndpoint {
//!     rtp: "192.0.2.1:5000".parse().unwrap(),
//!     rtcp: "192.0.2.1:5001".parse().unwrap(),
//! };
//! let session = registry.open_session(
//!     endpoint,
//!     AudioConfig::default(),
//!     BackendKind::Local,
//!     Arc::new(Quiet),
//! );
//! // ... on_open_session_success fires once the engine accepts ...
//! registry.close_session(&session).unwrap();
//! # }
//! ```

pub mod backend;
pub mod callback;
pub mod error;
pub mod events;
pub mod handshake;
pub mod registry;
pub mod session;

pub use backend::{
    Backend, BackendKind, BackendSession, LocalEngineRequest, LocalEngineSender, OffloadEvent,
    OffloadServiceRequest, OffloadServiceSender, OffloadSessionHandle, OffloadSessionRequest,
};
pub use callback::{AudioSessionCallback, CallbackResult};
pub use error::{CallbackError, Result, SessionError};
pub use events::{LocalEndpoint, SessionCommand, SessionEvent, SessionMessage};
pub use handshake::{CapabilityExchange, RemoteCapabilitySink};
pub use registry::SessionRegistry;
pub use session::AudioSession;
