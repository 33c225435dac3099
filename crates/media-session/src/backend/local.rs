//! In-process engine backend
//!
//! Commands cross a channel to the software RTP engine as wire-schema
//! requests keyed by an opaque numeric handle; indications come back in the
//! wire schema and are decoded to client-schema events by a listener task
//! before entering the session's inbox.

use imsmedia_config::{translate, wire, AudioConfig, MediaQualityThreshold, RtpHeaderExtension};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::backend::BackendSession;
use crate::events::{LocalEndpoint, MessageSender, SessionEvent, SessionMessage};

/// Requests the in-process engine consumes.
#[derive(Debug)]
pub enum LocalEngineRequest {
    /// Open a session; indications for it flow through `listener`.
    Open {
        session_id: u32,
        endpoint: LocalEndpoint,
        config: wire::SessionPayload,
        listener: mpsc::UnboundedSender<wire::SessionIndication>,
    },
    /// Tear down the session identified by its engine handle.
    Close { handle: u64 },
    /// Any per-session command on an open session.
    Request { handle: u64, request: wire::SessionRequest },
}

/// Command channel into the in-process engine.
pub type LocalEngineSender = mpsc::UnboundedSender<LocalEngineRequest>;

/// Backend speaking to the in-process software engine.
#[derive(Debug)]
pub struct LocalBackend {
    session_id: u32,
    engine: LocalEngineSender,
    listener: mpsc::UnboundedSender<wire::SessionIndication>,
    /// Engine instance handle, assigned at open-success
    handle: Option<u64>,
}

impl LocalBackend {
    /// Creates the backend and spawns its listener task, which decodes
    /// wire-schema indications into session events on `inbox`.
    pub fn new(session_id: u32, engine: LocalEngineSender, inbox: MessageSender) -> Self {
        let (listener, indications) = mpsc::unbounded_channel();
        tokio::spawn(run_listener(session_id, indications, inbox));
        Self { session_id, engine, listener, handle: None }
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    pub fn attach(&mut self, handle: u64) {
        debug!(session_id = self.session_id, handle, "Local engine session attached");
        self.handle = Some(handle);
    }

    pub fn open(&self, endpoint: LocalEndpoint, config: &AudioConfig) {
        self.send(LocalEngineRequest::Open {
            session_id: self.session_id,
            endpoint,
            config: translate::to_session_payload(config),
            listener: self.listener.clone(),
        });
    }

    pub fn close(&self) {
        if let Some(handle) = self.handle {
            self.send(LocalEngineRequest::Close { handle });
        }
    }

    pub fn modify_session(&self, config: &AudioConfig) {
        self.request(wire::SessionRequest::Modify(translate::to_session_payload(config)));
    }

    pub fn add_config(&self, config: &AudioConfig) {
        self.request(wire::SessionRequest::AddConfig(translate::to_session_payload(config)));
    }

    pub fn delete_config(&self, config: &AudioConfig) {
        self.request(wire::SessionRequest::DeleteConfig(translate::to_session_payload(config)));
    }

    pub fn confirm_config(&self, config: &AudioConfig) {
        self.request(wire::SessionRequest::ConfirmConfig(translate::to_session_payload(config)));
    }

    pub fn send_dtmf(&self, digit: char, duration_millis: u32) {
        self.request(wire::SessionRequest::SendDtmf { digit, duration_millis });
    }

    pub fn send_header_extension(&self, extensions: &[RtpHeaderExtension]) {
        let payloads = extensions.iter().map(translate::to_extension_payload).collect();
        self.request(wire::SessionRequest::SendHeaderExtension(payloads));
    }

    pub fn set_media_quality_threshold(&self, threshold: &MediaQualityThreshold) {
        self.request(wire::SessionRequest::SetQualityThreshold(
            translate::to_threshold_payload(threshold),
        ));
    }

    fn request(&self, request: wire::SessionRequest) {
        match self.handle {
            Some(handle) => self.send(LocalEngineRequest::Request { handle, request }),
            None => {
                warn!(
                    session_id = self.session_id,
                    ?request,
                    "Dropping command, local engine session is not open"
                );
            }
        }
    }

    fn send(&self, request: LocalEngineRequest) {
        if self.engine.send(request).is_err() {
            warn!(session_id = self.session_id, "Local engine channel closed, command dropped");
        }
    }
}

/// Decodes engine indications and forwards them into the session inbox.
/// Runs until either channel closes.
async fn run_listener(
    session_id: u32,
    mut indications: mpsc::UnboundedReceiver<wire::SessionIndication>,
    inbox: MessageSender,
) {
    while let Some(indication) = indications.recv().await {
        let event = match to_session_event(indication) {
            Ok(event) => event,
            Err(error) => {
                warn!(session_id, %error, "Dropping undecodable engine indication");
                continue;
            }
        };
        if inbox.send(SessionMessage::Event(event)).is_err() {
            debug!(session_id, "Session inbox closed, stopping local listener");
            break;
        }
    }
}

fn to_session_event(
    indication: wire::SessionIndication,
) -> imsmedia_config::Result<SessionEvent> {
    let event = match indication {
        wire::SessionIndication::OpenSuccess { handle } => {
            SessionEvent::OpenSuccess { session: BackendSession::Local { handle } }
        }
        wire::SessionIndication::OpenFailure { error } => SessionEvent::OpenFailure { error },
        wire::SessionIndication::ModifyResponse { config, result } => {
            SessionEvent::ModifyResponse {
                config: translate::audio_config_from_payload(&config)?,
                result,
            }
        }
        wire::SessionIndication::AddConfigResponse { config, result } => {
            SessionEvent::AddConfigResponse {
                config: translate::audio_config_from_payload(&config)?,
                result,
            }
        }
        wire::SessionIndication::ConfirmConfigResponse { config, result } => {
            SessionEvent::ConfirmConfigResponse {
                config: translate::audio_config_from_payload(&config)?,
                result,
            }
        }
        wire::SessionIndication::SessionChanged { state } => SessionEvent::SessionChanged { state },
        wire::SessionIndication::FirstMediaPacket { config } => SessionEvent::FirstMediaPacket {
            config: translate::audio_config_from_payload(&config)?,
        },
        wire::SessionIndication::HeaderExtensionReceived { extensions } => {
            SessionEvent::HeaderExtensionReceived {
                extensions: extensions.iter().map(translate::extension_from_payload).collect(),
            }
        }
        wire::SessionIndication::MediaInactivity { packet_type, duration_millis } => {
            SessionEvent::MediaInactivity { packet_type, duration_millis }
        }
        wire::SessionIndication::PacketLoss { percentage } => {
            SessionEvent::PacketLoss { percentage }
        }
        wire::SessionIndication::Jitter { jitter_millis } => SessionEvent::Jitter { jitter_millis },
        wire::SessionIndication::AnbrQuery { config } => SessionEvent::AnbrQueryTriggered {
            config: translate::audio_config_from_payload(&config)?,
        },
        wire::SessionIndication::DtmfReceived { digit } => SessionEvent::DtmfReceived { digit },
        wire::SessionIndication::CallQualityChanged { quality } => {
            SessionEvent::CallQualityChanged { quality }
        }
    };
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsmedia_config::{CodecType, SessionState};

    fn endpoint() -> LocalEndpoint {
        LocalEndpoint { rtp: "127.0.0.1:5000".parse().unwrap(), rtcp: "127.0.0.1:5001".parse().unwrap() }
    }

    #[tokio::test]
    async fn open_carries_wire_payload_and_listener() {
        let (engine_tx, mut engine_rx) = mpsc::unbounded_channel();
        let (inbox_tx, mut inbox_rx) = mpsc::unbounded_channel();
        let backend = LocalBackend::new(9, engine_tx, inbox_tx);

        let config = AudioConfig::builder().codec_type(CodecType::Pcmu).build();
        backend.open(endpoint(), &config);

        match engine_rx.recv().await.unwrap() {
            LocalEngineRequest::Open { session_id, listener, config: payload, .. } => {
                assert_eq!(session_id, 9);
                assert_eq!(payload.codec, CodecType::Pcmu);
                // Indications sent on the handed-out listener surface as
                // decoded session events.
                listener
                    .send(wire::SessionIndication::SessionChanged { state: SessionState::Active })
                    .unwrap();
            }
            other => panic!("expected open, got {:?}", other),
        }

        match inbox_rx.recv().await.unwrap() {
            SessionMessage::Event(SessionEvent::SessionChanged { state }) => {
                assert_eq!(state, SessionState::Active);
            }
            other => panic!("expected session changed event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn commands_before_open_success_are_dropped() {
        let (engine_tx, mut engine_rx) = mpsc::unbounded_channel();
        let (inbox_tx, _inbox_rx) = mpsc::unbounded_channel();
        let mut backend = LocalBackend::new(3, engine_tx, inbox_tx);

        let config = AudioConfig::default();
        backend.modify_session(&config);
        assert!(engine_rx.try_recv().is_err());

        backend.attach(42);
        backend.modify_session(&config);
        match engine_rx.recv().await.unwrap() {
            LocalEngineRequest::Request { handle, request: wire::SessionRequest::Modify(_) } => {
                assert_eq!(handle, 42);
            }
            other => panic!("expected modify, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn close_is_noop_without_handle() {
        let (engine_tx, mut engine_rx) = mpsc::unbounded_channel();
        let (inbox_tx, _inbox_rx) = mpsc::unbounded_channel();
        let mut backend = LocalBackend::new(4, engine_tx, inbox_tx);

        backend.close();
        assert!(engine_rx.try_recv().is_err());

        backend.attach(7);
        backend.close();
        assert!(matches!(
            engine_rx.recv().await.unwrap(),
            LocalEngineRequest::Close { handle: 7 }
        ));
    }
}
