//! Hardware-offloaded engine backend
//!
//! Open and close go to the offload service; everything else goes to the
//! remote session object obtained once at open-success. Both directions
//! speak the hardware schema; the listener task translates incoming events
//! to the client schema before they enter the session's inbox.

use imsmedia_config::{
    hal, translate, AudioConfig, CallQuality, MediaProtocolType, MediaQualityThreshold, RtpError,
    RtpHeaderExtension, SessionResult, SessionState,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::backend::BackendSession;
use crate::events::{LocalEndpoint, MessageSender, SessionEvent, SessionMessage};

/// Requests handled by the offload service itself.
#[derive(Debug)]
pub enum OffloadServiceRequest {
    Open {
        session_id: u32,
        endpoint: LocalEndpoint,
        config: hal::RtpConfig,
        listener: mpsc::UnboundedSender<OffloadEvent>,
    },
    Close { session_id: u32 },
}

/// Command channel into the offload service.
pub type OffloadServiceSender = mpsc::UnboundedSender<OffloadServiceRequest>;

/// Requests handled by one remote session object.
#[derive(Debug)]
pub enum OffloadSessionRequest {
    SetListener(mpsc::UnboundedSender<OffloadEvent>),
    ModifySession(hal::RtpConfig),
    AddConfig(hal::RtpConfig),
    DeleteConfig(hal::RtpConfig),
    ConfirmConfig(hal::RtpConfig),
    SendDtmf { digit: char, duration_millis: u32 },
    StartDtmf { digit: char },
    StopDtmf,
    SendHeaderExtension(Vec<hal::RtpHeaderExtension>),
    SetMediaQualityThreshold(hal::MediaQualityThreshold),
}

/// Handle to a remote session object, delivered with open-success.
#[derive(Debug, Clone)]
pub struct OffloadSessionHandle {
    commands: mpsc::UnboundedSender<OffloadSessionRequest>,
}

impl OffloadSessionHandle {
    pub fn new(commands: mpsc::UnboundedSender<OffloadSessionRequest>) -> Self {
        Self { commands }
    }

    fn send(&self, request: OffloadSessionRequest) -> bool {
        self.commands.send(request).is_ok()
    }
}

/// Events emitted by the offloaded engine, hardware schema.
#[derive(Debug)]
pub enum OffloadEvent {
    OpenSuccess { session: OffloadSessionHandle },
    OpenFailure { error: RtpError },
    ModifyResponse { config: hal::RtpConfig, result: SessionResult },
    AddConfigResponse { config: hal::RtpConfig, result: SessionResult },
    ConfirmConfigResponse { config: hal::RtpConfig, result: SessionResult },
    SessionChanged { state: SessionState },
    FirstMediaPacket { config: hal::RtpConfig },
    HeaderExtensionReceived { extensions: Vec<hal::RtpHeaderExtension> },
    MediaInactivity { packet_type: MediaProtocolType, duration_millis: u32 },
    PacketLoss { percentage: u32 },
    Jitter { jitter_millis: u32 },
    AnbrQueryTriggered { config: hal::RtpConfig },
    DtmfReceived { digit: char },
    CallQualityChanged { quality: CallQuality },
}

/// Backend speaking to the hardware-offloaded engine.
#[derive(Debug)]
pub struct OffloadBackend {
    session_id: u32,
    service: OffloadServiceSender,
    listener: mpsc::UnboundedSender<OffloadEvent>,
    /// Remote session object, obtained once at open-success
    session: Option<OffloadSessionHandle>,
}

impl OffloadBackend {
    /// Creates the backend and spawns its listener task, which translates
    /// hardware-schema events into session events on `inbox`.
    pub fn new(session_id: u32, service: OffloadServiceSender, inbox: MessageSender) -> Self {
        let (listener, events) = mpsc::unbounded_channel();
        tokio::spawn(run_listener(session_id, events, inbox));
        Self { session_id, service, listener, session: None }
    }

    pub fn is_attached(&self) -> bool {
        self.session.is_some()
    }

    /// Stores the remote session object and registers the event listener
    /// on it.
    pub fn attach(&mut self, session: OffloadSessionHandle) {
        debug!(session_id = self.session_id, "Offload session attached");
        if !session.send(OffloadSessionRequest::SetListener(self.listener.clone())) {
            warn!(session_id = self.session_id, "Failed to register offload session listener");
        }
        self.session = Some(session);
    }

    pub fn open(&self, endpoint: LocalEndpoint, config: &AudioConfig) {
        let request = OffloadServiceRequest::Open {
            session_id: self.session_id,
            endpoint,
            config: translate::to_rtp_config(config),
            listener: self.listener.clone(),
        };
        if self.service.send(request).is_err() {
            warn!(session_id = self.session_id, "Offload service channel closed, open dropped");
        }
    }

    pub fn close(&self) {
        if self.session.is_none() {
            return;
        }
        if self.service.send(OffloadServiceRequest::Close { session_id: self.session_id }).is_err() {
            warn!(session_id = self.session_id, "Offload service channel closed, close dropped");
        }
    }

    pub fn modify_session(&self, config: &AudioConfig) {
        self.request(OffloadSessionRequest::ModifySession(translate::to_rtp_config(config)));
    }

    pub fn add_config(&self, config: &AudioConfig) {
        self.request(OffloadSessionRequest::AddConfig(translate::to_rtp_config(config)));
    }

    pub fn delete_config(&self, config: &AudioConfig) {
        self.request(OffloadSessionRequest::DeleteConfig(translate::to_rtp_config(config)));
    }

    pub fn confirm_config(&self, config: &AudioConfig) {
        self.request(OffloadSessionRequest::ConfirmConfig(translate::to_rtp_config(config)));
    }

    pub fn send_dtmf(&self, digit: char, duration_millis: u32) {
        self.request(OffloadSessionRequest::SendDtmf { digit, duration_millis });
    }

    pub fn start_dtmf(&self, digit: char) {
        self.request(OffloadSessionRequest::StartDtmf { digit });
    }

    pub fn stop_dtmf(&self) {
        self.request(OffloadSessionRequest::StopDtmf);
    }

    pub fn send_header_extension(&self, extensions: &[RtpHeaderExtension]) {
        let hal_extensions = extensions.iter().map(translate::to_hal_extension).collect();
        self.request(OffloadSessionRequest::SendHeaderExtension(hal_extensions));
    }

    pub fn set_media_quality_threshold(&self, threshold: &MediaQualityThreshold) {
        self.request(OffloadSessionRequest::SetMediaQualityThreshold(
            translate::to_hal_threshold(threshold),
        ));
    }

    fn request(&self, request: OffloadSessionRequest) {
        match &self.session {
            Some(session) => {
                if !session.send(request) {
                    warn!(
                        session_id = self.session_id,
                        "Offload session channel closed, command dropped"
                    );
                }
            }
            None => {
                warn!(
                    session_id = self.session_id,
                    ?request,
                    "Dropping command, offload session is not open"
                );
            }
        }
    }
}

/// Translates offload engine events and forwards them into the session
/// inbox. Runs until either channel closes.
async fn run_listener(
    session_id: u32,
    mut events: mpsc::UnboundedReceiver<OffloadEvent>,
    inbox: MessageSender,
) {
    while let Some(event) = events.recv().await {
        if inbox.send(SessionMessage::Event(to_session_event(event))).is_err() {
            debug!(session_id, "Session inbox closed, stopping offload listener");
            break;
        }
    }
}

fn to_session_event(event: OffloadEvent) -> SessionEvent {
    match event {
        OffloadEvent::OpenSuccess { session } => {
            SessionEvent::OpenSuccess { session: BackendSession::Offload(session) }
        }
        OffloadEvent::OpenFailure { error } => SessionEvent::OpenFailure { error },
        OffloadEvent::ModifyResponse { config, result } => {
            SessionEvent::ModifyResponse { config: translate::to_audio_config(&config), result }
        }
        OffloadEvent::AddConfigResponse { config, result } => {
            SessionEvent::AddConfigResponse { config: translate::to_audio_config(&config), result }
        }
        OffloadEvent::ConfirmConfigResponse { config, result } => {
            SessionEvent::ConfirmConfigResponse {
                config: translate::to_audio_config(&config),
                result,
            }
        }
        OffloadEvent::SessionChanged { state } => SessionEvent::SessionChanged { state },
        OffloadEvent::FirstMediaPacket { config } => {
            SessionEvent::FirstMediaPacket { config: translate::to_audio_config(&config) }
        }
        OffloadEvent::HeaderExtensionReceived { extensions } => {
            SessionEvent::HeaderExtensionReceived {
                extensions: extensions.iter().map(translate::to_extension).collect(),
            }
        }
        OffloadEvent::MediaInactivity { packet_type, duration_millis } => {
            SessionEvent::MediaInactivity { packet_type, duration_millis }
        }
        OffloadEvent::PacketLoss { percentage } => SessionEvent::PacketLoss { percentage },
        OffloadEvent::Jitter { jitter_millis } => SessionEvent::Jitter { jitter_millis },
        OffloadEvent::AnbrQueryTriggered { config } => {
            SessionEvent::AnbrQueryTriggered { config: translate::to_audio_config(&config) }
        }
        OffloadEvent::DtmfReceived { digit } => SessionEvent::DtmfReceived { digit },
        OffloadEvent::CallQualityChanged { quality } => {
            SessionEvent::CallQualityChanged { quality }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsmedia_config::CodecType;

    fn endpoint() -> LocalEndpoint {
        LocalEndpoint { rtp: "127.0.0.1:6000".parse().unwrap(), rtcp: "127.0.0.1:6001".parse().unwrap() }
    }

    #[tokio::test]
    async fn attach_registers_listener_on_remote_session() {
        let (service_tx, _service_rx) = mpsc::unbounded_channel();
        let (inbox_tx, mut inbox_rx) = mpsc::unbounded_channel();
        let mut backend = OffloadBackend::new(11, service_tx, inbox_tx);

        let (session_tx, mut session_rx) = mpsc::unbounded_channel();
        backend.attach(OffloadSessionHandle::new(session_tx));

        let listener = match session_rx.recv().await.unwrap() {
            OffloadSessionRequest::SetListener(listener) => listener,
            other => panic!("expected set-listener, got {:?}", other),
        };

        // Events pushed on the registered listener arrive translated.
        listener.send(OffloadEvent::PacketLoss { percentage: 12 }).unwrap();
        match inbox_rx.recv().await.unwrap() {
            SessionMessage::Event(SessionEvent::PacketLoss { percentage }) => {
                assert_eq!(percentage, 12);
            }
            other => panic!("expected packet loss event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn open_sends_hal_config_to_service() {
        let (service_tx, mut service_rx) = mpsc::unbounded_channel();
        let (inbox_tx, _inbox_rx) = mpsc::unbounded_channel();
        let backend = OffloadBackend::new(12, service_tx, inbox_tx);

        let config = AudioConfig::builder().codec_type(CodecType::Evs).build();
        backend.open(endpoint(), &config);

        match service_rx.recv().await.unwrap() {
            OffloadServiceRequest::Open { session_id, config, .. } => {
                assert_eq!(session_id, 12);
                let codec = config.session_params.unwrap().codec_params.unwrap();
                assert_eq!(codec.codec_type, CodecType::Evs);
            }
            other => panic!("expected open, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn session_commands_require_attachment() {
        let (service_tx, mut service_rx) = mpsc::unbounded_channel();
        let (inbox_tx, _inbox_rx) = mpsc::unbounded_channel();
        let mut backend = OffloadBackend::new(13, service_tx, inbox_tx);

        backend.send_dtmf('3', 200);
        backend.close();
        assert!(service_rx.try_recv().is_err());

        let (session_tx, mut session_rx) = mpsc::unbounded_channel();
        backend.attach(OffloadSessionHandle::new(session_tx));
        let _ = session_rx.recv().await; // SetListener

        backend.send_dtmf('3', 200);
        assert!(matches!(
            session_rx.recv().await.unwrap(),
            OffloadSessionRequest::SendDtmf { digit: '3', duration_millis: 200 }
        ));

        backend.close();
        assert!(matches!(
            service_rx.recv().await.unwrap(),
            OffloadServiceRequest::Close { session_id: 13 }
        ));
    }
}
