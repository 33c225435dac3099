//! Session inbox vocabulary
//!
//! Everything a session actor processes arrives as one [`SessionMessage`]
//! through a single ordered queue: client commands and backend events share
//! the queue, which is what serializes all state mutation for one session.

use std::net::SocketAddr;

use imsmedia_config::{
    AudioConfig, CallQuality, MediaProtocolType, MediaQualityThreshold, RtpError,
    RtpHeaderExtension, SessionResult, SessionState,
};
use tokio::sync::mpsc;

use crate::backend::BackendSession;

/// Local RTP/RTCP socket pair the session binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalEndpoint {
    pub rtp: SocketAddr,
    pub rtcp: SocketAddr,
}

/// Commands issued by the client, applied in the order issued.
#[derive(Debug)]
pub enum SessionCommand {
    Open { endpoint: LocalEndpoint, config: AudioConfig },
    Close,
    Modify(AudioConfig),
    AddConfig(AudioConfig),
    DeleteConfig(AudioConfig),
    ConfirmConfig(AudioConfig),
    SendDtmf { digit: char, duration_millis: u32 },
    StartDtmf { digit: char },
    StopDtmf,
    SendHeaderExtension(Vec<RtpHeaderExtension>),
    SetQualityThreshold(MediaQualityThreshold),
}

/// Events emitted by the session's backend, delivered in emission order.
#[derive(Debug)]
pub enum SessionEvent {
    OpenSuccess { session: BackendSession },
    OpenFailure { error: RtpError },
    ModifyResponse { config: AudioConfig, result: SessionResult },
    AddConfigResponse { config: AudioConfig, result: SessionResult },
    ConfirmConfigResponse { config: AudioConfig, result: SessionResult },
    SessionChanged { state: SessionState },
    FirstMediaPacket { config: AudioConfig },
    HeaderExtensionReceived { extensions: Vec<RtpHeaderExtension> },
    MediaInactivity { packet_type: MediaProtocolType, duration_millis: u32 },
    PacketLoss { percentage: u32 },
    Jitter { jitter_millis: u32 },
    AnbrQueryTriggered { config: AudioConfig },
    DtmfReceived { digit: char },
    CallQualityChanged { quality: CallQuality },
}

/// One entry in a session's inbox.
#[derive(Debug)]
pub enum SessionMessage {
    Command(SessionCommand),
    Event(SessionEvent),
}

/// Sending half of a session's inbox.
pub type MessageSender = mpsc::UnboundedSender<SessionMessage>;

/// Receiving half of a session's inbox; owned by the actor task.
pub type MessageReceiver = mpsc::UnboundedReceiver<SessionMessage>;
