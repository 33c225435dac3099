//! Per-session actor and its public handle

mod actor;

pub(crate) use actor::SessionActor;

use imsmedia_config::{AudioConfig, MediaQualityThreshold, RtpHeaderExtension};

use crate::error::{Result, SessionError};
use crate::events::{MessageSender, SessionCommand, SessionMessage};

/// Cloneable handle to one audio session.
///
/// Every method is a constant-time enqueue into the session's ordered inbox
/// and returns before the backend has acted; outcomes arrive through the
/// session's [`crate::AudioSessionCallback`]. Commands issued through the
/// same handle are applied in the order issued.
#[derive(Debug, Clone)]
pub struct AudioSession {
    session_id: u32,
    inbox: MessageSender,
}

impl AudioSession {
    pub(crate) fn new(session_id: u32, inbox: MessageSender) -> Self {
        Self { session_id, inbox }
    }

    /// Registry-issued identifier of this session.
    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn modify_session(&self, config: AudioConfig) -> Result<()> {
        self.command(SessionCommand::Modify(config))
    }

    pub fn add_config(&self, config: AudioConfig) -> Result<()> {
        self.command(SessionCommand::AddConfig(config))
    }

    pub fn delete_config(&self, config: AudioConfig) -> Result<()> {
        self.command(SessionCommand::DeleteConfig(config))
    }

    pub fn confirm_config(&self, config: AudioConfig) -> Result<()> {
        self.command(SessionCommand::ConfirmConfig(config))
    }

    pub fn send_dtmf(&self, digit: char, duration_millis: u32) -> Result<()> {
        self.command(SessionCommand::SendDtmf { digit, duration_millis })
    }

    pub fn start_dtmf(&self, digit: char) -> Result<()> {
        self.command(SessionCommand::StartDtmf { digit })
    }

    pub fn stop_dtmf(&self) -> Result<()> {
        self.command(SessionCommand::StopDtmf)
    }

    pub fn send_header_extension(&self, extensions: Vec<RtpHeaderExtension>) -> Result<()> {
        self.command(SessionCommand::SendHeaderExtension(extensions))
    }

    pub fn set_media_quality_threshold(&self, threshold: MediaQualityThreshold) -> Result<()> {
        self.command(SessionCommand::SetQualityThreshold(threshold))
    }

    pub(crate) fn command(&self, command: SessionCommand) -> Result<()> {
        self.inbox
            .send(SessionMessage::Command(command))
            .map_err(|_| SessionError::SessionStopped { session_id: self.session_id })
    }
}
