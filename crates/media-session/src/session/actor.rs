//! Session actor task
//!
//! One task per session owns all session state and drains a single ordered
//! inbox. Commands and backend events interleave in arrival order, so no
//! state mutation ever races: an open racing a close resolves purely by
//! queue position.

use std::sync::Arc;

use imsmedia_config::SessionState;
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::callback::{AudioSessionCallback, CallbackResult};
use crate::events::{MessageReceiver, SessionCommand, SessionEvent, SessionMessage};
use crate::registry::RegistryShared;
use crate::session::AudioSession;

/// Whether the actor keeps draining its inbox after a message.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub(crate) struct SessionActor {
    session_id: u32,
    state: SessionState,
    backend: Backend,
    callback: Arc<dyn AudioSessionCallback>,
    /// Handle over this actor's own inbox, cloned out on open-success
    handle: AudioSession,
    inbox: MessageReceiver,
    registry: Arc<RegistryShared>,
}

impl SessionActor {
    pub(crate) fn new(
        session_id: u32,
        backend: Backend,
        callback: Arc<dyn AudioSessionCallback>,
        handle: AudioSession,
        inbox: MessageReceiver,
        registry: Arc<RegistryShared>,
    ) -> Self {
        Self {
            session_id,
            state: SessionState::Closed,
            backend,
            callback,
            handle,
            inbox,
            registry,
        }
    }

    /// Drains the inbox until a close command, a failed open, or all senders
    /// dropping. Deregisters the session before returning.
    pub(crate) async fn run(mut self) {
        debug!(session_id = self.session_id, kind = ?self.backend.kind(), "Session actor started");
        while let Some(message) = self.inbox.recv().await {
            let flow = match message {
                SessionMessage::Command(command) => self.handle_command(command),
                SessionMessage::Event(event) => self.handle_event(event),
            };
            if flow == Flow::Stop {
                break;
            }
        }
        self.registry.deregister(self.session_id);
        debug!(session_id = self.session_id, "Session actor stopped");
    }

    fn handle_command(&mut self, command: SessionCommand) -> Flow {
        match command {
            SessionCommand::Open { endpoint, config } => {
                self.state = SessionState::Opening;
                self.backend.open(endpoint, &config);
            }
            SessionCommand::Close => {
                // Backend teardown only happens if an engine session was
                // ever attached; an unopened session just unwinds here.
                self.backend.close();
                self.state = SessionState::Closed;
                return Flow::Stop;
            }
            SessionCommand::Modify(config) => self.backend.modify_session(&config),
            SessionCommand::AddConfig(config) => self.backend.add_config(&config),
            SessionCommand::DeleteConfig(config) => self.backend.delete_config(&config),
            SessionCommand::ConfirmConfig(config) => self.backend.confirm_config(&config),
            SessionCommand::SendDtmf { digit, duration_millis } => {
                self.backend.send_dtmf(digit, duration_millis);
            }
            SessionCommand::StartDtmf { digit } => self.backend.start_dtmf(digit),
            SessionCommand::StopDtmf => self.backend.stop_dtmf(),
            SessionCommand::SendHeaderExtension(extensions) => {
                self.backend.send_header_extension(&extensions);
            }
            SessionCommand::SetQualityThreshold(threshold) => {
                self.backend.set_media_quality_threshold(&threshold);
            }
        }
        Flow::Continue
    }

    fn handle_event(&mut self, event: SessionEvent) -> Flow {
        match event {
            SessionEvent::OpenSuccess { session } => {
                self.backend.attach(session);
                self.state = SessionState::Open;
                self.deliver(
                    "on_open_session_success",
                    self.callback.on_open_session_success(self.handle.clone()),
                );
            }
            SessionEvent::OpenFailure { error } => {
                warn!(session_id = self.session_id, %error, "Session open failed");
                self.deliver("on_open_session_failure", self.callback.on_open_session_failure(error));
                return Flow::Stop;
            }
            SessionEvent::ModifyResponse { config, result } => {
                self.deliver(
                    "on_modify_session_response",
                    self.callback.on_modify_session_response(config, result),
                );
            }
            SessionEvent::AddConfigResponse { config, result } => {
                self.deliver(
                    "on_add_config_response",
                    self.callback.on_add_config_response(config, result),
                );
            }
            SessionEvent::ConfirmConfigResponse { config, result } => {
                self.deliver(
                    "on_confirm_config_response",
                    self.callback.on_confirm_config_response(config, result),
                );
            }
            SessionEvent::SessionChanged { state } => {
                // The backend owns the state machine; whatever it reports is
                // adopted without local validation.
                debug!(
                    session_id = self.session_id,
                    from = ?self.state,
                    to = ?state,
                    "Session state changed"
                );
                self.state = state;
                self.deliver("on_session_changed", self.callback.on_session_changed(state));
            }
            SessionEvent::FirstMediaPacket { config } => {
                self.deliver(
                    "on_first_media_packet_received",
                    self.callback.on_first_media_packet_received(config),
                );
            }
            SessionEvent::HeaderExtensionReceived { extensions } => {
                self.deliver(
                    "on_header_extension_received",
                    self.callback.on_header_extension_received(extensions),
                );
            }
            SessionEvent::MediaInactivity { packet_type, duration_millis } => {
                self.deliver(
                    "notify_media_inactivity",
                    self.callback.notify_media_inactivity(packet_type, duration_millis),
                );
            }
            SessionEvent::PacketLoss { percentage } => {
                self.deliver("notify_packet_loss", self.callback.notify_packet_loss(percentage));
            }
            SessionEvent::Jitter { jitter_millis } => {
                self.deliver("notify_jitter", self.callback.notify_jitter(jitter_millis));
            }
            SessionEvent::AnbrQueryTriggered { config } => {
                self.deliver("on_trigger_anbr_query", self.callback.on_trigger_anbr_query(config));
            }
            SessionEvent::DtmfReceived { digit } => {
                self.deliver("on_dtmf_received", self.callback.on_dtmf_received(digit));
            }
            SessionEvent::CallQualityChanged { quality } => {
                self.deliver(
                    "on_call_quality_changed",
                    self.callback.on_call_quality_changed(quality),
                );
            }
        }
        Flow::Continue
    }

    /// Callback failures are logged and swallowed; they never affect the
    /// session.
    fn deliver(&self, method: &str, result: CallbackResult) {
        if let Err(error) = result {
            warn!(session_id = self.session_id, method, %error, "Session callback failed");
        }
    }
}
