//! Capability handshake
//!
//! The remote side's device capabilities arrive asynchronously over
//! signaling. Instead of polling a shared slot, the waiter parks on a watch
//! channel and wakes exactly when the capabilities are published or the
//! deadline passes.

use std::time::Duration;

use imsmedia_config::negotiation::{
    self, CapabilityNegotiationResult, DeviceCapabilities,
};
use tokio::sync::watch;
use tracing::debug;

use crate::error::{Result, SessionError};

/// Waiting half of the handshake. Holds the local capabilities and resolves
/// once the remote side's are published.
#[derive(Debug)]
pub struct CapabilityExchange {
    local: DeviceCapabilities,
    remote: watch::Receiver<Option<DeviceCapabilities>>,
}

/// Publishing half of the handshake, handed to whatever receives the remote
/// capability message off signaling.
#[derive(Debug, Clone)]
pub struct RemoteCapabilitySink {
    slot: watch::Sender<Option<DeviceCapabilities>>,
}

impl RemoteCapabilitySink {
    /// Publishes the remote capabilities, waking any waiter. Publishing
    /// again replaces the previous value for future waiters.
    pub fn publish(&self, capabilities: DeviceCapabilities) {
        self.slot.send_replace(Some(capabilities));
    }
}

impl CapabilityExchange {
    /// A fresh exchange for one session's handshake.
    pub fn new(local: DeviceCapabilities) -> (Self, RemoteCapabilitySink) {
        let (slot, remote) = watch::channel(None);
        (Self { local, remote }, RemoteCapabilitySink { slot })
    }

    pub fn local(&self) -> &DeviceCapabilities {
        &self.local
    }

    /// Waits for the remote capabilities, up to `timeout`.
    pub async fn remote(&mut self, timeout: Duration) -> Result<DeviceCapabilities> {
        let waited = tokio::time::timeout(timeout, self.remote.wait_for(Option::is_some));
        match waited.await {
            Ok(Ok(capabilities)) => {
                // wait_for only returns on Some
                Ok(capabilities.clone().unwrap_or_else(DeviceCapabilities::all))
            }
            Ok(Err(_)) => Err(SessionError::HandshakeClosed),
            Err(_) => Err(SessionError::HandshakeTimeout {
                timeout_millis: timeout.as_millis() as u64,
            }),
        }
    }

    /// Waits for the remote capabilities and negotiates against the local
    /// set. When the two sides share no workable codec, the negotiation
    /// falls back to AMR-WB rather than failing the session.
    pub async fn negotiate_with(&mut self, timeout: Duration) -> Result<CapabilityNegotiationResult> {
        let remote = self.remote(timeout).await?;
        let result = match negotiation::negotiate(&self.local, &remote) {
            Some(result) => result,
            None => {
                debug!("No common codec with remote, using fallback");
                negotiation::fallback_result()
            }
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsmedia_config::{AmrMode, CodecType};
    use std::collections::HashSet;

    #[tokio::test]
    async fn published_capabilities_resolve_the_wait() {
        let (mut exchange, sink) = CapabilityExchange::new(DeviceCapabilities::all());

        let waiter = tokio::spawn(async move {
            exchange.remote(Duration::from_secs(5)).await
        });
        sink.publish(DeviceCapabilities::all());

        let remote = waiter.await.unwrap().unwrap();
        assert!(remote.codecs.contains(&CodecType::Evs));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_times_out_without_a_publisher_message() {
        let (mut exchange, _sink) = CapabilityExchange::new(DeviceCapabilities::all());

        let result = exchange.remote(Duration::from_millis(250)).await;
        assert!(matches!(
            result,
            Err(SessionError::HandshakeTimeout { timeout_millis: 250 })
        ));
    }

    #[tokio::test]
    async fn dropped_sink_fails_the_wait() {
        let (mut exchange, sink) = CapabilityExchange::new(DeviceCapabilities::all());
        drop(sink);

        let result = exchange.remote(Duration::from_secs(5)).await;
        assert!(matches!(result, Err(SessionError::HandshakeClosed)));
    }

    #[tokio::test]
    async fn disjoint_capabilities_negotiate_to_fallback() {
        let local = DeviceCapabilities {
            codecs: HashSet::from([CodecType::Amr]),
            ..DeviceCapabilities::all()
        };
        let remote = DeviceCapabilities {
            codecs: HashSet::from([CodecType::Pcmu]),
            ..DeviceCapabilities::all()
        };

        let (mut exchange, sink) = CapabilityExchange::new(local);
        sink.publish(remote);

        let result = exchange.negotiate_with(Duration::from_secs(1)).await.unwrap();
        assert_eq!(result.codec_type, CodecType::AmrWb);
        assert_eq!(result.amr_params.unwrap().mode, AmrMode::Mode4);
    }

    #[tokio::test]
    async fn negotiation_prefers_the_highest_priority_common_codec() {
        let local = DeviceCapabilities {
            codecs: HashSet::from([CodecType::AmrWb, CodecType::Evs, CodecType::Pcma]),
            ..DeviceCapabilities::all()
        };
        let remote = DeviceCapabilities {
            codecs: HashSet::from([CodecType::Evs, CodecType::Pcma]),
            ..DeviceCapabilities::all()
        };

        let (mut exchange, sink) = CapabilityExchange::new(local);
        sink.publish(remote);

        let result = exchange.negotiate_with(Duration::from_secs(1)).await.unwrap();
        assert_eq!(result.codec_type, CodecType::Evs);
        assert!(result.evs_params.is_some());
        assert!(result.amr_params.is_none());
    }
}
