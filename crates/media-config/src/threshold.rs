//! Media quality thresholds
//!
//! Supplied once per `set_media_quality_threshold` call; the engine reports
//! inactivity, packet-loss and jitter indications against these values.

use serde::{Deserialize, Serialize};

/// Thresholds the media engine measures quality indications against.
/// Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaQualityThreshold {
    /// RTP inactivity timer in milliseconds, 0 disables the check
    pub rtp_inactivity_timer_millis: u32,
    /// RTCP inactivity timer in milliseconds, 0 disables the check
    pub rtcp_inactivity_timer_millis: u32,
    /// Duration packet loss is measured over, in milliseconds
    pub packet_loss_period_millis: u32,
    /// Packet loss rate in percent that triggers a notification
    pub packet_loss_threshold: u32,
    /// Duration jitter is measured over, in milliseconds
    pub jitter_period_millis: u32,
    /// Jitter in milliseconds that triggers a notification
    pub jitter_threshold_millis: u32,
}

impl MediaQualityThreshold {
    pub fn builder() -> MediaQualityThresholdBuilder {
        MediaQualityThresholdBuilder::default()
    }
}

/// Builder for [`MediaQualityThreshold`].
#[derive(Debug, Default)]
pub struct MediaQualityThresholdBuilder {
    threshold: MediaQualityThreshold,
}

impl MediaQualityThresholdBuilder {
    pub fn rtp_inactivity_timer_millis(mut self, millis: u32) -> Self {
        self.threshold.rtp_inactivity_timer_millis = millis;
        self
    }

    pub fn rtcp_inactivity_timer_millis(mut self, millis: u32) -> Self {
        self.threshold.rtcp_inactivity_timer_millis = millis;
        self
    }

    pub fn packet_loss_period_millis(mut self, millis: u32) -> Self {
        self.threshold.packet_loss_period_millis = millis;
        self
    }

    pub fn packet_loss_threshold(mut self, percent: u32) -> Self {
        self.threshold.packet_loss_threshold = percent;
        self
    }

    pub fn jitter_period_millis(mut self, millis: u32) -> Self {
        self.threshold.jitter_period_millis = millis;
        self
    }

    pub fn jitter_threshold_millis(mut self, millis: u32) -> Self {
        self.threshold.jitter_threshold_millis = millis;
        self
    }

    pub fn build(self) -> MediaQualityThreshold {
        self.threshold
    }
}
