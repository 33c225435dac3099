//! Schema-wide vocabulary types
//!
//! These enums are shared by all three configuration schemas (client,
//! hardware and wire). The discriminant values match the constants used by
//! the radio HAL so conversions never have to remap numbers.

use serde::{Deserialize, Serialize};

/// Port value meaning "not configured yet".
pub const UNINITIALIZED_PORT: i32 = -1;

/// Direction of the RTP media flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MediaDirection {
    /// No media flows in either direction
    NoFlow = 0,
    /// Device sends outgoing media only
    TransmitOnly = 1,
    /// Device receives incoming media only
    ReceiveOnly = 2,
    /// Media flows in both directions
    TransmitReceive = 3,
}

impl Default for MediaDirection {
    fn default() -> Self {
        MediaDirection::NoFlow
    }
}

/// Radio access network the media path is established over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessNetwork {
    Unknown,
    Geran,
    Utran,
    Eutran,
    Ngran,
    Iwlan,
}

impl Default for AccessNetwork {
    fn default() -> Self {
        AccessNetwork::Unknown
    }
}

/// Audio codec carried by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecType {
    /// Adaptive Multi-Rate narrowband
    Amr,
    /// Adaptive Multi-Rate wideband
    AmrWb,
    /// Enhanced Voice Services
    Evs,
    /// G.711 A-law
    Pcma,
    /// G.711 mu-law
    Pcmu,
}

/// AMR codec mode (bitrate class), 3GPP TS 26.101.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum AmrMode {
    Mode0 = 0,
    Mode1 = 1,
    Mode2 = 2,
    Mode3 = 3,
    Mode4 = 4,
    Mode5 = 5,
    Mode6 = 6,
    Mode7 = 7,
    Mode8 = 8,
}

impl AmrMode {
    /// All modes in ascending order.
    pub const ALL: [AmrMode; 9] = [
        AmrMode::Mode0,
        AmrMode::Mode1,
        AmrMode::Mode2,
        AmrMode::Mode3,
        AmrMode::Mode4,
        AmrMode::Mode5,
        AmrMode::Mode6,
        AmrMode::Mode7,
        AmrMode::Mode8,
    ];
}

/// EVS audio bandwidth class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvsBandwidth {
    None,
    NarrowBand,
    WideBand,
    SuperWideBand,
    FullBand,
}

impl EvsBandwidth {
    /// All bandwidths, narrowest first.
    pub const ALL: [EvsBandwidth; 5] = [
        EvsBandwidth::None,
        EvsBandwidth::NarrowBand,
        EvsBandwidth::WideBand,
        EvsBandwidth::SuperWideBand,
        EvsBandwidth::FullBand,
    ];
}

impl Default for EvsBandwidth {
    fn default() -> Self {
        EvsBandwidth::None
    }
}

/// EVS codec mode (bitrate class), 3GPP TS 26.441.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EvsMode {
    Mode0 = 0,
    Mode1 = 1,
    Mode2 = 2,
    Mode3 = 3,
    Mode4 = 4,
    Mode5 = 5,
    Mode6 = 6,
    Mode7 = 7,
    Mode8 = 8,
    Mode9 = 9,
    Mode10 = 10,
    Mode11 = 11,
    Mode12 = 12,
    Mode13 = 13,
    Mode14 = 14,
    Mode15 = 15,
    Mode16 = 16,
    Mode17 = 17,
    Mode18 = 18,
    Mode19 = 19,
    Mode20 = 20,
}

impl EvsMode {
    /// All modes in ascending order.
    pub const ALL: [EvsMode; 21] = [
        EvsMode::Mode0,
        EvsMode::Mode1,
        EvsMode::Mode2,
        EvsMode::Mode3,
        EvsMode::Mode4,
        EvsMode::Mode5,
        EvsMode::Mode6,
        EvsMode::Mode7,
        EvsMode::Mode8,
        EvsMode::Mode9,
        EvsMode::Mode10,
        EvsMode::Mode11,
        EvsMode::Mode12,
        EvsMode::Mode13,
        EvsMode::Mode14,
        EvsMode::Mode15,
        EvsMode::Mode16,
        EvsMode::Mode17,
        EvsMode::Mode18,
        EvsMode::Mode19,
        EvsMode::Mode20,
    ];
}

/// Lifecycle state of one media session.
///
/// `Closed → Opening → {Open, Active, Suspended} → Closed`. Transitions are
/// driven by the engine through `SessionChanged` indications and by the
/// open/close paths; the session layer applies reported states verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Closed,
    Opening,
    Open,
    Active,
    Suspended,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Closed
    }
}

/// Packet stream a quality indication refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaProtocolType {
    Rtp,
    Rtcp,
}

/// Generic outcome carried by response events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionResult {
    Failure,
    Success,
}

/// Refined failure reason reported through `OpenFailure` and response events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RtpError {
    /// A supplied parameter was invalid or out of range
    InvalidParam,
    /// The engine is not in a state to accept the request
    NotReady,
    /// The engine could not allocate memory
    NoMemory,
    /// No RTP resources (ports, graph nodes) were available
    NoResources,
    /// The requested local port could not be bound
    PortUnavailable,
    /// The requested operation is not supported by this engine
    NotSupported,
    /// The engine did not answer in time
    Timeout,
}

impl std::fmt::Display for RtpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RtpError::InvalidParam => "invalid parameter",
            RtpError::NotReady => "not ready",
            RtpError::NoMemory => "out of memory",
            RtpError::NoResources => "no resources",
            RtpError::PortUnavailable => "port unavailable",
            RtpError::NotSupported => "not supported",
            RtpError::Timeout => "timeout",
        };
        write!(f, "{}", name)
    }
}
