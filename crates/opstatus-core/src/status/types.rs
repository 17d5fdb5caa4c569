use std::fmt;

/// Lifecycle phase of a service.
///
/// The discriminants are fixed and travel to plugins as a raw `u8`; they must
/// never be renumbered.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperatingStatus {
    Unknown = 0,
    None = 1,
    Servicing = 2,
    Starting = 3,
    Stopping = 4,
    Stopped = 5,
    Aborted = 6,
    Dormant = 7,
    Completed = 8,
    Migrating = 9,
    Immigrating = 10,
    Emigrating = 11,
    Snapshotting = 12,
    ShuttingDown = 13,
    InTest = 14,
    Transitioning = 15,
    InService = 16,
}

impl OperatingStatus {
    /// The raw wire value sent to plugin entry points.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire value back to a status, if it is a known one.
    pub fn from_u8(value: u8) -> Option<Self> {
        let status = match value {
            0 => Self::Unknown,
            1 => Self::None,
            2 => Self::Servicing,
            3 => Self::Starting,
            4 => Self::Stopping,
            5 => Self::Stopped,
            6 => Self::Aborted,
            7 => Self::Dormant,
            8 => Self::Completed,
            9 => Self::Migrating,
            10 => Self::Immigrating,
            11 => Self::Emigrating,
            12 => Self::Snapshotting,
            13 => Self::ShuttingDown,
            14 => Self::InTest,
            15 => Self::Transitioning,
            16 => Self::InService,
            _ => return Option::None,
        };
        Some(status)
    }
}

impl fmt::Display for OperatingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::None => "None",
            Self::Servicing => "Servicing",
            Self::Starting => "Starting",
            Self::Stopping => "Stopping",
            Self::Stopped => "Stopped",
            Self::Aborted => "Aborted",
            Self::Dormant => "Dormant",
            Self::Completed => "Completed",
            Self::Migrating => "Migrating",
            Self::Immigrating => "Immigrating",
            Self::Emigrating => "Emigrating",
            Self::Snapshotting => "Snapshotting",
            Self::ShuttingDown => "ShuttingDown",
            Self::InTest => "InTest",
            Self::Transitioning => "Transitioning",
            Self::InService => "InService",
        };
        f.write_str(name)
    }
}

/// Health grade of a service.
///
/// The discriminants are spaced so intermediate grades can be introduced
/// without renumbering; like [`OperatingStatus`] they are part of the wire
/// contract and frozen.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    Unknown = 0,
    Ok = 5,
    Warning = 10,
    MinorFailure = 15,
    MajorFailure = 20,
    CriticalFailure = 25,
    NonRecoverableFailure = 30,
}

impl HealthState {
    /// The raw wire value sent to plugin entry points.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire value back to a health state, if it is a known one.
    pub fn from_u8(value: u8) -> Option<Self> {
        let state = match value {
            0 => Self::Unknown,
            5 => Self::Ok,
            10 => Self::Warning,
            15 => Self::MinorFailure,
            20 => Self::MajorFailure,
            25 => Self::CriticalFailure,
            30 => Self::NonRecoverableFailure,
            _ => return None,
        };
        Some(state)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::Ok => "Ok",
            Self::Warning => "Warning",
            Self::MinorFailure => "MinorFailure",
            Self::MajorFailure => "MajorFailure",
            Self::CriticalFailure => "CriticalFailure",
            Self::NonRecoverableFailure => "NonRecoverableFailure",
        };
        f.write_str(name)
    }
}
