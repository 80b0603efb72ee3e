//! Pilot commands sent to the flight computer

// Wire format values
pub const CMD_PREFLIGHT: u8 = b'P';
pub const CMD_OVERRIDE: u8 = b'O';

/// Mode command sent to the vehicle as a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PilotCommand {
    /// Enter alignment mode, servos locked
    Preflight,
    /// Enter live mode, servos driven by integrated attitude
    Override,
}

impl PilotCommand {
    /// All commands
    pub const ALL: [PilotCommand; 2] = [PilotCommand::Preflight, PilotCommand::Override];

    /// Parse a command from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_PREFLIGHT => Some(PilotCommand::Preflight),
            CMD_OVERRIDE => Some(PilotCommand::Override),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            PilotCommand::Preflight => CMD_PREFLIGHT,
            PilotCommand::Override => CMD_OVERRIDE,
        }
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            PilotCommand::Preflight => "PREFLIGHT",
            PilotCommand::Override => "OVERRIDE",
        }
    }

    /// What the vehicle does on receipt
    pub fn description(self) -> &'static str {
        match self {
            PilotCommand::Preflight => "alignment active, servos locked",
            PilotCommand::Override => "gyro integration active, servos LIVE",
        }
    }
}
