//! Pilot intents to wire bytes
//!
//! Each intent is one raw byte on the link. There is no acknowledgement and
//! no retry queue: a command that cannot be written is reported once and
//! dropped.

use tracing::{info, warn};

use bayes_hal::{CommandSink, LinkError};
use bayes_protocol::PilotCommand;

/// Errors sending a pilot command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The link reported itself closed; nothing was written
    #[error("{} not sent: link unavailable", .0.label())]
    TransportUnavailable(PilotCommand),
    /// The write itself failed
    #[error("{} not sent: {}", .command.label(), .source)]
    Link {
        command: PilotCommand,
        #[source]
        source: LinkError,
    },
    /// The byte was written but the flush failed; it may be on the wire
    #[error("{} written but not confirmed: {}", .command.label(), .source)]
    Unconfirmed {
        command: PilotCommand,
        #[source]
        source: LinkError,
    },
}

impl CommandError {
    /// Command the error is about
    pub fn command(&self) -> PilotCommand {
        match self {
            CommandError::TransportUnavailable(command) => *command,
            CommandError::Link { command, .. } => *command,
            CommandError::Unconfirmed { command, .. } => *command,
        }
    }

    /// Check if the command byte reached the link before the failure
    pub fn was_written(&self) -> bool {
        matches!(self, CommandError::Unconfirmed { .. })
    }
}

/// Writes pilot commands to a link
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    sent: u64,
    refused: u64,
    last_sent: Option<PilotCommand>,
}

impl CommandDispatcher {
    /// Create a dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Send one command
    ///
    /// Writes exactly one byte if and only if the sink reports itself open.
    /// A flush failure after a successful write still counts the command as
    /// sent and is reported as [`CommandError::Unconfirmed`].
    pub fn send<S: CommandSink + ?Sized>(
        &mut self,
        sink: &mut S,
        command: PilotCommand,
    ) -> Result<(), CommandError> {
        if !sink.is_open() {
            self.refused += 1;
            warn!("{} not sent: link unavailable", command.label());
            return Err(CommandError::TransportUnavailable(command));
        }

        if let Err(source) = sink.write_all(&[command.to_byte()]) {
            self.refused += 1;
            warn!("{} not sent: {}", command.label(), source);
            return Err(CommandError::Link { command, source });
        }

        self.sent += 1;
        self.last_sent = Some(command);

        match sink.flush() {
            Ok(()) => {
                info!("Sent {} ({:?})", command.label(), command.to_byte() as char);
                Ok(())
            }
            Err(source) => {
                warn!("{} written but not confirmed: {}", command.label(), source);
                Err(CommandError::Unconfirmed { command, source })
            }
        }
    }

    /// Commands written to the link, flushed or not
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Commands not written
    pub fn refused(&self) -> u64 {
        self.refused
    }

    /// Most recent successfully written command
    pub fn last_sent(&self) -> Option<PilotCommand> {
        self.last_sent
    }
}
