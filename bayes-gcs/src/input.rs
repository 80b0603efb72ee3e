//! Operator input
//!
//! Stdin is read on its own thread so a blocked read never stalls the tick
//! loop. Parsed intents are queued to the control thread, which owns the
//! link and does every write.

use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use bayes_protocol::PilotCommand;

/// Something the operator asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorInput {
    Command(PilotCommand),
    Quit,
}

/// Unrecognised operator input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown input {0:?} (p = preflight, o = override, q = quit)")]
pub struct UnknownInput(pub String);

/// Parse one input line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<OperatorInput>, UnknownInput> {
    let word = line.trim().to_ascii_lowercase();
    let input = match word.as_str() {
        "" => return Ok(None),
        "p" | "preflight" => OperatorInput::Command(PilotCommand::Preflight),
        "o" | "override" => OperatorInput::Command(PilotCommand::Override),
        "q" | "quit" | "exit" => OperatorInput::Quit,
        _ => return Err(UnknownInput(String::from(line.trim()))),
    };
    Ok(Some(input))
}

/// Forward parsed lines from `reader` until it ends or the receiver is gone
pub fn forward<R: BufRead>(reader: R, tx: &Sender<OperatorInput>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Operator input failed: {}", e);
                break;
            }
        };

        match parse(&line) {
            Ok(Some(input)) => {
                if tx.send(input).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }
    debug!("Operator input closed");
}

/// Start the stdin reader thread
pub fn spawn_stdin(tx: Sender<OperatorInput>) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(String::from("operator-input"))
        .spawn(move || forward(std::io::stdin().lock(), &tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse("p"),
            Ok(Some(OperatorInput::Command(PilotCommand::Preflight)))
        );
        assert_eq!(
            parse("  OVERRIDE \r"),
            Ok(Some(OperatorInput::Command(PilotCommand::Override)))
        );
        assert_eq!(parse("q"), Ok(Some(OperatorInput::Quit)));
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("launch"), Err(UnknownInput(String::from("launch"))));
    }

    #[test]
    fn test_forward_skips_unknown() {
        let (tx, rx) = mpsc::channel();
        forward(Cursor::new("p\nabort\n\no\nq\n"), &tx);
        drop(tx);

        let inputs: Vec<_> = rx.iter().collect();
        assert_eq!(
            inputs,
            [
                OperatorInput::Command(PilotCommand::Preflight),
                OperatorInput::Command(PilotCommand::Override),
                OperatorInput::Quit,
            ]
        );
    }

    #[test]
    fn test_forward_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        // Must return rather than loop
        forward(Cursor::new("p\no\n"), &tx);
    }
}
