//! Ground station engine
//!
//! [`GroundStation`] owns the link and every piece of derived state. The
//! binary calls [`GroundStation::tick`] once per period; each call drains
//! a bounded amount of input, pushes it through the decoder and the vehicle
//! state store, and returns. Nothing a single line contains can make a tick
//! fail.

use tracing::{debug, info, trace, warn};

use bayes_hal::{Link, LinkError};
use bayes_protocol::{decode_line, Decoded, IgnoreReason, PilotCommand};

use crate::command::{CommandDispatcher, CommandError};
use crate::config::{EngineConfig, GcsConfig};
use crate::console::{Console, ConsoleSource};
use crate::monitor::{LinkHealth, TelemetryStats};
use crate::orientation::{FrameSetError, OrientationError, OrientationModel};
use crate::state::{VehicleState, VehicleStateStore};

/// What one line did to the station
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineOutcome {
    /// Vehicle state replaced
    Sample,
    /// Vehicle text added to the console
    Diagnostic,
    /// Dropped by the decoder
    Ignored(IgnoreReason),
    /// Decoded but the quaternion was unusable; state kept
    Rejected(OrientationError),
}

/// Summary of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Bytes pending when the tick started
    pub budget_bytes: usize,
    /// Lines read, including ones the link could not decode
    pub lines: usize,
    pub samples: usize,
    pub diagnostics: usize,
    /// Lines that changed nothing
    pub dropped: usize,
    /// Transport failure that ended the tick early
    pub link_error: Option<LinkError>,
}

impl TickReport {
    /// Check if the vehicle state changed this tick
    pub fn state_changed(&self) -> bool {
        self.samples > 0
    }
}

/// Telemetry and command engine for one vehicle
#[derive(Debug)]
pub struct GroundStation<L: Link> {
    link: L,
    store: VehicleStateStore,
    dispatcher: CommandDispatcher,
    console: Console,
    stats: TelemetryStats,
    health: LinkHealth,
    config: EngineConfig,
    now_ms: u64,
    link_fault: bool,
    shut_down: bool,
}

impl<L: Link> GroundStation<L> {
    /// Create a station from a parts list
    pub fn new(link: L, store: VehicleStateStore, config: EngineConfig) -> Self {
        Self {
            link,
            store,
            dispatcher: CommandDispatcher::new(),
            console: Console::new(),
            stats: TelemetryStats::default(),
            health: LinkHealth::new(config.stale_after_ms),
            config,
            now_ms: 0,
            link_fault: false,
            shut_down: false,
        }
    }

    /// Create a station from the loaded configuration
    pub fn from_config(link: L, config: &GcsConfig) -> Result<Self, FrameSetError> {
        let frame = config.geometry.reference_frame()?;
        let store = VehicleStateStore::new(OrientationModel::new(frame), config.servo);
        Ok(Self::new(link, store, config.engine))
    }

    /// Run one bounded drain of the link
    ///
    /// Reads at most the bytes that were pending when the tick started and
    /// at most `max_lines_per_tick` lines, so a fast sender cannot stall the
    /// display. Input arriving during the tick waits for the next one.
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        self.now_ms = self.now_ms.max(now_ms);
        self.health.update_time(self.now_ms);

        let mut report = TickReport::default();
        if self.shut_down {
            return report;
        }

        let budget = match self.link.bytes_pending() {
            Ok(n) => n,
            Err(e) => {
                self.link_failed(&e);
                report.link_error = Some(e);
                return report;
            }
        };
        report.budget_bytes = budget;

        let mut consumed = 0usize;
        while consumed < budget && report.lines < self.config.max_lines_per_tick {
            match self.link.read_line() {
                Ok(Some(line)) => {
                    consumed += line.consumed;
                    report.lines += 1;
                    match self.handle_line(&line.text) {
                        LineOutcome::Sample => report.samples += 1,
                        LineOutcome::Diagnostic => report.diagnostics += 1,
                        LineOutcome::Ignored(_) | LineOutcome::Rejected(_) => report.dropped += 1,
                    }
                }
                Ok(None) => break,
                Err(e) if e.is_line_error() => {
                    consumed += e.consumed();
                    report.lines += 1;
                    report.dropped += 1;
                    self.stats.undecodable += 1;
                    debug!("Dropped line: {}", e);
                }
                Err(e) => {
                    self.link_failed(&e);
                    report.link_error = Some(e);
                    return report;
                }
            }
        }

        if self.link_fault {
            info!("Link recovered");
            self.link_fault = false;
        }

        if report.lines > 0 {
            trace!(
                "Tick: {} lines, {} samples, {} dropped",
                report.lines,
                report.samples,
                report.dropped
            );
        }
        report
    }

    /// Push one complete line through the decoder and the state store
    pub fn handle_line(&mut self, line: &str) -> LineOutcome {
        self.stats.lines += 1;

        match decode_line(line) {
            Decoded::Sample(sample) => match self.store.update(sample, self.now_ms) {
                Ok(state) => {
                    self.stats.samples += 1;
                    self.health.sample_received(self.now_ms);
                    trace!("Sample {} accepted", state.sequence);
                    LineOutcome::Sample
                }
                Err(e) => {
                    self.stats.rejected += 1;
                    warn!("Invalid orientation, keeping previous state: {}", e);
                    self.console.push(
                        ConsoleSource::Warning,
                        format!("invalid orientation: {}", e),
                        self.now_ms,
                    );
                    LineOutcome::Rejected(e)
                }
            },
            Decoded::Diagnostic(event) => {
                self.stats.diagnostics += 1;
                info!(target: "bayes::vehicle", "{}", event.text);
                self.console
                    .push(ConsoleSource::Vehicle, event.text, self.now_ms);
                LineOutcome::Diagnostic
            }
            Decoded::Ignored(reason) => {
                self.stats.record_ignored(reason);
                match reason {
                    IgnoreReason::Empty | IgnoreReason::Truncated => {
                        trace!("Ignored line: {:?}", reason)
                    }
                    _ => debug!("Ignored line: {:?}", reason),
                }
                LineOutcome::Ignored(reason)
            }
        }
    }

    /// Send a pilot command and note the outcome on the console
    pub fn send(&mut self, command: PilotCommand) -> Result<(), CommandError> {
        let result = self.dispatcher.send(&mut self.link, command);
        match &result {
            Ok(()) => {
                self.stats.commands_sent += 1;
                self.console.push(
                    ConsoleSource::Command,
                    format!("{} sent: {}", command.label(), command.description()),
                    self.now_ms,
                );
            }
            Err(e) => {
                if e.was_written() {
                    self.stats.commands_sent += 1;
                } else {
                    self.stats.commands_refused += 1;
                }
                self.console
                    .push(ConsoleSource::Warning, e.to_string(), self.now_ms);
            }
        }
        result
    }

    /// Close the link
    ///
    /// Only the first call has any effect.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.link.close();
        info!("Link closed");
    }

    /// Check if [`GroundStation::shutdown`] has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Latest vehicle state
    pub fn current(&self) -> Option<&VehicleState> {
        self.store.current()
    }

    pub fn store(&self) -> &VehicleStateStore {
        &self.store
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn stats(&self) -> &TelemetryStats {
        &self.stats
    }

    pub fn health(&self) -> &LinkHealth {
        &self.health
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Latest engine time seen
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    fn link_failed(&mut self, e: &LinkError) {
        if !self.link_fault {
            warn!("Link error: {}", e);
            self.console
                .push(ConsoleSource::Warning, format!("link error: {}", e), self.now_ms);
            self.link_fault = true;
        }
    }
}

impl<L: Link> Drop for GroundStation<L> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
