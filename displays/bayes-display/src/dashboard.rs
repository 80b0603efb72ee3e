//! Station dashboard layout
//!
//! Fixed layout, top to bottom: link header, attitude block, servo bars,
//! counters, operator console and the command help line.

use nalgebra::Point3;

use bayes_core::console::{Console, CONSOLE_CAPACITY};
use bayes_core::monitor::{LinkHealth, LinkStatus, TelemetryStats};
use bayes_core::state::{ServoLimits, ServoReading};
use bayes_core::{GroundStation, VehicleState};
use bayes_hal::Link;
use bayes_protocol::PilotCommand;

use crate::screen::{Screen, SCREEN_COLS, SCREEN_ROWS};

/// Width of a servo bar in cells
const BAR_WIDTH: usize = 41;

/// Bar range beyond the servo end stops, in degrees
const BAR_MARGIN_DEG: f64 = 10.0;

/// Reference segments shown (presets have at most three)
const MAX_SEGMENT_ROWS: usize = 3;

const ROW_HEADER: usize = 0;
const ROW_ATTITUDE: usize = 2;
const ROW_SERVOS: usize = 9;
const ROW_STATS: usize = 14;
const ROW_CONSOLE_TITLE: usize = 17;
const ROW_CONSOLE: usize = 18;
const ROW_HELP: usize = SCREEN_ROWS - 1;

/// Console rows that fit between the title and the help line
const CONSOLE_ROWS: usize = ROW_HELP - 1 - ROW_CONSOLE;

/// Everything the dashboard shows, borrowed from the engine for one frame
#[derive(Debug, Clone, Copy)]
pub struct StationView<'a> {
    pub link_label: &'a str,
    pub state: Option<&'a VehicleState>,
    pub limits: &'a ServoLimits,
    pub health: &'a LinkHealth,
    pub stats: &'a TelemetryStats,
    pub console: &'a Console,
    /// Console entries to show
    pub console_lines: usize,
    pub last_command: Option<PilotCommand>,
}

impl<'a> StationView<'a> {
    /// Borrow a view of a running station
    pub fn from_station<L: Link>(station: &'a GroundStation<L>, link_label: &'a str) -> Self {
        Self {
            link_label,
            state: station.current(),
            limits: station.store().limits(),
            health: station.health(),
            stats: station.stats(),
            console: station.console(),
            console_lines: station.config().console_lines,
            last_command: station.dispatcher().last_sent(),
        }
    }
}

/// Composes a [`Screen`] from a [`StationView`]
#[derive(Debug, Clone, Default)]
pub struct Dashboard;

impl Dashboard {
    pub fn new() -> Self {
        Self
    }

    /// Redraw the whole screen
    pub fn render(&self, view: &StationView<'_>, screen: &mut Screen) {
        screen.clear();
        let rule = "-".repeat(SCREEN_COLS);

        self.render_header(view, screen);
        screen.set_line(ROW_HEADER + 1, &rule);

        match view.state {
            Some(state) => self.render_attitude(state, screen),
            None => screen.set_line(ROW_ATTITUDE, "Waiting for telemetry..."),
        }
        screen.set_line(ROW_SERVOS - 1, &rule);

        self.render_servos(view, screen);
        screen.set_line(ROW_STATS - 1, &rule);

        self.render_stats(view, screen);
        screen.set_line(ROW_CONSOLE_TITLE - 1, &rule);

        self.render_console(view, screen);
        screen.set_line(ROW_HELP - 1, &rule);

        let last = view
            .last_command
            .map_or_else(String::new, |c| format!("   last command sent: {}", c.label()));
        screen.set_line(
            ROW_HELP,
            &format!(
                "[p] {}  [o] {}  [q] quit{}",
                PilotCommand::Preflight.label(),
                PilotCommand::Override.label(),
                last
            ),
        );
    }

    fn render_header(&self, view: &StationView<'_>, screen: &mut Screen) {
        let status = view.health.status();
        let detail = match (status, view.health.ms_since_sample()) {
            (LinkStatus::Live, Some(age)) => format!("{} {} ms", status.label(), age),
            (LinkStatus::Stale, Some(age)) => {
                format!("{} {:.1} s", status.label(), age as f64 / 1000.0)
            }
            _ => String::from(status.label()),
        };
        let prefix = format!("BAYES 3.5 GCS | {} | ", view.link_label);
        screen.set_line(ROW_HEADER, &format!("{}{}", prefix, detail));

        if status != LinkStatus::Live {
            let start = prefix.chars().count();
            screen.set_highlight(ROW_HEADER, start, start + detail.chars().count());
        }
    }

    fn render_attitude(&self, state: &VehicleState, screen: &mut Screen) {
        let attitude = &state.geometry.attitude;
        screen.set_line(
            ROW_ATTITUDE,
            &format!(
                "ATTITUDE  roll {:+7.1}°  pitch {:+7.1}°  yaw {:+7.1}°",
                attitude.roll_deg, attitude.pitch_deg, attitude.yaw_deg
            ),
        );

        let [w, x, y, z] = state.sample.quaternion.to_scalar_first();
        screen.set_line(
            ROW_ATTITUDE + 1,
            &format!("QUAT      w {:+.3}  x {:+.3}  y {:+.3}  z {:+.3}", w, x, y, z),
        );

        screen.set_line(
            ROW_ATTITUDE + 2,
            &format!("NOSE      {}", point(&state.geometry.nose)),
        );

        for (i, segment) in state
            .geometry
            .segments
            .iter()
            .take(MAX_SEGMENT_ROWS)
            .enumerate()
        {
            screen.set_line(
                ROW_ATTITUDE + 3 + i,
                &format!(
                    "{:<9} {} -> {}",
                    segment.axis.label(),
                    point(&segment.start),
                    point(&segment.end)
                ),
            );
        }
    }

    fn render_servos(&self, view: &StationView<'_>, screen: &mut Screen) {
        let Some(state) = view.state else {
            for (i, channel) in bayes_protocol::ServoChannel::ALL.iter().enumerate() {
                screen.set_line(ROW_SERVOS + i, &format!("{:<3}    ---", channel.label()));
            }
            return;
        };

        for (i, reading) in state.servos.iter().enumerate() {
            let row = ROW_SERVOS + i;
            let line = servo_line(reading, view.limits);
            screen.set_line(row, &line);
            if reading.is_saturated() {
                let end = line.chars().count();
                screen.set_highlight(row, end - 3, end);
            }
        }
    }

    fn render_stats(&self, view: &StationView<'_>, screen: &mut Screen) {
        let stats = view.stats;
        let sequence = view.state.map_or(0, |s| s.sequence);
        screen.set_line(
            ROW_STATS,
            &format!(
                "seq {}  lines {}  samples {}  console {}  cmds {} sent / {} refused",
                sequence,
                stats.lines,
                stats.samples,
                stats.diagnostics,
                stats.commands_sent,
                stats.commands_refused
            ),
        );
        screen.set_line(
            ROW_STATS + 1,
            &format!(
                "dropped {}: truncated {}  malformed {}  keys {}  shape {}  bytes {}  quat {}",
                stats.dropped(),
                stats.ignored.truncated,
                stats.ignored.malformed,
                stats.ignored.missing_key,
                stats.ignored.bad_shape,
                stats.undecodable,
                stats.rejected
            ),
        );
    }

    fn render_console(&self, view: &StationView<'_>, screen: &mut Screen) {
        screen.set_line(ROW_CONSOLE_TITLE, "CONSOLE");

        let shown = view.console_lines.min(CONSOLE_ROWS).min(CONSOLE_CAPACITY);
        for (i, entry) in view.console.recent(shown).enumerate() {
            let text: String = entry
                .text
                .chars()
                .map(|c| if c.is_control() { '?' } else { c })
                .collect();
            screen.set_line(
                ROW_CONSOLE + i,
                &format!(
                    "{:>8.1} {} {}",
                    entry.at_ms as f64 / 1000.0,
                    entry.source.tag(),
                    text
                ),
            );
        }
    }
}

/// One servo row: label, angle, bar, deflection and saturation mark
fn servo_line(reading: &ServoReading, limits: &ServoLimits) -> String {
    let lo = limits.min_deg() - BAR_MARGIN_DEG;
    let hi = limits.max_deg() + BAR_MARGIN_DEG;
    let cell = |deg: f64| {
        let t = ((deg - lo) / (hi - lo)).clamp(0.0, 1.0);
        (t * (BAR_WIDTH - 1) as f64).round() as usize
    };

    let center = cell(limits.center_deg);
    let value = cell(reading.angle_deg);
    let (from, to) = (center.min(value), center.max(value));

    let bar: String = (0..BAR_WIDTH)
        .map(|i| match i {
            _ if i == center => '|',
            _ if (from..=to).contains(&i) => '#',
            _ => '.',
        })
        .collect();

    format!(
        "{:<3}{:>6.1}° [{}] {:+6.1}°{}",
        reading.channel.label(),
        reading.angle_deg,
        bar,
        reading.deflection_deg,
        if reading.is_saturated() { " SAT" } else { "" }
    )
}

/// Point as `(+x.xx, +y.yy, +z.zz)`
fn point(p: &Point3<f64>) -> String {
    format!("({:+.2}, {:+.2}, {:+.2})", p.x, p.y, p.z)
}
