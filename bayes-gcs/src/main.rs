//! Bayes GCS - ground control station for the Bayes 3.5 flight computer
//!
//! Opens the flight computer's serial port, streams attitude and servo
//! telemetry onto a terminal dashboard and sends the PREFLIGHT / OVERRIDE
//! mode commands typed by the operator.

use std::io;
use std::process::ExitCode;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use bayes_core::GroundStation;
use bayes_display::{DisplayBackend, HeadlessBackend, TerminalBackend};

mod app;
mod cli;
mod config;
mod error;
mod input;
mod link;
mod tick;
mod trace;

use crate::cli::Cli;
use crate::config::ConfigError;
use crate::error::GcsError;
use crate::link::SerialLink;
use crate::tick::Ticker;

fn main() -> ExitCode {
    trace::init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("bayes-gcs: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), GcsError> {
    let mut config = config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate().map_err(ConfigError::from)?;

    let link = SerialLink::open(&config.link)?;
    let label = link.label().to_owned();
    let mut station = GroundStation::from_config(link, &config)?;

    let (tx, rx) = mpsc::channel();
    input::spawn_stdin(tx).map_err(GcsError::Input)?;

    let mut backend: Box<dyn DisplayBackend> = if cli.headless {
        Box::new(HeadlessBackend::default())
    } else {
        Box::new(TerminalBackend::new(io::stdout()))
    };

    info!(
        "Streaming from {} every {} ms",
        label, config.engine.tick_ms
    );
    let mut ticker = Ticker::new(Duration::from_millis(u64::from(config.engine.tick_ms)));
    let result = app::run(&mut station, &rx, backend.as_mut(), &mut ticker, &label);

    station.shutdown();
    result
}
