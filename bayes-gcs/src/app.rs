//! Control loop
//!
//! One thread owns the station: each period it applies queued operator
//! input, runs one engine tick and redraws.

use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::{debug, info};

use bayes_core::GroundStation;
use bayes_display::{Dashboard, DisplayBackend, DisplayError, Screen, StationView};
use bayes_hal::Link;

use crate::error::GcsError;
use crate::input::OperatorInput;
use crate::tick::Ticker;

/// Run until the operator quits or the display fails
pub fn run<L: Link>(
    station: &mut GroundStation<L>,
    inputs: &Receiver<OperatorInput>,
    backend: &mut dyn DisplayBackend,
    ticker: &mut Ticker,
    link_label: &str,
) -> Result<(), GcsError> {
    let dashboard = Dashboard::new();
    let mut screen = Screen::new();
    let mut input_open = true;

    loop {
        let now_ms = ticker.wait();

        while input_open {
            match inputs.try_recv() {
                Ok(OperatorInput::Command(command)) => {
                    // Outcome is logged and shown on the console
                    let _ = station.send(command);
                }
                Ok(OperatorInput::Quit) => {
                    info!("Quit requested");
                    return Ok(());
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("Operator input gone, continuing without it");
                    input_open = false;
                }
            }
        }

        station.tick(now_ms);

        if !backend.is_ready() {
            return Err(DisplayError::NotReady.into());
        }
        dashboard.render(&StationView::from_station(station, link_label), &mut screen);
        backend.present(&screen)?;
        screen.mark_clean();
    }
}
