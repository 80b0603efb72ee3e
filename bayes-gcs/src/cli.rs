//! Command line interface

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use bayes_core::config::{GcsConfig, GeometryKind};

/// Ground control station for the Bayes 3.5 flight computer
#[derive(Debug, Parser)]
#[command(name = "bayes-gcs", version, about)]
pub struct Cli {
    /// Configuration file (default: ./bayes.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Serial port of the flight computer
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Tick period in milliseconds
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u32>,

    /// Reference geometry
    #[arg(long, value_enum)]
    pub geometry: Option<GeometryArg>,

    /// Log a periodic summary instead of drawing the dashboard
    #[arg(long)]
    pub headless: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeometryArg {
    /// Single nose vector
    Nose,
    /// Body axis and both fin pairs
    Triad,
}

impl From<GeometryArg> for GeometryKind {
    fn from(arg: GeometryArg) -> Self {
        match arg {
            GeometryArg::Nose => GeometryKind::Nose,
            GeometryArg::Triad => GeometryKind::Triad,
        }
    }
}

impl Cli {
    /// Apply command line values over the loaded configuration
    pub fn apply(&self, config: &mut GcsConfig) {
        if let Some(port) = &self.port {
            config.link.port.clone_from(port);
        }
        if let Some(baud) = self.baud {
            config.link.baudrate = baud;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.engine.tick_ms = tick_ms;
        }
        if let Some(geometry) = self.geometry {
            config.geometry.kind = geometry.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_keeps_config() {
        let cli = Cli::try_parse_from(["bayes-gcs"]).unwrap();
        let mut config = GcsConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, GcsConfig::default());
        assert!(!cli.headless);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "bayes-gcs",
            "--port",
            "/dev/ttyUSB1",
            "-b",
            "57600",
            "--tick-ms",
            "25",
            "--geometry",
            "nose",
            "--headless",
        ])
        .unwrap();

        let mut config = GcsConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.link.port, "/dev/ttyUSB1");
        assert_eq!(config.link.baudrate, 57600);
        assert_eq!(config.engine.tick_ms, 25);
        assert_eq!(config.geometry.kind, GeometryKind::Nose);
        assert!(cli.headless);
    }

    #[test]
    fn test_rejects_unknown_geometry() {
        assert!(Cli::try_parse_from(["bayes-gcs", "--geometry", "cube"]).is_err());
    }
}
