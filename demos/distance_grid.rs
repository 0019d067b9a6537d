//! Round a global longitude x latitude grid and report how far points moved.
//!
//! Usage: cargo run --example distance_grid -- [DISTANCE] [--backend native|proj4rs]
//! Set RUST_LOG=debug to see per-batch events.

use std::error::Error;

use clap::Parser;
use ndarray::Array3;
use tracing::info;
use tracing_subscriber::EnvFilter;

use _rust::geodesic::{displacement, summarize};
use _rust::proj::pipeline::Transformer;
use _rust::round::points::{round_points, RoundOptions};

const COLS: usize = 500;
const ROWS: usize = 250;

/// Round a 500x250 global grid and summarize displacement
#[derive(Parser, Debug)]
#[command(name = "distance_grid", about)]
struct Args {
    /// Rounding distance in metres
    #[arg(default_value_t = 1250.0)]
    distance: f64,

    /// Geocentric transform backend
    #[arg(short, long, value_enum, default_value_t = Backend::Native)]
    backend: Backend,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    Native,
    Proj4rs,
}

impl Backend {
    fn transformer(self) -> Result<Transformer, _rust::ProjError> {
        match self {
            Backend::Native => Ok(Transformer::default()),
            Backend::Proj4rs => Transformer::proj4rs(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args = Args::parse();
    let distance = args.distance;
    let transformer = args.backend.transformer()?;

    let mut grid = Array3::zeros((2, ROWS, COLS));
    for i in 0..ROWS {
        for j in 0..COLS {
            grid[(0, i, j)] = -180.0 + 360.0 * j as f64 / (COLS - 1) as f64;
            grid[(1, i, j)] = -90.0 + 180.0 * i as f64 / (ROWS - 1) as f64;
        }
    }

    let opts = RoundOptions::new(distance).with_parallel(true);
    let rounded = round_points(grid.view(), &opts, &transformer)?;
    let dist = displacement(grid.view(), rounded.view())?;

    if let Some(stats) = summarize(dist.iter()) {
        info!(
            distance,
            backend = transformer.backend_name(),
            points = stats.count,
            min = stats.min,
            mean = stats.mean,
            max = stats.max,
            ratio = stats.max / distance,
            "rounded distance from original point"
        );
    }

    // Coarse text map of displacement per 10 degree latitude band
    for (i, band) in dist.outer_iter().enumerate().step_by(ROWS / 18) {
        let lat = -90.0 + 180.0 * i as f64 / (ROWS - 1) as f64;
        if let Some(s) = summarize(band.iter()) {
            println!("lat {lat:>7.2}  mean {:>9.1} m  max {:>9.1} m", s.mean, s.max);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["distance_grid"]).unwrap();
        assert_eq!(args.distance, 1250.0);
        assert_eq!(args.backend, Backend::Native);
    }

    #[test]
    fn test_backend_selection() {
        let args =
            Args::try_parse_from(["distance_grid", "500", "--backend", "proj4rs"]).unwrap();
        assert_eq!(args.distance, 500.0);
        assert_eq!(args.backend, Backend::Proj4rs);
        assert_eq!(args.backend.transformer().unwrap().backend_name(), "proj4rs");
    }

    #[test]
    fn test_unknown_backend_rejected() {
        for name in ["proj4", "nativ", "PROJ4RS"] {
            let err = Args::try_parse_from(["distance_grid", "--backend", name]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue, "{name}");
        }
    }

    #[test]
    fn test_bad_distance_rejected() {
        let err = Args::try_parse_from(["distance_grid", "far"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
