pub mod error;
pub mod geodesic;
pub mod proj;
pub mod round;
#[cfg(feature = "python")]
mod py;

pub use error::{ProjError, RoundError};
pub use proj::ellipsoid::{Ellipsoid, WGS84};
pub use proj::pipeline::Transformer;
pub use round::{round, round_points, round_to_nearest, RoundOptions};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
