use pyo3::prelude::*;

mod round;

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(round::round, m)?)?;
    m.add_function(wrap_pyfunction!(round::round_to_nearest, m)?)?;
    m.add_function(wrap_pyfunction!(round::displacement, m)?)?;
    Ok(())
}
