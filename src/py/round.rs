//! PyO3 bindings for point rounding.

use ndarray::{Array1, ArrayD};
use numpy::{AllowTypeChange, PyArray1, PyArrayDyn, PyArrayLike1, PyArrayLikeDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyInt;

use crate::geodesic;
use crate::proj::pipeline::Transformer;
use crate::round::nearest::{self, Rounded, Step};
use crate::round::points::{self, RoundOptions, DEFAULT_DISTANCE};

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn transformer_for(backend: &str) -> PyResult<Transformer> {
    match backend.to_lowercase().as_str() {
        "native" => Ok(Transformer::default()),
        "proj4rs" => Transformer::proj4rs().map_err(to_py_err),
        _ => Err(PyValueError::new_err(format!(
            "Unknown backend: '{backend}' (expected 'native' or 'proj4rs')"
        ))),
    }
}

/// Round longitude/latitude points to the nearest `distance` metres.
///
/// Args:
///     points: Array-like of shape (2, ...) with longitudes on row 0 and latitudes on row 1.
///         Any numeric dtype is accepted and converted to float64.
///     distance: Rounding distance in metres. An upper-bound approximation.
///     backend: "native" or "proj4rs".
///     integer_output: Round geocentric axes with an integral step.
///     parallel: Run the geocentric transforms on the rayon pool.
///
/// Returns:
///     Rounded points, same shape as the input.
#[pyfunction]
#[pyo3(signature = (points, distance=DEFAULT_DISTANCE, backend="native", integer_output=false, parallel=false))]
pub fn round<'py>(
    py: Python<'py>,
    points: PyArrayLikeDyn<'py, f64, AllowTypeChange>,
    distance: f64,
    backend: &str,
    integer_output: bool,
    parallel: bool,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let src: ArrayD<f64> = points.as_array().to_owned();
    let backend = backend.to_string();
    let opts = RoundOptions::new(distance)
        .with_integer_output(integer_output)
        .with_parallel(parallel);

    let result: ArrayD<f64> = py.allow_threads(move || {
        let transformer = transformer_for(&backend)?;
        points::round_points(src.view(), &opts, &transformer).map_err(to_py_err)
    })?;

    Ok(PyArrayDyn::from_owned_array(py, result))
}

/// Round values to the nearest multiple of `step`.
///
/// `values` may be any numeric 1-d array-like. An int `step` returns an
/// int64 array, a float `step` a float64 array.
#[pyfunction]
pub fn round_to_nearest<'py>(
    py: Python<'py>,
    values: PyArrayLike1<'py, f64, AllowTypeChange>,
    step: &Bound<'py, PyAny>,
) -> PyResult<PyObject> {
    let step = if step.is_instance_of::<PyInt>() {
        Step::Integer(step.extract::<i64>()?)
    } else {
        Step::Float(step.extract::<f64>()?)
    };
    let src: Array1<f64> = values.as_array().to_owned();

    let rounded = py
        .allow_threads(move || nearest::round_with_step(src.view(), step))
        .map_err(to_py_err)?;

    Ok(match rounded {
        Rounded::Float(a) => PyArray1::from_owned_array(py, a).into_any().unbind(),
        Rounded::Integer(a) => PyArray1::from_owned_array(py, a).into_any().unbind(),
    })
}

/// WGS84 geodesic distance (metres) between each point and its rounded counterpart.
#[pyfunction]
pub fn displacement<'py>(
    py: Python<'py>,
    points: PyArrayLikeDyn<'py, f64, AllowTypeChange>,
    rounded: PyArrayLikeDyn<'py, f64, AllowTypeChange>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let a: ArrayD<f64> = points.as_array().to_owned();
    let b: ArrayD<f64> = rounded.as_array().to_owned();

    let result = py
        .allow_threads(move || geodesic::displacement(a.view(), b.view()))
        .map_err(to_py_err)?;

    Ok(PyArrayDyn::from_owned_array(py, result))
}
