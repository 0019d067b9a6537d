//! Snap longitude/latitude batches onto a metric grid.
//!
//! Points are lifted to geocentric (x, y, z) at a fixed nominal height, each
//! axis is rounded to the distance step, and the result is brought back to
//! longitude/latitude. The height coming back from the inverse is dropped.

use ndarray::{Array, Array2, ArrayView, ArrayView1, ArrayView2, Axis, RemoveAxis};
use tracing::{debug, trace};

use crate::error::RoundError;
use crate::proj::pipeline::Transformer;
use crate::round::nearest::{round_in_place, round_to_nearest_int, Step};

/// Default rounding distance in metres.
pub const DEFAULT_DISTANCE: f64 = 5000.0;

/// Height above the ellipsoid used for every point on the forward transform.
pub const NOMINAL_HEIGHT: f64 = 32_000.0;

/// Configuration for [`round_points`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundOptions {
    /// Rounding step in metres, applied to each geocentric axis.
    pub distance: f64,
    /// Height shared by every point on the forward transform.
    pub nominal_height: f64,
    /// Round the geocentric axes with an integral step (distance truncated),
    /// truncating each rounded coordinate toward zero.
    pub integer_output: bool,
    /// Run the geocentric transforms on the rayon pool.
    pub parallel: bool,
}

impl Default for RoundOptions {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            nominal_height: NOMINAL_HEIGHT,
            integer_output: false,
            parallel: false,
        }
    }
}

impl RoundOptions {
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            ..Self::default()
        }
    }

    pub fn with_nominal_height(mut self, height: f64) -> Self {
        self.nominal_height = height;
        self
    }

    pub fn with_integer_output(mut self, integer_output: bool) -> Self {
        self.integer_output = integer_output;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the options and return the step the axes are rounded with.
    pub fn validate(&self) -> Result<Step, RoundError> {
        Step::Float(self.distance).validate()?;
        if !self.nominal_height.is_finite() {
            return Err(RoundError::InvalidParameter(format!(
                "nominal height must be finite, got {}",
                self.nominal_height
            )));
        }
        let step = if self.integer_output {
            Step::Integer(self.distance.trunc() as i64)
        } else {
            Step::Float(self.distance)
        };
        step.validate()?;
        Ok(step)
    }
}

/// Round a `(2, N)` batch of `[lon, lat]` degrees to within roughly `distance` metres.
///
/// Uses WGS84 and the default options otherwise.
pub fn round(points: ArrayView2<'_, f64>, distance: f64) -> Result<Array2<f64>, RoundError> {
    round_points(points, &RoundOptions::new(distance), &Transformer::default())
}

/// Round a batch whose leading axis holds `[lon, lat]` (shape `(2, ...)`).
///
/// The output has the same shape as the input.
pub fn round_points<D: RemoveAxis>(
    points: ArrayView<'_, f64, D>,
    opts: &RoundOptions,
    transformer: &Transformer,
) -> Result<Array<f64, D>, RoundError> {
    if points.ndim() == 0 || points.len_of(Axis(0)) != 2 {
        return Err(RoundError::Shape(format!(
            "expected leading axis of length 2 (lon, lat), got shape {:?}",
            points.shape()
        )));
    }
    let step = opts.validate()?;

    let lon: Vec<f64> = points.index_axis(Axis(0), 0).iter().copied().collect();
    let lat: Vec<f64> = points.index_axis(Axis(0), 1).iter().copied().collect();
    let height = vec![opts.nominal_height; lon.len()];

    debug!(
        points = lon.len(),
        distance = opts.distance,
        backend = transformer.backend_name(),
        "rounding point batch"
    );

    let (mut x, mut y, mut z) =
        transformer.to_geocentric_batch(&lon, &lat, &height, opts.parallel)?;

    for (name, axis) in [("x", &mut x), ("y", &mut y), ("z", &mut z)] {
        round_axis(axis, step)?;
        trace!(axis = name, "rounded geocentric axis");
    }

    let (lons, lats, _) = transformer.to_geodetic_batch(&x, &y, &z, opts.parallel)?;

    let mut out = Array::zeros(points.raw_dim());
    for (row, values) in [(0, lons), (1, lats)] {
        for (dst, src) in out.index_axis_mut(Axis(0), row).iter_mut().zip(values) {
            *dst = src;
        }
    }
    Ok(out)
}

fn round_axis(values: &mut [f64], step: Step) -> Result<(), RoundError> {
    match step {
        Step::Float(s) => round_in_place(values, s),
        Step::Integer(s) => {
            let rounded = round_to_nearest_int(ArrayView1::from(&*values), s)?;
            for (v, r) in values.iter_mut().zip(rounded.iter()) {
                *v = *r as f64;
            }
            Ok(())
        }
    }
}
