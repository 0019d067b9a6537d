//! Ellipsoidal distance between points and their rounded counterparts.
//!
//! Validation only; the rounding itself never measures distances.

use geographiclib_rs::{Geodesic, InverseGeodesic};
use ndarray::{Array, ArrayView, Axis, RemoveAxis, Zip};

use crate::error::RoundError;

/// Summary of a displacement field, in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

/// WGS84 geodesic distance from each `[lon, lat]` in `points` to the matching
/// entry of `rounded`. Both arrays must share a shape with leading axis 2.
pub fn displacement<D: RemoveAxis>(
    points: ArrayView<'_, f64, D>,
    rounded: ArrayView<'_, f64, D>,
) -> Result<Array<f64, D::Smaller>, RoundError> {
    if points.shape() != rounded.shape() {
        return Err(RoundError::Shape(format!(
            "shape mismatch: {:?} vs {:?}",
            points.shape(),
            rounded.shape()
        )));
    }
    if points.ndim() == 0 || points.len_of(Axis(0)) != 2 {
        return Err(RoundError::Shape(format!(
            "expected leading axis of length 2 (lon, lat), got shape {:?}",
            points.shape()
        )));
    }

    let geod = Geodesic::wgs84();
    let lon1 = points.index_axis(Axis(0), 0);
    let lat1 = points.index_axis(Axis(0), 1);
    let lon2 = rounded.index_axis(Axis(0), 0);
    let lat2 = rounded.index_axis(Axis(0), 1);

    let mut out = Array::zeros(lon1.raw_dim());
    Zip::from(&mut out)
        .and(&lon1)
        .and(&lat1)
        .and(&lon2)
        .and(&lat2)
        .par_for_each(|d, &lo1, &la1, &lo2, &la2| {
            *d = InverseGeodesic::<f64>::inverse(&geod, la1, lo1, la2, lo2);
        });

    if let Some(bad) = out.iter().find(|d| !d.is_finite()) {
        return Err(RoundError::Geodesic(format!("non-finite distance {bad}")));
    }
    Ok(out)
}

/// Min / max / mean over a displacement field. `None` when empty.
pub fn summarize<'a>(distances: impl IntoIterator<Item = &'a f64>) -> Option<DisplacementStats> {
    let mut stats = DisplacementStats {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
        mean: 0.0,
        count: 0,
    };
    let mut sum = 0.0;
    for &d in distances {
        stats.min = stats.min.min(d);
        stats.max = stats.max.max(d);
        sum += d;
        stats.count += 1;
    }
    if stats.count == 0 {
        return None;
    }
    stats.mean = sum / stats.count as f64;
    Some(stats)
}
