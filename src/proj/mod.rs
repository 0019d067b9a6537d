pub mod crs;
pub mod ellipsoid;
pub mod geocentric;
pub mod pipeline;

use crate::error::ProjError;

/// Three parallel coordinate sequences of equal length.
pub type Batch3 = (Vec<f64>, Vec<f64>, Vec<f64>);

/// Trait for geodetic <-> geocentric conversions.
///
/// Geodetic coordinates are (lon_deg, lat_deg, height_m); geocentric coordinates
/// are earth-centred, earth-fixed (x, y, z) in metres.
pub trait GeocentricTransform: Send + Sync {
    /// Forward: (lon_deg, lat_deg, height_m) -> (x, y, z)
    fn to_geocentric(&self, lon: f64, lat: f64, height: f64)
        -> Result<(f64, f64, f64), ProjError>;

    /// Inverse: (x, y, z) -> (lon_deg, lat_deg, height_m)
    fn to_geodetic(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64), ProjError>;

    /// Batch forward transform (default: loop).
    fn to_geocentric_batch(
        &self,
        lon: &[f64],
        lat: &[f64],
        height: &[f64],
    ) -> Result<Batch3, ProjError> {
        check_lengths(lon.len(), lat.len(), height.len())?;
        let mut out = (
            Vec::with_capacity(lon.len()),
            Vec::with_capacity(lon.len()),
            Vec::with_capacity(lon.len()),
        );
        for i in 0..lon.len() {
            let (x, y, z) = self.to_geocentric(lon[i], lat[i], height[i])?;
            out.0.push(x);
            out.1.push(y);
            out.2.push(z);
        }
        Ok(out)
    }

    /// Batch inverse transform (default: loop).
    fn to_geodetic_batch(&self, x: &[f64], y: &[f64], z: &[f64]) -> Result<Batch3, ProjError> {
        check_lengths(x.len(), y.len(), z.len())?;
        let mut out = (
            Vec::with_capacity(x.len()),
            Vec::with_capacity(x.len()),
            Vec::with_capacity(x.len()),
        );
        for i in 0..x.len() {
            let (lon, lat, h) = self.to_geodetic(x[i], y[i], z[i])?;
            out.0.push(lon);
            out.1.push(lat);
            out.2.push(h);
        }
        Ok(out)
    }

    fn ellipsoid(&self) -> &ellipsoid::Ellipsoid;
}

/// All three sequences must share the length of the first.
pub(crate) fn check_lengths(a: usize, b: usize, c: usize) -> Result<(), ProjError> {
    for actual in [b, c] {
        if actual != a {
            return Err(ProjError::LengthMismatch {
                expected: a,
                actual,
            });
        }
    }
    Ok(())
}
