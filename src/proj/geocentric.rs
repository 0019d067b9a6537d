//! Native geodetic <-> geocentric (ECEF) conversion.
//!
//! forward: x = (N + h)·cos φ·cos λ, y = (N + h)·cos φ·sin λ, z = (N·(1 - e²) + h)·sin φ
//! inverse: λ = atan2(y, x), φ by fixed-point iteration from a Bowring start.

use crate::error::ProjError;
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::GeocentricTransform;

const MAX_ITERATIONS: usize = 10;
const CONVERGENCE_RAD: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default)]
pub struct Geocentric {
    ellipsoid: Ellipsoid,
}

impl Geocentric {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    pub fn wgs84() -> Self {
        Self::new(WGS84)
    }
}

impl GeocentricTransform for Geocentric {
    fn to_geocentric(
        &self,
        lon: f64,
        lat: f64,
        height: f64,
    ) -> Result<(f64, f64, f64), ProjError> {
        if !(lon.is_finite() && lat.is_finite() && height.is_finite()) {
            return Err(ProjError::InvalidCoordinate(format!(
                "non-finite input ({lon}, {lat}, {height})"
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ProjError::InvalidCoordinate(format!(
                "latitude {lat} outside [-90, 90]"
            )));
        }

        let el = &self.ellipsoid;
        let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
        let phi = lat.to_radians();
        let (sin_lat, cos_lat) = phi.sin_cos();
        let n = el.prime_vertical_radius(phi);

        let x = (n + height) * cos_lat * cos_lon;
        let y = (n + height) * cos_lat * sin_lon;
        let z = (n * (1.0 - el.e2) + height) * sin_lat;
        Ok((x, y, z))
    }

    fn to_geodetic(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64), ProjError> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(ProjError::InvalidCoordinate(format!(
                "non-finite input ({x}, {y}, {z})"
            )));
        }

        let el = &self.ellipsoid;
        let p = x.hypot(y);

        // On the polar axis longitude is undefined; report 0.
        if p == 0.0 {
            if z == 0.0 {
                return Err(ProjError::TransformFailed(
                    "point at the centre of the ellipsoid".into(),
                ));
            }
            let lat = 90.0_f64.copysign(z);
            return Ok((0.0, lat, z.abs() - el.b));
        }

        let lon = y.atan2(x);

        let mut phi = (z / p).atan2(1.0 - el.f);
        let mut h = 0.0;
        for _ in 0..MAX_ITERATIONS {
            let n = el.prime_vertical_radius(phi);
            h = p / phi.cos() - n;
            let next = (z + el.e2 * n * phi.sin()).atan2(p);
            let done = (next - phi).abs() < CONVERGENCE_RAD;
            phi = next;
            if done {
                break;
            }
        }

        Ok((lon.to_degrees(), phi.to_degrees(), h))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}
