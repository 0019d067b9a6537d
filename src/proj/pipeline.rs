//! Transformer: dispatches geocentric conversions between the native
//! pure-Rust backend and proj4rs, with optional rayon-parallel batches.

use rayon::prelude::*;

use crate::error::ProjError;
use crate::proj::crs::GeocentricCrs;
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::geocentric::Geocentric;
use crate::proj::{check_lengths, Batch3, GeocentricTransform};

/// Geodetic <-> geocentric transform bound to one ellipsoid.
#[derive(Debug)]
pub enum Transformer {
    /// Closed-form / iterative conversion on the given ellipsoid.
    Native(Geocentric),
    /// Delegates to proj4rs.
    Proj4rs(Box<GeocentricCrs>),
}

impl Default for Transformer {
    fn default() -> Self {
        Transformer::Native(Geocentric::default())
    }
}

impl Transformer {
    /// Native transformer on the given ellipsoid.
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Transformer::Native(Geocentric::new(ellipsoid))
    }

    /// proj4rs-backed WGS84 transformer.
    pub fn proj4rs() -> Result<Self, ProjError> {
        Ok(Transformer::Proj4rs(Box::new(GeocentricCrs::wgs84()?)))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Transformer::Native(_) => "native",
            Transformer::Proj4rs(_) => "proj4rs",
        }
    }

    fn backend(&self) -> &dyn GeocentricTransform {
        match self {
            Transformer::Native(g) => g as &dyn GeocentricTransform,
            Transformer::Proj4rs(ct) => ct.as_ref() as &dyn GeocentricTransform,
        }
    }

    /// Batch forward transform, optionally split across the rayon pool.
    pub fn to_geocentric_batch(
        &self,
        lon: &[f64],
        lat: &[f64],
        height: &[f64],
        parallel: bool,
    ) -> Result<Batch3, ProjError> {
        if !parallel {
            return self.backend().to_geocentric_batch(lon, lat, height);
        }
        check_lengths(lon.len(), lat.len(), height.len())?;
        let backend = self.backend();
        let points = (0..lon.len())
            .into_par_iter()
            .map(|i| backend.to_geocentric(lon[i], lat[i], height[i]))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(unzip3(points))
    }

    /// Batch inverse transform, optionally split across the rayon pool.
    pub fn to_geodetic_batch(
        &self,
        x: &[f64],
        y: &[f64],
        z: &[f64],
        parallel: bool,
    ) -> Result<Batch3, ProjError> {
        if !parallel {
            return self.backend().to_geodetic_batch(x, y, z);
        }
        check_lengths(x.len(), y.len(), z.len())?;
        let backend = self.backend();
        let points = (0..x.len())
            .into_par_iter()
            .map(|i| backend.to_geodetic(x[i], y[i], z[i]))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(unzip3(points))
    }
}

impl GeocentricTransform for Transformer {
    fn to_geocentric(
        &self,
        lon: f64,
        lat: f64,
        height: f64,
    ) -> Result<(f64, f64, f64), ProjError> {
        self.backend().to_geocentric(lon, lat, height)
    }

    fn to_geodetic(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64), ProjError> {
        self.backend().to_geodetic(x, y, z)
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        self.backend().ellipsoid()
    }
}

fn unzip3(points: Vec<(f64, f64, f64)>) -> Batch3 {
    let mut out = (
        Vec::with_capacity(points.len()),
        Vec::with_capacity(points.len()),
        Vec::with_capacity(points.len()),
    );
    for (a, b, c) in points {
        out.0.push(a);
        out.1.push(b);
        out.2.push(c);
    }
    out
}
