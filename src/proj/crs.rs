use std::fmt;

use crate::error::ProjError;
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::GeocentricTransform;
use proj4rs::Proj;

const WGS84_LONGLAT: &str = "+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs";
const WGS84_GEOCENT: &str = "+proj=geocent +datum=WGS84 +units=m +no_defs";

/// Thin wrapper around proj4rs for geodetic <-> geocentric transforms.
///
/// proj4rs uses radians for geographic CRS; this wrapper takes and returns
/// degrees so it is interchangeable with the native backend.
pub struct GeocentricCrs {
    geodetic: Proj,
    geocentric: Proj,
    ellipsoid: Ellipsoid,
}

impl GeocentricCrs {
    /// Create a transform from a geographic and a geocentric PROJ string.
    pub fn new(geodetic: &str, geocentric: &str, ellipsoid: Ellipsoid) -> Result<Self, ProjError> {
        let geodetic_proj = Proj::from_proj_string(geodetic)
            .map_err(|e| ProjError::UnknownCrs(format!("{geodetic}: {e}")))?;
        let geocentric_proj = Proj::from_proj_string(geocentric)
            .map_err(|e| ProjError::UnknownCrs(format!("{geocentric}: {e}")))?;
        if !geodetic_proj.is_latlong() {
            return Err(ProjError::UnknownCrs(format!(
                "{geodetic}: not a geographic CRS"
            )));
        }
        Ok(Self {
            geodetic: geodetic_proj,
            geocentric: geocentric_proj,
            ellipsoid,
        })
    }

    /// WGS84 longlat <-> WGS84 geocentric metres.
    pub fn wgs84() -> Result<Self, ProjError> {
        Self::new(WGS84_LONGLAT, WGS84_GEOCENT, WGS84)
    }
}

impl fmt::Debug for GeocentricCrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocentricCrs")
            .field("ellipsoid", &self.ellipsoid)
            .finish_non_exhaustive()
    }
}

impl GeocentricTransform for GeocentricCrs {
    fn to_geocentric(
        &self,
        lon: f64,
        lat: f64,
        height: f64,
    ) -> Result<(f64, f64, f64), ProjError> {
        let mut point = (lon.to_radians(), lat.to_radians(), height);
        proj4rs::transform::transform(&self.geodetic, &self.geocentric, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;
        Ok(point)
    }

    fn to_geodetic(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64), ProjError> {
        let mut point = (x, y, z);
        proj4rs::transform::transform(&self.geocentric, &self.geodetic, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;
        Ok((point.0.to_degrees(), point.1.to_degrees(), point.2))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}
