use crate::EngineError;
use crate::models::Coordinates;

const EARTH_RADIUS_KM: f64 = 6371.0;

impl Coordinates {
    /// Check that both components are in range (latitude [-90, 90],
    /// longitude [-180, 180]).
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(EngineError::LatitudeOutOfRange {
                latitude: self.latitude,
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(EngineError::LongitudeOutOfRange {
                longitude: self.longitude,
            });
        }
        Ok(())
    }
}

/// Great-circle distance in kilometers between two validated points.
pub(crate) fn haversine_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let lat_diff = (to.latitude - from.latitude).to_radians();
    let lon_diff = (to.longitude - from.longitude).to_radians();

    let a = (lat_diff / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (lon_diff / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance in kilometers between two coordinate pairs.
///
/// Validates both endpoints, so a caller passing an out-of-range latitude
/// or longitude gets an error instead of a nonsensical distance.
pub fn distance_km(from: &Coordinates, to: &Coordinates) -> Result<f64, EngineError> {
    from.validate()?;
    to.validate()?;
    Ok(haversine_km(from, to))
}
