use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[inline]
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build from optional parts. NaN counts as absent.
    #[inline]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(long)) if !lat.is_nan() && !long.is_nan() => Some(Self::new(lat, long)),
            _ => None,
        }
    }

    /// Euclidean distance in degree space.
    ///
    /// This is the planar distance the model was trained on, not a
    /// great-circle distance.
    #[inline]
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }
}

/// Distance between two optional points; `None` when either side is missing
#[inline]
pub fn planar_distance(a: Option<Coordinates>, b: Option<Coordinates>) -> Option<f64> {
    Some(a?.planar_distance(&b?))
}
