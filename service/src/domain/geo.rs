//! Geographical definitions.

/// Geographical point on a map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees, within `-90..=90`.
    latitude: f64,

    /// Longitude in degrees, within `-180..=180`.
    longitude: f64,
}

impl Coordinate {
    /// [`Coordinate`] of Cairo, used whenever no coordinate is known.
    pub const CAIRO: Self = Self {
        latitude: 30.0444,
        longitude: 31.2357,
    };

    /// Creates a new [`Coordinate`] if the given values are within range.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        ((-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude))
        .then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Creates a new [`Coordinate`] out of optional parts, if both are
    /// present and valid.
    #[must_use]
    pub fn try_from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Option<Self> {
        Self::new(latitude?, longitude?)
    }

    /// Returns the latitude of this [`Coordinate`].
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude of this [`Coordinate`].
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::CAIRO
    }
}

#[cfg(test)]
mod spec {
    use super::Coordinate;

    #[test]
    fn validates_range() {
        assert!(Coordinate::new(30.0, 31.0).is_some());
        assert!(Coordinate::new(-90.0, 180.0).is_some());
        assert!(Coordinate::new(90.1, 0.0).is_none());
        assert!(Coordinate::new(0.0, -180.5).is_none());
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn requires_both_parts() {
        assert_eq!(Coordinate::try_from_parts(Some(1.0), None), None);
        assert_eq!(
            Coordinate::try_from_parts(Some(1.0), Some(2.0)),
            Coordinate::new(1.0, 2.0),
        );
    }
}
