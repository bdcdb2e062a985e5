//! Shared geographic and color primitives.
//!
//! Positions always travel as `[longitude, latitude]` on the wire and colors
//! as `[r, g, b]` byte triples, which is the shape map renderers consume.

use serde::{Deserialize, Serialize};

/// A WGS84 position. Serializes as `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct CoordinatePair {
    pub longitude: f64,
    pub latitude: f64,
}

impl CoordinatePair {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Position in renderer order.
    #[must_use]
    pub const fn position(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Finite and inside WGS84 bounds: `|longitude| <= 180`, `|latitude| <= 90`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && self.longitude.abs() <= 180.0
            && self.latitude.abs() <= 90.0
    }
}

impl From<[f64; 2]> for CoordinatePair {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<CoordinatePair> for [f64; 2] {
    fn from(pair: CoordinatePair) -> Self {
        pair.position()
    }
}

/// An opaque 8-bit color. Serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from arbitrary integer components, clamping each to `0..=255`.
    #[must_use]
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        let clamp = |v: i64| u8::try_from(v.clamp(0, 255)).unwrap_or(u8::MAX);
        Self::new(clamp(r), clamp(g), clamp(b))
    }

    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// The same color with an alpha channel appended.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}

/// Initial camera position handed to the map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Viewport {
    /// Continental United States.
    pub const CONTINENTAL: Self = Self {
        latitude: 39.0,
        longitude: -98.0,
        zoom: 3.5,
    };
}

impl Default for Viewport {
    fn default() -> Self {
        Self::CONTINENTAL
    }
}

/// What to do with rows whose warehouse coordinates are missing or unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseFallback {
    /// Skip the row.
    #[default]
    Drop,
    /// Attach the row to a synthetic facility at the mean customer position.
    Centroid,
}

impl std::fmt::Display for WarehouseFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarehouseFallback::Drop => write!(f, "drop"),
            WarehouseFallback::Centroid => write!(f, "centroid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_pair_serializes_lon_first() {
        let pair = CoordinatePair::new(-76.0, 41.0);
        let json = serde_json::to_string(&pair).expect("serialize");
        assert_eq!(json, "[-76.0,41.0]");
    }

    #[test]
    fn coordinate_pair_deserializes_from_array() {
        let pair: CoordinatePair = serde_json::from_str("[-78.5, 43.25]").expect("deserialize");
        assert_eq!(pair, CoordinatePair::new(-78.5, 43.25));
    }

    #[test]
    fn coordinate_pair_rejects_non_finite() {
        assert!(!CoordinatePair::new(f64::NAN, 1.0).is_valid());
        assert!(!CoordinatePair::new(1.0, f64::INFINITY).is_valid());
        assert!(CoordinatePair::new(1.0, 2.0).is_valid());
    }

    #[test]
    fn coordinate_pair_rejects_out_of_range() {
        assert!(CoordinatePair::new(-180.0, 90.0).is_valid());
        assert!(CoordinatePair::new(180.0, -90.0).is_valid());
        assert!(!CoordinatePair::new(180.000_001, 0.0).is_valid());
        assert!(!CoordinatePair::new(0.0, -90.5).is_valid());
        assert!(!CoordinatePair::new(1e20, 41.0).is_valid());
    }

    #[test]
    fn rgb_clamped_saturates_out_of_range_components() {
        assert_eq!(Rgb::clamped(-10, 128, 300), Rgb::new(0, 128, 255));
    }

    #[test]
    fn rgb_with_alpha_appends_channel() {
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(120), [1, 2, 3, 120]);
    }

    #[test]
    fn rgb_serializes_as_triple() {
        let json = serde_json::to_string(&Rgb::new(31, 119, 180)).expect("serialize");
        assert_eq!(json, "[31,119,180]");
    }

    #[test]
    fn viewport_default_is_continental() {
        let v = Viewport::default();
        assert!((v.latitude - 39.0).abs() < f64::EPSILON);
        assert!((v.longitude + 98.0).abs() < f64::EPSILON);
        assert!((v.zoom - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn warehouse_fallback_display() {
        assert_eq!(WarehouseFallback::Drop.to_string(), "drop");
        assert_eq!(WarehouseFallback::Centroid.to_string(), "centroid");
    }
}
