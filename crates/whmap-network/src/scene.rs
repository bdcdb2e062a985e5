//! Declarative scene construction.
//!
//! The builder turns facilities and assigned customers into three layers:
//! facility points, customer points, and customer → facility edges. Edge
//! targets are read from the same facility slice that feeds the facility
//! layer, so an edge always ends on the point drawn for its facility.

use serde::Serialize;
use whmap_core::{Rgb, Viewport};

use crate::assign::CustomerRecord;
use crate::basemap::BasemapConfig;
use crate::error::NetworkError;
use crate::palette::{ColorOverride, ColorPalette};
use crate::registry::Facility;

/// Fixed presentation parameters shared by every render.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub facility_radius_m: f64,
    pub facility_opacity: f64,
    pub customer_color: Rgb,
    pub customer_radius_m: f64,
    pub customer_opacity: f64,
    pub edge_width: f64,
    pub edge_alpha: u8,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            facility_radius_m: 35_000.0,
            facility_opacity: 0.9,
            customer_color: Rgb::new(0, 128, 255),
            customer_radius_m: 12_000.0,
            customer_opacity: 0.6,
            edge_width: 2.0,
            edge_alpha: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePoint {
    pub position: [f64; 2],
    pub color: Rgb,
    /// Facility the point belongs to (itself, for facility points).
    pub facility: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointLayer {
    pub id: &'static str,
    pub radius: f64,
    pub opacity: f64,
    pub points: Vec<ScenePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub source: [f64; 2],
    pub target: [f64; 2],
    pub color: [u8; 4],
    pub facility: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeLayer {
    pub id: &'static str,
    pub width: f64,
    pub segments: Vec<EdgeSegment>,
}

/// A layer reference in paint order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerRef<'a> {
    Points(&'a PointLayer),
    Edges(&'a EdgeLayer),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkLayers {
    pub facilities: PointLayer,
    pub customers: PointLayer,
    pub edges: EdgeLayer,
    /// Resolved color per facility index.
    pub facility_colors: Vec<Rgb>,
}

impl NetworkLayers {
    /// Edges first, facilities last so they sit on top.
    #[must_use]
    pub fn draw_order(&self) -> [LayerRef<'_>; 3] {
        [
            LayerRef::Edges(&self.edges),
            LayerRef::Points(&self.customers),
            LayerRef::Points(&self.facilities),
        ]
    }
}

/// Everything a map renderer needs. Rebuilt for every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub viewport: Viewport,
    pub basemap: BasemapConfig,
    pub layers: NetworkLayers,
}

pub struct NetworkSceneBuilder<'a> {
    palette: &'a ColorPalette,
    style: &'a LayerStyle,
}

impl<'a> NetworkSceneBuilder<'a> {
    #[must_use]
    pub fn new(palette: &'a ColorPalette, style: &'a LayerStyle) -> Self {
        Self { palette, style }
    }

    /// One color per facility index.
    ///
    /// Supplied overrides are kept in place; malformed ones fall back to the
    /// palette color for their index, and missing trailing entries are padded
    /// from the palette starting at the first unfilled index.
    #[must_use]
    pub fn resolve_colors(
        &self,
        facility_count: usize,
        overrides: Option<&[ColorOverride]>,
    ) -> Vec<Rgb> {
        let overrides = overrides.unwrap_or_default();
        (0..facility_count)
            .map(|index| match overrides.get(index).map(ColorOverride::to_rgb) {
                Some(Ok(rgb)) => rgb,
                Some(Err(e)) => {
                    tracing::warn!(index, error = %e, "rejected color override; using palette default");
                    self.palette.color_at(index)
                }
                None => self.palette.color_at(index),
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`NetworkError::FacilityIndexOutOfRange`] if a customer points
    /// past the end of `facilities`.
    pub fn build(
        &self,
        facilities: &[Facility],
        customers: &[CustomerRecord],
        overrides: Option<&[ColorOverride]>,
    ) -> Result<NetworkLayers, NetworkError> {
        let colors = self.resolve_colors(facilities.len(), overrides);

        let facility_points = facilities
            .iter()
            .zip(&colors)
            .map(|(facility, &color)| ScenePoint {
                position: facility.coordinate.position(),
                color,
                facility: facility.index,
            })
            .collect();

        let mut customer_points = Vec::with_capacity(customers.len());
        let mut segments = Vec::with_capacity(customers.len());
        for record in customers {
            let index = record.facility_index;
            let (facility, color) = facilities
                .get(index)
                .zip(colors.get(index))
                .ok_or_else(|| NetworkError::FacilityIndexOutOfRange {
                    index,
                    facility_count: facilities.len(),
                })?;

            customer_points.push(ScenePoint {
                position: record.coordinate.position(),
                color: self.style.customer_color,
                facility: index,
            });
            segments.push(EdgeSegment {
                source: record.coordinate.position(),
                target: facility.coordinate.position(),
                color: color.with_alpha(self.style.edge_alpha),
                facility: index,
            });
        }

        Ok(NetworkLayers {
            facilities: PointLayer {
                id: "facilities",
                radius: self.style.facility_radius_m,
                opacity: self.style.facility_opacity,
                points: facility_points,
            },
            customers: PointLayer {
                id: "customers",
                radius: self.style.customer_radius_m,
                opacity: self.style.customer_opacity,
                points: customer_points,
            },
            edges: EdgeLayer {
                id: "edges",
                width: self.style.edge_width,
                segments,
            },
            facility_colors: colors,
        })
    }
}

#[cfg(test)]
#[path = "scene_test.rs"]
mod tests;
