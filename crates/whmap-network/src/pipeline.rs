//! Top-level operations: table in, scene out.
//!
//! Each call builds its own registry and scene. The only state that outlives
//! a call is the read-only [`NetworkConfig`].

use std::io::Read;

use serde::Serialize;
use whmap_core::{AppConfig, CoordinatePair, Viewport, WarehouseFallback};

use crate::assign::{resolve, validate_indices, CustomerRecord};
use crate::basemap::BasemapSelector;
use crate::error::NetworkError;
use crate::ingest::{read_coordinate_rows, CoordinateRow, ResolvedStore};
use crate::palette::{ColorOverride, ColorPalette};
use crate::registry::WarehouseRegistry;
use crate::scene::{LayerStyle, NetworkSceneBuilder, Scene};

/// Immutable render settings, created once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub palette: ColorPalette,
    pub style: LayerStyle,
    pub basemap: BasemapSelector,
    pub has_credential: bool,
    pub viewport: Viewport,
    pub warehouse_fallback: WarehouseFallback,
}

impl NetworkConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            has_credential: config.has_map_credential(),
            warehouse_fallback: config.warehouse_fallback,
            ..Self::default()
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            palette: ColorPalette::tableau10(),
            style: LayerStyle::default(),
            basemap: BasemapSelector::default(),
            has_credential: false,
            viewport: Viewport::CONTINENTAL,
            warehouse_fallback: WarehouseFallback::Drop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub customer_count: usize,
    pub facility_count: usize,
    pub skipped_rows: usize,
}

impl std::fmt::Display for RenderSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Displayed {} customer points across {} warehouse locations",
            group_thousands(self.customer_count),
            group_thousands(self.facility_count)
        )?;
        match self.skipped_rows {
            0 => {}
            1 => write!(f, " (1 row skipped)")?,
            n => write!(f, " ({} rows skipped)", group_thousands(n))?,
        }
        Ok(())
    }
}

fn ensure_in_bounds<'a, I>(coordinates: I) -> Result<(), NetworkError>
where
    I: IntoIterator<Item = &'a CoordinatePair>,
{
    match coordinates.into_iter().find(|c| !c.is_valid()) {
        Some(c) => Err(NetworkError::malformed(format!(
            "coordinate ({}, {}) is outside WGS84 bounds",
            c.longitude, c.latitude
        ))),
        None => Ok(()),
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRender {
    pub scene: Scene,
    pub summary: RenderSummary,
}

#[derive(Debug, Clone)]
pub struct NetworkPipeline {
    config: NetworkConfig,
}

impl NetworkPipeline {
    #[must_use]
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Ingests a four-column CSV and renders it.
    ///
    /// # Errors
    ///
    /// Propagates ingestion errors; see [`read_coordinate_rows`].
    pub fn render_csv<R: Read>(
        &self,
        reader: R,
        colors: Option<&[ColorOverride]>,
    ) -> Result<NetworkRender, NetworkError> {
        let report = read_coordinate_rows(reader, self.config.warehouse_fallback)?;
        let mut render = self.render_rows(&report.rows, colors)?;
        render.summary.skipped_rows = report.skipped;
        Ok(render)
    }

    /// Deduplicates warehouses, assigns customers, and builds the scene.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::MalformedInput`] for an empty row set or a
    /// coordinate outside WGS84 bounds.
    pub fn render_rows(
        &self,
        rows: &[CoordinateRow],
        colors: Option<&[ColorOverride]>,
    ) -> Result<NetworkRender, NetworkError> {
        if rows.is_empty() {
            return Err(NetworkError::malformed("no customer rows to render"));
        }
        ensure_in_bounds(rows.iter().flat_map(|r| [&r.customer, &r.warehouse]))?;

        let warehouses: Vec<CoordinatePair> = rows.iter().map(|r| r.warehouse).collect();
        let customers: Vec<CoordinatePair> = rows.iter().map(|r| r.customer).collect();

        let registry = WarehouseRegistry::build(warehouses.iter().copied());
        let records = resolve(&customers, &warehouses, &registry)?;
        self.assemble(&registry, &records, colors)
    }

    /// Renders customers whose warehouse index was decided upstream, with
    /// `centers` used verbatim as the facility list.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::MalformedInput`] when `centers` is empty or a
    /// position is outside WGS84 bounds, and
    /// [`NetworkError::FacilityIndexOutOfRange`] for a store pointing past
    /// the last center.
    pub fn render_resolved(
        &self,
        stores: &[ResolvedStore],
        centers: &[CoordinatePair],
        colors: Option<&[ColorOverride]>,
    ) -> Result<NetworkRender, NetworkError> {
        if centers.is_empty() {
            return Err(NetworkError::malformed("no warehouse centers supplied"));
        }
        ensure_in_bounds(centers)?;
        let positions: Vec<CoordinatePair> = stores
            .iter()
            .map(|s| CoordinatePair::new(s.longitude, s.latitude))
            .collect();
        ensure_in_bounds(&positions)?;

        let registry = WarehouseRegistry::from_centers(centers);
        let records = validate_indices(
            positions.iter().zip(stores).map(|(&coordinate, s)| CustomerRecord {
                coordinate,
                facility_index: s.warehouse,
            }),
            &registry,
        )?;
        self.assemble(&registry, &records, colors)
    }

    fn assemble(
        &self,
        registry: &WarehouseRegistry,
        records: &[CustomerRecord],
        colors: Option<&[ColorOverride]>,
    ) -> Result<NetworkRender, NetworkError> {
        let layers = NetworkSceneBuilder::new(&self.config.palette, &self.config.style).build(
            registry.facilities(),
            records,
            colors,
        )?;
        let basemap = self.config.basemap.select(self.config.has_credential);

        let summary = RenderSummary {
            customer_count: records.len(),
            facility_count: registry.len(),
            skipped_rows: 0,
        };
        tracing::info!(
            customers = summary.customer_count,
            facilities = summary.facility_count,
            basemap = %basemap.provider,
            "network scene built"
        );

        Ok(NetworkRender {
            scene: Scene {
                viewport: self.config.viewport,
                basemap,
                layers,
            },
            summary,
        })
    }
}
