//! Customer → warehouse network rendering.
//!
//! Turns a table of customer/warehouse coordinate pairs into a declarative
//! map scene: deduplicated warehouse facilities, customer points, and colored
//! connection lines, over a basemap chosen by credential availability.

pub mod assign;
pub mod basemap;
pub mod error;
pub mod ingest;
pub mod palette;
pub mod pipeline;
pub mod registry;
pub mod scene;

pub use assign::{resolve, CustomerRecord};
pub use basemap::{BasemapConfig, BasemapProvider, BasemapSelector};
pub use error::NetworkError;
pub use ingest::{
    read_centers, read_coordinate_rows, read_resolved_stores, CoordinateRow, IngestReport,
    ResolvedStore,
};
pub use palette::{hex_to_rgb, parse_override_list, rgb_to_hex, ColorOverride, ColorPalette};
pub use pipeline::{NetworkConfig, NetworkPipeline, NetworkRender, RenderSummary};
pub use registry::{CoordKey, Facility, WarehouseRegistry};
pub use scene::{
    EdgeLayer, EdgeSegment, LayerRef, LayerStyle, NetworkLayers, NetworkSceneBuilder, PointLayer,
    Scene, ScenePoint,
};
