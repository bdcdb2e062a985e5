//! Full CSV → scene runs through the public API.

use whmap_core::{CoordinatePair, Rgb, WarehouseFallback};
use whmap_network::{
    BasemapProvider, ColorOverride, ColorPalette, NetworkConfig, NetworkError, NetworkPipeline,
};

const THREE_ROWS: &str = "40.0,-75.0,41.0,-76.0\n40.1,-75.1,41.0,-76.0\n42.0,-77.0,43.0,-78.0\n";

#[test]
fn three_rows_yield_two_facilities_and_three_edges() {
    let pipeline = NetworkPipeline::new(NetworkConfig::default());
    let render = pipeline.render_csv(THREE_ROWS.as_bytes(), None).unwrap();
    let layers = &render.scene.layers;

    let facilities: Vec<(usize, [f64; 2])> = layers
        .facilities
        .points
        .iter()
        .map(|p| (p.facility, p.position))
        .collect();
    assert_eq!(facilities, vec![(0, [-76.0, 41.0]), (1, [-78.0, 43.0])]);

    let assigned: Vec<usize> = layers.customers.points.iter().map(|p| p.facility).collect();
    assert_eq!(assigned, vec![0, 0, 1]);

    assert_eq!(layers.edges.segments.len(), 3);
    assert_eq!(layers.edges.segments[0].target, layers.edges.segments[1].target);
    assert_eq!(layers.edges.segments[2].target, [-78.0, 43.0]);
    assert_eq!(layers.edges.segments[1].source, [-75.1, 40.1]);

    assert_eq!(render.summary.customer_count, 3);
    assert_eq!(render.summary.facility_count, 2);
    assert_eq!(render.summary.skipped_rows, 0);
}

#[test]
fn reordered_rows_change_indices_but_not_edge_geometry() {
    let reordered = "42.0,-77.0,43.0,-78.0\n40.0,-75.0,41.0,-76.0\n40.1,-75.1,41.0,-76.0\n";
    let pipeline = NetworkPipeline::new(NetworkConfig::default());
    let render = pipeline.render_csv(reordered.as_bytes(), None).unwrap();
    let layers = &render.scene.layers;

    assert_eq!(layers.facilities.points[0].position, [-78.0, 43.0]);
    for segment in &layers.edges.segments {
        assert_eq!(layers.facilities.points[segment.facility].position, segment.target);
    }
}

#[test]
fn identical_input_gives_identical_default_colors() {
    let pipeline = NetworkPipeline::new(NetworkConfig::default());
    let first = pipeline.render_csv(THREE_ROWS.as_bytes(), None).unwrap();
    let second = pipeline.render_csv(THREE_ROWS.as_bytes(), None).unwrap();
    assert_eq!(first, second);

    let palette = ColorPalette::tableau10();
    assert_eq!(
        first.scene.layers.facility_colors,
        vec![palette.color_at(0), palette.color_at(1)]
    );
}

#[test]
fn color_overrides_flow_into_points_and_edges() {
    let pipeline = NetworkPipeline::new(NetworkConfig::default());
    let overrides = vec![ColorOverride::Hex("#000000".to_string())];
    let render = pipeline.render_csv(THREE_ROWS.as_bytes(), Some(&overrides)).unwrap();
    let layers = &render.scene.layers;

    assert_eq!(layers.facilities.points[0].color, Rgb::new(0, 0, 0));
    assert_eq!(layers.edges.segments[0].color, [0, 0, 0, 120]);
    assert_eq!(layers.facilities.points[1].color, ColorPalette::tableau10().color_at(1));
}

#[test]
fn header_and_bad_rows_are_counted_not_rendered() {
    let input = format!("cust_lat,cust_lon,wh_lat,wh_lon\n{THREE_ROWS}oops,1,2,3\n");
    let render = NetworkPipeline::new(NetworkConfig::default())
        .render_csv(input.as_bytes(), None)
        .unwrap();
    assert_eq!(render.summary.customer_count, 3);
    assert_eq!(render.summary.skipped_rows, 2);
}

#[test]
fn out_of_range_warehouses_never_share_a_facility() {
    let input = "40,-75,41,1e20\n42,-77,41,2e20\n44,-79,45,-80\n";
    let render = NetworkPipeline::new(NetworkConfig::default())
        .render_csv(input.as_bytes(), None)
        .unwrap();
    assert_eq!(render.summary.facility_count, 1);
    assert_eq!(render.summary.customer_count, 1);
    assert_eq!(render.summary.skipped_rows, 2);
    assert_eq!(render.scene.layers.edges.segments[0].target, [-80.0, 45.0]);

    let err = NetworkPipeline::new(NetworkConfig::default())
        .render_csv("40,-75,41,1e20\n42,-77,41,2e20\n".as_bytes(), None)
        .unwrap_err();
    assert!(matches!(err, NetworkError::MalformedInput { .. }));
}

#[test]
fn malformed_csv_halts_before_rendering() {
    let err = NetworkPipeline::new(NetworkConfig::default())
        .render_csv("1,2\n3,4\n".as_bytes(), None)
        .unwrap_err();
    assert!(matches!(err, NetworkError::MalformedInput { .. }));
}

#[test]
fn centroid_policy_renders_customer_only_rows() {
    let pipeline = NetworkPipeline::new(NetworkConfig {
        warehouse_fallback: WarehouseFallback::Centroid,
        ..NetworkConfig::default()
    });
    let render = pipeline.render_csv("10.0,20.0\n30.0,40.0\n".as_bytes(), None).unwrap();
    assert_eq!(render.summary.facility_count, 1);
    assert_eq!(
        render.scene.layers.facilities.points[0].position,
        CoordinatePair::new(30.0, 20.0).position()
    );
}

#[test]
fn scene_json_has_renderer_shapes() {
    let render = NetworkPipeline::new(NetworkConfig::default())
        .render_csv(THREE_ROWS.as_bytes(), None)
        .unwrap();
    assert_eq!(render.scene.basemap.provider, BasemapProvider::Carto);

    let json = serde_json::to_value(&render).unwrap();
    assert_eq!(json["scene"]["viewport"]["zoom"], 3.5);
    assert_eq!(json["scene"]["basemap"]["provider"], "carto");
    assert_eq!(
        json["scene"]["layers"]["edges"]["segments"][2]["target"],
        serde_json::json!([-78.0, 43.0])
    );
    assert_eq!(json["summary"]["facility_count"], 2);
}
