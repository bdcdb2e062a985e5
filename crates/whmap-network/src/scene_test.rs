use whmap_core::CoordinatePair;

use super::*;
use crate::assign::resolve;
use crate::registry::WarehouseRegistry;

fn pair(lon: f64, lat: f64) -> CoordinatePair {
    CoordinatePair::new(lon, lat)
}

fn three_facilities() -> WarehouseRegistry {
    WarehouseRegistry::build(vec![pair(-76.0, 41.0), pair(-78.0, 43.0), pair(-80.0, 35.0)])
}

// -----------------------------------------------------------------------
// resolve_colors
// -----------------------------------------------------------------------

#[test]
fn colors_default_to_palette_order() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let builder = NetworkSceneBuilder::new(&palette, &style);

    let colors = builder.resolve_colors(12, None);
    assert_eq!(colors.len(), 12);
    for (i, c) in colors.iter().enumerate() {
        assert_eq!(*c, palette.color_at(i));
    }
}

#[test]
fn short_override_list_is_padded_from_first_unfilled_index() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let builder = NetworkSceneBuilder::new(&palette, &style);

    let overrides = vec![ColorOverride::Hex("#010203".to_string())];
    let colors = builder.resolve_colors(3, Some(&overrides));
    assert_eq!(
        colors,
        vec![Rgb::new(1, 2, 3), palette.color_at(1), palette.color_at(2)]
    );
}

#[test]
fn malformed_override_falls_back_for_that_index_only() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let builder = NetworkSceneBuilder::new(&palette, &style);

    let overrides = vec![
        ColorOverride::Hex("#ff0000".to_string()),
        ColorOverride::Hex("not-a-color".to_string()),
        ColorOverride::Rgb([0, 0, 255]),
    ];
    let colors = builder.resolve_colors(3, Some(&overrides));
    assert_eq!(
        colors,
        vec![Rgb::new(255, 0, 0), palette.color_at(1), Rgb::new(0, 0, 255)]
    );
}

#[test]
fn surplus_overrides_are_ignored() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let builder = NetworkSceneBuilder::new(&palette, &style);

    let overrides = vec![
        ColorOverride::Hex("#ff0000".to_string()),
        ColorOverride::Hex("#00ff00".to_string()),
    ];
    assert_eq!(builder.resolve_colors(1, Some(&overrides)), vec![Rgb::new(255, 0, 0)]);
}

// -----------------------------------------------------------------------
// build
// -----------------------------------------------------------------------

#[test]
fn build_produces_one_entry_per_facility_and_customer() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let registry = three_facilities();
    let warehouses = vec![pair(-76.0, 41.0), pair(-80.0, 35.0), pair(-76.0, 41.0), pair(-78.0, 43.0)];
    let customers = vec![pair(-75.0, 40.0), pair(-81.0, 34.0), pair(-75.5, 40.5), pair(-77.0, 44.0)];
    let records = resolve(&customers, &warehouses, &registry).unwrap();

    let layers = NetworkSceneBuilder::new(&palette, &style)
        .build(registry.facilities(), &records, None)
        .unwrap();

    assert_eq!(layers.facilities.points.len(), 3);
    assert_eq!(layers.customers.points.len(), 4);
    assert_eq!(layers.edges.segments.len(), 4);
    assert_eq!(layers.facility_colors.len(), 3);
}

#[test]
fn edge_targets_match_assigned_facility_exactly() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let warehouses = vec![
        pair(-76.000_000_1, 41.0),
        pair(-78.0, 43.0),
        pair(-76.000_000_3, 41.000_000_2),
        pair(-80.0, 35.0),
        pair(-78.0, 43.0),
    ];
    let customers: Vec<CoordinatePair> =
        (0..5).map(|i| pair(-70.0 - f64::from(i), 40.0)).collect();
    let registry = WarehouseRegistry::build(warehouses.iter().copied());
    let records = resolve(&customers, &warehouses, &registry).unwrap();

    let layers = NetworkSceneBuilder::new(&palette, &style)
        .build(registry.facilities(), &records, None)
        .unwrap();

    for (record, segment) in records.iter().zip(&layers.edges.segments) {
        let facility = registry.facilities()[record.facility_index];
        assert_eq!(segment.target, facility.coordinate.position());
        assert_eq!(segment.source, record.coordinate.position());
        assert_eq!(segment.facility, record.facility_index);
        assert_eq!(
            layers.facilities.points[record.facility_index].position,
            segment.target
        );
    }
    // The noisy duplicate lands on the first-seen coordinate.
    assert_eq!(layers.edges.segments[2].target, [-76.000_000_1, 41.0]);
}

#[test]
fn edges_use_facility_color_with_reduced_alpha() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let registry = three_facilities();
    let warehouses = vec![pair(-78.0, 43.0)];
    let records = resolve(&[pair(-77.0, 42.0)], &warehouses, &registry).unwrap();

    let overrides = vec![ColorOverride::Hex("#aabbcc".to_string())];
    let layers = NetworkSceneBuilder::new(&palette, &style)
        .build(registry.facilities(), &records, Some(&overrides))
        .unwrap();

    let expected = palette.color_at(1);
    assert_eq!(layers.edges.segments[0].color, expected.with_alpha(120));
    assert_eq!(layers.facilities.points[0].color, Rgb::new(0xaa, 0xbb, 0xcc));
    assert_eq!(layers.facilities.points[1].color, expected);
}

#[test]
fn customer_points_share_a_color_outside_the_palette() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let registry = three_facilities();
    let warehouses = vec![pair(-76.0, 41.0), pair(-78.0, 43.0)];
    let records = resolve(&[pair(-75.0, 40.0), pair(-77.0, 42.0)], &warehouses, &registry).unwrap();

    let layers = NetworkSceneBuilder::new(&palette, &style)
        .build(registry.facilities(), &records, None)
        .unwrap();

    for point in &layers.customers.points {
        assert_eq!(point.color, style.customer_color);
        assert!(!layers.facility_colors.contains(&point.color));
    }
}

#[test]
fn facilities_are_larger_and_drawn_last() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let layers = NetworkSceneBuilder::new(&palette, &style)
        .build(three_facilities().facilities(), &[], None)
        .unwrap();

    assert!(layers.facilities.radius > layers.customers.radius);
    let order = layers.draw_order();
    assert!(matches!(order[0], LayerRef::Edges(_)));
    assert!(matches!(order[2], LayerRef::Points(p) if p.id == "facilities"));
}

#[test]
fn out_of_range_record_is_rejected() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let registry = three_facilities();
    let records = vec![CustomerRecord {
        coordinate: pair(0.0, 0.0),
        facility_index: 3,
    }];

    let err = NetworkSceneBuilder::new(&palette, &style)
        .build(registry.facilities(), &records, None)
        .unwrap_err();
    assert!(matches!(
        err,
        NetworkError::FacilityIndexOutOfRange {
            index: 3,
            facility_count: 3
        }
    ));
}

#[test]
fn layers_serialize_positions_and_rgba() {
    let palette = ColorPalette::tableau10();
    let style = LayerStyle::default();
    let registry = three_facilities();
    let records = resolve(&[pair(-75.0, 40.0)], &[pair(-76.0, 41.0)], &registry).unwrap();
    let layers = NetworkSceneBuilder::new(&palette, &style)
        .build(registry.facilities(), &records, None)
        .unwrap();

    let json = serde_json::to_value(&layers).unwrap();
    assert_eq!(json["facilities"]["points"][0]["position"], serde_json::json!([-76.0, 41.0]));
    assert_eq!(json["facilities"]["points"][0]["color"], serde_json::json!([31, 119, 180]));
    assert_eq!(
        json["edges"]["segments"][0]["color"],
        serde_json::json!([31, 119, 180, 120])
    );
}
