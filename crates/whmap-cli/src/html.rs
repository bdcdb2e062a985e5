//! Standalone HTML export drawn with deck.gl.

use whmap_network::{LayerRef, NetworkRender};

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Customer to Warehouse Network</title>
<script src="https://unpkg.com/deck.gl@8.9.35/dist.min.js"></script>
<script src="https://api.mapbox.com/mapbox-gl-js/v1.13.3/mapbox-gl.js"></script>
<link href="https://api.mapbox.com/mapbox-gl-js/v1.13.3/mapbox-gl.css" rel="stylesheet">
<style>
html, body, #map { margin: 0; width: 100%; height: 100%; }
#summary { position: absolute; top: 12px; left: 12px; padding: 6px 10px; background: rgba(255,255,255,0.85); font: 14px sans-serif; border-radius: 4px; }
</style>
</head>
<body>
<div id="map"></div>
<div id="summary">__SUMMARY__</div>
<script>
const scene = __SCENE__;
const token = __TOKEN__;
if (token) { mapboxgl.accessToken = token; }
const L = scene.layers;
new deck.DeckGL({
  container: 'map',
  map: mapboxgl,
  mapStyle: scene.basemap.style,
  initialViewState: {
    latitude: scene.viewport.latitude,
    longitude: scene.viewport.longitude,
    zoom: scene.viewport.zoom
  },
  controller: true,
  layers: [
__LAYERS__
  ]
});
</script>
</body>
</html>
"#;

fn layer_js(layer: LayerRef<'_>) -> String {
    match layer {
        LayerRef::Edges(edges) => format!(
            "    new deck.LineLayer({{id: '{id}', data: L.edges.segments, \
             getSourcePosition: d => d.source, getTargetPosition: d => d.target, \
             getColor: d => d.color, getWidth: L.edges.width}})",
            id = edges.id
        ),
        LayerRef::Points(points) => format!(
            "    new deck.ScatterplotLayer({{id: '{id}', data: L.{id}.points, \
             getPosition: d => d.position, getFillColor: d => d.color, \
             getRadius: L.{id}.radius, opacity: L.{id}.opacity, pickable: true}})",
            id = points.id
        ),
    }
}

/// Renders a self-contained page for `render`.
///
/// The credential is only embedded when the scene's basemap needs it.
///
/// # Errors
///
/// Returns an error if the scene cannot be serialized.
pub(crate) fn render_page(
    render: &NetworkRender,
    mapbox_token: Option<&str>,
) -> anyhow::Result<String> {
    let scene = script_safe(&serde_json::to_string(&render.scene)?);
    let token = mapbox_token.filter(|_| render.scene.basemap.requires_credential);
    let token = script_safe(&serde_json::to_string(&token)?);

    let layers = render
        .scene
        .layers
        .draw_order()
        .into_iter()
        .map(layer_js)
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(PAGE_TEMPLATE
        .replace("__SUMMARY__", &render.summary.to_string())
        .replace("__SCENE__", &scene)
        .replace("__TOKEN__", &token)
        .replace("__LAYERS__", &layers))
}

/// Keeps embedded JSON from closing the surrounding `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use whmap_core::CoordinatePair;
    use whmap_network::{CoordinateRow, NetworkConfig, NetworkPipeline};

    use super::*;

    fn sample_render(has_credential: bool) -> NetworkRender {
        let pipeline = NetworkPipeline::new(NetworkConfig {
            has_credential,
            ..NetworkConfig::default()
        });
        pipeline
            .render_rows(
                &[CoordinateRow {
                    customer: CoordinatePair::new(-75.0, 40.0),
                    warehouse: CoordinatePair::new(-76.0, 41.0),
                }],
                None,
            )
            .expect("render")
    }

    #[test]
    fn layers_are_emitted_in_draw_order() {
        let page = render_page(&sample_render(false), None).unwrap();
        let edges = page.find("id: 'edges'").expect("edges layer");
        let customers = page.find("id: 'customers'").expect("customers layer");
        let facilities = page.find("id: 'facilities'").expect("facilities layer");
        assert!(edges < customers && customers < facilities);
    }

    #[test]
    fn token_omitted_for_free_basemap() {
        let page = render_page(&sample_render(false), Some("pk.secret")).unwrap();
        assert!(!page.contains("pk.secret"));
        assert!(page.contains("const token = null;"));
    }

    #[test]
    fn token_embedded_for_credentialed_basemap() {
        let page = render_page(&sample_render(true), Some("pk.secret")).unwrap();
        assert!(page.contains("const token = \"pk.secret\";"));
        assert!(page.contains("mapbox://styles/mapbox/light-v10"));
    }

    #[test]
    fn summary_is_shown() {
        let page = render_page(&sample_render(false), None).unwrap();
        assert!(page.contains("Displayed 1 customer points across 1 warehouse locations"));
    }

    #[test]
    fn script_safe_escapes_closing_tags() {
        assert_eq!(script_safe(r#"{"a":"</script>"}"#), r#"{"a":"<\/script>"}"#);
    }
}
