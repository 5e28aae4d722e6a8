use geo_types::{LineString, Point};
use quakemap_data::{Earthquake, PlateBoundary};
use quakemap_map::html::render_html;
use quakemap_map::load::{add_earthquake_overlay, add_layer_toggle, add_legend, add_plate_overlay};
use quakemap_map::popup::PopupRenderer;
use quakemap_map::{MapConfig, MapSurface, QuakeMapError};

fn sample_surface() -> Result<MapSurface, QuakeMapError> {
    let config = MapConfig::default();
    let mut surface = MapSurface::from_config(&config)?;
    add_legend(&mut surface, &config);

    let quakes = vec![Earthquake {
        id: "us7000q001".to_string(),
        position: Point::new(178.4321, -25.1187),
        depth: 587.4,
        magnitude: 4.7,
        title: "M 4.7 - south of the <Fiji> Islands".to_string(),
        place: "south of the Fiji Islands".to_string(),
    }];
    add_earthquake_overlay(
        &mut surface,
        "Earthquakes",
        &quakes,
        &config.styler()?,
        &PopupRenderer::try_new()?,
    )?;

    let boundaries = vec![PlateBoundary {
        name: "AF-AN".to_string(),
        line: LineString::from(vec![(-0.4379, -54.8518), (-0.0381, -54.6723)]),
    }];
    add_plate_overlay(&mut surface, "Tectonic Plates", boundaries, config.boundary_style)?;

    add_layer_toggle(&mut surface, &config);
    Ok(surface)
}

/// The JSON literal assigned to `page` inside the script element
fn page_json(html: &str) -> serde_json::Value {
    let start = html.find("const page = ").unwrap() + "const page = ".len();
    let end = start + html[start..].find(";\n").unwrap();
    serde_json::from_str(&html[start..end]).unwrap()
}

#[test]
fn test_page_embeds_map_data() -> Result<(), QuakeMapError> {
    let html = render_html(&sample_surface()?)?;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Earthquakes of the Past Week</title>"));

    let page = page_json(&html);
    assert_eq!(page["view"]["center"], serde_json::json!([44.977753, -93.265015]));
    assert_eq!(page["view"]["zoom"], 4);
    assert_eq!(page["view"]["defaultBaseLayer"], "Topography");
    assert_eq!(page["baseLayers"].as_array().unwrap().len(), 2);
    assert_eq!(page["baseLayers"][0]["name"], "Street");

    let quakes = &page["overlays"][0];
    assert_eq!(quakes["kind"], "points");
    assert_eq!(quakes["name"], "Earthquakes");
    let marker = &quakes["markers"][0];
    assert_eq!(marker["latlng"], serde_json::json!([-25.1187, 178.4321]));
    assert_eq!(marker["style"]["fillColor"], "#8B0000");
    assert_eq!(marker["style"]["color"], "#000000");
    assert_eq!(marker["style"]["fillOpacity"], 0.8);

    let plates = &page["overlays"][1];
    assert_eq!(plates["kind"], "lines");
    assert_eq!(plates["style"]["color"], "#FFA500");
    assert_eq!(plates["lines"][0][0], serde_json::json!([-54.8518, -0.4379]));

    let controls = page["controls"].as_array().unwrap();
    assert_eq!(controls.len(), 2);
    assert_eq!(controls[0]["kind"], "legend");
    assert_eq!(controls[0]["position"], "bottomright");
    assert!(controls[0]["html"]
        .as_str()
        .unwrap()
        .contains("background:#FFFF00"));
    assert_eq!(controls[1]["kind"], "layerToggle");
    assert_eq!(controls[1]["position"], "topright");
    assert_eq!(controls[1]["collapsed"], true);
    Ok(())
}

#[test]
fn test_popup_markup_cannot_close_script() -> Result<(), QuakeMapError> {
    let html = render_html(&sample_surface()?)?;
    let script_start = html.find("<script>\n").unwrap();
    let script_end = html.rfind("</script>").unwrap();
    let script = &html[script_start..script_end];
    assert!(!script.contains("</"));

    // The escaped form still decodes to the original popup
    let page = page_json(&html);
    let popup = page["overlays"][0]["markers"][0]["popup"].as_str().unwrap();
    assert!(popup.starts_with("<h3>M 4.7 - south of the &lt;Fiji&gt; Islands</h3><hr>"));
    Ok(())
}

#[test]
fn test_empty_surface_renders() -> Result<(), QuakeMapError> {
    let surface = MapSurface::from_config(&MapConfig::default())?;
    let page = page_json(&render_html(&surface)?);
    assert_eq!(page["overlays"], serde_json::json!([]));
    assert_eq!(page["controls"], serde_json::json!([]));
    Ok(())
}
