use std::io::Cursor;

use base64::{prelude::BASE64_STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use serde_json::{json, Value};

use crate::domain::classes::color_for;
use crate::domain::detection::Detection;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::stats::LabelTable;

const TITLE_COLOR: &str = "#3499FF";
const BAR_COLOR: &str = "#4169E1";
const HIGHLIGHT_COLOR: &str = "#E6E6FA";
const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Codifica la imagen como data-URI PNG para usarla de fondo de la figura.
pub fn image_to_data_uri(image: &DynamicImage) -> DomainResult<String> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| DomainError::OperationFailed(format!("codificando PNG: {e}")))?;
    Ok(format!("data:img/png;base64, {}", BASE64_STANDARD.encode(buf)))
}

/// Figura de la imagen anotada: el fondo es la propia imagen a resolución
/// nativa con los ejes ocultos y la relación de aspecto bloqueada 1:1; cada
/// detección añade un polígono cerrado translúcido con color de su clase.
/// La leyenda muestra cada etiqueta una sola vez (primera aparición).
pub fn image_figure(width: u32, height: u32, data_uri: &str, detections: &[Detection]) -> Value {
    let w = width as f64;
    let h = height as f64;

    // Traza auxiliar invisible para que el autoajuste de Plotly funcione.
    let mut traces = vec![json!({
        "type": "scatter",
        "x": [w * 0.05, w * 0.95],
        "y": [h * 0.95, h * 0.05],
        "mode": "markers",
        "marker": { "opacity": 0 },
        "hoverinfo": "none",
        "legendgroup": "Imagen",
        "showlegend": false,
    })];

    let mut seen_labels: Vec<&str> = Vec::new();
    for det in detections {
        let first_occurrence = !seen_labels.contains(&det.label.as_str());
        if first_occurrence {
            seen_labels.push(det.label.as_str());
        }

        traces.push(json!({
            "type": "scatter",
            "x": [det.x1, det.x2, det.x2, det.x1, det.x1],
            "y": [det.y1, det.y1, det.y2, det.y2, det.y1],
            "mode": "lines",
            "fill": "toself",
            "opacity": 0.7,
            "marker": { "color": color_for(det.class_id) },
            "hoveron": "fills",
            "hoverlabel": { "namelength": 0 },
            "name": det.label,
            "legendgroup": det.label,
            "showlegend": first_occurrence,
            "text": format!("clase={}<br>confianza={:.3}", det.label, det.score),
        }));
    }

    json!({
        "data": traces,
        "layout": {
            "images": [{
                "source": data_uri,
                "sizing": "stretch",
                "opacity": 1,
                "layer": "below",
                "x": 0, "y": 0,
                "xref": "x", "yref": "y",
                "sizex": w, "sizey": h,
            }],
            "xaxis": { "showgrid": false, "visible": false, "constrain": "domain", "range": [0.0, w] },
            "yaxis": { "showgrid": false, "visible": false, "scaleanchor": "x", "scaleratio": 1, "range": [h, 0.0] },
            "plot_bgcolor": TRANSPARENT,
            "margin": { "l": 50, "r": 0, "b": 0 },
            "showlegend": true,
            "title": { "text": "Imagen con cajas de detección", "font": { "color": TITLE_COLOR } },
        },
    })
}

/// Figura vacía con solo un título de error; ninguna excepción pasa de aquí.
pub fn error_figure() -> Value {
    json!({
        "data": [],
        "layout": {
            "title": { "text": "URL incorrecta", "font": { "color": TITLE_COLOR } },
        },
    })
}

/// Barras verticales de recuento por etiqueta; la barra del máximo va en
/// color destacado.
pub fn count_figure(table: &LabelTable) -> Value {
    let labels: Vec<&str> = table.entries.iter().map(|(l, _)| l.as_str()).collect();
    let counts: Vec<i64> = table.entries.iter().map(|(_, v)| *v as i64).collect();
    let text: Vec<String> = counts.iter().map(|c| c.to_string()).collect();

    json!({
        "data": [{
            "type": "bar",
            "x": labels,
            "y": counts,
            "text": text,
            "textposition": "auto",
            "marker": { "color": bar_colors(table) },
        }],
        "layout": {
            "plot_bgcolor": TRANSPARENT,
            "margin": { "l": 50, "r": 0, "b": 50, "t": 50 },
            "yaxis": { "showgrid": false, "visible": false, "scaleanchor": "x", "scaleratio": 1 },
            "title": { "text": "Recuento de objetos", "font": { "color": TITLE_COLOR } },
        },
    })
}

/// Barras horizontales de confianza media por etiqueta; se destaca el mínimo.
pub fn confidence_figure(table: &LabelTable) -> Value {
    let labels: Vec<&str> = table.entries.iter().map(|(l, _)| l.as_str()).collect();
    let means: Vec<f64> = table.entries.iter().map(|(_, v)| *v).collect();
    let text: Vec<String> = means.iter().map(|m| format!("{m:.3}")).collect();

    json!({
        "data": [{
            "type": "bar",
            "orientation": "h",
            "x": means,
            "y": labels,
            "text": text,
            "textposition": "auto",
            "marker": { "color": bar_colors(table) },
        }],
        "layout": {
            "plot_bgcolor": TRANSPARENT,
            "xaxis": { "showgrid": false, "visible": false, "scaleanchor": "y", "scaleratio": 1 },
            "title": { "text": "Confianza media", "font": { "color": TITLE_COLOR } },
        },
    })
}

fn bar_colors(table: &LabelTable) -> Vec<&'static str> {
    let mut colors = vec![BAR_COLOR; table.entries.len()];
    if let Some(i) = table.highlight {
        colors[i] = HIGHLIGHT_COLOR;
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stats::{counts_by_label, mean_confidence_by_label};

    fn detection(label: &str, class_id: usize, score: f32) -> Detection {
        Detection {
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 10.0,
            score,
            class_id,
            label: label.to_string(),
        }
    }

    #[test]
    fn legend_shows_each_label_once() {
        let dets = vec![
            detection("perro", 18, 0.9),
            detection("perro", 18, 0.8),
            detection("gato", 17, 0.7),
        ];
        let fig = image_figure(640, 480, "data:img/png;base64, x", &dets);
        let traces = fig["data"].as_array().unwrap();

        // Traza auxiliar + una por detección.
        assert_eq!(traces.len(), 4);
        let legend_count = traces[1..]
            .iter()
            .filter(|t| t["showlegend"] == json!(true))
            .count();
        assert_eq!(legend_count, 2);
    }

    #[test]
    fn bbox_trace_is_a_closed_polygon() {
        let dets = vec![detection("perro", 18, 0.9)];
        let fig = image_figure(100, 100, "", &dets);
        let xs = fig["data"][1]["x"].as_array().unwrap();
        assert_eq!(xs.len(), 5);
        assert_eq!(xs[0], xs[4]);
    }

    #[test]
    fn image_layout_locks_aspect_and_hides_axes() {
        let fig = image_figure(320, 200, "", &[]);
        let layout = &fig["layout"];
        assert_eq!(layout["yaxis"]["scaleanchor"], json!("x"));
        assert_eq!(layout["xaxis"]["visible"], json!(false));
        assert_eq!(layout["yaxis"]["range"], json!([200.0, 0.0]));
    }

    #[test]
    fn hover_text_shows_three_decimals() {
        let dets = vec![detection("perro", 18, 0.87654)];
        let fig = image_figure(100, 100, "", &dets);
        assert_eq!(
            fig["data"][1]["text"],
            json!("clase=perro<br>confianza=0.877")
        );
    }

    #[test]
    fn error_figure_carries_only_a_title() {
        let fig = error_figure();
        assert_eq!(fig["data"], json!([]));
        assert_eq!(fig["layout"]["title"]["text"], json!("URL incorrecta"));
    }

    #[test]
    fn empty_tables_render_zero_bars() {
        let table = counts_by_label(&[]);
        let fig = count_figure(&table);
        assert_eq!(fig["data"][0]["x"], json!([]));

        let table = mean_confidence_by_label(&[], &[]);
        let fig = confidence_figure(&table);
        assert_eq!(fig["data"][0]["y"], json!([]));
    }

    #[test]
    fn bar_value_axes_anchor_to_the_category_axis() {
        let labels: Vec<String> = ["perro"].iter().map(|s| s.to_string()).collect();
        let counts = count_figure(&counts_by_label(&labels));
        assert_eq!(counts["layout"]["yaxis"]["scaleanchor"], json!("x"));

        let means = confidence_figure(&mean_confidence_by_label(&labels, &[0.9]));
        assert_eq!(means["layout"]["xaxis"]["scaleanchor"], json!("y"));
    }

    #[test]
    fn highlighted_bar_uses_distinct_color() {
        let labels: Vec<String> = ["perro", "gato", "perro"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let fig = count_figure(&counts_by_label(&labels));
        let colors = fig["data"][0]["marker"]["color"].as_array().unwrap();
        assert_eq!(colors[0], json!(HIGHLIGHT_COLOR));
        assert_eq!(colors[1], json!(BAR_COLOR));
    }

    #[test]
    fn data_uri_roundtrip_prefix() {
        let img = DynamicImage::new_rgb8(4, 4);
        let uri = image_to_data_uri(&img).unwrap();
        assert!(uri.starts_with("data:img/png;base64, "));
    }
}
