use serde::{Deserialize, Serialize};

/// Parámetros completos de una petición de detección; llegan frescos con
/// cada interacción, no se conserva historial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestParams {
    pub url: String,
    /// Umbral de confianza en [0, 1].
    pub confidence_threshold: f32,
    /// Umbral de IoU en [0, 1]; solo tiene efecto con NMS habilitado.
    pub iou_threshold: f32,
    pub nms_enabled: bool,
}

/// Cuerpo de POST /api/run: parámetros más el control que disparó el evento.
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    pub url: String,
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    pub nms_enabled: bool,
    /// "run" | "url-submit" | "confidence" | "iou" | "nms"
    #[serde(default)]
    pub trigger: Option<String>,
}

impl From<RunRequest> for RequestParams {
    fn from(r: RunRequest) -> Self {
        RequestParams {
            url: r.url,
            confidence_threshold: r.confidence_threshold,
            iou_threshold: r.iou_threshold,
            nms_enabled: r.nms_enabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomUrlResponse {
    pub url: String,
    pub clicks: u64,
}

/// Resultado renderizado de una petición: tres figuras Plotly completas
/// (datos + layout) y el estado del control de IoU. Sustituye por completo
/// al resultado anterior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedResult {
    pub image_figure: serde_json::Value,
    pub count_figure: serde_json::Value,
    pub confidence_figure: serde_json::Value,
    pub iou_control_enabled: bool,
}
