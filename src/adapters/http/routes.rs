use axum::{extract::{Query, State}, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::adapters::http::state::HttpState;
use crate::application::dto::{RandomUrlResponse, RequestParams, RunRequest};
use crate::application::services::{DashboardEvent, DashboardService, RANDOM_URLS};

#[derive(Deserialize)]
pub struct RandomQuery {
    clicks: Option<u64>,
}

/// Valores por defecto de los controles del dashboard.
pub async fn get_config() -> impl IntoResponse {
    Json(json!({
        "confidence_threshold": 0.7,
        "iou_threshold": 0.5,
        "nms_enabled": false,
        "slider_step": 0.05,
        "random_urls": RANDOM_URLS.len(),
    }))
}

/// URL candidata para el clic n-ésimo del botón aleatorio (cíclica, sin
/// detección: el frontend sintetiza con ella el evento de ejecución).
pub async fn random_url(Query(query): Query<RandomQuery>) -> impl IntoResponse {
    let clicks = query.clicks.unwrap_or(0);
    Json(RandomUrlResponse {
        url: DashboardService::next_random_url(clicks).to_string(),
        clicks,
    })
}

/// Ejecuta la secuencia completa de detección y devuelve las tres figuras
/// más el estado del control de IoU.
pub async fn run(State(st): State<HttpState>, Json(req): Json<RunRequest>) -> impl IntoResponse {
    let trigger = req.trigger.clone().unwrap_or_else(|| "run".into());
    let params: RequestParams = req.into();

    let event = match trigger.as_str() {
        "url-submit" => DashboardEvent::UrlSubmitted(params),
        "confidence" => DashboardEvent::ConfidenceChanged(params),
        "iou" => DashboardEvent::IouChanged(params),
        "nms" => DashboardEvent::NmsToggled(params),
        _ => DashboardEvent::RunClicked(params),
    };

    match st.dashboard.handle(event).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
