use std::sync::Arc;
use std::time::Instant;

use image::GenericImageView;
use tracing::{info, warn};

use crate::application::dto::{RenderedResult, RequestParams};
use crate::application::figures;
use crate::application::ports::{DetectorPort, ImageSourcePort};
use crate::domain::{
    detection::Detection,
    errors::{DomainError, DomainResult},
    filter::filter_candidates,
    stats::{counts_by_label, mean_confidence_by_label},
};

/// Lista fija de URLs de ejemplo (COCO val2017). Se carga una vez como
/// configuración inmutable del proceso; el botón aleatorio la recorre
/// cíclicamente por número de clics.
pub const RANDOM_URLS: &[&str] = &[
    "http://images.cocodataset.org/val2017/000000039769.jpg",
    "http://images.cocodataset.org/val2017/000000000139.jpg",
    "http://images.cocodataset.org/val2017/000000000285.jpg",
    "http://images.cocodataset.org/val2017/000000000632.jpg",
    "http://images.cocodataset.org/val2017/000000000724.jpg",
    "http://images.cocodataset.org/val2017/000000001000.jpg",
    "http://images.cocodataset.org/val2017/000000001268.jpg",
    "http://images.cocodataset.org/val2017/000000001584.jpg",
    "http://images.cocodataset.org/val2017/000000002149.jpg",
    "http://images.cocodataset.org/val2017/000000002153.jpg",
];

/// Eventos externos reconocidos por el controlador. Cada cambio de umbral o
/// del conmutador NMS relanza la secuencia completa (sin recomputación
/// incremental ni caché de la salida cruda del detector).
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    RunClicked(RequestParams),
    UrlSubmitted(RequestParams),
    ConfidenceChanged(RequestParams),
    IouChanged(RequestParams),
    NmsToggled(RequestParams),
}

impl DashboardEvent {
    fn trigger(&self) -> &'static str {
        match self {
            DashboardEvent::RunClicked(_) => "run",
            DashboardEvent::UrlSubmitted(_) => "url-submit",
            DashboardEvent::ConfidenceChanged(_) => "confidence",
            DashboardEvent::IouChanged(_) => "iou",
            DashboardEvent::NmsToggled(_) => "nms",
        }
    }

    fn into_params(self) -> RequestParams {
        match self {
            DashboardEvent::RunClicked(p)
            | DashboardEvent::UrlSubmitted(p)
            | DashboardEvent::ConfidenceChanged(p)
            | DashboardEvent::IouChanged(p)
            | DashboardEvent::NmsToggled(p) => p,
        }
    }
}

/// Controlador de interacción del dashboard. Orquesta, por cada evento,
/// la secuencia Fetching → Detecting → Filtering → Rendering y publica un
/// `RenderedResult` inmutable que sustituye por completo al anterior.
pub struct DashboardService {
    detector: Arc<dyn DetectorPort>,
    images: Arc<dyn ImageSourcePort>,
}

impl DashboardService {
    pub fn new(detector: Arc<dyn DetectorPort>, images: Arc<dyn ImageSourcePort>) -> Self {
        Self { detector, images }
    }

    /// URL candidata para el clic n-ésimo del botón aleatorio. No ejecuta
    /// detección: el frontend sintetiza con ella un evento de ejecución.
    pub fn next_random_url(clicks: u64) -> &'static str {
        RANDOM_URLS[(clicks as usize) % RANDOM_URLS.len()]
    }

    /// Punto de entrada único para los eventos de ejecución.
    pub async fn handle(&self, event: DashboardEvent) -> DomainResult<RenderedResult> {
        info!("Evento '{}' recibido, relanzando secuencia completa", event.trigger());
        self.run(event.into_params()).await
    }

    async fn run(&self, params: RequestParams) -> DomainResult<RenderedResult> {
        // 1. Fetching: cualquier fallo de red o decodificación corta aquí
        //    y pasa directamente al renderizado del error.
        let image = match self.images.fetch(&params.url).await {
            Ok(image) => image,
            Err(DomainError::ImageUnavailable(reason)) => {
                warn!("Imagen no disponible ({}): {}", params.url, reason);
                return Ok(Self::unavailable_result(params.nms_enabled));
            }
            Err(e) => return Err(e),
        };

        // 2. Detecting: exactamente una inferencia por evento.
        let t_infer = Instant::now();
        let candidates = self.detector.detect(&image).await?;
        info!(
            "Inferencia completada en {:.1} ms ({} candidatos)",
            t_infer.elapsed().as_secs_f32() * 1000.0,
            candidates.len()
        );

        // 3. Filtering: umbral de confianza siempre, NMS solo si procede.
        let retained = filter_candidates(
            candidates,
            params.confidence_threshold,
            params.iou_threshold,
            params.nms_enabled,
        );
        let detections: Vec<Detection> = retained.iter().map(Detection::from).collect();

        // 4. Rendering: el mismo conjunto filtrado alimenta las tres figuras.
        let labels: Vec<String> = detections.iter().map(|d| d.label.clone()).collect();
        let confidences: Vec<f32> = detections.iter().map(|d| d.score).collect();

        let counts = counts_by_label(&labels);
        let means = mean_confidence_by_label(&labels, &confidences);
        let data_uri = figures::image_to_data_uri(&image)?;

        Ok(RenderedResult {
            image_figure: figures::image_figure(image.width(), image.height(), &data_uri, &detections),
            count_figure: figures::count_figure(&counts),
            confidence_figure: figures::confidence_figure(&means),
            iou_control_enabled: params.nms_enabled,
        })
    }

    fn unavailable_result(nms_enabled: bool) -> RenderedResult {
        let empty = counts_by_label(&[]);
        RenderedResult {
            image_figure: figures::error_figure(),
            count_figure: figures::count_figure(&empty),
            confidence_figure: figures::confidence_figure(&empty),
            iou_control_enabled: nms_enabled,
        }
    }
}
