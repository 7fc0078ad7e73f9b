mod domain;
mod application;
mod adapters;

use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::adapters::{
    fetch::url_source::UrlImageSource,
    http::{router, state::HttpState},
    onnx::detr_engine::OnnxDetrEngine,
};
use crate::application::services::DashboardService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Inicializar logs (RUST_LOG=info por defecto)
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("🔧 Inicializando adaptadores de infraestructura...");

    // 2. Instanciar Adaptadores (Capa de Infraestructura)
    let model_path = std::env::var("DETR_MODEL_PATH")
        .unwrap_or_else(|_| "models/detr-resnet50.onnx".to_string());
    let detector = Arc::new(OnnxDetrEngine::load(&model_path)?);
    let images = Arc::new(UrlImageSource::new());

    // 3. Instanciar el Servicio (Capa de Aplicación - Caso de Uso)
    let dashboard = Arc::new(DashboardService::new(detector, images));

    // 4. Configurar el Estado de la API
    let state = HttpState { dashboard };

    // 5. Configurar el Router de Axum y Archivos Estáticos
    let app = router(state).fallback_service(ServeDir::new("static"));

    // 6. Lanzar el Servidor
    let port = 8090;
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!("🚀 Dashboard DETR iniciado en http://{}", addr);
    tracing::info!("📂 Archivos estáticos servidos desde la carpeta './static'");
    tracing::info!("🧠 Modelo ONNX: {}", model_path);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
