use std::sync::Arc;
use crate::application::services::DashboardService;

/// Estado compartido para los manejadores HTTP de Axum.
/// Siguiendo la Arquitectura Hexagonal, el estado contiene el servicio (Caso de Uso).
#[derive(Clone)]
pub struct HttpState {
    /// Controlador de interacción del dashboard de detección.
    pub dashboard: Arc<DashboardService>,
}
