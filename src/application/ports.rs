use async_trait::async_trait;
use image::DynamicImage;

use crate::domain::{detection::Candidate, errors::DomainResult};

/// Adaptador del detector: una inferencia síncrona por petición que devuelve
/// los candidatos crudos (vector de puntuaciones + caja) en el mismo orden.
#[async_trait]
pub trait DetectorPort: Send + Sync {
    async fn detect(&self, image: &DynamicImage) -> DomainResult<Vec<Candidate>>;
}

/// Origen de imágenes: GET a una URL arbitraria y decodificación.
/// Cualquier fallo (red, respuesta no-2xx, cuerpo no decodificable)
/// colapsa en `DomainError::ImageUnavailable`.
#[async_trait]
pub trait ImageSourcePort: Send + Sync {
    async fn fetch(&self, url: &str) -> DomainResult<DynamicImage>;
}
