use std::time::Duration;

use async_trait::async_trait;
use image::DynamicImage;

use crate::application::ports::ImageSourcePort;
use crate::domain::errors::{DomainError, DomainResult};

/// Descarga de imágenes por URL con reqwest. Fallo de red, respuesta no-2xx
/// y cuerpo no decodificable son una sola clase de error: ImageUnavailable.
pub struct UrlImageSource {
    client: reqwest::Client,
}

impl UrlImageSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }
}

impl Default for UrlImageSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageSourcePort for UrlImageSource {
    async fn fetch(&self, url: &str) -> DomainResult<DynamicImage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::ImageUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::ImageUnavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::ImageUnavailable(e.to_string()))?;

        image::load_from_memory(&bytes)
            .map_err(|e| DomainError::ImageUnavailable(format!("decodificación: {e}")))
    }
}
