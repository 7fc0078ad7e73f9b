use anyhow::Result;
use async_trait::async_trait;
use image::{imageops::FilterType, DynamicImage, RgbImage};
use ndarray::{Array4, ArrayViewD, Axis, IxDyn};
use ort::session::Session;
use ort::value::Value;
use std::fs;
use std::sync::Mutex;

use crate::application::ports::DetectorPort;
use crate::domain::detection::Candidate;
use crate::domain::errors::{DomainError, DomainResult};

const INPUT_SIZE: u32 = 800;
// Normalización ImageNet, la misma del preprocesado original de DETR.
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Motor DETR sobre ONNX Runtime. Una sesión por proceso; la inferencia es
/// síncrona y bloqueante, una por petición.
pub struct OnnxDetrEngine {
    session: Mutex<Session>,
}

impl OnnxDetrEngine {
    pub fn load(path: &str) -> Result<Self> {
        #[allow(unused_mut)]
        let mut builder = Session::builder()?
            .with_intra_threads(4)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        // CUDA es opcional: si está disponible se registra, si no continuamos en CPU.
        #[cfg(feature = "cuda")]
        {
            use ort::execution_providers::CUDAExecutionProvider;
            let cuda = CUDAExecutionProvider::default().build();
            if let Ok(builder_with_cuda) = builder.clone().with_execution_providers([cuda]) {
                builder = builder_with_cuda;
            }
        }

        let model_bytes = fs::read(path)?;
        let session = builder.commit_from_memory(&model_bytes)?;

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    fn infer(&self, rgb: &RgbImage) -> Result<Vec<Candidate>> {
        let side = INPUT_SIZE as usize;
        let resized = image::imageops::resize(rgb, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

        let mut input = Array4::<f32>::zeros((1, 3, side, side));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for c in 0..3 {
                input[[0, c, y as usize, x as usize]] =
                    (pixel[c] as f32 / 255.0 - MEAN[c]) / STD[c];
            }
        }

        let input_shape = vec![1, 3, side as i64, side as i64];
        let input_tensor = Value::from_array((input_shape, input.into_raw_vec()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("lock de la sesión ONNX fallido"))?;
        let outputs = session.run(ort::inputs![input_tensor])?;

        // Salida 0: logits [1, consultas, 92]; salida 1: cajas [1, consultas, 4].
        let (logits_shape, logits_data) = outputs[0].try_extract_tensor::<f32>()?;
        let (boxes_shape, boxes_data) = outputs[1].try_extract_tensor::<f32>()?;

        let logits_dims: Vec<usize> = logits_shape.into_iter().map(|&d| d as usize).collect();
        let boxes_dims: Vec<usize> = boxes_shape.into_iter().map(|&d| d as usize).collect();

        let logits = ArrayViewD::from_shape(IxDyn(&logits_dims), logits_data)?;
        let boxes = ArrayViewD::from_shape(IxDyn(&boxes_dims), boxes_data)?;
        let logits = logits.index_axis(Axis(0), 0);
        let boxes = boxes.index_axis(Axis(0), 0);

        let num_queries = logits.shape()[0];
        let num_logits = logits.shape()[1];
        let w = rgb.width() as f32;
        let h = rgb.height() as f32;

        let mut candidates = Vec::with_capacity(num_queries);
        for i in 0..num_queries {
            // Softmax sobre los logits de la consulta y descarte de la última
            // columna ("no-objeto").
            let row: Vec<f32> = (0..num_logits).map(|c| logits[[i, c]]).collect();
            let max_logit = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            let exps: Vec<f32> = row.iter().map(|&v| (v - max_logit).exp()).collect();
            let total: f32 = exps.iter().sum();
            let mut scores: Vec<f32> = exps.iter().map(|&e| e / total).collect();
            scores.pop();

            // Cajas DETR: (cx, cy, w, h) normalizadas a [0, 1].
            let cx = boxes[[i, 0]];
            let cy = boxes[[i, 1]];
            let bw = boxes[[i, 2]];
            let bh = boxes[[i, 3]];

            candidates.push(Candidate {
                scores,
                bbox: [
                    (cx - bw / 2.0) * w,
                    (cy - bh / 2.0) * h,
                    (cx + bw / 2.0) * w,
                    (cy + bh / 2.0) * h,
                ],
            });
        }

        Ok(candidates)
    }
}

#[async_trait]
impl DetectorPort for OnnxDetrEngine {
    async fn detect(&self, image: &DynamicImage) -> DomainResult<Vec<Candidate>> {
        let rgb = image.to_rgb8();
        tokio::task::block_in_place(|| self.infer(&rgb))
            .map_err(|e| DomainError::OperationFailed(format!("inferencia DETR: {e}")))
    }
}
