use serde::{Deserialize, Serialize};

use super::classes::label_for;

/// Candidato crudo emitido por el detector antes del filtrado:
/// un vector de probabilidades por clase (ya sin la columna "no-objeto")
/// y su caja en coordenadas de píxel (x1, y1, x2, y2).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub scores: Vec<f32>,
    pub bbox: [f32; 4],
}

impl Candidate {
    /// Clase ganadora y su puntuación máxima (la primera en caso de empate).
    pub fn best(&self) -> (usize, f32) {
        let mut class_id = 0;
        let mut score = 0.0;
        for (i, &s) in self.scores.iter().enumerate() {
            if s > score {
                class_id = i;
                score = s;
            }
        }
        (class_id, score)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub score: f32,
    pub class_id: usize,
    pub label: String,
}

impl From<&Candidate> for Detection {
    fn from(c: &Candidate) -> Self {
        let (class_id, score) = c.best();
        let [x1, y1, x2, y2] = c.bbox;
        Detection {
            x1,
            y1,
            x2,
            y2,
            score,
            class_id,
            label: label_for(class_id).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_breaks_score_ties_to_first_class() {
        let c = Candidate {
            scores: vec![0.1, 0.4, 0.4],
            bbox: [0.0, 0.0, 1.0, 1.0],
        };
        assert_eq!(c.best(), (1, 0.4));
    }

    #[test]
    fn best_of_empty_scores_is_zero() {
        let c = Candidate {
            scores: vec![],
            bbox: [0.0, 0.0, 1.0, 1.0],
        };
        assert_eq!(c.best(), (0, 0.0));
    }
}
