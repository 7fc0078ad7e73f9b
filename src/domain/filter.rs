use super::detection::Candidate;

/// Intersección sobre unión de dos cajas (x1, y1, x2, y2), en [0, 1].
pub fn iou(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    let ix1 = a[0].max(b[0]);
    let iy1 = a[1].max(b[1]);
    let ix2 = a[2].min(b[2]);
    let iy2 = a[3].min(b[3]);

    let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
    if inter <= 0.0 {
        return 0.0;
    }

    let area_a = (a[2] - a[0]).max(0.0) * (a[3] - a[1]).max(0.0);
    let area_b = (b[2] - b[0]).max(0.0) * (b[3] - b[1]).max(0.0);
    let union = area_a + area_b - inter;
    if union <= 0.0 {
        0.0
    } else {
        inter / union
    }
}

/// Filtrado de candidatos: umbral de confianza siempre; NMS voraz por clase
/// solo si está habilitado. La correspondencia puntuaciones/cajas se conserva
/// porque cada candidato viaja como una sola unidad.
pub fn filter_candidates(
    candidates: Vec<Candidate>,
    confidence_threshold: f32,
    iou_threshold: f32,
    nms_enabled: bool,
) -> Vec<Candidate> {
    let retained: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.best().1 >= confidence_threshold)
        .collect();

    if !nms_enabled {
        return retained;
    }

    non_max_suppression(retained, iou_threshold)
}

/// NMS voraz agrupado por clase ganadora: ordena por puntuación descendente y
/// suprime los candidatos de la misma clase cuyo IoU con uno ya retenido
/// supera el umbral.
fn non_max_suppression(candidates: Vec<Candidate>, iou_threshold: f32) -> Vec<Candidate> {
    if candidates.is_empty() {
        return candidates;
    }

    let mut ranked: Vec<(usize, f32, Candidate)> = candidates
        .into_iter()
        .map(|c| {
            let (class_id, score) = c.best();
            (class_id, score, c)
        })
        .collect();
    ranked.sort_unstable_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut suppressed = vec![false; ranked.len()];
    let mut kept = Vec::new();

    for i in 0..ranked.len() {
        if suppressed[i] {
            continue;
        }
        for j in (i + 1)..ranked.len() {
            if suppressed[j] || ranked[j].0 != ranked[i].0 {
                continue;
            }
            if iou(&ranked[i].2.bbox, &ranked[j].2.bbox) > iou_threshold {
                suppressed[j] = true;
            }
        }
        kept.push(ranked[i].2.clone());
    }

    kept
}
