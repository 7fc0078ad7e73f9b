/// Tabla etiqueta→valor en orden de primera aparición, con una única
/// entrada resaltada para la gráfica de barras.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    pub entries: Vec<(String, f64)>,
    pub highlight: Option<usize>,
}

impl LabelTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Recuento por etiqueta; se resalta el máximo (el primero en caso de empate).
pub fn counts_by_label(labels: &[String]) -> LabelTable {
    let mut entries: Vec<(String, f64)> = Vec::new();
    for label in labels {
        match entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1.0,
            None => entries.push((label.clone(), 1.0)),
        }
    }

    let highlight = argmax(&entries);
    LabelTable { entries, highlight }
}

/// Confianza media por etiqueta; se resalta el mínimo (el primero en empate).
pub fn mean_confidence_by_label(labels: &[String], confidences: &[f32]) -> LabelTable {
    let mut sums: Vec<(String, f64, usize)> = Vec::new();
    for (label, &conf) in labels.iter().zip(confidences) {
        match sums.iter_mut().find(|(l, _, _)| l == label) {
            Some((_, sum, n)) => {
                *sum += conf as f64;
                *n += 1;
            }
            None => sums.push((label.clone(), conf as f64, 1)),
        }
    }

    let entries: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(label, sum, n)| (label, sum / n as f64))
        .collect();

    let highlight = argmin(&entries);
    LabelTable { entries, highlight }
}

// Primer máximo en orden de iteración: solo se reemplaza el candidato
// cuando el valor es estrictamente mayor.
fn argmax(entries: &[(String, f64)]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, (_, value)) in entries.iter().enumerate() {
        match best {
            Some(b) if entries[b].1 >= *value => {}
            _ => best = Some(i),
        }
    }
    best
}

fn argmin(entries: &[(String, f64)]) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .min_by(|(_, (_, a)), (_, (_, b))| {
            a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn counts_sum_to_sequence_length() {
        let input = labels(&["perro", "gato", "perro", "perro", "coche"]);
        let table = counts_by_label(&input);
        let total: f64 = table.entries.iter().map(|(_, c)| c).sum();
        assert_eq!(total, input.len() as f64);
    }

    #[test]
    fn counts_keep_first_seen_order() {
        let input = labels(&["gato", "perro", "gato", "coche"]);
        let table = counts_by_label(&input);
        let order: Vec<&str> = table.entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(order, vec!["gato", "perro", "coche"]);
    }

    #[test]
    fn count_highlight_is_first_maximum() {
        // "gato" y "perro" empatan a 2; gana el primero en orden de aparición.
        let input = labels(&["gato", "perro", "gato", "perro"]);
        let table = counts_by_label(&input);
        assert_eq!(table.highlight, Some(0));
    }

    #[test]
    fn count_highlight_tie_break_works_past_index_zero() {
        // "coche" queda en 1; "gato" y "perro" empatan a 2 y gana "gato"
        // por aparecer antes.
        let input = labels(&["coche", "gato", "perro", "gato", "perro"]);
        let table = counts_by_label(&input);
        assert_eq!(table.highlight, Some(1));
    }

    #[test]
    fn means_stay_within_label_range() {
        let input = labels(&["perro", "perro", "gato"]);
        let confs = [0.6, 0.9, 0.8];
        let table = mean_confidence_by_label(&input, &confs);
        let (_, dog_mean) = &table.entries[0];
        assert!(*dog_mean >= 0.6 && *dog_mean <= 0.9);
        assert!((dog_mean - 0.75).abs() < 1e-6);
    }

    #[test]
    fn confidence_highlight_is_first_minimum() {
        let input = labels(&["perro", "gato", "coche"]);
        let confs = [0.9, 0.5, 0.5];
        let table = mean_confidence_by_label(&input, &confs);
        assert_eq!(table.highlight, Some(1));
    }

    #[test]
    fn both_aggregations_cover_the_same_labels() {
        let input = labels(&["perro", "gato", "perro"]);
        let confs = [0.9, 0.8, 0.7];
        let counts = counts_by_label(&input);
        let means = mean_confidence_by_label(&input, &confs);
        let a: Vec<&String> = counts.entries.iter().map(|(l, _)| l).collect();
        let b: Vec<&String> = means.entries.iter().map(|(l, _)| l).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_produces_empty_tables() {
        let table = counts_by_label(&[]);
        assert!(table.is_empty());
        assert_eq!(table.highlight, None);

        let table = mean_confidence_by_label(&[], &[]);
        assert!(table.is_empty());
        assert_eq!(table.highlight, None);
    }
}
