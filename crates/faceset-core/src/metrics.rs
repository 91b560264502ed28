//! Evaluation helpers for person predictions.

use crate::types::Person;

/// Row-normalized confusion matrix: `m[true][predicted]`.
pub type ConfusionMatrix = [[f32; Person::COUNT]; Person::COUNT];

/// Fraction of `predictions` equal to the corresponding `labels` entry.
///
/// Extra predictions beyond `labels.len()` are ignored; missing ones count
/// as wrong. Returns 0.0 when `labels` is empty.
pub fn accuracy(predictions: &[Person], labels: &[Person]) -> f32 {
    if labels.is_empty() {
        return 0.0;
    }
    let correct = predictions
        .iter()
        .zip(labels)
        .filter(|(p, l)| p == l)
        .count();
    correct as f32 / labels.len() as f32
}

/// Distribution of predictions for each true label.
///
/// Row `i` sums to 1.0 when label `i` occurs, and is all zeros otherwise.
pub fn confusion_matrix(predictions: &[Person], labels: &[Person]) -> ConfusionMatrix {
    let mut counts = [[0u32; Person::COUNT]; Person::COUNT];
    for (predicted, actual) in predictions.iter().zip(labels) {
        counts[actual.index()][predicted.index()] += 1;
    }

    let mut matrix = [[0.0f32; Person::COUNT]; Person::COUNT];
    for (row, row_counts) in matrix.iter_mut().zip(counts.iter()) {
        let total: u32 = row_counts.iter().sum();
        if total == 0 {
            continue;
        }
        for (cell, &count) in row.iter_mut().zip(row_counts.iter()) {
            *cell = count as f32 / total as f32;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Person::*;

    #[test]
    fn test_accuracy() {
        let labels = [Akshay, Angela, Isaac, Mark];
        let predictions = [Akshay, Angela, Mark, Mark];
        assert!((accuracy(&predictions, &labels) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_accuracy_empty() {
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_accuracy_short_predictions() {
        let labels = [Akshay, Angela];
        assert!((accuracy(&[Akshay], &labels) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_confusion_matrix_rows_normalized() {
        let labels = [Nabilah, Nabilah, Nabilah, Nabilah, Mark];
        let predictions = [Nabilah, Nabilah, Nabilah, Angela, Mark];
        let m = confusion_matrix(&predictions, &labels);

        let row = m[Nabilah.index()];
        assert!((row[Nabilah.index()] - 0.75).abs() < 1e-6);
        assert!((row[Angela.index()] - 0.25).abs() < 1e-6);
        assert!((row.iter().sum::<f32>() - 1.0).abs() < 1e-6);

        assert_eq!(m[Mark.index()][Mark.index()], 1.0);
        // no Akshay samples
        assert!(m[Akshay.index()].iter().all(|&v| v == 0.0));
    }
}
