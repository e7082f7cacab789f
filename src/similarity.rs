//! Cosine similarity lookup over the encoded feature table.

use ndarray::ArrayView1;

use crate::dataset::Dataset;
use crate::error::{RecError, Result};

/// A single similar-restaurant result.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Row index into the dataset.
    pub index: usize,
    /// Cosine similarity to the selected row (higher is more similar).
    pub score: f32,
}

/// Cosine similarity: cos(a, b) in [-1, 1]. Zero vectors score 0.
pub fn cosine_similarity(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f32 {
    let dot = a.dot(b);
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    let denom = norm_a * norm_b;
    if denom < f32::EPSILON {
        return 0.0;
    }
    dot / denom
}

/// Find the `top_n` rows most similar to `selected_index`.
///
/// Scores every encoded row against the selected row, orders descending by
/// similarity with ties broken by original row order, drops the selected
/// row itself, and returns the next `top_n` neighbors. A dataset with fewer
/// than `top_n + 1` rows yields a shorter result; a single-row dataset
/// yields an empty one. An empty dataset has no valid `selected_index` at
/// all, so every call fails the range precondition below.
///
/// # Errors
///
/// `IndexOutOfRange` if `selected_index` is not a valid row; `InvalidTopN`
/// if `top_n` is zero. Both are contract violations on the caller's side.
pub fn find_similar(dataset: &Dataset, selected_index: usize, top_n: usize) -> Result<Vec<Neighbor>> {
    if top_n == 0 {
        return Err(RecError::InvalidTopN);
    }
    let base = dataset.encoded(selected_index)?;
    let base = base.view();

    let mut scored: Vec<Neighbor> = dataset
        .encoded_rows()
        .iter()
        .enumerate()
        .map(|(index, v)| Neighbor {
            index,
            score: cosine_similarity(&base, &v.view()),
        })
        .collect();

    // Stable sort keeps original row order among equal scores.
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored.retain(|n| n.index != selected_index);
    scored.truncate(top_n);
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Restaurant;
    use ndarray::{array, Array1};

    fn dataset(encoded: Vec<Array1<f32>>) -> Dataset {
        let restaurants = (0..encoded.len())
            .map(|i| Restaurant {
                name: format!("R{i}"),
                city: "Pune".into(),
                cuisine: "Cafe".into(),
                rating: 4.0,
                cost: 100.0,
            })
            .collect();
        Dataset::from_parts(restaurants, encoded).unwrap()
    }

    #[test]
    fn test_cosine_identical_direction() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![2.0, 4.0, 6.0];
        let s = cosine_similarity(&a.view(), &b.view());
        assert!((s - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = array![1.0, 0.0];
        let b = array![0.0, 1.0];
        let s = cosine_similarity(&a.view(), &b.view());
        assert!(s.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a = array![0.0, 0.0];
        let b = array![1.0, 1.0];
        assert_eq!(cosine_similarity(&a.view(), &b.view()), 0.0);
    }

    #[test]
    fn test_self_similarity_is_maximum() {
        let ds = dataset(vec![
            array![1.0, 0.0, 0.0],
            array![0.9, 0.1, 0.0],
            array![0.0, 1.0, 0.0],
        ]);
        for i in 0..ds.len() {
            let base = ds.encoded(i).unwrap().view();
            let self_score = cosine_similarity(&base, &base);
            for j in 0..ds.len() {
                let other = ds.encoded(j).unwrap().view();
                assert!(self_score >= cosine_similarity(&base, &other) - 1e-6);
            }
        }
    }

    #[test]
    fn test_find_similar_excludes_self_and_orders() {
        let ds = dataset(vec![
            array![1.0, 0.0],
            array![0.99, 0.01],
            array![0.0, 1.0],
            array![0.8, 0.2],
        ]);
        let found = find_similar(&ds, 0, 2).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|n| n.index != 0));
        assert_eq!(found[0].index, 1);
        assert_eq!(found[1].index, 3);
        assert!(found[0].score >= found[1].score);
    }

    #[test]
    fn test_find_similar_small_dataset_truncates() {
        let ds = dataset(vec![array![1.0, 0.0], array![0.5, 0.5]]);
        let found = find_similar(&ds, 0, 5).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index, 1);
    }

    #[test]
    fn test_find_similar_tie_break_by_row_order() {
        // Rows 1 and 2 are identical, so they tie exactly.
        let ds = dataset(vec![
            array![1.0, 0.0],
            array![0.5, 0.5],
            array![0.5, 0.5],
        ]);
        let found = find_similar(&ds, 0, 2).unwrap();
        assert_eq!(found[0].index, 1);
        assert_eq!(found[1].index, 2);
    }

    #[test]
    fn test_find_similar_out_of_range() {
        let ds = dataset(vec![array![1.0]]);
        let err = find_similar(&ds, 5, 3).unwrap_err();
        assert!(matches!(err, RecError::IndexOutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn test_find_similar_zero_top_n() {
        let ds = dataset(vec![array![1.0]]);
        assert!(matches!(
            find_similar(&ds, 0, 0),
            Err(RecError::InvalidTopN)
        ));
    }
}
