//! Regression-based re-ranking of the dataset.
//!
//! Fits a ridge-regularized least-squares model mapping encoded feature
//! vectors to the observed rating, then ranks rows by their predicted
//! score. The model is fitted and evaluated on the same rows — there is no
//! train/test split, so the prediction is a smoothed re-ranking of the
//! dataset rather than a generalization estimate. That matches the observed
//! behavior of the system this crate reimplements and is kept deliberately;
//! callers wanting an honest accuracy number need a holdout split this
//! module does not provide.

use ndarray::ArrayView1;

use crate::dataset::Dataset;
use crate::error::{RecError, Result};

/// A fitted rating model: `score = intercept + coefficients . features`.
#[derive(Debug, Clone)]
pub struct RatingModel {
    coefficients: Vec<f32>,
    intercept: f32,
}

/// One row of a prediction-ranked result.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRestaurant {
    /// Row index into the dataset.
    pub index: usize,
    /// Predicted rating for this row.
    pub predicted: f32,
}

impl RatingModel {
    /// Fit on every row of the dataset, targeting the rating column.
    ///
    /// `l2` is the ridge penalty applied to feature coefficients (never to
    /// the intercept); any positive value keeps the normal equations
    /// positive definite even when features outnumber rows.
    ///
    /// # Errors
    ///
    /// `EmptyDataset` when there are no rows, `InvalidConfig` for a
    /// non-positive or non-finite `l2`.
    pub fn fit(dataset: &Dataset, l2: f32) -> Result<Self> {
        if dataset.is_empty() {
            return Err(RecError::EmptyDataset);
        }
        if !(l2 > 0.0 && l2.is_finite()) {
            return Err(RecError::InvalidConfig(format!(
                "ridge penalty must be positive and finite, got {l2}"
            )));
        }

        let n = dataset.len();
        let p = dataset.dim();
        let m = p + 1; // intercept column first

        // Normal equations: (X^T X + l2 * D) beta = X^T y, with D zeroing
        // the intercept entry. Accumulated in f64; the fit is small enough
        // that a dense solve is fine.
        let mut a = vec![0.0f64; m * m];
        let mut b = vec![0.0f64; m];

        for row in 0..n {
            let x = dataset.encoded(row)?;
            let y = f64::from(dataset.restaurant(row)?.rating);

            b[0] += y;
            a[0] += 1.0;
            for j in 0..p {
                let xj = f64::from(x[j]);
                a[j + 1] += xj; // column 0 is all ones
                b[j + 1] += xj * y;
            }
            for i in 0..p {
                let xi = f64::from(x[i]);
                for j in i..p {
                    a[(i + 1) * m + (j + 1)] += xi * f64::from(x[j]);
                }
            }
        }
        // Mirror the upper triangle and fill the intercept row/column.
        for j in 1..m {
            a[j * m] = a[j];
        }
        for i in 1..m {
            for j in (i + 1)..m {
                a[j * m + i] = a[i * m + j];
            }
        }
        for j in 1..m {
            a[j * m + j] += f64::from(l2);
        }

        let beta = cholesky_solve(&mut a, b, m)?;

        Ok(Self {
            intercept: beta[0] as f32,
            coefficients: beta[1..].iter().map(|&c| c as f32).collect(),
        })
    }

    /// Predicted rating for a single encoded row.
    pub fn predict(&self, features: &ArrayView1<f32>) -> f32 {
        let dot: f32 = self
            .coefficients
            .iter()
            .zip(features.iter())
            .map(|(c, x)| c * x)
            .sum();
        self.intercept + dot
    }

    /// Predicted rating for every row, in dataset order.
    pub fn predict_all(&self, dataset: &Dataset) -> Vec<f32> {
        dataset
            .encoded_rows()
            .iter()
            .map(|v| self.predict(&v.view()))
            .collect()
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f32 {
        self.intercept
    }
}

/// Fit a model and return the `top_n` rows by predicted rating.
///
/// Rows are ordered descending by prediction; ties keep original row order
/// (stable sort). Fewer than `top_n` rows yields a shorter result.
pub fn rank_by_prediction(dataset: &Dataset, l2: f32, top_n: usize) -> Result<Vec<RankedRestaurant>> {
    if top_n == 0 {
        return Err(RecError::InvalidTopN);
    }
    let model = RatingModel::fit(dataset, l2)?;
    Ok(rank_with_model(dataset, &model, top_n))
}

/// Rank with an already-fitted model (lets callers reuse one fit).
pub fn rank_with_model(
    dataset: &Dataset,
    model: &RatingModel,
    top_n: usize,
) -> Vec<RankedRestaurant> {
    rank_scores(&model.predict_all(dataset), top_n)
}

/// Rank precomputed per-row scores: stable descending, top `top_n`.
pub fn rank_scores(scores: &[f32], top_n: usize) -> Vec<RankedRestaurant> {
    let mut ranked: Vec<RankedRestaurant> = scores
        .iter()
        .enumerate()
        .map(|(index, &predicted)| RankedRestaurant { index, predicted })
        .collect();

    ranked.sort_by(|a, b| {
        b.predicted
            .partial_cmp(&a.predicted)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}

/// Solve `A x = b` for symmetric positive-definite `A` (row-major, n x n)
/// via an in-place Cholesky factorization.
fn cholesky_solve(a: &mut [f64], mut b: Vec<f64>, n: usize) -> Result<Vec<f64>> {
    for j in 0..n {
        let mut d = a[j * n + j];
        for k in 0..j {
            d -= a[j * n + k] * a[j * n + k];
        }
        if d <= 0.0 || !d.is_finite() {
            return Err(RecError::FitFailed(
                "normal equations are not positive definite".into(),
            ));
        }
        a[j * n + j] = d.sqrt();
        for i in (j + 1)..n {
            let mut s = a[i * n + j];
            for k in 0..j {
                s -= a[i * n + k] * a[j * n + k];
            }
            a[i * n + j] = s / a[j * n + j];
        }
    }

    // Forward substitution: L y = b.
    for i in 0..n {
        for k in 0..i {
            b[i] -= a[i * n + k] * b[k];
        }
        b[i] /= a[i * n + i];
    }
    // Back substitution: L^T x = y.
    for i in (0..n).rev() {
        for k in (i + 1)..n {
            b[i] -= a[k * n + i] * b[k];
        }
        b[i] /= a[i * n + i];
    }
    Ok(b)
}
