use std::sync::Arc;

use parking_lot::RwLock;

use crate::dataset::Dataset;
use crate::error::{RecError, Result};
use crate::filter::RestaurantFilter;
use crate::metrics::{MetricsCollector, MetricsSnapshot, OpTimer};
use crate::ranking::{self, RankedRestaurant, RatingModel};
use crate::similarity::{self, Neighbor};

/// Configuration for the recommender.
#[derive(Debug, Clone)]
pub struct RecConfig {
    /// Ridge penalty for the rating model.
    pub ridge_penalty: f32,
    /// Neighbor count used by [`Recommender::find_similar`].
    pub default_neighbors: usize,
    /// Result size used by [`Recommender::recommend_top`].
    pub default_ranking_size: usize,
}

impl Default for RecConfig {
    fn default() -> Self {
        Self {
            ridge_penalty: 1e-2,
            default_neighbors: 5,
            default_ranking_size: 10,
        }
    }
}

/// The recommendation facade: owns the dataset, runs similarity lookups,
/// filtering, and the regression re-ranking, and memoizes the fitted
/// prediction scores.
///
/// The dataset is read-only after construction, so a `Recommender` can be
/// shared freely (`Arc<Recommender>`) across read paths. Per-user state
/// (favorites) lives in [`crate::Session`], not here.
pub struct Recommender {
    dataset: Arc<Dataset>,
    config: RecConfig,
    // Memoized predict_all output; refitted on demand after invalidation.
    predictions: RwLock<Option<Arc<Vec<f32>>>>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("rows", &self.dataset.len())
            .field("dim", &self.dataset.dim())
            .field("config", &self.config)
            .field("has_metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Recommender {
    /// Start building a recommender with the builder pattern.
    pub fn builder() -> RecommenderBuilder {
        RecommenderBuilder::new()
    }

    /// Create a recommender directly from a dataset and a [`RecConfig`].
    pub fn new(dataset: Dataset, config: RecConfig) -> Result<Self> {
        Self::new_with_metrics(dataset, config, false)
    }

    fn new_with_metrics(
        dataset: Dataset,
        config: RecConfig,
        enable_metrics: bool,
    ) -> Result<Self> {
        if !(config.ridge_penalty > 0.0 && config.ridge_penalty.is_finite()) {
            return Err(RecError::InvalidConfig(format!(
                "ridge_penalty must be positive and finite, got {}",
                config.ridge_penalty
            )));
        }
        if config.default_neighbors == 0 {
            return Err(RecError::InvalidConfig(
                "default_neighbors must be > 0".into(),
            ));
        }
        if config.default_ranking_size == 0 {
            return Err(RecError::InvalidConfig(
                "default_ranking_size must be > 0".into(),
            ));
        }

        let metrics = if enable_metrics {
            Some(Arc::new(MetricsCollector::new()))
        } else {
            None
        };

        Ok(Self {
            dataset: Arc::new(dataset),
            config,
            predictions: RwLock::new(None),
            metrics,
        })
    }

    /// The underlying dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// A shareable handle to the dataset.
    pub fn dataset_arc(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    /// Return a clone of the current configuration.
    pub fn config(&self) -> RecConfig {
        self.config.clone()
    }

    // ------------------------------------------------------------------
    // Similarity
    // ------------------------------------------------------------------

    /// Top similar restaurants for `selected_index`, using the configured
    /// default neighbor count.
    pub fn find_similar(&self, selected_index: usize) -> Result<Vec<Neighbor>> {
        self.find_similar_n(selected_index, self.config.default_neighbors)
    }

    /// Top `top_n` similar restaurants for `selected_index`.
    pub fn find_similar_n(&self, selected_index: usize, top_n: usize) -> Result<Vec<Neighbor>> {
        let timer = self.metrics.as_ref().map(|_| OpTimer::new());
        let result = similarity::find_similar(&self.dataset, selected_index, top_n)?;
        if let (Some(m), Some(t)) = (&self.metrics, timer) {
            m.record_similarity_query(t.elapsed_ns());
        }
        Ok(result)
    }

    // ------------------------------------------------------------------
    // Ranking
    // ------------------------------------------------------------------

    /// Top rows by predicted rating, using the configured default size.
    pub fn recommend_top(&self) -> Result<Vec<RankedRestaurant>> {
        self.recommend_top_n(self.config.default_ranking_size)
    }

    /// Top `top_n` rows by predicted rating.
    ///
    /// The first call fits the rating model and memoizes its per-row
    /// predictions; later calls reuse them until
    /// [`invalidate_predictions`](Self::invalidate_predictions).
    pub fn recommend_top_n(&self, top_n: usize) -> Result<Vec<RankedRestaurant>> {
        if top_n == 0 {
            return Err(RecError::InvalidTopN);
        }
        let scores = self.predictions()?;
        Ok(ranking::rank_scores(&scores, top_n))
    }

    /// Per-row predicted ratings, fitting and memoizing on first use.
    pub fn predictions(&self) -> Result<Arc<Vec<f32>>> {
        if let Some(cached) = self.predictions.read().as_ref() {
            return Ok(Arc::clone(cached));
        }

        let timer = self.metrics.as_ref().map(|_| OpTimer::new());
        let model = RatingModel::fit(&self.dataset, self.config.ridge_penalty)?;
        let scores = Arc::new(model.predict_all(&self.dataset));
        if let (Some(m), Some(t)) = (&self.metrics, timer) {
            m.record_ranking_run(t.elapsed_ns());
        }

        *self.predictions.write() = Some(Arc::clone(&scores));
        Ok(scores)
    }

    /// Drop the memoized predictions so the next ranking call refits.
    ///
    /// The dataset itself is immutable; this hook exists for callers that
    /// rebuild the recommender around a new dataset and want the same
    /// lifecycle on a long-lived handle.
    pub fn invalidate_predictions(&self) {
        *self.predictions.write() = None;
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Apply a filter over the dataset, recording metrics.
    pub fn filter(&self, filter: &RestaurantFilter) -> Vec<usize> {
        let result = filter.apply(&self.dataset);
        if let Some(ref m) = self.metrics {
            m.record_filter_run();
        }
        result
    }

    // ------------------------------------------------------------------
    // Metrics
    // ------------------------------------------------------------------

    /// Snapshot of runtime metrics (`None` if metrics were not enabled).
    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        self.metrics.as_ref().map(|m| m.snapshot())
    }

    /// Reset metrics counters.
    pub fn reset_metrics(&self) {
        if let Some(ref m) = self.metrics {
            m.reset();
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Recommender`].
#[derive(Debug, Default)]
pub struct RecommenderBuilder {
    config: RecConfig,
    enable_metrics: bool,
}

impl RecommenderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ridge_penalty(mut self, l2: f32) -> Self {
        self.config.ridge_penalty = l2;
        self
    }

    pub fn default_neighbors(mut self, n: usize) -> Self {
        self.config.default_neighbors = n;
        self
    }

    pub fn default_ranking_size(mut self, n: usize) -> Self {
        self.config.default_ranking_size = n;
        self
    }

    pub fn enable_metrics(mut self) -> Self {
        self.enable_metrics = true;
        self
    }

    /// Build the recommender, returning an error on invalid configuration.
    pub fn build(self, dataset: Dataset) -> Result<Recommender> {
        Recommender::new_with_metrics(dataset, self.config, self.enable_metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Restaurant;
    use ndarray::Array1;

    fn fixture() -> Dataset {
        let restaurants = (0..4)
            .map(|i| Restaurant {
                name: format!("R{i}"),
                city: "Pune".into(),
                cuisine: "Cafe".into(),
                rating: 3.0 + i as f32 * 0.5,
                cost: 100.0 * (i + 1) as f32,
            })
            .collect();
        let encoded = (0..4)
            .map(|i| Array1::from_vec(vec![i as f32, (3 - i) as f32]))
            .collect();
        Dataset::from_parts(restaurants, encoded).unwrap()
    }

    #[test]
    fn test_builder_validates_config() {
        let err = Recommender::builder()
            .ridge_penalty(0.0)
            .build(fixture())
            .unwrap_err();
        assert!(matches!(err, RecError::InvalidConfig(_)));

        let err = Recommender::builder()
            .default_neighbors(0)
            .build(fixture())
            .unwrap_err();
        assert!(matches!(err, RecError::InvalidConfig(_)));
    }

    #[test]
    fn test_defaults_flow_through() {
        let rec = Recommender::builder()
            .default_neighbors(2)
            .build(fixture())
            .unwrap();
        assert_eq!(rec.find_similar(0).unwrap().len(), 2);
    }

    #[test]
    fn test_predictions_memoized() {
        let rec = Recommender::builder()
            .enable_metrics()
            .build(fixture())
            .unwrap();

        let first = rec.predictions().unwrap();
        let second = rec.predictions().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(rec.metrics().unwrap().ranking_runs, 1);

        rec.invalidate_predictions();
        let third = rec.predictions().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(rec.metrics().unwrap().ranking_runs, 2);
    }

    #[test]
    fn test_metrics_record_operations() {
        let rec = Recommender::builder()
            .enable_metrics()
            .build(fixture())
            .unwrap();

        rec.find_similar_n(0, 3).unwrap();
        rec.filter(&RestaurantFilter::new().budget(250.0));
        rec.recommend_top().unwrap();

        let snap = rec.metrics().unwrap();
        assert_eq!(snap.similarity_queries, 1);
        assert_eq!(snap.filter_runs, 1);
        assert_eq!(snap.ranking_runs, 1);

        rec.reset_metrics();
        assert_eq!(rec.metrics().unwrap().similarity_queries, 0);
    }

    #[test]
    fn test_dataset_arc_shares_one_copy() {
        let rec = Recommender::builder().build(fixture()).unwrap();
        let a = rec.dataset_arc();
        let b = rec.dataset_arc();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), rec.dataset().len());
    }

    #[test]
    fn test_recommend_top_size() {
        let rec = Recommender::builder().build(fixture()).unwrap();
        let ranked = rec.recommend_top_n(2).unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].predicted >= ranked[1].predicted);
    }
}
