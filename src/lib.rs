//! # plateful
//!
//! The analytical core of a restaurant recommendation dashboard: an
//! in-memory dataset store over two aligned tables (human-readable rows +
//! encoded feature vectors), cosine-similarity lookup, regression-based
//! re-ranking, conjunctive filtering, session-scoped favorites, and
//! aggregate insights.
//!
//! Everything is synchronous and in-memory: the dataset is loaded once at
//! startup and read-only afterwards, so it shares freely across read paths
//! with no locking.
//!
//! ## Quick start
//!
//! ```rust
//! use ndarray::array;
//! use plateful::{Dataset, Recommender, Restaurant, RestaurantFilter, Session};
//!
//! let restaurants = vec![
//!     Restaurant { name: "Dosa Corner".into(), city: "Pune".into(),
//!                  cuisine: "South Indian".into(), rating: 4.2, cost: 150.0 },
//!     Restaurant { name: "Wok This Way".into(), city: "Delhi".into(),
//!                  cuisine: "Chinese, Thai".into(), rating: 4.0, cost: 300.0 },
//!     Restaurant { name: "La Piazza".into(), city: "Pune".into(),
//!                  cuisine: "Italian".into(), rating: 4.5, cost: 500.0 },
//! ];
//! let encoded = vec![
//!     array![1.0, 0.0, 0.2],
//!     array![0.0, 1.0, 0.4],
//!     array![0.9, 0.1, 0.7],
//! ];
//!
//! let dataset = Dataset::from_parts(restaurants, encoded).unwrap();
//! let rec = Recommender::builder()
//!     .default_neighbors(2)
//!     .build(dataset)
//!     .unwrap();
//!
//! // Restaurants most similar to row 0.
//! let similar = rec.find_similar(0).unwrap();
//! assert_eq!(similar[0].index, 2);
//!
//! // Budget-constrained browse.
//! let cheap = rec.filter(&RestaurantFilter::new().budget(300.0));
//! assert_eq!(cheap, vec![0, 1]);
//!
//! // Per-session favorites.
//! let session = Session::new();
//! session.add_favorite("La Piazza");
//! assert_eq!(session.list_favorites(rec.dataset()), vec![2]);
//! ```
//!
//! For file-backed data, [`Dataset::load_csv`] reads the restaurant table
//! and the encoded feature table from two CSV files validated against each
//! other at load time.

pub mod dataset;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod insights;
pub mod metrics;
pub mod ranking;
pub mod recommender;
pub mod similarity;

// Re-exports for convenience.
pub use dataset::{Dataset, Restaurant};
pub use error::{RecError, Result};
pub use favorites::Session;
pub use filter::RestaurantFilter;
pub use insights::HistogramBin;
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use ranking::{RankedRestaurant, RatingModel};
pub use recommender::{RecConfig, Recommender, RecommenderBuilder};
pub use similarity::{cosine_similarity, Neighbor};
