//! The dataset store: two aligned, read-only tables loaded once at startup.
//!
//! The human-readable restaurant table and the numerically encoded feature
//! table are loaded together and validated for row alignment. After
//! construction the dataset is immutable; reloading means building a new
//! [`Dataset`] and swapping it in at the call site.

use std::path::Path;

use ndarray::Array1;
use serde::Deserialize;

use crate::error::{RecError, Result};

/// One row of the human-readable restaurant table.
///
/// The row's position in the dataset is its identifier; the encoded feature
/// vector at the same position describes the same restaurant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub city: String,
    /// Possibly multi-valued, comma-separated text (e.g. "North Indian, Chinese").
    pub cuisine: String,
    pub rating: f32,
    pub cost: f32,
}

/// An immutable, in-memory pair of aligned tables.
pub struct Dataset {
    restaurants: Vec<Restaurant>,
    encoded: Vec<Array1<f32>>,
    dim: usize,
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("rows", &self.restaurants.len())
            .field("dim", &self.dim)
            .finish()
    }
}

impl Dataset {
    /// Build a dataset from already-parsed rows.
    ///
    /// Validates that both tables have the same row count and that every
    /// encoded row has the same dimension.
    pub fn from_parts(
        restaurants: Vec<Restaurant>,
        encoded: Vec<Array1<f32>>,
    ) -> Result<Self> {
        if restaurants.len() != encoded.len() {
            return Err(RecError::RowCountMismatch {
                restaurants: restaurants.len(),
                encoded: encoded.len(),
            });
        }

        let dim = encoded.first().map_or(0, Array1::len);
        for (row, v) in encoded.iter().enumerate() {
            if v.len() != dim {
                return Err(RecError::DimensionMismatch {
                    row,
                    expected: dim,
                    got: v.len(),
                });
            }
        }

        Ok(Self {
            restaurants,
            encoded,
            dim,
        })
    }

    /// Load both tables from CSV files.
    ///
    /// The restaurant file must carry a `name,city,cuisine,rating,cost`
    /// header; the encoded file must hold one numeric row per restaurant,
    /// in the same order. This is the one-time initialization step: call it
    /// at startup and keep the result for the process lifetime.
    pub fn load_csv(
        restaurants_path: impl AsRef<Path>,
        encoded_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let restaurants = read_restaurants(restaurants_path.as_ref())?;
        let encoded = read_encoded(encoded_path.as_ref())?;
        Self::from_parts(restaurants, encoded)
    }

    /// Number of rows (identical for both tables).
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    /// True when the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Dimension of the encoded feature vectors (0 for an empty dataset).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Restaurant row at `index`.
    pub fn restaurant(&self, index: usize) -> Result<&Restaurant> {
        self.restaurants
            .get(index)
            .ok_or(RecError::IndexOutOfRange {
                index,
                len: self.restaurants.len(),
            })
    }

    /// Encoded feature vector at `index`.
    pub fn encoded(&self, index: usize) -> Result<&Array1<f32>> {
        self.encoded.get(index).ok_or(RecError::IndexOutOfRange {
            index,
            len: self.encoded.len(),
        })
    }

    /// All restaurant rows, in load order.
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// All encoded rows, in load order.
    pub fn encoded_rows(&self) -> &[Array1<f32>] {
        &self.encoded
    }

    /// Case-insensitive substring search over restaurant names.
    ///
    /// Returns matching row indices in dataset order; an empty result is
    /// the "not found" condition, not an error.
    pub fn search_by_name(&self, query: &str) -> Vec<usize> {
        let needle = query.to_lowercase();
        self.restaurants
            .iter()
            .enumerate()
            .filter(|(_, r)| r.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Sorted, de-duplicated list of cities present in the dataset.
    pub fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> =
            self.restaurants.iter().map(|r| r.city.clone()).collect();
        cities.sort();
        cities.dedup();
        cities
    }

    /// Sorted, de-duplicated list of cuisine strings as stored.
    pub fn cuisines(&self) -> Vec<String> {
        let mut cuisines: Vec<String> =
            self.restaurants.iter().map(|r| r.cuisine.clone()).collect();
        cuisines.sort();
        cuisines.dedup();
        cuisines
    }
}

fn read_restaurants(path: &Path) -> Result<Vec<Restaurant>> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_open_error)?;
    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<Restaurant>().enumerate() {
        let row = record.map_err(|e| RecError::CsvParse {
            row: i + 1,
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn read_encoded(path: &Path) -> Result<Vec<Array1<f32>>> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_open_error)?;
    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| RecError::CsvParse {
            row: i + 1,
            message: e.to_string(),
        })?;
        let values: std::result::Result<Vec<f32>, _> =
            record.iter().map(str::trim).map(str::parse).collect();
        let values = values.map_err(|e| RecError::CsvParse {
            row: i + 1,
            message: format!("non-numeric feature value: {e}"),
        })?;
        rows.push(Array1::from_vec(values));
    }
    Ok(rows)
}

fn csv_open_error(e: csv::Error) -> RecError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => RecError::Io(io),
        other => RecError::CsvParse {
            row: 0,
            message: format!("{other:?}"),
        },
    }
}
