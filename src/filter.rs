//! Conjunctive predicate filtering over the restaurant table.
//!
//! Matching semantics are intentionally uneven, preserved from the system
//! this crate reimplements: city is exact and case-sensitive as stored,
//! cuisine is a case-insensitive substring match (the cuisine field is
//! free-form, possibly multi-valued text).

use crate::dataset::{Dataset, Restaurant};

/// An optional set of restaurant predicates, combined with AND.
///
/// Every predicate defaults to "no constraint" (the "All" choice of a
/// dropdown). Built fluently:
///
/// ```
/// use plateful::RestaurantFilter;
///
/// let filter = RestaurantFilter::new()
///     .budget(300.0)
///     .city("Pune")
///     .cuisine("chinese");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFilter {
    budget: Option<f32>,
    city: Option<String>,
    cuisine: Option<String>,
}

impl RestaurantFilter {
    /// A filter with no constraints; matches every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows with `cost <= budget`.
    pub fn budget(mut self, budget: f32) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Keep rows whose city equals `city` exactly (case-sensitive).
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Keep rows whose cuisine text contains `cuisine`, case-insensitively.
    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// True when no predicate is set.
    pub fn is_unconstrained(&self) -> bool {
        self.budget.is_none() && self.city.is_none() && self.cuisine.is_none()
    }

    /// Whether a single row passes every set predicate.
    pub fn matches(&self, r: &Restaurant) -> bool {
        if let Some(budget) = self.budget {
            if r.cost > budget {
                return false;
            }
        }
        if let Some(ref city) = self.city {
            if r.city != *city {
                return false;
            }
        }
        if let Some(ref cuisine) = self.cuisine {
            if !r.cuisine.to_lowercase().contains(&cuisine.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Apply the filter over the whole dataset.
    ///
    /// Returns matching row indices in dataset order. No match is an empty
    /// result, never an error. Pure function of its inputs: identical
    /// arguments over unchanged data yield identical output.
    pub fn apply(&self, dataset: &Dataset) -> Vec<usize> {
        dataset
            .restaurants()
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect()
    }
}
