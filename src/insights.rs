//! Aggregate views over the restaurant table.
//!
//! Everything here is a full-table scan returning a small summary; the
//! caller renders the numbers however it likes.

use hashbrown::HashMap;

use crate::dataset::Dataset;

/// One bucket of a cost histogram. The range is `[lo, hi)` except for the
/// last bucket, which also includes the maximum cost.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lo: f32,
    pub hi: f32,
    pub count: usize,
}

/// Row indices of the `n` highest-rated restaurants, ties in row order.
pub fn top_rated(dataset: &Dataset, n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..dataset.len()).collect();
    indices.sort_by(|&a, &b| {
        let ra = dataset.restaurants()[a].rating;
        let rb = dataset.restaurants()[b].rating;
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(n);
    indices
}

/// Restaurant count per city, most numerous first; ties alphabetical.
pub fn city_counts(dataset: &Dataset) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in dataset.restaurants() {
        *counts.entry(r.city.as_str()).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(city, n)| (city.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Cuisine string frequency, most common first; ties alphabetical.
///
/// Counts the stored cuisine text verbatim; multi-valued strings count as
/// one entry, matching the dashboard this reimplements.
pub fn cuisine_counts(dataset: &Dataset) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in dataset.restaurants() {
        *counts.entry(r.cuisine.as_str()).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(cuisine, n)| (cuisine.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Mean rating per city, highest first; ties alphabetical.
pub fn avg_rating_by_city(dataset: &Dataset) -> Vec<(String, f32)> {
    let mut sums: HashMap<&str, (f32, usize)> = HashMap::new();
    for r in dataset.restaurants() {
        let entry = sums.entry(r.city.as_str()).or_insert((0.0, 0));
        entry.0 += r.rating;
        entry.1 += 1;
    }
    let mut out: Vec<(String, f32)> = sums
        .into_iter()
        .map(|(city, (sum, n))| (city.to_string(), sum / n as f32))
        .collect();
    out.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    out
}

/// Equal-width histogram of the cost column.
///
/// Returns an empty vector for an empty dataset or `bins == 0`. When every
/// row has the same cost, everything lands in one bucket.
pub fn cost_histogram(dataset: &Dataset, bins: usize) -> Vec<HistogramBin> {
    if dataset.is_empty() || bins == 0 {
        return Vec::new();
    }

    let costs: Vec<f32> = dataset.restaurants().iter().map(|r| r.cost).collect();
    let min = costs.iter().copied().fold(f32::INFINITY, f32::min);
    let max = costs.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    if min == max {
        return vec![HistogramBin {
            lo: min,
            hi: max,
            count: costs.len(),
        }];
    }

    let width = (max - min) / bins as f32;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lo: min + width * i as f32,
            hi: min + width * (i + 1) as f32,
            count: 0,
        })
        .collect();

    for cost in costs {
        let i = (((cost - min) / width) as usize).min(bins - 1);
        out[i].count += 1;
    }
    out
}

/// "Best value" rows: rating strictly above `min_rating`, cheapest first,
/// limited to `n`. Ties on cost keep row order.
pub fn best_value(dataset: &Dataset, min_rating: f32, n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..dataset.len())
        .filter(|&i| dataset.restaurants()[i].rating > min_rating)
        .collect();
    indices.sort_by(|&a, &b| {
        let ca = dataset.restaurants()[a].cost;
        let cb = dataset.restaurants()[b].cost;
        ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(n);
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Restaurant;
    use ndarray::Array1;

    fn fixture() -> Dataset {
        let rows = vec![
            ("A", "Pune", "Cafe", 4.5, 200.0),
            ("B", "Delhi", "Mughlai", 3.8, 400.0),
            ("C", "Pune", "Cafe", 4.1, 100.0),
            ("D", "Delhi", "Chinese", 4.1, 300.0),
            ("E", "Pune", "Italian", 4.9, 600.0),
        ];
        let restaurants = rows
            .into_iter()
            .map(|(name, city, cuisine, rating, cost)| Restaurant {
                name: name.into(),
                city: city.into(),
                cuisine: cuisine.into(),
                rating,
                cost,
            })
            .collect::<Vec<_>>();
        let encoded = (0..restaurants.len())
            .map(|i| Array1::from_vec(vec![i as f32]))
            .collect();
        Dataset::from_parts(restaurants, encoded).unwrap()
    }

    #[test]
    fn test_top_rated_order_and_ties() {
        let ds = fixture();
        // Ratings: 4.5, 3.8, 4.1, 4.1, 4.9 -> E, A, then C before D (tie).
        assert_eq!(top_rated(&ds, 4), vec![4, 0, 2, 3]);
    }

    #[test]
    fn test_city_counts() {
        let ds = fixture();
        assert_eq!(
            city_counts(&ds),
            vec![("Pune".to_string(), 3), ("Delhi".to_string(), 2)]
        );
    }

    #[test]
    fn test_cuisine_counts_order_and_ties() {
        let ds = fixture();
        // "Cafe" appears twice; the singletons tie and order alphabetically.
        assert_eq!(
            cuisine_counts(&ds),
            vec![
                ("Cafe".to_string(), 2),
                ("Chinese".to_string(), 1),
                ("Italian".to_string(), 1),
                ("Mughlai".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_avg_rating_by_city() {
        let ds = fixture();
        let got = avg_rating_by_city(&ds);
        assert_eq!(got[0].0, "Pune");
        assert!((got[0].1 - 4.5).abs() < 1e-5);
        assert_eq!(got[1].0, "Delhi");
        assert!((got[1].1 - 3.95).abs() < 1e-5);
    }

    #[test]
    fn test_cost_histogram_counts_everything() {
        let ds = fixture();
        let bins = cost_histogram(&ds, 5);
        assert_eq!(bins.len(), 5);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, ds.len());
        // Max cost (600) lands in the last bucket.
        assert!(bins.last().unwrap().count >= 1);
    }

    #[test]
    fn test_cost_histogram_degenerate() {
        let ds = fixture();
        assert!(cost_histogram(&ds, 0).is_empty());

        let uniform = Dataset::from_parts(
            vec![
                Restaurant {
                    name: "A".into(),
                    city: "Pune".into(),
                    cuisine: "Cafe".into(),
                    rating: 4.0,
                    cost: 250.0,
                },
                Restaurant {
                    name: "B".into(),
                    city: "Pune".into(),
                    cuisine: "Cafe".into(),
                    rating: 4.0,
                    cost: 250.0,
                },
            ],
            vec![Array1::from_vec(vec![0.0]), Array1::from_vec(vec![1.0])],
        )
        .unwrap();
        let bins = cost_histogram(&uniform, 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
    }

    #[test]
    fn test_best_value() {
        let ds = fixture();
        // rating > 4.0: A (200), C (100), D (300), E (600); cheapest first.
        assert_eq!(best_value(&ds, 4.0, 3), vec![2, 0, 3]);
    }
}
