//! Basic usage of `plateful`.
//!
//! Demonstrates building a dataset, the recommender builder, similarity
//! lookup, filtering, regression-based recommendations, session favorites,
//! insights, and metrics.
//!
//! Run with:
//!   cargo run --example basic_usage

use ndarray::Array1;
use plateful::{insights, Dataset, Recommender, Restaurant, RestaurantFilter, Session};

fn main() {
    // ---------------------------------------------------------------
    // 1. Build a small in-memory dataset.
    // ---------------------------------------------------------------
    println!("=== Step 1: Build the dataset ===");
    let rows = vec![
        ("Dosa Corner", "Pune", "South Indian", 4.2, 50.0),
        ("Wok This Way", "Delhi", "Chinese, Thai", 4.0, 100.0),
        ("La Piazza", "Pune", "Italian", 4.5, 150.0),
        ("Cafe X", "Mumbai", "Cafe, Continental", 3.8, 80.0),
        ("Biryani House", "Delhi", "Mughlai, North Indian", 4.6, 220.0),
        ("Thali Express", "Pune", "North Indian, Thali", 4.1, 120.0),
    ];
    let restaurants: Vec<Restaurant> = rows
        .into_iter()
        .map(|(name, city, cuisine, rating, cost)| Restaurant {
            name: name.into(),
            city: city.into(),
            cuisine: cuisine.into(),
            rating,
            cost,
        })
        .collect();
    let encoded = vec![
        Array1::from_vec(vec![1.0, 0.0, 0.1, 0.3]),
        Array1::from_vec(vec![0.0, 1.0, 0.2, 0.6]),
        Array1::from_vec(vec![0.9, 0.1, 0.3, 0.9]),
        Array1::from_vec(vec![0.2, 0.8, 0.1, 0.5]),
        Array1::from_vec(vec![0.1, 0.2, 1.0, 1.0]),
        Array1::from_vec(vec![0.8, 0.1, 0.6, 0.4]),
    ];

    let dataset = Dataset::from_parts(restaurants, encoded).expect("aligned tables");
    println!("Loaded {} rows, {} features each.\n", dataset.len(), dataset.dim());

    // For file-backed data this would be:
    //   Dataset::load_csv("restaurants.csv", "encoded.csv")

    // ---------------------------------------------------------------
    // 2. Build the recommender.
    // ---------------------------------------------------------------
    println!("=== Step 2: Build the recommender ===");
    let rec = Recommender::builder()
        .default_neighbors(3)
        .default_ranking_size(4)
        .ridge_penalty(1e-2)
        .enable_metrics()
        .build(dataset)
        .expect("valid configuration");
    println!("{rec:?}\n");

    // ---------------------------------------------------------------
    // 3. Find restaurants similar to a searched one.
    // ---------------------------------------------------------------
    println!("=== Step 3: Similar restaurants ===");
    let matches = rec.dataset().search_by_name("dosa");
    let selected = matches[0];
    println!("Query matched: {}", rec.dataset().restaurant(selected).unwrap().name);

    for n in rec.find_similar(selected).expect("valid row") {
        let r = rec.dataset().restaurant(n.index).unwrap();
        println!("  {:<16} similarity={:.3}", r.name, n.score);
    }
    println!();

    // ---------------------------------------------------------------
    // 4. Smart finder: budget + city + cuisine.
    // ---------------------------------------------------------------
    println!("=== Step 4: Filtered browse ===");
    let filter = RestaurantFilter::new().budget(150.0).city("Pune").cuisine("indian");
    for i in rec.filter(&filter) {
        let r = rec.dataset().restaurant(i).unwrap();
        println!("  {:<16} {} Rs.{}", r.name, r.city, r.cost);
    }
    println!();

    // ---------------------------------------------------------------
    // 5. Regression-based recommendations.
    // ---------------------------------------------------------------
    println!("=== Step 5: Predicted top picks ===");
    for ranked in rec.recommend_top().expect("fit succeeds") {
        let r = rec.dataset().restaurant(ranked.index).unwrap();
        println!("  {:<16} predicted={:.2} actual={:.1}", r.name, ranked.predicted, r.rating);
    }
    println!();

    // ---------------------------------------------------------------
    // 6. Session favorites.
    // ---------------------------------------------------------------
    println!("=== Step 6: Favorites ===");
    let session = Session::new();
    session.add_favorite("La Piazza");
    session.add_favorite("Biryani House");
    for i in session.list_favorites(rec.dataset()) {
        println!("  {}", rec.dataset().restaurant(i).unwrap().name);
    }
    println!();

    // ---------------------------------------------------------------
    // 7. Insights.
    // ---------------------------------------------------------------
    println!("=== Step 7: Insights ===");
    println!("Restaurants per city:");
    for (city, n) in insights::city_counts(rec.dataset()) {
        println!("  {city:<8} {n}");
    }
    println!("Average rating by city:");
    for (city, avg) in insights::avg_rating_by_city(rec.dataset()) {
        println!("  {city:<8} {avg:.2}");
    }
    println!("Best value (rating > 4.0, cheapest first):");
    for i in insights::best_value(rec.dataset(), 4.0, 3) {
        let r = rec.dataset().restaurant(i).unwrap();
        println!("  {:<16} {:.1}* Rs.{}", r.name, r.rating, r.cost);
    }
    println!();

    // ---------------------------------------------------------------
    // 8. Metrics snapshot.
    // ---------------------------------------------------------------
    println!("=== Step 8: Metrics ===");
    println!("{}", rec.metrics().expect("metrics enabled"));
}
