//! Session-scoped favorites.
//!
//! Favorites live inside a [`Session`] value injected by the caller, never
//! in process-wide state, so concurrent user sessions cannot see each
//! other's lists. A session holds its favorites for its own lifetime and
//! drops them with it; nothing is persisted.

use hashbrown::HashSet;
use parking_lot::RwLock;

use crate::dataset::Dataset;

#[derive(Default)]
struct FavoritesInner {
    // Insertion order for display, set for dedup.
    order: Vec<String>,
    seen: HashSet<String>,
}

/// One user session.
///
/// Interior mutability lets a shared handle (e.g. `Arc<Session>` cloned
/// into UI callbacks) add favorites through `&self`.
#[derive(Default)]
pub struct Session {
    favorites: RwLock<FavoritesInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("favorites", &self.favorites.read().order.len())
            .finish()
    }
}

impl Session {
    /// A fresh session with an empty favorites list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a restaurant name as a favorite.
    ///
    /// Returns `true` if the name was newly added, `false` if it was
    /// already present (duplicates are ignored).
    pub fn add_favorite(&self, name: impl Into<String>) -> bool {
        let name = name.into();
        let mut inner = self.favorites.write();
        if inner.seen.insert(name.clone()) {
            inner.order.push(name);
            true
        } else {
            false
        }
    }

    /// Favorite names in the order they were first added.
    pub fn favorites(&self) -> Vec<String> {
        self.favorites.read().order.clone()
    }

    /// Number of distinct favorites.
    pub fn favorite_count(&self) -> usize {
        self.favorites.read().order.len()
    }

    /// Rows whose name was added as a favorite, in dataset order.
    ///
    /// Names with no matching row are silently skipped; an empty list is
    /// the "no favorites yet" condition, not an error.
    pub fn list_favorites(&self, dataset: &Dataset) -> Vec<usize> {
        let inner = self.favorites.read();
        dataset
            .restaurants()
            .iter()
            .enumerate()
            .filter(|(_, r)| inner.seen.contains(&r.name))
            .map(|(i, _)| i)
            .collect()
    }

    /// Forget every favorite in this session.
    pub fn clear_favorites(&self) {
        let mut inner = self.favorites.write();
        inner.order.clear();
        inner.seen.clear();
    }
}
