pub mod sqlite;

use crate::app::Result;
use crate::domain::Favorites;

pub use sqlite::SqliteStore;

/// Durable home of the favorites set.
pub trait FavoritesStore {
    /// Read the saved set. `Ok(None)` means nothing has been saved yet.
    fn load_favorites(&self) -> Result<Option<Favorites>>;

    /// Replace the saved set.
    fn save_favorites(&self, favorites: &Favorites) -> Result<()>;

    /// Fail-soft load: missing or unreadable data yields an empty set.
    fn load_or_default(&self) -> Favorites {
        match self.load_favorites() {
            Ok(Some(favorites)) => favorites,
            Ok(None) => Favorites::new(),
            Err(e) => {
                tracing::warn!("Failed to load favorites, starting empty: {}", e);
                Favorites::new()
            }
        }
    }
}
