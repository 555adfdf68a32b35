use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::{NewsdeskError, Result};
use crate::domain::Favorites;
use crate::store::FavoritesStore;

pub const FAVORITES_KEY: &str = "favorites";

/// Key-value store on SQLite. Values are opaque text.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| NewsdeskError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            NewsdeskError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl FavoritesStore for SqliteStore {
    fn load_favorites(&self) -> Result<Option<Favorites>> {
        match self.get(FAVORITES_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save_favorites(&self, favorites: &Favorites) -> Result<()> {
        let raw = serde_json::to_string(favorites)?;
        self.set(FAVORITES_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Article;

    fn sample_favorites() -> Favorites {
        let mut first = Article::new("Alpha Report");
        first.description = Some("Quarterly numbers".into());
        first.published_at = Some("2024-01-02T00:00:00Z".into());
        let mut second = Article::new("Beta News");
        second.url = Some("https://example.com/beta".into());
        Favorites::from_articles(vec![first, second])
    }

    #[test]
    fn test_get_missing_key() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let store = SqliteStore::in_memory().unwrap();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_load_without_saved_data() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.load_favorites().unwrap().is_none());
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_save_and_load_favorites() {
        let store = SqliteStore::in_memory().unwrap();
        let favorites = sample_favorites();
        store.save_favorites(&favorites).unwrap();

        let loaded = store.load_favorites().unwrap().unwrap();
        assert_eq!(loaded, favorites);
        assert_eq!(
            loaded.get("Alpha Report").unwrap().description.as_deref(),
            Some("Quarterly numbers")
        );
    }

    #[test]
    fn test_save_of_load_is_noop_on_stored_value() {
        let store = SqliteStore::in_memory().unwrap();
        store.save_favorites(&sample_favorites()).unwrap();
        let before = store.get(FAVORITES_KEY).unwrap().unwrap();

        let loaded = store.load_or_default();
        store.save_favorites(&loaded).unwrap();

        let after = store.get(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        let store = SqliteStore::in_memory().unwrap();
        store.set(FAVORITES_KEY, "{not json").unwrap();

        assert!(store.load_favorites().is_err());
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_stored_duplicates_collapse() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .set(
                FAVORITES_KEY,
                r#"[{"title":"Same","author":"first"},{"title":"Same","author":"second"}]"#,
            )
            .unwrap();

        let loaded = store.load_or_default();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("Same").unwrap().author.as_deref(), Some("first"));
    }

    #[test]
    fn test_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newsdesk.db");

        {
            let store = SqliteStore::new(&path).unwrap();
            store.save_favorites(&sample_favorites()).unwrap();
        }

        let store = SqliteStore::new(&path).unwrap();
        assert_eq!(store.load_or_default(), sample_favorites());
    }
}
