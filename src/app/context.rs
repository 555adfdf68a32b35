use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{NewsdeskError, Result};
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::store::SqliteStore;

pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<SqliteStore>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };
        tracing::debug!("Opening favorites database at {}", db_path.display());

        let store = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::with_store(config, store)
    }

    fn with_store(config: Config, store: Arc<SqliteStore>) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.api)?);

        Ok(Self {
            config: Arc::new(config),
            store,
            fetcher,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| NewsdeskError::Config("Could not find data directory".into()))?;
        let app_dir = data_dir.join("newsdesk");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("newsdesk.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FavoritesStore;

    #[test]
    fn test_in_memory_context() {
        let ctx = AppContext::in_memory(Config::default()).unwrap();
        assert!(ctx.store.load_favorites().unwrap().is_none());
        assert_eq!(ctx.config.api.country, "us");
    }

    #[test]
    fn test_context_with_explicit_db_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.db");
        let _ctx = AppContext::new(Config::default(), Some(path.clone())).unwrap();
        assert!(path.exists());
    }
}
