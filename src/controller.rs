//! Feed state controller.
//!
//! Owns everything the reader currently sees: the active category and page,
//! the last fetched page and its remote total, the loading and error state,
//! the local filter criteria, and the favorites set.
//!
//! Navigation commands never perform I/O. They decide whether a fetch is
//! needed and hand back a [`PageRequest`]; the caller runs it (see
//! [`spawn_fetch`]) and feeds the [`PageResponse`] to [`FeedController::apply`].
//! Every request carries a generation number and only the response to the
//! newest request is applied.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::{NewsdeskError, Result};
use crate::domain::{total_pages, Article, Category, Favorites, FeedPage, PageWindow};
use crate::fetcher::Fetcher;
use crate::filter::{self, DateRange, FilterCriteria};
use crate::store::FavoritesStore;

/// A fetch the caller must run on behalf of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub window: PageWindow,
}

impl PageRequest {
    pub async fn execute(self, fetcher: &(dyn Fetcher + Send + Sync)) -> PageResponse {
        let result = fetcher.fetch_page(self.window).await;
        self.respond(result)
    }

    pub fn respond(self, result: Result<FeedPage>) -> PageResponse {
        PageResponse {
            generation: self.generation,
            window: self.window,
            result,
        }
    }
}

#[derive(Debug)]
pub struct PageResponse {
    pub generation: u64,
    pub window: PageWindow,
    pub result: Result<FeedPage>,
}

/// Run `request` on the runtime and deliver the response over `tx`.
pub fn spawn_fetch(
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    request: PageRequest,
    tx: mpsc::UnboundedSender<PageResponse>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let response = request.execute(fetcher.as_ref()).await;
        if tx.send(response).is_err() {
            tracing::debug!("Dropping response for generation {}", request.generation);
        }
    })
}

/// Read-only snapshot for rendering.
pub struct FeedView<'a> {
    /// Current page after local filtering.
    pub articles: Vec<&'a Article>,
    pub loading: bool,
    pub category: Category,
    pub page: u32,
    /// Derived from the unfiltered remote total.
    pub total_pages: u32,
    pub total_results: u32,
    pub error: Option<&'a str>,
    pub criteria: &'a FilterCriteria,
    favorites: &'a Favorites,
}

impl FeedView<'_> {
    pub fn is_favorite(&self, article: &Article) -> bool {
        self.favorites.contains(article.key())
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub struct FeedController<S: FavoritesStore> {
    store: Arc<S>,
    favorites: Favorites,
    window: PageWindow,
    /// Window the displayed articles belong to.
    loaded: Option<PageWindow>,
    generation: u64,
    loading: bool,
    articles: Vec<Article>,
    total_results: u32,
    error: Option<String>,
    criteria: FilterCriteria,
}

impl<S: FavoritesStore> FeedController<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_category(store, Category::default())
    }

    pub fn with_category(store: Arc<S>, category: Category) -> Self {
        let favorites = store.load_or_default();
        tracing::debug!("Loaded {} favorites", favorites.len());

        Self {
            store,
            favorites,
            window: PageWindow::first(category),
            loaded: None,
            generation: 0,
            loading: false,
            articles: Vec::new(),
            total_results: 0,
            error: None,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Page count for the active category. Zero until that category has loaded,
    /// so no page can be selected against another category's total.
    pub fn total_pages(&self) -> u32 {
        match self.loaded {
            Some(loaded) if loaded.category == self.window.category => {
                total_pages(self.total_results)
            }
            _ => 0,
        }
    }

    /// Request the current window again. Used for the first load and for retries.
    pub fn refresh(&mut self) -> PageRequest {
        self.begin_request(self.window)
    }

    pub fn set_category(&mut self, category: Category) -> Option<PageRequest> {
        let window = PageWindow::first(category);
        if window == self.window {
            tracing::debug!("Already on {} page 1", category);
            return None;
        }
        Some(self.begin_request(window))
    }

    /// Like [`set_category`](Self::set_category) for a user-supplied name.
    pub fn select_category(&mut self, name: &str) -> Result<Option<PageRequest>> {
        let category = name.parse::<Category>()?;
        Ok(self.set_category(category))
    }

    /// Move to `page`. Pages outside `1..=total_pages` are rejected, not clamped.
    pub fn set_page(&mut self, page: u32) -> Result<Option<PageRequest>> {
        let total_pages = self.total_pages();
        if page < 1 || page > total_pages {
            return Err(NewsdeskError::InvalidPage { page, total_pages });
        }
        if page == self.window.page {
            return Ok(None);
        }
        Ok(Some(
            self.begin_request(PageWindow::new(self.window.category, page)),
        ))
    }

    pub fn next_page(&mut self) -> Result<Option<PageRequest>> {
        self.set_page(self.window.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Result<Option<PageRequest>> {
        self.set_page(self.window.page.saturating_sub(1))
    }

    /// Filters only narrow the page already fetched; they never trigger a fetch.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.criteria.date_range = range;
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    /// Save or unsave `article` and persist the whole set.
    /// Returns whether the article is a favorite afterwards.
    pub fn toggle_favorite(&mut self, article: &Article) -> bool {
        let now_favorite = self.favorites.toggle(article);
        if let Err(e) = self.store.save_favorites(&self.favorites) {
            tracing::warn!("Failed to persist favorites: {}", e);
        }
        now_favorite
    }

    pub fn is_favorite(&self, article: &Article) -> bool {
        self.favorites.contains(article.key())
    }

    /// Apply a fetch result. Returns false if the response was superseded.
    pub fn apply(&mut self, response: PageResponse) -> bool {
        if response.generation != self.generation {
            tracing::debug!(
                "Discarding stale response for {} page {} (generation {}, current {})",
                response.window.category,
                response.window.page,
                response.generation,
                self.generation
            );
            return false;
        }

        self.loading = false;
        match response.result {
            Ok(page) => {
                tracing::info!(
                    "Loaded {} articles for {} page {} ({} total)",
                    page.articles.len(),
                    response.window.category,
                    response.window.page,
                    page.total_results
                );
                self.articles = page.articles;
                self.total_results = page.total_results;
                self.loaded = Some(response.window);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load {} page {}: {}",
                    response.window.category,
                    response.window.page,
                    e
                );
                // Keep the last good page on screen and point the controls back at it
                if let Some(loaded) = self.loaded {
                    self.window = loaded;
                }
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn view(&self) -> FeedView<'_> {
        FeedView {
            articles: self
                .articles
                .iter()
                .filter(|a| filter::include(a, &self.criteria))
                .collect(),
            loading: self.loading,
            category: self.window.category,
            page: self.window.page,
            total_pages: self.total_pages(),
            total_results: self.total_results,
            error: self.error.as_deref(),
            criteria: &self.criteria,
            favorites: &self.favorites,
        }
    }

    fn begin_request(&mut self, window: PageWindow) -> PageRequest {
        self.generation += 1;
        self.window = window;
        self.loading = true;
        self.error = None;
        tracing::debug!(
            "Requesting {} page {} (generation {})",
            window.category,
            window.page,
            self.generation
        );
        PageRequest {
            generation: self.generation,
            window,
        }
    }
}
