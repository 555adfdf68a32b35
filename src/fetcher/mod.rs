pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{FeedPage, PageWindow};

pub use http_fetcher::HttpFetcher;

/// Source of headline pages.
#[async_trait]
pub trait Fetcher {
    /// Fetch one page of the listing for `window.category`.
    async fn fetch_page(&self, window: PageWindow) -> Result<FeedPage>;
}
