//! # Newsdesk
//!
//! A terminal reader for top headlines from a paginated news API.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → FeedController → Filter → UI
//!                 ↕
//!         FavoritesStore (SQLite)
//! ```
//!
//! The controller owns all browsing state. Remote page loads are issued as
//! [`PageRequest`](controller::PageRequest)s tagged with a generation, and a
//! response is only applied while its generation is still the newest one.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! newsdesk
//!
//! # Print the second page of technology headlines mentioning "rust"
//! newsdesk headlines --category technology --page 2 --search rust
//!
//! # List saved articles
//! newsdesk favorites
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the config,
/// favorites store and fetcher.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `headlines` - Print one page of headlines
/// - `favorites` - List saved articles
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/newsdesk/config.toml`, supporting:
/// - API endpoint, key and timeout
/// - Theme and search debounce
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Browsing state: category, page, filters, favorites and loading status.
pub mod controller;

/// Core domain models.
///
/// - [`Article`](domain::Article): One headline as returned by the API
/// - [`Category`](domain::Category): Fixed set of headline categories
/// - [`Favorites`](domain::Favorites): Saved articles keyed by title
/// - [`PageWindow`](domain::PageWindow): Which remote page is being viewed
pub mod domain;

/// Remote page loading.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for loading one page of headlines
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Client-side search and date filtering of the loaded page.
pub mod filter;

/// Favorites persistence.
///
/// - [`FavoritesStore`](store::FavoritesStore): Load/save trait
/// - [`SqliteStore`](store::SqliteStore): SQLite key-value implementation
pub mod store;

/// Terminal user interface built with ratatui.
pub mod tui;
