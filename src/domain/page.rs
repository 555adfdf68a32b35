use crate::domain::{Article, Category};

pub const PAGE_SIZE: u32 = 10;

/// One remote fetch unit: a category and a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub category: Category,
    pub page: u32,
}

impl PageWindow {
    pub fn new(category: Category, page: u32) -> Self {
        Self { category, page }
    }

    pub fn first(category: Category) -> Self {
        Self::new(category, 1)
    }

    pub fn page_size(&self) -> u32 {
        PAGE_SIZE
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::first(Category::default())
    }
}

/// A page of articles together with the remote total for the whole listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    pub articles: Vec<Article>,
    pub total_results: u32,
}

pub fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}
