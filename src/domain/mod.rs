pub mod article;
pub mod category;
pub mod favorites;
pub mod page;

pub use article::{Article, Source};
pub use category::Category;
pub use favorites::Favorites;
pub use page::{total_pages, FeedPage, PageWindow, PAGE_SIZE};
