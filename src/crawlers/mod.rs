pub mod crawler;
pub mod runner;
pub mod web;

pub use crawler::PageFetcher;
pub use runner::{PageRunner, SearchQuery};
pub use web::WebDriverFetcher;
