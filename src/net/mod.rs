pub mod api;
pub mod fetcher;

pub use api::{SearchResponse, Story};
pub use fetcher::{FetchOutcome, StoryFetcher};
