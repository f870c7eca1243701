pub mod history;
pub mod reducer;
pub mod session;
pub mod sort;

pub use reducer::{StoriesAction, StoriesState};
pub use session::SearchSession;
pub use sort::{SortKey, SortState};
