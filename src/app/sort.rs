use crate::net::api::Story;

/// Column the displayed list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    Title,
    Author,
    Comments,
    Points,
}

impl SortKey {
    /// Parses a column name as typed by the user.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" => Some(SortKey::None),
            "title" => Some(SortKey::Title),
            "author" => Some(SortKey::Author),
            "comments" => Some(SortKey::Comments),
            "points" => Some(SortKey::Points),
            _ => None,
        }
    }
}

/// Display-only sort selection. The engine's story order is never touched;
/// sorting works on a copy at render time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortState {
    pub key: SortKey,
    pub is_reverse: bool,
}

impl SortState {
    /// Selects a column; selecting the active column again flips direction.
    pub fn select(&mut self, key: SortKey) {
        self.is_reverse = self.key == key && !self.is_reverse;
        self.key = key;
    }

    pub fn apply(&self, list: &[Story]) -> Vec<Story> {
        let mut sorted = list.to_vec();
        match self.key {
            SortKey::None => {}
            SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
            SortKey::Author => {
                sorted.sort_by_key(|story| story.author.to_lowercase());
            }
            SortKey::Comments => {
                sorted.sort_by_key(|story| story.num_comments);
                sorted.reverse();
            }
            SortKey::Points => {
                sorted.sort_by_key(|story| story.points);
                sorted.reverse();
            }
        }
        if self.is_reverse {
            sorted.reverse();
        }
        sorted
    }
}
