use crate::net::api::Story;

/// Events the result accumulator advances on.
///
/// This is the complete event set; dispatching anything else is a compile
/// error, so there is no runtime "unknown action" branch.
#[derive(Debug, Clone)]
pub enum StoriesAction {
    FetchInit,
    FetchSuccess { list: Vec<Story>, page: u32 },
    FetchFailure,
    RemoveStory(Story),
}

/// Accumulated result state for the current session.
///
/// `is_loading` and `is_error` are never both true after a transition
/// completes. `data` grows page by page, loses individual entries on removal,
/// and is wholesale-replaced only when a page-0 result arrives.
#[derive(Debug, Clone, Default)]
pub struct StoriesState {
    pub data: Vec<Story>,
    pub page: u32,
    pub is_loading: bool,
    pub is_error: bool,
}

impl StoriesState {
    pub fn apply(&mut self, action: StoriesAction) {
        match action {
            StoriesAction::FetchInit => {
                self.is_loading = true;
                self.is_error = false;
            }
            StoriesAction::FetchSuccess { list, page } => {
                if page == 0 {
                    self.data = list;
                } else {
                    // Later pages append in arrival order; the caller must
                    // not fetch the same page twice.
                    self.data.extend(list);
                }
                self.page = page;
                self.is_loading = false;
                self.is_error = false;
            }
            StoriesAction::FetchFailure => {
                self.is_loading = false;
                self.is_error = true;
            }
            StoriesAction::RemoveStory(story) => {
                self.data.retain(|s| s.object_id != story.object_id);
            }
        }
    }

    /// Comment count summed over every accumulated story.
    pub fn total_comments(&self) -> u32 {
        self.data.iter().map(|story| story.num_comments).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story_one() -> Story {
        Story {
            object_id: "0".to_string(),
            title: "React".to_string(),
            url: "https://reactjs.org/".to_string(),
            author: "Jordan Walke".to_string(),
            num_comments: 3,
            points: 4,
        }
    }

    fn story_two() -> Story {
        Story {
            object_id: "1".to_string(),
            title: "Redux".to_string(),
            url: "https://redux.js.org/".to_string(),
            author: "Dan Abramov, Andrew Clark".to_string(),
            num_comments: 2,
            points: 5,
        }
    }

    #[test]
    fn test_fetch_init_sets_loading() {
        let mut state = StoriesState::default();
        state.is_error = true;

        state.apply(StoriesAction::FetchInit);

        assert!(state.is_loading);
        assert!(!state.is_error);
    }

    #[test]
    fn test_page_zero_replaces_data() {
        let mut state = StoriesState {
            data: vec![story_one()],
            page: 2,
            is_loading: true,
            is_error: false,
        };

        state.apply(StoriesAction::FetchSuccess {
            list: vec![story_two()],
            page: 0,
        });

        assert_eq!(state.data, vec![story_two()]);
        assert_eq!(state.page, 0);
        assert!(!state.is_loading);
        assert!(!state.is_error);
    }

    #[test]
    fn test_later_pages_append_in_order() {
        let mut state = StoriesState::default();
        state.apply(StoriesAction::FetchSuccess {
            list: vec![story_one()],
            page: 0,
        });
        state.apply(StoriesAction::FetchSuccess {
            list: vec![story_two()],
            page: 1,
        });

        assert_eq!(state.data, vec![story_one(), story_two()]);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state = StoriesState::default();
        state.apply(StoriesAction::FetchSuccess {
            list: vec![story_one(), story_two()],
            page: 0,
        });

        state.apply(StoriesAction::FetchInit);
        state.apply(StoriesAction::FetchFailure);

        assert!(state.is_error);
        assert!(!state.is_loading);
        assert_eq!(state.data, vec![story_one(), story_two()]);
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_removes_a_story_from_all_stories() {
        let mut state = StoriesState {
            data: vec![story_one(), story_two()],
            page: 0,
            is_loading: false,
            is_error: false,
        };

        state.apply(StoriesAction::RemoveStory(story_one()));

        assert_eq!(state.data, vec![story_two()]);
        assert!(!state.is_loading);
        assert!(!state.is_error);
    }

    #[test]
    fn test_remove_matches_every_duplicate_id() {
        let mut dupe = story_two();
        dupe.object_id = story_one().object_id.clone();

        let mut state = StoriesState {
            data: vec![story_one(), story_two(), dupe],
            page: 1,
            is_loading: false,
            is_error: false,
        };

        state.apply(StoriesAction::RemoveStory(story_one()));

        assert_eq!(state.data, vec![story_two()]);
    }

    #[test]
    fn test_total_comments() {
        let mut state = StoriesState::default();
        assert_eq!(state.total_comments(), 0);

        state.apply(StoriesAction::FetchSuccess {
            list: vec![story_one(), story_two()],
            page: 0,
        });
        assert_eq!(state.total_comments(), 5);
    }
}
