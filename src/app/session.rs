use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use super::history;
use super::reducer::{StoriesAction, StoriesState};
use crate::net::api::{self, Story};
use crate::net::{FetchOutcome, StoryFetcher};
use crate::storage::TermStore;

/// Search term used when nothing has been persisted yet.
pub const DEFAULT_TERM: &str = "React";

/// The search-session state engine.
///
/// Owns the append-only log of issued request URLs, the accumulated result
/// state, and the persisted term store. Every fetch task reports back on a
/// single shared channel; `poll_outcomes` drains it in arrival order, so a
/// stale response that completes after a newer one overwrites it. That race
/// is part of the contract, there is no request-sequence guard.
pub struct SearchSession {
    api_base: String,
    active_term: String,
    urls: Vec<String>,
    stories: StoriesState,
    store: TermStore,
    fetcher: StoryFetcher,
    runtime: Runtime,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl SearchSession {
    /// Creates a session and issues the seed request for the persisted term
    /// (or [`DEFAULT_TERM`] on first run).
    pub fn new(api_base: String, store: TermStore) -> Self {
        let runtime = Runtime::new().expect("Failed to create Tokio runtime");
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let active_term = store.read(DEFAULT_TERM);

        let mut session = Self {
            api_base,
            active_term: active_term.clone(),
            urls: Vec::new(),
            stories: StoriesState::default(),
            store,
            fetcher: StoryFetcher::new(),
            runtime,
            outcome_tx,
            outcome_rx,
        };
        session.issue(&active_term, 0);
        session
    }

    /// Starts a new search for `term`, page 0. The term becomes the active
    /// term and is persisted.
    pub fn submit_search(&mut self, term: &str) {
        self.set_active_term(term);
        self.issue(term, 0);
    }

    /// Re-runs a term picked from the recent-search list. Same effect as
    /// submitting it by hand.
    pub fn revisit_history_term(&mut self, term: &str) {
        self.submit_search(term);
    }

    /// Fetches the next page of the most recently issued search.
    ///
    /// Callers should wait for the current fetch to settle first; nothing
    /// here blocks a load-more while one is in flight.
    pub fn load_more(&mut self) {
        let last_url = self
            .urls
            .last()
            .expect("URL log is seeded at construction");
        let term = api::extract_term(last_url).to_string();
        self.issue(&term, self.stories.page + 1);
    }

    /// Removes every accumulated story with the given id. No network effect.
    pub fn remove_story(&mut self, story: Story) {
        self.stories.apply(StoriesAction::RemoveStory(story));
    }

    /// Drains completed fetch outcomes without blocking, applying each in
    /// arrival order.
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    pub fn active_term(&self) -> &str {
        &self.active_term
    }

    pub fn stories(&self) -> &StoriesState {
        &self.stories
    }

    pub fn is_loading(&self) -> bool {
        self.stories.is_loading
    }

    pub fn is_error(&self) -> bool {
        self.stories.is_error
    }

    /// Recent distinct search terms, excluding the active one. Recomputed
    /// from the URL log on every call.
    pub fn last_searches(&self) -> Vec<String> {
        history::last_searches(&self.urls)
    }

    fn set_active_term(&mut self, term: &str) {
        if term == self.active_term {
            return;
        }
        self.active_term = term.to_string();
        self.store.write(term);
    }

    /// Appends one URL to the log and triggers exactly one fetch for it.
    fn issue(&mut self, term: &str, page: u32) {
        let url = api::build_url(&self.api_base, term, page);
        self.urls.push(url.clone());

        self.stories.apply(StoriesAction::FetchInit);
        let tx = self.outcome_tx.clone();
        let fetcher = &self.fetcher;
        self.runtime.block_on(async move {
            fetcher.fetch(&url, tx);
        });
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Success { hits, page } => {
                self.stories
                    .apply(StoriesAction::FetchSuccess { list: hits, page });
            }
            FetchOutcome::Error { .. } => {
                self.stories.apply(StoriesAction::FetchFailure);
            }
        }
    }
}
