//! Observable state of the dog image component
//!
//! Three fields live here: the current image URL, the loading flag and the
//! last error message. They only change through the three phases of a fetch:
//! `begin` (start), then `finish` with either a URL (success) or an error
//! (failure).

use tracing::debug;

use crate::error::FetchError;

/// Identifies one issued fetch within a component instance
///
/// Ids grow by one for every `begin`, so a larger id is always a newer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What to do when fetches overlap and their responses come back out of order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Every response is applied as it arrives; whichever lands last wins
    #[default]
    LastResponseWins,
    /// Only the response of the most recently issued request is applied
    LatestRequestWins,
}

/// What `finish` did with a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The image URL was replaced
    Loaded(String),
    /// The error message was set
    Failed(String),
    /// A newer request is pending, nothing changed
    Stale,
}

/// Image URL, loading flag and error message of one mounted component
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    image: Option<String>,
    loading: bool,
    error: Option<String>,
    /// Last id handed out by `begin` (0 = nothing issued yet)
    issued: u64,
    policy: OverlapPolicy,
}

impl FetchState {
    /// Fresh state: no image, not loading, no error
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Id of the most recently issued request, if any
    pub fn latest_request(&self) -> Option<RequestId> {
        (self.issued > 0).then_some(RequestId(self.issued))
    }

    /// Start phase: mark loading and clear the old error
    ///
    /// The image is left alone so the previous picture stays on screen while
    /// the next one is on its way.
    pub fn begin(&mut self) -> RequestId {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        RequestId(self.issued)
    }

    /// Success or failure phase for the request `id`
    ///
    /// On success the image URL is replaced and the error cleared; on failure
    /// only the error message is set. Either way loading ends. Under
    /// `OverlapPolicy::LatestRequestWins` a response for anything but the
    /// latest request is dropped and leaves the state untouched.
    pub fn finish(&mut self, id: RequestId, result: Result<String, FetchError>) -> Outcome {
        if self.policy == OverlapPolicy::LatestRequestWins && id.0 != self.issued {
            debug!(request = id.0, latest = self.issued, "dropping response of a superseded request");
            return Outcome::Stale;
        }

        self.loading = false;

        match result {
            Ok(url) => {
                self.image = Some(url.clone());
                self.error = None;
                Outcome::Loaded(url)
            }
            Err(err) => {
                let message = err.to_string();
                self.error = Some(message.clone());
                Outcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOG1: &str = "https://example.com/dog1.jpg";
    const DOG2: &str = "https://example.com/dog2.jpg";

    #[test]
    fn test_starts_empty() {
        let state = FetchState::new(OverlapPolicy::default());

        assert_eq!(state.image(), None);
        assert!(!state.is_loading());
        assert_eq!(state.error(), None);
        assert_eq!(state.latest_request(), None);
    }

    #[test]
    fn test_success_sets_image_and_stops_loading() {
        let mut state = FetchState::default();

        let id = state.begin();
        assert!(state.is_loading());

        let outcome = state.finish(id, Ok(DOG1.to_string()));

        assert_eq!(outcome, Outcome::Loaded(DOG1.to_string()));
        assert_eq!(state.image(), Some(DOG1));
        assert_eq!(state.error(), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failure_keeps_previous_image() {
        let mut state = FetchState::default();
        let first = state.begin();
        state.finish(first, Ok(DOG1.to_string()));

        let second = state.begin();
        let outcome = state.finish(second, Err(FetchError::Status(500)));

        assert_eq!(outcome, Outcome::Failed("Failed to fetch dog image".to_string()));
        assert_eq!(state.image(), Some(DOG1));
        assert_eq!(state.error(), Some("Failed to fetch dog image"));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_error_text_follows_the_error() {
        let mut state = FetchState::default();

        let id = state.begin();
        state.finish(id, Err(FetchError::Transport("connection refused".to_string())));
        assert_eq!(state.error(), Some("connection refused"));

        let id = state.begin();
        state.finish(id, Err(FetchError::Unknown));
        assert_eq!(state.error(), Some("Unknown error occurred"));
    }

    #[test]
    fn test_begin_clears_error_but_not_image() {
        let mut state = FetchState::default();
        let id = state.begin();
        state.finish(id, Ok(DOG1.to_string()));
        let id = state.begin();
        state.finish(id, Err(FetchError::Status(502)));
        assert!(state.error().is_some());

        state.begin();

        assert_eq!(state.error(), None);
        assert_eq!(state.image(), Some(DOG1));
        assert!(state.is_loading());
    }

    #[test]
    fn test_request_ids_increase() {
        let mut state = FetchState::default();

        let a = state.begin();
        let b = state.begin();

        assert!(b > a);
        assert_eq!(state.latest_request(), Some(b));
    }

    #[test]
    fn test_last_response_wins_by_default() {
        let mut state = FetchState::default();
        let older = state.begin();
        let newer = state.begin();

        state.finish(newer, Ok(DOG2.to_string()));
        let outcome = state.finish(older, Ok(DOG1.to_string()));

        // The slow, older response lands last and takes over
        assert_eq!(outcome, Outcome::Loaded(DOG1.to_string()));
        assert_eq!(state.image(), Some(DOG1));
    }

    #[test]
    fn test_first_response_ends_loading_by_default() {
        let mut state = FetchState::default();
        let older = state.begin();
        let _newer = state.begin();

        state.finish(older, Ok(DOG1.to_string()));

        assert!(!state.is_loading());
    }

    #[test]
    fn test_latest_request_wins_drops_superseded_responses() {
        let mut state = FetchState::new(OverlapPolicy::LatestRequestWins);
        let older = state.begin();
        let newer = state.begin();

        assert_eq!(state.finish(older, Ok(DOG1.to_string())), Outcome::Stale);
        assert_eq!(state.image(), None);
        assert!(state.is_loading());

        state.finish(newer, Ok(DOG2.to_string()));
        assert_eq!(state.image(), Some(DOG2));
        assert!(!state.is_loading());

        // Still stale after the newer one resolved
        assert_eq!(state.finish(older, Err(FetchError::Status(500))), Outcome::Stale);
        assert_eq!(state.error(), None);
    }
}
