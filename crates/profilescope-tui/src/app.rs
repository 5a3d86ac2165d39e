// TUI application state and transitions
use std::ops::{Deref, DerefMut};

use profilescope_core::{normalize, Resolution, ResolvedProfile};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Result card actions
    Searching, // Typing in search box
}

/// Where the session is in the lookup cycle
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Loading,
    Success(ResolvedProfile),
    Failure(String),
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub search_input: String,
    pub state: SessionState,
    pub show_explanation: bool,
    // Action hints on the result card; hidden while a snapshot is taken
    pub chrome_visible: bool,
    pub status_message: Option<String>,
    pub thousands_separator: char,
    latest_request: u64,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Searching,
            search_input: String::new(),
            state: SessionState::Idle,
            show_explanation: false,
            chrome_visible: true,
            status_message: None,
            thousands_separator: ',',
            latest_request: 0,
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.thousands_separator = separator;
        self
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Loading
    }

    pub fn profile(&self) -> Option<&ResolvedProfile> {
        match &self.state {
            SessionState::Success(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// Start a lookup for the current input
    ///
    /// Returns the request sequence number and normalized identifier, or
    /// `None` when the input is empty (the state is left untouched).
    pub fn begin_lookup(&mut self) -> Option<(u64, String)> {
        let identifier = normalize(&self.search_input);
        if identifier.is_empty() {
            return None;
        }

        self.latest_request += 1;
        self.state = SessionState::Loading;
        self.status_message = None;
        Some((self.latest_request, identifier))
    }

    /// Apply a finished lookup; stale sequence numbers are dropped
    pub fn complete_lookup(&mut self, request: u64, outcome: Resolution) -> bool {
        if request != self.latest_request {
            debug!(
                "Dropping stale lookup #{} (latest is #{})",
                request, self.latest_request
            );
            return false;
        }

        self.state = match outcome {
            Resolution::Resolved(profile) => SessionState::Success(profile),
            Resolution::Failed(message) => SessionState::Failure(message),
        };
        true
    }

    pub fn toggle_explanation(&mut self) {
        self.show_explanation = !self.show_explanation;
    }

    /// Snapshots only make sense with a result on screen
    pub fn can_export(&self) -> bool {
        self.profile().is_some()
    }

    /// Hide the card chrome until the returned guard is dropped
    pub fn hide_chrome(&mut self) -> ChromeGuard<'_> {
        self.chrome_visible = false;
        ChromeGuard { app: self }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the chrome hidden for as long as it lives
pub struct ChromeGuard<'a> {
    app: &'a mut App,
}

impl Deref for ChromeGuard<'_> {
    type Target = App;

    fn deref(&self) -> &App {
        &*self.app
    }
}

impl DerefMut for ChromeGuard<'_> {
    fn deref_mut(&mut self) -> &mut App {
        &mut *self.app
    }
}

impl Drop for ChromeGuard<'_> {
    fn drop(&mut self) {
        self.app.chrome_visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilescope_core::{ProfileKind, ProfileRecord};

    fn resolved(login: &str) -> Resolution {
        Resolution::Resolved(ResolvedProfile {
            record: ProfileRecord {
                login: login.to_string(),
                ..Default::default()
            },
            kind: ProfileKind::User,
        })
    }

    #[test]
    fn test_starts_idle() {
        let app = App::new();
        assert_eq!(app.state, SessionState::Idle);
        assert!(!app.is_loading());
        assert!(!app.can_export());
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut app = App::new();
        app.search_input = "   ".to_string();
        assert_eq!(app.begin_lookup(), None);
        assert_eq!(app.state, SessionState::Idle);
    }

    #[test]
    fn test_lookup_cycle() {
        let mut app = App::new();
        app.search_input = "https://github.com/octocat".to_string();

        let (request, identifier) = app.begin_lookup().unwrap();
        assert_eq!(identifier, "octocat");
        assert!(app.is_loading());

        assert!(app.complete_lookup(request, resolved("octocat")));
        assert!(!app.is_loading());
        assert_eq!(app.profile().unwrap().record.login, "octocat");
        assert!(app.can_export());
    }

    #[test]
    fn test_failure_clears_previous_record() {
        let mut app = App::new();
        app.search_input = "octocat".to_string();
        let (first, _) = app.begin_lookup().unwrap();
        app.complete_lookup(first, resolved("octocat"));

        app.search_input = "nobody".to_string();
        let (second, _) = app.begin_lookup().unwrap();
        assert!(app.profile().is_none());

        app.complete_lookup(second, Resolution::Failed("profile not found".to_string()));
        assert_eq!(app.error(), Some("profile not found"));
        assert!(app.profile().is_none());
        assert!(!app.can_export());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut app = App::new();
        app.search_input = "first".to_string();
        let (first, _) = app.begin_lookup().unwrap();
        app.search_input = "second".to_string();
        let (second, _) = app.begin_lookup().unwrap();

        assert!(app.complete_lookup(second, resolved("second")));
        assert!(!app.complete_lookup(first, resolved("first")));
        assert_eq!(app.profile().unwrap().record.login, "second");
    }

    #[test]
    fn test_stale_completion_while_loading_keeps_loading() {
        let mut app = App::new();
        app.search_input = "first".to_string();
        let (first, _) = app.begin_lookup().unwrap();
        app.begin_lookup().unwrap();

        assert!(!app.complete_lookup(first, resolved("first")));
        assert!(app.is_loading());
    }

    #[test]
    fn test_toggle_explanation_twice() {
        let mut app = App::new();
        app.search_input = "octocat".to_string();
        let (request, _) = app.begin_lookup().unwrap();
        app.complete_lookup(request, resolved("octocat"));
        let before = app.state.clone();

        app.toggle_explanation();
        assert!(app.show_explanation);
        app.toggle_explanation();
        assert!(!app.show_explanation);
        assert_eq!(app.state, before);
    }

    #[test]
    fn test_chrome_guard_restores_visibility() {
        let mut app = App::new();
        {
            let guard = app.hide_chrome();
            assert!(!guard.chrome_visible);
        }
        assert!(app.chrome_visible);
    }
}
