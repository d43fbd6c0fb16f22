//! Per-session directory state: what the user is looking at right now.
//!
//! Every event (fragment change, filter keystroke, preference toggle, map
//! move) mutates this struct and the directory is re-rendered from it.

use osmlinks_domain::params::{ParameterSet, Viewport};
use osmlinks_domain::prefs::{PreferenceKey, Preferences};

/// Parameters, preferences and filter text driving one rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryState {
    pub params: ParameterSet,
    pub prefs: Preferences,
    pub filter: String,
}

impl DirectoryState {
    /// Start from a fragment/query string and stored preferences.
    #[must_use]
    pub fn new(fragment: &str, prefs: Preferences) -> Self {
        Self {
            params: ParameterSet::from_fragment(fragment),
            prefs,
            filter: String::new(),
        }
    }

    /// The address fragment changed: reload the viewport from it.
    pub fn on_fragment_change(&mut self, fragment: &str) {
        self.params.load_from_fragment(fragment);
    }

    /// The map widget moved.
    pub fn on_map_move(&mut self, viewport: Viewport) {
        self.params.set_viewport(Some(viewport));
    }

    /// Enter "add location" mode, which starts the viewport at the origin.
    pub fn start_adding_location(&mut self) {
        self.params.reset_viewport_to_origin();
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    /// Toggle one preference flag. Persisting it is the caller's job.
    pub fn set_preference(&mut self, key: PreferenceKey, value: bool) {
        self.prefs.set(key, value);
    }

    /// The filter as used for matching: trimmed and lower-cased.
    #[must_use]
    pub fn normalized_filter(&self) -> String {
        self.filter.trim().to_lowercase()
    }
}
