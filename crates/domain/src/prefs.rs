//! User preferences that change how links are presented.

use serde::{Deserialize, Serialize};

/// Display preferences, stored as `{"targetBlank": .., "showVisited": ..}`.
///
/// Keys missing from a stored document keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// Open links in a new tab.
    pub target_blank: bool,
    /// Style visited links differently.
    pub show_visited: bool,
}

/// A single preference flag, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    TargetBlank,
    ShowVisited,
}

impl Preferences {
    /// Set one flag.
    pub fn set(&mut self, key: PreferenceKey, value: bool) {
        match key {
            PreferenceKey::TargetBlank => self.target_blank = value,
            PreferenceKey::ShowVisited => self.show_visited = value,
        }
    }
}
