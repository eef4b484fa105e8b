//! User settings for SessionBook
//!
//! Holds the classifier rules used to decide which calendar events are
//! billable sessions.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};

use super::paths::SessionBookPaths;
use crate::error::SessionBookError;
use crate::storage::write_json_atomic;

/// Keywords that mark a calendar event as a billable session
pub const DEFAULT_KEYWORDS: [&str; 6] = ["therapy", "session", "appointment", "zoom", "meet", "client"];

/// Video-meeting link markers that mark an event as a billable session
pub const DEFAULT_LINK_MARKERS: [&str; 1] = ["zoom.us"];

/// Rules for the session classifier
///
/// Matching is a case-insensitive substring test against the event's summary
/// and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierRules {
    /// Keywords searched for in summary and description
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Meeting link markers searched for in summary and description
    #[serde(default = "default_link_markers")]
    pub link_markers: Vec<String>,
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_link_markers() -> Vec<String> {
    DEFAULT_LINK_MARKERS.iter().map(|m| m.to_string()).collect()
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            link_markers: default_link_markers(),
        }
    }
}

/// User settings for SessionBook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Session classifier rules
    #[serde(default)]
    pub classifier: ClassifierRules,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            classifier: ClassifierRules::default(),
        }
    }
}

impl Settings {
    /// Settings from `config.json`, or the defaults when none have been saved
    ///
    /// The defaults are not written back; `init` persists them.
    pub fn load_or_create(paths: &SessionBookPaths) -> Result<Self, SessionBookError> {
        let settings_path = paths.settings_file();

        match std::fs::read_to_string(&settings_path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                SessionBookError::Config(format!(
                    "Failed to parse {}: {}",
                    settings_path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(SessionBookError::Io(format!(
                "Failed to read {}: {}",
                settings_path.display(),
                e
            ))),
        }
    }

    /// Persist to `config.json`
    pub fn save(&self, paths: &SessionBookPaths) -> Result<(), SessionBookError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
