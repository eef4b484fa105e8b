//! Session classifier
//!
//! Decides whether a calendar event is a billable session by looking for
//! keywords and meeting links in its summary and description.

use crate::config::settings::ClassifierRules;
use crate::models::RawCalendarEvent;

impl ClassifierRules {
    /// Whether `event` looks like a billable session
    ///
    /// Missing summary or description count as empty text.
    pub fn is_billable_session(&self, event: &RawCalendarEvent) -> bool {
        let description = event.description_text().to_lowercase();
        let summary = event.summary_text().to_lowercase();

        let mentions = |needle: &String| {
            let needle = needle.to_lowercase();
            description.contains(&needle) || summary.contains(&needle)
        };

        self.keywords.iter().any(mentions) || self.link_markers.iter().any(mentions)
    }
}

/// Classify with the default keyword set and link markers
pub fn is_billable_session(event: &RawCalendarEvent) -> bool {
    ClassifierRules::default().is_billable_session(event)
}
