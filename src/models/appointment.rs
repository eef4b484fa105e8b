//! Appointment model
//!
//! A billable session pulled from the calendar. Everything except `cleared`
//! and a missing `attendees` list is frozen once the record is stored.

use serde::{Deserialize, Serialize};

use super::event::RawCalendarEvent;
use super::record::{null_as_empty, Collection, Record};
use crate::error::{SessionBookError, SessionBookResult};

/// A ledger entry for one calendar session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    /// Calendar event identifier
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// ISO-8601 timestamp, or a plain date for all-day events
    #[serde(default, deserialize_with = "null_as_empty")]
    pub start: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub end: String,

    /// Client-facing participants
    ///
    /// `None` marks a record stored before attendees were tracked; the next
    /// merge fills it in once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,

    /// Whether the operator has reconciled this session
    #[serde(default)]
    pub cleared: bool,
}

impl AppointmentRecord {
    /// Build an uncleared record from a calendar event and its extracted attendees
    ///
    /// Fails when the event lacks a usable start or end value.
    pub fn from_event(event: &RawCalendarEvent, attendees: Vec<String>) -> SessionBookResult<Self> {
        let start = event
            .start
            .as_ref()
            .and_then(|s| s.value())
            .ok_or_else(|| {
                SessionBookError::InputFormat(format!("event {} has no start time", event.id))
            })?;
        let end = event
            .end
            .as_ref()
            .and_then(|e| e.value())
            .ok_or_else(|| {
                SessionBookError::InputFormat(format!("event {} has no end time", event.id))
            })?;

        Ok(Self {
            id: event.id.clone(),
            summary: event.summary_text().to_string(),
            description: event.description_text().to_string(),
            start: start.to_string(),
            end: end.to_string(),
            attendees: Some(attendees),
            cleared: false,
        })
    }

    /// Whether the record still needs its one-time attendee backfill
    pub fn needs_attendees(&self) -> bool {
        self.attendees.is_none()
    }

    /// Attendee names joined for display
    pub fn attendee_list(&self) -> String {
        self.attendees
            .as_deref()
            .map(|names| names.join(", "))
            .unwrap_or_default()
    }
}

impl Record for AppointmentRecord {
    const COLLECTION: Collection = Collection::Appointments;

    fn id(&self) -> &str {
        &self.id
    }

    fn is_cleared(&self) -> bool {
        self.cleared
    }

    fn toggle_cleared(&mut self) {
        self.cleared = !self.cleared;
    }

    fn label(&self) -> String {
        format!("{} {}", self.start, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventDateTime;

    fn timed(value: &str) -> Option<EventDateTime> {
        Some(EventDateTime {
            date_time: Some(value.into()),
            date: None,
        })
    }

    #[test]
    fn test_from_event() {
        let event = RawCalendarEvent {
            id: "evt1".into(),
            summary: Some("Therapy session".into()),
            start: timed("2025-03-04T15:00:00-05:00"),
            end: Some(EventDateTime {
                date_time: None,
                date: Some("2025-03-05".into()),
            }),
            ..Default::default()
        };

        let record = AppointmentRecord::from_event(&event, vec!["Pat".into()]).unwrap();
        assert_eq!(record.id, "evt1");
        assert_eq!(record.summary, "Therapy session");
        assert_eq!(record.description, "");
        assert_eq!(record.start, "2025-03-04T15:00:00-05:00");
        assert_eq!(record.end, "2025-03-05");
        assert_eq!(record.attendees, Some(vec!["Pat".to_string()]));
        assert!(!record.cleared);
    }

    #[test]
    fn test_from_event_without_end_fails() {
        let event = RawCalendarEvent {
            id: "evt1".into(),
            start: timed("2025-03-04T15:00:00Z"),
            ..Default::default()
        };

        let err = AppointmentRecord::from_event(&event, Vec::new()).unwrap_err();
        assert!(err.is_input_format());
    }

    #[test]
    fn test_legacy_record_without_attendees() {
        let json = r#"{"id": "a1", "summary": "Session", "description": "",
                       "start": "2025-01-02", "end": "2025-01-02", "cleared": true}"#;
        let record: AppointmentRecord = serde_json::from_str(json).unwrap();

        assert!(record.needs_attendees());
        assert!(record.cleared);

        // A missing list stays missing on the way back out
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("attendees").is_none());
    }

    #[test]
    fn test_null_text_fields_read_as_empty() {
        let json = r#"{"id": "a1", "summary": "Session", "description": null,
                       "start": null, "end": null, "attendees": ["Pat"]}"#;
        let record: AppointmentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.description, "");
        assert_eq!(record.start, "");
        assert_eq!(record.end, "");
        assert_eq!(record.attendees, Some(vec!["Pat".to_string()]));
    }

    #[test]
    fn test_empty_attendees_are_serialized() {
        let record = AppointmentRecord {
            id: "a1".into(),
            summary: String::new(),
            description: String::new(),
            start: "2025-01-02".into(),
            end: "2025-01-02".into(),
            attendees: Some(Vec::new()),
            cleared: false,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["attendees"], serde_json::json!([]));
        assert!(!record.needs_attendees());
    }

    #[test]
    fn test_toggle_cleared() {
        let mut record = AppointmentRecord {
            id: "a1".into(),
            summary: "Session".into(),
            description: String::new(),
            start: "2025-01-02".into(),
            end: "2025-01-02".into(),
            attendees: None,
            cleared: false,
        };

        record.toggle_cleared();
        assert!(record.is_cleared());
        record.toggle_cleared();
        assert!(!record.is_cleared());
    }
}
