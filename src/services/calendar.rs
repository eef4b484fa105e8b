//! Calendar source boundary
//!
//! The ledger never talks to a calendar API directly. It asks a
//! `CalendarSource` for the already-authenticated events of a window.
//! `JsonFileCalendarSource` serves a saved Google Calendar `events.list`
//! response from disk.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::{SessionBookError, SessionBookResult};
use crate::models::RawCalendarEvent;

/// Half-open time range `[start, end)` events are fetched for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CalendarWindow {
    /// Window from midnight UTC of `start_date` up to `now`
    pub fn since(start_date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            start: start_date.and_time(NaiveTime::default()).and_utc(),
            end: now,
        }
    }

    /// Whether the event overlaps the window, or `None` when its times do not parse
    ///
    /// Same rule as the calendar API's `timeMin`/`timeMax`: the event must
    /// end after the window starts and start before the window ends.
    pub fn overlaps(&self, event: &RawCalendarEvent) -> Option<bool> {
        let event_start = event.start_instant().ok()?;
        let event_end = event.end_instant().ok()?;
        Some(event_end > self.start && event_start < self.end)
    }
}

/// Supplier of raw calendar events
///
/// Authentication and transport are the implementation's concern. Any
/// failure must be reported as an error so no partial batch is merged.
pub trait CalendarSource {
    /// Events overlapping `window`, ordered by start time
    fn fetch_events(&self, window: &CalendarWindow) -> SessionBookResult<Vec<RawCalendarEvent>>;
}

/// Either a full `events.list` response or a bare array of events
#[derive(Deserialize)]
#[serde(untagged)]
enum EventsPayload {
    Response { items: Vec<RawCalendarEvent> },
    Events(Vec<RawCalendarEvent>),
}

/// Calendar source backed by a saved JSON response file
#[derive(Debug, Clone)]
pub struct JsonFileCalendarSource {
    path: PathBuf,
}

impl JsonFileCalendarSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_events(&self) -> SessionBookResult<Vec<RawCalendarEvent>> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            SessionBookError::ExternalSource(format!(
                "could not read {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let payload: EventsPayload = serde_json::from_str(&text).map_err(|e| {
            SessionBookError::ExternalSource(format!(
                "malformed calendar response in {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(match payload {
            EventsPayload::Response { items } => items,
            EventsPayload::Events(events) => events,
        })
    }
}

impl CalendarSource for JsonFileCalendarSource {
    fn fetch_events(&self, window: &CalendarWindow) -> SessionBookResult<Vec<RawCalendarEvent>> {
        let events = self.read_events()?;
        let total = events.len();

        // Events whose times do not parse cannot be placed in the window.
        // They go last and are left to the classifier.
        let mut in_window = Vec::with_capacity(total);
        let mut unplaced = Vec::new();
        for event in events {
            match window.overlaps(&event) {
                Some(true) => {
                    if let Ok(start) = event.start_instant() {
                        in_window.push((start, event));
                    }
                }
                Some(false) => {}
                None => {
                    debug!(event_id = %event.id, "event times do not parse; passing it through");
                    unplaced.push(event);
                }
            }
        }
        in_window.sort_by_key(|(start, _)| *start);

        debug!(
            path = %self.path.display(),
            total,
            in_window = in_window.len(),
            unplaced = unplaced.len(),
            "read calendar events"
        );

        Ok(in_window
            .into_iter()
            .map(|(_, event)| event)
            .chain(unplaced)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn window() -> CalendarWindow {
        CalendarWindow::since(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
        )
    }

    fn write(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("events.json");
        std::fs::write(&path, text).unwrap();
        path
    }

    fn event_json(id: &str, start: &str, end: &str) -> String {
        format!(
            r#"{{"id": "{}", "summary": "Session", "start": {{"dateTime": "{}"}}, "end": {{"dateTime": "{}"}}}}"#,
            id, start, end
        )
    }

    #[test]
    fn test_window_since() {
        let w = window();
        assert_eq!(w.start, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(w.end, Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_reads_response_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        let text = format!(
            r#"{{"kind": "calendar#events", "items": [{}, {}, {}, {}]}}"#,
            event_json("late", "2025-03-05T15:00:00Z", "2025-03-05T16:00:00Z"),
            event_json("early", "2025-03-02T15:00:00Z", "2025-03-02T16:00:00Z"),
            event_json("before", "2025-02-20T15:00:00Z", "2025-02-20T16:00:00Z"),
            event_json("future", "2025-03-11T15:00:00Z", "2025-03-11T16:00:00Z"),
        );
        let source = JsonFileCalendarSource::new(write(&dir, &text));

        let events = source.fetch_events(&window()).unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_reads_bare_array_with_all_day_events() {
        let dir = TempDir::new().unwrap();
        let text = r#"[{"id": "day", "summary": "Client day",
                        "start": {"date": "2025-03-03"}, "end": {"date": "2025-03-04"}}]"#;
        let source = JsonFileCalendarSource::new(write(&dir, text));

        let events = source.fetch_events(&window()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "day");
    }

    #[test]
    fn test_event_straddling_window_start_is_included() {
        let dir = TempDir::new().unwrap();
        let text = format!(
            "[{}]",
            event_json("straddle", "2025-02-28T23:30:00Z", "2025-03-01T00:30:00Z")
        );
        let source = JsonFileCalendarSource::new(write(&dir, &text));

        assert_eq!(source.fetch_events(&window()).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file_is_external_error() {
        let source = JsonFileCalendarSource::new("/nonexistent/events.json");
        let err = source.fetch_events(&window()).unwrap_err();
        assert!(err.is_external_source());
    }

    #[test]
    fn test_malformed_response_is_external_error() {
        let dir = TempDir::new().unwrap();
        let source = JsonFileCalendarSource::new(write(&dir, r#"{"error": {"code": 401}}"#));

        let err = source.fetch_events(&window()).unwrap_err();
        assert!(err.is_external_source());
        assert!(err.to_string().contains("malformed calendar response"));
    }

    #[test]
    fn test_unparseable_event_times_pass_through_last() {
        let dir = TempDir::new().unwrap();
        let text = format!(
            "[{}, {}]",
            event_json("odd", "soon", "later"),
            event_json("ok", "2025-03-02T15:00:00Z", "2025-03-02T16:00:00Z"),
        );
        let source = JsonFileCalendarSource::new(write(&dir, &text));

        let events = source.fetch_events(&window()).unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "odd"]);
        assert_eq!(window().overlaps(&events[1]), None);
    }
}
