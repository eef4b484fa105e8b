//! Appointment service
//!
//! Turns calendar events into billable-session records and merges them into
//! the stored appointment collection.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::audit::{AuditEntry, Operation};
use crate::config::settings::ClassifierRules;
use crate::error::{SessionBookError, SessionBookResult};
use crate::models::{AppointmentRecord, RawCalendarEvent};
use crate::storage::{LedgerStore, Storage};

use super::attendees::extract_attendees;
use super::calendar::{CalendarSource, CalendarWindow};
use super::merge::{merge_appointments, MergeReport};

/// Service for appointment fetching and merging
pub struct AppointmentService<'a, S: LedgerStore> {
    storage: &'a Storage<S>,
    rules: ClassifierRules,
}

impl<'a, S: LedgerStore> AppointmentService<'a, S> {
    /// Create a new appointment service using the default classifier rules
    pub fn new(storage: &'a Storage<S>) -> Self {
        Self {
            storage,
            rules: ClassifierRules::default(),
        }
    }

    /// Use `rules` to decide which events are sessions
    pub fn with_rules(mut self, rules: ClassifierRules) -> Self {
        self.rules = rules;
        self
    }

    /// All stored appointments, in collection order
    pub fn list(&self) -> SessionBookResult<Vec<AppointmentRecord>> {
        self.storage.store().load()
    }

    /// Fetch sessions since `start_date` (YYYY-MM-DD) and merge them in
    pub fn download<C: CalendarSource>(
        &self,
        source: &C,
        start_date: &str,
    ) -> SessionBookResult<MergeReport> {
        self.download_until(source, start_date, Utc::now())
    }

    /// Like `download`, with an explicit end of the fetch window
    pub fn download_until<C: CalendarSource>(
        &self,
        source: &C,
        start_date: &str,
        now: DateTime<Utc>,
    ) -> SessionBookResult<MergeReport> {
        let start = parse_start_date(start_date)?;
        let window = CalendarWindow::since(start, now);

        let events = source.fetch_events(&window)?;
        let sessions = self.sessions_from_events(&events)?;

        self.merge_fetched(sessions)
    }

    /// Convert the events that classify as sessions into uncleared records
    pub fn sessions_from_events(
        &self,
        events: &[RawCalendarEvent],
    ) -> SessionBookResult<Vec<AppointmentRecord>> {
        let mut sessions = Vec::new();

        for event in events {
            if !self.rules.is_billable_session(event) {
                debug!(event_id = %event.id, "skipping non-session event");
                continue;
            }
            // Only sessions must carry usable times; other events are never parsed
            event.start_instant()?;
            event.end_instant()?;
            sessions.push(AppointmentRecord::from_event(event, extract_attendees(event))?);
        }

        Ok(sessions)
    }

    /// Merge freshly fetched sessions into the stored collection and save it
    pub fn merge_fetched(
        &self,
        fetched: Vec<AppointmentRecord>,
    ) -> SessionBookResult<MergeReport> {
        let existing: Vec<AppointmentRecord> = self.storage.store().load()?;
        let fetched_count = fetched.len();

        let merged = merge_appointments(existing, fetched);
        self.storage.store().save(&merged.records)?;

        let mut entries: Vec<AuditEntry> =
            merged.added_records().iter().map(AuditEntry::added).collect();
        for &index in &merged.backfilled {
            let after = &merged.records[index];
            let before = AppointmentRecord {
                attendees: None,
                ..after.clone()
            };
            entries.push(AuditEntry::changed(Operation::Backfilled, &before, after));
        }
        self.storage.record(&entries);

        let report = merged.report();
        info!(
            fetched = fetched_count,
            added = report.added,
            backfilled = report.backfilled,
            "merged appointments"
        );
        Ok(report)
    }
}

/// Parse the fetch window's start date
pub fn parse_start_date(start_date: &str) -> SessionBookResult<NaiveDate> {
    let start_date = start_date.trim();
    if start_date.is_empty() {
        return Err(SessionBookError::Validation(
            "Please provide a start date".into(),
        ));
    }

    NaiveDate::parse_from_str(start_date, "%Y-%m-%d").map_err(|_| {
        SessionBookError::InputFormat(format!(
            "malformed start date '{}', expected YYYY-MM-DD",
            start_date
        ))
    })
}
