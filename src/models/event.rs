//! Raw calendar event types
//!
//! Mirrors the subset of the Google Calendar `events.list` payload the
//! ledger consumes. Everything except `id` is optional; validation happens
//! when an event is turned into an `AppointmentRecord`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SessionBookError, SessionBookResult};

/// Response status that excludes an attendee from the ledger
pub const DECLINED: &str = "declined";

/// A calendar event as delivered by the calendar source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<EventDateTime>,
    pub end: Option<EventDateTime>,
    pub organizer: Option<EventOrganizer>,
    pub attendees: Option<Vec<EventAttendee>>,
}

/// Start or end of an event: a timestamp for timed events, a date for all-day ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventOrganizer {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendee {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub response_status: Option<String>,
}

impl RawCalendarEvent {
    /// Summary text, empty when absent
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    /// Description text, empty when absent
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Organizer email, lower-cased, empty when absent
    pub fn organizer_email(&self) -> String {
        self.organizer
            .as_ref()
            .and_then(|o| o.email.as_deref())
            .unwrap_or("")
            .to_lowercase()
    }

    /// Start instant of the event in UTC
    pub fn start_instant(&self) -> SessionBookResult<DateTime<Utc>> {
        self.start
            .as_ref()
            .ok_or_else(|| {
                SessionBookError::InputFormat(format!("event {} has no start time", self.id))
            })?
            .to_utc()
    }

    /// End instant of the event in UTC
    pub fn end_instant(&self) -> SessionBookResult<DateTime<Utc>> {
        self.end
            .as_ref()
            .ok_or_else(|| {
                SessionBookError::InputFormat(format!("event {} has no end time", self.id))
            })?
            .to_utc()
    }
}

impl EventDateTime {
    /// The raw value: `dateTime` if present, else `date`
    pub fn value(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }

    /// Interpret the value as a UTC instant; all-day dates start at midnight UTC
    pub fn to_utc(&self) -> SessionBookResult<DateTime<Utc>> {
        if let Some(date_time) = &self.date_time {
            return DateTime::parse_from_rfc3339(date_time)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    SessionBookError::InputFormat(format!(
                        "malformed event timestamp '{}': {}",
                        date_time, e
                    ))
                });
        }

        match &self.date {
            Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(|d| d.and_time(NaiveTime::default()).and_utc())
                .map_err(|e| {
                    SessionBookError::InputFormat(format!("malformed event date '{}': {}", date, e))
                }),
            None => Err(SessionBookError::InputFormat(
                "event time has neither dateTime nor date".into(),
            )),
        }
    }
}

impl EventAttendee {
    /// Whether the attendee declined the invitation
    pub fn declined(&self) -> bool {
        self.response_status.as_deref() == Some(DECLINED)
    }
}
