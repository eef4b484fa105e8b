//! Attendee extraction
//!
//! Pulls the client-facing participant names out of a calendar event.

use crate::models::RawCalendarEvent;

/// Names of the event's attendees, minus the organizer and anyone who declined
///
/// Each attendee contributes their display name if present, else their raw
/// email (possibly empty). Source order is kept and duplicates are not
/// removed.
pub fn extract_attendees(event: &RawCalendarEvent) -> Vec<String> {
    let Some(attendees) = &event.attendees else {
        return Vec::new();
    };

    let organizer_email = event.organizer_email();

    attendees
        .iter()
        .filter(|attendee| {
            let email = attendee.email.as_deref().unwrap_or("").to_lowercase();
            email != organizer_email && !attendee.declined()
        })
        .map(|attendee| {
            attendee
                .display_name
                .clone()
                .or_else(|| attendee.email.clone())
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventAttendee, EventOrganizer};

    fn attendee(email: Option<&str>, name: Option<&str>, status: Option<&str>) -> EventAttendee {
        EventAttendee {
            email: email.map(String::from),
            display_name: name.map(String::from),
            response_status: status.map(String::from),
        }
    }

    fn event(organizer: Option<&str>, attendees: Option<Vec<EventAttendee>>) -> RawCalendarEvent {
        RawCalendarEvent {
            id: "evt".into(),
            organizer: organizer.map(|email| EventOrganizer {
                email: Some(email.into()),
            }),
            attendees,
            ..Default::default()
        }
    }

    #[test]
    fn test_excludes_organizer_and_declined() {
        let e = event(
            Some("marla@x.com"),
            Some(vec![
                attendee(Some("marla@x.com"), Some("Marla"), Some("accepted")),
                attendee(Some("sam@y.com"), Some("Sam"), Some("declined")),
                attendee(Some("pat@y.com"), Some("Pat"), Some("accepted")),
            ]),
        );

        assert_eq!(extract_attendees(&e), vec!["Pat".to_string()]);
    }

    #[test]
    fn test_organizer_match_ignores_case() {
        let e = event(
            Some("Marla@X.com"),
            Some(vec![
                attendee(Some("MARLA@x.COM"), None, None),
                attendee(Some("pat@y.com"), None, Some("needsAction")),
            ]),
        );

        assert_eq!(extract_attendees(&e), vec!["pat@y.com".to_string()]);
    }

    #[test]
    fn test_no_attendees_field() {
        assert!(extract_attendees(&event(Some("marla@x.com"), None)).is_empty());
    }

    #[test]
    fn test_fallbacks_and_order() {
        let e = event(
            None,
            Some(vec![
                attendee(Some("b@y.com"), None, None),
                attendee(None, None, Some("tentative")),
                attendee(Some("a@y.com"), Some("Alex"), None),
                attendee(Some("a@y.com"), Some("Alex"), None),
            ]),
        );

        // No organizer: only attendees without an email match the empty organizer email
        assert_eq!(
            extract_attendees(&e),
            vec!["b@y.com".to_string(), "Alex".to_string(), "Alex".to_string()]
        );
    }

    #[test]
    fn test_empty_display_name_is_kept() {
        let e = event(
            Some("marla@x.com"),
            Some(vec![attendee(Some("pat@y.com"), Some(""), None)]),
        );

        assert_eq!(extract_attendees(&e), vec![String::new()]);
    }
}
