//! Appointment register formatting

use crate::models::AppointmentRecord;

use super::{status_icon, truncate};

/// Format a single appointment for display (register row)
pub fn format_appointment_row(appointment: &AppointmentRecord) -> String {
    let summary = if appointment.summary.is_empty() {
        "(no title)"
    } else {
        appointment.summary.as_str()
    };

    format!(
        "{:2} {} {} {}",
        status_icon(appointment.cleared),
        truncate(&appointment.start, 25),
        truncate(summary, 30),
        appointment.attendee_list()
    )
    .trim_end()
    .to_string()
}

/// Format a list of appointments as a register
pub fn format_appointment_register(appointments: &[AppointmentRecord]) -> String {
    if appointments.is_empty() {
        return "No appointments found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:2} {:25} {:30} {}\n",
        "St", "Start", "Summary", "Attendees"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for appointment in appointments {
        output.push_str(&format_appointment_row(appointment));
        output.push('\n');
    }

    let cleared = appointments.iter().filter(|a| a.cleared).count();
    output.push_str(&format!(
        "\n{} appointments, {} cleared\n",
        appointments.len(),
        cleared
    ));

    output
}
