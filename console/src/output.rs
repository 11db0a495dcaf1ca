//! Text rendering of listings.

use crate::input::TIMESTAMP_FORMAT;
use coworking_core::{Booking, ConferenceRoom, Workspace};

fn listing<T>(title: &str, items: &[T], empty: &str, line: impl Fn(&T) -> String) -> String {
    let mut out = String::from(title);
    if items.is_empty() {
        out.push_str("\n  ");
        out.push_str(empty);
    }
    for item in items {
        out.push('\n');
        out.push_str(&line(item));
    }
    out
}

/// A titled list of workspaces, one `- [id] name` line each.
#[must_use]
pub fn workspaces(title: &str, workspaces: &[Workspace]) -> String {
    listing(title, workspaces, "(none)", |workspace| {
        format!("- [{}] {}", workspace.id, workspace.name)
    })
}

/// A titled list of conference rooms, one `- [id] name` line each.
#[must_use]
pub fn conference_rooms(title: &str, rooms: &[ConferenceRoom]) -> String {
    listing(title, rooms, "(none)", |room| format!("- [{}] {}", room.id, room.name))
}

/// One booking per line with its owner, resource and times.
#[must_use]
pub fn bookings(bookings: &[Booking]) -> String {
    listing("Bookings:", bookings, "(no bookings)", |booking| {
        format!(
            "- Booking ID: {}, User ID: {}, Resource: {}, Start Time: {}, End Time: {}",
            booking.id,
            booking.user_id,
            booking.resource,
            booking.start_time().format(TIMESTAMP_FORMAT),
            booking.end_time().format(TIMESTAMP_FORMAT),
        )
    })
}
