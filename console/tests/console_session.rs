//! Scripted console sessions against the in-memory backend.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use coworking_console::{AdminConfig, Config, app};
use coworking_testing::mocks::test_clock;
use std::sync::Arc;

/// Run one session over `script` and return everything it printed.
async fn session(config: &Config, script: &str) -> String {
    let mut output = Vec::new();
    app::run(config, Arc::new(test_clock()), script.as_bytes(), &mut output)
        .await
        .expect("session should end cleanly");
    String::from_utf8(output).expect("console output is UTF-8")
}

fn lines(script: &[&str]) -> String {
    let mut joined = script.join("\n");
    joined.push('\n');
    joined
}

#[tokio::test]
async fn admin_books_and_sees_availability_shrink() {
    let script = lines(&[
        "2", "admin", "adminPass",
        "1", "",
        "3", "1", "2025-03-10T09:00", "2025-03-10T10:00",
        "3", "1", "2025-03-10T09:30", "2025-03-10T10:30",
        "3", "1", "2025-03-10T10:00", "2025-03-10T11:00",
        "1", "2025-03-10",
        "5",
        "17",
    ]);

    let out = session(&Config::default(), &script).await;

    assert!(out.starts_with("Welcome to Coworking Service"));
    assert!(out.contains("Login successful. Welcome, admin!"));
    assert!(out.contains("Booking successful. Booking ID: 1"));
    assert!(out.contains("Error: Booking conflict detected"));
    assert!(out.contains("Booking successful. Booking ID: 2"));
    assert!(out.contains(
        "- Booking ID: 2, User ID: 1, Resource: workspace #1, \
         Start Time: 2025-03-10T10:00, End Time: 2025-03-10T11:00"
    ));
    assert!(out.trim_end().ends_with("Thank you for using Coworking Service!"));

    let listings: Vec<&str> = out.split("Available Workspaces:").collect();
    assert_eq!(listings.len(), 3);
    // Blank date means the clock's today, when nothing is booked yet.
    assert!(listings[1].contains("- [1] Workspace 1"));
    assert!(listings[1].contains("- [2] Workspace 2"));
    assert!(!listings[2].contains("- [1] Workspace 1"));
    assert!(listings[2].contains("- [2] Workspace 2"));
}

#[tokio::test]
async fn regular_user_is_refused_inventory_changes_and_others_bookings() {
    let script = lines(&[
        "1", "carol", "secret",
        "1", "carol", "again",
        "2", "carol", "wrong",
        "2", "carol", "secret",
        "9", "Sneaky Desk",
        "5",
        "6",
        "4", "1", "2025-03-10T09:00", "2025-03-10T10:00",
        "8", "1",
        "8", "1",
    ]);

    let out = session(&Config::default(), &script).await;

    assert!(out.contains("User registered successfully."));
    assert!(out.contains("Error: User already exists"));
    assert!(out.contains("Error: Invalid username or password"));
    assert!(out.contains("Login successful. Welcome, carol!"));
    assert!(out.contains("Error: Only admin can manage workspaces"));
    assert!(out.contains("Error: Only admin can view all bookings"));
    assert!(out.contains("Bookings:\n  (no bookings)"));
    assert!(out.contains("Booking successful. Booking ID: 1"));
    assert!(out.contains("Booking cancelled successfully."));
    assert!(out.contains("Error: Booking not found."));
    // Input ran out without choosing Exit; the session still says goodbye.
    assert!(out.trim_end().ends_with("Thank you for using Coworking Service!"));
}

#[tokio::test]
async fn malformed_input_is_reported_and_the_menu_continues() {
    let script = lines(&[
        "7",
        "2", "user", "userPass",
        "3", "abc",
        "3", "1", "tomorrow morning",
        "3", "1", "2025-03-10T10:00", "2025-03-10T09:00",
        "3", "42", "2025-03-10T09:00", "2025-03-10T10:00",
        "7", "", "", "", "5",
        "99",
        "17",
    ]);

    let out = session(&Config::default(), &script).await;

    assert!(out.contains("Invalid option. Please try again."));
    assert!(out.contains("Error: Invalid ID: 'abc'"));
    assert!(out.contains("Error: Invalid time 'tomorrow morning', expected yyyy-MM-ddTHH:mm"));
    assert!(out.contains("Error: Start time must be before end time"));
    assert!(out.contains("Error: Resource not found"));
    assert!(out.contains("Error: Resource type is required to filter by resource ID"));
    assert_eq!(out.matches("Invalid option. Please try again.").count(), 2);
}

#[tokio::test]
async fn bootstrap_admin_manages_an_empty_catalogue() {
    let config = Config {
        seed_demo_data: false,
        admin: Some(AdminConfig {
            username: "root".to_string(),
            password: "toor".to_string(),
        }),
        ..Config::default()
    };
    let script = lines(&[
        "2", "root", "toor",
        "12",
        "9", "Loft",
        "13", "Boardroom",
        "10", "1", "Garden Loft",
        "15", "1",
        "12",
        "16",
        "11", "7",
        "17",
    ]);

    let out = session(&config, &script).await;

    assert!(out.contains("All Workspaces:\n  (none)"));
    assert!(out.contains("Workspace added successfully. Workspace ID: 1"));
    assert!(out.contains("Conference room added successfully. Conference room ID: 1"));
    assert!(out.contains("Workspace updated successfully."));
    assert!(out.contains("Conference room deleted successfully."));
    assert!(out.contains("All Workspaces:\n- [1] Garden Loft"));
    assert!(out.contains("All Conference Rooms:\n  (none)"));
    assert!(out.contains("Error: Workspace not found"));
}

#[tokio::test]
async fn any_registered_user_policy_lets_regular_users_manage_inventory() {
    let config = Config {
        management_policy: coworking_core::ManagementPolicy::AnyRegisteredUser,
        ..Config::default()
    };
    let script = lines(&["2", "user", "userPass", "13", "Studio", "16", "17"]);

    let out = session(&config, &script).await;

    assert!(out.contains("Conference room added successfully. Conference room ID: 3"));
    assert!(out.contains("- [3] Studio"));
}

#[tokio::test]
async fn closed_input_at_the_start_menu_ends_quietly() {
    let out = session(&Config::default(), "").await;

    assert_eq!(
        out,
        "Welcome to Coworking Service\n\n1. Register\n2. Login\n3. Exit\nChoose an option: \
         Thank you for using Coworking Service!\n"
    );
}
