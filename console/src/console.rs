//! The interactive menu loop.
//!
//! ```text
//! start menu ── 1 Register ──┐
//!            ├─ 2 Login ─────┴─> main menu (1..16) ── 17 Exit ─> goodbye
//!            └─ 3 Exit ─────────────────────────────────────────> goodbye
//! ```
//!
//! Every action reads its fields, calls one service operation and prints a
//! confirmation or `Error: <message>`. Rejected requests never end the
//! session; only an exit choice, end of input or a failing terminal does.

use crate::input;
use crate::output;
use coworking_core::providers::{
    BookingRepository, ConferenceRoomRepository, UserRepository, WorkspaceRepository,
};
use coworking_core::{
    BookingFilter, BookingId, Clock, ConferenceRoom, ConferenceRoomId, CoworkingError,
    ManagementPolicy, NewResource, ResourceKind, ResourceRef, Role, User, UserId, Workspace,
    WorkspaceId,
};
use coworking_service::{BookingService, ConferenceRoomService, UserService, WorkspaceService};
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const START_MENU: &str = "\n1. Register\n2. Login\n3. Exit";

const MAIN_MENU: &str = "
1. View available workspaces
2. View available conference rooms
3. Book a workspace
4. Book a conference room
5. View all bookings
6. View my bookings
7. Filter bookings
8. Cancel a booking
9. Add workspace
10. Update workspace
11. Delete workspace
12. View all workspaces
13. Add conference room
14. Update conference room
15. Delete conference room
16. View all conference rooms
17. Exit";

const INVALID_OPTION: &str = "Invalid option. Please try again.";

/// The services behind the menu, wired over one set of repositories.
#[derive(Debug, Clone)]
pub struct Services<U, W, C, B> {
    /// Registration and login
    pub users: UserService<U>,
    /// Workspace inventory
    pub workspaces: WorkspaceService<W>,
    /// Conference room inventory
    pub rooms: ConferenceRoomService<C>,
    /// Availability and reservations
    pub bookings: BookingService<B, W, C>,
}

impl<U, W, C, B> Services<U, W, C, B>
where
    U: UserRepository,
    W: WorkspaceRepository + Clone,
    C: ConferenceRoomRepository + Clone,
    B: BookingRepository,
{
    /// Build every service, gating inventory changes with `policy`.
    #[must_use]
    pub fn new(users: U, workspaces: W, rooms: C, bookings: B, policy: ManagementPolicy) -> Self {
        Self {
            users: UserService::new(users),
            bookings: BookingService::new(bookings, workspaces.clone(), rooms.clone()),
            workspaces: WorkspaceService::new(workspaces, policy),
            rooms: ConferenceRoomService::new(rooms, policy),
        }
    }
}

/// Why an action produced no confirmation.
#[derive(Debug, Error)]
enum Failure {
    /// The terminal failed or input ended; the session is over.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The request was refused; report it and carry on.
    #[error(transparent)]
    Rejected(#[from] CoworkingError),
}

/// Outcome of one menu action: the confirmation to print.
type Step = Result<String, Failure>;

fn input_closed() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")
}

/// Console session over a line reader and a writer.
pub struct Console<R, O, U, W, C, B> {
    services: Services<U, W, C, B>,
    clock: Arc<dyn Clock>,
    input: R,
    output: O,
}

impl<R, O, U, W, C, B> Console<R, O, U, W, C, B>
where
    R: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
    U: UserRepository,
    W: WorkspaceRepository,
    C: ConferenceRoomRepository,
    B: BookingRepository,
{
    /// Create a session. `clock` decides what "today" means.
    #[must_use]
    pub fn new(services: Services<U, W, C, B>, clock: Arc<dyn Clock>, input: R, output: O) -> Self {
        Self {
            services,
            clock,
            input,
            output,
        }
    }

    /// Run the session until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Only I/O failures of the terminal itself. Rejected requests are
    /// printed and the session continues.
    pub async fn run(&mut self) -> io::Result<()> {
        match self.session().await {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::debug!("Input closed, ending session");
            }
            Err(err) => return Err(err),
        }
        self.say("Thank you for using Coworking Service!").await
    }

    async fn session(&mut self) -> io::Result<()> {
        self.say("Welcome to Coworking Service").await?;
        if let Some(user) = self.start_menu().await? {
            tracing::info!(user_id = %user.id, "Session started");
            self.main_menu(&user).await?;
        }
        Ok(())
    }

    async fn start_menu(&mut self) -> io::Result<Option<User>> {
        loop {
            self.say(START_MENU).await?;
            let choice = self.ask("Choose an option: ").await?;
            let step = match choice.trim() {
                "1" => self.register().await,
                "2" => match self.login().await {
                    Ok(user) => {
                        self.say(&format!("Login successful. Welcome, {}!", user.username))
                            .await?;
                        return Ok(Some(user));
                    }
                    Err(failure) => Err(failure),
                },
                "3" => return Ok(None),
                _ => Ok(INVALID_OPTION.to_string()),
            };
            self.report(step).await?;
        }
    }

    async fn main_menu(&mut self, user: &User) -> io::Result<()> {
        loop {
            self.say(MAIN_MENU).await?;
            let choice = self.ask("Choose an option: ").await?;
            let step = match choice.trim() {
                "1" => self.available_workspaces().await,
                "2" => self.available_conference_rooms().await,
                "3" => self.book(user, ResourceKind::Workspace).await,
                "4" => self.book(user, ResourceKind::ConferenceRoom).await,
                "5" => self.all_bookings(user).await,
                "6" => self.my_bookings(user).await,
                "7" => self.filter_bookings().await,
                "8" => self.cancel_booking(user).await,
                "9" => self.add_workspace(user).await,
                "10" => self.update_workspace(user).await,
                "11" => self.delete_workspace(user).await,
                "12" => self.list_workspaces().await,
                "13" => self.add_conference_room(user).await,
                "14" => self.update_conference_room(user).await,
                "15" => self.delete_conference_room(user).await,
                "16" => self.list_conference_rooms().await,
                "17" => return Ok(()),
                _ => Ok(INVALID_OPTION.to_string()),
            };
            self.report(step).await?;
        }
    }

    // ─── Accounts ──────────────────────────────────────────────────────

    async fn register(&mut self) -> Step {
        let username = self.ask("Enter username: ").await?;
        let password = self.ask("Enter password: ").await?;

        self.services
            .users
            .register_user(&username, &password, Role::User)
            .await?;
        Ok("User registered successfully.".to_string())
    }

    async fn login(&mut self) -> Result<User, Failure> {
        let username = self.ask("Enter username: ").await?;
        let password = self.ask("Enter password: ").await?;

        Ok(self.services.users.login_user(&username, &password).await?)
    }

    // ─── Bookings ──────────────────────────────────────────────────────

    async fn availability_date(&mut self) -> Result<chrono::NaiveDate, Failure> {
        let raw = self
            .ask("Enter date (yyyy-MM-dd) or leave blank for today: ")
            .await?;
        Ok(input::parse_optional_date(&raw)?.unwrap_or_else(|| self.clock.today()))
    }

    async fn available_workspaces(&mut self) -> Step {
        let date = self.availability_date().await?;
        let workspaces = self.services.bookings.get_available_workspaces(date).await?;
        Ok(output::workspaces("Available Workspaces:", &workspaces))
    }

    async fn available_conference_rooms(&mut self) -> Step {
        let date = self.availability_date().await?;
        let rooms = self
            .services
            .bookings
            .get_available_conference_rooms(date)
            .await?;
        Ok(output::conference_rooms("Available Conference Rooms:", &rooms))
    }

    async fn book(&mut self, user: &User, kind: ResourceKind) -> Step {
        let id = input::parse_id(&self.ask(&format!("Enter {kind} ID: ")).await?)?;
        let start = input::parse_timestamp(
            &self.ask("Enter start time (yyyy-MM-ddTHH:mm): ").await?,
        )?;
        let end =
            input::parse_timestamp(&self.ask("Enter end time (yyyy-MM-ddTHH:mm): ").await?)?;

        let booking = self
            .services
            .bookings
            .book_resource(user.id, ResourceRef::from_parts(kind, id), start, end)
            .await?;
        Ok(format!("Booking successful. Booking ID: {}", booking.id))
    }

    async fn all_bookings(&mut self, user: &User) -> Step {
        let bookings = self.services.bookings.get_all_bookings(Some(user)).await?;
        Ok(output::bookings(&bookings))
    }

    async fn my_bookings(&mut self, user: &User) -> Step {
        let bookings = self.services.bookings.get_user_bookings(user).await?;
        Ok(output::bookings(&bookings))
    }

    async fn filter_bookings(&mut self) -> Step {
        let date = input::parse_optional_date(
            &self.ask("Enter date (yyyy-MM-dd) or leave blank: ").await?,
        )?;
        let user_id =
            input::parse_optional_id(&self.ask("Enter user ID or leave blank: ").await?)?;
        let kind = self
            .ask("Enter resource type (workspace/conference room) or leave blank: ")
            .await?;
        let id = self.ask("Enter resource ID or leave blank: ").await?;
        let resource = input::parse_resource_filter(&kind, &id)?;

        let mut filter = BookingFilter::any();
        if let Some(date) = date {
            filter = filter.on(date);
        }
        if let Some(user_id) = user_id {
            filter = filter.by_user(UserId::new(user_id));
        }
        if let Some(resource) = resource {
            filter = filter.for_resource(resource);
        }

        let bookings = self.services.bookings.get_filtered_bookings(&filter).await?;
        Ok(output::bookings(&bookings))
    }

    async fn cancel_booking(&mut self, user: &User) -> Step {
        let id = input::parse_id(&self.ask("Enter booking ID to cancel: ").await?)?;

        self.services
            .bookings
            .cancel_booking(Some(user), BookingId::new(id))
            .await?;
        Ok("Booking cancelled successfully.".to_string())
    }

    // ─── Workspaces ────────────────────────────────────────────────────

    async fn add_workspace(&mut self, user: &User) -> Step {
        let name = self.ask("Enter workspace name: ").await?;

        let workspace = self
            .services
            .workspaces
            .add(Some(user), NewResource::named(name))
            .await?;
        Ok(format!("Workspace added successfully. Workspace ID: {}", workspace.id))
    }

    async fn update_workspace(&mut self, user: &User) -> Step {
        let id = WorkspaceId::new(input::parse_id(
            &self.ask("Enter workspace ID to update: ").await?,
        )?);
        let name = self.ask("Enter new workspace name: ").await?;

        let available = self
            .services
            .workspaces
            .find(id)
            .await?
            .is_none_or(|workspace| workspace.available);
        self.services
            .workspaces
            .update(
                Some(user),
                Workspace {
                    id,
                    name: name.trim().to_string(),
                    available,
                },
            )
            .await?;
        Ok("Workspace updated successfully.".to_string())
    }

    async fn delete_workspace(&mut self, user: &User) -> Step {
        let id = input::parse_id(&self.ask("Enter workspace ID to delete: ").await?)?;

        self.services
            .workspaces
            .delete(Some(user), WorkspaceId::new(id))
            .await?;
        Ok("Workspace deleted successfully.".to_string())
    }

    async fn list_workspaces(&mut self) -> Step {
        let workspaces = self.services.workspaces.list_all().await?;
        Ok(output::workspaces("All Workspaces:", &workspaces))
    }

    // ─── Conference rooms ──────────────────────────────────────────────

    async fn add_conference_room(&mut self, user: &User) -> Step {
        let name = self.ask("Enter conference room name: ").await?;

        let room = self
            .services
            .rooms
            .add(Some(user), NewResource::named(name))
            .await?;
        Ok(format!(
            "Conference room added successfully. Conference room ID: {}",
            room.id
        ))
    }

    async fn update_conference_room(&mut self, user: &User) -> Step {
        let id = ConferenceRoomId::new(input::parse_id(
            &self.ask("Enter conference room ID to update: ").await?,
        )?);
        let name = self.ask("Enter new conference room name: ").await?;

        let available = self
            .services
            .rooms
            .find(id)
            .await?
            .is_none_or(|room| room.available);
        self.services
            .rooms
            .update(
                Some(user),
                ConferenceRoom {
                    id,
                    name: name.trim().to_string(),
                    available,
                },
            )
            .await?;
        Ok("Conference room updated successfully.".to_string())
    }

    async fn delete_conference_room(&mut self, user: &User) -> Step {
        let id = input::parse_id(&self.ask("Enter conference room ID to delete: ").await?)?;

        self.services
            .rooms
            .delete(Some(user), ConferenceRoomId::new(id))
            .await?;
        Ok("Conference room deleted successfully.".to_string())
    }

    async fn list_conference_rooms(&mut self) -> Step {
        let rooms = self.services.rooms.list_all().await?;
        Ok(output::conference_rooms("All Conference Rooms:", &rooms))
    }

    // ─── Terminal ──────────────────────────────────────────────────────

    /// Print the confirmation, or the refusal as `Error: <message>`.
    async fn report(&mut self, step: Step) -> io::Result<()> {
        match step {
            Ok(message) => self.say(&message).await,
            Err(Failure::Rejected(err)) => {
                tracing::debug!(error = %err, "Request rejected");
                self.say(&format!("Error: {err}")).await
            }
            Err(Failure::Io(err)) => Err(err),
        }
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /// Show `prompt` and read one line without its terminator.
    async fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(input_closed());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
