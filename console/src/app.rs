//! Startup: pick the storage backend, prepare its data, hand over to the console.

use crate::config::{Config, StorageBackend};
use crate::console::{Console, Services};
use anyhow::Context;
use coworking_core::Clock;
use coworking_core::memory::{
    InMemoryBookingRepository, InMemoryConferenceRoomRepository, InMemoryUserRepository,
    InMemoryWorkspaceRepository,
};
use coworking_core::providers::{
    BookingRepository, ConferenceRoomRepository, UserRepository, WorkspaceRepository,
};
use coworking_postgres::{
    PostgresBookingRepository, PostgresConferenceRoomRepository, PostgresUserRepository,
    PostgresWorkspaceRepository,
};
use coworking_service::{ensure_admin, seed_demo_data};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};

/// Run one console session on the configured backend.
///
/// # Errors
///
/// Fails if the database cannot be reached or migrated, if seeding fails,
/// or if the terminal fails.
pub async fn run<R, O>(config: &Config, clock: Arc<dyn Clock>, input: R, output: O) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    match config.storage {
        StorageBackend::Memory => {
            let services = Services::new(
                InMemoryUserRepository::new(),
                InMemoryWorkspaceRepository::new(),
                InMemoryConferenceRoomRepository::new(),
                InMemoryBookingRepository::new(),
                config.management_policy,
            );
            serve(config, services, clock, input, output).await
        }
        StorageBackend::Postgres => {
            let pool = coworking_postgres::connect(&config.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            coworking_postgres::migrate(&pool)
                .await
                .context("Failed to run database migrations")?;

            let services = Services::new(
                PostgresUserRepository::new(pool.clone()),
                PostgresWorkspaceRepository::new(pool.clone()),
                PostgresConferenceRoomRepository::new(pool.clone()),
                PostgresBookingRepository::new(pool),
                config.management_policy,
            );
            serve(config, services, clock, input, output).await
        }
    }
}

/// Create the demo data and the bootstrap admin, as configured.
///
/// # Errors
///
/// Fails if an account or resource cannot be stored.
pub async fn prepare<U, W, C, B>(config: &Config, services: &Services<U, W, C, B>) -> anyhow::Result<()>
where
    U: UserRepository,
    W: WorkspaceRepository,
    C: ConferenceRoomRepository,
    B: BookingRepository,
{
    if config.seed_demo_data {
        seed_demo_data(&services.users, &services.workspaces, &services.rooms)
            .await
            .context("Failed to seed demo data")?;
    }

    if let Some(admin) = &config.admin {
        ensure_admin(&services.users, &admin.username, &admin.password)
            .await
            .context("Failed to create the bootstrap admin")?;
    }

    Ok(())
}

async fn serve<R, O, U, W, C, B>(
    config: &Config,
    services: Services<U, W, C, B>,
    clock: Arc<dyn Clock>,
    input: R,
    output: O,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
    U: UserRepository,
    W: WorkspaceRepository,
    C: ConferenceRoomRepository,
    B: BookingRepository,
{
    prepare(config, &services).await?;

    Console::new(services, clock, input, output)
        .run()
        .await
        .context("Console I/O failed")
}
