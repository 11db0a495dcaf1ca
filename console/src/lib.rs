//! # Coworking Console
//!
//! Interactive front end for coworking reservations: configuration loading,
//! backend selection, demo seeding and the menu loop.
//!
//! The binary reads stdin and writes stdout; [`app::run`] accepts any async
//! line reader and writer, so whole sessions can be scripted in tests.

pub mod app;
pub mod config;
pub mod console;
pub mod input;
pub mod output;

pub use config::{AdminConfig, Config, ConfigError, StorageBackend};
pub use console::{Console, Services};
