//! In-memory repositories.
//!
//! Each repository is a [`Table`]: rows keyed by id in a `BTreeMap` behind an
//! `Arc<Mutex<_>>`, with a monotonically increasing id counter starting at 1.
//! Clones share storage, so a repository handed to several services sees one
//! set of rows.

mod booking;
mod conference_room;
mod user;
mod workspace;

pub use booking::InMemoryBookingRepository;
pub use conference_room::InMemoryConferenceRoomRepository;
pub use user::InMemoryUserRepository;
pub use workspace::InMemoryWorkspaceRepository;

use crate::error::{CoworkingError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared, id-assigning row storage.
#[derive(Debug)]
pub(crate) struct Table<T> {
    inner: Arc<Mutex<Rows<T>>>,
}

#[derive(Debug)]
pub(crate) struct Rows<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Table<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Rows {
                next_id: 1,
                rows: BTreeMap::new(),
            })),
        }
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Rows<T>>> {
        self.inner.lock().map_err(|_| CoworkingError::InternalError)
    }
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Rows<T> {
    /// Build a row from the next id and store it.
    pub(crate) fn insert(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub(crate) fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    /// Rows in id order.
    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub(crate) fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub(crate) fn replace(&mut self, id: i64, row: T, missing: &str) -> Result<T> {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(CoworkingError::not_found(missing)),
        }
    }

    pub(crate) fn remove(&mut self, id: i64, missing: &str) -> Result<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoworkingError::not_found(missing))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let table: Table<&str> = Table::new();
        let mut rows = table.lock().unwrap();

        assert_eq!(rows.insert(|_| "a"), "a");
        rows.insert(|_| "b");
        rows.remove(2, "gone").unwrap();
        let third = rows.insert(|id| if id == 3 { "c" } else { "wrong" });

        assert_eq!(third, "c");
        assert_eq!(rows.all(), vec!["a", "c"]);
    }

    #[test]
    fn clones_share_rows() {
        let table: Table<u8> = Table::new();
        let other = table.clone();
        table.lock().unwrap().insert(|_| 7);

        assert_eq!(other.lock().unwrap().get(1), Some(7));
    }

    #[test]
    fn missing_rows_report_not_found() {
        let table: Table<u8> = Table::new();
        let mut rows = table.lock().unwrap();

        assert_eq!(
            rows.replace(9, 1, "Row not found"),
            Err(CoworkingError::not_found("Row not found"))
        );
        assert!(rows.remove(9, "Row not found").is_err());
    }
}
