//! In-memory conference room repository.

use super::Table;
use crate::error::Result;
use crate::providers::ConferenceRoomRepository;
use crate::types::{ConferenceRoom, ConferenceRoomId, NewResource};
use std::future::Future;

const ROOM_NOT_FOUND: &str = "Conference room not found";

/// In-memory conference room repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConferenceRoomRepository {
    rooms: Table<ConferenceRoom>,
}

impl InMemoryConferenceRoomRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConferenceRoomRepository for InMemoryConferenceRoomRepository {
    fn save(&self, room: &NewResource) -> impl Future<Output = Result<ConferenceRoom>> + Send {
        let rooms = self.rooms.clone();
        let room = room.clone();

        async move {
            let mut rows = rooms.lock()?;
            Ok(rows.insert(|id| room.into_conference_room(ConferenceRoomId::new(id))))
        }
    }

    fn find_by_id(
        &self,
        id: ConferenceRoomId,
    ) -> impl Future<Output = Result<Option<ConferenceRoom>>> + Send {
        let rooms = self.rooms.clone();

        async move { Ok(rooms.lock()?.get(id.get())) }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<ConferenceRoom>>> + Send {
        let rooms = self.rooms.clone();

        async move { Ok(rooms.lock()?.all()) }
    }

    fn update(&self, room: &ConferenceRoom) -> impl Future<Output = Result<ConferenceRoom>> + Send {
        let rooms = self.rooms.clone();
        let room = room.clone();

        async move { rooms.lock()?.replace(room.id.get(), room, ROOM_NOT_FOUND) }
    }

    fn delete(&self, id: ConferenceRoomId) -> impl Future<Output = Result<()>> + Send {
        let rooms = self.rooms.clone();

        async move { rooms.lock()?.remove(id.get(), ROOM_NOT_FOUND) }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::CoworkingError;

    #[tokio::test]
    async fn rooms_are_listed_in_id_order() {
        let repo = InMemoryConferenceRoomRepository::new();
        for name in ["Conference Room 1", "Conference Room 2", "Boardroom"] {
            repo.save(&NewResource::named(name)).await.unwrap();
        }

        let names: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|room| room.name)
            .collect();

        assert_eq!(names, ["Conference Room 1", "Conference Room 2", "Boardroom"]);
    }

    #[tokio::test]
    async fn delete_unknown_room_fails() {
        let repo = InMemoryConferenceRoomRepository::new();

        assert_eq!(
            repo.delete(ConferenceRoomId::new(3)).await,
            Err(CoworkingError::not_found("Conference room not found"))
        );
    }
}
