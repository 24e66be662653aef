use tracing::{debug, instrument};
use crate::domain::{Room, RoomPatch};
use crate::hotel::HotelError;
use crate::actor_framework::{FrameworkError, ResourceClient};

/// Client for interacting with the Room actor.
#[derive(Clone)]
pub struct RoomClient {
    inner: ResourceClient<Room>,
}

impl_basic_client!(RoomClient, Room, HotelError, room);

impl RoomClient {
    /// Registers a room under its own number.
    #[instrument(skip(self, room), fields(room_number = room.number))]
    pub async fn add_room(&self, room: Room) -> Result<u32, HotelError> {
        debug!("Sending request");
        let number = room.number;
        self.inner.insert(room).await.map_err(|e| match e {
            FrameworkError::AlreadyExists(_) => HotelError::AlreadyExists(format!("room {}", number)),
            other => HotelError::from(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn update_room(&self, number: u32, patch: RoomPatch) -> Result<Room, HotelError> {
        debug!("Sending request");
        self.inner.update(number, patch).await.map_err(|e| match e {
            FrameworkError::NotFound(_) => HotelError::UnknownRoom(number),
            other => HotelError::from(other),
        })
    }
}
