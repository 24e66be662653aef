//! Rooms and reservations, each held by its own resource actor.

pub mod entity;
pub mod error;

pub use error::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use crate::actor_framework::ResourceActor;
use crate::clients::{HotelClient, ReservationClient, RoomClient};
use crate::domain::{Reservation, ReservationError, Room};

/// Creates the room and reservation actors and a client over both.
pub fn new(name: impl Into<String>) -> (ResourceActor<Room>, ResourceActor<Reservation>, HotelClient) {
    let (room_actor, room_client) = ResourceActor::keyed(32);

    let reservation_counter = Arc::new(AtomicU64::new(1));
    let next_reservation_id = move || {
        let id = reservation_counter.fetch_add(1, Ordering::SeqCst);
        format!("reservation_{}", id)
    };
    let (reservation_actor, reservation_client) = ResourceActor::new(32, next_reservation_id);

    let client = HotelClient::new(
        name,
        RoomClient::new(room_client),
        ReservationClient::new(reservation_client),
    );
    (room_actor, reservation_actor, client)
}

/// Rooms registered when the hotel starts with seeding enabled.
pub fn default_rooms() -> Result<Vec<Room>, ReservationError> {
    Ok(vec![
        Room::new(101, "Single", 25.0)?,
        Room::new(102, "Double", 35.0)?,
        Room::new(201, "Suite", 60.0)?,
    ])
}
