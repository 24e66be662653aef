use chrono::NaiveDate;
use tracing::{error, info, instrument};
use crate::domain::{Guest, Reservation, ReservationCreate, Room, RoomPatch, Stay};
use crate::hotel::HotelError;
use crate::clients::{ReservationClient, RoomClient};

/// Client for the hotel as a whole.
///
/// Validates the stay and the room before handing the reservation to the
/// reservation actor, which enforces the no-overlap rule.
#[derive(Clone)]
pub struct HotelClient {
    name: String,
    room_client: RoomClient,
    reservation_client: ReservationClient,
}

impl HotelClient {
    pub fn new(
        name: impl Into<String>,
        room_client: RoomClient,
        reservation_client: ReservationClient,
    ) -> Self {
        Self {
            name: name.into(),
            room_client,
            reservation_client,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn add_room(&self, room: Room) -> Result<u32, HotelError> {
        self.room_client.add_room(room).await
    }

    /// All rooms, by number.
    pub async fn rooms(&self) -> Result<Vec<Room>, HotelError> {
        let mut rooms = self.room_client.list_rooms().await?;
        rooms.sort_by_key(|r| r.number);
        Ok(rooms)
    }

    /// All reservations, by check-in date then room.
    pub async fn reservations(&self) -> Result<Vec<Reservation>, HotelError> {
        let mut reservations = self.reservation_client.list_reservations().await?;
        reservations.sort_by(|a, b| {
            a.stay
                .check_in()
                .cmp(&b.stay.check_in())
                .then(a.room.number.cmp(&b.room.number))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(reservations)
    }

    async fn find_room(&self, number: u32) -> Result<Room, HotelError> {
        match self.room_client.get_room(number).await? {
            Some(room) => Ok(room),
            None => {
                error!(room = number, "Room not found");
                Err(HotelError::UnknownRoom(number))
            }
        }
    }

    /// Changes the rate charged for future bookings of a room.
    #[instrument(skip(self))]
    pub async fn set_room_rate(&self, room_number: u32, nightly_rate: f64) -> Result<Room, HotelError> {
        let patch = RoomPatch::rate(nightly_rate)?;
        let room = self.room_client.update_room(room_number, patch).await?;
        info!(room = room.number, rate = room.nightly_rate, "Room rate changed");
        Ok(room)
    }

    /// Marks a reservation cancelled, releasing its dates.
    #[instrument(skip(self))]
    pub async fn cancel(&self, reservation_id: &str) -> Result<(), HotelError> {
        let id = reservation_id.trim().to_string();
        match self.reservation_client.cancel_reservation(id).await {
            Ok(()) => {
                info!(reservation_id, "Reservation cancelled");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Cancellation rejected");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn is_available(&self, room_number: u32, stay: Stay) -> Result<bool, HotelError> {
        let room = self.find_room(room_number).await?;
        let taken = self
            .reservation_client
            .list_reservations()
            .await?
            .iter()
            .any(|r| !r.cancelled && r.room.number == room.number && r.stay.overlaps(&stay));
        Ok(!taken)
    }

    #[instrument(skip(self, guest), fields(guest = %guest.name))]
    pub async fn book(
        &self,
        guest: Guest,
        room_number: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Reservation, HotelError> {
        info!("Processing booking request (Client Side)");

        // Step 1: Validate dates
        let stay = Stay::new(check_in, check_out)?;

        // Step 2: Validate room
        let room = self.find_room(room_number).await?;

        // Step 3: Create reservation; the actor rejects overlaps
        let payload = ReservationCreate {
            guest: guest.clone(),
            room: room.clone(),
            stay,
        };
        match self.reservation_client.create_reservation(payload).await {
            Ok(id) => {
                info!(reservation_id = %id, "Reservation created");
                Ok(Reservation { id, guest, room, stay, cancelled: false })
            }
            Err(e) => {
                error!(error = %e, "Reservation rejected");
                Err(e)
            }
        }
    }
}
