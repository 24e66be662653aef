use tracing::{debug, instrument};
use crate::domain::{Reservation, ReservationAction, ReservationCreate};
use crate::hotel::HotelError;
use crate::actor_framework::ResourceClient;

/// Client for interacting with the Reservation actor.
#[derive(Clone)]
pub struct ReservationClient {
    inner: ResourceClient<Reservation>,
}

impl_basic_client!(ReservationClient, Reservation, HotelError, reservation);

impl ReservationClient {
    /// The actor rejects the payload if it overlaps a stored reservation.
    #[instrument(skip(self, payload), fields(room = payload.room.number, guest = %payload.guest.name))]
    pub async fn create_reservation(&self, payload: ReservationCreate) -> Result<String, HotelError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(HotelError::from)
    }

    #[instrument(skip(self))]
    pub async fn cancel_reservation(&self, id: String) -> Result<(), HotelError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, ReservationAction::Cancel)
            .await
            .map_err(HotelError::from)
    }
}
