use crate::actor_framework::Entity;
use crate::domain::{Reservation, ReservationAction, ReservationCreate, Room, RoomPatch};

/// Rooms are registered under their own number, so the room actor is keyed
/// and never creates.
impl Entity for Room {
    type Id = u32;
    type CreatePayload = ();
    type Patch = RoomPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &u32 { &self.number }

    /// Existing reservations keep the rate they were booked at.
    fn on_update(&mut self, patch: RoomPatch) -> Result<(), String> {
        self.nightly_rate = patch.nightly_rate();
        Ok(())
    }
}

impl Entity for Reservation {
    type Id = String;
    type CreatePayload = ReservationCreate;
    type Patch = ();
    type Action = ReservationAction;
    type ActionResult = ();

    fn id(&self) -> &String { &self.id }

    /// Creates a new Reservation from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Generated reservation id
    /// * `payload` - Guest, room and validated stay
    fn from_create(id: String, payload: ReservationCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            guest: payload.guest,
            room: payload.room,
            stay: payload.stay,
            cancelled: false,
        })
    }

    /// Rejects a reservation whose stay overlaps another one for the same room.
    fn check_conflict(&self, existing: &Self) -> Result<(), String> {
        if self.overlaps(existing) {
            return Err(format!(
                "room {} is booked from {} to {} ({})",
                existing.room.number,
                existing.stay.check_in(),
                existing.stay.check_out(),
                existing.id
            ));
        }
        Ok(())
    }

    fn handle_action(&mut self, action: ReservationAction) -> Result<(), String> {
        match action {
            ReservationAction::Cancel => {
                if self.cancelled {
                    return Err(format!("{} is already cancelled", self.id));
                }
                self.cancelled = true;
                Ok(())
            }
        }
    }
}
