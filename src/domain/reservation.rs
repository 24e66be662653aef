use chrono::NaiveDate;
use thiserror::Error;

/// Validation failures for hotel records.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReservationError {
    #[error("Check-out {check_out} must be after check-in {check_in}")]
    InvalidStay { check_in: NaiveDate, check_out: NaiveDate },
    #[error("Room type cannot be empty")]
    EmptyRoomKind,
    #[error("Invalid nightly rate: {0}")]
    InvalidRate(f64),
    #[error("Guest name cannot be empty")]
    EmptyGuestName,
}

/// A hotel guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    pub name: String,
    pub national_id: String,
}

impl Guest {
    pub fn new(name: impl Into<String>, national_id: impl Into<String>) -> Result<Self, ReservationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ReservationError::EmptyGuestName);
        }
        Ok(Self {
            name,
            national_id: national_id.into().trim().to_string(),
        })
    }
}

/// A bookable room. The room number is its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub number: u32,
    pub kind: String,
    pub nightly_rate: f64,
}

impl Room {
    pub fn new(number: u32, kind: impl Into<String>, nightly_rate: f64) -> Result<Self, ReservationError> {
        let kind = kind.into().trim().to_string();
        if kind.is_empty() {
            return Err(ReservationError::EmptyRoomKind);
        }
        if !nightly_rate.is_finite() || nightly_rate < 0.0 {
            return Err(ReservationError::InvalidRate(nightly_rate));
        }
        Ok(Self { number, kind, nightly_rate })
    }
}

/// New nightly rate for a registered room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomPatch {
    nightly_rate: f64,
}

impl RoomPatch {
    pub fn rate(nightly_rate: f64) -> Result<Self, ReservationError> {
        if !nightly_rate.is_finite() || nightly_rate < 0.0 {
            return Err(ReservationError::InvalidRate(nightly_rate));
        }
        Ok(Self { nightly_rate })
    }

    pub fn nightly_rate(&self) -> f64 {
        self.nightly_rate
    }
}

/// Half-open date range `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl Stay {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ReservationError> {
        if check_out <= check_in {
            return Err(ReservationError::InvalidStay { check_in, check_out });
        }
        Ok(Self { check_in, check_out })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Leaving on the day another stay arrives is not an overlap.
    pub fn overlaps(&self, other: &Stay) -> bool {
        !(self.check_out <= other.check_in || self.check_in >= other.check_out)
    }
}

/// Links a guest to a room for a stay.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: String,
    pub guest: Guest,
    pub room: Room,
    pub stay: Stay,
    /// Cancelled reservations stay listed but no longer hold the room.
    pub cancelled: bool,
}

/// Things that can happen to a reservation after it is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationAction {
    Cancel,
}

/// Payload for creating a reservation; the id is assigned by the actor.
#[derive(Debug, Clone)]
pub struct ReservationCreate {
    pub guest: Guest,
    pub room: Room,
    pub stay: Stay,
}

impl Reservation {
    pub fn nights(&self) -> i64 {
        self.stay.nights()
    }

    pub fn total_cost(&self) -> f64 {
        self.nights() as f64 * self.room.nightly_rate
    }

    /// Same room and intersecting stays, both still active.
    pub fn overlaps(&self, other: &Reservation) -> bool {
        !self.cancelled
            && !other.cancelled
            && self.room.number == other.room.number
            && self.stay.overlaps(&other.stay)
    }
}
