//! Thin clients over the service channels.

#[macro_use]
mod macros;

mod inventory_client;
mod room_client;
mod reservation_client;
mod hotel_client;

pub use inventory_client::*;
pub use room_client::*;
pub use reservation_client::*;
pub use hotel_client::*;
