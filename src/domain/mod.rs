pub mod product;
pub mod reservation;

pub use product::*;
pub use reservation::*;
