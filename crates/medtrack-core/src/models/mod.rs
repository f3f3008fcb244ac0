//! Domain models for the medtrack system.

mod clinic;
mod coordinate;
mod medicine;

pub use clinic::*;
pub use coordinate::*;
pub use medicine::*;
