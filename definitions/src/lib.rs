mod deck;
mod location;
mod plate;

pub use deck::{LabwareId, Mount, PipetteId, Slot, TouchTip};
pub use location::{Location, Point, Reference};
pub use plate::{Row, WellId};
