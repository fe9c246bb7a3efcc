//! Durable storage layer (named slots).

pub mod persistence;
pub mod slot;

pub use persistence::PersistenceAdapter;
pub use slot::{FileSlotStorage, MemorySlotStorage, SlotStorage};

/// Slot names as constants.
pub mod slots {
    /// Workout history, one JSON array.
    pub const WORKOUTS: &str = "workout";
}
