// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod factory;
pub mod session;
pub mod store;

pub use factory::{ValidationError, WorkoutFactory};
pub use session::{MapStatus, SessionController, SessionEvent, SessionState};
pub use store::{StoreChange, WorkoutStore};
