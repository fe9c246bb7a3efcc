// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contracts for the collaborators the session drives: geolocation, the map,
//! the workout list/form and the notification UI.
//!
//! Collaborators only receive requests. What they report back (a resolved
//! position, a map click, a submitted form) reaches the session as a
//! [`SessionEvent`](crate::services::session::SessionEvent).

pub mod console;
pub mod render;

use crate::models::{Coordinates, WorkoutId};
pub use render::{EntryDetail, MarkerView, WorkoutEntryView};

/// Source of the user's current position.
pub trait GeolocationProvider {
    /// Start one position lookup. The outcome arrives later as
    /// `PositionResolved` or `PositionFailed`.
    fn request_position(&mut self);
}

/// Interactive map widget.
pub trait MapWidget {
    /// Create the map centered on `center`. The map reports `MapReady` when done.
    fn initialize(&mut self, center: Coordinates, zoom: u8);
    fn add_marker(&mut self, marker: &MarkerView);
    fn remove_marker(&mut self, id: &WorkoutId);
    fn clear_markers(&mut self);
    fn pan_to(&mut self, center: Coordinates, zoom: u8, animate: bool);
}

/// Handle to a rendered list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle(pub u64);

/// Workout list and entry form.
pub trait WorkoutListUi {
    fn show_form(&mut self);
    fn hide_form(&mut self);
    fn clear_form_fields(&mut self);
    /// Swap the visible kind-specific field (cadence vs elevation gain).
    fn toggle_kind_specific_field(&mut self);
    fn render_workout_entry(&mut self, entry: &WorkoutEntryView) -> EntryHandle;
    fn remove_workout_entry(&mut self, handle: EntryHandle);
    fn clear_entries(&mut self);
}

/// Modal notice display.
pub trait Notifier {
    fn show_error(&mut self, message: &str);
    fn dismiss(&mut self);
}

/// The collaborators injected into a session.
pub struct Collaborators {
    pub geolocation: Box<dyn GeolocationProvider>,
    pub map: Box<dyn MapWidget>,
    pub list: Box<dyn WorkoutListUi>,
    pub notifier: Box<dyn Notifier>,
}

/// Why a position lookup failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation is not available")]
    Unavailable,

    #[error("Geolocation was denied: {0}")]
    Denied(String),
}
