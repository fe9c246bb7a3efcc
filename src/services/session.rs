// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller: the workout form lifecycle and state synchronization.
//!
//! Handles the core workflow:
//! 1. Restore stored workouts and render them (markers wait for the map)
//! 2. Request the user's position, then initialize the map
//! 3. Open the form on a map click
//! 4. Validate a submission, store it, render it and persist the store
//!
//! Events are handled one at a time; the controller is the only writer
//! of the workout store.

use std::collections::HashMap;

use crate::db::{PersistenceAdapter, SlotStorage};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Workout, WorkoutForm, WorkoutId};
use crate::services::factory::WorkoutFactory;
use crate::services::store::{StoreChange, WorkoutStore};
use crate::ui::render::{entry_view, marker_view};
use crate::ui::{Collaborators, EntryHandle, GeolocationError, MarkerView, WorkoutEntryView};

/// Form state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// No form shown.
    Idle,
    /// Form visible, waiting for a submission placed at `pending_location`.
    Composing { pending_location: Coordinates },
}

/// Map lifecycle as seen by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStatus {
    /// Position not requested yet.
    Unrequested,
    /// Waiting for the geolocation answer.
    Locating,
    /// Map initialized, waiting for it to report ready.
    Loading,
    Ready,
    /// Geolocation failed; the map never appears this session.
    Unavailable,
}

/// Something that happened outside the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PositionResolved(Coordinates),
    PositionFailed(GeolocationError),
    MapReady,
    MapClicked(Coordinates),
    KindToggled,
    Submitted(WorkoutForm),
    EntryClicked(WorkoutId),
    NoticeDismissed,
}

/// Drives the collaborators from the workout store.
pub struct SessionController<S: SlotStorage> {
    ui: Collaborators,
    persistence: PersistenceAdapter<S>,
    factory: WorkoutFactory,
    store: WorkoutStore,
    state: SessionState,
    map: MapStatus,
    map_zoom: u8,
    /// Markers waiting for the map to become ready, in store order.
    queued_markers: Vec<MarkerView>,
    entries: HashMap<WorkoutId, EntryHandle>,
}

impl<S: SlotStorage> SessionController<S> {
    pub fn new(persistence: PersistenceAdapter<S>, ui: Collaborators, map_zoom: u8) -> Self {
        Self {
            ui,
            persistence,
            factory: WorkoutFactory::new(),
            store: WorkoutStore::new(),
            state: SessionState::Idle,
            map: MapStatus::Unrequested,
            map_zoom,
            queued_markers: Vec::new(),
            entries: HashMap::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn map_status(&self) -> MapStatus {
        self.map
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn find_workout(&self, id: &WorkoutId) -> Option<&Workout> {
        self.store.find_by_id(id)
    }

    /// Number of markers still waiting for the map.
    pub fn queued_marker_count(&self) -> usize {
        self.queued_markers.len()
    }

    /// Restore stored workouts and ask for the user's position.
    pub fn start(&mut self) {
        self.restore();

        if self.map == MapStatus::Unrequested {
            self.map = MapStatus::Locating;
            tracing::debug!("Requesting position");
            self.ui.geolocation.request_position();
        }
    }

    /// Handle one external event.
    pub fn handle(&mut self, event: SessionEvent) -> Result<()> {
        tracing::debug!(event = ?event, state = ?self.state, "Handling event");

        match event {
            SessionEvent::PositionResolved(center) => {
                self.on_position(center);
                Ok(())
            }
            SessionEvent::PositionFailed(err) => {
                self.on_position_failed(err);
                Ok(())
            }
            SessionEvent::MapReady => {
                self.on_map_ready();
                Ok(())
            }
            SessionEvent::MapClicked(location) => {
                self.on_map_click(location);
                Ok(())
            }
            SessionEvent::KindToggled => {
                self.ui.list.toggle_kind_specific_field();
                Ok(())
            }
            SessionEvent::Submitted(form) => self.submit(&form).map(|_| ()),
            SessionEvent::EntryClicked(id) => self.select_workout(&id),
            SessionEvent::NoticeDismissed => {
                self.ui.notifier.dismiss();
                Ok(())
            }
        }
    }

    /// Validate and store a submitted form.
    ///
    /// On invalid input the error is shown, the form stays open with its
    /// values, and nothing is stored.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<WorkoutId> {
        let SessionState::Composing { pending_location } = self.state else {
            tracing::warn!("Submission without a selected map location");
            return Err(AppError::NoPendingLocation);
        };

        let workout = match self.factory.create_from_form(form, pending_location) {
            Ok(workout) => workout,
            Err(e) => {
                tracing::info!(error = %e, "Rejected workout input");
                let err = AppError::from(e);
                self.ui.notifier.show_error(&err.user_message());
                return Err(err);
            }
        };

        let id = workout.id().clone();
        let (entry, marker) = (entry_view(&workout), marker_view(&workout));
        let change = self.store.append(workout)?;

        tracing::info!(
            id = %id,
            kind = %entry.kind,
            location = %pending_location,
            "Workout added"
        );

        self.render(&entry, marker);
        let persisted = self.on_store_changed(&change);

        self.ui.list.clear_form_fields();
        self.ui.list.hide_form();
        self.state = SessionState::Idle;

        persisted.map(|_| id)
    }

    /// Pan the map to a workout's location.
    pub fn select_workout(&mut self, id: &WorkoutId) -> Result<()> {
        let coordinates = self
            .store
            .find_by_id(id)
            .map(|w| w.coordinates())
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        if self.map != MapStatus::Ready {
            tracing::debug!(id = %id, map = ?self.map, "Map not ready, ignoring selection");
            return Ok(());
        }

        self.ui.map.pan_to(coordinates, self.map_zoom, true);
        Ok(())
    }

    /// Delete one workout, keeping the order of the rest.
    pub fn delete_workout(&mut self, id: &WorkoutId) -> Result<()> {
        let (_, change) = self.store.remove(id)?;

        if let Some(handle) = self.entries.remove(id) {
            self.ui.list.remove_workout_entry(handle);
        }
        self.queued_markers.retain(|m| &m.id != id);
        if self.map == MapStatus::Ready {
            self.ui.map.remove_marker(id);
        }

        tracing::info!(id = %id, remaining = self.store.len(), "Workout deleted");
        self.on_store_changed(&change)
    }

    /// Forget all workouts: clear storage, then restore from it again.
    pub fn reset(&mut self) -> Result<()> {
        if let Err(e) = self.persistence.clear() {
            tracing::error!(error = %e, "Failed to clear stored workouts");
            self.ui.notifier.show_error(&e.user_message());
            return Err(e);
        }

        let change = self.store.clear();
        self.entries.clear();
        self.queued_markers.clear();
        self.ui.list.clear_entries();
        if self.map == MapStatus::Ready {
            self.ui.map.clear_markers();
        }
        if matches!(self.state, SessionState::Composing { .. }) {
            self.ui.list.clear_form_fields();
            self.ui.list.hide_form();
            self.state = SessionState::Idle;
        }
        self.on_store_changed(&change)?;

        tracing::info!("Session reset");
        self.restore();
        Ok(())
    }

    /// Rebuild the store from storage and render what was loaded.
    fn restore(&mut self) {
        let workouts = self.persistence.load();
        // Rehydrated contents came from storage; nothing to write back.
        if let Err(e) = self.store.replace_all(workouts) {
            tracing::error!(error = %e, "Failed to restore workouts");
            return;
        }

        let views: Vec<_> = self
            .store
            .all()
            .iter()
            .map(|w| (entry_view(w), marker_view(w)))
            .collect();
        for (entry, marker) in views {
            self.render(&entry, marker);
        }

        tracing::info!(
            count = self.store.len(),
            queued_markers = self.queued_markers.len(),
            "Workouts restored"
        );
    }

    /// React to a store mutation: persist everything except reloads.
    fn on_store_changed(&mut self, change: &StoreChange) -> Result<()> {
        if let StoreChange::Reloaded { count } = change {
            tracing::debug!(count, "Store reloaded");
            return Ok(());
        }

        let result = self.persistence.save(self.store.all());
        if let Err(e) = &result {
            tracing::error!(error = %e, change = ?change, "Failed to persist workouts");
            self.ui.notifier.show_error(&e.user_message());
        }
        result
    }

    fn render(&mut self, entry: &WorkoutEntryView, marker: MarkerView) {
        let handle = self.ui.list.render_workout_entry(entry);
        self.entries.insert(entry.id.clone(), handle);

        if self.map == MapStatus::Ready {
            self.ui.map.add_marker(&marker);
        } else {
            self.queued_markers.push(marker);
        }
    }

    fn on_position(&mut self, center: Coordinates) {
        if !matches!(self.map, MapStatus::Unrequested | MapStatus::Locating) {
            tracing::debug!(map = ?self.map, "Ignoring repeated position");
            return;
        }

        tracing::info!(center = %center, zoom = self.map_zoom, "Initializing map");
        self.ui.map.initialize(center, self.map_zoom);
        self.map = MapStatus::Loading;
    }

    fn on_position_failed(&mut self, err: GeolocationError) {
        tracing::warn!(error = %err, "Could not retrieve location");
        self.map = MapStatus::Unavailable;
        self.queued_markers.clear();
        self.ui
            .notifier
            .show_error(&AppError::from(err).user_message());
    }

    fn on_map_ready(&mut self) {
        if self.map != MapStatus::Loading {
            tracing::debug!(map = ?self.map, "Ignoring unexpected map-ready");
            return;
        }

        self.map = MapStatus::Ready;
        let queued = std::mem::take(&mut self.queued_markers);
        tracing::debug!(count = queued.len(), "Map ready, placing queued markers");
        for marker in &queued {
            self.ui.map.add_marker(marker);
        }
    }

    fn on_map_click(&mut self, location: Coordinates) {
        if self.map != MapStatus::Ready {
            tracing::debug!(map = ?self.map, "Ignoring click before map is ready");
            return;
        }

        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Composing {
                    pending_location: location,
                };
                self.ui.list.show_form();
            }
            SessionState::Composing { .. } => {
                self.state = SessionState::Composing {
                    pending_location: location,
                };
            }
        }
        tracing::debug!(location = %location, "Form location selected");
    }
}
