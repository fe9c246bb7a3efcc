// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use mapty_tracker::db::{MemorySlotStorage, PersistenceAdapter};
use mapty_tracker::models::{Coordinates, WorkoutId};
use mapty_tracker::ui::{
    Collaborators, EntryHandle, GeolocationProvider, MapWidget, MarkerView, Notifier,
    WorkoutEntryView, WorkoutListUi,
};
use mapty_tracker::{SessionController, SessionEvent};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const KEY: &str = "workout";
pub const ZOOM: u8 = 13;

/// A collaborator call seen by the recording doubles.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    RequestPosition,
    MapInit(Coordinates, u8),
    AddMarker(MarkerView),
    RemoveMarker(WorkoutId),
    ClearMarkers,
    PanTo(Coordinates, u8, bool),
    ShowForm,
    HideForm,
    ClearFields,
    ToggleField,
    RenderEntry(WorkoutEntryView),
    RemoveEntry(EntryHandle),
    ClearEntries,
    ShowError(String),
    Dismiss,
}

pub type CallLog = Rc<RefCell<Vec<UiCall>>>;

/// Records every collaborator call into a shared log.
#[derive(Clone, Default)]
pub struct Recorder {
    log: CallLog,
    next_handle: Rc<Cell<u64>>,
}

impl Recorder {
    fn record(&self, call: UiCall) {
        self.log.borrow_mut().push(call);
    }
}

impl GeolocationProvider for Recorder {
    fn request_position(&mut self) {
        self.record(UiCall::RequestPosition);
    }
}

impl MapWidget for Recorder {
    fn initialize(&mut self, center: Coordinates, zoom: u8) {
        self.record(UiCall::MapInit(center, zoom));
    }
    fn add_marker(&mut self, marker: &MarkerView) {
        self.record(UiCall::AddMarker(marker.clone()));
    }
    fn remove_marker(&mut self, id: &WorkoutId) {
        self.record(UiCall::RemoveMarker(id.clone()));
    }
    fn clear_markers(&mut self) {
        self.record(UiCall::ClearMarkers);
    }
    fn pan_to(&mut self, center: Coordinates, zoom: u8, animate: bool) {
        self.record(UiCall::PanTo(center, zoom, animate));
    }
}

impl WorkoutListUi for Recorder {
    fn show_form(&mut self) {
        self.record(UiCall::ShowForm);
    }
    fn hide_form(&mut self) {
        self.record(UiCall::HideForm);
    }
    fn clear_form_fields(&mut self) {
        self.record(UiCall::ClearFields);
    }
    fn toggle_kind_specific_field(&mut self) {
        self.record(UiCall::ToggleField);
    }
    fn render_workout_entry(&mut self, entry: &WorkoutEntryView) -> EntryHandle {
        self.record(UiCall::RenderEntry(entry.clone()));
        self.next_handle.set(self.next_handle.get() + 1);
        EntryHandle(self.next_handle.get())
    }
    fn remove_workout_entry(&mut self, handle: EntryHandle) {
        self.record(UiCall::RemoveEntry(handle));
    }
    fn clear_entries(&mut self) {
        self.record(UiCall::ClearEntries);
    }
}

impl Notifier for Recorder {
    fn show_error(&mut self, message: &str) {
        self.record(UiCall::ShowError(message.to_string()));
    }
    fn dismiss(&mut self) {
        self.record(UiCall::Dismiss);
    }
}

/// Build a collaborator bundle that records into one log.
#[allow(dead_code)]
pub fn recording_ui() -> (Collaborators, CallLog) {
    let recorder = Recorder::default();
    let ui = Collaborators {
        geolocation: Box::new(recorder.clone()),
        map: Box::new(recorder.clone()),
        list: Box::new(recorder.clone()),
        notifier: Box::new(recorder.clone()),
    };
    (ui, recorder.log)
}

/// Create a controller over `storage` with recording collaborators.
#[allow(dead_code)]
pub fn test_controller(
    storage: &MemorySlotStorage,
) -> (SessionController<MemorySlotStorage>, CallLog) {
    let (ui, log) = recording_ui();
    let persistence = PersistenceAdapter::new(storage.clone(), KEY);
    (SessionController::new(persistence, ui, ZOOM), log)
}

/// Create a started controller whose map is ready, with an empty call log.
#[allow(dead_code)]
pub fn ready_controller(
    storage: &MemorySlotStorage,
) -> (SessionController<MemorySlotStorage>, CallLog) {
    let (mut controller, log) = test_controller(storage);
    controller.start();
    controller
        .handle(SessionEvent::PositionResolved(Coordinates::new(51.5, -0.1)))
        .unwrap();
    controller.handle(SessionEvent::MapReady).unwrap();
    log.borrow_mut().clear();
    (controller, log)
}

/// Count recorded calls matching `pred`.
#[allow(dead_code)]
pub fn count(log: &CallLog, pred: impl Fn(&UiCall) -> bool) -> usize {
    log.borrow().iter().filter(|c| pred(c)).count()
}
