// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Headless console collaborators and a line-command driver.
//!
//! Collaborator calls are written as text lines to a shared transcript.
//! Answers that a real page would deliver asynchronously (position, map
//! ready) are pushed onto an event queue and handled after each command.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::config::Config;
use crate::db::{PersistenceAdapter, SlotStorage};
use crate::error::Result;
use crate::models::{Coordinates, WorkoutForm, WorkoutId};
use crate::services::session::{SessionController, SessionEvent};
use crate::time_utils::format_utc_rfc3339;
use crate::ui::{
    Collaborators, EntryHandle, GeolocationError, GeolocationProvider, MapWidget, MarkerView,
    Notifier, WorkoutEntryView, WorkoutListUi,
};

pub type EventQueue = Rc<RefCell<VecDeque<SessionEvent>>>;
pub type Transcript = Rc<RefCell<Vec<String>>>;

fn emit(out: &Transcript, line: String) {
    out.borrow_mut().push(line);
}

/// Reports a configured position, or a denial when there is none.
pub struct ConsoleGeolocation {
    home: Option<Coordinates>,
    events: EventQueue,
}

impl GeolocationProvider for ConsoleGeolocation {
    fn request_position(&mut self) {
        let event = match self.home {
            Some(home) => SessionEvent::PositionResolved(home),
            None => SessionEvent::PositionFailed(GeolocationError::Denied(
                "no home position configured".to_string(),
            )),
        };
        self.events.borrow_mut().push_back(event);
    }
}

pub struct ConsoleMap {
    events: EventQueue,
    out: Transcript,
}

impl MapWidget for ConsoleMap {
    fn initialize(&mut self, center: Coordinates, zoom: u8) {
        emit(&self.out, format!("map: centered on {} (zoom {})", center, zoom));
        self.events.borrow_mut().push_back(SessionEvent::MapReady);
    }

    fn add_marker(&mut self, marker: &MarkerView) {
        emit(
            &self.out,
            format!(
                "map: marker {} at {} [{}]",
                marker.popup_text, marker.coordinates, marker.style_class
            ),
        );
    }

    fn remove_marker(&mut self, id: &WorkoutId) {
        emit(&self.out, format!("map: marker {} removed", id));
    }

    fn clear_markers(&mut self) {
        emit(&self.out, "map: markers cleared".to_string());
    }

    fn pan_to(&mut self, center: Coordinates, zoom: u8, animate: bool) {
        let how = if animate { "animated" } else { "instant" };
        emit(
            &self.out,
            format!("map: pan to {} (zoom {}, {})", center, zoom, how),
        );
    }
}

pub struct ConsoleList {
    out: Transcript,
    next_handle: u64,
}

impl WorkoutListUi for ConsoleList {
    fn show_form(&mut self) {
        emit(&self.out, "form: shown".to_string());
    }

    fn hide_form(&mut self) {
        emit(&self.out, "form: hidden".to_string());
    }

    fn clear_form_fields(&mut self) {
        emit(&self.out, "form: cleared".to_string());
    }

    fn toggle_kind_specific_field(&mut self) {
        emit(&self.out, "form: cadence/elevation toggled".to_string());
    }

    fn render_workout_entry(&mut self, entry: &WorkoutEntryView) -> EntryHandle {
        self.next_handle += 1;
        let details: Vec<String> = entry
            .details
            .iter()
            .map(|d| format!("{} {} {}", d.icon, d.value, d.unit))
            .collect();
        emit(
            &self.out,
            format!(
                "list: [{}] {} | {}",
                entry.id,
                entry.description,
                details.join(" | ")
            ),
        );
        EntryHandle(self.next_handle)
    }

    fn remove_workout_entry(&mut self, handle: EntryHandle) {
        emit(&self.out, format!("list: entry #{} removed", handle.0));
    }

    fn clear_entries(&mut self) {
        emit(&self.out, "list: cleared".to_string());
    }
}

pub struct ConsoleNotifier {
    out: Transcript,
}

impl Notifier for ConsoleNotifier {
    fn show_error(&mut self, message: &str) {
        emit(&self.out, format!("notice: {}", message));
    }

    fn dismiss(&mut self) {
        emit(&self.out, "notice: dismissed".to_string());
    }
}

/// A console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(Coordinates),
    Toggle,
    Submit(WorkoutForm),
    Select(WorkoutId),
    Delete(WorkoutId),
    Dismiss,
    List,
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  click <lat> <lng>                          select a location on the map
  toggle                                     switch cadence/elevation field
  submit running <km> <min> <cadence>        log a run at the selected location
  submit cycling <km> <min> <elevation>      log a ride at the selected location
  select <id>                                move the map to a workout
  delete <id>                                delete a workout
  dismiss                                    close the current notice
  list                                       list stored workouts
  reset                                      delete all workouts
  quit";

/// Parse one input line.
pub fn parse_command(line: &str) -> std::result::Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = words.collect();

    let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("click", [lat, lng]) => {
            let lat = lat
                .parse()
                .map_err(|_| CommandError::BadArgument(lat.to_string()))?;
            let lng = lng
                .parse()
                .map_err(|_| CommandError::BadArgument(lng.to_string()))?;
            Command::Click(Coordinates::new(lat, lng))
        }
        ("toggle", []) => Command::Toggle,
        ("submit", [kind, rest @ ..]) if rest.len() <= 3 => {
            let field = |i: usize| rest.get(i).map(|s| s.to_string()).unwrap_or_default();
            let kind_value = field(2);
            let running = kind.eq_ignore_ascii_case("running");
            Command::Submit(WorkoutForm {
                kind: kind.to_string(),
                distance: field(0),
                duration: field(1),
                cadence: if running { kind_value.clone() } else { String::new() },
                elevation: if running { String::new() } else { kind_value },
            })
        }
        ("select", [id]) => Command::Select(WorkoutId::from(*id)),
        ("delete", [id]) => Command::Delete(WorkoutId::from(*id)),
        ("dismiss", []) => Command::Dismiss,
        ("list", []) => Command::List,
        ("reset", []) => Command::Reset,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Errors from parsing console input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command or wrong arguments: {0} (try `help`)")]
    Unknown(String),

    #[error("Not a number: {0}")]
    BadArgument(String),
}

/// A session wired to console collaborators.
pub struct ConsoleSession<S: SlotStorage> {
    controller: SessionController<S>,
    events: EventQueue,
    out: Transcript,
}

impl<S: SlotStorage> ConsoleSession<S> {
    pub fn new(storage: S, config: &Config) -> Self {
        let events: EventQueue = Rc::default();
        let out: Transcript = Rc::default();

        let ui = Collaborators {
            geolocation: Box::new(ConsoleGeolocation {
                home: config.home,
                events: events.clone(),
            }),
            map: Box::new(ConsoleMap {
                events: events.clone(),
                out: out.clone(),
            }),
            list: Box::new(ConsoleList {
                out: out.clone(),
                next_handle: 0,
            }),
            notifier: Box::new(ConsoleNotifier { out: out.clone() }),
        };
        let persistence = PersistenceAdapter::new(storage, config.storage_key.clone());

        Self {
            controller: SessionController::new(persistence, ui, config.map_zoom),
            events,
            out,
        }
    }

    pub fn controller(&self) -> &SessionController<S> {
        &self.controller
    }

    /// Restore stored workouts and settle the startup events.
    pub fn start(&mut self) {
        self.controller.start();
        self.drain_events();
    }

    /// Run one command, then settle any events it caused.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        let result = match command {
            Command::Click(location) => self.controller.handle(SessionEvent::MapClicked(location)),
            Command::Toggle => self.controller.handle(SessionEvent::KindToggled),
            Command::Submit(form) => self.controller.handle(SessionEvent::Submitted(form)),
            Command::Select(id) => self.controller.handle(SessionEvent::EntryClicked(id)),
            Command::Delete(id) => self.controller.delete_workout(&id),
            Command::Dismiss => self.controller.handle(SessionEvent::NoticeDismissed),
            Command::Reset => self.controller.reset(),
            Command::List => {
                self.list();
                Ok(())
            }
            Command::Help => {
                emit(&self.out, HELP.to_string());
                Ok(())
            }
            Command::Quit => Ok(()),
        };
        self.drain_events();
        result
    }

    /// Lines written by the collaborators since the last call.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut *self.out.borrow_mut())
    }

    fn list(&self) {
        let workouts = self.controller.workouts();
        if workouts.is_empty() {
            emit(&self.out, "no workouts".to_string());
        }
        for w in workouts {
            emit(
                &self.out,
                format!(
                    "{}  {}  {}  ({})",
                    w.id(),
                    format_utc_rfc3339(w.created_at()),
                    w.description(),
                    w.coordinates()
                ),
            );
        }
    }

    fn drain_events(&mut self) {
        loop {
            let next = self.events.borrow_mut().pop_front();
            let Some(event) = next else { break };
            if let Err(e) = self.controller.handle(event) {
                tracing::warn!(error = %e, "Queued event failed");
            }
        }
    }
}
