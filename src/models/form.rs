// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw workout form input and its numeric draft.

use serde::{Deserialize, Serialize};

use crate::models::WorkoutKind;
use crate::services::factory::ValidationError;

/// Form values exactly as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutForm {
    /// Selected kind ("running" or "cycling")
    pub kind: String,
    /// Distance in km
    pub distance: String,
    /// Duration in min
    pub duration: String,
    /// Cadence in steps/min (running only)
    pub cadence: String,
    /// Elevation gain in m (cycling only)
    pub elevation: String,
}

impl WorkoutForm {
    pub fn running(distance: f64, duration: f64, cadence: f64) -> Self {
        Self {
            kind: WorkoutKind::Running.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: String::new(),
        }
    }

    pub fn cycling(distance: f64, duration: f64, elevation: f64) -> Self {
        Self {
            kind: WorkoutKind::Cycling.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: String::new(),
            elevation: elevation.to_string(),
        }
    }
}

/// Numeric workout input, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutDraft {
    pub kind: WorkoutKind,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Cadence for running, elevation gain for cycling
    pub kind_value: f64,
}

impl TryFrom<&WorkoutForm> for WorkoutDraft {
    type Error = ValidationError;

    /// Only the kind is checked here; numbers are checked by the factory.
    fn try_from(form: &WorkoutForm) -> Result<Self, Self::Error> {
        let kind: WorkoutKind = form.kind.parse()?;
        let kind_field = match kind {
            WorkoutKind::Running => &form.cadence,
            WorkoutKind::Cycling => &form.elevation,
        };

        Ok(Self {
            kind,
            distance_km: parse_number(&form.distance),
            duration_min: parse_number(&form.duration),
            kind_value: parse_number(kind_field),
        })
    }
}

/// Read a numeric form field. Blank reads as 0, garbage reads as NaN.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}
