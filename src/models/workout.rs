// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model: one logged exercise session and its derived metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::form::WorkoutDraft;
use crate::services::factory::{validate_recorded, ValidationError};

/// Opaque workout identifier, stable for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a fresh identifier. Identifiers are never reused.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(c: Coordinates) -> Self {
        (c.lat, c.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// Workout kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase name, as used in storage and CSS classes.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name, as used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// Kind-specific inputs and the metric derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutMetrics {
    Running {
        cadence_spm: f64,
        /// duration / distance (min/km)
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        /// distance / hours (km/h)
        speed_km_per_h: f64,
    },
}

impl WorkoutMetrics {
    /// Compute the derived metric for a kind from the raw inputs.
    pub fn derive(kind: WorkoutKind, distance_km: f64, duration_min: f64, kind_value: f64) -> Self {
        match kind {
            WorkoutKind::Running => WorkoutMetrics::Running {
                cadence_spm: kind_value,
                pace_min_per_km: duration_min / distance_km,
            },
            WorkoutKind::Cycling => WorkoutMetrics::Cycling {
                elevation_gain_m: kind_value,
                speed_km_per_h: distance_km / (duration_min / 60.0),
            },
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutMetrics::Running { .. } => WorkoutKind::Running,
            WorkoutMetrics::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A logged workout. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredWorkout", into = "StoredWorkout")]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    metrics: WorkoutMetrics,
}

impl Workout {
    /// Assemble a workout from an already validated draft.
    pub(crate) fn assemble(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        draft: &WorkoutDraft,
        description: String,
    ) -> Self {
        Self {
            id,
            created_at,
            coordinates,
            distance_km: draft.distance_km,
            duration_min: draft.duration_min,
            description,
            metrics: WorkoutMetrics::derive(
                draft.kind,
                draft.distance_km,
                draft.duration_min,
                draft.kind_value,
            ),
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn metrics(&self) -> &WorkoutMetrics {
        &self.metrics
    }

    pub fn kind(&self) -> WorkoutKind {
        self.metrics.kind()
    }
}

/// Stored workout entry, in the layout of the browser-era `workout` slot.
///
/// Derived fields are written for readers of the raw slot but ignored on read:
/// pace and speed are always recomputed from distance and duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredWorkout {
    pub id: String,
    pub date: DateTime<Utc>,
    pub coords: Coordinates,
    pub distance: f64,
    pub duration: f64,
    pub description: String,
    #[serde(flatten)]
    pub details: StoredDetails,
}

/// Kind-tagged part of a stored entry (`"type": "running" | "cycling"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoredDetails {
    Running {
        cadence: f64,
        #[serde(default)]
        pace: Option<f64>,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        #[serde(default)]
        speed: Option<f64>,
    },
}

impl From<Workout> for StoredWorkout {
    fn from(w: Workout) -> Self {
        let details = match w.metrics {
            WorkoutMetrics::Running {
                cadence_spm,
                pace_min_per_km,
            } => StoredDetails::Running {
                cadence: cadence_spm,
                pace: Some(pace_min_per_km),
            },
            WorkoutMetrics::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => StoredDetails::Cycling {
                elevation_gain: elevation_gain_m,
                speed: Some(speed_km_per_h),
            },
        };

        Self {
            id: w.id.0,
            date: w.created_at,
            coords: w.coordinates,
            distance: w.distance_km,
            duration: w.duration_min,
            description: w.description,
            details,
        }
    }
}

impl TryFrom<StoredWorkout> for Workout {
    type Error = ValidationError;

    fn try_from(stored: StoredWorkout) -> Result<Self, Self::Error> {
        if stored.id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }

        let (kind, kind_value) = match stored.details {
            StoredDetails::Running { cadence, .. } => (WorkoutKind::Running, cadence),
            StoredDetails::Cycling { elevation_gain, .. } => (WorkoutKind::Cycling, elevation_gain),
        };
        let draft = WorkoutDraft {
            kind,
            distance_km: stored.distance,
            duration_min: stored.duration,
            kind_value,
        };
        validate_recorded(&draft)?;

        Ok(Workout::assemble(
            WorkoutId(stored.id),
            stored.date,
            stored.coords,
            &draft,
            stored.description,
        ))
    }
}
