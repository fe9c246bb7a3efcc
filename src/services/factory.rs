// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout creation: validates raw input and builds typed records.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Coordinates, Workout, WorkoutDraft, WorkoutForm, WorkoutId, WorkoutKind};
use crate::time_utils::{day_month_label, local_date};

/// Builds workouts from validated input.
#[derive(Debug, Default, Clone)]
pub struct WorkoutFactory;

impl WorkoutFactory {
    pub fn new() -> Self {
        Self
    }

    /// Validate form values and build a workout at `coordinates`.
    pub fn create_from_form(
        &self,
        form: &WorkoutForm,
        coordinates: Coordinates,
    ) -> Result<Workout, ValidationError> {
        let draft = WorkoutDraft::try_from(form)?;
        self.create(&draft, coordinates)
    }

    /// Validate a draft and build a workout stamped with the current time.
    pub fn create(
        &self,
        draft: &WorkoutDraft,
        coordinates: Coordinates,
    ) -> Result<Workout, ValidationError> {
        self.create_at(draft, coordinates, Utc::now())
    }

    /// Validate a draft and build a workout stamped with `created_at`.
    ///
    /// The description uses the local calendar date of `created_at`.
    pub fn create_at(
        &self,
        draft: &WorkoutDraft,
        coordinates: Coordinates,
        created_at: DateTime<Utc>,
    ) -> Result<Workout, ValidationError> {
        validate_draft(draft)?;

        let description = describe(draft.kind, local_date(created_at));
        let workout = Workout::assemble(
            WorkoutId::generate(),
            created_at,
            coordinates,
            draft,
            description,
        );

        tracing::debug!(
            id = %workout.id(),
            kind = %workout.kind(),
            distance_km = workout.distance_km(),
            duration_min = workout.duration_min(),
            "Workout built"
        );
        Ok(workout)
    }
}

/// Description shown in lists and popups, e.g. "Running on 5 March".
pub fn describe(kind: WorkoutKind, date: NaiveDate) -> String {
    format!("{} on {}", kind.label(), day_month_label(date))
}

fn kind_field(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "cadence",
        WorkoutKind::Cycling => "elevation gain",
    }
}

/// Check new input against the workout invariants.
///
/// All fields must be finite. Distance, duration and running cadence must be
/// positive. Cycling elevation gain may be zero but not negative.
pub fn validate_draft(draft: &WorkoutDraft) -> Result<(), ValidationError> {
    validate_recorded(draft)?;

    if draft.kind == WorkoutKind::Cycling && draft.kind_value < 0.0 {
        return Err(ValidationError::Negative {
            field: kind_field(draft.kind),
        });
    }

    Ok(())
}

/// Check an already recorded workout, e.g. one read back from storage.
///
/// Same as [`validate_draft`] except that any finite elevation gain is
/// accepted, since older history may hold negative values.
pub fn validate_recorded(draft: &WorkoutDraft) -> Result<(), ValidationError> {
    let value_field = kind_field(draft.kind);

    let fields = [
        ("distance", draft.distance_km),
        ("duration", draft.duration_min),
        (value_field, draft.kind_value),
    ];
    if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(ValidationError::NotFinite { field: *field });
    }

    let must_be_positive: &[(&'static str, f64)] = match draft.kind {
        WorkoutKind::Running => &fields,
        WorkoutKind::Cycling => &fields[..2],
    };
    if let Some((field, _)) = must_be_positive.iter().find(|(_, v)| *v <= 0.0) {
        return Err(ValidationError::NotPositive { field: *field });
    }

    Ok(())
}

/// Errors from workout input validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown workout type: {0}")]
    UnknownKind(String),

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("Workout id is missing")]
    MissingId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn running(distance: f64, duration: f64, cadence: f64) -> WorkoutDraft {
        WorkoutDraft {
            kind: WorkoutKind::Running,
            distance_km: distance,
            duration_min: duration,
            kind_value: cadence,
        }
    }

    fn cycling(distance: f64, duration: f64, elevation: f64) -> WorkoutDraft {
        WorkoutDraft {
            kind: WorkoutKind::Cycling,
            distance_km: distance,
            duration_min: duration,
            kind_value: elevation,
        }
    }

    #[test]
    fn test_describe_formats_kind_day_and_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(describe(WorkoutKind::Running, date), "Running on 5 March");
        assert_eq!(describe(WorkoutKind::Cycling, date), "Cycling on 5 March");
    }

    #[test]
    fn test_create_at_stamps_time_and_description() {
        let created = Utc.with_ymd_and_hms(2024, 7, 14, 12, 0, 0).unwrap();
        let workout = WorkoutFactory::new()
            .create_at(&running(5.0, 30.0, 150.0), Coordinates::new(10.0, 20.0), created)
            .unwrap();

        assert_eq!(workout.created_at(), created);
        assert_eq!(
            workout.description(),
            describe(WorkoutKind::Running, local_date(created))
        );
        assert_eq!(workout.coordinates(), Coordinates::new(10.0, 20.0));
    }

    #[test]
    fn test_each_workout_gets_a_fresh_id() {
        let factory = WorkoutFactory::new();
        let coords = Coordinates::new(0.0, 0.0);
        let a = factory.create(&running(5.0, 30.0, 150.0), coords).unwrap();
        let b = factory.create(&running(5.0, 30.0, 150.0), coords).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_running_rejects_negative_distance() {
        assert_eq!(
            validate_draft(&running(-5.0, 20.0, 30.0)),
            Err(ValidationError::NotPositive { field: "distance" })
        );
    }

    #[test]
    fn test_running_rejects_zero_cadence() {
        assert_eq!(
            validate_draft(&running(5.0, 20.0, 0.0)),
            Err(ValidationError::NotPositive { field: "cadence" })
        );
    }

    #[test]
    fn test_non_finite_is_reported_before_sign() {
        assert_eq!(
            validate_draft(&running(-1.0, f64::NAN, 150.0)),
            Err(ValidationError::NotFinite { field: "duration" })
        );
        assert_eq!(
            validate_draft(&cycling(10.0, 20.0, f64::INFINITY)),
            Err(ValidationError::NotFinite {
                field: "elevation gain"
            })
        );
    }

    #[test]
    fn test_cycling_requires_positive_duration() {
        assert_eq!(
            validate_draft(&cycling(10.0, 0.0, 100.0)),
            Err(ValidationError::NotPositive { field: "duration" })
        );
    }

    // Behavior change: the browser version accepted any finite elevation.
    #[test]
    fn test_cycling_accepts_zero_elevation() {
        assert!(validate_draft(&cycling(20.0, 40.0, 0.0)).is_ok());
    }

    #[test]
    fn test_cycling_rejects_negative_elevation() {
        assert_eq!(
            validate_draft(&cycling(20.0, 40.0, -10.0)),
            Err(ValidationError::Negative {
                field: "elevation gain"
            })
        );
    }

    #[test]
    fn test_recorded_workouts_keep_negative_elevation() {
        assert!(validate_recorded(&cycling(42.0, 120.0, -15.0)).is_ok());
        assert_eq!(
            validate_recorded(&cycling(42.0, 0.0, -15.0)),
            Err(ValidationError::NotPositive { field: "duration" })
        );
        assert_eq!(
            validate_recorded(&cycling(42.0, 120.0, f64::NAN)),
            Err(ValidationError::NotFinite {
                field: "elevation gain"
            })
        );
    }

    #[test]
    fn test_create_from_form_blank_distance_fails() {
        let mut form = WorkoutForm::running(5.0, 30.0, 150.0);
        form.distance = String::new();
        let result = WorkoutFactory::new().create_from_form(&form, Coordinates::new(0.0, 0.0));
        assert_eq!(
            result.unwrap_err(),
            ValidationError::NotPositive { field: "distance" }
        );
    }
}
