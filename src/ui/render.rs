// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View data for list entries and map markers.

use serde::Serialize;

use crate::models::{Coordinates, Workout, WorkoutId, WorkoutKind, WorkoutMetrics};

/// A rendered workout list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutEntryView {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    /// e.g. "workout workout--running"
    pub css_class: String,
    pub description: String,
    pub details: Vec<EntryDetail>,
}

/// One icon/value/unit line of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// A map marker with its popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: WorkoutId,
    pub coordinates: Coordinates,
    pub popup_text: String,
    /// e.g. "running-popup"
    pub style_class: String,
}

pub fn kind_icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    }
}

fn detail(icon: &'static str, value: String, unit: &'static str) -> EntryDetail {
    EntryDetail { icon, value, unit }
}

/// Build the list entry for a workout.
pub fn entry_view(workout: &Workout) -> WorkoutEntryView {
    let kind = workout.kind();
    let mut details = vec![
        detail(kind_icon(kind), workout.distance_km().to_string(), "km"),
        detail("⏱", workout.duration_min().to_string(), "min"),
    ];

    match *workout.metrics() {
        WorkoutMetrics::Running {
            cadence_spm,
            pace_min_per_km,
        } => {
            details.push(detail("⚡️", pace_min_per_km.to_string(), "min/km"));
            details.push(detail("🦶🏼", format!("{:.1}", cadence_spm), "spm"));
        }
        WorkoutMetrics::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => {
            details.push(detail("⚡️", format!("{:.1}", speed_km_per_h), "km/h"));
            details.push(detail("⛰", elevation_gain_m.to_string(), "m"));
        }
    }

    WorkoutEntryView {
        id: workout.id().clone(),
        kind,
        css_class: format!("workout workout--{}", kind),
        description: workout.description().to_string(),
        details,
    }
}

/// Build the map marker for a workout.
pub fn marker_view(workout: &Workout) -> MarkerView {
    let kind = workout.kind();
    MarkerView {
        id: workout.id().clone(),
        coordinates: workout.coordinates(),
        popup_text: format!("{}{}", kind_icon(kind), workout.description()),
        style_class: format!("{}-popup", kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutForm;
    use crate::services::factory::WorkoutFactory;

    fn build(form: WorkoutForm) -> Workout {
        WorkoutFactory::new()
            .create_from_form(&form, Coordinates::new(10.0, 20.0))
            .unwrap()
    }

    #[test]
    fn test_running_entry_details() {
        let workout = build(WorkoutForm::running(4.0, 26.0, 172.0));
        let view = entry_view(&workout);

        assert_eq!(view.css_class, "workout workout--running");
        let values: Vec<(&str, &str)> = view
            .details
            .iter()
            .map(|d| (d.value.as_str(), d.unit))
            .collect();
        assert_eq!(
            values,
            vec![
                ("4", "km"),
                ("26", "min"),
                ("6.5", "min/km"),
                ("172.0", "spm")
            ]
        );
    }

    #[test]
    fn test_running_pace_is_not_rounded() {
        let workout = build(WorkoutForm::running(4.0, 25.0, 170.0));
        let view = entry_view(&workout);

        assert_eq!(view.details[2].value, "6.25");
        assert_eq!(view.details[3].value, "170.0");
    }

    #[test]
    fn test_cycling_entry_details() {
        let workout = build(WorkoutForm::cycling(20.0, 40.0, 300.0));
        let view = entry_view(&workout);

        assert_eq!(view.details[2].value, "30.0");
        assert_eq!(view.details[2].unit, "km/h");
        assert_eq!(view.details[3].value, "300");
        assert_eq!(view.details[3].unit, "m");
    }

    #[test]
    fn test_marker_popup_prefixes_icon() {
        let workout = build(WorkoutForm::cycling(20.0, 40.0, 300.0));
        let marker = marker_view(&workout);

        assert_eq!(marker.style_class, "cycling-popup");
        assert_eq!(
            marker.popup_text,
            format!("🚴‍♀️{}", workout.description())
        );
        assert_eq!(marker.coordinates, Coordinates::new(10.0, 20.0));
    }
}
