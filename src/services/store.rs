// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory workout collection, the source of truth during a session.
//!
//! Every mutation returns a [`StoreChange`] so the owner can react to it
//! (persist, re-render) in one place.

use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutId};

/// What a store mutation did.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    Appended(WorkoutId),
    Replaced(WorkoutId),
    Removed(WorkoutId),
    /// Contents rebuilt wholesale (rehydration or clear).
    Reloaded { count: usize },
}

/// Ordered workouts, oldest first, ids unique.
#[derive(Debug, Default, Clone)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout. Rejects an id that is already present.
    pub fn append(&mut self, workout: Workout) -> Result<StoreChange> {
        if self.find_by_id(workout.id()).is_some() {
            return Err(AppError::DuplicateId(workout.id().clone()));
        }

        let id = workout.id().clone();
        self.workouts.push(workout);
        Ok(StoreChange::Appended(id))
    }

    /// All workouts in insertion order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// Linear scan; stores hold a session's worth of workouts.
    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// Replace the whole contents. Rejects input with repeated ids,
    /// leaving the current contents untouched.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) -> Result<StoreChange> {
        for (i, workout) in workouts.iter().enumerate() {
            if workouts[..i].iter().any(|w| w.id() == workout.id()) {
                return Err(AppError::DuplicateId(workout.id().clone()));
            }
        }

        let count = workouts.len();
        self.workouts = workouts;
        Ok(StoreChange::Reloaded { count })
    }

    /// Replace the workout with the same id, keeping its position.
    pub fn replace(&mut self, workout: Workout) -> Result<StoreChange> {
        let slot = self
            .workouts
            .iter_mut()
            .find(|w| w.id() == workout.id())
            .ok_or_else(|| AppError::NotFound(workout.id().to_string()))?;

        let id = workout.id().clone();
        *slot = workout;
        Ok(StoreChange::Replaced(id))
    }

    /// Remove a workout by id, keeping the order of the rest.
    pub fn remove(&mut self, id: &WorkoutId) -> Result<(Workout, StoreChange)> {
        let index = self
            .workouts
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        let removed = self.workouts.remove(index);
        Ok((removed, StoreChange::Removed(id.clone())))
    }

    pub fn clear(&mut self) -> StoreChange {
        self.workouts.clear();
        StoreChange::Reloaded { count: 0 }
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, WorkoutForm};
    use crate::services::factory::WorkoutFactory;

    fn make_workout(distance: f64) -> Workout {
        WorkoutFactory::new()
            .create_from_form(
                &WorkoutForm::running(distance, 30.0, 150.0),
                Coordinates::new(10.0, 20.0),
            )
            .unwrap()
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut store = WorkoutStore::new();
        let first = make_workout(1.0);
        let second = make_workout(2.0);
        let first_id = first.id().clone();
        let second_id = second.id().clone();

        assert_eq!(
            store.append(first).unwrap(),
            StoreChange::Appended(first_id.clone())
        );
        store.append(second).unwrap();

        let ids: Vec<_> = store.all().iter().map(|w| w.id().clone()).collect();
        assert_eq!(ids, vec![first_id, second_id]);
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let mut store = WorkoutStore::new();
        let workout = make_workout(1.0);
        store.append(workout.clone()).unwrap();

        let err = store.append(workout).unwrap_err();

        assert!(matches!(err, AppError::DuplicateId(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_find_by_id() {
        let mut store = WorkoutStore::new();
        let workout = make_workout(3.0);
        let id = workout.id().clone();
        store.append(workout).unwrap();

        assert_eq!(store.find_by_id(&id).map(|w| w.distance_km()), Some(3.0));
        assert!(store.find_by_id(&WorkoutId::from("missing")).is_none());
    }

    #[test]
    fn test_replace_all_rejects_duplicates_and_keeps_contents() {
        let mut store = WorkoutStore::new();
        let kept = make_workout(1.0);
        store.append(kept.clone()).unwrap();

        let dup = make_workout(2.0);
        let err = store.replace_all(vec![dup.clone(), dup]).unwrap_err();

        assert!(matches!(err, AppError::DuplicateId(_)));
        assert_eq!(store.all(), &[kept]);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut store = WorkoutStore::new();
        let workouts: Vec<_> = (1..=3).map(|d| make_workout(d as f64)).collect();
        store.replace_all(workouts.clone()).unwrap();

        let (removed, change) = store.remove(workouts[1].id()).unwrap();

        assert_eq!(removed.id(), workouts[1].id());
        assert_eq!(change, StoreChange::Removed(workouts[1].id().clone()));
        assert_eq!(store.all(), &[workouts[0].clone(), workouts[2].clone()]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = WorkoutStore::new();
        let workouts: Vec<_> = (1..=3).map(|d| make_workout(d as f64)).collect();
        store.replace_all(workouts.clone()).unwrap();

        let updated = workouts[0].clone();
        store.replace(updated).unwrap();

        assert_eq!(store.all()[0].id(), workouts[0].id());
        assert!(matches!(
            store.replace(make_workout(9.0)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_unknown_id_is_not_found() {
        let mut store = WorkoutStore::new();
        assert!(matches!(
            store.remove(&WorkoutId::from("nope")),
            Err(AppError::NotFound(_))
        ));
    }
}
