// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout persistence over a single named slot.
//!
//! Every save writes a full JSON snapshot of the store. Loading is
//! best-effort: a missing or unreadable slot yields no workouts, and
//! entries that fail validation are skipped.

use std::collections::HashSet;

use crate::db::slot::SlotStorage;
use crate::error::{AppError, Result};
use crate::models::Workout;

/// Serializes workouts to and from one durable slot.
#[derive(Debug, Clone)]
pub struct PersistenceAdapter<S: SlotStorage> {
    storage: S,
    key: String,
}

impl<S: SlotStorage> PersistenceAdapter<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Overwrite the slot with a snapshot of `workouts`.
    pub fn save(&self, workouts: &[Workout]) -> Result<()> {
        let json = serde_json::to_string(workouts)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize workouts: {}", e)))?;
        self.storage.write(&self.key, &json)?;

        tracing::debug!(key = %self.key, count = workouts.len(), "Workouts saved");
        Ok(())
    }

    /// Load workouts, never failing.
    ///
    /// Absent slot → empty. Unreadable or unparsable slot → empty, logged.
    /// Invalid entries and repeated ids are skipped, logged.
    pub fn load(&self) -> Vec<Workout> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored workouts");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read stored workouts");
                return Vec::new();
            }
        };

        let entries: Vec<serde_json::Value> =
            match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&raw) {
                Ok(entries) => entries.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "Stored workouts are corrupt, ignoring");
                    return Vec::new();
                }
            };

        let mut seen = HashSet::new();
        let mut workouts = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Workout>(entry) {
                Ok(workout) if seen.insert(workout.id().clone()) => workouts.push(workout),
                Ok(workout) => {
                    tracing::warn!(index, id = %workout.id(), "Skipping stored workout with repeated id");
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping invalid stored workout");
                }
            }
        }

        tracing::info!(key = %self.key, count = workouts.len(), "Loaded stored workouts");
        workouts
    }

    /// Load workouts, failing on any unreadable, invalid or repeated entry.
    pub fn load_strict(&self) -> Result<Vec<Workout>> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(Vec::new());
        };

        let workouts: Vec<Workout> = serde_json::from_str::<Option<Vec<Workout>>>(&raw)
            .map_err(|e| AppError::PersistenceCorrupt(e.to_string()))?
            .unwrap_or_default();

        let mut seen = HashSet::new();
        if let Some(dup) = workouts.iter().find(|w| !seen.insert(w.id().clone())) {
            return Err(AppError::PersistenceCorrupt(format!(
                "repeated workout id {}",
                dup.id()
            )));
        }

        Ok(workouts)
    }

    /// Remove the slot entirely.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(&self.key)?;
        tracing::info!(key = %self.key, "Stored workouts cleared");
        Ok(())
    }
}
