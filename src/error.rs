// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing messages.

use crate::db::slot::StorageError;
use crate::models::WorkoutId;
use crate::services::factory::ValidationError;
use crate::ui::GeolocationError;

/// Application error type shared by the store, persistence and session layers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid workout input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("Stored workouts could not be parsed: {0}")]
    PersistenceCorrupt(String),

    #[error("Duplicate workout id: {0}")]
    DuplicateId(WorkoutId),

    #[error("Workout not found: {0}")]
    NotFound(String),

    #[error("No map location selected for the new workout")]
    NoPendingLocation,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl AppError {
    /// Message shown to the user by the notification UI.
    ///
    /// Internal failures are logged rather than described to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Inputs have to be positive numbers!".to_string(),
            AppError::Geolocation(_) => "Could not retrieve location".to_string(),
            AppError::PersistenceCorrupt(_) => "Saved workouts could not be read".to_string(),
            AppError::NotFound(_) => "That workout no longer exists".to_string(),
            AppError::NoPendingLocation => "Click on the map to place the workout".to_string(),
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                "Workouts could not be saved".to_string()
            }
            AppError::DuplicateId(id) => {
                tracing::error!(id = %id, "Duplicate workout id");
                "Something went wrong".to_string()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                "Something went wrong".to_string()
            }
        }
    }

    /// Whether the error leaves the session usable with nothing lost.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::DuplicateId(_) | AppError::Internal(_))
    }
}

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, AppError>;
