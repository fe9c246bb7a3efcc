// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mapty: log runs and rides at places on a map.
//!
//! This crate provides the workout model, its validation and derived
//! metrics, the session state machine that drives the map/list UI, and
//! persistence of the workout history to a named storage slot.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
pub mod ui;

pub use error::{AppError, Result};
pub use services::{SessionController, SessionEvent, SessionState};
