// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mergington Activities: extracurricular signup for Mergington High School
//!
//! This crate provides the backend API for viewing activities and
//! registering or unregistering students by email.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{ActivityDirectory, CatalogError};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub directory: ActivityDirectory,
}

impl AppState {
    /// Build state from config, loading the configured catalog.
    pub fn from_config(config: Config) -> Result<Self, CatalogError> {
        let directory = match &config.activities_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading activity catalog");
                ActivityDirectory::load_from_file(path)?
            }
            None => ActivityDirectory::seeded()?,
        }
        .with_capacity_enforcement(config.enforce_capacity);

        Ok(Self { config, directory })
    }
}
