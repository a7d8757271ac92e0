// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity directory: the in-memory catalog and its participant lists.
//!
//! The catalog is loaded once at startup. Only participant lists change
//! afterwards, and every check-then-mutate sequence runs under a single
//! write guard so a student can never appear twice in one activity.

use crate::models::Activity;
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;

/// Seed catalog shipped with the binary.
const SEED_CATALOG: &str = include_str!("../../data/activities.json");

/// Activities keyed by name, in catalog order.
pub type Catalog = IndexMap<String, Activity>;

/// Service owning the activity table.
pub struct ActivityDirectory {
    activities: RwLock<Catalog>,
    enforce_capacity: bool,
}

impl ActivityDirectory {
    /// Build a directory from an already-validated catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            activities: RwLock::new(catalog),
            enforce_capacity: false,
        }
    }

    /// Load the embedded seed catalog.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::load_from_json(SEED_CATALOG)
    }

    /// Load a catalog from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load a catalog from a JSON object of `name -> activity`.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let entries: CatalogEntries = serde_json::from_str(json_data)
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let catalog = entries.into_catalog()?;
        validate_catalog(&catalog)?;

        tracing::info!(count = catalog.len(), "Loaded activity catalog");
        Ok(Self::new(catalog))
    }

    /// Reject signups once an activity reaches `max_participants`.
    pub fn with_capacity_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_capacity = enforce;
        self
    }

    /// Number of activities in the catalog.
    pub async fn len(&self) -> usize {
        self.activities.read().await.len()
    }

    /// Whether the catalog has no activities.
    pub async fn is_empty(&self) -> bool {
        self.activities.read().await.is_empty()
    }

    /// Snapshot of the whole directory, in catalog order.
    pub async fn list_activities(&self) -> Catalog {
        self.activities.read().await.clone()
    }

    /// Snapshot of a single activity.
    pub async fn get_activity(&self, name: &str) -> Result<Activity, DirectoryError> {
        self.activities
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    /// Append `email` to the participants of `name`.
    ///
    /// Returns the confirmation message on success.
    pub async fn signup(&self, name: &str, email: &str) -> Result<String, DirectoryError> {
        let mut activities = self.activities.write().await;
        let activity = activities.get_mut(name).ok_or(DirectoryError::NotFound)?;

        if activity.has_participant(email) {
            tracing::debug!(activity = name, email, "Duplicate signup rejected");
            return Err(DirectoryError::AlreadySignedUp);
        }

        if self.enforce_capacity && activity.spots_left() == 0 {
            tracing::debug!(
                activity = name,
                email,
                max_participants = activity.max_participants,
                "Signup rejected, activity is full"
            );
            return Err(DirectoryError::Full);
        }

        activity.participants.push(email.to_string());
        tracing::info!(
            activity = name,
            email,
            participants = activity.participants.len(),
            spots_left = activity.spots_left(),
            "Student signed up"
        );

        Ok(format!("Signed up {email} for {name}"))
    }

    /// Remove `email` from the participants of `name`.
    ///
    /// Returns the confirmation message on success.
    pub async fn unregister(&self, name: &str, email: &str) -> Result<String, DirectoryError> {
        let mut activities = self.activities.write().await;
        let activity = activities.get_mut(name).ok_or(DirectoryError::NotFound)?;

        let Some(index) = activity.participants.iter().position(|p| p == email) else {
            tracing::debug!(activity = name, email, "Unregister of non-member rejected");
            return Err(DirectoryError::NotRegistered);
        };

        // `remove` keeps the remaining participants in signup order.
        activity.participants.remove(index);
        tracing::info!(
            activity = name,
            email,
            participants = activity.participants.len(),
            "Student unregistered"
        );

        Ok(format!("Removed {email} from {name}"))
    }
}

/// Catalog entries in file order. Repeated names are kept so they can be rejected.
struct CatalogEntries(Vec<(String, Activity)>);

impl<'de> Deserialize<'de> for CatalogEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = CatalogEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of activity name to activity")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Activity>()? {
                    entries.push(entry);
                }
                Ok(CatalogEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl CatalogEntries {
    fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::with_capacity(self.0.len());
        for (name, activity) in self.0 {
            if catalog.contains_key(&name) {
                return Err(CatalogError::DuplicateActivity(name));
            }
            catalog.insert(name, activity);
        }
        Ok(catalog)
    }
}

fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }

    for (name, activity) in catalog {
        if activity.max_participants == 0 {
            return Err(CatalogError::ZeroCapacity(name.clone()));
        }

        let mut seen = HashSet::with_capacity(activity.participants.len());
        for email in &activity.participants {
            if !seen.insert(email.as_str()) {
                return Err(CatalogError::DuplicateParticipant {
                    activity: name.clone(),
                    email: email.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Errors from directory operations.
///
/// The messages double as the `detail` text of API error responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Activity not found")]
    NotFound,

    #[error("Student already signed up for this activity")]
    AlreadySignedUp,

    #[error("Student is not registered for this activity")]
    NotRegistered,

    #[error("Activity is full")]
    Full,
}

/// Errors from loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse catalog JSON: {0}")]
    ParseError(String),

    #[error("Catalog contains no activities")]
    Empty,

    #[error("Activity '{0}' appears more than once")]
    DuplicateActivity(String),

    #[error("Activity '{0}' has max_participants of 0")]
    ZeroCapacity(String),

    #[error("Activity '{activity}' lists {email} more than once")]
    DuplicateParticipant { activity: String, email: String },
}
