// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use serde::{Deserialize, Serialize};

/// A host-managed entity state snapshot (as returned by the states API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    pub attributes: serde_json::Value,
    pub last_changed: String,
    pub last_updated: String,
}

impl EntityState {
    /// Decode the `medications` attribute list exposed by the per-day
    /// schedule sensors. Entries that don't match the expected shape are
    /// dropped rather than failing the whole list.
    pub fn medications(&self) -> Vec<DueMedication> {
        self.attributes
            .get("medications")
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Day-scoped medication entry as published in a sensor's `medications`
/// attribute. The day is implied by the sensor, so only three fields exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueMedication {
    pub time: String,
    pub name: String,
    pub strength: String,
}
