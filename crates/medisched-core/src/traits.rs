// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use anyhow::Result;
use async_trait::async_trait;
use medisched_types::{EntityState, MedicationUpdate, NewMedication, RecordId};

/// Capability interface over the host's schedule store.
/// View logic uses this trait, never knows about the HA REST surface.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Read the full schedule, in the store's order
    async fn fetch_schedule(&self) -> Result<Vec<medisched_types::MedicationRecord>>;

    /// Append a new medication to the schedule
    async fn add(&self, medication: &NewMedication) -> Result<()>;

    /// Replace an existing record, addressed by its stable id
    async fn update(&self, update: &MedicationUpdate) -> Result<()>;

    /// Remove a record by its stable id
    async fn remove(&self, id: &RecordId) -> Result<()>;

    /// Check if the store is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get store name for logging
    fn name(&self) -> &str;
}

/// Capability interface for reading host entity states.
/// The due-list card only ever needs one entity snapshot per render.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Read the current state of a single entity
    async fn entity_state(&self, entity_id: &str) -> Result<EntityState>;
}
