// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::client::HomeAssistantClient;
use medisched_core::{EntitySource, ScheduleStore};
use medisched_types::{
    EntityState, MedicationRecord, MedicationUpdate, NewMedication, RecordId, RemoveMedication,
    SERVICE_DOMAIN,
};

/// Home Assistant adapter implementing the schedule capability traits.
/// Serializes the typed service payloads onto the integration's services.
pub struct HaScheduleStore {
    client: Arc<HomeAssistantClient>,
}

impl std::fmt::Debug for HaScheduleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HaScheduleStore").finish()
    }
}

impl HaScheduleStore {
    pub fn new(client: Arc<HomeAssistantClient>) -> Self {
        Self { client }
    }

    /// Get reference to the underlying HA client
    pub fn client(&self) -> &Arc<HomeAssistantClient> {
        &self.client
    }

    fn service(name: &str) -> String {
        format!("{}.{}", SERVICE_DOMAIN, name)
    }
}

#[async_trait]
impl ScheduleStore for HaScheduleStore {
    async fn fetch_schedule(&self) -> Result<Vec<MedicationRecord>> {
        let response = self
            .client
            .get_schedule()
            .await
            .context("Failed to fetch medication schedule")?;
        debug!("📋 [STORE] Schedule has {} record(s)", response.schedule.len());
        Ok(response.schedule)
    }

    async fn add(&self, medication: &NewMedication) -> Result<()> {
        let payload = serde_json::to_value(medication)
            .context("Failed to encode add_medication payload")?;
        self.client
            .call_service(&Self::service(NewMedication::SERVICE), payload)
            .await
            .with_context(|| format!("Failed to add medication '{}'", medication.name))?;
        Ok(())
    }

    async fn update(&self, update: &MedicationUpdate) -> Result<()> {
        let payload = serde_json::to_value(update)
            .context("Failed to encode update_medication payload")?;
        self.client
            .call_service(&Self::service(MedicationUpdate::SERVICE), payload)
            .await
            .with_context(|| format!("Failed to update medication {}", update.id))?;
        Ok(())
    }

    async fn remove(&self, id: &RecordId) -> Result<()> {
        let payload = serde_json::to_value(RemoveMedication { id: id.clone() })
            .context("Failed to encode remove_medication payload")?;
        self.client
            .call_service(&Self::service(RemoveMedication::SERVICE), payload)
            .await
            .with_context(|| format!("Failed to remove medication {}", id))?;
        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.client.ping().await?)
    }

    fn name(&self) -> &str {
        "home-assistant"
    }
}

#[async_trait]
impl EntitySource for HaScheduleStore {
    async fn entity_state(&self, entity_id: &str) -> Result<EntityState> {
        let state = self
            .client
            .get_state(entity_id)
            .await
            .with_context(|| format!("Failed to read entity: {}", entity_id))?;
        Ok(state)
    }
}
