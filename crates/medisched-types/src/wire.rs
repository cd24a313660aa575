// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::schedule::{MedicationRecord, RecordId, Weekday};
use serde::{Deserialize, Serialize};

/// Service domain registered by the host integration
pub const SERVICE_DOMAIN: &str = "medical_assistant";

/// Tagged read command sent to the integration's message endpoint.
///
/// The tag matches the websocket command id the integration registers, so
/// the same payload works for either transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScheduleCommand {
    #[serde(rename = "medical_assistant/get_schedule")]
    GetSchedule,
}

/// Response to `ScheduleCommand::GetSchedule`. A missing `schedule` field
/// decodes as an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub schedule: Vec<MedicationRecord>,
}

/// Payload for the `add_medication` service.
///
/// Field names follow the service schema, which predates this library
/// (`medication_name`, not `name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedication {
    pub day: Weekday,
    #[serde(rename = "medication_name")]
    pub name: String,
    pub strength: String,
    pub time: String,
}

impl NewMedication {
    pub const SERVICE: &'static str = "add_medication";
}

/// Payload for the `update_medication` service. Addresses the record by its
/// stable id and carries the full replacement field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationUpdate {
    pub id: RecordId,
    pub day: Weekday,
    #[serde(rename = "medication_name")]
    pub name: String,
    pub strength: String,
    pub time: String,
}

impl MedicationUpdate {
    pub const SERVICE: &'static str = "update_medication";
}

/// Payload for the `remove_medication` service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveMedication {
    pub id: RecordId,
}

impl RemoveMedication {
    pub const SERVICE: &'static str = "remove_medication";
}
