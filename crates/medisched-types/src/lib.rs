// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

pub mod config;
pub mod entity;
pub mod schedule;
pub mod wire;

// Re-export common types for convenience
pub use config::{CardConfig, ConfigError, ViewConfig};
pub use entity::{DueMedication, EntityState};
pub use schedule::{MedicationRecord, RecordId, Weekday};
pub use wire::{
    MedicationUpdate, NewMedication, RemoveMedication, ScheduleCommand, ScheduleResponse,
    SERVICE_DOMAIN,
};
