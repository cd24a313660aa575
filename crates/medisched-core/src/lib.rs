// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

pub mod due;
pub mod sensors;
pub mod traits;
pub mod view;

pub use due::{due_medications, DueListCard, DueListModel};
pub use sensors::{day_schedule_entity_id, medication_count, next_medication, next_medication_state};
pub use traits::{EntitySource, ScheduleStore};
pub use view::{EditTarget, FormState, MedicationDraft, ScheduleView};
