// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::traits::ScheduleStore;
use medisched_types::{
    MedicationRecord, MedicationUpdate, NewMedication, RecordId, ViewConfig, Weekday,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Free-text form contents for a new medication. Fields stay opaque text
/// until submission; the time format in particular is not interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationDraft {
    pub day: String,
    pub time: String,
    pub name: String,
    pub strength: String,
}

impl MedicationDraft {
    /// All four fields filled in. This is the only validation the view
    /// layer performs before invoking the add service.
    pub fn is_complete(&self) -> bool {
        !self.day.trim().is_empty()
            && !self.time.trim().is_empty()
            && !self.name.trim().is_empty()
            && !self.strength.trim().is_empty()
    }
}

/// Target of an in-progress edit: a copy of the record plus the row it was
/// taken from. The row is only a handle into the snapshot it came from and
/// is dropped on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub row: usize,
    pub record: MedicationRecord,
}

/// Form display state. An edit target can only exist inside `Edit`, so the
/// "target valid only while the edit form is visible" invariant holds by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Hidden,
    Add { draft: MedicationDraft },
    Edit { target: EditTarget },
}

impl FormState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }
}

/// View-model behind the medication manager card/panel.
///
/// Holds the current schedule snapshot and form state, refreshes after
/// every write, and never propagates store failures to the caller: a failed
/// read renders as an empty list, a failed write leaves the form open.
/// Rendering is the host's job; this type only exposes display-ready data.
pub struct ScheduleView {
    store: Arc<dyn ScheduleStore>,
    config: ViewConfig,
    records: Vec<MedicationRecord>,
    form: FormState,
}

impl std::fmt::Debug for ScheduleView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleView")
            .field("store", &self.store.name())
            .field("config", &self.config)
            .field("records", &self.records.len())
            .field("form", &self.form)
            .finish()
    }
}

impl ScheduleView {
    pub fn new(store: Arc<dyn ScheduleStore>, config: ViewConfig) -> Self {
        Self {
            store,
            config,
            records: Vec::new(),
            form: FormState::Hidden,
        }
    }

    /// Current schedule snapshot, in store order (day-filtered if configured)
    pub fn records(&self) -> &[MedicationRecord] {
        &self.records
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Mutable access to the add-form draft while the add form is open
    pub fn draft_mut(&mut self) -> Option<&mut MedicationDraft> {
        match &mut self.form {
            FormState::Add { draft } => Some(draft),
            FormState::Hidden | FormState::Edit { .. } => None,
        }
    }

    /// Mutable access to the record copy being edited
    pub fn edit_record_mut(&mut self) -> Option<&mut MedicationRecord> {
        match &mut self.form {
            FormState::Edit { target } => Some(&mut target.record),
            FormState::Hidden | FormState::Add { .. } => None,
        }
    }

    /// Called when the component is attached to the host. Fetch failures
    /// are already absorbed by `refresh`, so attach never fails.
    pub async fn attach(&mut self) {
        debug!("Attaching schedule view (store: {})", self.store.name());
        self.refresh().await;
    }

    /// Re-fetch the schedule from the store.
    ///
    /// On success the snapshot is replaced wholesale (order preserved); on
    /// failure it is cleared rather than left stale. Any in-progress edit
    /// is cancelled first, since its row handle dies with the old snapshot.
    pub async fn refresh(&mut self) {
        if self.form.is_editing() {
            debug!("Dropping edit target before refresh");
            self.form = FormState::Hidden;
        }

        match self.store.fetch_schedule().await {
            Ok(mut schedule) => {
                if let Some(day) = self.config.day_filter {
                    schedule.retain(|record| record.day == day);
                }
                debug!("Fetched {} schedule record(s)", schedule.len());
                self.records = schedule;
            }
            Err(e) => {
                error!("Error fetching medications: {:#}", e);
                self.records = Vec::new();
            }
        }
    }

    /// Show or hide the add form. No-op while editing or in read-only mode.
    pub fn toggle_add_form(&mut self) {
        if self.config.read_only {
            warn!("Ignoring add-form toggle on read-only view");
            return;
        }
        match self.form {
            FormState::Hidden => {
                self.form = FormState::Add {
                    draft: MedicationDraft::default(),
                };
            }
            FormState::Add { .. } => {
                self.form = FormState::Hidden;
            }
            FormState::Edit { .. } => {
                warn!("Ignoring add-form toggle while an edit is in progress");
            }
        }
    }

    /// Open the edit form for the record at `row` in the current snapshot.
    /// Out-of-range rows are ignored.
    pub fn begin_edit(&mut self, row: usize) {
        if self.config.read_only {
            warn!("Ignoring edit request on read-only view");
            return;
        }
        let Some(record) = self.records.get(row) else {
            warn!("Ignoring edit request for out-of-range row {}", row);
            return;
        };
        self.form = FormState::Edit {
            target: EditTarget {
                row,
                record: record.clone(),
            },
        };
    }

    /// Drop any open form, discarding draft or edit contents
    pub fn cancel_edit(&mut self) {
        self.form = FormState::Hidden;
    }

    /// Submit the add form.
    ///
    /// Invokes the add service iff all four draft fields are non-empty and
    /// the day parses; otherwise the form stays open untouched. A service
    /// failure also leaves the form open so nothing the user typed is lost.
    pub async fn submit_add(&mut self) {
        let FormState::Add { draft } = &self.form else {
            warn!("submit_add called with no add form open");
            return;
        };
        if !draft.is_complete() {
            debug!("Add form incomplete, not submitting");
            return;
        }
        let day = match Weekday::from_str(&draft.day) {
            Ok(day) => day,
            Err(e) => {
                warn!("Rejecting add submission: {}", e);
                return;
            }
        };
        let medication = NewMedication {
            day,
            name: draft.name.trim().to_owned(),
            strength: draft.strength.trim().to_owned(),
            time: draft.time.trim().to_owned(),
        };

        match self.store.add(&medication).await {
            Ok(()) => {
                info!("Added medication '{}' for {}", medication.name, day);
                self.form = FormState::Hidden;
                self.refresh().await;
            }
            Err(e) => {
                error!("Error adding medication: {:#}", e);
            }
        }
    }

    /// Submit the edit form, addressing the record by its stable id
    pub async fn submit_edit(&mut self) {
        let FormState::Edit { target } = &self.form else {
            warn!("submit_edit called with no edit in progress");
            return;
        };
        let record = &target.record;
        let update = MedicationUpdate {
            id: record.id.clone(),
            day: record.day,
            name: record.name.clone(),
            strength: record.strength.clone(),
            time: record.time.clone(),
        };

        match self.store.update(&update).await {
            Ok(()) => {
                info!("Updated medication {}", update.id);
                self.form = FormState::Hidden;
                self.refresh().await;
            }
            Err(e) => {
                error!("Error updating medication {}: {:#}", update.id, e);
            }
        }
    }

    /// Remove the record at `row` in the current snapshot
    pub async fn remove(&mut self, row: usize) {
        if self.config.read_only {
            warn!("Ignoring remove request on read-only view");
            return;
        }
        let Some(record) = self.records.get(row) else {
            warn!("Ignoring remove request for out-of-range row {}", row);
            return;
        };
        let id: RecordId = record.id.clone();

        match self.store.remove(&id).await {
            Ok(()) => {
                info!("Removed medication {}", id);
                self.refresh().await;
            }
            Err(e) => {
                error!("Error removing medication {}: {:#}", id, e);
            }
        }
    }
}
