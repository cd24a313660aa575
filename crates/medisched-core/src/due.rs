// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::traits::EntitySource;
use chrono::NaiveTime;
use medisched_types::{CardConfig, ConfigError, DueMedication};
use tracing::{debug, warn};

/// Display-ready output of one due-list render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueListModel {
    pub header: String,
    pub lines: Vec<String>,
}

/// Read-only card listing the medications already due today.
///
/// A pure function of one entity state and the current wall-clock time:
/// entries from the entity's `medications` attribute whose time is at or
/// before now. Times are fixed-width zero-padded HH:MM:SS, so plain string
/// comparison orders them correctly.
pub struct DueListCard {
    config: CardConfig,
}

impl std::fmt::Debug for DueListCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DueListCard")
            .field("entity", &self.config.entity)
            .finish()
    }
}

impl DueListCard {
    /// Create the card, failing fast on invalid configuration
    pub fn new(config: CardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn entity_id(&self) -> &str {
        &self.config.entity
    }

    /// Render against the current entity state.
    ///
    /// A missing or unreadable entity becomes an inline message instead of
    /// an error; the card never fails at render time.
    pub async fn render(&self, source: &dyn EntitySource, now: NaiveTime) -> DueListModel {
        let header = self
            .config
            .title
            .clone()
            .unwrap_or_else(|| format!("Medications Due as of {}", now.format("%H:%M:%S")));

        let state = match source.entity_state(&self.config.entity).await {
            Ok(state) => state,
            Err(e) => {
                warn!("Entity {} unavailable: {:#}", self.config.entity, e);
                return DueListModel {
                    header,
                    lines: vec![format!("Entity {} not found.", self.config.entity)],
                };
            }
        };

        let cutoff = now.format("%H:%M:%S").to_string();
        let medications = state.medications();
        let due = due_medications(&medications, &cutoff);
        debug!(
            "Due-list render for {}: {} of {} due at {}",
            self.config.entity,
            due.len(),
            medications.len(),
            cutoff
        );

        let lines = if due.is_empty() {
            vec!["No medications due.".to_owned()]
        } else {
            due.iter().map(|med| format_due_line(med)).collect()
        };

        DueListModel { header, lines }
    }
}

/// Entries whose scheduled time is at or before `cutoff` (both HH:MM:SS)
pub fn due_medications<'a>(
    medications: &'a [DueMedication],
    cutoff: &str,
) -> Vec<&'a DueMedication> {
    medications
        .iter()
        .filter(|med| med.time.as_str() <= cutoff)
        .collect()
}

fn format_due_line(med: &DueMedication) -> String {
    format!("{} - {} ({})", med.time, med.name, med.strength)
}
