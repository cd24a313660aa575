// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::schedule::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Setup-time configuration errors. These are contract violations by the
/// person wiring up the card, so they fail loudly before anything renders.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required card option '{field}'")]
    MissingField { field: &'static str },
}

/// Configuration for the read-only due-list card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    /// Entity whose `medications` attribute feeds the card, e.g.
    /// "sensor.medical_assistant_monday_schedule"
    pub entity: String,

    /// Optional header override
    #[serde(default)]
    pub title: Option<String>,
}

impl CardConfig {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            title: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entity.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "entity" });
        }
        Ok(())
    }
}

/// Configuration for the schedule manager view.
///
/// One parameterized view covers what used to be separate full-manager,
/// per-day and read-only component variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Hide the add/edit/remove surface entirely
    #[serde(default)]
    pub read_only: bool,

    /// Show only records scheduled for this day
    #[serde(default)]
    pub day_filter: Option<Weekday>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_config_requires_entity() {
        let config = CardConfig::new("");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("entity"));

        let config = CardConfig::new("sensor.medical_assistant_monday_schedule");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn card_config_rejects_whitespace_entity() {
        let config = CardConfig::new("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn view_config_defaults() {
        let config: ViewConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.read_only);
        assert!(config.day_filter.is_none());
    }

    #[test]
    fn view_config_parses_day_filter() {
        let config: ViewConfig =
            serde_json::from_str(r#"{"read_only": true, "day_filter": "Monday"}"#).unwrap();
        assert!(config.read_only);
        assert_eq!(config.day_filter, Some(Weekday::Monday));
    }
}
