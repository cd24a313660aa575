// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medisched")]
#[command(author, version, about = "MediSched medication schedule CLI")]
#[command(
    long_about = "Inspect and mutate the medication schedule managed by a Home Assistant\n\
    medical_assistant integration.\n\
    \nConnection settings come from --base-url/--token, the HA_BASE_URL and\n\
    HA_TOKEN environment variables, or a medisched.toml config file, in that\n\
    order.\n\
    \nExamples:\n  \
    medisched schedule                      # Print the full week\n  \
    medisched due --day monday              # Medications already due today\n  \
    medisched add --day Monday --time 09:00:00 --name Aspirin --strength 100mg"
)]
pub struct Cli {
    /// Home Assistant base URL (e.g. http://homeassistant.local:8123)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Long-lived access token
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Path to a TOML config file (defaults to ./medisched.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the full medication schedule as a table
    Schedule,

    /// Print the medications already due, from a day sensor's attributes
    Due(DueArgs),

    /// Print the next scheduled medication
    Next,

    /// Add a medication to the schedule
    Add(AddArgs),

    /// Remove a medication by its record id
    Remove(RemoveArgs),
}

#[derive(Parser)]
pub struct DueArgs {
    /// Day sensor entity id (overrides --day)
    #[arg(long, conflicts_with = "day")]
    pub entity: Option<String>,

    /// Day of week to look at (defaults to today)
    #[arg(long)]
    pub day: Option<String>,
}

#[derive(Parser)]
pub struct AddArgs {
    /// Day of week, e.g. "Monday"
    #[arg(long)]
    pub day: String,

    /// Scheduled time, HH:MM:SS
    #[arg(long)]
    pub time: String,

    /// Medication name
    #[arg(long)]
    pub name: String,

    /// Dose strength, e.g. "100mg"
    #[arg(long)]
    pub strength: String,
}

#[derive(Parser)]
pub struct RemoveArgs {
    /// Record id as listed by `medisched schedule`
    #[arg(long)]
    pub id: String,
}
