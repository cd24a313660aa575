// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

mod args;
mod config;

use anyhow::{Context, Result};
use args::{AddArgs, Cli, Commands, DueArgs, RemoveArgs};
use chrono::{Datelike, Local, Timelike};
use clap::Parser;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use medisched_core::{
    DueListCard, ScheduleStore, day_schedule_entity_id, next_medication, next_medication_state,
};
use medisched_ha::{HaScheduleStore, HomeAssistantClient};
use medisched_types::{CardConfig, NewMedication, RecordId, Weekday};

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let cli = Cli::parse();
    let connection = config::resolve(
        cli.base_url.clone(),
        cli.token.clone(),
        cli.config.as_deref(),
    )?;

    info!("Connecting to Home Assistant at {}", connection.base_url);
    let client = HomeAssistantClient::new(connection.base_url, connection.token)
        .context("Failed to create HA client")?;
    let store = Arc::new(HaScheduleStore::new(Arc::new(client)));

    match cli.command {
        Commands::Schedule => print_schedule(&store).await,
        Commands::Due(args) => print_due(&store, args).await,
        Commands::Next => print_next(&store).await,
        Commands::Add(args) => add_medication(&store, args).await,
        Commands::Remove(args) => remove_medication(&store, args).await,
    }
}

async fn print_schedule(store: &Arc<HaScheduleStore>) -> Result<()> {
    let schedule = store.fetch_schedule().await?;
    if schedule.is_empty() {
        println!("Schedule is empty.");
        return Ok(());
    }

    println!(
        "{:<12} {:<10} {:<10} {:<24} {:<10}",
        "Id", "Day", "Time", "Name", "Strength"
    );
    for record in &schedule {
        println!(
            "{:<12} {:<10} {:<10} {:<24} {:<10}",
            record.id, record.day, record.time, record.name, record.strength
        );
    }
    Ok(())
}

async fn print_due(store: &Arc<HaScheduleStore>, args: DueArgs) -> Result<()> {
    let entity = match (args.entity, args.day) {
        (Some(entity), _) => entity,
        (None, Some(day)) => day_schedule_entity_id(Weekday::from_str(&day)?),
        (None, None) => {
            day_schedule_entity_id(Weekday::from_chrono(Local::now().date_naive().weekday()))
        }
    };

    let card = DueListCard::new(CardConfig::new(entity))?;
    let model = card.render(store.as_ref(), Local::now().time()).await;

    println!("{}", model.header);
    for line in &model.lines {
        println!("  {}", line);
    }
    Ok(())
}

async fn print_next(store: &Arc<HaScheduleStore>) -> Result<()> {
    let schedule = store.fetch_schedule().await?;
    let now = Local::now();
    let today = Weekday::from_chrono(now.date_naive().weekday());
    // Truncate sub-second precision so comparisons match the HH:MM:SS grid
    let time = now
        .time()
        .with_nanosecond(0)
        .unwrap_or_else(|| now.time());

    let next = next_medication(&schedule, today, time);
    println!("{}", next_medication_state(next));
    Ok(())
}

async fn add_medication(store: &Arc<HaScheduleStore>, args: AddArgs) -> Result<()> {
    let medication = NewMedication {
        day: Weekday::from_str(&args.day)?,
        name: args.name,
        strength: args.strength,
        time: args.time,
    };
    store.add(&medication).await?;
    println!("Added '{}' on {} at {}.", medication.name, medication.day, medication.time);
    Ok(())
}

async fn remove_medication(store: &Arc<HaScheduleStore>, args: RemoveArgs) -> Result<()> {
    let id = RecordId::from(args.id);
    store.remove(&id).await?;
    println!("Removed {}.", id);
    Ok(())
}
