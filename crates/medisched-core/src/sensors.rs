// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Helpers mirroring the integration's sensor platform: per-day schedule
//! sensor naming and the "next medication" computation.

use chrono::NaiveTime;
use medisched_types::{MedicationRecord, Weekday};
use tracing::error;

/// Entity id of the per-day schedule sensor, e.g.
/// `sensor.medical_assistant_monday_schedule`
pub fn day_schedule_entity_id(day: Weekday) -> String {
    format!(
        "sensor.medical_assistant_{}_schedule",
        day.to_config_value()
    )
}

/// Number of records scheduled for `day` (a day sensor's state value)
pub fn medication_count(records: &[MedicationRecord], day: Weekday) -> usize {
    records.iter().filter(|r| r.day == day).count()
}

fn parse_time(record: &MedicationRecord) -> Option<NaiveTime> {
    match NaiveTime::parse_from_str(&record.time, "%H:%M:%S") {
        Ok(time) => Some(time),
        Err(e) => {
            error!(
                "Error parsing time '{}' for medication '{}': {}",
                record.time, record.name, e
            );
            None
        }
    }
}

/// Find the next medication relative to the given day and time of day.
///
/// Checks the current day for the earliest record strictly later than now,
/// then walks subsequent days in week order (wrapping) and takes the
/// earliest record of the first day that has any. Records with unparseable
/// times are logged and skipped. Returns `None` when the week is empty.
pub fn next_medication(
    records: &[MedicationRecord],
    today: Weekday,
    now: NaiveTime,
) -> Option<&MedicationRecord> {
    let upcoming_today = records
        .iter()
        .filter(|r| r.day == today)
        .filter_map(|r| parse_time(r).map(|t| (t, r)))
        .filter(|(t, _)| *t > now)
        .min_by_key(|(t, _)| *t);
    if let Some((_, record)) = upcoming_today {
        return Some(record);
    }

    let mut day = today;
    for _ in 1..Weekday::all().len() {
        day = day.next();
        let earliest = records
            .iter()
            .filter(|r| r.day == day)
            .filter_map(|r| parse_time(r).map(|t| (t, r)))
            .min_by_key(|(t, _)| *t);
        if let Some((_, record)) = earliest {
            return Some(record);
        }
    }
    None
}

/// Formatted state string for the next-medication sensor
pub fn next_medication_state(next: Option<&MedicationRecord>) -> String {
    match next {
        Some(record) => format!(
            "{} {} {} ({})",
            record.day, record.time, record.name, record.strength
        ),
        None => "No medication scheduled".to_owned(),
    }
}
