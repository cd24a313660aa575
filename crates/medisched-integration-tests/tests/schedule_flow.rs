// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! End-to-end flow against a mocked Home Assistant: HTTP client → schedule
//! store → view, exercising the same request/response shapes the real
//! integration serves.

use chrono::NaiveTime;
use medisched_core::{DueListCard, ScheduleView};
use medisched_ha::{HaScheduleStore, HomeAssistantClient};
use medisched_types::{CardConfig, RecordId, ViewConfig};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::sync::Arc;

fn store_for(server: &ServerGuard) -> Arc<HaScheduleStore> {
    let client = HomeAssistantClient::new(server.url(), "test_token").unwrap();
    Arc::new(HaScheduleStore::new(Arc::new(client)))
}

#[tokio::test]
async fn initial_render_is_empty_then_shows_fetched_record() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/medical_assistant/ws")
        .match_body(Matcher::Json(json!({
            "type": "medical_assistant/get_schedule"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "schedule": [
                    {
                        "id": "med-1",
                        "day": "Monday",
                        "time": "09:00:00",
                        "name": "Aspirin",
                        "strength": "100mg"
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let mut view = ScheduleView::new(store, ViewConfig::default());

    // Before attach there is nothing to show
    assert!(view.records().is_empty());

    view.attach().await;

    let records = view.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, RecordId::from("med-1"));
    assert_eq!(records[0].day.to_string(), "Monday");
    assert_eq!(records[0].time, "09:00:00");
    assert_eq!(records[0].name, "Aspirin");
    assert_eq!(records[0].strength, "100mg");
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_host_renders_empty_list() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/medical_assistant/ws")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let store = store_for(&server);
    let mut view = ScheduleView::new(store, ViewConfig::default());
    view.attach().await;

    assert!(view.records().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn add_submission_invokes_service_and_refetches() {
    let mut server = Server::new_async().await;

    // Schedule is empty on first fetch, has one record after the add.
    let first_fetch = server
        .mock("POST", "/api/medical_assistant/ws")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"schedule": []}).to_string())
        .create_async()
        .await;

    let store = store_for(&server);
    let mut view = ScheduleView::new(store, ViewConfig::default());
    view.attach().await;
    assert!(view.records().is_empty());
    first_fetch.assert_async().await;

    let add_service = server
        .mock("POST", "/api/services/medical_assistant/add_medication")
        .match_body(Matcher::Json(json!({
            "day": "Monday",
            "medication_name": "Aspirin",
            "strength": "100mg",
            "time": "09:00:00"
        })))
        .with_status(200)
        .create_async()
        .await;
    let refetch = server
        .mock("POST", "/api/medical_assistant/ws")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "schedule": [
                    {
                        "id": "med-1",
                        "day": "Monday",
                        "time": "09:00:00",
                        "name": "Aspirin",
                        "strength": "100mg"
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    view.toggle_add_form();
    let draft = view.draft_mut().unwrap();
    draft.day = "Monday".to_owned();
    draft.time = "09:00:00".to_owned();
    draft.name = "Aspirin".to_owned();
    draft.strength = "100mg".to_owned();

    view.submit_add().await;

    assert!(!view.form().is_visible());
    assert_eq!(view.records().len(), 1);
    add_service.assert_async().await;
    refetch.assert_async().await;
}

#[tokio::test]
async fn remove_sends_record_id_from_snapshot() {
    let mut server = Server::new_async().await;
    let fetch = server
        .mock("POST", "/api/medical_assistant/ws")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "schedule": [
                    {
                        "id": "med-9",
                        "day": "Friday",
                        "time": "18:00:00",
                        "name": "Ibuprofen",
                        "strength": "200mg"
                    }
                ]
            })
            .to_string(),
        )
        .expect(2) // initial fetch + post-remove refresh
        .create_async()
        .await;
    let remove_service = server
        .mock("POST", "/api/services/medical_assistant/remove_medication")
        .match_body(Matcher::Json(json!({"id": "med-9"})))
        .with_status(200)
        .create_async()
        .await;

    let store = store_for(&server);
    let mut view = ScheduleView::new(store, ViewConfig::default());
    view.attach().await;
    view.remove(0).await;

    remove_service.assert_async().await;
    fetch.assert_async().await;
}

#[tokio::test]
async fn due_card_renders_from_day_sensor() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            "/api/states/sensor.medical_assistant_monday_schedule",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "entity_id": "sensor.medical_assistant_monday_schedule",
                "state": "2",
                "attributes": {
                    "medications": [
                        {"time": "08:00:00", "name": "Aspirin", "strength": "100mg"},
                        {"time": "20:00:00", "name": "Ibuprofen", "strength": "200mg"}
                    ]
                },
                "last_changed": "2026-08-24T08:00:00Z",
                "last_updated": "2026-08-24T08:00:00Z"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let card =
        DueListCard::new(CardConfig::new("sensor.medical_assistant_monday_schedule")).unwrap();
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();

    let model = card.render(store.as_ref(), noon).await;

    assert_eq!(model.header, "Medications Due as of 12:00:00");
    assert_eq!(model.lines, vec!["08:00:00 - Aspirin (100mg)".to_owned()]);
    mock.assert_async().await;
}

#[tokio::test]
async fn due_card_reports_missing_entity_inline() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/states/sensor.medical_assistant_monday_schedule")
        .with_status(404)
        .create_async()
        .await;

    let store = store_for(&server);
    let card =
        DueListCard::new(CardConfig::new("sensor.medical_assistant_monday_schedule")).unwrap();
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();

    let model = card.render(store.as_ref(), noon).await;

    assert_eq!(
        model.lines,
        vec!["Entity sensor.medical_assistant_monday_schedule not found.".to_owned()]
    );
    mock.assert_async().await;
}
