use std::sync::Arc;

use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::fitting::answers::{
    Answers, Curve, DriverShaftBucket, DriverStrike, FitFocus, Flight, SpeedEntry, StartLine,
    TempoFeel,
};
use crate::fitting::wizard::{MemorySnapshotStore, SnapshotStore, StoreError, WizardController};

/// Driver answers that satisfy every rare-ceiling condition.
pub(super) fn dialed_in_driver_answers() -> Answers {
    let mut answers = Answers::default();
    answers.driver.speed = SpeedEntry::Measured { mph: Some(105.0) };
    answers.driver.start_line = StartLine::Right;
    answers.driver.curve = Curve::Fade;
    answers.driver.flight = Flight::Low;
    answers.driver.strike = DriverStrike::Center;
    answers.driver.tempo = TempoFeel::Quick;
    answers.driver.shaft_now = DriverShaftBucket::From65To75;
    answers
}

pub(super) fn full_bag_answers() -> Answers {
    Answers {
        focus: FitFocus::FullBag,
        ..Answers::default()
    }
}

pub(super) fn controller() -> (WizardController<MemorySnapshotStore>, Arc<MemorySnapshotStore>) {
    let store = Arc::new(MemorySnapshotStore::default());
    (WizardController::new(store.clone()), store)
}

pub(super) fn controller_with(
    entries: &[(&str, &str)],
) -> (WizardController<MemorySnapshotStore>, Arc<MemorySnapshotStore>) {
    let store = Arc::new(MemorySnapshotStore::with_entries(entries.iter().copied()));
    (WizardController::new(store.clone()), store)
}

pub(super) struct OfflineStore;

impl SnapshotStore for OfflineStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }
}

pub(super) fn json_request(method: &str, uri: &str, body: &Value) -> Request<axum::body::Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .expect("request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
