//! Lead capture over HTTP: submit a results snapshot, follow the e-mailed link, and
//! hand the stored answers back to a fresh wizard.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use shaftfit::config::LeadConfig;
use shaftfit::fitting::wizard::MemorySnapshotStore;
use shaftfit::fitting::{FitFocus, ResumeOutcome, Step, WizardController};
use shaftfit::leads::{
    lead_router, LeadService, Mailer, MailerError, MemoryLeadRepository, OutboundEmail,
};

#[derive(Default)]
struct Outbox {
    messages: Mutex<Vec<OutboundEmail>>,
}

impl Outbox {
    fn verify_path(&self) -> String {
        let messages = self.messages.lock().expect("outbox mutex poisoned");
        let html = &messages.last().expect("a message was sent").html;
        let start = html.find("/api/lead/verify").expect("verify link");
        let rest = &html[start..];
        rest[..rest.find('"').expect("link terminator")].to_string()
    }
}

impl Mailer for Outbox {
    fn send(&self, message: OutboundEmail) -> Result<String, MailerError> {
        let mut messages = self.messages.lock().expect("outbox mutex poisoned");
        messages.push(message);
        Ok(format!("outbox-{}", messages.len()))
    }
}

fn app() -> (axum::Router, Arc<Outbox>) {
    let outbox = Arc::new(Outbox::default());
    let service = LeadService::new(
        Arc::new(MemoryLeadRepository::default()),
        outbox.clone(),
        LeadConfig::new(
            "https://fit.example",
            Some("fit@fit.example".to_string()),
            24,
            false,
        ),
    );
    (lead_router(Arc::new(service)), outbox)
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn verified_lead_restores_the_saved_session() {
    let (app, outbox) = app();
    let snapshot = json!({
        "focus": "wedges",
        "goal": "feel",
        "handicap_band": 9,
        "wedges": { "turf": "digger", "miss": "fat" }
    });

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/lead")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "name": "Casey",
                        "email": "casey@example.com",
                        "payload": snapshot,
                    })
                    .to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body, json!({ "ok": true }));

    let verify_path = outbox.verify_path();
    let response = app
        .clone()
        .oneshot(Request::get(&verify_path).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect location")
        .to_string();
    assert!(location.starts_with(
        "https://fit.example/diagnostic?step=results&verifyStatus=verified&verified=1&resumeToken="
    ));

    let token = location
        .split_once("resumeToken=")
        .map(|(_, token)| token.to_string())
        .expect("resume token");
    let response = app
        .oneshot(
            Request::get(format!("/api/lead/context?token={token}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["payload"], snapshot);

    let mut wizard = WizardController::new(Arc::new(MemorySnapshotStore::default()));
    let outcome = wizard.resume_with_payload(body["payload"].clone());

    assert_eq!(outcome, ResumeOutcome::Restored);
    assert_eq!(wizard.current_step(), Step::Results);
    let answers = wizard.answers();
    assert_eq!(answers.focus, FitFocus::Wedges);
    assert_eq!(answers.handicap_band, 4);
    assert_eq!(answers.goals.len(), 1);
    assert!(wizard.results().wedges.is_some());
    assert!(wizard.results().driver.is_none());
}

#[tokio::test]
async fn context_without_token_is_a_bad_request() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::get("/api/lead/context")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body, json!({ "ok": false, "error": "Missing token" }));
}
