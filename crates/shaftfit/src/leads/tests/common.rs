use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::config::LeadConfig;
use crate::leads::domain::{LeadId, LeadRecord, LeadSubmission, NewLead};
use crate::leads::repository::{
    LeadRepository, LeadRepositoryError, Mailer, MailerError, MemoryLeadRepository, OutboundEmail,
};
use crate::leads::service::LeadService;

pub(super) const SITE_URL: &str = "https://fit.example";

pub(super) fn lead_config() -> LeadConfig {
    LeadConfig::new(
        format!("{SITE_URL}/"),
        Some("Fit Desk <fit@fit.example>".to_string()),
        24,
        true,
    )
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 2, 15, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn submission(email: &str) -> LeadSubmission {
    LeadSubmission {
        name: "  Jordan Pike ".to_string(),
        email: email.to_string(),
        payload: json!({ "focus": "irons", "goal": "feel" }),
    }
}

pub(super) fn build_service() -> (
    LeadService<MemoryLeadRepository, RecordingMailer>,
    Arc<MemoryLeadRepository>,
    Arc<RecordingMailer>,
) {
    build_service_with(lead_config())
}

pub(super) fn build_service_with(
    config: LeadConfig,
) -> (
    LeadService<MemoryLeadRepository, RecordingMailer>,
    Arc<MemoryLeadRepository>,
    Arc<RecordingMailer>,
) {
    let repository = Arc::new(MemoryLeadRepository::default());
    let mailer = Arc::new(RecordingMailer::default());
    let service = LeadService::new(repository.clone(), mailer.clone(), config);
    (service, repository, mailer)
}

#[derive(Default)]
pub(super) struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }

    /// Token from the most recent verification link.
    pub(super) fn last_token(&self) -> String {
        let sent = self.sent();
        let message = sent.last().expect("a message was sent");
        let start = message.html.find("token=").expect("verify link") + "token=".len();
        let rest = &message.html[start..];
        let end = rest.find('"').expect("link terminator");
        rest[..end].to_string()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, message: OutboundEmail) -> Result<String, MailerError> {
        let mut sent = self.sent.lock().expect("mailer mutex poisoned");
        sent.push(message);
        Ok(format!("msg-{}", sent.len()))
    }
}

pub(super) struct RejectingMailer;

impl Mailer for RejectingMailer {
    fn send(&self, _message: OutboundEmail) -> Result<String, MailerError> {
        Err(MailerError::Rejected("domain not verified".to_string()))
    }
}

pub(super) struct SilentMailer;

impl Mailer for SilentMailer {
    fn send(&self, _message: OutboundEmail) -> Result<String, MailerError> {
        Ok(String::new())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _lead: NewLead) -> Result<LeadRecord, LeadRepositoryError> {
        Err(LeadRepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_token_hash(
        &self,
        _token_hash: &str,
    ) -> Result<Option<LeadRecord>, LeadRepositoryError> {
        Err(LeadRepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest_for_email(&self, _email: &str) -> Result<Option<LeadId>, LeadRepositoryError> {
        Err(LeadRepositoryError::Unavailable("database offline".to_string()))
    }

    fn mark_verified(&self, _id: LeadId, _at: DateTime<Utc>) -> Result<bool, LeadRepositoryError> {
        Err(LeadRepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
