use std::sync::Arc;

use chrono::Duration;
use serde_json::json;

use super::common::*;
use crate::config::LeadConfig;
use crate::leads::domain::{LeadSubmission, VerifyStatus, VERIFY_SUBJECT};
use crate::leads::repository::{MailerError, MemoryLeadRepository};
use crate::leads::service::{sha256_hex, LeadService, LeadServiceError};

#[test]
fn submit_stores_hash_and_mails_link() {
    let (service, repository, mailer) = build_service();

    let receipt = service
        .submit(submission("  Jordan@Example.COM "), submitted_at())
        .expect("lead accepted");

    let records = repository.records().expect("records");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, receipt.lead_id);
    assert_eq!(record.name, "Jordan Pike");
    assert_eq!(record.email, "jordan@example.com");
    assert_eq!(record.created_at, submitted_at());
    assert!(record.verified_at.is_none());

    let token = mailer.last_token();
    assert_eq!(token.len(), 64);
    assert_eq!(record.token_hash, sha256_hex(&token));
    assert_ne!(record.token_hash, token);

    let sent = mailer.sent();
    assert_eq!(sent[0].to, "jordan@example.com");
    assert_eq!(sent[0].from, "Fit Desk <fit@fit.example>");
    assert_eq!(sent[0].subject, VERIFY_SUBJECT);

    let debug = receipt.debug.expect("debug exposed");
    assert_eq!(debug.message_id, "msg-1");
    assert_eq!(debug.to, "jo***@example.com");
    assert_eq!(
        debug.verify_url,
        format!("{SITE_URL}/api/lead/verify?token={token}")
    );
}

#[test]
fn submit_rejects_invalid_email_without_side_effects() {
    let (service, repository, mailer) = build_service();

    let err = service
        .submit(submission("jordan@localhost"), submitted_at())
        .expect_err("invalid email");

    assert!(matches!(err, LeadServiceError::InvalidEmail));
    assert!(repository.records().expect("records").is_empty());
    assert!(mailer.sent().is_empty());
}

#[test]
fn submit_requires_sender_setting() {
    let (service, repository, _) =
        build_service_with(LeadConfig::new(SITE_URL, None, 24, true));

    let err = service
        .submit(submission("jordan@example.com"), submitted_at())
        .expect_err("settings missing");

    assert_eq!(err.to_string(), "Missing required settings: LEAD_EMAIL_FROM");
    assert!(repository.records().expect("records").is_empty());
}

#[test]
fn debug_is_hidden_when_disabled() {
    let mut config = lead_config();
    config.expose_debug = false;
    let (service, _, _) = build_service_with(config);

    let receipt = service
        .submit(submission("jordan@example.com"), submitted_at())
        .expect("lead accepted");

    assert!(receipt.debug.is_none());
}

#[test]
fn mailer_failures_surface_after_the_lead_is_stored() {
    let repository = Arc::new(MemoryLeadRepository::default());
    let service = LeadService::new(repository.clone(), Arc::new(RejectingMailer), lead_config());

    let err = service
        .submit(submission("jordan@example.com"), submitted_at())
        .expect_err("mailer rejects");
    assert!(matches!(err, LeadServiceError::Mailer(MailerError::Rejected(_))));
    assert_eq!(err.to_string(), "domain not verified");
    assert_eq!(repository.records().expect("records").len(), 1);

    let service = LeadService::new(
        Arc::new(MemoryLeadRepository::default()),
        Arc::new(SilentMailer),
        lead_config(),
    );
    let err = service
        .submit(submission("jordan@example.com"), submitted_at())
        .expect_err("no message id");
    assert!(matches!(err, LeadServiceError::Mailer(MailerError::MissingMessageId)));
}

#[test]
fn verify_marks_once_then_reports_already_verified() {
    let (service, repository, mailer) = build_service();
    service
        .submit(submission("jordan@example.com"), submitted_at())
        .expect("lead accepted");
    let token = mailer.last_token();
    let verified_at = submitted_at() + Duration::minutes(5);

    let first = service
        .verify(Some(&token), verified_at)
        .expect("verify succeeds");
    assert_eq!(first.status, VerifyStatus::Verified);
    assert_eq!(first.resume_token.as_deref(), Some(token.as_str()));
    assert_eq!(
        repository.records().expect("records")[0].verified_at,
        Some(verified_at)
    );

    let second = service
        .verify(Some(&token), verified_at + Duration::minutes(1))
        .expect("verify succeeds");
    assert_eq!(second.status, VerifyStatus::AlreadyVerified);
    assert_eq!(
        repository.records().expect("records")[0].verified_at,
        Some(verified_at)
    );
    assert_eq!(
        service.redirect_location(&second),
        format!(
            "{SITE_URL}/diagnostic?step=results&verifyStatus=already_verified&verified=1&resumeToken={token}"
        )
    );
}

#[test]
fn verify_reports_unknown_and_missing_tokens() {
    let (service, _, _) = build_service();

    let outcome = service
        .verify(Some("not-a-token"), submitted_at())
        .expect("lookup succeeds");
    assert_eq!(outcome.status, VerifyStatus::Invalid);
    assert!(outcome.resume_token.is_none());

    let err = service.verify(Some("   "), submitted_at()).expect_err("blank");
    assert!(matches!(err, LeadServiceError::MissingToken));
    let err = service.verify(None, submitted_at()).expect_err("absent");
    assert!(matches!(err, LeadServiceError::MissingToken));
}

#[test]
fn stale_and_superseded_tokens_expire() {
    let (service, repository, mailer) = build_service();
    service
        .submit(submission("jordan@example.com"), submitted_at())
        .expect("lead accepted");
    let token = mailer.last_token();

    let late = service
        .verify(Some(&token), submitted_at() + Duration::hours(25))
        .expect("lookup succeeds");
    assert_eq!(late.status, VerifyStatus::Expired);
    assert!(late.resume_token.is_none());
    assert!(repository.records().expect("records")[0].verified_at.is_none());

    service
        .submit(
            submission("JORDAN@example.com"),
            submitted_at() + Duration::minutes(10),
        )
        .expect("second lead accepted");
    let superseded = service
        .verify(Some(&token), submitted_at() + Duration::minutes(20))
        .expect("lookup succeeds");
    assert_eq!(superseded.status, VerifyStatus::Expired);

    let err = service
        .context(Some(&token), submitted_at() + Duration::minutes(20))
        .expect_err("superseded token");
    assert!(matches!(err, LeadServiceError::ExpiredToken));

    let latest = mailer.last_token();
    let fresh = service
        .verify(Some(&latest), submitted_at() + Duration::minutes(20))
        .expect("lookup succeeds");
    assert_eq!(fresh.status, VerifyStatus::Verified);
}

#[test]
fn context_returns_stored_payload() {
    let (service, _, mailer) = build_service();
    service
        .submit(submission("jordan@example.com"), submitted_at())
        .expect("lead accepted");
    let token = mailer.last_token();

    let payload = service
        .context(Some(&token), submitted_at() + Duration::hours(1))
        .expect("context available");
    assert_eq!(payload, json!({ "focus": "irons", "goal": "feel" }));

    let err = service
        .context(Some("unknown"), submitted_at())
        .expect_err("unknown token");
    assert!(matches!(err, LeadServiceError::InvalidToken));

    let err = service
        .context(Some(&token), submitted_at() + Duration::hours(30))
        .expect_err("expired");
    assert!(matches!(err, LeadServiceError::ExpiredToken));
}

#[test]
fn context_replaces_non_object_payloads() {
    let (service, _, mailer) = build_service();
    service
        .submit(
            LeadSubmission {
                name: "Jordan".to_string(),
                email: "jordan@example.com".to_string(),
                payload: json!(["not", "an", "object"]),
            },
            submitted_at(),
        )
        .expect("lead accepted");

    let payload = service
        .context(Some(&mailer.last_token()), submitted_at())
        .expect("context available");
    assert_eq!(payload, json!({}));
}

#[test]
fn repository_outages_are_reported() {
    let service = LeadService::new(
        Arc::new(UnavailableRepository),
        Arc::new(RecordingMailer::default()),
        lead_config(),
    );

    let err = service
        .submit(submission("jordan@example.com"), submitted_at())
        .expect_err("store offline");
    assert!(matches!(err, LeadServiceError::Repository(_)));

    let err = service
        .verify(Some("abc"), submitted_at())
        .expect_err("store offline");
    assert_eq!(err.to_string(), "lead store unavailable: database offline");
}
