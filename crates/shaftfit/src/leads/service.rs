use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::domain::{
    is_valid_email, mask_email, normalize_email, normalize_name, LeadRecord, LeadSubmission,
    NewLead, SubmitDebug, SubmitReceipt, VerifyOutcome, VerifyStatus, VERIFY_PATH,
    VERIFY_SUBJECT,
};
use super::repository::{LeadRepository, LeadRepositoryError, Mailer, MailerError, OutboundEmail};
use crate::config::LeadConfig;

const TOKEN_BYTES: usize = 32;

/// Lead capture with e-mail verification. Only token hashes are persisted.
pub struct LeadService<R, M> {
    repository: Arc<R>,
    mailer: Arc<M>,
    config: Arc<LeadConfig>,
}

impl<R, M> LeadService<R, M>
where
    R: LeadRepository + 'static,
    M: Mailer + 'static,
{
    pub fn new(repository: Arc<R>, mailer: Arc<M>, config: LeadConfig) -> Self {
        Self {
            repository,
            mailer,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &LeadConfig {
        &self.config
    }

    /// Stores the lead and mails a verification link.
    pub fn submit(
        &self,
        submission: LeadSubmission,
        now: DateTime<Utc>,
    ) -> Result<SubmitReceipt, LeadServiceError> {
        let missing = self.config.missing_settings();
        if !missing.is_empty() {
            warn!(missing = ?missing, "lead submission refused: settings incomplete");
            return Err(LeadServiceError::MissingSettings(missing));
        }
        let from = self
            .config
            .email_from
            .clone()
            .ok_or_else(|| LeadServiceError::MissingSettings(vec!["LEAD_EMAIL_FROM"]))?;

        let name = normalize_name(&submission.name);
        let email = normalize_email(&submission.email);
        if !is_valid_email(&email) {
            return Err(LeadServiceError::InvalidEmail);
        }

        let token = generate_token();
        let record = self.repository.insert(NewLead {
            name,
            email: email.clone(),
            payload: submission.payload,
            token_hash: sha256_hex(&token),
            created_at: now,
        })?;

        let verify_url = format!("{}{VERIFY_PATH}?token={token}", self.config.site_url);
        let masked = mask_email(&email);
        info!(lead_id = record.id.0, email = %masked, "sending lead verification email");

        let message_id = self
            .mailer
            .send(OutboundEmail {
                from,
                to: email,
                subject: VERIFY_SUBJECT.to_string(),
                html: verification_html(&verify_url),
            })
            .map_err(|error| {
                warn!(email = %masked, %error, "verification email rejected");
                error
            })?;

        if message_id.trim().is_empty() {
            return Err(MailerError::MissingMessageId.into());
        }
        info!(email = %masked, %message_id, "verification email accepted");

        let debug = self.config.expose_debug.then(|| SubmitDebug {
            message_id,
            verify_url,
            to: masked,
        });

        Ok(SubmitReceipt {
            lead_id: record.id,
            debug,
        })
    }

    /// Consumes a verification link. Unknown and stale tokens are reported, not raised.
    pub fn verify(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<VerifyOutcome, LeadServiceError> {
        let token = require_token(token)?;
        let Some(record) = self.repository.find_by_token_hash(&sha256_hex(token))? else {
            info!(found = false, "lead verify lookup");
            return Ok(VerifyOutcome::rejected(VerifyStatus::Invalid));
        };

        let is_latest = self.is_latest(&record)?;
        let is_expired = self.is_expired(&record, now);
        info!(
            found = true,
            already_verified = record.verified_at.is_some(),
            token_age_minutes = (now - record.created_at).num_minutes().max(0),
            is_latest,
            is_expired,
            "lead verify lookup"
        );

        if !is_latest || is_expired {
            return Ok(VerifyOutcome::rejected(VerifyStatus::Expired));
        }
        if record.verified_at.is_some() {
            return Ok(VerifyOutcome::resumable(VerifyStatus::AlreadyVerified, token));
        }

        let status = if self.repository.mark_verified(record.id, now)? {
            VerifyStatus::Verified
        } else {
            VerifyStatus::AlreadyVerified
        };
        Ok(VerifyOutcome::resumable(status, token))
    }

    /// Answers payload stored with the lead, for resuming on the results step.
    pub fn context(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Value, LeadServiceError> {
        let token = require_token(token)?;
        let record = self
            .repository
            .find_by_token_hash(&sha256_hex(token))?
            .ok_or(LeadServiceError::InvalidToken)?;

        if !self.is_latest(&record)? || self.is_expired(&record, now) {
            return Err(LeadServiceError::ExpiredToken);
        }

        Ok(match record.payload {
            Value::Object(payload) => Value::Object(payload),
            _ => Value::Object(Map::new()),
        })
    }

    /// Builds the post-verification redirect against the configured site.
    pub fn redirect_location(&self, outcome: &VerifyOutcome) -> String {
        outcome.redirect_location(&self.config.site_url)
    }

    fn is_latest(&self, record: &LeadRecord) -> Result<bool, LeadServiceError> {
        let latest = self.repository.latest_for_email(&record.email)?;
        Ok(latest == Some(record.id))
    }

    fn is_expired(&self, record: &LeadRecord, now: DateTime<Utc>) -> bool {
        now - record.created_at > self.config.token_ttl()
    }
}

pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn require_token(token: Option<&str>) -> Result<&str, LeadServiceError> {
    match token.map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(LeadServiceError::MissingToken),
    }
}

fn verification_html(verify_url: &str) -> String {
    format!(
        "<h2>Verify your email</h2>\n<p>Click the link below to verify your results:</p>\n<a href=\"{verify_url}\">{verify_url}</a>\n"
    )
}

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error("Missing required settings: {}", .0.join(", "))]
    MissingSettings(Vec<&'static str>),
    #[error("Please provide a valid email address.")]
    InvalidEmail,
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    ExpiredToken,
    #[error(transparent)]
    Repository(#[from] LeadRepositoryError),
    #[error(transparent)]
    Mailer(#[from] MailerError),
}
