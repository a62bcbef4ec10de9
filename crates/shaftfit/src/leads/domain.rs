use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NAME_MAX_CHARS: usize = 80;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const VERIFY_PATH: &str = "/api/lead/verify";
pub const RESULTS_PATH: &str = "/diagnostic";
pub const VERIFY_SUBJECT: &str = "Verify your Golf Fit Summary";

/// Raw request body for a lead capture.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Answers snapshot to restore after verification.
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub u64);

/// Lead as handed to the repository; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub payload: Value,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadRecord {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub payload: Value,
    /// SHA-256 hex of the verification token. The token itself is never stored.
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl LeadRecord {
    pub fn from_new(id: LeadId, lead: NewLead) -> Self {
        Self {
            id,
            name: lead.name,
            email: lead.email,
            payload: lead.payload,
            token_hash: lead.token_hash,
            created_at: lead.created_at,
            verified_at: None,
        }
    }
}

/// Details echoed back outside production so the flow can be exercised without an inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitDebug {
    pub message_id: String,
    pub verify_url: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub lead_id: LeadId,
    pub debug: Option<SubmitDebug>,
}

/// Body returned by the lead endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<SubmitDebug>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl LeadResponse {
    pub fn accepted(debug: Option<SubmitDebug>) -> Self {
        Self {
            ok: true,
            error: None,
            debug,
            payload: None,
        }
    }

    pub fn context(payload: Value) -> Self {
        Self {
            ok: true,
            error: None,
            debug: None,
            payload: Some(payload),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            debug: None,
            payload: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyStatus {
    Verified,
    AlreadyVerified,
    Expired,
    Invalid,
}

impl VerifyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::AlreadyVerified => "already_verified",
            Self::Expired => "expired",
            Self::Invalid => "invalid",
        }
    }

    pub const fn is_verified(self) -> bool {
        matches!(self, Self::Verified | Self::AlreadyVerified)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub status: VerifyStatus,
    /// Handed back as `resumeToken` so the results page can fetch the payload.
    pub resume_token: Option<String>,
}

impl VerifyOutcome {
    pub fn rejected(status: VerifyStatus) -> Self {
        Self {
            status,
            resume_token: None,
        }
    }

    pub fn resumable(status: VerifyStatus, token: &str) -> Self {
        Self {
            status,
            resume_token: Some(token.to_string()),
        }
    }

    /// Results-page URL the verify link redirects to.
    pub fn redirect_location(&self, site_url: &str) -> String {
        let mut location = format!(
            "{}{RESULTS_PATH}?step=results&verifyStatus={}",
            site_url.trim_end_matches('/'),
            self.status.as_str()
        );
        if self.status.is_verified() {
            location.push_str("&verified=1");
        }
        if let Some(token) = &self.resume_token {
            location.push_str("&resumeToken=");
            location.push_str(&encode_query_value(token));
        }
        location
    }
}

pub fn normalize_name(raw: &str) -> String {
    raw.trim().chars().take(NAME_MAX_CHARS).collect()
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .take(EMAIL_MAX_CHARS)
        .collect()
}

pub fn is_valid_email(email: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// `jo***@example.com`; anything without both parts becomes `[invalid-email]`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let visible: String = local.chars().take(2).collect();
            format!("{visible}***@{domain}")
        }
        _ => "[invalid-email]".to_string(),
    }
}

fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(char::from(byte))
            }
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}
