use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{LeadId, LeadRecord, NewLead};

/// Lead storage. Implementations must keep `latest_for_email` ordered by creation time.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, lead: NewLead) -> Result<LeadRecord, LeadRepositoryError>;
    fn find_by_token_hash(&self, token_hash: &str)
        -> Result<Option<LeadRecord>, LeadRepositoryError>;
    fn latest_for_email(&self, email: &str) -> Result<Option<LeadId>, LeadRepositoryError>;
    /// Sets `verified_at` only when it is still empty; returns whether this call set it.
    fn mark_verified(&self, id: LeadId, at: DateTime<Utc>) -> Result<bool, LeadRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LeadRepositoryError {
    #[error("lead not found")]
    NotFound,
    #[error("lead store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Outbound e-mail transport. Returns the provider's message id.
pub trait Mailer: Send + Sync {
    fn send(&self, message: OutboundEmail) -> Result<String, MailerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("{0}")]
    Rejected(String),
    #[error("Email provider did not return a message id.")]
    MissingMessageId,
}

/// Process-local lead store.
#[derive(Debug, Default)]
pub struct MemoryLeadRepository {
    records: Mutex<Vec<LeadRecord>>,
}

impl MemoryLeadRepository {
    pub fn records(&self) -> Result<Vec<LeadRecord>, LeadRepositoryError> {
        Ok(self.locked()?.clone())
    }

    fn locked(&self) -> Result<MutexGuard<'_, Vec<LeadRecord>>, LeadRepositoryError> {
        self.records
            .lock()
            .map_err(|_| LeadRepositoryError::Unavailable("lead store lock poisoned".to_string()))
    }
}

impl LeadRepository for MemoryLeadRepository {
    fn insert(&self, lead: NewLead) -> Result<LeadRecord, LeadRepositoryError> {
        let mut records = self.locked()?;
        let id = LeadId(records.len() as u64 + 1);
        let record = LeadRecord::from_new(id, lead);
        records.push(record.clone());
        Ok(record)
    }

    fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<LeadRecord>, LeadRepositoryError> {
        let records = self.locked()?;
        Ok(records
            .iter()
            .filter(|record| record.token_hash == token_hash)
            .max_by_key(|record| (record.created_at, record.id))
            .cloned())
    }

    fn latest_for_email(&self, email: &str) -> Result<Option<LeadId>, LeadRepositoryError> {
        let records = self.locked()?;
        Ok(records
            .iter()
            .filter(|record| record.email == email)
            .max_by_key(|record| (record.created_at, record.id))
            .map(|record| record.id))
    }

    fn mark_verified(&self, id: LeadId, at: DateTime<Utc>) -> Result<bool, LeadRepositoryError> {
        let mut records = self.locked()?;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(LeadRepositoryError::NotFound)?;
        if record.verified_at.is_some() {
            return Ok(false);
        }
        record.verified_at = Some(at);
        Ok(true)
    }
}
