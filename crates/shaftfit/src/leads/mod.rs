//! Lead capture with e-mail verification, used to hand a fit summary back to the golfer.
//!
//! Storage and mail delivery sit behind [`LeadRepository`] and [`Mailer`]; the service
//! takes `now` explicitly so expiry rules are testable.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    mask_email, LeadId, LeadRecord, LeadResponse, LeadSubmission, NewLead, SubmitDebug,
    SubmitReceipt, VerifyOutcome, VerifyStatus,
};
pub use repository::{
    LeadRepository, LeadRepositoryError, Mailer, MailerError, MemoryLeadRepository,
    OutboundEmail,
};
pub use router::lead_router;
pub use service::{sha256_hex, LeadService, LeadServiceError};
