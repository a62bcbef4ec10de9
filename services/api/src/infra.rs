use metrics_exporter_prometheus::PrometheusHandle;
use shaftfit::fitting::FitFocus;
use shaftfit::leads::{mask_email, Mailer, MailerError, OutboundEmail};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mailer that records deliveries in the log instead of calling a provider.
#[derive(Debug, Default)]
pub(crate) struct LogMailer {
    sequence: AtomicU64,
}

impl Mailer for LogMailer {
    fn send(&self, message: OutboundEmail) -> Result<String, MailerError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let message_id = format!("local-{id:06}");
        info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            %message_id,
            "verification email logged"
        );
        Ok(message_id)
    }
}

pub(crate) fn parse_focus(raw: &str) -> Result<FitFocus, String> {
    FitFocus::from_key(raw).ok_or_else(|| {
        let known: Vec<&str> = FitFocus::ordered().iter().map(|focus| focus.key()).collect();
        format!("unknown focus '{raw}' (expected one of: {})", known.join(", "))
    })
}
