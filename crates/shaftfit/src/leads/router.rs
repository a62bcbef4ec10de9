use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use super::domain::{LeadResponse, LeadSubmission};
use super::repository::{LeadRepository, Mailer};
use super::service::{LeadService, LeadServiceError};

/// Lead capture, verification link, and resume-context endpoints.
pub fn lead_router<R, M>(service: Arc<LeadService<R, M>>) -> Router
where
    R: LeadRepository + 'static,
    M: Mailer + 'static,
{
    Router::new()
        .route("/api/lead", post(submit_handler::<R, M>))
        .route("/api/lead/verify", get(verify_handler::<R, M>))
        .route("/api/lead/context", get(context_handler::<R, M>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenQuery {
    pub(crate) token: Option<String>,
}

pub(crate) async fn submit_handler<R, M>(
    State(service): State<Arc<LeadService<R, M>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    M: Mailer + 'static,
{
    match service.submit(submission, Utc::now()) {
        Ok(receipt) => {
            (StatusCode::OK, axum::Json(LeadResponse::accepted(receipt.debug))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn verify_handler<R, M>(
    State(service): State<Arc<LeadService<R, M>>>,
    Query(query): Query<TokenQuery>,
) -> Response
where
    R: LeadRepository + 'static,
    M: Mailer + 'static,
{
    match service.verify(query.token.as_deref(), Utc::now()) {
        Ok(outcome) => Redirect::to(&service.redirect_location(&outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn context_handler<R, M>(
    State(service): State<Arc<LeadService<R, M>>>,
    Query(query): Query<TokenQuery>,
) -> Response
where
    R: LeadRepository + 'static,
    M: Mailer + 'static,
{
    match service.context(query.token.as_deref(), Utc::now()) {
        Ok(payload) => (StatusCode::OK, axum::Json(LeadResponse::context(payload))).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: LeadServiceError) -> Response {
    let status = match &error {
        LeadServiceError::InvalidEmail | LeadServiceError::MissingToken => StatusCode::BAD_REQUEST,
        LeadServiceError::InvalidToken => StatusCode::NOT_FOUND,
        LeadServiceError::ExpiredToken => StatusCode::GONE,
        LeadServiceError::Mailer(_) => StatusCode::BAD_GATEWAY,
        LeadServiceError::MissingSettings(_) | LeadServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, axum::Json(LeadResponse::failed(error.to_string()))).into_response()
}
