use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::answers::FitFocus;
use super::results::compute_results;
use super::wizard::{answers_from_value, build_steps};
use crate::error::AppError;

/// Stateless endpoints over the fitting engine.
pub fn fit_router() -> Router {
    Router::new()
        .route("/api/v1/fit", post(fit_handler))
        .route("/api/v1/steps", get(steps_handler))
}

pub(crate) async fn fit_handler(axum::Json(snapshot): axum::Json<Value>) -> Response {
    match answers_from_value(snapshot) {
        Ok(answers) => {
            let result = compute_results(&answers);
            (StatusCode::OK, axum::Json(result)).into_response()
        }
        Err(error) => AppError::from(error).into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StepsQuery {
    pub(crate) focus: Option<String>,
}

pub(crate) async fn steps_handler(Query(query): Query<StepsQuery>) -> Response {
    let focus = match query.focus.as_deref() {
        None => FitFocus::DriverWoods,
        Some(raw) => match FitFocus::from_key(raw) {
            Some(focus) => focus,
            None => {
                let payload = json!({
                    "error": format!("unknown focus: {raw}"),
                });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
    };

    let steps: Vec<Value> = build_steps(focus)
        .into_iter()
        .map(|step| {
            json!({
                "key": step.key(),
                "title": step.title(),
                "prompt": step.prompt(),
            })
        })
        .collect();

    let payload = json!({
        "focus": focus.key(),
        "steps": steps,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
