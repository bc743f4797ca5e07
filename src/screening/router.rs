use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::aggregate::EvaluationError;
use super::domain::{Criterion, ResumeId, RoleId};
use super::repository::{EvaluationRepository, RepositoryError, SignalRepository};
use super::service::{ScreeningService, ScreeningServiceError};

/// Router builder exposing HTTP endpoints for signal ingestion, evaluation,
/// rankings, and comparisons.
pub fn screening_router<S, E>(service: Arc<ScreeningService<S, E>>) -> Router
where
    S: SignalRepository + 'static,
    E: EvaluationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/screening/resumes/:resume_id/signals",
            post(ingest_handler::<S, E>),
        )
        .route(
            "/api/v1/screening/evaluations",
            post(evaluate_handler::<S, E>),
        )
        .route(
            "/api/v1/screening/roles/:role_id/rankings",
            get(rankings_handler::<S, E>),
        )
        .route(
            "/api/v1/screening/comparisons",
            post(compare_handler::<S, E>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngestRequest {
    text: String,
    #[serde(default)]
    keywords: Vec<String>,
    /// Reference date for `Present`/`Current` tokens; defaults to today.
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateRequest {
    role_id: RoleId,
    resume_id: ResumeId,
    text: String,
    criteria: Vec<Criterion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareRequest {
    role_id: RoleId,
    left_resume_id: ResumeId,
    right_resume_id: ResumeId,
}

async fn ingest_handler<S, E>(
    State(service): State<Arc<ScreeningService<S, E>>>,
    Path(resume_id): Path<String>,
    axum::Json(request): axum::Json<IngestRequest>,
) -> Response
where
    S: SignalRepository + 'static,
    E: EvaluationRepository + 'static,
{
    let resume_id = ResumeId(resume_id);
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());

    match service.ingest(&resume_id, &request.text, &request.keywords, today) {
        Ok(signals) => (StatusCode::CREATED, axum::Json(signals)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn evaluate_handler<S, E>(
    State(service): State<Arc<ScreeningService<S, E>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    S: SignalRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.evaluate(
        &request.role_id,
        &request.resume_id,
        &request.criteria,
        &request.text,
    ) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn rankings_handler<S, E>(
    State(service): State<Arc<ScreeningService<S, E>>>,
    Path(role_id): Path<String>,
) -> Response
where
    S: SignalRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.rankings(&RoleId(role_id)) {
        Ok(rankings) => (StatusCode::OK, axum::Json(rankings)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn compare_handler<S, E>(
    State(service): State<Arc<ScreeningService<S, E>>>,
    axum::Json(request): axum::Json<CompareRequest>,
) -> Response
where
    S: SignalRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.compare(
        &request.role_id,
        &request.left_resume_id,
        &request.right_resume_id,
    ) {
        Ok(comparison) => (StatusCode::OK, axum::Json(comparison)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ScreeningServiceError) -> Response {
    let status = match &error {
        ScreeningServiceError::Config(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScreeningServiceError::Evaluation(EvaluationError::WeightTotal { .. }) => {
            StatusCode::BAD_REQUEST
        }
        ScreeningServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ScreeningServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
