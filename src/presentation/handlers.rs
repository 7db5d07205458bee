// HTTP request handlers
use crate::application::dashboard_service::{
    DashboardRef, ReportMembershipRequest, UpdateDashboardRequest,
};
use crate::domain::dashboard::NewDashboard;
use crate::domain::error::{DashboardError, DashboardResult};
use crate::domain::report::ReportReference;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

fn error_body(error: &DashboardError) -> (StatusCode, Value) {
    match error {
        DashboardError::AlreadyExists(existing) => (
            StatusCode::CONFLICT,
            json!({
                "error": true,
                "code": "A dashboard with that name already exists",
                "dashboard": existing,
            }),
        ),
        DashboardError::DoesNotExist(request) => (
            StatusCode::NOT_FOUND,
            json!({
                "error": true,
                "code": "Dashboard not found",
                "dashboard": request,
            }),
        ),
        DashboardError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            json!({
                "error": true,
                "code": error.to_string(),
                "id": id,
            }),
        ),
        DashboardError::ReportScheduleNotFound(namespace) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "error": true,
                "code": error.to_string(),
                "namespace": namespace,
            }),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": true,
                "code": error.to_string(),
            }),
        ),
    }
}

async fn respond<T: Serialize>(result: DashboardResult<T>, headers: &HeaderMap) -> Response {
    let compress = accepts_brotli(headers);
    let built = match result {
        Ok(data) => json_response(StatusCode::OK, &data, compress).await,
        Err(e) => {
            tracing::warn!("Dashboard request failed: {}", e);
            let (status, body) = error_body(&e);
            json_response(status, &body, compress).await
        }
    };

    match built {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn list_dashboards(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(state.dashboard_service.get_dashboards(), &headers).await
}

pub async fn get_dashboard(
    Path(dashboard_id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    respond(state.dashboard_service.get_dashboard(&dashboard_id), &headers).await
}

pub async fn get_dashboard_reports(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(reports): Json<Vec<ReportReference>>,
) -> Response {
    let result = state
        .dashboard_service
        .get_dashboard_reports_with_query_results(reports)
        .await;
    respond(result, &headers).await
}

pub async fn save_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewDashboard>,
) -> Response {
    respond(state.dashboard_service.save_dashboard(new), &headers).await
}

pub async fn delete_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<DashboardRef>,
) -> Response {
    respond(state.dashboard_service.delete_dashboard(request), &headers).await
}

pub async fn update_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateDashboardRequest>,
) -> Response {
    respond(state.dashboard_service.update_dashboard(request), &headers).await
}

pub async fn add_report_to_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportMembershipRequest>,
) -> Response {
    respond(state.dashboard_service.add_report_to_dashboard(request), &headers).await
}

pub async fn remove_report_from_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportMembershipRequest>,
) -> Response {
    respond(state.dashboard_service.remove_report_from_dashboard(request), &headers).await
}
