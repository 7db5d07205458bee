// Router for the dashboards API
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_report_to_dashboard, delete_dashboard, get_dashboard, get_dashboard_reports,
    health_check, list_dashboards, remove_report_from_dashboard, save_dashboard,
    update_dashboard,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn dashboards_router(state: Arc<AppState>) -> Router {
    let dashboards = Router::new()
        .route("/all", get(list_dashboards))
        .route("/dashboard/:dashboard_id", get(get_dashboard))
        .route("/dashboard/reports", post(get_dashboard_reports))
        .route("/dashboard/save", post(save_dashboard))
        .route("/dashboard/delete", post(delete_dashboard))
        .route("/dashboard/update", post(update_dashboard))
        .route("/dashboard/report/add", post(add_report_to_dashboard))
        .route("/dashboard/report/remove", post(remove_report_from_dashboard));

    Router::new()
        .route("/healthz", get(health_check))
        .nest("/api/v1/dashboards", dashboards)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
