use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use wayfare_core::CustomerDashboard;

use crate::admin::loaded_snapshot;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/customers/{customer_id}/dashboard", get(customer_dashboard))
}

/// A customer with no bookings still gets a zeroed dashboard.
async fn customer_dashboard(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerDashboard>, AppError> {
    let snapshot = loaded_snapshot(&state).await?;
    Ok(Json(CustomerDashboard::build(
        &customer_id,
        &snapshot.bookings,
        &state.settings,
        Utc::now(),
    )))
}
