use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use wayfare_core::{
    compute_complaint_summary, filter_bookings, AdminDashboard, BookingFilter, ComplaintSummary,
    PartnerDashboard,
};
use wayfare_domain::{Booking, BookingStatus, FetchState, Partner, PartnerStatus, ServiceCategory};
use wayfare_store::Snapshot;

use crate::error::AppError;
use crate::state::{AppState, RefreshOutcome};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/dashboard", get(admin_dashboard))
        .route("/v1/admin/partners", get(list_partners))
        .route("/v1/admin/partners/{partner_id}/dashboard", get(partner_dashboard))
        .route("/v1/admin/bookings", get(list_bookings))
        .route("/v1/admin/complaints/summary", get(complaint_summary))
        .route("/v1/admin/refresh", post(refresh))
}

/// Current snapshot, or the 503 matching why there is none.
pub(crate) async fn loaded_snapshot(state: &AppState) -> Result<Arc<Snapshot>, AppError> {
    match state.dashboards.current().await {
        FetchState::Loaded(snapshot) => Ok(snapshot),
        FetchState::Loading => Err(AppError::DataLoading),
        FetchState::Failed(reason) => Err(AppError::DataUnavailable(reason)),
    }
}

async fn admin_dashboard(State(state): State<AppState>) -> Result<Json<AdminDashboard>, AppError> {
    let snapshot = loaded_snapshot(&state).await?;
    Ok(Json(AdminDashboard::build(
        &snapshot.bookings,
        &snapshot.partners,
        &snapshot.customers,
        &snapshot.complaints,
        &state.settings,
        Utc::now(),
    )))
}

async fn partner_dashboard(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
) -> Result<Json<PartnerDashboard>, AppError> {
    let snapshot = loaded_snapshot(&state).await?;
    let partner = snapshot.partner(&partner_id);
    let has_bookings = snapshot
        .bookings
        .iter()
        .any(|b| b.partner_id.as_deref() == Some(partner_id.as_str()));

    if partner.is_none() && !has_bookings {
        return Err(AppError::NotFoundError(format!("Partner {} not found", partner_id)));
    }

    Ok(Json(PartnerDashboard::build(
        &partner_id,
        partner,
        &snapshot.bookings,
        &state.settings,
        Utc::now(),
    )))
}

#[derive(Debug, Deserialize)]
pub struct PartnerListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PartnerListResponse {
    pub total: usize,
    pub partners: Vec<Partner>,
}

/// Filters on the normalized status so the list agrees with the dashboard counts
async fn list_partners(
    State(state): State<AppState>,
    Query(query): Query<PartnerListQuery>,
) -> Result<Json<PartnerListResponse>, AppError> {
    let status = match non_blank(query.status.as_deref()) {
        Some(label) => Some(PartnerStatus::from_label(label).ok_or_else(|| {
            AppError::ValidationError(format!("Unknown partner status: {}", label))
        })?),
        None => None,
    };

    let snapshot = loaded_snapshot(&state).await?;
    let partners: Vec<Partner> = snapshot
        .partners
        .iter()
        .filter(|p| status.map_or(true, |status| p.status == status))
        .cloned()
        .collect();

    Ok(Json(PartnerListResponse {
        total: partners.len(),
        partners,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub q: Option<String>,
}

impl BookingListQuery {
    fn into_filter(self) -> Result<BookingFilter, AppError> {
        let mut filter = BookingFilter::default();
        if let Some(label) = non_blank(self.status.as_deref()) {
            let status = BookingStatus::from_label(label).ok_or_else(|| {
                AppError::ValidationError(format!("Unknown booking status: {}", label))
            })?;
            filter = filter.status(status);
        }
        if let Some(label) = non_blank(self.category.as_deref()) {
            let category = ServiceCategory::from_label(label).ok_or_else(|| {
                AppError::ValidationError(format!("Unknown service category: {}", label))
            })?;
            filter = filter.category(category);
        }
        if let Some(text) = self.q {
            filter = filter.search(text);
        }
        Ok(filter)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub total: usize,
    pub bookings: Vec<Booking>,
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<BookingListResponse>, AppError> {
    let filter = query.into_filter()?;
    let snapshot = loaded_snapshot(&state).await?;
    let bookings = filter_bookings(&snapshot.bookings, &filter);
    Ok(Json(BookingListResponse {
        total: bookings.len(),
        bookings,
    }))
}

async fn complaint_summary(State(state): State<AppState>) -> Result<Json<ComplaintSummary>, AppError> {
    let snapshot = loaded_snapshot(&state).await?;
    Ok(Json(compute_complaint_summary(&snapshot.complaints)))
}

async fn refresh(State(state): State<AppState>) -> Json<RefreshOutcome> {
    let outcome = state.dashboards.refresh().await;
    info!(
        generation = outcome.generation,
        applied = outcome.applied,
        "Manual refresh requested"
    );
    Json(outcome)
}
