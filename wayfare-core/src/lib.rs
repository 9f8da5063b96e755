//! Booking analytics engine.
//!
//! Pure functions from fetched snapshots to dashboard view-models. Nothing
//! here performs I/O or keeps state between calls; every upstream data change
//! is expected to trigger a full recomputation.

pub mod commission;
pub mod totals;
pub mod breakdown;
pub mod series;
pub mod ranking;
pub mod filter;
pub mod summary;
pub mod dashboard;

pub use commission::CommissionPolicy;
pub use totals::{compute_totals, Totals};
pub use breakdown::{
    compute_category_breakdown, compute_partner_status_breakdown, compute_status_breakdown,
    CategoryBreakdown, CategoryShare, PartnerStatusBreakdown, StatusBreakdown,
};
pub use series::{compute_monthly_series, MonthlyBucket, MAX_MONTHS_BACK};
pub use ranking::{compute_top_entities, top_customers, top_partners, Grouping, RankBy, TopEntity, UNKNOWN_KEY};
pub use filter::{filter_bookings, recent_bookings, scope_to_customer, scope_to_partner, upcoming_trips, BookingFilter};
pub use summary::{compute_complaint_summary, compute_customer_summary, ComplaintSummary, CustomerSummary};
pub use dashboard::{AdminDashboard, AnalyticsSettings, CustomerDashboard, PartnerDashboard};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid commission rate {rate} for {scope}: must be within [0, 1]")]
    InvalidCommissionRate { scope: String, rate: f64 },
    #[error("Invalid analytics setting: {0}")]
    InvalidSetting(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Share of `part` in `total` as a percentage. Zero when `total` is zero.
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}
