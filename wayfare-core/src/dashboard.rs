use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use wayfare_domain::{Booking, Complaint, Customer, Partner, PartnerStatus};

use crate::breakdown::{
    compute_category_breakdown, compute_partner_status_breakdown, compute_status_breakdown,
    CategoryBreakdown, PartnerStatusBreakdown, StatusBreakdown,
};
use crate::commission::CommissionPolicy;
use crate::filter::{recent_bookings, scope_to_customer, scope_to_partner, upcoming_trips};
use crate::ranking::{top_customers, top_partners, TopEntity, DEFAULT_TOP_LIMIT};
use crate::series::{compute_monthly_series, MonthlyBucket, DEFAULT_MONTHS_BACK, MAX_MONTHS_BACK};
use crate::summary::{compute_complaint_summary, compute_customer_summary, ComplaintSummary, CustomerSummary};
use crate::totals::{compute_totals, Totals};
use crate::{CoreError, CoreResult};

/// Knobs shared by every dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSettings {
    pub commission: CommissionPolicy,
    pub months_back: usize,
    pub top_limit: usize,
    pub upcoming_limit: usize,
    pub recent_limit: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            commission: CommissionPolicy::default(),
            months_back: DEFAULT_MONTHS_BACK,
            top_limit: DEFAULT_TOP_LIMIT,
            upcoming_limit: 5,
            recent_limit: 5,
        }
    }
}

impl AnalyticsSettings {
    pub fn validate(&self) -> CoreResult<()> {
        if self.months_back == 0 || self.months_back > MAX_MONTHS_BACK {
            return Err(CoreError::InvalidSetting(format!(
                "months_back must be between 1 and {}, got {}",
                MAX_MONTHS_BACK, self.months_back
            )));
        }
        if self.top_limit == 0 {
            return Err(CoreError::InvalidSetting("top_limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Fleet-wide view for the admin portal
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub generated_at: DateTime<Utc>,
    pub totals: Totals,
    pub categories: CategoryBreakdown,
    pub statuses: StatusBreakdown,
    pub monthly: Vec<MonthlyBucket>,
    pub top_partners: Vec<TopEntity>,
    pub top_customers: Vec<TopEntity>,
    pub partners: PartnerStatusBreakdown,
    pub customers: CustomerSummary,
    pub complaints: ComplaintSummary,
}

impl AdminDashboard {
    pub fn build(
        bookings: &[Booking],
        partners: &[Partner],
        customers: &[Customer],
        complaints: &[Complaint],
        settings: &AnalyticsSettings,
        now: DateTime<Utc>,
    ) -> Self {
        debug!(
            bookings = bookings.len(),
            partners = partners.len(),
            customers = customers.len(),
            complaints = complaints.len(),
            "Recomputing admin dashboard"
        );
        Self {
            generated_at: now,
            totals: compute_totals(bookings, &settings.commission),
            categories: compute_category_breakdown(bookings),
            statuses: compute_status_breakdown(bookings),
            monthly: compute_monthly_series(bookings, settings.months_back, now),
            top_partners: top_partners(bookings, settings.top_limit),
            top_customers: top_customers(bookings, settings.top_limit),
            partners: compute_partner_status_breakdown(partners),
            customers: compute_customer_summary(customers, settings.months_back, now),
            complaints: compute_complaint_summary(complaints),
        }
    }
}

/// A single partner's bookings, as shown inside the admin portal
#[derive(Debug, Clone, Serialize)]
pub struct PartnerDashboard {
    pub partner_id: String,
    pub partner_name: Option<String>,
    pub partner_status: Option<PartnerStatus>,
    pub generated_at: DateTime<Utc>,
    pub totals: Totals,
    pub categories: CategoryBreakdown,
    pub statuses: StatusBreakdown,
    pub monthly: Vec<MonthlyBucket>,
    pub top_customers: Vec<TopEntity>,
    pub distinct_customers: usize,
}

impl PartnerDashboard {
    /// `bookings` may be the full fleet; only the partner's own bookings are used.
    pub fn build(
        partner_id: &str,
        partner: Option<&Partner>,
        bookings: &[Booking],
        settings: &AnalyticsSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let scoped = scope_to_partner(bookings, partner_id);
        debug!(partner_id = %partner_id, bookings = scoped.len(), "Recomputing partner dashboard");

        let distinct_customers = scoped
            .iter()
            .filter_map(|b| b.customer_id.as_deref())
            .collect::<HashSet<_>>()
            .len();
        let partner_name = partner
            .map(|p| p.name.clone())
            .or_else(|| scoped.iter().find_map(|b| b.partner_name.clone()));

        Self {
            partner_id: partner_id.to_string(),
            partner_name,
            partner_status: partner.map(|p| p.status),
            generated_at: now,
            totals: compute_totals(&scoped, &settings.commission),
            categories: compute_category_breakdown(&scoped),
            statuses: compute_status_breakdown(&scoped),
            monthly: compute_monthly_series(&scoped, settings.months_back, now),
            top_customers: top_customers(&scoped, settings.top_limit),
            distinct_customers,
        }
    }
}

/// Self-service view of one customer's bookings
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDashboard {
    pub customer_id: String,
    pub generated_at: DateTime<Utc>,
    pub totals: Totals,
    pub categories: CategoryBreakdown,
    pub statuses: StatusBreakdown,
    pub monthly: Vec<MonthlyBucket>,
    pub upcoming: Vec<Booking>,
    pub recent: Vec<Booking>,
}

impl CustomerDashboard {
    pub fn build(
        customer_id: &str,
        bookings: &[Booking],
        settings: &AnalyticsSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let scoped = scope_to_customer(bookings, customer_id);
        debug!(customer_id = %customer_id, bookings = scoped.len(), "Recomputing customer dashboard");

        Self {
            customer_id: customer_id.to_string(),
            generated_at: now,
            totals: compute_totals(&scoped, &settings.commission),
            categories: compute_category_breakdown(&scoped),
            statuses: compute_status_breakdown(&scoped),
            monthly: compute_monthly_series(&scoped, settings.months_back, now),
            upcoming: upcoming_trips(&scoped, now, settings.upcoming_limit),
            recent: recent_bookings(&scoped, settings.recent_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wayfare_domain::{BookingStatus, ServiceCategory};

    fn scenario() -> Vec<Booking> {
        let created = Some(Utc.with_ymd_and_hms(2026, 9, 12, 10, 0, 0).unwrap());
        let booking = |id: &str, amount: f64, category: ServiceCategory, status: BookingStatus, partner: Option<&str>, customer: &str| Booking {
            amount,
            category: Some(category),
            status,
            partner_id: partner.map(str::to_string),
            customer_id: Some(customer.to_string()),
            created_at: created,
            ..Booking::new(id)
        };
        vec![
            booking("b1", 1000.0, ServiceCategory::Hotel, BookingStatus::Confirmed, Some("P1"), "c1"),
            booking("b2", 2000.0, ServiceCategory::Vehicle, BookingStatus::Completed, Some("P1"), "c2"),
            booking("b3", 500.0, ServiceCategory::Hotel, BookingStatus::Cancelled, Some("P2"), "c1"),
            booking("b4", 1500.0, ServiceCategory::Holiday, BookingStatus::Pending, None, "c3"),
        ]
    }

    #[test]
    fn test_admin_dashboard_end_to_end() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap();
        let dashboard = AdminDashboard::build(&scenario(), &[], &[], &[], &AnalyticsSettings::default(), now);

        assert_eq!(dashboard.totals.count, 4);
        assert!((dashboard.totals.total_revenue - 5000.0).abs() < 1e-9);
        assert!((dashboard.totals.total_commission - 500.0).abs() < 1e-9);

        let keys: Vec<&str> = dashboard.top_partners.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["P1", "P2", "Unknown"]);
        assert_eq!(dashboard.top_partners[0].count, 2);
        assert!((dashboard.top_partners[0].revenue - 3000.0).abs() < 1e-9);
        assert_eq!(dashboard.top_partners[1].count, 1);
        assert_eq!(dashboard.top_partners[2].count, 1);

        assert_eq!(dashboard.monthly.len(), 6);
        assert_eq!(dashboard.monthly[4].count, 4);
        assert_eq!(dashboard.statuses.cancelled, 1);
        assert_eq!(dashboard.categories.get(ServiceCategory::Hotel).unwrap().percentage, 50.0);
    }

    #[test]
    fn test_partner_dashboard_scopes_bookings() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap();
        let mut partner = Partner::new("P1", "Coastal Holidays");
        partner.status = PartnerStatus::Approved;

        let dashboard = PartnerDashboard::build("P1", Some(&partner), &scenario(), &AnalyticsSettings::default(), now);
        assert_eq!(dashboard.totals.count, 2);
        assert_eq!(dashboard.distinct_customers, 2);
        assert_eq!(dashboard.partner_name.as_deref(), Some("Coastal Holidays"));
        assert_eq!(dashboard.partner_status, Some(PartnerStatus::Approved));
    }

    #[test]
    fn test_customer_dashboard_for_unknown_customer_is_zeroed() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap();
        let dashboard = CustomerDashboard::build("ghost", &scenario(), &AnalyticsSettings::default(), now);
        assert_eq!(dashboard.totals, Totals::default());
        assert_eq!(dashboard.monthly.len(), 6);
        assert!(dashboard.upcoming.is_empty());
        assert!(dashboard.recent.is_empty());
    }

    #[test]
    fn test_settings_validation() {
        assert!(AnalyticsSettings::default().validate().is_ok());
        let zero_months = AnalyticsSettings { months_back: 0, ..AnalyticsSettings::default() };
        assert!(zero_months.validate().is_err());

        let longest = AnalyticsSettings { months_back: MAX_MONTHS_BACK, ..AnalyticsSettings::default() };
        assert!(longest.validate().is_ok());
        let runaway = AnalyticsSettings { months_back: 1_000_000_000_000, ..AnalyticsSettings::default() };
        assert!(matches!(runaway.validate(), Err(CoreError::InvalidSetting(msg)) if msg.contains("120")));
    }
}
