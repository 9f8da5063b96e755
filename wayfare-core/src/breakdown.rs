use serde::Serialize;
use wayfare_domain::{Booking, BookingStatus, Partner, PartnerStatus, ServiceCategory};

use crate::percentage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: ServiceCategory,
    pub count: usize,
    pub revenue: f64,
    /// Percentage of all bookings, 0 when there are none
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// One entry per category, in `ServiceCategory::ALL` order
    pub categories: Vec<CategoryShare>,
    /// Bookings whose category could not be resolved
    pub uncategorized: usize,
}

impl CategoryBreakdown {
    pub fn get(&self, category: ServiceCategory) -> Option<&CategoryShare> {
        self.categories.iter().find(|share| share.category == category)
    }
}

pub fn compute_category_breakdown(bookings: &[Booking]) -> CategoryBreakdown {
    let mut categories: Vec<CategoryShare> = ServiceCategory::ALL
        .iter()
        .map(|&category| CategoryShare {
            category,
            count: 0,
            revenue: 0.0,
            percentage: 0.0,
        })
        .collect();
    let mut uncategorized = 0;

    for booking in bookings {
        match booking.category {
            Some(category) => {
                if let Some(share) = categories.iter_mut().find(|s| s.category == category) {
                    share.count += 1;
                    share.revenue += booking.amount;
                }
            }
            None => uncategorized += 1,
        }
    }

    let total = bookings.len();
    for share in &mut categories {
        share.percentage = percentage(share.count, total);
    }

    CategoryBreakdown {
        categories,
        uncategorized,
    }
}

/// Booking count per lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub refund_requested: usize,
    pub refunded: usize,
}

impl StatusBreakdown {
    pub fn get(&self, status: BookingStatus) -> usize {
        match status {
            BookingStatus::Pending => self.pending,
            BookingStatus::Confirmed => self.confirmed,
            BookingStatus::Completed => self.completed,
            BookingStatus::Cancelled => self.cancelled,
            BookingStatus::RefundRequested => self.refund_requested,
            BookingStatus::Refunded => self.refunded,
        }
    }

    fn slot(&mut self, status: BookingStatus) -> &mut usize {
        match status {
            BookingStatus::Pending => &mut self.pending,
            BookingStatus::Confirmed => &mut self.confirmed,
            BookingStatus::Completed => &mut self.completed,
            BookingStatus::Cancelled => &mut self.cancelled,
            BookingStatus::RefundRequested => &mut self.refund_requested,
            BookingStatus::Refunded => &mut self.refunded,
        }
    }
}

pub fn compute_status_breakdown(bookings: &[Booking]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for booking in bookings {
        *breakdown.slot(booking.status) += 1;
    }
    breakdown
}

/// Partner count per approval status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PartnerStatusBreakdown {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub suspended: usize,
}

pub fn compute_partner_status_breakdown(partners: &[Partner]) -> PartnerStatusBreakdown {
    let mut breakdown = PartnerStatusBreakdown {
        total: partners.len(),
        ..PartnerStatusBreakdown::default()
    };
    for partner in partners {
        match partner.status {
            PartnerStatus::Pending => breakdown.pending += 1,
            PartnerStatus::Approved => breakdown.approved += 1,
            PartnerStatus::Rejected => breakdown.rejected += 1,
            PartnerStatus::Suspended => breakdown.suspended += 1,
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: &str, amount: f64, category: Option<ServiceCategory>, status: BookingStatus) -> Booking {
        Booking {
            amount,
            category,
            status,
            ..Booking::new(id)
        }
    }

    #[test]
    fn test_empty_breakdown_has_zero_percentages() {
        let breakdown = compute_category_breakdown(&[]);
        assert_eq!(breakdown.categories.len(), 4);
        for share in &breakdown.categories {
            assert_eq!(share.count, 0);
            assert_eq!(share.percentage, 0.0);
            assert!(!share.percentage.is_nan());
        }
        assert_eq!(breakdown.uncategorized, 0);
    }

    #[test]
    fn test_category_counts_and_shares() {
        let bookings = vec![
            booking("b1", 1000.0, Some(ServiceCategory::Hotel), BookingStatus::Confirmed),
            booking("b2", 500.0, Some(ServiceCategory::Hotel), BookingStatus::Cancelled),
            booking("b3", 2000.0, Some(ServiceCategory::Vehicle), BookingStatus::Completed),
            booking("b4", 50.0, None, BookingStatus::Pending),
        ];
        let breakdown = compute_category_breakdown(&bookings);

        let hotel = breakdown.get(ServiceCategory::Hotel).unwrap();
        assert_eq!(hotel.count, 2);
        assert_eq!(hotel.revenue, 1500.0);
        assert_eq!(hotel.percentage, 50.0);

        let vehicle = breakdown.get(ServiceCategory::Vehicle).unwrap();
        assert_eq!(vehicle.percentage, 25.0);

        assert_eq!(breakdown.get(ServiceCategory::Flight).unwrap().count, 0);
        assert_eq!(breakdown.uncategorized, 1);
    }

    #[test]
    fn test_status_breakdown() {
        let bookings = vec![
            booking("b1", 0.0, None, BookingStatus::Pending),
            booking("b2", 0.0, None, BookingStatus::Pending),
            booking("b3", 0.0, None, BookingStatus::RefundRequested),
            booking("b4", 0.0, None, BookingStatus::Completed),
        ];
        let breakdown = compute_status_breakdown(&bookings);
        assert_eq!(breakdown.get(BookingStatus::Pending), 2);
        assert_eq!(breakdown.refund_requested, 1);
        assert_eq!(breakdown.completed, 1);
        assert_eq!(breakdown.cancelled, 0);
    }

    #[test]
    fn test_partner_status_breakdown() {
        let mut approved = Partner::new("p1", "Alpha");
        approved.status = PartnerStatus::Approved;
        let mut suspended = Partner::new("p2", "Beta");
        suspended.status = PartnerStatus::Suspended;
        let pending = Partner::new("p3", "Gamma");

        let breakdown = compute_partner_status_breakdown(&[approved, suspended, pending]);
        assert_eq!(breakdown.total, 3);
        assert_eq!(breakdown.approved, 1);
        assert_eq!(breakdown.suspended, 1);
        assert_eq!(breakdown.pending, 1);
        assert_eq!(breakdown.rejected, 0);
    }
}
