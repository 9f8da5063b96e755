use serde::Serialize;
use wayfare_domain::Booking;

use crate::commission::CommissionPolicy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub count: usize,
    pub total_revenue: f64,
    pub total_commission: f64,
}

/// Count, revenue and platform commission over every booking given.
pub fn compute_totals(bookings: &[Booking], policy: &CommissionPolicy) -> Totals {
    bookings.iter().fold(Totals::default(), |mut acc, booking| {
        acc.count += 1;
        acc.total_revenue += booking.amount;
        acc.total_commission += policy.commission_on(booking.amount, booking.category);
        acc
    })
}
