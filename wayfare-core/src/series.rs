use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use wayfare_domain::Booking;

pub const DEFAULT_MONTHS_BACK: usize = 6;
/// Ten years of buckets
pub const MAX_MONTHS_BACK: usize = 120;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    /// e.g. "Oct 2026"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub count: usize,
    pub revenue: f64,
}

/// Bookings per calendar month over the last `months_back` months, oldest first.
///
/// Bucket `i` holds bookings created in month `current - (months_back - 1 - i)`.
/// Bookings without a creation timestamp, or outside the window, are left out.
pub fn compute_monthly_series(
    bookings: &[Booking],
    months_back: usize,
    now: DateTime<Utc>,
) -> Vec<MonthlyBucket> {
    bucket_by_month(bookings, months_back, now, |b| b.created_at, |b| b.amount)
}

pub(crate) fn bucket_by_month<T, D, A>(
    items: &[T],
    months_back: usize,
    now: DateTime<Utc>,
    date_of: D,
    amount_of: A,
) -> Vec<MonthlyBucket>
where
    D: Fn(&T) -> Option<DateTime<Utc>>,
    A: Fn(&T) -> f64,
{
    let current = month_index(now.year(), now.month());
    let mut buckets: Vec<MonthlyBucket> = (0..months_back)
        .map(|i| {
            let offset = (months_back - 1 - i) as i64;
            empty_bucket(current - offset)
        })
        .collect();

    for item in items {
        let Some(date) = date_of(item) else { continue };
        let age = current - month_index(date.year(), date.month());
        if age < 0 || age >= months_back as i64 {
            continue;
        }
        let bucket = &mut buckets[months_back - 1 - age as usize];
        bucket.count += 1;
        bucket.revenue += amount_of(item);
    }

    buckets
}

fn month_index(year: i32, month: u32) -> i64 {
    year as i64 * 12 + (month as i64 - 1)
}

fn empty_bucket(index: i64) -> MonthlyBucket {
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    let label = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default();
    MonthlyBucket {
        label,
        year,
        month,
        count: 0,
        revenue: 0.0,
    }
}
