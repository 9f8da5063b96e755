use chrono::{DateTime, Utc};
use wayfare_domain::{Booking, BookingStatus, ServiceCategory};

/// Criteria for narrowing a booking list. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub category: Option<ServiceCategory>,
    /// Case-insensitive substring matched against id, customer name/email and partner name/id
    pub search_text: Option<String>,
}

impl BookingFilter {
    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn category(mut self, category: ServiceCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        if self.status.is_some_and(|status| booking.status != status) {
            return false;
        }
        if self.category.is_some() && booking.category != self.category {
            return false;
        }
        match self.needle() {
            Some(needle) => searchable_fields(booking)
                .any(|field| field.to_lowercase().contains(&needle)),
            None => true,
        }
    }

    fn needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }
}

fn searchable_fields(booking: &Booking) -> impl Iterator<Item = &str> {
    [
        Some(booking.id.as_str()),
        booking.customer_name.as_deref(),
        booking.customer_email(),
        booking.partner_name.as_deref(),
        booking.partner_id.as_deref(),
    ]
    .into_iter()
    .flatten()
}

/// Bookings matching every criterion in `filter`, in input order.
pub fn filter_bookings(bookings: &[Booking], filter: &BookingFilter) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|booking| filter.matches(booking))
        .cloned()
        .collect()
}

pub fn scope_to_partner(bookings: &[Booking], partner_id: &str) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| b.partner_id.as_deref() == Some(partner_id))
        .cloned()
        .collect()
}

pub fn scope_to_customer(bookings: &[Booking], customer_id: &str) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| b.customer_id.as_deref() == Some(customer_id))
        .cloned()
        .collect()
}

/// Trips still ahead of `now`, soonest first. Cancelled and refunded bookings are skipped.
pub fn upcoming_trips(bookings: &[Booking], now: DateTime<Utc>, limit: usize) -> Vec<Booking> {
    let mut upcoming: Vec<&Booking> = bookings
        .iter()
        .filter(|b| !b.status.is_void())
        .filter(|b| b.travel_date.is_some_and(|date| date >= now))
        .collect();
    upcoming.sort_by_key(|b| b.travel_date);
    upcoming.into_iter().take(limit).cloned().collect()
}

/// Most recently created bookings first; undated bookings go last.
pub fn recent_bookings(bookings: &[Booking], limit: usize) -> Vec<Booking> {
    let mut recent: Vec<&Booking> = bookings.iter().collect();
    recent.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    recent.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wayfare_shared::Masked;

    fn sample() -> Vec<Booking> {
        vec![
            Booking {
                customer_name: Some("Jane Doe".to_string()),
                customer_email: Some(Masked::from("JANE@x.com")),
                partner_id: Some("P1".to_string()),
                category: Some(ServiceCategory::Hotel),
                status: BookingStatus::Confirmed,
                ..Booking::new("bk-100")
            },
            Booking {
                customer_name: Some("Omar Farouk".to_string()),
                customer_email: Some(Masked::from("omar@x.com")),
                partner_name: Some("Desert Routes".to_string()),
                category: Some(ServiceCategory::Vehicle),
                status: BookingStatus::Pending,
                ..Booking::new("bk-101")
            },
            Booking {
                category: Some(ServiceCategory::Hotel),
                status: BookingStatus::Cancelled,
                ..Booking::new("bk-102")
            },
        ]
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let bookings = sample();
        let filtered = filter_bookings(&bookings, &BookingFilter::default());
        let ids: Vec<&str> = filtered.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["bk-100", "bk-101", "bk-102"]);

        let blank = filter_bookings(&bookings, &BookingFilter::default().search("   "));
        assert_eq!(blank.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filtered = filter_bookings(&sample(), &BookingFilter::default().search("jane"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "bk-100");

        let by_partner = filter_bookings(&sample(), &BookingFilter::default().search("desert"));
        assert_eq!(by_partner[0].id, "bk-101");

        assert!(filter_bookings(&sample(), &BookingFilter::default().search("zanzibar")).is_empty());
    }

    #[test]
    fn test_criteria_combine() {
        let hotel = BookingFilter::default().category(ServiceCategory::Hotel);
        assert_eq!(filter_bookings(&sample(), &hotel).len(), 2);

        let confirmed_hotel = hotel.status(BookingStatus::Confirmed);
        let filtered = filter_bookings(&sample(), &confirmed_hotel);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "bk-100");

        let mismatched = BookingFilter::default()
            .status(BookingStatus::Pending)
            .search("jane");
        assert!(filter_bookings(&sample(), &mismatched).is_empty());
    }

    #[test]
    fn test_scoping() {
        let bookings = sample();
        assert_eq!(scope_to_partner(&bookings, "P1").len(), 1);
        assert!(scope_to_customer(&bookings, "nobody").is_empty());
    }

    #[test]
    fn test_upcoming_trips_sorted_and_skip_void() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap();
        let day = |d: u32| Some(Utc.with_ymd_and_hms(2026, 11, d, 0, 0, 0).unwrap());
        let bookings = vec![
            Booking { travel_date: day(20), status: BookingStatus::Confirmed, ..Booking::new("late") },
            Booking { travel_date: day(3), status: BookingStatus::Pending, ..Booking::new("soon") },
            Booking { travel_date: day(1), status: BookingStatus::Cancelled, ..Booking::new("void") },
            Booking {
                travel_date: Some(Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap()),
                ..Booking::new("past")
            },
            Booking::new("undated"),
        ];
        let upcoming = upcoming_trips(&bookings, now, 5);
        let ids: Vec<&str> = upcoming.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["soon", "late"]);
        assert_eq!(upcoming_trips(&bookings, now, 1).len(), 1);
    }

    #[test]
    fn test_recent_bookings_newest_first() {
        let at = |d: u32| Some(Utc.with_ymd_and_hms(2026, 10, d, 0, 0, 0).unwrap());
        let bookings = vec![
            Booking { created_at: at(1), ..Booking::new("a") },
            Booking::new("undated"),
            Booking { created_at: at(9), ..Booking::new("b") },
        ];
        let ids: Vec<String> = recent_bookings(&bookings, 3).into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["b", "a", "undated"]);
    }
}
