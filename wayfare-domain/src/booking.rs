use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wayfare_shared::Masked;

/// Service category a booking was made for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Vehicle,
    Holiday,
    Hotel,
    Flight,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 4] = [
        ServiceCategory::Vehicle,
        ServiceCategory::Holiday,
        ServiceCategory::Hotel,
        ServiceCategory::Flight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Vehicle => "vehicle",
            ServiceCategory::Holiday => "holiday",
            ServiceCategory::Hotel => "hotel",
            ServiceCategory::Flight => "flight",
        }
    }

    /// Parse a category as written by the various booking forms.
    pub fn from_label(label: &str) -> Option<Self> {
        match compact(label).as_str() {
            "vehicle" | "vehicles" | "car" | "cars" | "cab" | "taxi" | "carrental" => {
                Some(ServiceCategory::Vehicle)
            }
            "holiday" | "holidays" | "tour" | "tours" | "package" | "holidaypackage"
            | "tourpackage" => Some(ServiceCategory::Holiday),
            "hotel" | "hotels" | "stay" | "accommodation" => Some(ServiceCategory::Hotel),
            "flight" | "flights" | "air" | "airline" => Some(ServiceCategory::Flight),
            _ => None,
        }
    }
}

/// Booking lifecycle status. Transitions are owned by the document store writers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    RefundRequested,
    Refunded,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::RefundRequested,
        BookingStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::RefundRequested => "refund-requested",
            BookingStatus::Refunded => "refunded",
        }
    }

    /// Accepts `refund-requested`, `refund_requested`, `refundRequested`, `REFUND REQUESTED`, ...
    pub fn from_label(label: &str) -> Option<Self> {
        match compact(label).as_str() {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" | "canceled" => Some(BookingStatus::Cancelled),
            "refundrequested" => Some(BookingStatus::RefundRequested),
            "refunded" => Some(BookingStatus::Refunded),
            _ => None,
        }
    }

    /// The trip will not take place.
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            BookingStatus::Cancelled | BookingStatus::RefundRequested | BookingStatus::Refunded
        )
    }
}

/// Canonical booking shape every aggregation runs on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<Masked<String>>,
    /// Absent for direct (unbrokered) bookings
    pub partner_id: Option<String>,
    pub partner_name: Option<String>,
    pub category: Option<ServiceCategory>,
    pub amount: f64,
    pub status: BookingStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub travel_date: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            customer_id: None,
            customer_name: None,
            customer_email: None,
            partner_id: None,
            partner_name: None,
            category: None,
            amount: 0.0,
            status: BookingStatus::Pending,
            created_at: None,
            travel_date: None,
            cancelled_at: None,
        }
    }

    pub fn customer_email(&self) -> Option<&str> {
        self.customer_email.as_ref().map(|email| email.expose().as_str())
    }
}

/// Lowercase and drop separators so `Refund-Requested` and `refundRequested` compare equal.
pub(crate) fn compact(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
