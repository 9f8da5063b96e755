//! Conversion of raw store documents into canonical entities.
//!
//! Every "which field name means what" rule lives here. Each logical
//! attribute has an ordered list of field names; the first one holding a
//! usable value wins. Normalization never fails: unusable values coalesce to
//! a default and are reported at `debug` level.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;
use wayfare_shared::Masked;

use crate::booking::{Booking, BookingStatus, ServiceCategory};
use crate::complaint::{
    Complaint, ComplaintPriority, ComplaintResponse, ComplaintStatus, OriginatorType,
};
use crate::customer::{AccountStatus, Customer};
use crate::document::Document;
use crate::partner::{Partner, PartnerStatus, StatusChange};

pub const BOOKING_CATEGORY_FIELDS: &[&str] = &["bookingType", "type", "serviceType", "category"];
pub const BOOKING_AMOUNT_FIELDS: &[&str] = &["amount", "totalAmount", "totalPrice", "price"];
pub const BOOKING_STATUS_FIELDS: &[&str] = &["status", "bookingStatus"];
pub const BOOKING_CREATED_FIELDS: &[&str] = &["createdAt", "bookingDate", "timestamp"];
pub const CUSTOMER_ID_FIELDS: &[&str] = &["customerId", "userId", "uid"];
pub const CUSTOMER_NAME_FIELDS: &[&str] = &["customerName", "userName", "fullName"];
pub const CUSTOMER_EMAIL_FIELDS: &[&str] = &["customerEmail", "userEmail", "email"];
pub const PARTNER_ID_FIELDS: &[&str] = &["partnerId", "agentId", "vendorId"];
pub const PARTNER_NAME_FIELDS: &[&str] = &["partnerName", "agentName", "companyName"];
pub const TRAVEL_DATE_FIELDS: &[&str] = &["travelDate", "startDate", "checkIn", "pickupDate"];
pub const CANCELLED_AT_FIELDS: &[&str] = &["cancelledAt", "cancellationDate"];

/// Normalize a booking document.
///
/// `category_hint` is used when none of the category fields resolve, for
/// collections that only ever hold one kind of booking.
pub fn normalize_booking(doc: &Document, category_hint: Option<ServiceCategory>) -> Booking {
    let category = match doc.first_str(BOOKING_CATEGORY_FIELDS) {
        Some(label) => ServiceCategory::from_label(&label).or_else(|| {
            debug!(booking_id = %doc.id, label = %label, "Unrecognised booking category");
            category_hint
        }),
        None => category_hint,
    };

    let status = match doc.first_str(BOOKING_STATUS_FIELDS) {
        Some(label) => BookingStatus::from_label(&label).unwrap_or_else(|| {
            debug!(booking_id = %doc.id, label = %label, "Unrecognised booking status, treating as pending");
            BookingStatus::Pending
        }),
        None => BookingStatus::Pending,
    };

    let amount = booking_amount(doc);

    Booking {
        id: doc.id.clone(),
        customer_id: doc.first_str(CUSTOMER_ID_FIELDS),
        customer_name: doc.first_str(CUSTOMER_NAME_FIELDS),
        customer_email: doc.first_str(CUSTOMER_EMAIL_FIELDS).map(Masked::new),
        partner_id: doc.first_str(PARTNER_ID_FIELDS),
        partner_name: doc.first_str(PARTNER_NAME_FIELDS),
        category,
        amount,
        status,
        created_at: timestamp_field(doc, BOOKING_CREATED_FIELDS),
        travel_date: timestamp_field(doc, TRAVEL_DATE_FIELDS),
        cancelled_at: timestamp_field(doc, CANCELLED_AT_FIELDS),
    }
}

pub fn normalize_partner(doc: &Document) -> Partner {
    let status = doc
        .first_str(&["status", "approvalStatus"])
        .and_then(|label| PartnerStatus::from_label(&label))
        .unwrap_or(PartnerStatus::Pending);

    let status_history = doc
        .first(&["statusHistory", "history"])
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(status_change).collect())
        .unwrap_or_default();

    Partner {
        id: doc.id.clone(),
        name: doc
            .first_str(&["companyName", "name", "displayName", "agencyName"])
            .unwrap_or_else(|| doc.id.clone()),
        status,
        email: doc.first_str(&["email", "contactEmail"]),
        phone: doc.first_str(&["phone", "contactPhone", "mobile"]),
        status_history,
        created_at: timestamp_field(doc, &["createdAt", "registeredAt"]),
    }
}

pub fn normalize_customer(doc: &Document) -> Customer {
    let status = match doc.first(&["status", "isActive", "active"]) {
        Some(Value::Bool(true)) => AccountStatus::Active,
        Some(Value::Bool(false)) => AccountStatus::Inactive,
        Some(Value::String(label)) if label.trim().eq_ignore_ascii_case("inactive") => {
            AccountStatus::Inactive
        }
        _ => AccountStatus::Active,
    };

    Customer {
        id: doc.id.clone(),
        name: doc.first_str(&["fullName", "name", "displayName"]),
        email: doc.first_str(&["email"]).map(Masked::new),
        phone: doc.first_str(&["phone", "mobile"]).map(Masked::new),
        status,
        registered_at: timestamp_field(doc, &["createdAt", "registeredAt", "registrationDate"]),
    }
}

pub fn normalize_complaint(doc: &Document) -> Complaint {
    let originator = doc
        .first_str(&["userType", "originatorType", "raisedBy"])
        .and_then(|label| OriginatorType::from_label(&label))
        .unwrap_or(OriginatorType::Customer);

    let responses = doc
        .first(&["responses", "replies"])
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(complaint_response).collect())
        .unwrap_or_default();

    Complaint {
        id: doc.id.clone(),
        originator,
        originator_id: doc.first_str(&["userId", "customerId", "partnerId", "raisedById"]),
        category: doc.first_str(&["category"]),
        subcategory: doc.first_str(&["subcategory", "subCategory"]),
        priority: doc
            .first_str(&["priority"])
            .and_then(|label| ComplaintPriority::from_label(&label))
            .unwrap_or(ComplaintPriority::Medium),
        status: doc
            .first_str(&["status"])
            .and_then(|label| ComplaintStatus::from_label(&label))
            .unwrap_or(ComplaintStatus::Open),
        responses,
        created_at: timestamp_field(doc, &["createdAt", "timestamp"]),
    }
}

fn status_change(value: &Value) -> Option<StatusChange> {
    let entry = Document::from_value(value.clone())?;
    Some(StatusChange {
        action: entry.first_str(&["action", "status"])?,
        reason: entry.first_str(&["reason", "note"]),
        actor: entry.first_str(&["by", "actor", "changedBy"]),
        timestamp: timestamp_field(&entry, &["timestamp", "at", "date"]),
    })
}

fn complaint_response(value: &Value) -> Option<ComplaintResponse> {
    let entry = Document::from_value(value.clone())?;
    Some(ComplaintResponse {
        author: entry
            .first_str(&["author", "by", "respondedBy"])
            .unwrap_or_else(|| "Unknown".to_string()),
        message: entry.first_str(&["message", "text", "response"])?,
        timestamp: timestamp_field(&entry, &["timestamp", "createdAt"]),
    })
}

fn timestamp_field(doc: &Document, keys: &[&str]) -> Option<DateTime<Utc>> {
    let value = doc.first(keys)?;
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        debug!(document_id = %doc.id, "Unparsable timestamp, leaving unset");
    }
    parsed
}

/// First amount field that parses; a present but unusable field falls
/// through to the next one. Nothing usable coalesces to zero.
fn booking_amount(doc: &Document) -> f64 {
    let mut present = false;
    for key in BOOKING_AMOUNT_FIELDS {
        let Some(value) = doc.get(key).filter(|v| !v.is_null()) else {
            continue;
        };
        present = true;
        if let Some(amount) = parse_amount(value) {
            return amount;
        }
    }
    if present {
        debug!(document_id = %doc.id, "Unusable amount, coalescing to 0");
    }
    0.0
}

/// Parse an amount from a number or a numeric string. Negative and
/// non-finite values are rejected.
pub fn parse_amount(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|amount| amount.is_finite() && *amount >= 0.0)
}

/// Parse the timestamp shapes the store and its writers produce:
/// RFC 3339 strings, plain `YYYY-MM-DD` dates, epoch milliseconds, and
/// `{seconds, nanoseconds}` objects (with or without a leading underscore).
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, u32::try_from(nanos).ok()?).single()
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}
