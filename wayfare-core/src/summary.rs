use chrono::{DateTime, Utc};
use serde::Serialize;
use wayfare_domain::{Complaint, ComplaintPriority, ComplaintStatus, Customer, OriginatorType};

use crate::series::{bucket_by_month, MonthlyBucket};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// New registrations per month, oldest first
    pub registrations: Vec<MonthlyBucket>,
}

pub fn compute_customer_summary(
    customers: &[Customer],
    months_back: usize,
    now: DateTime<Utc>,
) -> CustomerSummary {
    let active = customers.iter().filter(|c| c.is_active()).count();
    CustomerSummary {
        total: customers.len(),
        active,
        inactive: customers.len() - active,
        registrations: bucket_by_month(customers, months_back, now, |c| c.registered_at, |_| 0.0),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintStatusCounts {
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintPriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintOriginatorCounts {
    pub customer: usize,
    pub partner: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintSummary {
    pub total: usize,
    pub by_status: ComplaintStatusCounts,
    pub by_priority: ComplaintPriorityCounts,
    pub by_originator: ComplaintOriginatorCounts,
    /// Unresolved complaints nobody has answered yet
    pub awaiting_response: usize,
}

pub fn compute_complaint_summary(complaints: &[Complaint]) -> ComplaintSummary {
    let mut summary = ComplaintSummary {
        total: complaints.len(),
        ..ComplaintSummary::default()
    };

    for complaint in complaints {
        match complaint.status {
            ComplaintStatus::Open => summary.by_status.open += 1,
            ComplaintStatus::InProgress => summary.by_status.in_progress += 1,
            ComplaintStatus::Resolved => summary.by_status.resolved += 1,
        }
        match complaint.priority {
            ComplaintPriority::High => summary.by_priority.high += 1,
            ComplaintPriority::Medium => summary.by_priority.medium += 1,
            ComplaintPriority::Low => summary.by_priority.low += 1,
        }
        match complaint.originator {
            OriginatorType::Customer => summary.by_originator.customer += 1,
            OriginatorType::Partner => summary.by_originator.partner += 1,
        }
        if complaint.is_unresolved() && complaint.responses.is_empty() {
            summary.awaiting_response += 1;
        }
    }

    summary
}
