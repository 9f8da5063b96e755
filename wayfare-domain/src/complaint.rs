use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::compact;

/// Who raised the complaint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OriginatorType {
    Customer,
    Partner,
}

impl OriginatorType {
    pub fn from_label(label: &str) -> Option<Self> {
        match compact(label).as_str() {
            "customer" | "user" | "traveller" | "traveler" => Some(OriginatorType::Customer),
            "partner" | "agent" | "vendor" => Some(OriginatorType::Partner),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintPriority {
    High,
    Medium,
    Low,
}

impl ComplaintPriority {
    pub const ALL: [ComplaintPriority; 3] = [
        ComplaintPriority::High,
        ComplaintPriority::Medium,
        ComplaintPriority::Low,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match compact(label).as_str() {
            "high" | "urgent" => Some(ComplaintPriority::High),
            "medium" | "normal" => Some(ComplaintPriority::Medium),
            "low" => Some(ComplaintPriority::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [
        ComplaintStatus::Open,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match compact(label).as_str() {
            "open" | "new" => Some(ComplaintStatus::Open),
            "inprogress" | "processing" => Some(ComplaintStatus::InProgress),
            "resolved" | "closed" => Some(ComplaintStatus::Resolved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintResponse {
    pub author: String,
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub originator: OriginatorType,
    pub originator_id: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub priority: ComplaintPriority,
    pub status: ComplaintStatus,
    /// Kept in the order the store returned them
    pub responses: Vec<ComplaintResponse>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Complaint {
    pub fn new(id: impl Into<String>, originator: OriginatorType) -> Self {
        Self {
            id: id.into(),
            originator,
            originator_id: None,
            category: None,
            subcategory: None,
            priority: ComplaintPriority::Medium,
            status: ComplaintStatus::Open,
            responses: Vec::new(),
            created_at: None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        self.status != ComplaintStatus::Resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complaint_status_labels() {
        assert_eq!(ComplaintStatus::from_label("in-progress"), Some(ComplaintStatus::InProgress));
        assert_eq!(ComplaintStatus::from_label("In Progress"), Some(ComplaintStatus::InProgress));
        assert_eq!(ComplaintStatus::from_label("closed"), Some(ComplaintStatus::Resolved));
    }
}
