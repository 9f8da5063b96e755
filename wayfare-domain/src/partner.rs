use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::compact;

/// Partner (agent) approval status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PartnerStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
}

impl PartnerStatus {
    pub const ALL: [PartnerStatus; 4] = [
        PartnerStatus::Pending,
        PartnerStatus::Approved,
        PartnerStatus::Rejected,
        PartnerStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerStatus::Pending => "pending",
            PartnerStatus::Approved => "approved",
            PartnerStatus::Rejected => "rejected",
            PartnerStatus::Suspended => "suspended",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match compact(label).as_str() {
            "pending" | "pendingapproval" | "submitted" => Some(PartnerStatus::Pending),
            "approved" | "active" => Some(PartnerStatus::Approved),
            "rejected" | "declined" => Some(PartnerStatus::Rejected),
            "suspended" | "blocked" => Some(PartnerStatus::Suspended),
            _ => None,
        }
    }
}

/// One entry of a partner's append-only status audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub action: String,
    pub reason: Option<String>,
    pub actor: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub status: PartnerStatus,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status_history: Vec<StatusChange>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Partner {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: PartnerStatus::Pending,
            email: None,
            phone: None,
            status_history: Vec::new(),
            created_at: None,
        }
    }

    /// Most recent audit entry, if any
    pub fn last_change(&self) -> Option<&StatusChange> {
        self.status_history.last()
    }
}
