//! Tenant verification status carried on a session.

use serde::{Deserialize, Serialize};

/// Verification state of the caller's tenant.
///
/// `Unknown` covers a session whose token carries no status at all, which
/// is distinct from a tenant that has not submitted verification yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantVerification {
    #[default]
    Unknown,
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
}

impl TenantVerification {
    /// Parse an optional status claim. Absent, blank, or unrecognized
    /// values map to `Unknown`.
    pub fn from_claim(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return TenantVerification::Unknown;
        };
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "not_submitted" | "none" | "unsubmitted" => TenantVerification::NotSubmitted,
            "pending" | "submitted" | "in_review" => TenantVerification::Pending,
            "approved" | "verified" => TenantVerification::Approved,
            "rejected" | "denied" => TenantVerification::Rejected,
            _ => TenantVerification::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TenantVerification::Unknown => "unknown",
            TenantVerification::NotSubmitted => "not_submitted",
            TenantVerification::Pending => "pending",
            TenantVerification::Approved => "approved",
            TenantVerification::Rejected => "rejected",
        }
    }

    pub fn is_approved(self) -> bool {
        self == TenantVerification::Approved
    }
}
