//! Tenant lifecycle and user role models

use serde::{Deserialize, Serialize};

/// Tenant account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    /// Fully operational
    Active,
    /// Deactivated by the tenant
    Inactive,
    /// Suspended by the platform
    Suspended,
}

impl TenantStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }

    /// Can users of this tenant access the API?
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Subscription billing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid up
    Active,
    /// Cancelled by the tenant
    Cancelled,
    /// Payment overdue
    PastDue,
}

impl SubscriptionStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            "past_due" => Some(Self::PastDue),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::PastDue => "past_due",
        }
    }

    /// Is the subscription in good standing?
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Role of a dashboard user within a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Tenant owner (full control)
    Owner,
    /// Administrator (catalog, orders, customers)
    Admin,
    /// Staff (read-mostly access)
    Staff,
}

impl UserRole {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }

    /// Owners and admins can mutate catalog, customers, and orders
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_status_roundtrip() {
        for status in [
            TenantStatus::Active,
            TenantStatus::Inactive,
            TenantStatus::Suspended,
        ] {
            assert_eq!(TenantStatus::from_db(status.as_db()), Some(status));
        }
        assert!(TenantStatus::Active.is_active());
        assert!(!TenantStatus::Suspended.is_active());
    }

    #[test]
    fn test_subscription_status_roundtrip() {
        for status in [
            SubscriptionStatus::Active,
            SubscriptionStatus::Cancelled,
            SubscriptionStatus::PastDue,
        ] {
            assert_eq!(SubscriptionStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(SubscriptionStatus::PastDue.as_db(), "past_due");
    }

    #[test]
    fn test_admin_roles() {
        assert!(UserRole::Owner.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Staff.is_admin());
        assert_eq!(UserRole::from_db("manager"), None);
    }
}
