//! User roles and the authenticated user profile.

use serde::{Serialize, Serializer};

/// Role labels issued by the management API, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Manager,
    Supervisor,
    Operator,
    Technician,
    Purchasing,
    /// A label the dashboard has no sections for.
    Unrecognized(String),
}

const ROLE_TABLE: &[(&str, UserRole)] = &[
    ("ADMIN", UserRole::Admin),
    ("MANAGER", UserRole::Manager),
    ("SUPERVISOR", UserRole::Supervisor),
    ("OPERATOR", UserRole::Operator),
    ("TECHNICIAN", UserRole::Technician),
    ("PURCHASING", UserRole::Purchasing),
];

impl UserRole {
    /// Map a raw role label onto a known role.
    pub fn from_label(label: &str) -> Self {
        let upper = label.to_uppercase();
        ROLE_TABLE
            .iter()
            .find(|(key, _)| *key == upper)
            .map(|(_, role)| role.clone())
            .unwrap_or_else(|| UserRole::Unrecognized(upper))
    }

    /// Canonical upper-case label.
    pub fn label(&self) -> &str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Manager => "MANAGER",
            UserRole::Supervisor => "SUPERVISOR",
            UserRole::Operator => "OPERATOR",
            UserRole::Technician => "TECHNICIAN",
            UserRole::Purchasing => "PURCHASING",
            UserRole::Unrecognized(label) => label,
        }
    }

    /// True when this role is one of `allowed`.
    pub fn can_view(&self, allowed: &[UserRole]) -> bool {
        allowed.contains(self)
    }

    /// Admins and managers see the full management overview.
    pub fn is_management(&self) -> bool {
        self.can_view(&[UserRole::Admin, UserRole::Manager])
    }
}

impl Serialize for UserRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Authenticated caller as described by the access token.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub role: Option<UserRole>,
}
