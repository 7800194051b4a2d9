//! Role-based access control (RBAC) module.
//!
//! Roles arrive as realm role strings on the bearer token. Each role maps to
//! a set of `resource:action` permissions; handlers ask for a permission
//! rather than a role.

use std::collections::HashSet;

pub const PPR_ROLE: &str = "ppr";
pub const STAFF_ROLE: &str = "staff";
pub const COLIN_ROLE: &str = "colin";
pub const SYSTEM_ROLE: &str = "system";
pub const BASIC_ROLE: &str = "basic";

/// Permission represents a specific action on a resource.
/// Format: "resource:action" (e.g., "discharges:create")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permission(String);

impl Permission {
    pub fn new(resource: &str, action: &str) -> Self {
        Self(format!("{}:{}", resource, action))
    }

    pub fn wildcard(resource: &str) -> Self {
        Self(format!("{}:*", resource))
    }

    pub fn resource(&self) -> &str {
        self.0.split(':').next().unwrap_or("")
    }

    pub fn action(&self) -> &str {
        self.0.split(':').nth(1).unwrap_or("")
    }

    pub fn is_wildcard(&self) -> bool {
        self.0.ends_with(":*")
    }

    /// Check if this permission grants access to the requested permission
    pub fn grants(&self, requested: &Permission) -> bool {
        if self.0 == requested.0 || self.0 == "*:*" {
            return true;
        }

        self.is_wildcard() && self.resource() == requested.resource()
    }

    pub fn create_financing_statement() -> Self {
        Self::new("financing_statements", "create")
    }

    pub fn read_financing_statement() -> Self {
        Self::new("financing_statements", "read")
    }

    pub fn create_discharge() -> Self {
        Self::new("discharges", "create")
    }

    pub fn read_discharge() -> Self {
        Self::new("discharges", "read")
    }
}

impl From<&str> for Permission {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry roles carried in the token's realm roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Ppr,
    Staff,
    Colin,
    System,
    Basic,
}

impl Role {
    /// Get all permissions for this role
    pub fn permissions(&self) -> HashSet<Permission> {
        match self {
            Role::Ppr => ["financing_statements:*", "discharges:*"]
                .into_iter()
                .map(Permission::from)
                .collect(),
            Role::Staff | Role::System => ["*:*"].into_iter().map(Permission::from).collect(),
            Role::Colin => ["financing_statements:read"]
                .into_iter()
                .map(Permission::from)
                .collect(),
            Role::Basic => HashSet::new(),
        }
    }

    /// Check if role has a specific permission
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions().iter().any(|p| p.grants(permission))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Ppr => PPR_ROLE,
            Role::Staff => STAFF_ROLE,
            Role::Colin => COLIN_ROLE,
            Role::System => SYSTEM_ROLE,
            Role::Basic => BASIC_ROLE,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            PPR_ROLE => Ok(Role::Ppr),
            STAFF_ROLE => Ok(Role::Staff),
            COLIN_ROLE => Ok(Role::Colin),
            SYSTEM_ROLE => Ok(Role::System),
            BASIC_ROLE => Ok(Role::Basic),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
pub struct RoleParseError(String);

impl std::fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid role: {}", self.0)
    }
}

impl std::error::Error for RoleParseError {}
