use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod jwt;
pub mod middleware;
pub mod roles;

pub use roles::{Permission, Role};

/// Realm role claim as issued by the identity provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// User claims for JWT tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,           // Subject (user ID)
    #[serde(alias = "preferred_username")]
    pub username: String,
    #[serde(default)]
    pub realm_access: RealmAccess,
    pub exp: i64,            // Expiration time
    pub iat: i64,            // Issued at
    pub iss: String,         // Issuer
}

impl Claims {
    pub fn new(user_id: Uuid, username: String, roles: Vec<String>, issuer: &str, ttl_secs: i64) -> Self {
        let now = Utc::now();
        let exp = now + chrono::Duration::seconds(ttl_secs);

        Self {
            sub: user_id,
            username,
            realm_access: RealmAccess { roles },
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: issuer.to_string(),
        }
    }

    pub fn has_role(&self, required_role: &str) -> bool {
        self.realm_access
            .roles
            .iter()
            .any(|role| role.eq_ignore_ascii_case(required_role))
    }

    /// Roles this service understands; identity-provider housekeeping roles
    /// such as `offline_access` are dropped.
    pub fn roles(&self) -> Vec<Role> {
        self.realm_access
            .roles
            .iter()
            .filter_map(|role| role.parse().ok())
            .collect()
    }

    pub fn is_staff(&self) -> bool {
        self.has_role(roles::STAFF_ROLE)
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.roles().iter().any(|role| role.has_permission(permission))
    }
}
