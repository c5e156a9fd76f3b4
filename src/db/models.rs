use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role. Governs only the claim content of issued tokens; the core
/// performs no authorization itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A stored account row.
///
/// Intentionally does not implement `Serialize`: the digest must never reach
/// a response body. Anything leaving the store boundary goes through
/// [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub role: Role,
}

/// Externally visible account representation, digest stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
        }
    }
}

/// Fields for account creation. `password_digest` must already be hashed by
/// the caller; the store is ignorant of the hashing algorithm.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub role: Role,
}

/// Partial account update. `None` fields keep their stored value. A password
/// change arrives pre-hashed, as with creation.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_digest: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    // camelCase on the wire, matching the browser client
    #[serde(rename = "orgId")]
    pub org_id: i64,
}

/// Organization with its departments embedded (detail view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationDetail {
    #[serde(flatten)]
    pub organization: Organization,
    pub departments: Vec<Department>,
}

/// Department with its parent organization embedded (detail view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDetail {
    #[serde(flatten)]
    pub department: Department,
    pub organization: Organization,
}
