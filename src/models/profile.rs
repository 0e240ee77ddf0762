use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Athlete, AthleticDirector, Brand};

/// Account role; decides which role-specific table extends the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Athlete,
    Brand,
    AthleticDirector,
    Admin,
}

impl UserRole {
    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Athlete => "athlete",
            UserRole::Brand => "brand",
            UserRole::AthleticDirector => "athletic_director",
            UserRole::Admin => "admin",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "athlete" => Ok(UserRole::Athlete),
            "brand" => Ok(UserRole::Brand),
            "athletic_director" => Ok(UserRole::AthleticDirector),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base account row. `id` is the identity id issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub role: String, // Stored as TEXT in DB, use UserRole enum for type safety
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Get the role as an enum
    pub fn role_enum(&self) -> Result<UserRole, String> {
        self.role.parse()
    }
}

/// Input for creating a profile row
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub full_name: String,
}

/// The role-specific row that extends a profile one-to-one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleDetails {
    Athlete(Athlete),
    Brand(Brand),
    AthleticDirector(AthleticDirector),
    Admin,
}

impl RoleDetails {
    pub fn role(&self) -> UserRole {
        match self {
            RoleDetails::Athlete(_) => UserRole::Athlete,
            RoleDetails::Brand(_) => UserRole::Brand,
            RoleDetails::AthleticDirector(_) => UserRole::AthleticDirector,
            RoleDetails::Admin => UserRole::Admin,
        }
    }
}
