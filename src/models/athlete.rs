use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Athlete row, extends a profile with role `athlete`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Athlete {
    pub profile_id: Uuid,
    pub school: String,
    pub sport: String,
    pub graduation_year: Option<i32>,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub follower_count: i64,
}

/// Athlete joined with the name and email from its profile, as listed on the director roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AthleteSummary {
    pub profile_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub school: String,
    pub sport: String,
    pub graduation_year: Option<i32>,
    pub follower_count: i64,
}
