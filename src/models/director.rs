use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Athletic director row, extends a profile with role `athletic_director`.
/// A director oversees every athlete registered under the same school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AthleticDirector {
    pub profile_id: Uuid,
    pub school: String,
    pub title: Option<String>,
}
