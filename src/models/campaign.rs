use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
        }
    }

    /// Allowed moves: draft -> active, active <-> paused, active/paused -> completed
    pub fn can_transition_to(&self, next: CampaignStatus) -> bool {
        use CampaignStatus::*;
        matches!(
            (self, next),
            (Draft, Active) | (Active, Paused) | (Paused, Active) | (Active, Completed) | (Paused, Completed)
        )
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(CampaignStatus::Draft),
            "active" => Ok(CampaignStatus::Active),
            "paused" => Ok(CampaignStatus::Paused),
            "completed" => Ok(CampaignStatus::Completed),
            _ => Err(format!("Invalid campaign status: {}", s)),
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marketing campaign run by a brand; deals may be attached to one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Campaign {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub budget: Decimal,
    pub status: String, // Stored as TEXT, use CampaignStatus enum for type safety
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Get status as an enum
    pub fn status_enum(&self) -> CampaignStatus {
        self.status.parse().unwrap_or(CampaignStatus::Draft)
    }

    pub fn is_active(&self) -> bool {
        self.status_enum() == CampaignStatus::Active
    }
}

/// Input for creating a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCampaign {
    pub title: String,
    pub description: Option<String>,
    pub budget: Decimal,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}
