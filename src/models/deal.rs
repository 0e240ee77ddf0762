use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Deal status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Pending,
    Active,
    Completed,
    Flagged,
    Approved,
    Rejected,
    Declined,
    Cancelled,
}

impl DealStatus {
    pub const ALL: [DealStatus; 8] = [
        DealStatus::Pending,
        DealStatus::Active,
        DealStatus::Completed,
        DealStatus::Flagged,
        DealStatus::Approved,
        DealStatus::Rejected,
        DealStatus::Declined,
        DealStatus::Cancelled,
    ];

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Pending => "pending",
            DealStatus::Active => "active",
            DealStatus::Completed => "completed",
            DealStatus::Flagged => "flagged",
            DealStatus::Approved => "approved",
            DealStatus::Rejected => "rejected",
            DealStatus::Declined => "declined",
            DealStatus::Cancelled => "cancelled",
        }
    }

    /// Deals a director may still decide on, or a brand may still withdraw
    pub const REVIEWABLE: [DealStatus; 2] = [DealStatus::Pending, DealStatus::Flagged];

    /// Deals an athlete may still accept or decline
    pub const ANSWERABLE: [DealStatus; 2] = [DealStatus::Pending, DealStatus::Approved];

    /// A director may only review deals that have not been decided yet
    pub fn is_reviewable(&self) -> bool {
        Self::REVIEWABLE.contains(self)
    }

    /// Statuses whose compensation counts as committed money
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            DealStatus::Active | DealStatus::Approved | DealStatus::Completed
        )
    }
}

impl FromStr for DealStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DealStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Invalid deal status: {}", s))
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NIL deal between a brand and an athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Deal {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub athlete_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub compensation: Decimal,
    pub status: String, // Stored as TEXT, use DealStatus enum for type safety
    pub review_note: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Get status as an enum
    pub fn status_enum(&self) -> DealStatus {
        self.status.parse().unwrap_or(DealStatus::Pending)
    }
}

/// Input for proposing a deal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeal {
    pub athlete_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub compensation: Decimal,
}

/// Filter applied to a deal list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealFilter {
    pub status: Option<DealStatus>,
    /// Case-insensitive substring match on the title
    pub search: Option<String>,
}

impl DealFilter {
    pub fn matches(&self, deal: &Deal) -> bool {
        if let Some(status) = self.status {
            if deal.status_enum() != status {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => deal
                .title
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

/// Counts and committed money over a set of deals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    /// Sum of compensation over active, approved and completed deals
    pub committed_compensation: Decimal,
}

impl DealSummary {
    pub fn from_deals(deals: &[Deal]) -> Self {
        deals.iter().fold(Self::default(), |mut summary, deal| {
            let status = deal.status_enum();
            summary.total += 1;
            *summary
                .by_status
                .entry(status.as_str().to_string())
                .or_insert(0) += 1;
            if status.is_committed() {
                summary.committed_compensation += deal.compensation;
            }
            summary
        })
    }

    pub fn count(&self, status: DealStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }
}
