use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl AlertSeverity {
    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
        }
    }
}

impl FromStr for AlertSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(AlertSeverity::Low),
            "medium" => Ok(AlertSeverity::Medium),
            "high" => Ok(AlertSeverity::High),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

/// Notice shown on a director's dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ComplianceAlert {
    pub id: Uuid,
    pub school: String,
    pub deal_id: Option<Uuid>,
    pub athlete_id: Option<Uuid>,
    pub severity: String, // Stored as TEXT, use AlertSeverity enum for type safety
    pub message: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

impl ComplianceAlert {
    pub fn severity_enum(&self) -> AlertSeverity {
        self.severity.parse().unwrap_or(AlertSeverity::Low)
    }
}

/// Input for raising an alert
#[derive(Debug, Clone)]
pub struct NewComplianceAlert {
    pub school: String,
    pub deal_id: Option<Uuid>,
    pub athlete_id: Option<Uuid>,
    pub severity: AlertSeverity,
    pub message: String,
}

/// School compliance rule. Only the enabled flag is managed here; rules are
/// informational and are not evaluated against deals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ComplianceRule {
    pub id: Uuid,
    pub school: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}
