use crate::error::{AppError, AppResult};
use crate::models::{ComplianceRule, Deal};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Audit log entry, written as one JSON line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: i64,
    pub event_type: String, // "deal_approved", "deal_flagged", "signup_rolled_back", etc.
    pub actor_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub details: serde_json::Value,
}

/// Append-only trail of compliance decisions and account rollbacks
pub struct AuditTrailService {
    log_file: PathBuf,
    file_handle: Arc<Mutex<std::fs::File>>,
}

impl AuditTrailService {
    /// Create a new audit trail service writing to `audit_<date>.log` in `log_directory`
    pub fn new(log_directory: &Path) -> AppResult<Self> {
        std::fs::create_dir_all(log_directory)
            .map_err(|e| AppError::Message(format!("Failed to create log directory: {}", e)))?;

        let date = chrono::Utc::now().format("%Y-%m-%d");
        let log_file = log_directory.join(format!("audit_{}.log", date));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| AppError::Message(format!("Failed to open audit log file: {}", e)))?;

        info!("Audit trail initialized: {:?}", log_file);

        Ok(Self {
            log_file,
            file_handle: Arc::new(Mutex::new(file)),
        })
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Log an audit entry
    pub async fn log(&self, entry: AuditLogEntry) -> AppResult<()> {
        let json = serde_json::to_string(&entry)?;

        let mut file = self.file_handle.lock().await;
        writeln!(file, "{}", json)
            .map_err(|e| AppError::Message(format!("Failed to write audit log: {}", e)))?;

        file.flush()
            .map_err(|e| AppError::Message(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    fn entry(
        event_type: &str,
        actor_id: Option<Uuid>,
        subject_id: Option<Uuid>,
        details: serde_json::Value,
    ) -> AuditLogEntry {
        AuditLogEntry {
            timestamp: chrono::Utc::now().timestamp(),
            event_type: event_type.to_string(),
            actor_id,
            subject_id,
            details,
        }
    }

    /// Log a director decision (flag, approve, reject) on a deal
    pub async fn log_deal_review(&self, deal: &Deal, reviewer_id: Uuid) -> AppResult<()> {
        let event_type = format!("deal_{}", deal.status);
        self.log(Self::entry(
            &event_type,
            Some(reviewer_id),
            Some(deal.id),
            serde_json::json!({
                "athlete_id": deal.athlete_id.to_string(),
                "brand_id": deal.brand_id.to_string(),
                "compensation": deal.compensation.to_string(),
                "note": deal.review_note,
            }),
        ))
        .await
    }

    /// Log a compliance rule toggle
    pub async fn log_rule_toggled(&self, rule: &ComplianceRule, director_id: Uuid) -> AppResult<()> {
        self.log(Self::entry(
            "rule_toggled",
            Some(director_id),
            Some(rule.id),
            serde_json::json!({
                "school": rule.school,
                "name": rule.name,
                "enabled": rule.enabled,
            }),
        ))
        .await
    }

    /// Log a sign-up whose identity had to be removed again
    pub async fn log_signup_rolled_back(
        &self,
        identity_id: Uuid,
        email: &str,
        reason: &str,
        cleanup_succeeded: bool,
    ) -> AppResult<()> {
        self.log(Self::entry(
            "signup_rolled_back",
            None,
            Some(identity_id),
            serde_json::json!({
                "email": email,
                "reason": reason,
                "cleanup_succeeded": cleanup_succeeded,
            }),
        ))
        .await
    }
}
