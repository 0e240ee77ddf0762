use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{ComplianceAlert, ComplianceRule, NewComplianceAlert};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Rules every school starts with, as (name, description)
pub fn default_rules() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Compensation disclosure",
            "Athletes must disclose every NIL deal to the athletic department within 72 hours.",
        ),
        (
            "Restricted categories",
            "No deals with gambling, alcohol, tobacco, cannabis or adult entertainment brands.",
        ),
        (
            "Institutional marks",
            "School logos, uniforms and trademarks may not appear without licensing approval.",
        ),
        (
            "Team activity conflicts",
            "NIL activities may not be scheduled during required team activities.",
        ),
    ]
}

/// Compliance alerts and rule toggles, scoped by school
#[async_trait]
pub trait ComplianceStore: Send + Sync {
    async fn create_alert(&self, alert: &NewComplianceAlert) -> RepositoryResult<ComplianceAlert>;

    /// Alerts for a school, newest first
    async fn list_alerts(
        &self,
        school: &str,
        include_resolved: bool,
    ) -> RepositoryResult<Vec<ComplianceAlert>>;

    async fn find_alert(&self, id: Uuid) -> RepositoryResult<Option<ComplianceAlert>>;

    async fn resolve_alert(&self, id: Uuid) -> RepositoryResult<ComplianceAlert>;

    async fn list_rules(&self, school: &str) -> RepositoryResult<Vec<ComplianceRule>>;

    async fn find_rule(&self, id: Uuid) -> RepositoryResult<Option<ComplianceRule>>;

    async fn set_rule_enabled(&self, id: Uuid, enabled: bool) -> RepositoryResult<ComplianceRule>;

    /// Insert the default rule set for a school, skipping rules that already exist
    async fn ensure_default_rules(&self, school: &str) -> RepositoryResult<Vec<ComplianceRule>>;
}

/// Postgres-backed compliance store
pub struct ComplianceRepository {
    pool: PgPool,
}

impl ComplianceRepository {
    /// Create a new ComplianceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ALERT_COLUMNS: &str = "id, school, deal_id, athlete_id, severity, message, resolved, created_at";
const RULE_COLUMNS: &str = "id, school, name, description, enabled, updated_at";

#[async_trait]
impl ComplianceStore for ComplianceRepository {
    async fn create_alert(&self, alert: &NewComplianceAlert) -> RepositoryResult<ComplianceAlert> {
        let created = sqlx::query_as::<_, ComplianceAlert>(&format!(
            r#"
            INSERT INTO compliance_alerts (school, deal_id, athlete_id, severity, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ALERT_COLUMNS}
            "#
        ))
        .bind(&alert.school)
        .bind(alert.deal_id)
        .bind(alert.athlete_id)
        .bind(alert.severity.as_str())
        .bind(&alert.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn list_alerts(
        &self,
        school: &str,
        include_resolved: bool,
    ) -> RepositoryResult<Vec<ComplianceAlert>> {
        let alerts = sqlx::query_as::<_, ComplianceAlert>(&format!(
            r#"
            SELECT {ALERT_COLUMNS}
            FROM compliance_alerts
            WHERE school = $1 AND ($2 OR resolved = FALSE)
            ORDER BY created_at DESC
            "#
        ))
        .bind(school)
        .bind(include_resolved)
        .fetch_all(&self.pool)
        .await?;
        Ok(alerts)
    }

    async fn find_alert(&self, id: Uuid) -> RepositoryResult<Option<ComplianceAlert>> {
        let alert = sqlx::query_as::<_, ComplianceAlert>(&format!(
            "SELECT {ALERT_COLUMNS} FROM compliance_alerts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(alert)
    }

    async fn resolve_alert(&self, id: Uuid) -> RepositoryResult<ComplianceAlert> {
        sqlx::query_as::<_, ComplianceAlert>(&format!(
            r#"
            UPDATE compliance_alerts
            SET resolved = TRUE
            WHERE id = $1
            RETURNING {ALERT_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("compliance alert {}", id)))
    }

    async fn list_rules(&self, school: &str) -> RepositoryResult<Vec<ComplianceRule>> {
        let rules = sqlx::query_as::<_, ComplianceRule>(&format!(
            "SELECT {RULE_COLUMNS} FROM compliance_rules WHERE school = $1 ORDER BY name ASC"
        ))
        .bind(school)
        .fetch_all(&self.pool)
        .await?;
        Ok(rules)
    }

    async fn find_rule(&self, id: Uuid) -> RepositoryResult<Option<ComplianceRule>> {
        let rule = sqlx::query_as::<_, ComplianceRule>(&format!(
            "SELECT {RULE_COLUMNS} FROM compliance_rules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rule)
    }

    async fn set_rule_enabled(&self, id: Uuid, enabled: bool) -> RepositoryResult<ComplianceRule> {
        sqlx::query_as::<_, ComplianceRule>(&format!(
            r#"
            UPDATE compliance_rules
            SET enabled = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {RULE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(enabled)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("compliance rule {}", id)))
    }

    async fn ensure_default_rules(&self, school: &str) -> RepositoryResult<Vec<ComplianceRule>> {
        let mut tx = self.pool.begin().await?;

        for (name, description) in default_rules() {
            sqlx::query(
                r#"
                INSERT INTO compliance_rules (school, name, description)
                VALUES ($1, $2, $3)
                ON CONFLICT (school, name) DO NOTHING
                "#,
            )
            .bind(school)
            .bind(name)
            .bind(description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        self.list_rules(school).await
    }
}
