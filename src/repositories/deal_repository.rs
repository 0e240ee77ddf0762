use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{Deal, DealStatus, NewDeal};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// NIL deals
#[async_trait]
pub trait DealStore: Send + Sync {
    /// Insert a deal in `pending` state
    async fn create(&self, brand_id: Uuid, deal: &NewDeal) -> RepositoryResult<Deal>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Deal>>;

    async fn list_by_brand(&self, brand_id: Uuid) -> RepositoryResult<Vec<Deal>>;

    async fn list_by_athlete(&self, athlete_id: Uuid) -> RepositoryResult<Vec<Deal>>;

    /// Deals of every athlete registered under `school`, newest first
    async fn list_by_school(&self, school: &str) -> RepositoryResult<Vec<Deal>>;

    /// Move a deal to `status` if it is still in one of `expected`.
    ///
    /// Fails with `StaleState` when the deal has moved on in the meantime.
    async fn update_status(
        &self,
        id: Uuid,
        expected: &[DealStatus],
        status: DealStatus,
    ) -> RepositoryResult<Deal>;

    /// Store a director's decision on a deal, under the same guard as `update_status`.
    /// A `None` note keeps the note already on the deal.
    async fn record_review(
        &self,
        id: Uuid,
        expected: &[DealStatus],
        status: DealStatus,
        note: Option<&str>,
        reviewer: Uuid,
    ) -> RepositoryResult<Deal>;
}

/// Postgres-backed deal store
pub struct DealRepository {
    pool: PgPool,
}

impl DealRepository {
    /// Create a new DealRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Explain why a guarded update matched no row
    async fn guard_failure(&self, id: Uuid) -> RepositoryError {
        match self.find_by_id(id).await {
            Ok(Some(deal)) => {
                RepositoryError::StaleState(format!("Deal {} is already {}", id, deal.status))
            }
            Ok(None) => RepositoryError::NotFound(format!("deal {}", id)),
            Err(e) => e,
        }
    }
}

fn status_names(statuses: &[DealStatus]) -> Vec<&'static str> {
    statuses.iter().map(DealStatus::as_str).collect()
}

const DEAL_COLUMNS: &str = "id, brand_id, athlete_id, campaign_id, title, description, \
    compensation, status, review_note, reviewed_by, created_at, updated_at";

#[async_trait]
impl DealStore for DealRepository {
    async fn create(&self, brand_id: Uuid, deal: &NewDeal) -> RepositoryResult<Deal> {
        let created = sqlx::query_as::<_, Deal>(&format!(
            r#"
            INSERT INTO deals (brand_id, athlete_id, campaign_id, title, description, compensation, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {DEAL_COLUMNS}
            "#
        ))
        .bind(brand_id)
        .bind(deal.athlete_id)
        .bind(deal.campaign_id)
        .bind(&deal.title)
        .bind(&deal.description)
        .bind(deal.compensation)
        .bind(DealStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Deal>> {
        let deal = sqlx::query_as::<_, Deal>(&format!(
            "SELECT {DEAL_COLUMNS} FROM deals WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(deal)
    }

    async fn list_by_brand(&self, brand_id: Uuid) -> RepositoryResult<Vec<Deal>> {
        let deals = sqlx::query_as::<_, Deal>(&format!(
            "SELECT {DEAL_COLUMNS} FROM deals WHERE brand_id = $1 ORDER BY created_at DESC"
        ))
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(deals)
    }

    async fn list_by_athlete(&self, athlete_id: Uuid) -> RepositoryResult<Vec<Deal>> {
        let deals = sqlx::query_as::<_, Deal>(&format!(
            "SELECT {DEAL_COLUMNS} FROM deals WHERE athlete_id = $1 ORDER BY created_at DESC"
        ))
        .bind(athlete_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(deals)
    }

    async fn list_by_school(&self, school: &str) -> RepositoryResult<Vec<Deal>> {
        let deals = sqlx::query_as::<_, Deal>(
            r#"
            SELECT d.id, d.brand_id, d.athlete_id, d.campaign_id, d.title, d.description,
                   d.compensation, d.status, d.review_note, d.reviewed_by, d.created_at, d.updated_at
            FROM deals d
            JOIN athletes a ON a.profile_id = d.athlete_id
            WHERE a.school = $1
            ORDER BY d.created_at DESC
            "#,
        )
        .bind(school)
        .fetch_all(&self.pool)
        .await?;
        Ok(deals)
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: &[DealStatus],
        status: DealStatus,
    ) -> RepositoryResult<Deal> {
        let updated = sqlx::query_as::<_, Deal>(&format!(
            r#"
            UPDATE deals
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = ANY($3)
            RETURNING {DEAL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(status_names(expected))
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(deal) => Ok(deal),
            None => Err(self.guard_failure(id).await),
        }
    }

    async fn record_review(
        &self,
        id: Uuid,
        expected: &[DealStatus],
        status: DealStatus,
        note: Option<&str>,
        reviewer: Uuid,
    ) -> RepositoryResult<Deal> {
        let updated = sqlx::query_as::<_, Deal>(&format!(
            r#"
            UPDATE deals
            SET status = $2, review_note = COALESCE($3, review_note), reviewed_by = $4,
                updated_at = NOW()
            WHERE id = $1 AND status = ANY($5)
            RETURNING {DEAL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(note)
        .bind(reviewer)
        .bind(status_names(expected))
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(deal) => Ok(deal),
            None => Err(self.guard_failure(id).await),
        }
    }
}
