use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{Campaign, CampaignStatus, NewCampaign};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Brand campaigns
#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn create(&self, brand_id: Uuid, campaign: &NewCampaign) -> RepositoryResult<Campaign>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Campaign>>;

    /// Campaigns of a brand, newest first
    async fn list_by_brand(&self, brand_id: Uuid) -> RepositoryResult<Vec<Campaign>>;

    async fn update_status(&self, id: Uuid, status: CampaignStatus) -> RepositoryResult<Campaign>;
}

/// Postgres-backed campaign store
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Create a new CampaignRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CAMPAIGN_COLUMNS: &str =
    "id, brand_id, title, description, budget, status, starts_on, ends_on, created_at";

#[async_trait]
impl CampaignStore for CampaignRepository {
    async fn create(&self, brand_id: Uuid, campaign: &NewCampaign) -> RepositoryResult<Campaign> {
        let created = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            INSERT INTO campaigns (brand_id, title, description, budget, status, starts_on, ends_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(brand_id)
        .bind(&campaign.title)
        .bind(&campaign.description)
        .bind(campaign.budget)
        .bind(CampaignStatus::Draft.as_str())
        .bind(campaign.starts_on)
        .bind(campaign.ends_on)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Campaign>> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }

    async fn list_by_brand(&self, brand_id: Uuid) -> RepositoryResult<Vec<Campaign>> {
        let campaigns = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            SELECT {CAMPAIGN_COLUMNS}
            FROM campaigns
            WHERE brand_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    async fn update_status(&self, id: Uuid, status: CampaignStatus) -> RepositoryResult<Campaign> {
        sqlx::query_as::<_, Campaign>(&format!(
            r#"
            UPDATE campaigns
            SET status = $2
            WHERE id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("campaign {}", id)))
    }
}
