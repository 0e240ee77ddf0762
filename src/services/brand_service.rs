use crate::error::{AppError, AppResult};
use crate::models::{
    Brand, BrandUpdate, Campaign, CampaignStatus, Deal, DealStatus, DealSummary, NewCampaign,
    NewDeal, Profile,
};
use crate::repositories::{CampaignStore, DealStore, ProfileStore};
use crate::services::{AuthenticatedUser, EmailService};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Largest amount a `NUMERIC(12, 2)` money column holds
fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Money must fit the column exactly: at most two decimal places, at most `max_amount()`
fn validate_amount(field: &str, amount: Decimal) -> AppResult<()> {
    if amount.normalize().scale() > 2 {
        return Err(AppError::Validation(format!(
            "{} cannot have more than 2 decimal places",
            field
        )));
    }
    if amount > max_amount() {
        return Err(AppError::Validation(format!(
            "{} cannot exceed {}",
            field,
            max_amount()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    pub profile: Profile,
    pub brand: Brand,
}

/// Numbers on the brand dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandStats {
    pub campaign_count: usize,
    pub active_campaigns: usize,
    pub deals: DealSummary,
    pub committed_spend: Decimal,
}

/// Brand dashboard: profile, campaigns and deal offers
pub struct BrandService {
    profiles: Arc<dyn ProfileStore>,
    campaigns: Arc<dyn CampaignStore>,
    deals: Arc<dyn DealStore>,
    email: Arc<EmailService>,
}

impl BrandService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        campaigns: Arc<dyn CampaignStore>,
        deals: Arc<dyn DealStore>,
        email: Arc<EmailService>,
    ) -> Self {
        Self {
            profiles,
            campaigns,
            deals,
            email,
        }
    }

    pub async fn get_profile(&self, user: &AuthenticatedUser) -> AppResult<BrandProfile> {
        let brand = user.as_brand()?;
        Ok(BrandProfile {
            profile: user.profile.clone(),
            brand: brand.clone(),
        })
    }

    pub async fn update_profile(
        &self,
        user: &AuthenticatedUser,
        update: BrandUpdate,
    ) -> AppResult<Brand> {
        let brand = user.as_brand()?;
        if update.is_empty() {
            return Ok(brand.clone());
        }
        if let Some(name) = &update.company_name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("Company name cannot be empty".into()));
            }
        }

        let updated = self.profiles.update_brand(brand.profile_id, &update).await?;
        info!(brand_id = %updated.profile_id, "Brand profile updated");
        Ok(updated)
    }

    pub async fn create_campaign(
        &self,
        user: &AuthenticatedUser,
        campaign: NewCampaign,
    ) -> AppResult<Campaign> {
        let brand = user.as_brand()?;

        if campaign.title.trim().is_empty() {
            return Err(AppError::Validation("Campaign title is required".into()));
        }
        if campaign.budget.is_sign_negative() {
            return Err(AppError::Validation("Budget cannot be negative".into()));
        }
        validate_amount("Budget", campaign.budget)?;
        if let (Some(starts), Some(ends)) = (campaign.starts_on, campaign.ends_on) {
            if ends < starts {
                return Err(AppError::Validation(
                    "Campaign cannot end before it starts".into(),
                ));
            }
        }

        let campaign = NewCampaign {
            title: campaign.title.trim().to_string(),
            ..campaign
        };
        let created = self.campaigns.create(brand.profile_id, &campaign).await?;
        info!(campaign_id = %created.id, brand_id = %brand.profile_id, "Campaign created");
        Ok(created)
    }

    pub async fn list_campaigns(&self, user: &AuthenticatedUser) -> AppResult<Vec<Campaign>> {
        let brand = user.as_brand()?;
        Ok(self.campaigns.list_by_brand(brand.profile_id).await?)
    }

    async fn own_campaign(&self, brand: &Brand, campaign_id: Uuid) -> AppResult<Campaign> {
        self.campaigns
            .find_by_id(campaign_id)
            .await?
            .filter(|c| c.brand_id == brand.profile_id)
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", campaign_id)))
    }

    pub async fn set_campaign_status(
        &self,
        user: &AuthenticatedUser,
        campaign_id: Uuid,
        status: CampaignStatus,
    ) -> AppResult<Campaign> {
        let brand = user.as_brand()?;
        let campaign = self.own_campaign(brand, campaign_id).await?;

        let current = campaign.status_enum();
        if !current.can_transition_to(status) {
            return Err(AppError::BusinessLogic(format!(
                "Cannot move campaign from {} to {}",
                current, status
            )));
        }

        let updated = self.campaigns.update_status(campaign.id, status).await?;
        info!(campaign_id = %updated.id, status = %status, "Campaign status changed");
        Ok(updated)
    }

    /// Offer a deal to an athlete. The athlete is notified by email.
    pub async fn propose_deal(&self, user: &AuthenticatedUser, deal: NewDeal) -> AppResult<Deal> {
        let brand = user.as_brand()?;

        if deal.title.trim().is_empty() {
            return Err(AppError::Validation("Deal title is required".into()));
        }
        if deal.compensation <= Decimal::ZERO {
            return Err(AppError::Validation("Compensation must be greater than zero".into()));
        }
        validate_amount("Compensation", deal.compensation)?;

        let athlete_profile = self
            .profiles
            .find_profile(deal.athlete_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Athlete {} not found", deal.athlete_id)))?;
        if self.profiles.find_athlete(deal.athlete_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Athlete {} not found", deal.athlete_id)));
        }

        if let Some(campaign_id) = deal.campaign_id {
            let campaign = self.own_campaign(brand, campaign_id).await?;
            if campaign.status_enum() == CampaignStatus::Completed {
                return Err(AppError::BusinessLogic(
                    "Cannot add deals to a completed campaign".into(),
                ));
            }
        }

        let deal = NewDeal {
            title: deal.title.trim().to_string(),
            ..deal
        };
        let created = self.deals.create(brand.profile_id, &deal).await?;
        info!(deal_id = %created.id, athlete_id = %created.athlete_id, "Deal proposed");

        if let Err(e) = self
            .email
            .send_deal_offer(
                &athlete_profile.email,
                &athlete_profile.full_name,
                &brand.company_name,
                &created,
            )
            .await
        {
            warn!(deal_id = %created.id, "Failed to send offer email: {}", e);
        }

        Ok(created)
    }

    pub async fn list_deals(&self, user: &AuthenticatedUser) -> AppResult<Vec<Deal>> {
        let brand = user.as_brand()?;
        Ok(self.deals.list_by_brand(brand.profile_id).await?)
    }

    /// Withdraw an offer that has not been decided yet
    pub async fn cancel_deal(&self, user: &AuthenticatedUser, deal_id: Uuid) -> AppResult<Deal> {
        let brand = user.as_brand()?;
        let deal = self
            .deals
            .find_by_id(deal_id)
            .await?
            .filter(|d| d.brand_id == brand.profile_id)
            .ok_or_else(|| AppError::NotFound(format!("Deal {} not found", deal_id)))?;

        if !deal.status_enum().is_reviewable() {
            return Err(AppError::BusinessLogic(format!(
                "Only pending or flagged deals can be cancelled (deal is {})",
                deal.status
            )));
        }

        let cancelled = self
            .deals
            .update_status(deal.id, &DealStatus::REVIEWABLE, DealStatus::Cancelled)
            .await?;
        info!(deal_id = %cancelled.id, "Deal cancelled by brand");
        Ok(cancelled)
    }

    pub async fn stats(&self, user: &AuthenticatedUser) -> AppResult<BrandStats> {
        let brand = user.as_brand()?;
        let campaigns = self.campaigns.list_by_brand(brand.profile_id).await?;
        let deals = self.deals.list_by_brand(brand.profile_id).await?;

        let summary = DealSummary::from_deals(&deals);
        Ok(BrandStats {
            campaign_count: campaigns.len(),
            active_campaigns: campaigns.iter().filter(|c| c.is_active()).count(),
            committed_spend: summary.committed_compensation,
            deals: summary,
        })
    }
}
