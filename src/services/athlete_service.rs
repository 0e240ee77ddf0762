use crate::error::{AppError, AppResult};
use crate::models::{Athlete, Deal, DealStatus, Profile};
use crate::repositories::DealStore;
use crate::services::AuthenticatedUser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub profile: Profile,
    pub athlete: Athlete,
}

/// Athlete dashboard: own profile and incoming offers
pub struct AthleteService {
    deals: Arc<dyn DealStore>,
}

impl AthleteService {
    pub fn new(deals: Arc<dyn DealStore>) -> Self {
        Self { deals }
    }

    pub async fn get_profile(&self, user: &AuthenticatedUser) -> AppResult<AthleteProfile> {
        let athlete = user.as_athlete()?;
        Ok(AthleteProfile {
            profile: user.profile.clone(),
            athlete: athlete.clone(),
        })
    }

    pub async fn list_deals(&self, user: &AuthenticatedUser) -> AppResult<Vec<Deal>> {
        let athlete = user.as_athlete()?;
        Ok(self.deals.list_by_athlete(athlete.profile_id).await?)
    }

    /// Accept (-> active) or decline (-> declined) an offer
    pub async fn respond_to_deal(
        &self,
        user: &AuthenticatedUser,
        deal_id: Uuid,
        accept: bool,
    ) -> AppResult<Deal> {
        let athlete = user.as_athlete()?;
        let deal = self
            .deals
            .find_by_id(deal_id)
            .await?
            .filter(|d| d.athlete_id == athlete.profile_id)
            .ok_or_else(|| AppError::NotFound(format!("Deal {} not found", deal_id)))?;

        let current = deal.status_enum();
        if !DealStatus::ANSWERABLE.contains(&current) {
            return Err(AppError::BusinessLogic(format!(
                "Deal can no longer be answered (status: {})",
                current
            )));
        }

        let next = if accept {
            DealStatus::Active
        } else {
            DealStatus::Declined
        };
        let updated = self
            .deals
            .update_status(deal.id, &DealStatus::ANSWERABLE, next)
            .await?;
        info!(deal_id = %updated.id, status = %next, "Athlete responded to deal");
        Ok(updated)
    }
}
