use crate::error::{AppError, AppResult};
use crate::models::{
    AlertSeverity, AthleteSummary, AthleticDirector, ComplianceAlert, ComplianceRule, Deal,
    DealFilter, DealStatus, DealSummary, NewComplianceAlert, Profile,
};
use crate::repositories::{ComplianceStore, DealStore, ProfileStore};
use crate::services::{AuditTrailService, AuthenticatedUser, EmailService};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Director profile as shown on the dashboard header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorProfile {
    pub profile: Profile,
    pub director: AthleticDirector,
}

/// Numbers on the director dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorStats {
    pub athlete_count: usize,
    pub deals: DealSummary,
    /// Deals waiting on a decision (pending + flagged)
    pub pending_reviews: usize,
    pub unresolved_alerts: usize,
    pub total_compensation: Decimal,
}

/// Athletic director dashboard: roster, deal review queue and compliance
pub struct DirectorService {
    profiles: Arc<dyn ProfileStore>,
    deals: Arc<dyn DealStore>,
    compliance: Arc<dyn ComplianceStore>,
    email: Arc<EmailService>,
    audit: Arc<AuditTrailService>,
}

impl DirectorService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        deals: Arc<dyn DealStore>,
        compliance: Arc<dyn ComplianceStore>,
        email: Arc<EmailService>,
        audit: Arc<AuditTrailService>,
    ) -> Self {
        Self {
            profiles,
            deals,
            compliance,
            email,
            audit,
        }
    }

    pub async fn get_profile(&self, user: &AuthenticatedUser) -> AppResult<DirectorProfile> {
        let director = user.as_director()?;
        Ok(DirectorProfile {
            profile: user.profile.clone(),
            director: director.clone(),
        })
    }

    /// Athletes registered under the director's school
    pub async fn list_athletes(&self, user: &AuthenticatedUser) -> AppResult<Vec<AthleteSummary>> {
        let director = user.as_director()?;
        Ok(self.profiles.list_athletes_by_school(&director.school).await?)
    }

    /// Deals involving the school's athletes, narrowed by `filter`
    pub async fn list_deals(
        &self,
        user: &AuthenticatedUser,
        filter: &DealFilter,
    ) -> AppResult<Vec<Deal>> {
        let director = user.as_director()?;
        let deals = self.deals.list_by_school(&director.school).await?;
        Ok(deals.into_iter().filter(|d| filter.matches(d)).collect())
    }

    /// Deals awaiting a decision: flagged first, then oldest first
    pub async fn review_queue(&self, user: &AuthenticatedUser) -> AppResult<Vec<Deal>> {
        let director = user.as_director()?;
        let mut queue: Vec<Deal> = self
            .deals
            .list_by_school(&director.school)
            .await?
            .into_iter()
            .filter(|d| d.status_enum().is_reviewable())
            .collect();

        queue.sort_by(|a, b| {
            let a_flagged = a.status_enum() == DealStatus::Flagged;
            let b_flagged = b.status_enum() == DealStatus::Flagged;
            b_flagged
                .cmp(&a_flagged)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(queue)
    }

    /// Load a deal and check that its athlete belongs to the director's school
    async fn school_deal(&self, director: &AthleticDirector, deal_id: Uuid) -> AppResult<Deal> {
        let not_found = || AppError::NotFound(format!("Deal {} not found", deal_id));

        let deal = self.deals.find_by_id(deal_id).await?.ok_or_else(not_found)?;
        let athlete = self.profiles.find_athlete(deal.athlete_id).await?;

        match athlete {
            Some(athlete) if athlete.school == director.school => Ok(deal),
            _ => Err(not_found()),
        }
    }

    /// Move a deal into the review queue and raise an alert for it
    pub async fn flag_deal(
        &self,
        user: &AuthenticatedUser,
        deal_id: Uuid,
        reason: &str,
    ) -> AppResult<Deal> {
        let director = user.as_director()?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation("A reason is required to flag a deal".into()));
        }

        let deal = self.school_deal(director, deal_id).await?;
        if deal.status_enum() != DealStatus::Pending {
            return Err(AppError::BusinessLogic(format!(
                "Only pending deals can be flagged (deal is {})",
                deal.status
            )));
        }

        let flagged = self
            .deals
            .record_review(
                deal.id,
                &[DealStatus::Pending],
                DealStatus::Flagged,
                Some(reason),
                user.id,
            )
            .await?;

        self.compliance
            .create_alert(&NewComplianceAlert {
                school: director.school.clone(),
                deal_id: Some(flagged.id),
                athlete_id: Some(flagged.athlete_id),
                severity: AlertSeverity::Medium,
                message: format!("Deal \"{}\" flagged for review: {}", flagged.title, reason),
            })
            .await?;

        self.audit_review(&flagged, user.id).await;
        info!(deal_id = %flagged.id, director = %user.id, "Deal flagged");
        Ok(flagged)
    }

    pub async fn approve_deal(
        &self,
        user: &AuthenticatedUser,
        deal_id: Uuid,
        note: Option<&str>,
    ) -> AppResult<Deal> {
        let note = note.map(str::trim).filter(|n| !n.is_empty());
        self.decide(user, deal_id, DealStatus::Approved, note).await
    }

    pub async fn reject_deal(
        &self,
        user: &AuthenticatedUser,
        deal_id: Uuid,
        reason: &str,
    ) -> AppResult<Deal> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation("A reason is required to reject a deal".into()));
        }
        self.decide(user, deal_id, DealStatus::Rejected, Some(reason)).await
    }

    async fn decide(
        &self,
        user: &AuthenticatedUser,
        deal_id: Uuid,
        decision: DealStatus,
        note: Option<&str>,
    ) -> AppResult<Deal> {
        let director = user.as_director()?;
        let deal = self.school_deal(director, deal_id).await?;

        if !deal.status_enum().is_reviewable() {
            return Err(AppError::BusinessLogic(format!(
                "Deal has already been decided (status: {})",
                deal.status
            )));
        }

        let decided = self
            .deals
            .record_review(deal.id, &DealStatus::REVIEWABLE, decision, note, user.id)
            .await?;

        self.audit_review(&decided, user.id).await;
        self.notify_parties(&decided).await;

        info!(deal_id = %decided.id, director = %user.id, decision = %decision, "Deal reviewed");
        Ok(decided)
    }

    async fn audit_review(&self, deal: &Deal, reviewer: Uuid) {
        if let Err(e) = self.audit.log_deal_review(deal, reviewer).await {
            warn!(deal_id = %deal.id, "Failed to write audit entry: {}", e);
        }
    }

    /// Email the athlete and the brand about a decision. Delivery problems are logged only.
    async fn notify_parties(&self, deal: &Deal) {
        for party in [deal.athlete_id, deal.brand_id] {
            let profile = match self.profiles.find_profile(party).await {
                Ok(Some(profile)) => profile,
                Ok(None) => continue,
                Err(e) => {
                    warn!(profile_id = %party, "Could not load profile for notification: {}", e);
                    continue;
                }
            };

            if let Err(e) = self
                .email
                .send_deal_decision(&profile.email, &profile.full_name, deal)
                .await
            {
                warn!(to = %profile.email, "Failed to send deal decision email: {}", e);
            }
        }
    }

    pub async fn list_alerts(
        &self,
        user: &AuthenticatedUser,
        include_resolved: bool,
    ) -> AppResult<Vec<ComplianceAlert>> {
        let director = user.as_director()?;
        Ok(self
            .compliance
            .list_alerts(&director.school, include_resolved)
            .await?)
    }

    pub async fn resolve_alert(
        &self,
        user: &AuthenticatedUser,
        alert_id: Uuid,
    ) -> AppResult<ComplianceAlert> {
        let director = user.as_director()?;
        let alert = self
            .compliance
            .find_alert(alert_id)
            .await?
            .filter(|a| a.school == director.school)
            .ok_or_else(|| AppError::NotFound(format!("Alert {} not found", alert_id)))?;

        if alert.resolved {
            return Ok(alert);
        }
        Ok(self.compliance.resolve_alert(alert.id).await?)
    }

    pub async fn list_rules(&self, user: &AuthenticatedUser) -> AppResult<Vec<ComplianceRule>> {
        let director = user.as_director()?;
        Ok(self.compliance.list_rules(&director.school).await?)
    }

    /// Toggle a compliance rule on or off
    pub async fn set_rule_enabled(
        &self,
        user: &AuthenticatedUser,
        rule_id: Uuid,
        enabled: bool,
    ) -> AppResult<ComplianceRule> {
        let director = user.as_director()?;
        let rule = self
            .compliance
            .find_rule(rule_id)
            .await?
            .filter(|r| r.school == director.school)
            .ok_or_else(|| AppError::NotFound(format!("Rule {} not found", rule_id)))?;

        if rule.enabled == enabled {
            return Ok(rule);
        }

        let updated = self.compliance.set_rule_enabled(rule.id, enabled).await?;
        if let Err(e) = self.audit.log_rule_toggled(&updated, user.id).await {
            warn!(rule_id = %updated.id, "Failed to write audit entry: {}", e);
        }
        info!(rule = %updated.name, enabled, "Compliance rule toggled");
        Ok(updated)
    }

    pub async fn dashboard_stats(&self, user: &AuthenticatedUser) -> AppResult<DirectorStats> {
        let director = user.as_director()?;

        let athletes = self.profiles.list_athletes_by_school(&director.school).await?;
        let deals = self.deals.list_by_school(&director.school).await?;
        let alerts = self.compliance.list_alerts(&director.school, false).await?;

        let summary = DealSummary::from_deals(&deals);
        Ok(DirectorStats {
            athlete_count: athletes.len(),
            pending_reviews: summary.count(DealStatus::Pending) + summary.count(DealStatus::Flagged),
            unresolved_alerts: alerts.len(),
            total_compensation: summary.committed_compensation,
            deals: summary,
        })
    }
}
