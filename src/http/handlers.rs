use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{ApiData, ApiError, ApiResult, BearerToken, CurrentUser};
use crate::error::AppError;
use crate::models::{
    AthleteSummary, Brand, BrandUpdate, Campaign, CampaignStatus, ComplianceAlert, ComplianceRule,
    Deal, DealFilter, NewCampaign, NewDeal,
};
use crate::services::{
    AthleteProfile, AuthenticatedUser, BrandProfile, BrandStats, DirectorProfile, DirectorStats,
    SignUpAthlete, SignUpBrand, SignUpDirector,
};
use crate::AppState;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

type AppStateRef = State<Arc<AppState>>;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn healthz(State(state): AppStateRef) -> ApiResult<Health> {
    if let Some(database) = &state.database {
        database.ping().await.map_err(AppError::from)?;
    }
    Ok(ApiData(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found() -> ApiError {
    ApiError(AppError::NotFound("Route not found".into()))
}

// Auth

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

pub async fn sign_up_athlete(
    State(state): AppStateRef,
    ApiJson(form): ApiJson<SignUpAthlete>,
) -> ApiResult<AuthenticatedUser> {
    Ok(ApiData(state.auth.sign_up_athlete(form).await?))
}

pub async fn sign_up_brand(
    State(state): AppStateRef,
    ApiJson(form): ApiJson<SignUpBrand>,
) -> ApiResult<AuthenticatedUser> {
    Ok(ApiData(state.auth.sign_up_brand(form).await?))
}

pub async fn sign_up_director(
    State(state): AppStateRef,
    ApiJson(form): ApiJson<SignUpDirector>,
) -> ApiResult<AuthenticatedUser> {
    Ok(ApiData(state.auth.sign_up_director(form).await?))
}

pub async fn sign_in(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<SignInRequest>,
) -> ApiResult<AuthenticatedUser> {
    Ok(ApiData(state.auth.sign_in(&req.email, &req.password).await?))
}

pub async fn sign_out(State(state): AppStateRef, BearerToken(token): BearerToken) -> ApiResult<Ack> {
    state.auth.sign_out(&token).await?;
    Ok(ApiData(Ack { success: true }))
}

pub async fn me(CurrentUser(user): CurrentUser) -> ApiResult<AuthenticatedUser> {
    Ok(ApiData(user))
}

pub async fn reset_password(
    State(state): AppStateRef,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> ApiResult<Ack> {
    state.auth.reset_password(&req.email).await?;
    Ok(ApiData(Ack { success: true }))
}

// Director

#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct RuleToggleRequest {
    pub enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    #[serde(default)]
    pub include_resolved: bool,
}

pub async fn director_profile(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<DirectorProfile> {
    Ok(ApiData(state.director.get_profile(&user).await?))
}

pub async fn director_athletes(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Vec<AthleteSummary>> {
    Ok(ApiData(state.director.list_athletes(&user).await?))
}

pub async fn director_deals(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiQuery(filter): ApiQuery<DealFilter>,
) -> ApiResult<Vec<Deal>> {
    Ok(ApiData(state.director.list_deals(&user, &filter).await?))
}

pub async fn director_review_queue(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Vec<Deal>> {
    Ok(ApiData(state.director.review_queue(&user).await?))
}

pub async fn director_flag_deal(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<FlagRequest>,
) -> ApiResult<Deal> {
    Ok(ApiData(state.director.flag_deal(&user, id, &req.reason).await?))
}

pub async fn director_approve_deal(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<ApiJson<ApproveRequest>>,
) -> ApiResult<Deal> {
    let note = body.and_then(|ApiJson(req)| req.note);
    Ok(ApiData(
        state
            .director
            .approve_deal(&user, id, note.as_deref())
            .await?,
    ))
}

pub async fn director_reject_deal(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<RejectRequest>,
) -> ApiResult<Deal> {
    Ok(ApiData(state.director.reject_deal(&user, id, &req.reason).await?))
}

pub async fn director_alerts(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<AlertsQuery>,
) -> ApiResult<Vec<ComplianceAlert>> {
    Ok(ApiData(
        state
            .director
            .list_alerts(&user, query.include_resolved)
            .await?,
    ))
}

pub async fn director_resolve_alert(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ComplianceAlert> {
    Ok(ApiData(state.director.resolve_alert(&user, id).await?))
}

pub async fn director_rules(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Vec<ComplianceRule>> {
    Ok(ApiData(state.director.list_rules(&user).await?))
}

pub async fn director_toggle_rule(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<RuleToggleRequest>,
) -> ApiResult<ComplianceRule> {
    Ok(ApiData(
        state.director.set_rule_enabled(&user, id, req.enabled).await?,
    ))
}

pub async fn director_stats(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<DirectorStats> {
    Ok(ApiData(state.director.dashboard_stats(&user).await?))
}

// Brand

#[derive(Debug, Deserialize)]
pub struct CampaignStatusRequest {
    pub status: CampaignStatus,
}

pub async fn brand_profile(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<BrandProfile> {
    Ok(ApiData(state.brand.get_profile(&user).await?))
}

pub async fn brand_update_profile(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiJson(update): ApiJson<BrandUpdate>,
) -> ApiResult<Brand> {
    Ok(ApiData(state.brand.update_profile(&user, update).await?))
}

pub async fn brand_campaigns(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Vec<Campaign>> {
    Ok(ApiData(state.brand.list_campaigns(&user).await?))
}

pub async fn brand_create_campaign(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiJson(campaign): ApiJson<NewCampaign>,
) -> ApiResult<Campaign> {
    Ok(ApiData(state.brand.create_campaign(&user, campaign).await?))
}

pub async fn brand_campaign_status(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<CampaignStatusRequest>,
) -> ApiResult<Campaign> {
    Ok(ApiData(
        state.brand.set_campaign_status(&user, id, req.status).await?,
    ))
}

pub async fn brand_deals(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Vec<Deal>> {
    Ok(ApiData(state.brand.list_deals(&user).await?))
}

pub async fn brand_propose_deal(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiJson(deal): ApiJson<NewDeal>,
) -> ApiResult<Deal> {
    Ok(ApiData(state.brand.propose_deal(&user, deal).await?))
}

pub async fn brand_cancel_deal(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Deal> {
    Ok(ApiData(state.brand.cancel_deal(&user, id).await?))
}

pub async fn brand_stats(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<BrandStats> {
    Ok(ApiData(state.brand.stats(&user).await?))
}

// Athlete

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub accept: bool,
}

pub async fn athlete_profile(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<AthleteProfile> {
    Ok(ApiData(state.athlete.get_profile(&user).await?))
}

pub async fn athlete_deals(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Vec<Deal>> {
    Ok(ApiData(state.athlete.list_deals(&user).await?))
}

pub async fn athlete_respond(
    State(state): AppStateRef,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<RespondRequest>,
) -> ApiResult<Deal> {
    Ok(ApiData(
        state.athlete.respond_to_deal(&user, id, req.accept).await?,
    ))
}
