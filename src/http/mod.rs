//! JSON HTTP API.
//!
//! Handlers answer with a `{ "data": ..., "error": ... }` envelope.
//! Routes other than `/auth/*` and `/healthz` need `Authorization: Bearer <token>`.

mod extract;
mod handlers;

pub use extract::{ApiJson, ApiPath, ApiQuery, BearerToken, CurrentUser};

use crate::error::{AppError, ServiceResponse};
use crate::AppState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

/// Error returned from handlers, rendered as an error envelope
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }
        let body: ServiceResponse<()> = ServiceResponse::err(self.0.client_message());
        (status, Json(body)).into_response()
    }
}

/// Successful handler output, rendered as a data envelope
pub struct ApiData<T>(pub T);

impl<T: Serialize> IntoResponse for ApiData<T> {
    fn into_response(self) -> Response {
        Json(ServiceResponse::ok(self.0)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiData<T>, ApiError>;

pub fn build_router(state: Arc<AppState>) -> Router {
    let auth = Router::new()
        .route("/signup/athlete", post(handlers::sign_up_athlete))
        .route("/signup/brand", post(handlers::sign_up_brand))
        .route("/signup/director", post(handlers::sign_up_director))
        .route("/signin", post(handlers::sign_in))
        .route("/signout", post(handlers::sign_out))
        .route("/me", get(handlers::me))
        .route("/reset-password", post(handlers::reset_password));

    let director = Router::new()
        .route("/profile", get(handlers::director_profile))
        .route("/athletes", get(handlers::director_athletes))
        .route("/deals", get(handlers::director_deals))
        .route("/review-queue", get(handlers::director_review_queue))
        .route("/deals/{id}/flag", post(handlers::director_flag_deal))
        .route("/deals/{id}/approve", post(handlers::director_approve_deal))
        .route("/deals/{id}/reject", post(handlers::director_reject_deal))
        .route("/alerts", get(handlers::director_alerts))
        .route("/alerts/{id}/resolve", post(handlers::director_resolve_alert))
        .route("/rules", get(handlers::director_rules))
        .route("/rules/{id}", put(handlers::director_toggle_rule))
        .route("/stats", get(handlers::director_stats));

    let brand = Router::new()
        .route(
            "/profile",
            get(handlers::brand_profile).put(handlers::brand_update_profile),
        )
        .route(
            "/campaigns",
            get(handlers::brand_campaigns).post(handlers::brand_create_campaign),
        )
        .route("/campaigns/{id}/status", put(handlers::brand_campaign_status))
        .route(
            "/deals",
            get(handlers::brand_deals).post(handlers::brand_propose_deal),
        )
        .route("/deals/{id}/cancel", post(handlers::brand_cancel_deal))
        .route("/stats", get(handlers::brand_stats));

    let athlete = Router::new()
        .route("/profile", get(handlers::athlete_profile))
        .route("/deals", get(handlers::athlete_deals))
        .route("/deals/{id}/respond", post(handlers::athlete_respond));

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .nest("/auth", auth)
        .nest("/director", director)
        .nest("/brand", brand)
        .nest("/athlete", athlete)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
