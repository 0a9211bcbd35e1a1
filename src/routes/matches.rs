use crate::core::Matcher;
use crate::models::{
    CompatibilityQuery, CompatibilityResponse, ErrorResponse, HealthResponse, RunMatchingResponse,
    UserMatchesQuery, UserMatchesResponse,
};
use crate::services::{self, PostgresClient, ProfileClient, StoreError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<ProfileClient>,
    pub matches: Arc<PostgresClient>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/run", web::post().to(run_matching))
        .route("/matches/user", web::get().to(get_user_matches))
        .route("/matches/compatibility", web::get().to(get_compatibility));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.matches.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Run a full stable-matching pass over the current candidate pool
///
/// POST /api/v1/matches/run
///
/// Recomputes the matching from scratch, persists newly discovered pairs
/// and returns them. Re-running against an unchanged pool is a no-op.
async fn run_matching(state: web::Data<AppState>) -> impl Responder {
    match services::run_matching(
        state.profiles.as_ref(),
        state.matches.as_ref(),
        &state.matcher,
    )
    .await
    {
        Ok(report) => HttpResponse::Ok().json(RunMatchingResponse {
            run_id: report.run_id,
            pool_size: report.pool_size,
            created_count: report.created.len(),
            created: report.created,
            skipped_existing: report.skipped_existing,
            message: report.message,
        }),
        Err(e) => store_error_response("Matching run failed", e),
    }
}

/// Get the persisted matches for a user, enriched with partner summaries
///
/// GET /api/v1/matches/user?userId={userId}
async fn get_user_matches(
    state: web::Data<AppState>,
    query: web::Query<UserMatchesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error_response(errors);
    }

    match services::get_user_matches(
        state.profiles.as_ref(),
        state.matches.as_ref(),
        &query.user_id,
    )
    .await
    {
        Ok(matches) => HttpResponse::Ok().json(UserMatchesResponse {
            user_id: query.user_id.clone(),
            count: matches.len(),
            matches,
        }),
        Err(e) => store_error_response("Failed to fetch matches", e),
    }
}

/// Get the compatibility score between two users
///
/// GET /api/v1/matches/compatibility?userId={userId}&otherUserId={otherUserId}
async fn get_compatibility(
    state: web::Data<AppState>,
    query: web::Query<CompatibilityQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error_response(errors);
    }

    match services::get_compatibility(state.profiles.as_ref(), &query.user_id, &query.other_user_id)
        .await
    {
        Ok(score) => HttpResponse::Ok().json(CompatibilityResponse {
            user_id: query.user_id.clone(),
            other_user_id: query.other_user_id.clone(),
            compatibility_score: score,
        }),
        Err(e) => store_error_response("Failed to compute compatibility", e),
    }
}

fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn store_error_response(context: &str, err: StoreError) -> HttpResponse {
    if err.is_not_found() {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        });
    }

    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: context.to_string(),
        message: err.to_string(),
        status_code: 500,
    })
}
