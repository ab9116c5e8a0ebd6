use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::CommunitySettings;
use crate::core::cost::compute_breakdown;
use crate::core::Matcher;
use crate::models::{BreedRecord, CostRequest, ErrorResponse, FindMatchRequest, HealthResponse};
use crate::services::{CacheKey, CacheManager, DeepSeekClient, PostgresClient, SupabaseClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher<SupabaseClient>,
    pub postgres: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub deepseek: Arc<DeepSeekClient>,
    pub community: CommunitySettings,
}

/// Configure the recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/match/find", web::post().to(find_match))
        .route("/breeds/{id}", web::get().to(breed_detail))
        .route("/cost/breakdown", web::post().to(cost_breakdown));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find the best breed for a quiz outcome
///
/// POST /api/v1/match/find
///
/// Request body:
/// ```json
/// {
///   "category": "Dog",
///   "constraints": { "space": "apartment", "budget": "low", "time": "medium" }
/// }
/// ```
async fn find_match(
    state: web::Data<AppState>,
    req: web::Json<FindMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        "Finding match for category: {}, constraints: {:?}",
        req.category,
        req.constraints
    );

    // the matcher is total: every request gets a breed back
    let result = state
        .matcher
        .find_best_match(&req.category, &req.constraints)
        .await;

    HttpResponse::Ok().json(result)
}

/// Breed detail by id, catalog first, then the hosted store
///
/// GET /api/v1/breeds/{id}
async fn breed_detail(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let key = CacheKey::Breed(&id);

    match state.cache.get::<BreedRecord>(&key).await {
        Ok(Some(breed)) => return HttpResponse::Ok().json(breed),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache read failed for breed {}: {}", id, e),
    }

    match state.matcher.breed_by_id(&id).await {
        Some(breed) => {
            if let Err(e) = state.cache.set(&key, &breed).await {
                tracing::warn!("Cache write failed for breed {}: {}", id, e);
            }
            HttpResponse::Ok().json(breed)
        }
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "breed_not_found".to_string(),
            message: format!("No breed with id {}", id),
            status_code: 404,
        }),
    }
}

/// Ownership cost breakdown for a (size, tier) pair
///
/// POST /api/v1/cost/breakdown
async fn cost_breakdown(req: web::Json<CostRequest>) -> impl Responder {
    let breakdown = compute_breakdown(req.size, req.tier);

    tracing::debug!(
        "Cost breakdown for ({}, {}): monthly ${}",
        req.size.as_str(),
        req.tier.as_str(),
        breakdown.monthly_total
    );

    HttpResponse::Ok().json(breakdown)
}
