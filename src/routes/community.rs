use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    CreatePostRequest, CreatePostResponse, ErrorResponse, FeedbackRequest, FeedbackResponse,
    GenerateNamesRequest, GenerateNamesResponse, ListPostsQuery, PostSort, PostsResponse, Review,
    ReviewsResponse, TrendingResponse,
};
use crate::routes::recommend::AppState;
use crate::services::{CacheKey, ModerationVerdict};

/// Configure the community routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/posts", web::get().to(list_posts))
        .route("/posts", web::post().to(create_post))
        .route("/posts/trending", web::get().to(trending_posts))
        .route("/reviews/{breed}", web::get().to(breed_reviews))
        .route("/names/generate", web::post().to(generate_names))
        .route("/feedback", web::post().to(record_feedback));
}

/// Community feed, newest first by default
///
/// GET /api/v1/posts?sort=latest|oldest&category=...
async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> impl Responder {
    let sort = match query.sort.as_deref() {
        Some("oldest") => PostSort::Oldest,
        _ => PostSort::Latest,
    };

    match state.postgres.list_posts(sort, query.category.as_deref()).await {
        Ok(posts) => {
            let total = posts.len();
            HttpResponse::Ok().json(PostsResponse { posts, total })
        }
        Err(e) => {
            tracing::error!("Failed to list posts: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list posts".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Publish a post after AI moderation
///
/// POST /api/v1/posts
///
/// The moderation verdict gates the insert: UNSAFE content is rejected, and
/// a moderation outage also rejects since nothing safe can be synthesized.
async fn create_post(
    state: web::Data<AppState>,
    req: web::Json<CreatePostRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_post request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.deepseek.moderate(&req.content).await {
        Ok(ModerationVerdict::Safe) => {}
        Ok(ModerationVerdict::Unsafe) => {
            tracing::info!("Moderation rejected a post");
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "content_violation".to_string(),
                message: "Content violation detected. Please keep the community safe and friendly."
                    .to_string(),
                status_code: 400,
            });
        }
        Err(e) => {
            tracing::error!("AI moderation failed: {}", e);
            return HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "moderation_unavailable".to_string(),
                message: "Unable to verify content safety at this time. Please try again."
                    .to_string(),
                status_code: 503,
            });
        }
    }

    let result = state
        .postgres
        .create_post(
            state.community.mock_user_id,
            &state.community.mock_user_name,
            &req.content,
            req.image_url.as_deref(),
            req.category.as_deref(),
        )
        .await;

    match result {
        Ok(post) => HttpResponse::Ok().json(CreatePostResponse {
            success: true,
            post,
        }),
        Err(e) => {
            tracing::error!("Database insertion error: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to post content".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Top liked posts of the last week
///
/// GET /api/v1/posts/trending
async fn trending_posts(state: web::Data<AppState>) -> impl Responder {
    match state.postgres.trending_posts().await {
        Ok(posts) => HttpResponse::Ok().json(TrendingResponse { posts }),
        Err(e) => {
            tracing::error!("Failed to fetch trending posts: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch trending posts".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Owner reviews for one breed, newest first
///
/// GET /api/v1/reviews/{breed}
async fn breed_reviews(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let breed = path.into_inner();
    let key = CacheKey::Reviews(&breed);

    match state.cache.get::<Vec<Review>>(&key).await {
        Ok(Some(reviews)) => return HttpResponse::Ok().json(ReviewsResponse { reviews }),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache read failed for reviews of {}: {}", breed, e),
    }

    match state.postgres.reviews_for_breed(&breed).await {
        Ok(reviews) => {
            if let Err(e) = state.cache.set(&key, &reviews).await {
                tracing::warn!("Cache write failed for reviews of {}: {}", breed, e);
            }
            HttpResponse::Ok().json(ReviewsResponse { reviews })
        }
        Err(e) => {
            tracing::error!("Failed to fetch reviews for {}: {}", breed, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch reviews".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Generate name suggestions
///
/// POST /api/v1/names/generate
async fn generate_names(
    state: web::Data<AppState>,
    req: web::Json<GenerateNamesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate_names request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let names = match state
        .deepseek
        .generate_names(
            req.pet_type,
            req.gender,
            req.style.as_deref(),
            req.description.as_deref(),
        )
        .await
    {
        Ok(names) => names,
        Err(e) => {
            tracing::error!("Name generation failed: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "generation_failed".to_string(),
                message: "Could not generate names right now. Please try again.".to_string(),
                status_code: 502,
            });
        }
    };

    // history is best-effort, the generated names still go out
    if let Err(e) = state
        .postgres
        .record_generated_names(req.pet_type.as_str(), req.style.as_deref(), &names)
        .await
    {
        tracing::warn!("Failed to record generated names: {}", e);
    }

    HttpResponse::Ok().json(GenerateNamesResponse { names })
}

/// Record the result page's rating for a recommendation
///
/// POST /api/v1/feedback
async fn record_feedback(
    state: web::Data<AppState>,
    req: web::Json<FeedbackRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for feedback request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.postgres.record_feedback(&req.breed_id, req.score).await {
        Ok(()) => HttpResponse::Ok().json(FeedbackResponse { success: true }),
        Err(e) => {
            tracing::error!("Failed to record feedback: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record feedback".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
