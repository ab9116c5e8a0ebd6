use serde::{Deserialize, Serialize};

use crate::models::domain::{GeneratedName, Post, Review, TrendingPost};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for the community feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
    pub total: usize,
}

/// Response for the trending widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub posts: Vec<TrendingPost>,
}

/// Response after publishing a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub success: bool,
    pub post: Post,
}

/// Response for per-breed reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
}

/// Response from the name generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateNamesResponse {
    pub names: Vec<GeneratedName>,
}

/// Response after recording match feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub success: bool,
}
