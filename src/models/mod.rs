// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BreedNeeds, BreedRecord, BudgetTier, CostBreakdown, CostCell, CostItem, CostTier,
    GeneratedName, MatchResult, MinSpace, PetSize, Post, PostSort, Review, SpaceLevel,
    StoreBreedRow, StoreFilter, TimeLevel, TrendingPost, UserConstraints,
};
pub use requests::{
    CostRequest, CreatePostRequest, FeedbackRequest, FindMatchRequest, GenerateNamesRequest,
    ListPostsQuery, NameGender, NamePetType,
};
pub use responses::{
    CreatePostResponse, ErrorResponse, FeedbackResponse, GenerateNamesResponse, HealthResponse,
    PostsResponse, ReviewsResponse, TrendingResponse,
};
