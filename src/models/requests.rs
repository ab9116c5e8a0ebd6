use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CostTier, PetSize, UserConstraints};

/// Request to find the best breed for a quiz outcome.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchRequest {
    #[validate(length(min = 1))]
    pub category: String,
    pub constraints: UserConstraints,
}

/// Request for a cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRequest {
    pub size: PetSize,
    pub tier: CostTier,
}

/// Request to publish a community post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
    #[validate(length(max = 500))]
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Query parameters for the community feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Pet type accepted by the name generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePetType {
    Dog,
    Cat,
}

impl NamePetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamePetType::Dog => "dog",
            NamePetType::Cat => "cat",
        }
    }
}

/// Gender accepted by the name generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameGender {
    Boy,
    Girl,
    Unisex,
}

impl NameGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameGender::Boy => "boy",
            NameGender::Girl => "girl",
            NameGender::Unisex => "unisex",
        }
    }
}

/// Request to generate name suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateNamesRequest {
    #[serde(rename = "petType")]
    pub pet_type: NamePetType,
    pub gender: NameGender,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub style: Option<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to record match feedback from the result page.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "breedId")]
    pub breed_id: String,
    #[validate(range(min = 1, max = 5))]
    pub score: i16,
}
