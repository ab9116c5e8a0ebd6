//! Static fallback catalog.
//!
//! A small in-memory breed list covering the categories the hosted store
//! does not seed (small mammals, reptiles, birds, fish), plus a handful of
//! dogs and cats so store-backed categories still resolve when the store is
//! empty or unreachable. Built once at startup and immutable afterwards.

use std::sync::OnceLock;

use crate::core::filters::{catalog_candidates, why_it_fits};
use crate::models::{
    BreedNeeds, BreedRecord, BudgetTier, MatchResult, SpaceLevel, TimeLevel, UserConstraints,
};

fn breed(
    id: &str,
    name: &str,
    category: &str,
    description: &str,
    space: SpaceLevel,
    budget: BudgetTier,
    time: TimeLevel,
) -> BreedRecord {
    BreedRecord {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        image_url: None,
        needs: BreedNeeds {
            space,
            budget,
            time,
        },
    }
}

/// The catalog, in a process-wide immutable cell. The first entry doubles as
/// the absolute fallback returned when a category has no candidates at all.
pub fn catalog() -> &'static [BreedRecord] {
    static CATALOG: OnceLock<Vec<BreedRecord>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        use BudgetTier::*;
        use SpaceLevel::*;

        vec![
            breed(
                "dog_golden",
                "Golden Retriever",
                "Dog",
                "The ultimate family companion. Friendly, energetic, and loves everyone.",
                House,
                High,
                TimeLevel::High,
            ),
            breed(
                "dog_frenchie",
                "French Bulldog",
                "Dog",
                "A charming couch potato who loves attention but needs minimal exercise.",
                Apartment,
                High,
                TimeLevel::Medium,
            ),
            breed(
                "dog_greyhound",
                "Greyhound",
                "Dog",
                "Surprisingly lazy! A 45mph couch potato that fits well in apartments.",
                Apartment,
                Medium,
                TimeLevel::Medium,
            ),
            breed(
                "dog_chihuahua",
                "Chihuahua",
                "Dog",
                "Tiny dog, big personality. Perfect for small living spaces.",
                Tiny,
                Low,
                TimeLevel::Medium,
            ),
            breed(
                "cat_siamese",
                "Siamese Cat",
                "Cat",
                "Vocal, social, and intelligent. They want to be involved in everything you do.",
                Apartment,
                Medium,
                TimeLevel::Medium,
            ),
            breed(
                "cat_ragdoll",
                "Ragdoll",
                "Cat",
                "A large, floppy, affectionate cat that goes limp when held.",
                Apartment,
                Medium,
                TimeLevel::Medium,
            ),
            breed(
                "cat_bsh",
                "British Shorthair",
                "Cat",
                "The teddy bear of cats. Calm, independent, and low maintenance.",
                Apartment,
                Medium,
                TimeLevel::Low,
            ),
            breed(
                "small_hamster",
                "Syrian Hamster",
                "Hamster",
                "Solitary, nocturnal, and easy to care for. Great starter pet.",
                Tiny,
                Low,
                TimeLevel::Low,
            ),
            breed(
                "small_ferret",
                "Ferret",
                "Ferret",
                "Playful chaos noodles. High energy and super inquisitive.",
                Apartment,
                Medium,
                TimeLevel::High,
            ),
            breed(
                "small_rabbit",
                "Holland Lop Rabbit",
                "Rabbit",
                "Gentle and affectionate, but needs space to hop and a chew-proofed home.",
                Apartment,
                Medium,
                TimeLevel::Medium,
            ),
            breed(
                "rep_cornsnake",
                "Corn Snake",
                "Snake",
                "Docile, colorful, and easy to handle. The perfect beginner snake.",
                Tiny,
                Low,
                TimeLevel::Low,
            ),
            breed(
                "rep_bearded",
                "Bearded Dragon",
                "Lizard",
                "The dog of the reptile world. Friendly, chill, and loves bugs.",
                Apartment,
                Medium,
                TimeLevel::Medium,
            ),
            breed(
                "bird_budgie",
                "Budgerigar (Budgie)",
                "Bird",
                "Chatty, colorful, and smart. Can learn to talk with patience.",
                Apartment,
                Low,
                TimeLevel::Medium,
            ),
            breed(
                "fish_goldfish",
                "Fancy Goldfish",
                "Goldfish",
                "Beautiful swimmers, but they need bigger tanks than you think!",
                Apartment,
                Medium,
                TimeLevel::Low,
            ),
            breed(
                "spider_tarantula",
                "Mexican Red Knee Tarantula",
                "Spider",
                "Slow moving, docile, and fascinating to watch. Very low maintenance.",
                Tiny,
                Low,
                TimeLevel::Low,
            ),
        ]
    })
}

/// Absolute fallback when a category has zero catalog candidates. Not a
/// silent failure: the result is flagged as a compromise and logged by the
/// matcher.
pub fn default_breed() -> &'static BreedRecord {
    &catalog()[0]
}

/// Resolve a match from the static catalog.
///
/// Among the category's candidates, breeds whose requirements the user
/// covers on every axis form the exact subset; its first member wins
/// outright. Otherwise the least-demanding candidate is returned as a
/// compromise, and an empty candidate list falls back to [`default_breed`].
pub fn best_catalog_match(category: &str, constraints: &UserConstraints) -> MatchResult {
    let mut candidates = catalog_candidates(catalog(), category);

    if candidates.is_empty() {
        tracing::warn!(category, "no catalog candidates, using absolute fallback");
        return MatchResult {
            breed: default_breed().clone(),
            is_compromise: true,
            why_it_fits: None,
        };
    }

    if let Some(exact) = candidates
        .iter()
        .find(|breed| constraints.covers(&breed.needs))
    {
        return MatchResult {
            breed: (*exact).clone(),
            is_compromise: false,
            why_it_fits: Some(why_it_fits(&exact.name, constraints)),
        };
    }

    // no exact fit: hand over the easiest keeper in the category
    candidates.sort_by_key(|breed| breed.needs.demand_rank());

    MatchResult {
        breed: candidates[0].clone(),
        is_compromise: true,
        why_it_fits: None,
    }
}

/// Catalog lookup by id. The catalog id namespace is disjoint from the
/// store's, so a hit here never shadows a store row.
pub fn catalog_breed_by_id(id: &str) -> Option<&'static BreedRecord> {
    catalog().iter().find(|breed| breed.id == id)
}
