use crate::core::catalog::{best_catalog_match, catalog_breed_by_id};
use crate::core::filters::{store_attempts, store_category, why_it_fits};
use crate::models::{BreedRecord, MatchResult, StoreBreedRow, StoreFilter, UserConstraints};

/// Read-only access to the hosted breed table.
///
/// Implementations must return rows in ascending id order so that "first
/// match" is reproducible across store backends.
#[allow(async_fn_in_trait)]
pub trait BreedStore {
    type Error: std::fmt::Display;

    /// First row satisfying the conjunction of filters, if any.
    async fn find_first(
        &self,
        filters: &[StoreFilter],
    ) -> Result<Option<StoreBreedRow>, Self::Error>;

    /// Row with the given primary key, if any.
    async fn find_by_id(&self, id: &str) -> Result<Option<StoreBreedRow>, Self::Error>;
}

/// Main matching orchestrator - maps a quiz outcome to exactly one breed.
///
/// # Cascade
/// 1. Exact store query (all constraint translations)
/// 2. Relaxed store query (budget dropped)
/// 3. Space-only store query
/// 4. Any row of the category
/// 5. Static catalog (exact subset, then least-demanding compromise)
///
/// Never fails: every path terminates in a usable breed. Store errors are
/// treated as empty results for that step and the cascade continues.
#[derive(Debug, Clone)]
pub struct Matcher<S> {
    store: S,
}

impl<S: BreedStore> Matcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Find the best available breed for a category and a set of lifestyle
    /// constraints, degrading gracefully instead of erroring.
    pub async fn find_best_match(
        &self,
        category: &str,
        constraints: &UserConstraints,
    ) -> MatchResult {
        if let Some(canonical) = store_category(category) {
            for plan in store_attempts(canonical, constraints) {
                match self.store.find_first(&plan.filters).await {
                    Ok(Some(row)) => {
                        tracing::debug!(
                            category = canonical,
                            attempt = plan.label,
                            breed = %row.breed_name,
                            "store hit"
                        );
                        let breed: BreedRecord = row.into();
                        let why =
                            (!plan.compromise).then(|| why_it_fits(&breed.name, constraints));
                        return MatchResult {
                            breed,
                            is_compromise: plan.compromise,
                            why_it_fits: why,
                        };
                    }
                    Ok(None) => {
                        tracing::debug!(
                            category = canonical,
                            attempt = plan.label,
                            "no rows, relaxing"
                        );
                    }
                    Err(e) => {
                        // a failing step counts as empty; never surfaced to the caller
                        tracing::warn!(
                            category = canonical,
                            attempt = plan.label,
                            error = %e,
                            "store query failed, continuing cascade"
                        );
                    }
                }
            }

            tracing::info!(category = canonical, "store exhausted, trying catalog");
        }

        best_catalog_match(category, constraints)
    }

    /// Direct breed lookup. The static catalog is checked first (its id
    /// namespace is disjoint from the store's), then the store by primary
    /// key. Unknown ids and store errors both come back as `None`.
    pub async fn breed_by_id(&self, id: &str) -> Option<BreedRecord> {
        if let Some(local) = catalog_breed_by_id(id) {
            return Some(local.clone());
        }

        match self.store.find_by_id(id).await {
            Ok(Some(row)) => Some(row.into()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(id, error = %e, "breed lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, MinSpace, SpaceLevel, TimeLevel};

    /// In-memory store evaluating filters with their reference semantics.
    struct MemoryStore {
        rows: Vec<StoreBreedRow>,
    }

    impl BreedStore for MemoryStore {
        type Error = std::convert::Infallible;

        async fn find_first(
            &self,
            filters: &[StoreFilter],
        ) -> Result<Option<StoreBreedRow>, Self::Error> {
            let mut hits: Vec<&StoreBreedRow> = self
                .rows
                .iter()
                .filter(|row| filters.iter().all(|f| f.matches(row)))
                .collect();
            hits.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(hits.first().map(|row| (*row).clone()))
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<StoreBreedRow>, Self::Error> {
            Ok(self.rows.iter().find(|row| row.id == id).cloned())
        }
    }

    /// Store whose every query fails, for the degraded path.
    struct FailingStore;

    impl BreedStore for FailingStore {
        type Error = String;

        async fn find_first(
            &self,
            _filters: &[StoreFilter],
        ) -> Result<Option<StoreBreedRow>, Self::Error> {
            Err("store offline".to_string())
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<StoreBreedRow>, Self::Error> {
            Err("store offline".to_string())
        }
    }

    fn row(
        id: &str,
        name: &str,
        category: &str,
        min_space: MinSpace,
        energy: TimeLevel,
        budget: BudgetTier,
        tags: &[&str],
    ) -> StoreBreedRow {
        StoreBreedRow {
            id: id.to_string(),
            breed_name: name.to_string(),
            category: category.to_string(),
            min_space,
            energy_level: energy,
            budget_tier: budget,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: format!("{} description", name),
            image_url: None,
        }
    }

    fn constraints(space: SpaceLevel, budget: BudgetTier, time: TimeLevel) -> UserConstraints {
        UserConstraints {
            space,
            budget,
            time,
        }
    }

    #[tokio::test]
    async fn test_exact_store_match_is_not_compromise() {
        let store = MemoryStore {
            rows: vec![
                row(
                    "d1",
                    "Pug",
                    "Dog",
                    MinSpace::Small,
                    TimeLevel::Low,
                    BudgetTier::Low,
                    &[],
                ),
                row(
                    "d2",
                    "Border Collie",
                    "Dog",
                    MinSpace::Large,
                    TimeLevel::High,
                    BudgetTier::Medium,
                    &[],
                ),
            ],
        };
        let matcher = Matcher::new(store);

        let result = matcher
            .find_best_match(
                "Dog",
                &constraints(SpaceLevel::Apartment, BudgetTier::Low, TimeLevel::Low),
            )
            .await;

        assert_eq!(result.breed.name, "Pug");
        assert!(!result.is_compromise);
        assert!(result.why_it_fits.is_some());
    }

    #[tokio::test]
    async fn test_budget_relaxation_marks_compromise() {
        // the only space/time fit sits in a higher budget tier
        let store = MemoryStore {
            rows: vec![row(
                "d1",
                "French Bulldog",
                "Dog",
                MinSpace::Small,
                TimeLevel::Low,
                BudgetTier::High,
                &[],
            )],
        };
        let matcher = Matcher::new(store);

        let result = matcher
            .find_best_match(
                "Dog",
                &constraints(SpaceLevel::Apartment, BudgetTier::Low, TimeLevel::Low),
            )
            .await;

        assert_eq!(result.breed.name, "French Bulldog");
        assert!(result.is_compromise);
        assert!(result.why_it_fits.is_none());
    }

    #[tokio::test]
    async fn test_store_beats_catalog_even_for_worst_fit() {
        // tiny space, low budget, low time, and the store only has a
        // high-everything breed: it still wins over the static catalog
        let store = MemoryStore {
            rows: vec![row(
                "d9",
                "Belgian Malinois",
                "Dog",
                MinSpace::Large,
                TimeLevel::High,
                BudgetTier::High,
                &[],
            )],
        };
        let matcher = Matcher::new(store);

        let result = matcher
            .find_best_match(
                "Dog",
                &constraints(SpaceLevel::Tiny, BudgetTier::Low, TimeLevel::Low),
            )
            .await;

        assert_eq!(result.breed.name, "Belgian Malinois");
        assert!(result.is_compromise);
    }

    #[tokio::test]
    async fn test_deterministic_first_match_by_id() {
        let store = MemoryStore {
            rows: vec![
                row(
                    "d2",
                    "Greyhound",
                    "Dog",
                    MinSpace::Small,
                    TimeLevel::Low,
                    BudgetTier::Low,
                    &[],
                ),
                row(
                    "d1",
                    "Pug",
                    "Dog",
                    MinSpace::Small,
                    TimeLevel::Low,
                    BudgetTier::Low,
                    &[],
                ),
            ],
        };
        let matcher = Matcher::new(store);

        let result = matcher
            .find_best_match(
                "Dog",
                &constraints(SpaceLevel::Apartment, BudgetTier::Low, TimeLevel::Low),
            )
            .await;

        // lowest id wins regardless of insertion order
        assert_eq!(result.breed.id, "d1");
    }

    #[tokio::test]
    async fn test_cat_tag_exclusions_apply() {
        let store = MemoryStore {
            rows: vec![
                row(
                    "c1",
                    "Persian",
                    "Cat",
                    MinSpace::Small,
                    TimeLevel::Low,
                    BudgetTier::Low,
                    &["high-grooming"],
                ),
                row(
                    "c2",
                    "British Shorthair",
                    "Cat",
                    MinSpace::Small,
                    TimeLevel::Low,
                    BudgetTier::Low,
                    &["independent"],
                ),
            ],
        };
        let matcher = Matcher::new(store);

        let result = matcher
            .find_best_match(
                "Cat",
                &constraints(SpaceLevel::Apartment, BudgetTier::Low, TimeLevel::Low),
            )
            .await;

        // the Persian is excluded by tag despite the lower id
        assert_eq!(result.breed.name, "British Shorthair");
        assert!(!result.is_compromise);
    }

    #[tokio::test]
    async fn test_store_failure_falls_back_to_catalog() {
        let matcher = Matcher::new(FailingStore);

        let result = matcher
            .find_best_match(
                "Dog",
                &constraints(SpaceLevel::Tiny, BudgetTier::Low, TimeLevel::Low),
            )
            .await;

        // catalog compromise: the least-demanding dog
        assert_eq!(result.breed.id, "dog_chihuahua");
        assert!(result.is_compromise);
    }

    #[tokio::test]
    async fn test_non_store_category_uses_catalog() {
        let matcher = Matcher::new(MemoryStore { rows: vec![] });

        let result = matcher
            .find_best_match(
                "Hamster",
                &constraints(SpaceLevel::Tiny, BudgetTier::Low, TimeLevel::Low),
            )
            .await;

        assert_eq!(result.breed.id, "small_hamster");
        assert!(!result.is_compromise);
    }

    #[tokio::test]
    async fn test_breed_by_id_checks_catalog_first() {
        let matcher = Matcher::new(MemoryStore { rows: vec![] });
        let breed = matcher.breed_by_id("cat_bsh").await;
        assert_eq!(breed.map(|b| b.name), Some("British Shorthair".to_string()));
    }

    #[tokio::test]
    async fn test_breed_by_id_reads_store() {
        let store = MemoryStore {
            rows: vec![row(
                "b42",
                "Shiba Inu",
                "Dog",
                MinSpace::Small,
                TimeLevel::Medium,
                BudgetTier::High,
                &[],
            )],
        };
        let matcher = Matcher::new(store);

        let breed = matcher.breed_by_id("b42").await;
        assert_eq!(breed.map(|b| b.name), Some("Shiba Inu".to_string()));
    }

    #[tokio::test]
    async fn test_breed_by_id_unknown_is_none() {
        let matcher = Matcher::new(MemoryStore { rows: vec![] });
        assert!(matcher.breed_by_id("nonexistent-id").await.is_none());
    }

    #[tokio::test]
    async fn test_breed_by_id_store_error_is_none() {
        let matcher = Matcher::new(FailingStore);
        assert!(matcher.breed_by_id("b42").await.is_none());
    }
}
