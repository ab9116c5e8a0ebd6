// Unit tests for SoulmatePaw Algo

use soulmatepaw_algo::core::{
    best_catalog_match, breakdown_from_cell, catalog, catalog_candidates, compute_breakdown,
    store_attempts, store_category,
};
use soulmatepaw_algo::models::domain::columns;
use soulmatepaw_algo::models::{
    BudgetTier, CostTier, PetSize, SpaceLevel, StoreFilter, TimeLevel, UserConstraints,
};

fn constraints(space: SpaceLevel, budget: BudgetTier, time: TimeLevel) -> UserConstraints {
    UserConstraints {
        space,
        budget,
        time,
    }
}

#[test]
fn test_ordinal_scales_are_totally_ordered() {
    assert!(SpaceLevel::Tiny < SpaceLevel::Apartment && SpaceLevel::Apartment < SpaceLevel::House);
    assert!(BudgetTier::Low < BudgetTier::Medium && BudgetTier::Medium < BudgetTier::High);
    assert!(TimeLevel::Low < TimeLevel::Medium && TimeLevel::Medium < TimeLevel::High);
}

#[test]
fn test_constraints_cover_is_per_axis() {
    let user = constraints(SpaceLevel::House, BudgetTier::Low, TimeLevel::High);

    let cheap_but_big = catalog()
        .iter()
        .find(|b| b.id == "dog_golden")
        .expect("catalog has the golden retriever");

    // space and time are covered, budget is not
    assert!(!user.covers(&cheap_but_big.needs));
}

#[test]
fn test_store_cascade_is_ordered_by_strictness() {
    let attempts = store_attempts(
        "Dog",
        &constraints(SpaceLevel::Apartment, BudgetTier::Low, TimeLevel::Low),
    );

    let lengths: Vec<usize> = attempts.iter().map(|a| a.filters.len()).collect();
    // each relaxation strictly drops predicates
    assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(*lengths.last().unwrap(), 1);

    // only the first attempt is exact
    assert!(!attempts[0].compromise);
    assert!(attempts[1..].iter().all(|a| a.compromise));
}

#[test]
fn test_cat_cascade_carries_tag_exclusions_only_while_time_filtered() {
    let attempts = store_attempts(
        "Cat",
        &constraints(SpaceLevel::Tiny, BudgetTier::Low, TimeLevel::Low),
    );

    let has_tag_filter = |filters: &[StoreFilter]| {
        filters
            .iter()
            .any(|f| matches!(f, StoreFilter::NotContains(col, _) if *col == columns::TAGS))
    };

    assert!(has_tag_filter(&attempts[0].filters));
    assert!(has_tag_filter(&attempts[1].filters));
    assert!(!has_tag_filter(&attempts[2].filters));
    assert!(!has_tag_filter(&attempts[3].filters));
}

#[test]
fn test_store_category_covers_only_dogs_and_cats() {
    assert_eq!(store_category("Dog"), Some("Dog"));
    assert_eq!(store_category("cat"), Some("Cat"));
    for other in ["Bird", "Hamster", "Snake", "Goldfish", ""] {
        assert_eq!(store_category(other), None);
    }
}

#[test]
fn test_catalog_candidates_match_by_category_or_name() {
    let by_category = catalog_candidates(catalog(), "Lizard");
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].id, "rep_bearded");

    let by_name = catalog_candidates(catalog(), "Budgie");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, "bird_budgie");

    assert!(catalog_candidates(catalog(), "Unicorn").is_empty());
}

#[test]
fn test_every_catalog_category_always_resolves() {
    // the matcher must never come back empty-handed for any category that
    // has at least one catalog candidate
    let worst_case = constraints(SpaceLevel::Tiny, BudgetTier::Low, TimeLevel::Low);
    for breed in catalog() {
        let result = best_catalog_match(&breed.category, &worst_case);
        assert!(
            !result.breed.id.is_empty(),
            "category {} resolved to nothing",
            breed.category
        );
    }
}

#[test]
fn test_exact_catalog_match_has_explanation() {
    let result = best_catalog_match(
        "Snake",
        &constraints(SpaceLevel::Apartment, BudgetTier::Medium, TimeLevel::Medium),
    );

    assert!(!result.is_compromise);
    let why = result.why_it_fits.expect("exact matches carry an explanation");
    assert!(why.contains(&result.breed.name));
}

#[test]
fn test_catalog_compromise_prefers_least_demanding() {
    // ferrets are the only Ferret candidates, so ask for a category with
    // several options: a tiny/low/low user cannot cover any cat
    let result = best_catalog_match(
        "Cat",
        &constraints(SpaceLevel::Tiny, BudgetTier::Low, TimeLevel::Low),
    );

    assert!(result.is_compromise);
    // the British Shorthair is the only catalog cat asking for low time
    assert_eq!(result.breed.id, "cat_bsh");
}

#[test]
fn test_cost_first_year_identity_for_all_cells() {
    for size in PetSize::ALL {
        for tier in CostTier::ALL {
            let b = compute_breakdown(size, tier);
            assert!((b.annual_total - b.monthly_total * 12.0).abs() < 1e-9);
            assert!((b.first_year_total - (b.one_time_total + b.annual_total)).abs() < 1e-9);
            assert!(b.one_time_total > 0.0);
            assert!(b.monthly_total > 0.0);
        }
    }
}

#[test]
fn test_cost_breakdown_is_pure() {
    let a = compute_breakdown(PetSize::LargeDog, CostTier::Premium);
    let b = compute_breakdown(PetSize::LargeDog, CostTier::Premium);
    assert_eq!(a, b);
}

#[test]
fn test_cost_tiers_are_monotonic_for_monthly_food_budgets() {
    // sanity on the asset: premium should not be cheaper than budget
    for size in PetSize::ALL {
        let budget = compute_breakdown(size, CostTier::Budget);
        let premium = compute_breakdown(size, CostTier::Premium);
        assert!(premium.monthly_total > budget.monthly_total);
    }
}

#[test]
fn test_five_dollar_shift_moves_totals_exactly() {
    let base = compute_breakdown(PetSize::Cat, CostTier::Budget);

    let mut cell = soulmatepaw_algo::models::CostCell {
        one_time: base.one_time.clone(),
        monthly: base.monthly.clone(),
    };

    cell.monthly[0].amount += 5.0;
    let shifted = breakdown_from_cell(&cell);

    assert!((shifted.monthly_total - base.monthly_total - 5.0).abs() < 1e-9);
    assert!((shifted.first_year_total - base.first_year_total - 60.0).abs() < 1e-9);
}
