use crate::models::domain::columns;
use crate::models::{BreedRecord, SpaceLevel, StoreFilter, TimeLevel, UserConstraints};

/// One attempt in the store-query cascade: a label for logs, the conjunction
/// of predicates to run, and whether a hit counts as a compromise.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    pub label: &'static str,
    pub filters: Vec<StoreFilter>,
    pub compromise: bool,
}

/// Categories served by the hosted breed store, canonicalized to the casing
/// the table uses. Everything else goes straight to the static catalog.
pub fn store_category(category: &str) -> Option<&'static str> {
    if category.eq_ignore_ascii_case("dog") {
        Some("Dog")
    } else if category.eq_ignore_ascii_case("cat") {
        Some("Cat")
    } else {
        None
    }
}

/// Build the ordered cascade of query attempts for a store-backed category.
///
/// The attempts are strictly ordered by decreasing strictness:
/// exact, relaxed (budget dropped), space-only, and finally any row of the
/// category at all. Only the first attempt yields a non-compromise result.
pub fn store_attempts(category: &'static str, constraints: &UserConstraints) -> Vec<QueryPlan> {
    let is_cat = category == "Cat";

    let space = space_filters(is_cat, constraints);
    let time = time_filters(is_cat, constraints);
    let budget = budget_filters(constraints);

    let exact: Vec<StoreFilter> = category_filter(category)
        .into_iter()
        .chain(space.iter().cloned())
        .chain(time.iter().cloned())
        .chain(budget)
        .collect();

    let relaxed: Vec<StoreFilter> = category_filter(category)
        .into_iter()
        .chain(space.iter().cloned())
        .chain(time)
        .collect();

    let space_only: Vec<StoreFilter> =
        category_filter(category).into_iter().chain(space).collect();

    let any = category_filter(category);

    vec![
        QueryPlan {
            label: "exact",
            filters: exact,
            compromise: false,
        },
        QueryPlan {
            label: "relaxed",
            filters: relaxed,
            compromise: true,
        },
        QueryPlan {
            label: "space-only",
            filters: space_only,
            compromise: true,
        },
        QueryPlan {
            label: "any-of-category",
            filters: any,
            compromise: true,
        },
    ]
}

fn category_filter(category: &'static str) -> Vec<StoreFilter> {
    vec![StoreFilter::Eq(columns::CATEGORY, category.to_string())]
}

/// Translate the space constraint. Users without a house only match breeds
/// content with small or medium space; tiny-space cat owners additionally
/// lose the medium-space breeds (Maine Coon territory).
fn space_filters(is_cat: bool, constraints: &UserConstraints) -> Vec<StoreFilter> {
    let mut filters = Vec::new();

    if matches!(constraints.space, SpaceLevel::Tiny | SpaceLevel::Apartment) {
        filters.push(StoreFilter::In(
            columns::MIN_SPACE,
            vec!["small".to_string(), "medium".to_string()],
        ));
    }

    if is_cat && constraints.space == SpaceLevel::Tiny {
        filters.push(StoreFilter::Neq(columns::MIN_SPACE, "medium".to_string()));
    }

    filters
}

/// Translate the time constraint onto energy level. For cats, low time also
/// rules out attention-heavy breeds by tag.
fn time_filters(is_cat: bool, constraints: &UserConstraints) -> Vec<StoreFilter> {
    let mut filters = Vec::new();

    match constraints.time {
        TimeLevel::Low => filters.push(StoreFilter::Eq(columns::ENERGY_LEVEL, "low".to_string())),
        TimeLevel::Medium => filters.push(StoreFilter::In(
            columns::ENERGY_LEVEL,
            vec!["low".to_string(), "medium".to_string()],
        )),
        TimeLevel::High => {}
    }

    if is_cat && constraints.time == TimeLevel::Low {
        filters.push(StoreFilter::NotContains(columns::TAGS, "clingy".to_string()));
        filters.push(StoreFilter::NotContains(
            columns::TAGS,
            "high-grooming".to_string(),
        ));
    }

    filters
}

/// Only the lowest budget tier constrains the query; higher budgets accept
/// any tier.
fn budget_filters(constraints: &UserConstraints) -> Vec<StoreFilter> {
    match constraints.budget {
        crate::models::BudgetTier::Low => vec![StoreFilter::Eq(
            columns::BUDGET_TIER,
            "low".to_string(),
        )],
        _ => Vec::new(),
    }
}

/// Candidates from the static catalog: case-insensitive category match, or
/// the category appearing in the breed name (quiz outcomes like "Hamster"
/// name a subtype rather than a catalog category).
pub fn catalog_candidates<'a>(catalog: &'a [BreedRecord], category: &str) -> Vec<&'a BreedRecord> {
    let needle = category.to_lowercase();
    catalog
        .iter()
        .filter(|breed| {
            breed.category.to_lowercase() == needle || breed.name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The explanation string attached to exact matches. Compromise results get
/// no explanation; the UI supplies its own softer copy there.
pub fn why_it_fits(breed_name: &str, constraints: &UserConstraints) -> String {
    format!(
        "Since you live in a {} home and have {} time to spare, the {} is your ideal match!",
        constraints.space.as_str(),
        constraints.time.as_str(),
        breed_name
    )
}
