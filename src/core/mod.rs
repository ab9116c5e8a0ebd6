// Core algorithm exports
pub mod catalog;
pub mod cost;
pub mod filters;
pub mod matcher;

pub use catalog::{best_catalog_match, catalog, catalog_breed_by_id, default_breed};
pub use cost::{breakdown_from_cell, compute_breakdown, cost_table};
pub use filters::{catalog_candidates, store_attempts, store_category, why_it_fits, QueryPlan};
pub use matcher::{BreedStore, Matcher};
