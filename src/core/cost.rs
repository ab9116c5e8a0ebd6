//! Cost model.
//!
//! The cost table is reference data generated offline (a chat-completion
//! step writes the JSON asset) and committed to the repository. It is parsed
//! once into a process-wide immutable table; the breakdown itself is a pure
//! reduction over one cell.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::models::{CostBreakdown, CostCell, CostTier, PetSize};

/// The full (size x tier) table. Fully populated by construction; validated
/// once at load so per-request lookups cannot miss.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CostTable(HashMap<PetSize, HashMap<CostTier, CostCell>>);

impl CostTable {
    fn cell(&self, size: PetSize, tier: CostTier) -> &CostCell {
        // presence of every cell is checked in cost_table()
        &self.0[&size][&tier]
    }
}

/// The cost table, parsed from the committed asset on first access.
pub fn cost_table() -> &'static CostTable {
    static TABLE: OnceLock<CostTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let table: CostTable = serde_json::from_str(include_str!("../../assets/cost_data.json"))
            .expect("cost data asset is malformed");

        for size in PetSize::ALL {
            for tier in CostTier::ALL {
                let cell = table
                    .0
                    .get(&size)
                    .and_then(|tiers| tiers.get(&tier))
                    .unwrap_or_else(|| {
                        panic!(
                            "cost data asset is missing the ({}, {}) cell",
                            size.as_str(),
                            tier.as_str()
                        )
                    });
                if cell.one_time.is_empty() || cell.monthly.is_empty() {
                    panic!(
                        "cost data asset has an empty ({}, {}) cell",
                        size.as_str(),
                        tier.as_str()
                    );
                }
            }
        }

        table
    })
}

/// Reduce one cell to its totals.
pub fn breakdown_from_cell(cell: &CostCell) -> CostBreakdown {
    let one_time_total: f64 = cell.one_time.iter().map(|item| item.amount).sum();
    let monthly_total: f64 = cell.monthly.iter().map(|item| item.amount).sum();
    let annual_total = monthly_total * 12.0;
    let first_year_total = one_time_total + annual_total;

    CostBreakdown {
        one_time: cell.one_time.clone(),
        monthly: cell.monthly.clone(),
        one_time_total,
        monthly_total,
        annual_total,
        first_year_total,
    }
}

/// Pure, total cost computation for a (size, tier) pair.
pub fn compute_breakdown(size: PetSize, tier: CostTier) -> CostBreakdown {
    breakdown_from_cell(cost_table().cell(size, tier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostItem;

    #[test]
    fn test_table_has_every_cell() {
        let table = cost_table();
        for size in PetSize::ALL {
            for tier in CostTier::ALL {
                let cell = table.cell(size, tier);
                assert!(!cell.one_time.is_empty());
                assert!(!cell.monthly.is_empty());
            }
        }
    }

    #[test]
    fn test_first_year_identity_holds_everywhere() {
        for size in PetSize::ALL {
            for tier in CostTier::ALL {
                let b = compute_breakdown(size, tier);
                assert!(
                    (b.first_year_total - (b.one_time_total + b.monthly_total * 12.0)).abs()
                        < 1e-9,
                    "identity broken for ({}, {})",
                    size.as_str(),
                    tier.as_str()
                );
                assert!((b.annual_total - b.monthly_total * 12.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_breakdown_is_idempotent() {
        let a = compute_breakdown(PetSize::Cat, CostTier::Budget);
        let b = compute_breakdown(PetSize::Cat, CostTier::Budget);
        assert_eq!(a, b);
    }

    #[test]
    fn test_totals_sum_the_cell_exactly() {
        let cell = cost_table().cell(PetSize::Cat, CostTier::Budget);
        let b = compute_breakdown(PetSize::Cat, CostTier::Budget);

        let one_time: f64 = cell.one_time.iter().map(|i| i.amount).sum();
        let monthly: f64 = cell.monthly.iter().map(|i| i.amount).sum();
        assert_eq!(b.one_time_total, one_time);
        assert_eq!(b.monthly_total, monthly);
    }

    #[test]
    fn test_five_dollar_sensitivity() {
        let mut cell = cost_table().cell(PetSize::Cat, CostTier::Budget).clone();
        let base = breakdown_from_cell(&cell);

        cell.one_time[0].amount += 5.0;
        let bumped = breakdown_from_cell(&cell);
        assert!((bumped.one_time_total - base.one_time_total - 5.0).abs() < 1e-9);
        assert!((bumped.first_year_total - base.first_year_total - 5.0).abs() < 1e-9);

        cell.one_time[0].amount -= 5.0;
        cell.monthly[0].amount += 5.0;
        let bumped = breakdown_from_cell(&cell);
        assert!((bumped.monthly_total - base.monthly_total - 5.0).abs() < 1e-9);
        // a monthly line item compounds twelve-fold over the first year
        assert!((bumped.first_year_total - base.first_year_total - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_from_synthetic_cell() {
        let cell = CostCell {
            one_time: vec![CostItem {
                id: "carrier".to_string(),
                label: "Travel Carrier".to_string(),
                amount: 40.0,
                amazon_keyword: "pet travel carrier".to_string(),
            }],
            monthly: vec![CostItem {
                id: "food".to_string(),
                label: "Dry Food".to_string(),
                amount: 25.0,
                amazon_keyword: "dry pet food".to_string(),
            }],
        };

        let b = breakdown_from_cell(&cell);
        assert_eq!(b.one_time_total, 40.0);
        assert_eq!(b.monthly_total, 25.0);
        assert_eq!(b.annual_total, 300.0);
        assert_eq!(b.first_year_total, 340.0);
    }
}
