//! Quick filters applied to flat budget lines before grouping.

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::BudgetLineItem;
use super::variance::VarianceStatus;

/// Preset row filter on the budget table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuickFilter {
    /// Every line.
    #[default]
    All,
    /// Lines projected to finish over budget.
    OverBudget,
    /// Lines projected to finish under budget.
    UnderBudget,
    /// Lines without any recorded, committed or pending cost.
    NoActivity,
}

impl QuickFilter {
    /// Returns the wire name of this filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::OverBudget => "over-budget",
            Self::UnderBudget => "under-budget",
            Self::NoActivity => "no-activity",
        }
    }

    /// Parses a wire name. Unrecognized names mean no filtering.
    #[must_use]
    pub fn parse(filter: &str) -> Self {
        match filter {
            "all" => Self::All,
            "over-budget" => Self::OverBudget,
            "under-budget" => Self::UnderBudget,
            "no-activity" => Self::NoActivity,
            other => {
                debug!(filter = other, "unknown quick filter, keeping all lines");
                Self::All
            }
        }
    }

    /// Returns true if `item` passes this filter.
    #[must_use]
    pub fn matches(self, item: &BudgetLineItem) -> bool {
        match self {
            Self::All => true,
            Self::OverBudget => item.variance_status() == VarianceStatus::Unfavorable,
            Self::UnderBudget => item.variance_status() == VarianceStatus::Favorable,
            Self::NoActivity => {
                let totals = &item.totals;
                totals.job_to_date_cost_detail.is_zero()
                    && totals.direct_costs.is_zero()
                    && totals.committed_costs.is_zero()
                    && totals.pending_cost_changes.is_zero()
            }
        }
    }
}

impl std::fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for QuickFilter {
    fn from(filter: String) -> Self {
        Self::parse(&filter)
    }
}

impl From<QuickFilter> for String {
    fn from(filter: QuickFilter) -> Self {
        filter.as_str().to_string()
    }
}

/// Keeps the lines that pass `filter`, in their original order.
#[must_use]
pub fn apply_quick_filter(items: &[BudgetLineItem], filter: QuickFilter) -> Vec<BudgetLineItem> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::totals::BudgetTotals;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn items() -> Vec<BudgetLineItem> {
        vec![
            BudgetLineItem::leaf(
                "over",
                "01-100",
                "Labor",
                BudgetTotals {
                    revised_budget: dec!(1000),
                    job_to_date_cost_detail: dec!(1200),
                    estimated_cost_at_completion: dec!(1200),
                    projected_over_under: dec!(-200),
                    ..BudgetTotals::default()
                },
            ),
            BudgetLineItem::leaf(
                "under",
                "01-200",
                "Material",
                BudgetTotals {
                    revised_budget: dec!(500),
                    committed_costs: dec!(100),
                    projected_over_under: dec!(400),
                    ..BudgetTotals::default()
                },
            ),
            BudgetLineItem::leaf(
                "idle",
                "03-100",
                "Concrete",
                BudgetTotals {
                    original_budget_amount: dec!(2000),
                    revised_budget: dec!(2000),
                    ..BudgetTotals::default()
                },
            ),
        ]
    }

    #[rstest]
    #[case(QuickFilter::All, &["over", "under", "idle"])]
    #[case(QuickFilter::OverBudget, &["over"])]
    #[case(QuickFilter::UnderBudget, &["under"])]
    #[case(QuickFilter::NoActivity, &["idle"])]
    fn test_apply_quick_filter(#[case] filter: QuickFilter, #[case] expected: &[&str]) {
        let filtered = apply_quick_filter(&items(), filter);
        let ids: Vec<&str> = filtered.iter().map(|i| i.id.as_str()).collect();

        assert_eq!(ids, expected);
    }

    #[rstest]
    #[case("all", QuickFilter::All)]
    #[case("over-budget", QuickFilter::OverBudget)]
    #[case("under-budget", QuickFilter::UnderBudget)]
    #[case("no-activity", QuickFilter::NoActivity)]
    #[case("overbudget", QuickFilter::All)]
    fn test_parse_filter(#[case] raw: &str, #[case] expected: QuickFilter) {
        assert_eq!(QuickFilter::parse(raw), expected);
    }

    #[test]
    fn test_wire_names_round_trip() {
        for filter in [
            QuickFilter::All,
            QuickFilter::OverBudget,
            QuickFilter::UnderBudget,
            QuickFilter::NoActivity,
        ] {
            assert_eq!(QuickFilter::parse(filter.as_str()), filter);
        }
    }
}
