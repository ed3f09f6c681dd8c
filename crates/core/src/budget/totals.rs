//! Additive budget amounts and the roll-up reducer.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::BudgetLineItem;

/// The additive amounts carried by every budget row.
///
/// A group row's totals are always the sum of its children's totals.
/// Identity fields and unit fields are not part of this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetTotals {
    /// Original budget amount.
    pub original_budget_amount: Decimal,
    /// Net budget modifications.
    pub budget_modifications: Decimal,
    /// Approved change orders.
    #[serde(rename = "approvedCOs")]
    pub approved_cos: Decimal,
    /// Revised budget.
    pub revised_budget: Decimal,
    /// Job-to-date cost detail.
    pub job_to_date_cost_detail: Decimal,
    /// Direct costs.
    pub direct_costs: Decimal,
    /// Pending budget changes.
    pub pending_changes: Decimal,
    /// Projected budget.
    pub projected_budget: Decimal,
    /// Committed costs.
    pub committed_costs: Decimal,
    /// Pending cost changes.
    pub pending_cost_changes: Decimal,
    /// Projected costs.
    pub projected_costs: Decimal,
    /// Forecast to complete.
    pub forecast_to_complete: Decimal,
    /// Estimated cost at completion.
    pub estimated_cost_at_completion: Decimal,
    /// Projected over (negative) or under (positive) budget.
    pub projected_over_under: Decimal,
}

impl BudgetTotals {
    /// All-zero totals.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns true if every amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Field-wise sum, or `None` if any field overflows.
    #[must_use]
    pub fn checked_add(&self, rhs: &BudgetTotals) -> Option<Self> {
        Some(Self {
            original_budget_amount: self.original_budget_amount.checked_add(rhs.original_budget_amount)?,
            budget_modifications: self.budget_modifications.checked_add(rhs.budget_modifications)?,
            approved_cos: self.approved_cos.checked_add(rhs.approved_cos)?,
            revised_budget: self.revised_budget.checked_add(rhs.revised_budget)?,
            job_to_date_cost_detail: self.job_to_date_cost_detail.checked_add(rhs.job_to_date_cost_detail)?,
            direct_costs: self.direct_costs.checked_add(rhs.direct_costs)?,
            pending_changes: self.pending_changes.checked_add(rhs.pending_changes)?,
            projected_budget: self.projected_budget.checked_add(rhs.projected_budget)?,
            committed_costs: self.committed_costs.checked_add(rhs.committed_costs)?,
            pending_cost_changes: self.pending_cost_changes.checked_add(rhs.pending_cost_changes)?,
            projected_costs: self.projected_costs.checked_add(rhs.projected_costs)?,
            forecast_to_complete: self.forecast_to_complete.checked_add(rhs.forecast_to_complete)?,
            estimated_cost_at_completion: self.estimated_cost_at_completion.checked_add(rhs.estimated_cost_at_completion)?,
            projected_over_under: self.projected_over_under.checked_add(rhs.projected_over_under)?,
        })
    }

    /// Field-wise absolute values.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            original_budget_amount: self.original_budget_amount.abs(),
            budget_modifications: self.budget_modifications.abs(),
            approved_cos: self.approved_cos.abs(),
            revised_budget: self.revised_budget.abs(),
            job_to_date_cost_detail: self.job_to_date_cost_detail.abs(),
            direct_costs: self.direct_costs.abs(),
            pending_changes: self.pending_changes.abs(),
            projected_budget: self.projected_budget.abs(),
            committed_costs: self.committed_costs.abs(),
            pending_cost_changes: self.pending_cost_changes.abs(),
            projected_costs: self.projected_costs.abs(),
            forecast_to_complete: self.forecast_to_complete.abs(),
            estimated_cost_at_completion: self.estimated_cost_at_completion.abs(),
            projected_over_under: self.projected_over_under.abs(),
        }
    }
}

/// Panics if a field overflows `Decimal`. Rows accepted by
/// [`magnitude_total`] never do.
impl AddAssign<&BudgetTotals> for BudgetTotals {
    fn add_assign(&mut self, rhs: &BudgetTotals) {
        self.original_budget_amount += rhs.original_budget_amount;
        self.budget_modifications += rhs.budget_modifications;
        self.approved_cos += rhs.approved_cos;
        self.revised_budget += rhs.revised_budget;
        self.job_to_date_cost_detail += rhs.job_to_date_cost_detail;
        self.direct_costs += rhs.direct_costs;
        self.pending_changes += rhs.pending_changes;
        self.projected_budget += rhs.projected_budget;
        self.committed_costs += rhs.committed_costs;
        self.pending_cost_changes += rhs.pending_cost_changes;
        self.projected_costs += rhs.projected_costs;
        self.forecast_to_complete += rhs.forecast_to_complete;
        self.estimated_cost_at_completion += rhs.estimated_cost_at_completion;
        self.projected_over_under += rhs.projected_over_under;
    }
}

impl AddAssign for BudgetTotals {
    fn add_assign(&mut self, rhs: BudgetTotals) {
        *self += &rhs;
    }
}

impl Add for BudgetTotals {
    type Output = BudgetTotals;

    fn add(mut self, rhs: BudgetTotals) -> Self::Output {
        self += &rhs;
        self
    }
}

impl<'a> Sum<&'a BudgetTotals> for BudgetTotals {
    fn sum<I: Iterator<Item = &'a BudgetTotals>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, totals| {
            acc += totals;
            acc
        })
    }
}

impl Sum for BudgetTotals {
    fn sum<I: Iterator<Item = BudgetTotals>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, totals| acc + totals)
    }
}

/// Folds the additive amounts of `items` into one set of totals.
///
/// Plain decimal addition: the result does not depend on input order and
/// no rounding is applied. An empty slice yields all-zero totals.
#[must_use]
pub fn aggregate_totals(items: &[BudgetLineItem]) -> BudgetTotals {
    items.iter().map(|item| &item.totals).sum()
}

/// Sums the absolute amounts of every leaf under `items`.
///
/// Returns `None` if that sum overflows. When it is `Some`, no partial sum
/// of these leaves can overflow, whatever the grouping or order.
#[must_use]
pub fn magnitude_total(items: &[BudgetLineItem]) -> Option<BudgetTotals> {
    collect_leaves(items)
        .into_iter()
        .try_fold(BudgetTotals::default(), |acc, leaf| acc.checked_add(&leaf.totals.abs()))
}

/// Collects every leaf row under `items`, descending through group rows.
#[must_use]
pub fn collect_leaves(items: &[BudgetLineItem]) -> Vec<&BudgetLineItem> {
    let mut leaves = Vec::new();
    push_leaves(items, &mut leaves);
    leaves
}

fn push_leaves<'a>(items: &'a [BudgetLineItem], out: &mut Vec<&'a BudgetLineItem>) {
    for item in items {
        if item.is_group() {
            push_leaves(&item.children, out);
        } else {
            out.push(item);
        }
    }
}

/// Grand totals over all leaf rows of a (possibly grouped) tree.
///
/// Equal to [`aggregate_totals`] over the original flat list, whatever
/// grouping produced the tree.
#[must_use]
pub fn grand_total(items: &[BudgetLineItem]) -> BudgetTotals {
    collect_leaves(items)
        .into_iter()
        .map(|leaf| &leaf.totals)
        .sum()
}
