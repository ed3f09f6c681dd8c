//! Derivation of budget lines from raw project cost records.
//!
//! Cost records are accumulated per cost code and merged into every budget
//! line carrying that code:
//! - Job-to-date cost: approved direct costs of any job-to-date cost type
//! - Direct costs: approved direct costs excluding subcontractor invoices
//! - Pending cost changes: pending subcontract and purchase-order SOV items
//!   plus pending change-order lines

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::totals::BudgetTotals;
use super::types::BudgetLineItem;

/// Direct cost types counted in job-to-date cost.
pub const JTD_COST_TYPES: [&str; 4] =
    ["Invoice", "Expense", "Payroll", "Subcontractor Invoice"];

/// Direct cost types counted in direct costs.
pub const DIRECT_COST_TYPES: [&str; 3] = ["Invoice", "Expense", "Payroll"];

/// Cost type assumed when a direct cost has none.
pub const DEFAULT_COST_TYPE: &str = "Invoice";

/// Subcontract statuses whose SOV items are pending cost changes.
pub const PENDING_SUBCONTRACT_STATUSES: [&str; 1] = ["Out For Signature"];

/// Purchase-order statuses whose SOV items are pending cost changes.
pub const PENDING_PO_STATUSES: [&str; 4] =
    ["Processing", "Submitted", "Partially Received", "Received"];

/// Change-order status prefix marking a pending change order.
pub const PENDING_CHANGE_ORDER_PREFIX: &str = "Pending";

/// Largest magnitude a single snapshot amount may carry.
///
/// Keeps per-code cost sums and the derived fields inside `Decimal` range.
#[must_use]
pub fn max_source_amount() -> Decimal {
    Decimal::new(1_000_000_000_000_000, 0)
}

/// A budget line as stored, before cost roll-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLineSource {
    /// Line id.
    pub id: String,
    /// Cost code the line is budgeted against.
    pub cost_code: String,
    /// Line description.
    #[serde(default)]
    pub description: Option<String>,
    /// Title of the cost code.
    #[serde(default)]
    pub cost_code_title: Option<String>,
    /// Cost type code (e.g. "L", "M").
    #[serde(default)]
    pub cost_type_code: Option<String>,
    /// Original budget amount.
    #[serde(default)]
    pub original_amount: Decimal,
    /// Net budget modifications.
    #[serde(default)]
    pub budget_modifications: Decimal,
    /// Approved change orders.
    #[serde(default)]
    pub approved_cos: Decimal,
    /// Revised budget.
    #[serde(default)]
    pub revised_budget: Decimal,
    /// Committed costs.
    #[serde(default)]
    pub committed_costs: Decimal,
    /// Unit quantity.
    #[serde(default)]
    pub unit_qty: Option<Decimal>,
    /// Unit of measure.
    #[serde(default)]
    pub uom: Option<String>,
    /// Cost per unit.
    #[serde(default)]
    pub unit_cost: Option<Decimal>,
}

/// A direct cost line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectCostRecord {
    /// Cost code charged.
    #[serde(default)]
    pub cost_code: Option<String>,
    /// Amount.
    #[serde(default)]
    pub amount: Decimal,
    /// Cost type (Invoice, Expense, Payroll, Subcontractor Invoice).
    #[serde(default)]
    pub cost_type: Option<String>,
    /// Approval flag. Only `Some(true)` counts.
    #[serde(default)]
    pub approved: Option<bool>,
}

/// Kind of commitment a schedule-of-values item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentKind {
    /// Subcontract.
    Subcontract,
    /// Purchase order.
    PurchaseOrder,
}

/// A schedule-of-values item of a commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitmentSovRecord {
    /// Cost code the item is budgeted against.
    #[serde(default)]
    pub budget_code: Option<String>,
    /// Amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Commitment kind.
    pub kind: CommitmentKind,
    /// Status of the owning commitment.
    pub status: String,
}

impl CommitmentSovRecord {
    /// Returns true if the owning commitment is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        let statuses: &[&str] = match self.kind {
            CommitmentKind::Subcontract => &PENDING_SUBCONTRACT_STATUSES,
            CommitmentKind::PurchaseOrder => &PENDING_PO_STATUSES,
        };
        statuses.contains(&self.status.as_str())
    }
}

/// A change-order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeOrderLineRecord {
    /// Cost code affected.
    #[serde(default)]
    pub cost_code: Option<String>,
    /// Amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Status of the owning change order.
    pub status: String,
}

impl ChangeOrderLineRecord {
    /// Returns true if the owning change order is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status.starts_with(PENDING_CHANGE_ORDER_PREFIX)
    }
}

/// Everything needed to derive a project's budget lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    /// Budget lines in display order.
    #[serde(default)]
    pub lines: Vec<BudgetLineSource>,
    /// Direct cost line items.
    #[serde(default)]
    pub direct_costs: Vec<DirectCostRecord>,
    /// Commitment SOV items.
    #[serde(default)]
    pub commitment_items: Vec<CommitmentSovRecord>,
    /// Change-order lines.
    #[serde(default)]
    pub change_order_lines: Vec<ChangeOrderLineRecord>,
}

impl BudgetSnapshot {
    /// Returns the first amount whose magnitude exceeds [`max_source_amount`].
    #[must_use]
    pub fn oversized_amount(&self) -> Option<Decimal> {
        let limit = max_source_amount();
        self.amounts().find(|amount| amount.abs() > limit)
    }

    fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        let lines = self.lines.iter().flat_map(|line| {
            [
                line.original_amount,
                line.budget_modifications,
                line.approved_cos,
                line.revised_budget,
                line.committed_costs,
            ]
        });
        let direct_costs = self.direct_costs.iter().map(|cost| cost.amount);
        let commitments = self.commitment_items.iter().filter_map(|item| item.amount);
        let change_orders = self.change_order_lines.iter().filter_map(|line| line.amount);

        lines.chain(direct_costs).chain(commitments).chain(change_orders)
    }
}

/// Cost amounts accumulated for one cost code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostAccumulation {
    /// Job-to-date cost.
    pub job_to_date_cost_detail: Decimal,
    /// Direct costs.
    pub direct_costs: Decimal,
    /// Pending cost changes.
    pub pending_cost_changes: Decimal,
}

/// Service deriving budget lines from a snapshot.
pub struct BudgetRollupService;

impl BudgetRollupService {
    /// Accumulates cost records per cost code.
    ///
    /// Records without a cost code are skipped. Unapproved direct costs
    /// still register their cost code with zero amounts.
    #[must_use]
    pub fn accumulate_costs(snapshot: &BudgetSnapshot) -> HashMap<String, CostAccumulation> {
        let mut costs: HashMap<String, CostAccumulation> = HashMap::new();

        for cost in &snapshot.direct_costs {
            let Some(code) = cost.cost_code.as_deref() else {
                continue;
            };
            let entry = costs.entry(code.to_string()).or_default();

            if cost.approved != Some(true) {
                continue;
            }

            let cost_type = cost.cost_type.as_deref().unwrap_or(DEFAULT_COST_TYPE);
            if JTD_COST_TYPES.contains(&cost_type) {
                entry.job_to_date_cost_detail += cost.amount;
            }
            if DIRECT_COST_TYPES.contains(&cost_type) {
                entry.direct_costs += cost.amount;
            }
        }

        for item in snapshot.commitment_items.iter().filter(|i| i.is_pending()) {
            if let Some(code) = item.budget_code.as_deref() {
                costs.entry(code.to_string()).or_default().pending_cost_changes +=
                    item.amount.unwrap_or_default();
            }
        }

        for line in snapshot.change_order_lines.iter().filter(|l| l.is_pending()) {
            if let Some(code) = line.cost_code.as_deref() {
                costs.entry(code.to_string()).or_default().pending_cost_changes +=
                    line.amount.unwrap_or_default();
            }
        }

        costs
    }

    /// Derives leaf budget lines, in snapshot order.
    ///
    /// Every line with a given cost code receives that code's full cost
    /// accumulation.
    #[must_use]
    pub fn derive_line_items(snapshot: &BudgetSnapshot) -> Vec<BudgetLineItem> {
        let costs = Self::accumulate_costs(snapshot);

        let unmatched = costs
            .keys()
            .filter(|code| !snapshot.lines.iter().any(|line| &line.cost_code == *code))
            .count();
        if unmatched > 0 {
            debug!(unmatched, "cost records reference cost codes without budget lines");
        }

        snapshot
            .lines
            .iter()
            .map(|line| {
                let cost = costs.get(&line.cost_code).copied().unwrap_or_default();
                Self::derive_line_item(line, cost)
            })
            .collect()
    }

    /// Builds one leaf line from its source row and cost accumulation.
    #[must_use]
    pub fn derive_line_item(line: &BudgetLineSource, cost: CostAccumulation) -> BudgetLineItem {
        let revised_budget = line.revised_budget;
        let forecast_to_complete =
            (revised_budget - cost.job_to_date_cost_detail).max(Decimal::ZERO);
        let estimated_cost_at_completion = cost.job_to_date_cost_detail + forecast_to_complete;

        let totals = BudgetTotals {
            original_budget_amount: line.original_amount,
            budget_modifications: line.budget_modifications,
            approved_cos: line.approved_cos,
            revised_budget,
            job_to_date_cost_detail: cost.job_to_date_cost_detail,
            direct_costs: cost.direct_costs,
            pending_changes: cost.pending_cost_changes,
            projected_budget: revised_budget,
            committed_costs: line.committed_costs,
            pending_cost_changes: cost.pending_cost_changes,
            projected_costs: cost.direct_costs + cost.pending_cost_changes,
            forecast_to_complete,
            estimated_cost_at_completion,
            projected_over_under: revised_budget - estimated_cost_at_completion,
        };

        BudgetLineItem {
            unit_qty: line.unit_qty,
            uom: line.uom.clone(),
            unit_cost: line.unit_cost,
            ..BudgetLineItem::leaf(&line.id, &line.cost_code, Self::description(line), totals)
        }
    }

    /// The stored description, or `"<code> - <title> (<type>)"` when it is blank.
    #[must_use]
    pub fn description(line: &BudgetLineSource) -> String {
        if let Some(description) = line.description.as_deref().filter(|d| !d.is_empty()) {
            return description.to_string();
        }

        let title = line.cost_code_title.as_deref().unwrap_or_default();
        match line.cost_type_code.as_deref().filter(|t| !t.is_empty()) {
            Some(cost_type) => format!("{} - {title} ({cost_type})", line.cost_code),
            None => format!("{} - {title}", line.cost_code),
        }
    }
}
