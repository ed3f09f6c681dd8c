//! Budget roll-up: cost-code grouping, aggregation and reports.
//!
//! Flat leaf lines come from [`rollup`], pass through a [`filter`], get
//! grouped by cost code in [`grouping`] and are totalled in [`totals`].
//! Every step is pure and infallible for rows accepted by
//! [`magnitude_total`].

pub mod cost_code;
pub mod filter;
pub mod grouping;
pub mod report;
pub mod rollup;
pub mod totals;
pub mod tree;
pub mod types;
pub mod variance;


pub use cost_code::{CostCode, division_code, division_name, subdivision_code};
pub use filter::{QuickFilter, apply_quick_filter};
pub use grouping::{
    GroupingType, apply_grouping, apply_grouping_str, group_by_division, group_by_subdivision,
};
pub use report::{BudgetReport, BudgetReportService};
pub use rollup::{
    BudgetLineSource, BudgetRollupService, BudgetSnapshot, ChangeOrderLineRecord, CommitmentKind,
    CommitmentSovRecord, CostAccumulation, DirectCostRecord, max_source_amount,
};
pub use totals::{BudgetTotals, aggregate_totals, collect_leaves, grand_total, magnitude_total};
pub use tree::{VisibleRow, set_all_expanded, set_expanded, visible_rows};
pub use types::BudgetLineItem;
pub use variance::VarianceStatus;
