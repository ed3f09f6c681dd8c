//! Budget table report: filtered, grouped rows plus grand totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::{QuickFilter, apply_quick_filter};
use super::grouping::{GroupingType, apply_grouping};
use super::totals::{BudgetTotals, grand_total};
use super::types::BudgetLineItem;

/// A rendered budget table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    /// When the report was built.
    pub generated_at: DateTime<Utc>,
    /// Grouping mode applied.
    pub grouping: GroupingType,
    /// Quick filter applied.
    pub quick_filter: QuickFilter,
    /// Number of leaf lines after filtering.
    pub line_count: usize,
    /// Top-level rows, possibly nested.
    #[serde(rename = "lineItems")]
    pub rows: Vec<BudgetLineItem>,
    /// Totals over every leaf line.
    pub grand_totals: BudgetTotals,
}

/// Service for building budget reports.
pub struct BudgetReportService;

impl BudgetReportService {
    /// Filters `items`, groups the survivors and totals them.
    #[must_use]
    pub fn build(
        items: &[BudgetLineItem],
        quick_filter: QuickFilter,
        grouping: GroupingType,
    ) -> BudgetReport {
        let filtered = apply_quick_filter(items, quick_filter);
        let rows = apply_grouping(&filtered, grouping);
        let grand_totals = grand_total(&rows);

        BudgetReport {
            generated_at: Utc::now(),
            grouping,
            quick_filter,
            line_count: filtered.len(),
            rows,
            grand_totals,
        }
    }
}
