//! Budget data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::totals::{BudgetTotals, aggregate_totals};
use super::variance::VarianceStatus;

/// A budget row: either a leaf carrying source data or a synthesized group.
///
/// Group rows have non-empty `children` and their totals are the sum of the
/// children's totals. Unit fields are only meaningful on leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineItem {
    /// Backend id for leaves, `division-<code>` or `subdivision-<code>` for groups.
    pub id: String,
    /// Hierarchical cost code, or the group's code prefix.
    pub cost_code: String,
    /// Line description, or the division/subdivision label for groups.
    #[serde(default)]
    pub description: String,
    /// Additive amounts.
    #[serde(flatten)]
    pub totals: BudgetTotals,
    /// Unit quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_qty: Option<Decimal>,
    /// Unit of measure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    /// Cost per unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<Decimal>,
    /// Child rows, present only on group rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BudgetLineItem>,
    /// Whether a renderer shows this group's children.
    #[serde(default)]
    pub expanded: bool,
}

impl BudgetLineItem {
    /// Creates a leaf row without unit fields.
    pub fn leaf(
        id: impl Into<String>,
        cost_code: impl Into<String>,
        description: impl Into<String>,
        totals: BudgetTotals,
    ) -> Self {
        Self {
            id: id.into(),
            cost_code: cost_code.into(),
            description: description.into(),
            totals,
            unit_qty: None,
            uom: None,
            unit_cost: None,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Creates a collapsed group row whose totals are rolled up from `children`.
    pub fn group(
        id: impl Into<String>,
        cost_code: impl Into<String>,
        description: impl Into<String>,
        children: Vec<BudgetLineItem>,
    ) -> Self {
        let totals = aggregate_totals(&children);
        Self {
            id: id.into(),
            cost_code: cost_code.into(),
            description: description.into(),
            totals,
            unit_qty: None,
            uom: None,
            unit_cost: None,
            children,
            expanded: false,
        }
    }

    /// Returns true if this row has children.
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true if this row carries source data.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Classifies the row by its projected over/under amount.
    #[must_use]
    pub fn variance_status(&self) -> VarianceStatus {
        VarianceStatus::classify(self.totals.projected_over_under)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_rolls_up_children() {
        let children = vec![
            BudgetLineItem::leaf(
                "1",
                "01-100",
                "Labor",
                BudgetTotals {
                    original_budget_amount: dec!(1000),
                    ..BudgetTotals::default()
                },
            ),
            BudgetLineItem::leaf(
                "2",
                "01-200",
                "Material",
                BudgetTotals {
                    original_budget_amount: dec!(500),
                    ..BudgetTotals::default()
                },
            ),
        ];

        let group = BudgetLineItem::group("division-01", "01", "General Conditions", children);

        assert!(group.is_group());
        assert!(!group.expanded);
        assert_eq!(group.totals.original_budget_amount, dec!(1500));
        assert_eq!(group.unit_qty, None);
        assert_eq!(group.uom, None);
        assert_eq!(group.unit_cost, None);
    }

    #[test]
    fn test_deserialize_leaf_defaults_missing_amounts() {
        let json = r#"{
            "id": "42",
            "costCode": "03-100",
            "description": "Concrete",
            "originalBudgetAmount": "2000.00",
            "approvedCOs": 150,
            "uom": "CY"
        }"#;

        let item: BudgetLineItem = serde_json::from_str(json).unwrap();

        assert!(item.is_leaf());
        assert_eq!(item.totals.original_budget_amount, dec!(2000.00));
        assert_eq!(item.totals.approved_cos, dec!(150));
        assert_eq!(item.totals.revised_budget, Decimal::ZERO);
        assert_eq!(item.uom.as_deref(), Some("CY"));
        assert!(!item.expanded);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let item = BudgetLineItem::leaf("1", "01-100", "Labor", BudgetTotals::default());

        let value = serde_json::to_value(&item).unwrap();

        assert!(value.get("costCode").is_some());
        assert!(value.get("approvedCOs").is_some());
        assert!(value.get("estimatedCostAtCompletion").is_some());
        assert!(value.get("children").is_none());
        assert!(value.get("unitQty").is_none());
    }
}
