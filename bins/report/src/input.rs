//! Report input loading.

use std::path::Path;

use keystone_core::budget::{
    BudgetLineItem, BudgetRollupService, BudgetSnapshot, magnitude_total, max_source_amount,
};
use keystone_shared::{AppError, AppResult};
use serde::Deserialize;
use tracing::debug;

/// Either already-derived budget lines or a raw project snapshot.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReportInput {
    Lines(Vec<BudgetLineItem>),
    Snapshot(BudgetSnapshot),
}

/// Parses report input into flat leaf lines.
///
/// A JSON array is taken as budget lines. A JSON object is taken as a
/// snapshot and rolled up. Amounts too large to total are rejected.
pub fn parse_input(raw: &str) -> AppResult<Vec<BudgetLineItem>> {
    let input: ReportInput = serde_json::from_str(raw).map_err(|e| {
        AppError::InvalidInput(format!(
            "expected an array of budget lines or a budget snapshot object: {e}"
        ))
    })?;

    let lines = match input {
        ReportInput::Lines(lines) => lines,
        ReportInput::Snapshot(snapshot) => {
            if let Some(amount) = snapshot.oversized_amount() {
                return Err(AppError::InvalidInput(format!(
                    "snapshot amount {amount} exceeds the limit of {}",
                    max_source_amount()
                )));
            }
            debug!(
                lines = snapshot.lines.len(),
                direct_costs = snapshot.direct_costs.len(),
                commitment_items = snapshot.commitment_items.len(),
                change_order_lines = snapshot.change_order_lines.len(),
                "rolling up budget snapshot"
            );
            BudgetRollupService::derive_line_items(&snapshot)
        }
    };

    if let Some(group) = lines.iter().find(|line| line.is_group()) {
        return Err(AppError::InvalidInput(format!(
            "line {} already has children; input must be flat",
            group.id
        )));
    }

    if magnitude_total(&lines).is_none() {
        return Err(AppError::InvalidInput(
            "budget amounts are too large to total".to_string(),
        ));
    }

    Ok(lines)
}

/// Reads and parses report input from a file.
pub fn load_input(path: &Path) -> AppResult<Vec<BudgetLineItem>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("{}: {e}", path.display())))?;
    parse_input(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_line_array() {
        let raw = r#"[
            {"id": "1", "costCode": "01-100", "description": "Labor", "originalBudgetAmount": 1000},
            {"id": "2", "costCode": "03-100", "description": "Concrete", "originalBudgetAmount": "2000"}
        ]"#;

        let lines = parse_input(raw).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].totals.original_budget_amount, dec!(2000));
    }

    #[test]
    fn test_parse_snapshot_rolls_up() {
        let raw = r#"{
            "lines": [
                {"id": "7", "cost_code": "01-100", "revised_budget": "1000"}
            ],
            "direct_costs": [
                {"cost_code": "01-100", "amount": "250", "cost_type": "Payroll", "approved": true}
            ]
        }"#;

        let lines = parse_input(raw).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].description, "01-100 - ");
        assert_eq!(lines[0].totals.job_to_date_cost_detail, dec!(250));
        assert_eq!(lines[0].totals.forecast_to_complete, dec!(750));
    }

    #[test]
    fn test_rejects_nested_input() {
        let raw = r#"[
            {"id": "division-01", "costCode": "01", "description": "General Conditions",
             "children": [{"id": "1", "costCode": "01-100", "description": "Labor"}]}
        ]"#;

        let err = parse_input(raw).unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_lines_whose_totals_overflow() {
        let raw = r#"[
            {"id": "1", "costCode": "01-100", "originalBudgetAmount": "79228162514264337593543950335"},
            {"id": "2", "costCode": "01-200", "originalBudgetAmount": "79228162514264337593543950335"}
        ]"#;

        let err = parse_input(raw).unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_accepts_single_line_at_decimal_max() {
        let raw = r#"[
            {"id": "1", "costCode": "01-100", "originalBudgetAmount": "79228162514264337593543950335"}
        ]"#;

        let lines = parse_input(raw).unwrap();

        assert_eq!(lines[0].totals.original_budget_amount, Decimal::MAX);
    }

    #[test]
    fn test_rejects_oversized_snapshot_amount() {
        let raw = r#"{
            "lines": [{"id": "7", "cost_code": "01-100", "revised_budget": "1000"}],
            "direct_costs": [
                {"cost_code": "01-100", "amount": "1000000000000000.01", "approved": true}
            ]
        }"#;

        let err = parse_input(raw).unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = parse_input("{\"lines\": 3").unwrap_err();

        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_input(Path::new("/nonexistent/keystone/snapshot.json")).unwrap_err();

        assert!(matches!(err, AppError::Io(_)));
    }
}
