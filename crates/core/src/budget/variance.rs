//! Budget variance classification.

use rust_decimal::Decimal;

/// Variance status of a budget row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceStatus {
    /// Projected to finish under budget.
    Favorable,
    /// Projected to finish over budget.
    Unfavorable,
    /// Projected to finish exactly on budget.
    OnBudget,
}

impl VarianceStatus {
    /// Classifies a projected over/under amount (revised budget minus
    /// estimated cost at completion).
    #[must_use]
    pub fn classify(projected_over_under: Decimal) -> Self {
        match projected_over_under.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => Self::Favorable,
            std::cmp::Ordering::Less => Self::Unfavorable,
            std::cmp::Ordering::Equal => Self::OnBudget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_classify() {
        assert_eq!(VarianceStatus::classify(dec!(200)), VarianceStatus::Favorable);
        assert_eq!(VarianceStatus::classify(dec!(-0.01)), VarianceStatus::Unfavorable);
        assert_eq!(VarianceStatus::classify(dec!(0.00)), VarianceStatus::OnBudget);
    }
}
