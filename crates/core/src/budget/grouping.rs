//! Cost-code grouping of flat budget lines into roll-up trees.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cost_code::{division_code, division_name, subdivision_code};
use super::types::BudgetLineItem;

/// How budget lines are grouped for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupingType {
    /// Flat list.
    None,
    /// One group per division.
    #[default]
    CostCodeTier1,
    /// Divisions containing subdivisions.
    CostCodeTier2,
    /// Currently identical to [`GroupingType::CostCodeTier2`].
    CostCodeTier3,
}

impl GroupingType {
    /// Returns the wire name of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CostCodeTier1 => "cost-code-tier-1",
            Self::CostCodeTier2 => "cost-code-tier-2",
            Self::CostCodeTier3 => "cost-code-tier-3",
        }
    }

    /// Parses a wire name. Unrecognized names mean no grouping.
    #[must_use]
    pub fn parse(mode: &str) -> Self {
        match mode {
            "none" => Self::None,
            "cost-code-tier-1" => Self::CostCodeTier1,
            "cost-code-tier-2" => Self::CostCodeTier2,
            "cost-code-tier-3" => Self::CostCodeTier3,
            other => {
                debug!(mode = other, "unknown grouping mode, leaving lines ungrouped");
                Self::None
            }
        }
    }
}

impl std::fmt::Display for GroupingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupingType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for GroupingType {
    fn from(mode: &str) -> Self {
        Self::parse(mode)
    }
}

impl From<String> for GroupingType {
    fn from(mode: String) -> Self {
        Self::parse(&mode)
    }
}

impl From<GroupingType> for String {
    fn from(mode: GroupingType) -> Self {
        mode.as_str().to_string()
    }
}

/// Applies a grouping mode to a flat list of leaf lines.
///
/// `None` returns the lines unchanged. Tier 3 has no level of its own yet
/// and produces the tier 2 tree.
#[must_use]
pub fn apply_grouping(items: &[BudgetLineItem], mode: GroupingType) -> Vec<BudgetLineItem> {
    match mode {
        GroupingType::None => items.to_vec(),
        GroupingType::CostCodeTier1 => group_by_division(items),
        GroupingType::CostCodeTier2 | GroupingType::CostCodeTier3 => group_by_subdivision(items),
    }
}

/// Same as [`apply_grouping`] with a wire-name mode.
#[must_use]
pub fn apply_grouping_str(items: &[BudgetLineItem], mode: &str) -> Vec<BudgetLineItem> {
    apply_grouping(items, GroupingType::parse(mode))
}

/// Groups lines into one row per division, sorted by division code.
///
/// Each group's children are the original lines sorted by cost code.
#[must_use]
pub fn group_by_division(items: &[BudgetLineItem]) -> Vec<BudgetLineItem> {
    partition_by(items, |item| division_code(&item.cost_code))
        .into_iter()
        .map(|(code, lines)| {
            BudgetLineItem::group(
                format!("division-{code}"),
                code,
                division_name(code),
                sorted_by_cost_code(lines),
            )
        })
        .collect()
}

/// Groups lines into divisions whose children are subdivision groups.
///
/// Both levels are sorted by code. A subdivision takes its first line's
/// description, or its own code when that is empty.
#[must_use]
pub fn group_by_subdivision(items: &[BudgetLineItem]) -> Vec<BudgetLineItem> {
    partition_by(items, |item| division_code(&item.cost_code))
        .into_iter()
        .map(|(code, division_lines)| {
            let subdivisions: Vec<BudgetLineItem> =
                partition_by(division_lines, |item| subdivision_code(&item.cost_code))
                    .into_iter()
                    .map(|(sub_code, lines)| subdivision_group(sub_code, lines))
                    .collect();

            BudgetLineItem::group(
                format!("division-{code}"),
                code,
                division_name(code),
                subdivisions,
            )
        })
        .collect()
}

fn subdivision_group(code: &str, lines: Vec<&BudgetLineItem>) -> BudgetLineItem {
    let children = sorted_by_cost_code(lines);
    let description = children
        .first()
        .map(|first| first.description.as_str())
        .filter(|description| !description.is_empty())
        .unwrap_or(code)
        .to_string();

    BudgetLineItem::group(format!("subdivision-{code}"), code, description, children)
}

/// Buckets lines by key, keeping discovery order inside each bucket.
/// Buckets come back in ascending key order.
fn partition_by<'a, I, F>(items: I, key: F) -> BTreeMap<&'a str, Vec<&'a BudgetLineItem>>
where
    I: IntoIterator<Item = &'a BudgetLineItem>,
    F: Fn(&'a BudgetLineItem) -> &'a str,
{
    let mut buckets: BTreeMap<&'a str, Vec<&'a BudgetLineItem>> = BTreeMap::new();
    for item in items {
        buckets.entry(key(item)).or_default().push(item);
    }
    buckets
}

fn sorted_by_cost_code(mut lines: Vec<&BudgetLineItem>) -> Vec<BudgetLineItem> {
    lines.sort_by(|a, b| a.cost_code.cmp(&b.cost_code));
    lines.into_iter().cloned().collect()
}
