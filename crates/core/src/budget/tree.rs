//! Expand/collapse state and visible-row walks over grouped budget trees.

use super::types::BudgetLineItem;

/// A row a tree renderer should draw, with its nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    /// Zero for top-level rows.
    pub depth: usize,
    /// The row itself.
    pub item: &'a BudgetLineItem,
}

/// Sets the expanded flag of the group row with `id`.
///
/// Returns false if no group row has that id. Leaves are left untouched.
pub fn set_expanded(items: &mut [BudgetLineItem], id: &str, expanded: bool) -> bool {
    for item in items.iter_mut() {
        if !item.is_group() {
            continue;
        }
        if item.id == id {
            item.expanded = expanded;
            return true;
        }
        if set_expanded(&mut item.children, id, expanded) {
            return true;
        }
    }
    false
}

/// Sets the expanded flag on every group row.
pub fn set_all_expanded(items: &mut [BudgetLineItem], expanded: bool) {
    for item in items.iter_mut().filter(|item| item.is_group()) {
        item.expanded = expanded;
        set_all_expanded(&mut item.children, expanded);
    }
}

/// Lists rows in display order, descending only into expanded groups.
#[must_use]
pub fn visible_rows(items: &[BudgetLineItem]) -> Vec<VisibleRow<'_>> {
    let mut rows = Vec::new();
    push_visible(items, 0, &mut rows);
    rows
}

fn push_visible<'a>(items: &'a [BudgetLineItem], depth: usize, out: &mut Vec<VisibleRow<'a>>) {
    for item in items {
        out.push(VisibleRow { depth, item });
        if item.is_group() && item.expanded {
            push_visible(&item.children, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::grouping::group_by_subdivision;
    use crate::budget::totals::BudgetTotals;

    fn tree() -> Vec<BudgetLineItem> {
        let lines = vec![
            BudgetLineItem::leaf("1", "01-100", "Labor", BudgetTotals::default()),
            BudgetLineItem::leaf("2", "01-200", "Material", BudgetTotals::default()),
            BudgetLineItem::leaf("3", "03-100", "Concrete", BudgetTotals::default()),
        ];
        group_by_subdivision(&lines)
    }

    fn ids<'a>(rows: &[VisibleRow<'a>]) -> Vec<(usize, &'a str)> {
        rows.iter().map(|r| (r.depth, r.item.id.as_str())).collect()
    }

    #[test]
    fn test_collapsed_tree_shows_top_level_only() {
        let tree = tree();

        assert_eq!(
            ids(&visible_rows(&tree)),
            vec![(0, "division-01"), (0, "division-03")]
        );
    }

    #[test]
    fn test_expand_nested_group() {
        let mut tree = tree();

        assert!(set_expanded(&mut tree, "division-01", true));
        assert!(set_expanded(&mut tree, "subdivision-01-200", true));

        assert_eq!(
            ids(&visible_rows(&tree)),
            vec![
                (0, "division-01"),
                (1, "subdivision-01-100"),
                (1, "subdivision-01-200"),
                (2, "2"),
                (0, "division-03"),
            ]
        );
    }

    #[test]
    fn test_set_expanded_ignores_leaves_and_unknown_ids() {
        let mut tree = tree();

        assert!(!set_expanded(&mut tree, "1", true));
        assert!(!set_expanded(&mut tree, "division-99", true));

        set_all_expanded(&mut tree, true);
        let leaf = &tree[0].children[0].children[0];
        assert!(!leaf.expanded);
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut tree = tree();

        set_all_expanded(&mut tree, true);
        assert_eq!(visible_rows(&tree).len(), 8);

        set_all_expanded(&mut tree, false);
        assert_eq!(visible_rows(&tree).len(), 2);
    }
}
