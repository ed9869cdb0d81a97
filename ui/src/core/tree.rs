//! Category tree construction for bill-of-materials uploads.
//!
//! Rows are folded into a fixed four-level hierarchy:
//! category → sub-category 1 → sub-category 2 → item. Children keep first
//! insertion order and categories keep the order they first appear in.
//!
//! Node ids are the dash-joined label path (`category`, `category-sub1`,
//! `category-sub1-sub2`) and the raw item code for leaves. Two different paths
//! can therefore produce the same id (e.g. `"A-B" / "C"` and `"A" / "B-C"`);
//! consumers that key expansion state by id share it between such nodes.
//!
//! Sub-category lookup is a linear scan over the parent's children, which is
//! fine for the fan-out of a typical BOM. A label-keyed map per node would be
//! the fix if uploads ever grow to thousands of siblings.

use std::collections::HashMap;

use serde::Serialize;

use super::schema::HierarchyRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLevel {
    Category,
    Sub1,
    Sub2,
    Item,
}

/// Raw values carried by an item leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub item_code: String,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub level: NodeLevel,
    pub children: Vec<TreeNode>,
    /// Only present on item leaves.
    pub data: Option<ItemData>,
}

impl TreeNode {
    fn group(id: String, label: &str, level: NodeLevel) -> Self {
        Self {
            id,
            label: label.to_string(),
            level,
            children: Vec::new(),
            data: None,
        }
    }

    fn item(row: &HierarchyRow) -> Self {
        Self {
            id: row.item_code.clone(),
            label: row.item_code.clone(),
            level: NodeLevel::Item,
            children: Vec::new(),
            data: Some(ItemData {
                item_code: row.item_code.clone(),
                description: row.description.clone(),
                quantity: row.quantity,
                rate: row.rate,
            }),
        }
    }
}

/// Builds the category forest from validated rows.
///
/// Every row appends a new item leaf, so a repeated item code yields sibling
/// leaves rather than a merged one.
pub fn build_tree(rows: &[HierarchyRow]) -> Vec<TreeNode> {
    let mut roots: Vec<TreeNode> = Vec::new();
    let mut by_category: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let index = *by_category.entry(row.category.as_str()).or_insert_with(|| {
            roots.push(TreeNode::group(
                row.category.clone(),
                &row.category,
                NodeLevel::Category,
            ));
            roots.len() - 1
        });

        let category = &mut roots[index];
        let sub1 = child_by_label(category, &row.sub_category_1, NodeLevel::Sub1, || {
            format!("{}-{}", row.category, row.sub_category_1)
        });
        let sub2 = child_by_label(sub1, &row.sub_category_2, NodeLevel::Sub2, || {
            format!(
                "{}-{}-{}",
                row.category, row.sub_category_1, row.sub_category_2
            )
        });
        sub2.children.push(TreeNode::item(row));
    }

    roots
}

fn child_by_label<'a>(
    parent: &'a mut TreeNode,
    label: &str,
    level: NodeLevel,
    make_id: impl FnOnce() -> String,
) -> &'a mut TreeNode {
    let index = match parent.children.iter().position(|child| child.label == label) {
        Some(index) => index,
        None => {
            parent.children.push(TreeNode::group(make_id(), label, level));
            parent.children.len() - 1
        }
    };
    &mut parent.children[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, sub1: &str, sub2: &str, code: &str, qty: f64, rate: f64) -> HierarchyRow {
        HierarchyRow {
            category: category.into(),
            sub_category_1: sub1.into(),
            sub_category_2: sub2.into(),
            item_code: code.into(),
            description: format!("{code} description"),
            quantity: qty,
            rate,
        }
    }

    #[test]
    fn shared_path_collapses_into_one_branch() {
        let rows = vec![
            row("A", "X", "Y", "I1", 2.0, 10.0),
            row("A", "X", "Y", "I2", 3.0, 20.0),
        ];
        let tree = build_tree(&rows);

        assert_eq!(tree.len(), 1);
        let category = &tree[0];
        assert_eq!(category.id, "A");
        assert_eq!(category.level, NodeLevel::Category);
        assert_eq!(category.children.len(), 1);

        let sub1 = &category.children[0];
        assert_eq!(sub1.id, "A-X");
        assert_eq!(sub1.children.len(), 1);

        let sub2 = &sub1.children[0];
        assert_eq!(sub2.id, "A-X-Y");
        let codes: Vec<&str> = sub2.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(codes, vec!["I1", "I2"]);
        assert!(sub2.children.iter().all(|c| c.level == NodeLevel::Item));
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let rows = vec![
            row("Zinc", "X", "Y", "I1", 1.0, 1.0),
            row("Alu", "X", "Y", "I2", 1.0, 1.0),
            row("Zinc", "Q", "Y", "I3", 1.0, 1.0),
        ];
        let tree = build_tree(&rows);
        let labels: Vec<&str> = tree.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Zinc", "Alu"]);

        let zinc_subs: Vec<&str> = tree[0].children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(zinc_subs, vec!["X", "Q"]);
    }

    #[test]
    fn duplicate_item_codes_stay_separate() {
        let rows = vec![
            row("A", "X", "Y", "I1", 1.0, 5.0),
            row("A", "X", "Y", "I1", 4.0, 6.0),
        ];
        let tree = build_tree(&rows);
        let items = &tree[0].children[0].children[0].children;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, items[1].id);
        assert_eq!(items[1].data.as_ref().map(|d| d.quantity), Some(4.0));
    }

    #[test]
    fn only_items_carry_data() {
        let tree = build_tree(&[row("A", "X", "Y", "I1", 1.0, 5.0)]);
        let category = &tree[0];
        assert!(category.data.is_none());
        assert!(category.children[0].data.is_none());
        let item = &category.children[0].children[0].children[0];
        assert!(item.children.is_empty());
        let data = item.data.as_ref().expect("item data");
        assert_eq!(data.description, "I1 description");
    }

    #[test]
    fn same_sub_label_under_different_categories_is_not_shared() {
        let rows = vec![
            row("A", "X", "Y", "I1", 1.0, 1.0),
            row("B", "X", "Y", "I2", 1.0, 1.0),
        ];
        let tree = build_tree(&rows);
        assert_eq!(tree[0].children[0].id, "A-X");
        assert_eq!(tree[1].children[0].id, "B-X");
    }

    #[test]
    fn empty_input_builds_nothing() {
        assert!(build_tree(&[]).is_empty());
    }
}
