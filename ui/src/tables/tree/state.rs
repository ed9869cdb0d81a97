//! Expansion state for the category tree table.

use std::collections::HashSet;

use crate::core::aggregate::AggregatedNode;

/// Left padding of a root row.
pub const TREE_BASE_INDENT_PX: usize = 12;
/// Extra padding per nesting level.
pub const TREE_INDENT_STEP_PX: usize = 20;

/// Ids of expanded nodes. Everything starts collapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeViewState {
    expanded: HashSet<String>,
}

/// One rendered line of the tree table.
#[derive(Debug, Clone)]
pub struct TreeRow<'a> {
    pub node: &'a AggregatedNode,
    /// Position path (`0.2.1`) from the root; unique per row even when node ids repeat.
    pub key: String,
    pub depth: usize,
    pub expanded: bool,
    pub has_children: bool,
}

impl TreeRow<'_> {
    pub fn indent_px(&self) -> usize {
        TREE_BASE_INDENT_PX + self.depth * TREE_INDENT_STEP_PX
    }

    pub fn toggle_glyph(&self) -> &'static str {
        match (self.has_children, self.expanded) {
            (false, _) => "",
            (true, true) => "▾",
            (true, false) => "▸",
        }
    }
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Depth-first flattening of the forest: a node's children are emitted
    /// only while the node is expanded.
    pub fn visible_rows<'a>(&self, forest: &'a [AggregatedNode]) -> Vec<TreeRow<'a>> {
        let mut rows = Vec::new();
        for (index, root) in forest.iter().enumerate() {
            self.push_visible(root, index.to_string(), 0, &mut rows);
        }
        rows
    }

    fn push_visible<'a>(
        &self,
        node: &'a AggregatedNode,
        key: String,
        depth: usize,
        rows: &mut Vec<TreeRow<'a>>,
    ) {
        let expanded = self.is_expanded(&node.id);
        let children_prefix = expanded.then(|| key.clone());
        rows.push(TreeRow {
            node,
            key,
            depth,
            expanded,
            has_children: node.has_children(),
        });
        if let Some(prefix) = children_prefix {
            for (index, child) in node.children.iter().enumerate() {
                self.push_visible(child, format!("{prefix}.{index}"), depth + 1, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::aggregate_forest;
    use crate::core::schema::HierarchyRow;
    use crate::core::tree::build_tree;

    fn forest() -> Vec<AggregatedNode> {
        let row = |sub2: &str, code: &str| HierarchyRow {
            category: "A".into(),
            sub_category_1: "X".into(),
            sub_category_2: sub2.into(),
            item_code: code.into(),
            description: format!("{code} part"),
            quantity: 1.0,
            rate: 5.0,
        };
        aggregate_forest(&build_tree(&[row("Y", "I1"), row("Y", "I2"), row("Z", "I3")]))
    }

    fn ids(rows: &[TreeRow<'_>]) -> Vec<String> {
        rows.iter().map(|r| r.node.id.clone()).collect()
    }

    #[test]
    fn collapsed_forest_shows_only_roots() {
        let forest = forest();
        let state = TreeViewState::new();
        let rows = state.visible_rows(&forest);
        assert_eq!(ids(&rows), vec!["A"]);
        assert_eq!(rows[0].toggle_glyph(), "▸");
        assert_eq!(rows[0].indent_px(), 12);
    }

    #[test]
    fn expanding_reveals_one_level_at_a_time() {
        let forest = forest();
        let mut state = TreeViewState::new();
        state.toggle("A");
        state.toggle("A-X");
        let rows = state.visible_rows(&forest);
        assert_eq!(ids(&rows), vec!["A", "A-X", "A-X-Y", "A-X-Z"]);
        assert_eq!(rows[2].depth, 2);
        assert_eq!(rows[2].indent_px(), 52);
        assert_eq!(rows[0].toggle_glyph(), "▾");
    }

    #[test]
    fn fully_expanded_branch_ends_in_items() {
        let forest = forest();
        let mut state = TreeViewState::new();
        for id in ["A", "A-X", "A-X-Y"] {
            state.toggle(id);
        }
        let rows = state.visible_rows(&forest);
        assert_eq!(ids(&rows), vec!["A", "A-X", "A-X-Y", "I1", "I2", "A-X-Z"]);

        let leaf = &rows[3];
        assert!(!leaf.has_children);
        assert_eq!(leaf.toggle_glyph(), "");
        assert_eq!(leaf.depth, 3);
    }

    #[test]
    fn collapsing_a_parent_hides_expanded_descendants() {
        let forest = forest();
        let mut state = TreeViewState::new();
        for id in ["A", "A-X", "A-X-Y"] {
            state.toggle(id);
        }
        state.toggle("A");
        assert_eq!(ids(&state.visible_rows(&forest)), vec!["A"]);

        // descendants remember their own state
        state.toggle("A");
        assert_eq!(state.visible_rows(&forest).len(), 6);
    }

    #[test]
    fn row_keys_stay_unique_when_item_codes_repeat() {
        let row = |sub2: &str| HierarchyRow {
            category: "A".into(),
            sub_category_1: "X".into(),
            sub_category_2: sub2.into(),
            item_code: "BOLT-10".into(),
            description: String::new(),
            quantity: 1.0,
            rate: 1.0,
        };
        let forest = aggregate_forest(&build_tree(&[row("Y"), row("Y"), row("Z")]));
        let mut state = TreeViewState::new();
        for id in ["A", "A-X", "A-X-Y", "A-X-Z"] {
            state.toggle(id);
        }

        let rows = state.visible_rows(&forest);
        assert_eq!(rows.len(), 7);
        let keys: HashSet<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys.len(), rows.len());
        assert_eq!(rows[3].key, "0.0.0.0");
        assert_eq!(rows[4].key, "0.0.0.1");
    }
}
