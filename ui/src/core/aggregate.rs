//! Bottom-up quantity and weighted-rate aggregation over the category tree.

use serde::Serialize;

use super::tree::{ItemData, NodeLevel, TreeNode};

/// A tree node with its subtree totals.
///
/// `est_rate` is the quantity-weighted mean of the contributing children, or 0
/// when nothing in the subtree has a positive quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedNode {
    pub id: String,
    pub label: String,
    pub level: NodeLevel,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AggregatedNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ItemData>,
    pub total_qty: f64,
    pub est_rate: f64,
}

impl AggregatedNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this node takes part in its parent's weighted average.
    fn contributes(&self) -> bool {
        self.total_qty > 0.0 && !self.est_rate.is_nan()
    }
}

/// Aggregates every root of a forest.
pub fn aggregate_forest(roots: &[TreeNode]) -> Vec<AggregatedNode> {
    roots.iter().map(aggregate).collect()
}

/// Post-order fold producing a new aggregated subtree; the input is left untouched.
pub fn aggregate(node: &TreeNode) -> AggregatedNode {
    if let (NodeLevel::Item, Some(data)) = (node.level, node.data.as_ref()) {
        let quantity = finite_or_zero(data.quantity);
        let rate = finite_or_zero(data.rate);
        return AggregatedNode {
            id: node.id.clone(),
            label: node.label.clone(),
            level: node.level,
            children: Vec::new(),
            data: Some(data.clone()),
            total_qty: quantity,
            est_rate: if quantity > 0.0 { rate } else { 0.0 },
        };
    }

    let children: Vec<AggregatedNode> = node.children.iter().map(aggregate).collect();
    let (total_qty, total_cost) = children
        .iter()
        .filter(|child| child.contributes())
        .fold((0.0, 0.0), |(qty, cost), child| {
            (qty + child.total_qty, cost + child.total_qty * child.est_rate)
        });

    AggregatedNode {
        id: node.id.clone(),
        label: node.label.clone(),
        level: node.level,
        children,
        data: node.data.clone(),
        total_qty,
        est_rate: if total_qty > 0.0 {
            total_cost / total_qty
        } else {
            0.0
        },
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if !value.is_finite() {
        0.0
    } else {
        value
    }
}
