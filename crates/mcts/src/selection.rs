use crate::tree::{MctsTree, NodeId, NodeStatus};

/// Select a leaf node to expand using PUCT formula
///
/// Traverses the tree from root, selecting children with highest PUCT value
/// until reaching a leaf (unexpanded or terminal) node. Children are scanned
/// in move order and only a strictly better score replaces the current best,
/// so ties go to the lowest pit.
///
/// The parent count is floored at one. A pre-expanded root has no visits of
/// its own yet, and its first descent must still follow the priors.
pub fn select_leaf(tree: &MctsTree, root_id: NodeId, c_puct: f32) -> NodeId {
    let mut current_id = root_id;

    loop {
        let node = &tree.nodes[current_id];

        match node.status() {
            NodeStatus::Unexpanded | NodeStatus::Terminal => return current_id,
            NodeStatus::Expanded => {}
        }

        let sqrt_parent = (node.visit_count.max(1) as f32).sqrt();

        let mut best: Option<(NodeId, f32)> = None;
        for &child_id in &node.children {
            let score = puct_value(tree, child_id, sqrt_parent, c_puct);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((child_id, score));
            }
        }

        match best {
            Some((child_id, _)) => current_id = child_id,
            None => return current_id,
        }
    }
}

/// Calculate PUCT value for a node
///
/// PUCT(s, a) = Q(s, a) + c_puct * P(s, a) * sqrt(N(s)) / (1 + N(s, a))
///
/// Where:
/// - Q(s, a) = W(s, a) / N(s, a) is the average action value
/// - P(s, a) is the renormalized prior
/// - N(s) is parent visit count
/// - N(s, a) is child visit count
/// - c_puct is the exploration constant
fn puct_value(tree: &MctsTree, node_id: NodeId, sqrt_parent: f32, c_puct: f32) -> f32 {
    let node = &tree.nodes[node_id];

    let q = node.q_value();
    let u = c_puct * node.prior_probability * sqrt_parent / (1.0 + node.visit_count as f32);

    q + u
}
