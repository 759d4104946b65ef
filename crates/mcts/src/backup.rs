use crate::error::Result;
use crate::tree::{MctsTree, NodeId};

/// Backup value from leaf to root
///
/// `value` is from the perspective of the player to move at the leaf. Each
/// non-root node stores its value from the perspective of the player who
/// chose the move into it, so the sign flips whenever the player changes
/// across an edge. A free turn keeps the same player on both sides of the
/// edge and keeps the sign. The root has no incoming edge: it counts the
/// visit and accumulates the value for its own player to move.
pub fn backup(tree: &mut MctsTree, leaf_id: NodeId, value: f32) -> Result<()> {
    let mut current_value = value;
    let mut current_id = leaf_id;

    loop {
        let node = tree.get(current_id)?;
        let to_move = node.state.turn();

        let Some(parent_id) = node.parent else {
            let root = &mut tree.nodes[current_id];
            root.visit_count += 1;
            root.total_value += current_value;
            return Ok(());
        };

        // Re-express the value for the player who moved into this node
        if tree.get(parent_id)?.state.turn() != to_move {
            current_value = -current_value;
        }

        let node = &mut tree.nodes[current_id];
        node.visit_count += 1;
        node.total_value += current_value;

        current_id = parent_id;
    }
}
