use rand::Rng;
use rand_distr::{Dirichlet, Distribution};

use crate::config::MctsConfig;
use crate::error::{MctsError, Result};
use crate::tree::{MctsTree, NodeId};

/// Add Dirichlet noise to root node priors for exploration
///
/// The noise is mixed with the original prior: P' = (1-ε)*P + ε*noise.
/// Only the root is touched. With fewer than two children there is nothing
/// to diversify and the priors are left alone.
pub fn add_dirichlet_noise_to_root<R: Rng + ?Sized>(
    tree: &mut MctsTree,
    root_id: NodeId,
    config: &MctsConfig,
    rng: &mut R,
) -> Result<()> {
    let root = tree.get(root_id)?;

    if !root.is_expanded {
        return Err(MctsError::RootNotInitialized);
    }

    let n = root.children.len();
    if n < 2 {
        return Ok(());
    }

    let alpha_vec = vec![config.dirichlet_alpha as f64; n];
    let dirichlet =
        Dirichlet::new(&alpha_vec).map_err(|e| MctsError::DirichletError(e.to_string()))?;

    let noise: Vec<f32> = dirichlet.sample(rng).iter().map(|&x| x as f32).collect();

    let eps = config.dirichlet_epsilon;
    let children = root.children.clone();

    for (i, &child_id) in children.iter().enumerate() {
        let child = &mut tree.nodes[child_id];
        child.prior_probability = (1.0 - eps) * child.prior_probability + eps * noise[i];
    }

    Ok(())
}
