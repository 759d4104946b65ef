use mancala_core::ACTION_SIZE;

/// Temperatures below this are treated as zero (pure argmax)
pub const MIN_TEMPERATURE: f32 = 1e-3;

/// Turn root visit counts into a move distribution over the full action space.
///
/// Each count is raised to `1 / temperature` and the results are normalized.
/// Counts are scaled by the largest one first so high visit totals cannot
/// overflow at low temperature. Below `MIN_TEMPERATURE` the result is one-hot
/// on the most visited move, the lowest pit winning ties. At or above the
/// cutoff tied counts share their mass evenly, however small the temperature,
/// so lowest-pit tie-breaking applies only below it. If nothing was visited
/// the distribution is uniform over the listed moves.
pub fn extract_policy(root_visits: &[(usize, u32)], temperature: f32) -> Vec<f32> {
    let mut policy = vec![0.0f32; ACTION_SIZE];

    let Some(&(_, max_visits)) = root_visits
        .iter()
        .reduce(|best, item| if item.1 > best.1 { item } else { best })
    else {
        return policy;
    };

    if max_visits == 0 {
        let uniform = 1.0 / root_visits.len() as f32;
        for &(pit, _) in root_visits {
            policy[pit] = uniform;
        }
        return policy;
    }

    if temperature < MIN_TEMPERATURE {
        if let Some(&(pit, _)) = root_visits.iter().find(|(_, v)| *v == max_visits) {
            policy[pit] = 1.0;
        }
        return policy;
    }

    let inv_temp = 1.0f64 / temperature as f64;
    let weights: Vec<(usize, f64)> = root_visits
        .iter()
        .map(|&(pit, v)| (pit, (v as f64 / max_visits as f64).powf(inv_temp)))
        .collect();
    let total: f64 = weights.iter().map(|(_, w)| w).sum();

    for (pit, w) in weights {
        policy[pit] = (w / total) as f32;
    }
    policy
}
