use mancala_core::{ACTION_SIZE, Board, Player};
use mancala_mcts::{
    Evaluator, Mcts, MctsConfig, Result, StoreDifferenceEvaluator, UniformEvaluator, search,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct FixedModel {
    priors: Vec<f32>,
    value: f32,
}

impl Evaluator for FixedModel {
    fn evaluate(&self, _board: &Board) -> Result<(Vec<f32>, f32)> {
        Ok((self.priors.clone(), self.value))
    }
}

#[test]
fn search_with_uniform_evaluator() {
    let result = search(&Board::new(), &UniformEvaluator, 64).unwrap();

    let sum: f32 = result.policy_distribution.iter().sum();
    assert!((sum - 1.0).abs() < 1e-4);
    assert_eq!(result.policy_distribution.len(), ACTION_SIZE);

    // Only player one's pits receive probability
    for pit in 6..ACTION_SIZE {
        assert_eq!(result.policy_distribution[pit], 0.0);
    }
    assert_eq!(result.total_visits(), 64);
    assert!(result.best_move().unwrap() < 6);
}

#[test]
fn search_picks_high_prior_move() {
    let mut priors = vec![0.01f32; ACTION_SIZE];
    priors[3] = 10.0;

    let model = FixedModel { priors, value: 0.0 };
    let result = search(&Board::new(), &model, 16).unwrap();

    assert_eq!(result.best_move(), Some(3));
    assert!(result.visit_count_for_move(3) > result.visit_count_for_move(0));
}

#[test]
fn first_simulation_follows_highest_prior() {
    let mut priors = vec![0.0f32; ACTION_SIZE];
    priors[5] = 1.0;
    let model = FixedModel { priors, value: 0.0 };

    let single = search(&Board::new(), &model, 1).unwrap();
    assert_eq!(single.best_move(), Some(5));
    assert_eq!(single.visit_count_for_move(5), 1);
    assert_eq!(single.visit_count_for_move(0), 0);

    // Zero-prior moves never attract a visit while the favourite holds a non-negative value
    let few = search(&Board::new(), &model, 3).unwrap();
    assert_eq!(few.visit_count_for_move(5), 3);
    assert_eq!(few.total_visits(), 3);
}

#[test]
fn search_takes_winning_capture() {
    // Sowing pit 4 (one marble) lands in empty pit 5 and captures the 10 in
    // pit 7, pushing player one's store past the majority.
    let board = Board::from_pits([1, 1, 0, 0, 1, 0, 14, 10, 2, 2, 2, 2, 2, 11], Player::One)
        .unwrap();
    let config = MctsConfig::default()
        .with_simulations(200)
        .with_temperature(0.0);
    let mut rng = StdRng::seed_from_u64(3);

    let result = Mcts::new()
        .search(&board, &StoreDifferenceEvaluator::default(), &config, &mut rng)
        .unwrap();

    assert_eq!(result.best_move(), Some(4));
    assert_eq!(result.policy_distribution[4], 1.0);
    assert!(result.root_value > 0.0);
}

#[test]
fn search_budget_counts_terminal_leaves() {
    // The only move empties player one's side and ends the game in a tie
    let board = Board::from_pits([0, 0, 0, 0, 0, 1, 23, 4, 4, 4, 4, 4, 4, 0], Player::One)
        .unwrap();
    let mut mcts = Mcts::new();
    let config = MctsConfig::default().with_simulations(25);
    let mut rng = StdRng::seed_from_u64(0);

    let result = mcts
        .search(&board, &UniformEvaluator, &config, &mut rng)
        .unwrap();

    assert_eq!(result.total_visits(), 25);
    assert_eq!(mcts.tree().nodes[0].visit_count, 25);
    assert_eq!(result.root_value, 0.0);
}

#[test]
fn search_with_dirichlet_noise_still_sums_to_budget() {
    let config = MctsConfig::default()
        .with_simulations(40)
        .with_dirichlet_noise(1.0, 0.25);
    let mut rng = StdRng::seed_from_u64(99);

    let result = Mcts::new()
        .search(&Board::new(), &UniformEvaluator, &config, &mut rng)
        .unwrap();

    assert_eq!(result.total_visits(), 40);
    let sum: f32 = result.policy_distribution.iter().sum();
    assert!((sum - 1.0).abs() < 1e-4);
}

#[test]
fn malformed_priors_abort_search() {
    let model = FixedModel {
        priors: vec![0.5; 6],
        value: 0.0,
    };
    assert!(search(&Board::new(), &model, 4).is_err());
}
