use mancala_mcts::MctsConfig;

/// Self-play settings: the search configuration plus the temperature schedule
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Search settings; `temperature` is overridden per move by the schedule
    pub mcts: MctsConfig,

    /// Temperature for the opening moves
    pub temperature: f32,

    /// Number of moves played at `temperature` before switching to `late_temperature`
    pub temperature_threshold: usize,

    /// Temperature once the opening is over
    pub late_temperature: f32,
}

impl SelfPlayConfig {
    pub fn new(mcts: MctsConfig) -> Self {
        Self {
            mcts,
            ..Self::default()
        }
    }

    pub fn with_temperature_schedule(
        mut self,
        temperature: f32,
        threshold: usize,
        late_temperature: f32,
    ) -> Self {
        self.temperature = temperature;
        self.temperature_threshold = threshold;
        self.late_temperature = late_temperature;
        self
    }

    /// Temperature used for the move with zero-based index `move_count`
    pub fn temperature_for_move(&self, move_count: usize) -> f32 {
        if move_count < self.temperature_threshold {
            self.temperature
        } else {
            self.late_temperature
        }
    }
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            mcts: MctsConfig::default(),
            temperature: 1.1,
            temperature_threshold: 11,
            late_temperature: 0.1,
        }
    }
}
