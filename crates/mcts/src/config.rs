/// Configuration for MCTS search
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run per search
    pub num_simulations: u32,

    /// PUCT exploration constant
    pub c_puct: f32,

    /// Whether to add Dirichlet noise to root priors (self-play only)
    pub add_dirichlet_noise: bool,

    /// Dirichlet alpha parameter
    pub dirichlet_alpha: f32,

    /// Dirichlet epsilon for mixing noise (typically 0.25)
    pub dirichlet_epsilon: f32,

    /// Temperature for policy extraction (1.0 = proportional to visits, 0.0 = argmax)
    pub temperature: f32,
}

impl MctsConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of simulations
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Set PUCT exploration constant
    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    /// Set temperature for policy extraction
    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    /// Enable Dirichlet noise with given parameters
    pub fn with_dirichlet_noise(mut self, alpha: f32, epsilon: f32) -> Self {
        self.add_dirichlet_noise = true;
        self.dirichlet_alpha = alpha;
        self.dirichlet_epsilon = epsilon;
        self
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 777,
            c_puct: 1.0,
            add_dirichlet_noise: false,
            dirichlet_alpha: 1.0,
            dirichlet_epsilon: 0.25,
            temperature: 1.0,
        }
    }
}
