//! PPO hyperparameters.
//!
//! All values are passed through unmodified to the external optimizer; this
//! crate only checks the constraints listed on [`TrainingConfigBuilder`].
//!
//! [`TrainingConfigBuilder`]: crate::TrainingConfigBuilder
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Activation function of the policy network's hidden layers.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Rectified linear unit.
    Relu,
    /// Hyperbolic tangent.
    Tanh,
}

/// Fully-connected policy network architecture.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PolicyNetConfig {
    /// Hidden-layer widths, in order.
    pub fcnet_hiddens: Vec<i64>,

    /// Hidden-layer activation.
    pub fcnet_activation: Activation,
}

impl PolicyNetConfig {
    /// Creates an architecture spec.
    pub fn new(fcnet_hiddens: Vec<i64>, fcnet_activation: Activation) -> Self {
        Self {
            fcnet_hiddens,
            fcnet_activation,
        }
    }
}

impl Default for PolicyNetConfig {
    fn default() -> Self {
        Self {
            fcnet_hiddens: vec![256, 256],
            fcnet_activation: Activation::Relu,
        }
    }
}

/// PPO algorithm configuration.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PpoConfig {
    /// Discount factor, in (0, 1].
    pub gamma: f64,

    /// Learning rate.
    pub lr: f64,

    /// Piecewise learning-rate schedule as `(timestep, rate)` breakpoints
    /// with strictly increasing timesteps. When set, takes precedence over
    /// `lr` in the external optimizer.
    pub lr_schedule: Option<Vec<(u64, f64)>>,

    /// KL-divergence coefficient.
    pub kl_coeff: f64,

    /// PPO clip parameter.
    pub clip_param: f64,

    /// Entropy coefficient.
    pub entropy_coeff: f64,

    /// Use generalized advantage estimation.
    pub use_gae: bool,

    /// Experience gathered before each policy update, in environment steps.
    /// Derived by the builder when experience-collection constants are given.
    pub train_batch_size: usize,

    /// Policy network architecture.
    pub model: PolicyNetConfig,

    /// Shuffle sequences in the training batch.
    pub shuffle_sequences: bool,
}

impl Default for PpoConfig {
    fn default() -> Self {
        Self {
            gamma: 0.99,
            lr: 5e-5,
            lr_schedule: None,
            kl_coeff: 0.2,
            clip_param: 0.3,
            entropy_coeff: 0.0,
            use_gae: true,
            train_batch_size: 4000,
            model: PolicyNetConfig::default(),
            shuffle_sequences: true,
        }
    }
}

impl PpoConfig {
    /// Discount factor.
    pub fn discount_factor(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Learning rate.
    pub fn lr(mut self, v: f64) -> Self {
        self.lr = v;
        self
    }

    /// Learning-rate schedule.
    pub fn lr_schedule(mut self, schedule: Vec<(u64, f64)>) -> Self {
        self.lr_schedule = Some(schedule);
        self
    }

    /// KL-divergence coefficient.
    pub fn kl_coeff(mut self, v: f64) -> Self {
        self.kl_coeff = v;
        self
    }

    /// Clip parameter.
    pub fn clip_param(mut self, v: f64) -> Self {
        self.clip_param = v;
        self
    }

    /// Entropy coefficient.
    pub fn entropy_coeff(mut self, v: f64) -> Self {
        self.entropy_coeff = v;
        self
    }

    /// Whether to use generalized advantage estimation.
    pub fn use_gae(mut self, v: bool) -> Self {
        self.use_gae = v;
        self
    }

    /// Training batch size.
    ///
    /// Overridden by the builder when experience-collection constants are
    /// given; see [`TrainingConfigBuilder::collected_days`].
    ///
    /// [`TrainingConfigBuilder::collected_days`]: crate::TrainingConfigBuilder::collected_days
    pub fn train_batch_size(mut self, v: usize) -> Self {
        self.train_batch_size = v;
        self
    }

    /// Policy network architecture.
    pub fn model(mut self, model: PolicyNetConfig) -> Self {
        self.model = model;
        self
    }

    /// Whether to shuffle sequences in the training batch.
    pub fn shuffle_sequences(mut self, v: bool) -> Self {
        self.shuffle_sequences = v;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gamma > 0.0 && self.gamma <= 1.0) {
            return Err(ConfigError::BadDiscountFactor(self.gamma));
        }
        if let Some(schedule) = &self.lr_schedule {
            for (i, pair) in schedule.windows(2).enumerate() {
                if pair[1].0 <= pair[0].0 {
                    return Err(ConfigError::UnorderedLrSchedule(i + 1));
                }
            }
        }
        Ok(())
    }
}
