#![warn(missing_docs)]
//! Configuration and launch layer for multi-agent reinforcement-learning
//! control of data-center energy systems.
//!
//! Three sub-agents are controlled simultaneously: load shifting, HVAC and
//! battery dispatch. This crate defines the contract those agents satisfy,
//! most importantly the deterministic safe-fallback (do-nothing) action per
//! role, and assembles a validated, immutable [`TrainingConfig`] consumed by
//! an external distributed PPO trainer. The environment simulation, reward
//! computation and the optimizer itself live behind the [`TrainingBackend`]
//! boundary.
pub mod error;

mod agent;
pub use agent::{AgentParameters, AgentRole, BaseAgent, ControlAgent, FallbackAction};

mod config;
pub use config::{
    train_batch_size, Activation, EnvBackend, EnvConfig, PolicyNetConfig, PpoConfig,
    ResourceConfig, TrainingConfig, TrainingConfigBuilder, HOURS_PER_DAY,
};

mod trainer;
pub use trainer::{launch, prepare_run, Callback, TrainingBackend};
