//! Training-job configuration.
//!
//! A [`TrainingConfig`] is assembled once through [`TrainingConfigBuilder`],
//! validated, and then handed by reference to the external trainer. It is
//! never mutated afterwards.
mod env;
mod ppo;
mod resources;

pub use env::{EnvBackend, EnvConfig};
pub use ppo::{Activation, PolicyNetConfig, PpoConfig};
pub use resources::ResourceConfig;

use crate::error::ConfigError;
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Hours per simulated day in the environment's clock.
pub const HOURS_PER_DAY: usize = 24;

/// Experience gathered per training iteration, in environment steps.
///
/// All five factors are required; the product couples rollout parallelism to
/// the optimizer's batch size. `steps_per_hour` is taken at face value and
/// not checked against the environment's actual decision frequency.
pub fn train_batch_size(
    steps_per_hour: usize,
    collected_days: usize,
    num_workers: usize,
    num_agents: usize,
) -> usize {
    steps_per_hour * HOURS_PER_DAY * collected_days * num_workers * num_agents
}

/// A validated, immutable training-job description.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TrainingConfig {
    /// Environment parameters.
    pub env: EnvConfig,

    /// PPO hyperparameters.
    pub ppo: PpoConfig,

    /// Rollout-worker resources.
    pub resources: ResourceConfig,
}

impl TrainingConfig {
    /// Starts assembling a configuration.
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::default()
    }

    /// Constructs [`TrainingConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(rdr)?;
        config.validate()?;
        info!("Load training config from {}", path_.display());
        Ok(config)
    }

    /// Saves [`TrainingConfig`] as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save training config into {}", path_.display());
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.env.validate()?;
        self.ppo.validate()?;
        self.resources.validate()?;
        Ok(())
    }
}

/// Assembles a [`TrainingConfig`] from its three partitions plus the
/// experience-collection constants, then validates the whole.
///
/// Build-time checks: non-empty duplicate-free roster, reward-method keys
/// equal to the roster set, strictly increasing learning-rate schedule,
/// weights and ratios in [0, 1], positive capacity, discount factor in
/// (0, 1], at least one worker and one CPU per worker, non-negative GPUs.
/// A failed build produces no configuration and touches no resources.
#[derive(Clone, Debug, Default)]
pub struct TrainingConfigBuilder {
    env: EnvConfig,
    ppo: PpoConfig,
    resources: ResourceConfig,
    steps_per_hour: Option<usize>,
    collected_days: Option<usize>,
}

impl TrainingConfigBuilder {
    /// Environment parameters.
    pub fn env(mut self, env: EnvConfig) -> Self {
        self.env = env;
        self
    }

    /// PPO hyperparameters.
    pub fn ppo(mut self, ppo: PpoConfig) -> Self {
        self.ppo = ppo;
        self
    }

    /// Rollout-worker resources.
    pub fn resources(mut self, resources: ResourceConfig) -> Self {
        self.resources = resources;
        self
    }

    /// Environment decision frequency in steps per hour. Defaults to 4.
    pub fn steps_per_hour(mut self, v: usize) -> Self {
        self.steps_per_hour = Some(v);
        self
    }

    /// Simulated days of experience collected per training iteration.
    ///
    /// When set, the training batch size is derived at build time as
    /// `steps_per_hour * 24 * collected_days * num_workers * num_agents`,
    /// overriding any value set on [`PpoConfig`]. When unset, the
    /// [`PpoConfig`] value is kept as given.
    pub fn collected_days(mut self, v: usize) -> Self {
        self.collected_days = Some(v);
        self
    }

    /// Validates and produces the immutable configuration.
    pub fn build(self) -> Result<TrainingConfig, ConfigError> {
        let TrainingConfigBuilder {
            env,
            mut ppo,
            resources,
            steps_per_hour,
            collected_days,
        } = self;

        env.validate()?;
        ppo.validate()?;
        resources.validate()?;

        let steps_per_hour = steps_per_hour.unwrap_or(4);
        if steps_per_hour == 0 {
            return Err(ConfigError::NonPositive {
                name: "steps_per_hour",
                value: 0.0,
            });
        }
        if let Some(days) = collected_days {
            if days == 0 {
                return Err(ConfigError::NonPositive {
                    name: "collected_days",
                    value: 0.0,
                });
            }
            ppo.train_batch_size = train_batch_size(
                steps_per_hour,
                days,
                resources.num_rollout_workers,
                env.agents.len(),
            );
        }

        Ok(TrainingConfig {
            env,
            ppo,
            resources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AgentRole;

    fn builder() -> TrainingConfigBuilder {
        TrainingConfig::builder()
    }

    #[test]
    fn default_partitions_build() {
        assert!(builder().build().is_ok());
    }

    #[test]
    fn empty_roster_is_rejected() {
        let env = EnvConfig::default().agents(vec![]);
        match builder().env(env).build() {
            Err(ConfigError::EmptyRoster) => {}
            other => panic!("expected EmptyRoster, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn duplicate_role_is_rejected() {
        let env = EnvConfig::default().agents(vec![AgentRole::Battery, AgentRole::Battery]);
        match builder().env(env).build() {
            Err(ConfigError::DuplicateRole(AgentRole::Battery)) => {}
            other => panic!("expected DuplicateRole, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_reward_method_is_rejected() {
        // Roster {LoadShifting, Battery} with a selector only for LoadShifting.
        let env = EnvConfig::default()
            .agents(vec![AgentRole::LoadShifting, AgentRole::Battery])
            .reward_methods(
                vec![(AgentRole::LoadShifting, "x".to_string())]
                    .into_iter()
                    .collect(),
            );
        match builder().env(env).build() {
            Err(ConfigError::MissingRewardMethod(AgentRole::Battery)) => {}
            other => panic!("expected MissingRewardMethod, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn orphan_reward_method_is_rejected() {
        let env = EnvConfig::default()
            .agents(vec![AgentRole::LoadShifting])
            .reward_method(AgentRole::Hvac, "default_dc_reward");
        match builder().env(env).build() {
            Err(ConfigError::OrphanRewardMethod(AgentRole::Hvac)) => {}
            other => panic!("expected OrphanRewardMethod, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn matching_selector_sets_build() {
        let env = EnvConfig::default().agents(vec![AgentRole::LoadShifting, AgentRole::Battery]);
        let config = builder().env(env).build().unwrap();
        assert_eq!(config.env.agents.len(), 2);
        assert_eq!(config.env.reward_methods.len(), 2);
    }

    #[test]
    fn batch_size_formula() {
        assert_eq!(train_batch_size(4, 7, 31, 3), 62_496);
    }

    #[test]
    fn batch_size_is_derived_at_build() {
        let config = builder()
            .resources(ResourceConfig::default().num_rollout_workers(31))
            .steps_per_hour(4)
            .collected_days(7)
            .build()
            .unwrap();
        assert_eq!(config.ppo.train_batch_size, 62_496);
    }

    #[test]
    fn batch_size_untouched_without_collection_constants() {
        let config = builder()
            .ppo(PpoConfig::default().train_batch_size(1234))
            .build()
            .unwrap();
        assert_eq!(config.ppo.train_batch_size, 1234);
    }

    #[test]
    fn increasing_lr_schedule_is_accepted() {
        let ppo = PpoConfig::default().lr_schedule(vec![(0, 3e-5), (10_000_000, 1e-6)]);
        assert!(builder().ppo(ppo).build().is_ok());
    }

    #[test]
    fn non_increasing_lr_schedule_is_rejected() {
        let ppo = PpoConfig::default().lr_schedule(vec![(0, 3e-5), (0, 1e-6)]);
        match builder().ppo(ppo).build() {
            Err(ConfigError::UnorderedLrSchedule(1)) => {}
            other => panic!("expected UnorderedLrSchedule, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn zero_battery_capacity_is_rejected() {
        let env = EnvConfig::default().max_bat_cap_mw(0.0);
        match builder().env(env).build() {
            Err(ConfigError::NonPositive { name, .. }) => assert_eq!(name, "max_bat_cap_mw"),
            other => panic!("expected NonPositive, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn reward_weight_interval_is_closed() {
        for v in [0.0, 1.0].iter() {
            let env = EnvConfig::default().individual_reward_weight(*v);
            assert!(builder().env(env).build().is_ok());
        }
        let env = EnvConfig::default().individual_reward_weight(1.1);
        assert!(builder().env(env).build().is_err());
    }

    #[test]
    fn out_of_range_discount_factor_is_rejected() {
        for gamma in [0.0, 1.5].iter() {
            let ppo = PpoConfig::default().discount_factor(*gamma);
            match builder().ppo(ppo).build() {
                Err(ConfigError::BadDiscountFactor(_)) => {}
                other => panic!("expected BadDiscountFactor, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn zero_workers_is_rejected() {
        let resources = ResourceConfig::default().num_rollout_workers(0);
        assert!(builder().resources(resources).build().is_err());
    }

    #[test]
    fn negative_gpus_is_rejected() {
        let resources = ResourceConfig::default().num_gpus(-1.0);
        match builder().resources(resources).build() {
            Err(ConfigError::Negative { name, .. }) => assert_eq!(name, "num_gpus"),
            other => panic!("expected Negative, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn build_is_pure_given_identical_inputs() {
        let make = || {
            builder()
                .env(EnvConfig::default().backend(EnvBackend::EnergyPlus))
                .ppo(PpoConfig::default().lr(1e-5).kl_coeff(0.3))
                .resources(ResourceConfig::default().num_rollout_workers(31))
                .steps_per_hour(4)
                .collected_days(7)
                .build()
                .unwrap()
        };
        assert_eq!(make(), make());
    }
}
