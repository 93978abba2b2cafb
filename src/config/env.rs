//! Environment-side configuration of a training job.
use crate::error::ConfigError;
use crate::AgentRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which environment implementation backs the training run.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum EnvBackend {
    /// Model-based data-center simulator.
    Simulation,

    /// Higher-fidelity EnergyPlus-backed environment.
    EnergyPlus,
}

impl EnvBackend {
    /// Selects the backend from the optional `EPLUS` process environment
    /// variable; presence selects the EnergyPlus variant.
    ///
    /// Whether the selected variant is actually available in the deployment
    /// is checked later by the external environment factory.
    pub fn from_env() -> Self {
        match std::env::var_os("EPLUS") {
            Some(_) => EnvBackend::EnergyPlus,
            None => EnvBackend::Simulation,
        }
    }
}

impl Default for EnvBackend {
    fn default() -> Self {
        EnvBackend::Simulation
    }
}

/// Configuration of the data-center environment.
///
/// Defaults reproduce the New York reference site.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EnvConfig {
    /// Active agent roster, in environment order.
    pub agents: Vec<AgentRole>,

    /// Environment implementation to instantiate.
    pub backend: EnvBackend,

    /// Site identifier, selects location-dependent model constants.
    pub location: String,

    /// Grid carbon-intensity trace.
    pub cintensity_file: String,

    /// Weather trace in EPW format.
    pub weather_file: String,

    /// Data-center workload trace.
    pub workload_file: String,

    /// Battery capacity in MW.
    pub max_bat_cap_mw: f64,

    /// Weight of the individual term against the collaborative term in each
    /// agent's reward, in [0, 1].
    pub individual_reward_weight: f64,

    /// Fraction of the workload that can be shifted in time, in [0, 1].
    pub flexible_load: f64,

    /// Reward method per active role; the key set must equal the roster.
    pub reward_methods: BTreeMap<AgentRole, String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        let mut reward_methods = BTreeMap::new();
        reward_methods.insert(AgentRole::LoadShifting, "default_ls_reward".to_string());
        reward_methods.insert(AgentRole::Hvac, "default_dc_reward".to_string());
        reward_methods.insert(AgentRole::Battery, "default_bat_reward".to_string());

        Self {
            agents: AgentRole::ALL.to_vec(),
            backend: EnvBackend::default(),
            location: "ny".to_string(),
            cintensity_file: "NYIS_NG_&_avgCI.csv".to_string(),
            weather_file: "USA_NY_New.York-Kennedy.epw".to_string(),
            workload_file: "Alibaba_CPU_Data_Hourly_1.csv".to_string(),
            max_bat_cap_mw: 2.0,
            individual_reward_weight: 0.8,
            flexible_load: 0.1,
            reward_methods,
        }
    }
}

impl EnvConfig {
    /// Sets the active agent roster.
    ///
    /// Replaces the reward-method map with the default selector of each
    /// listed role; override with [`EnvConfig::reward_method`] afterwards.
    pub fn agents(mut self, agents: Vec<AgentRole>) -> Self {
        self.reward_methods = agents
            .iter()
            .map(|role| (*role, default_reward_method(*role).to_string()))
            .collect();
        self.agents = agents;
        self
    }

    /// Sets the environment implementation.
    pub fn backend(mut self, backend: EnvBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the site identifier.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the carbon-intensity trace file.
    pub fn cintensity_file(mut self, file: impl Into<String>) -> Self {
        self.cintensity_file = file.into();
        self
    }

    /// Sets the weather trace file.
    pub fn weather_file(mut self, file: impl Into<String>) -> Self {
        self.weather_file = file.into();
        self
    }

    /// Sets the workload trace file.
    pub fn workload_file(mut self, file: impl Into<String>) -> Self {
        self.workload_file = file.into();
        self
    }

    /// Sets the battery capacity in MW.
    pub fn max_bat_cap_mw(mut self, v: f64) -> Self {
        self.max_bat_cap_mw = v;
        self
    }

    /// Sets the individual reward weight.
    pub fn individual_reward_weight(mut self, v: f64) -> Self {
        self.individual_reward_weight = v;
        self
    }

    /// Sets the flexible load ratio.
    pub fn flexible_load(mut self, v: f64) -> Self {
        self.flexible_load = v;
        self
    }

    /// Sets the reward method for one role.
    pub fn reward_method(mut self, role: AgentRole, method: impl Into<String>) -> Self {
        self.reward_methods.insert(role, method.into());
        self
    }

    /// Replaces the whole reward-method map.
    pub fn reward_methods(mut self, methods: BTreeMap<AgentRole, String>) -> Self {
        self.reward_methods = methods;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.agents.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for (i, role) in self.agents.iter().enumerate() {
            if self.agents[..i].contains(role) {
                return Err(ConfigError::DuplicateRole(*role));
            }
        }
        for role in &self.agents {
            if !self.reward_methods.contains_key(role) {
                return Err(ConfigError::MissingRewardMethod(*role));
            }
        }
        for role in self.reward_methods.keys() {
            if !self.agents.contains(role) {
                return Err(ConfigError::OrphanRewardMethod(*role));
            }
        }
        if !(self.max_bat_cap_mw > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "max_bat_cap_mw",
                value: self.max_bat_cap_mw,
            });
        }
        check_unit_interval("individual_reward_weight", self.individual_reward_weight)?;
        check_unit_interval("flexible_load", self.flexible_load)?;
        Ok(())
    }
}

fn default_reward_method(role: AgentRole) -> &'static str {
    match role {
        AgentRole::LoadShifting => "default_ls_reward",
        AgentRole::Hvac => "default_dc_reward",
        AgentRole::Battery => "default_bat_reward",
    }
}

// Closed interval on both ends.
fn check_unit_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::WeightOutOfRange { name, value })
    }
}
