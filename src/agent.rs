//! Controllable agent roles and the safe-fallback contract.
//!
//! Every controllable sub-agent of the data center must be able to produce a
//! deterministic "do nothing" action: hold the current load plan, hold the
//! cooling setpoint, neither charge nor discharge. The environment runtime
//! applies it whenever a role's learned policy is inactive or a safety
//! override is in effect. The code is a fixed property of the role, not a
//! learned behavior.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Discrete action code within a role's action space.
///
/// Codes are role-local: the same integer means different things for
/// different roles and must never be reinterpreted across them.
pub type FallbackAction = i64;

/// Role-specific tuning parameters, owned by the agent and never interpreted
/// by this crate.
pub type AgentParameters = BTreeMap<String, serde_yaml::Value>;

/// The controllable agent roles recognized by the environment.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgentRole {
    /// Shifts flexible compute load in time.
    #[serde(rename = "agent_ls")]
    LoadShifting,

    /// Controls the cooling setpoint.
    #[serde(rename = "agent_dc")]
    Hvac,

    /// Charges and discharges the battery.
    #[serde(rename = "agent_bat")]
    Battery,
}

impl AgentRole {
    /// All roles, in the order the environment lists them.
    pub const ALL: [AgentRole; 3] = [
        AgentRole::LoadShifting,
        AgentRole::Hvac,
        AgentRole::Battery,
    ];

    /// Role identifier used by the environment.
    pub fn id(&self) -> &'static str {
        match self {
            AgentRole::LoadShifting => "agent_ls",
            AgentRole::Hvac => "agent_dc",
            AgentRole::Battery => "agent_bat",
        }
    }

    /// The safe do-nothing action code for this role.
    ///
    /// Indices into each role's discrete action space in the environment.
    pub fn fallback_action(&self) -> FallbackAction {
        match self {
            AgentRole::LoadShifting => 1,
            AgentRole::Hvac => 4,
            AgentRole::Battery => 2,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A controllable agent bound to a role.
///
/// `do_nothing_action` is total and deterministic: it always returns the
/// role's fixed code, on every call, regardless of agent state.
pub trait ControlAgent {
    /// The role this agent controls.
    fn role(&self) -> AgentRole;

    /// Returns the safe do-nothing action for this agent's role.
    fn do_nothing_action(&self) -> FallbackAction {
        self.role().fallback_action()
    }
}

/// Minimal agent holding a role and an opaque parameters blob.
///
/// Serves as the base for concrete agent implementations and stands in for a
/// role whose learned policy is not attached. Construction never fails.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseAgent {
    role: AgentRole,
    parameters: Option<AgentParameters>,
}

impl BaseAgent {
    /// Creates an agent for the given role.
    pub fn new(role: AgentRole, parameters: Option<AgentParameters>) -> Self {
        Self { role, parameters }
    }

    /// The parameters blob passed at construction, unmodified.
    pub fn parameters(&self) -> Option<&AgentParameters> {
        self.parameters.as_ref()
    }
}

impl ControlAgent for BaseAgent {
    fn role(&self) -> AgentRole {
        self.role
    }
}
