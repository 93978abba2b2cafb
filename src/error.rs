//! Errors in the library.
use crate::AgentRole;
use thiserror::Error;

/// Errors detected while assembling a training configuration.
///
/// All variants are raised synchronously at build time, before any trainer
/// resource is allocated. Either a complete valid [`TrainingConfig`] is
/// produced or none is; the caller can fix the inputs and rebuild.
///
/// [`TrainingConfig`]: crate::TrainingConfig
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The active agent roster is empty.
    #[error("active agent roster is empty")]
    EmptyRoster,

    /// A role appears more than once in the roster.
    #[error("duplicate role in roster: {0}")]
    DuplicateRole(AgentRole),

    /// An active role has no reward method selector.
    #[error("no reward method for active role: {0}")]
    MissingRewardMethod(AgentRole),

    /// A reward method selector names a role absent from the roster.
    #[error("reward method given for inactive role: {0}")]
    OrphanRewardMethod(AgentRole),

    /// Learning-rate schedule timesteps must be strictly increasing.
    #[error("learning-rate schedule timesteps not strictly increasing at breakpoint {0}")]
    UnorderedLrSchedule(usize),

    /// A weight or ratio lies outside the closed interval [0, 1].
    #[error("{name} must lie in [0, 1], got {value}")]
    WeightOutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// Value given.
        value: f64,
    },

    /// A capacity or count that must be positive is not.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending parameter.
        name: &'static str,
        /// Value given.
        value: f64,
    },

    /// An allocation that may be zero but not negative is negative.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Name of the offending parameter.
        name: &'static str,
        /// Value given.
        value: f64,
    },

    /// Discount factor must lie in (0, 1].
    #[error("discount factor must lie in (0, 1], got {0}")]
    BadDiscountFactor(f64),
}
