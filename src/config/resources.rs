//! Rollout-worker resource allocation.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Resources of the external trainer's rollout workers.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ResourceConfig {
    /// Parallel rollout workers.
    pub num_rollout_workers: usize,

    /// CPUs allocated to each rollout worker.
    pub num_cpus_per_worker: usize,

    /// GPUs allocated to the optimizer; may be zero or fractional.
    pub num_gpus: f64,

    /// Deduplicate identical log lines emitted by different workers.
    /// Consumed by the external trainer's startup routine.
    pub dedup_worker_logs: bool,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            num_rollout_workers: 2,
            num_cpus_per_worker: 1,
            num_gpus: 0.0,
            dedup_worker_logs: false,
        }
    }
}

impl ResourceConfig {
    /// Sets the rollout worker count.
    pub fn num_rollout_workers(mut self, v: usize) -> Self {
        self.num_rollout_workers = v;
        self
    }

    /// Sets the CPUs per rollout worker.
    pub fn num_cpus_per_worker(mut self, v: usize) -> Self {
        self.num_cpus_per_worker = v;
        self
    }

    /// Sets the GPU allocation.
    pub fn num_gpus(mut self, v: f64) -> Self {
        self.num_gpus = v;
        self
    }

    /// Sets worker log deduplication.
    pub fn dedup_worker_logs(mut self, v: bool) -> Self {
        self.dedup_worker_logs = v;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.num_rollout_workers == 0 {
            return Err(ConfigError::NonPositive {
                name: "num_rollout_workers",
                value: 0.0,
            });
        }
        if self.num_cpus_per_worker == 0 {
            return Err(ConfigError::NonPositive {
                name: "num_cpus_per_worker",
                value: 0.0,
            });
        }
        if self.num_gpus < 0.0 {
            return Err(ConfigError::Negative {
                name: "num_gpus",
                value: self.num_gpus,
            });
        }
        Ok(())
    }
}
