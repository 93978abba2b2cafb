//! Boundary to the external distributed trainer.
//!
//! The actual optimization loop, rollout-worker scheduling and environment
//! simulation live outside this crate. This module defines the interface
//! they present, and the launch-side work performed before hand-off:
//! creating the run directory and persisting the job description into it.
use crate::TrainingConfig;
use anyhow::Result;
use log::info;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Hooks the external trainer invokes during a run.
///
/// All methods default to no-ops. Implementations are registered with the
/// backend at its construction; the `train` entry point itself takes none.
pub trait Callback {
    /// Called when a simulated episode ends.
    fn on_episode_end(&mut self, _episode: usize) {}

    /// Called after each training iteration.
    fn on_train_result(&mut self, _iteration: usize) {}
}

/// The external distributed trainer.
///
/// Implementations wrap the environment runtime and the optimizer. Failures
/// past the hand-off (worker startup, resource allocation) propagate
/// unmodified through [`launch`].
pub trait TrainingBackend {
    /// Runs distributed training, writing results under `results_dir/name`.
    fn train(
        &mut self,
        algorithm: &str,
        config: &TrainingConfig,
        results_dir: &Path,
        name: &str,
    ) -> Result<()>;
}

/// Creates the run directory `results_dir/name` and persists the job
/// description into it as `config.yaml`. Returns the run directory.
pub fn prepare_run(
    config: &TrainingConfig,
    results_dir: impl AsRef<Path>,
    name: &str,
) -> Result<PathBuf> {
    let run_dir = results_dir.as_ref().join(name);
    fs::create_dir_all(&run_dir)?;
    config.save(run_dir.join("config.yaml"))?;
    info!("Prepared run directory {}", run_dir.display());
    Ok(run_dir)
}

/// Prepares the run directory and hands the job to the backend.
pub fn launch<B: TrainingBackend>(
    backend: &mut B,
    algorithm: &str,
    config: &TrainingConfig,
    results_dir: impl AsRef<Path>,
    name: &str,
) -> Result<()> {
    let results_dir = results_dir.as_ref();
    prepare_run(config, results_dir, name)?;
    info!("Launching {} run '{}'", algorithm, name);
    backend.train(algorithm, config, results_dir, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    struct RecordingBackend {
        calls: Vec<(String, TrainingConfig, PathBuf, String)>,
    }

    impl TrainingBackend for RecordingBackend {
        fn train(
            &mut self,
            algorithm: &str,
            config: &TrainingConfig,
            results_dir: &Path,
            name: &str,
        ) -> Result<()> {
            self.calls.push((
                algorithm.to_string(),
                config.clone(),
                results_dir.to_owned(),
                name.to_string(),
            ));
            Ok(())
        }
    }

    #[test]
    fn launch_persists_config_then_calls_backend() -> Result<()> {
        let config = TrainingConfig::builder().build()?;
        let dir = TempDir::new("launch")?;
        let mut backend = RecordingBackend { calls: vec![] };

        launch(&mut backend, "PPO", &config, dir.path(), "test")?;

        let saved = TrainingConfig::load(dir.path().join("test").join("config.yaml"))?;
        assert_eq!(saved, config);

        assert_eq!(backend.calls.len(), 1);
        let (algorithm, passed, results_dir, name) = &backend.calls[0];
        assert_eq!(algorithm, "PPO");
        assert_eq!(passed, &config);
        assert_eq!(results_dir, dir.path());
        assert_eq!(name, "test");
        Ok(())
    }

    #[test]
    fn callback_hooks_default_to_noops() {
        struct Progress {
            iterations: usize,
        }
        impl Callback for Progress {
            fn on_train_result(&mut self, _iteration: usize) {
                self.iterations += 1;
            }
        }

        let mut cb = Progress { iterations: 0 };
        cb.on_episode_end(0);
        cb.on_train_result(0);
        assert_eq!(cb.iterations, 1);
    }

    #[test]
    fn prepare_run_returns_run_dir() -> Result<()> {
        let config = TrainingConfig::builder().build()?;
        let dir = TempDir::new("prepare_run")?;

        let run_dir = prepare_run(&config, dir.path(), "job")?;
        assert_eq!(run_dir, dir.path().join("job"));
        assert!(run_dir.join("config.yaml").is_file());
        Ok(())
    }
}
