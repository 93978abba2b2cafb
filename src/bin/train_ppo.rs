//! Assembles the PPO training job for the data-center environment and
//! prepares the hand-off to the external distributed trainer.
use anyhow::Result;
use clap::Parser;
use dcrl_launch::{
    prepare_run, Activation, AgentRole, EnvBackend, EnvConfig, PolicyNetConfig, PpoConfig,
    ResourceConfig, TrainingConfig,
};
use log::info;
use std::path::PathBuf;

// Data collection
const TIMESTEP_PER_HOUR: usize = 4;
const COLLECTED_DAYS: usize = 7;
const NUM_WORKERS: usize = 31;
const NUM_GPUS: f64 = 0.0;

/// Configure a PPO training run for data-center energy control.
#[derive(Parser, Debug)]
struct Args {
    /// Run name; results are written under the results directory by this name.
    #[arg(long, default_value = "test")]
    name: String,

    /// Directory for training results.
    #[arg(long, default_value = "./results")]
    results_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let env = EnvConfig::default()
        .agents(vec![
            AgentRole::LoadShifting,
            AgentRole::Hvac,
            AgentRole::Battery,
        ])
        .backend(EnvBackend::from_env())
        .location("ny")
        .cintensity_file("NYIS_NG_&_avgCI.csv")
        .weather_file("USA_NY_New.York-Kennedy.epw")
        .workload_file("Alibaba_CPU_Data_Hourly_1.csv")
        .max_bat_cap_mw(2.0)
        .individual_reward_weight(0.8)
        .flexible_load(0.1)
        .reward_method(AgentRole::LoadShifting, "default_ls_reward")
        .reward_method(AgentRole::Hvac, "default_dc_reward")
        .reward_method(AgentRole::Battery, "default_bat_reward");

    let ppo = PpoConfig::default()
        .discount_factor(0.99)
        .lr(1e-5)
        .lr_schedule(vec![(0, 3e-5), (10_000_000, 1e-6)])
        .kl_coeff(0.3)
        .clip_param(0.02)
        .entropy_coeff(0.05)
        .use_gae(true)
        .model(PolicyNetConfig::new(vec![128, 64, 16], Activation::Relu))
        .shuffle_sequences(true);

    let resources = ResourceConfig::default()
        .num_rollout_workers(NUM_WORKERS)
        .num_cpus_per_worker(1)
        .num_gpus(NUM_GPUS)
        .dedup_worker_logs(false);

    let config = TrainingConfig::builder()
        .env(env)
        .ppo(ppo)
        .resources(resources)
        .steps_per_hour(TIMESTEP_PER_HOUR)
        .collected_days(COLLECTED_DAYS)
        .build()?;

    info!(
        "PPO job on {:?} backend, {} workers, train batch size {}",
        config.env.backend, config.resources.num_rollout_workers, config.ppo.train_batch_size
    );

    let run_dir = prepare_run(&config, &args.results_dir, &args.name)?;
    info!(
        "Job description written to {}; the external PPO trainer picks it up from there",
        run_dir.display()
    );
    Ok(())
}
