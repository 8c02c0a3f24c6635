//! Settings of training and evaluation on `CarRacing-v3`.
//!
//! All values are compile-time constants; the binaries take no arguments.
use anyhow::Result;
use racer_core::{util::with_thousands_sep, EvaluatorConfig, TrainerConfig};
use racer_py_gym_env::GymEnvConfig;
use racer_sb3_agent::PpoConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

pub const ENV_NAME: &str = "CarRacing-v3";
pub const TOTAL_TIMESTEPS: usize = 100_000;
pub const CHECKPOINT_FREQ: usize = 20_000;
pub const MODEL_NAME: &str = "car_racing_driver";

pub const POLICY: &str = "CnnPolicy";
pub const LEARNING_RATE: f64 = 0.0003;
pub const N_STEPS: usize = 2048;
pub const BATCH_SIZE: usize = 64;
pub const N_EPOCHS: usize = 10;

pub const CHECKPOINT_DIR: &str = "./checkpoints";
pub const LOG_DIR: &str = "./logs";
pub const MODEL_DIR: &str = "./models";
pub const VIDEO_DIR: &str = "./video_output";
pub const NUM_EPISODES: usize = 3;

/// Name of the file in [`MODEL_DIR`] where the settings of a training run are saved.
pub const TRAIN_CONFIG_FILE: &str = "train_config.yaml";

pub fn trainer_config() -> TrainerConfig {
    TrainerConfig::default()
        .total_timesteps(TOTAL_TIMESTEPS)
        .checkpoint_freq(CHECKPOINT_FREQ)
        .model_name(MODEL_NAME)
        .checkpoint_dir(CHECKPOINT_DIR)
        .log_dir(LOG_DIR)
        .model_dir(MODEL_DIR)
}

pub fn ppo_config() -> PpoConfig {
    PpoConfig::default()
        .policy(POLICY)
        .verbose(1)
        .tensorboard_log(Some(PathBuf::from(LOG_DIR)))
        .learning_rate(LEARNING_RATE)
        .n_steps(N_STEPS)
        .batch_size(BATCH_SIZE)
        .n_epochs(N_EPOCHS)
}

pub fn train_env_config() -> GymEnvConfig {
    GymEnvConfig::default().name(ENV_NAME).continuous(true)
}

/// The model is read from where training saves the final model.
pub fn evaluator_config() -> EvaluatorConfig {
    EvaluatorConfig::default()
        .model_path(trainer_config().final_model_path())
        .video_dir(VIDEO_DIR)
        .n_episodes(NUM_EPISODES)
}

/// Every episode of evaluation is recorded in the video directory.
pub fn eval_env_config(config: &EvaluatorConfig) -> GymEnvConfig {
    train_env_config().record_video(&config.video_dir)
}

/// Settings of a training run, saved next to the final model.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainSettings {
    pub trainer: TrainerConfig,
    pub env: GymEnvConfig,
    pub agent: PpoConfig,
}

impl Default for TrainSettings {
    fn default() -> Self {
        Self {
            trainer: trainer_config(),
            env: train_env_config(),
            agent: ppo_config(),
        }
    }
}

impl TrainSettings {
    /// Constructs [`TrainSettings`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainSettings`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Text shown before the learning loop starts.
pub fn banner(config: &TrainerConfig) -> String {
    let rule = "=".repeat(50);
    format!(
        "{rule}\nStart training!\n{rule}\n\
         Total timesteps: {}\n\
         Checkpoint frequency: every {} steps\n\n\
         Goal: once the score turns positive, the car has started driving!\n{rule}\n",
        with_thousands_sep(config.total_timesteps),
        with_thousands_sep(config.checkpoint_freq),
        rule = rule,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_banner_uses_thousands_separators() {
        let text = banner(&trainer_config());
        assert!(text.contains("Total timesteps: 100,000"));
        assert!(text.contains("every 20,000 steps"));
    }

    #[test]
    fn test_evaluation_reads_final_model() {
        let config = evaluator_config();
        assert_eq!(
            config.model_path,
            Path::new("./models/final_car_racing_driver")
        );
        assert_eq!(config.n_episodes, 3);

        let env_config = eval_env_config(&config);
        assert_eq!(env_config.render_mode.as_deref(), Some("rgb_array"));
        assert_eq!(env_config.name, "CarRacing-v3");
    }

    #[test]
    fn test_serde_train_settings() -> Result<()> {
        let dir = TempDir::new("train_settings")?;
        let path = dir.path().join(TRAIN_CONFIG_FILE);
        let settings = TrainSettings::default();
        settings.save(&path)?;
        assert_eq!(TrainSettings::load(&path)?, settings);
        Ok(())
    }
}
