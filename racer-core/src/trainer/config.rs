//! Configuration of [`Trainer`](super::Trainer).
use crate::error::RacerError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The number of environment steps of the learning loop.
    pub total_timesteps: usize,

    /// Interval of saving checkpoints in environment steps.
    pub checkpoint_freq: usize,

    /// Name of the model, used as the prefix of saved files.
    pub model_name: String,

    /// Where to save checkpoints.
    pub checkpoint_dir: PathBuf,

    /// Where to write logs for monitoring tools.
    pub log_dir: PathBuf,

    /// Where to save the final model.
    pub model_dir: PathBuf,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            total_timesteps: 100_000,
            checkpoint_freq: 20_000,
            model_name: "model".to_string(),
            checkpoint_dir: PathBuf::from("./checkpoints"),
            log_dir: PathBuf::from("./logs"),
            model_dir: PathBuf::from("./models"),
        }
    }
}

impl TrainerConfig {
    /// Sets the number of environment steps.
    pub fn total_timesteps(mut self, v: usize) -> Self {
        self.total_timesteps = v;
        self
    }

    /// Sets the interval of saving checkpoints in environment steps.
    pub fn checkpoint_freq(mut self, v: usize) -> Self {
        self.checkpoint_freq = v;
        self
    }

    /// Sets the name of the model.
    pub fn model_name(mut self, v: impl Into<String>) -> Self {
        self.model_name = v.into();
        self
    }

    /// Sets the directory of checkpoints.
    pub fn checkpoint_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.checkpoint_dir = v.into();
        self
    }

    /// Sets the directory of logs.
    pub fn log_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.log_dir = v.into();
        self
    }

    /// Sets the directory of the final model.
    pub fn model_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.model_dir = v.into();
        self
    }

    /// Path of the final model, `(model_dir)/final_(model_name)`.
    pub fn final_model_path(&self) -> PathBuf {
        self.model_dir.join(format!("final_{}", self.model_name))
    }

    /// Path of the checkpoint at the given step, `(checkpoint_dir)/(model_name)_(steps)_steps`.
    pub fn checkpoint_path(&self, steps: usize) -> PathBuf {
        self.checkpoint_dir
            .join(format!("{}_{}_steps", self.model_name, steps))
    }

    /// Creates the checkpoint, log and model directories.
    ///
    /// Directories that already exist are left untouched.
    pub fn create_dirs(&self) -> Result<()> {
        for dir in [&self.checkpoint_dir, &self.log_dir, &self.model_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Checks the values of the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.checkpoint_freq == 0 {
            return Err(RacerError::InvalidConfig("checkpoint_freq must be positive".into()).into());
        }
        if self.model_name.is_empty() {
            return Err(RacerError::InvalidConfig("model_name must not be empty".into()).into());
        }
        Ok(())
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_trainer_config() -> Result<()> {
        let config = TrainerConfig::default()
            .total_timesteps(1000)
            .checkpoint_freq(100)
            .model_name("driver")
            .model_dir("some/directory");

        let dir = TempDir::new("trainer_config")?;
        let path = dir.path().join("trainer_config.yaml");
        config.save(&path)?;
        let config_ = TrainerConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_paths() {
        let config = TrainerConfig::default()
            .model_name("driver")
            .checkpoint_dir("ckpt")
            .model_dir("models");
        assert_eq!(config.final_model_path(), Path::new("models/final_driver"));
        assert_eq!(
            config.checkpoint_path(20000),
            Path::new("ckpt/driver_20000_steps")
        );
    }

    #[test]
    fn test_create_dirs_is_idempotent() -> Result<()> {
        let dir = TempDir::new("create_dirs")?;
        let config = TrainerConfig::default()
            .checkpoint_dir(dir.path().join("checkpoints"))
            .log_dir(dir.path().join("logs"))
            .model_dir(dir.path().join("models"));
        config.create_dirs()?;
        config.create_dirs()?;
        assert!(dir.path().join("checkpoints").is_dir());
        assert!(dir.path().join("logs").is_dir());
        assert!(dir.path().join("models").is_dir());
        Ok(())
    }

    #[test]
    fn test_zero_checkpoint_freq_is_rejected() {
        let config = TrainerConfig::default().checkpoint_freq(0);
        assert!(config.validate().is_err());
    }
}
