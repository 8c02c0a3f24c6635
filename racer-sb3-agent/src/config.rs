//! Configuration of [`PpoAgent`](crate::PpoAgent).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Hyperparameters of `stable_baselines3.PPO`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PpoConfig {
    /// Policy class, `CnnPolicy` for image observations.
    pub policy: String,

    /// Learning rate of the optimizer.
    pub learning_rate: f64,

    /// The number of steps collected per update.
    pub n_steps: usize,

    /// Minibatch size.
    pub batch_size: usize,

    /// The number of epochs per update.
    pub n_epochs: usize,

    /// Verbosity of the library, `1` prints training progress.
    pub verbose: usize,

    /// Where the library writes its TensorBoard logs.
    pub tensorboard_log: Option<PathBuf>,

    /// Name of the TensorBoard run.
    pub tb_log_name: String,

    /// Seed of the random number generators of the library.
    pub seed: Option<u64>,
}

impl Default for PpoConfig {
    fn default() -> Self {
        Self {
            policy: "CnnPolicy".to_string(),
            learning_rate: 0.0003,
            n_steps: 2048,
            batch_size: 64,
            n_epochs: 10,
            verbose: 1,
            tensorboard_log: None,
            tb_log_name: "PPO".to_string(),
            seed: None,
        }
    }
}

impl PpoConfig {
    /// Sets the policy class.
    pub fn policy(mut self, v: impl Into<String>) -> Self {
        self.policy = v.into();
        self
    }

    /// Sets the learning rate.
    pub fn learning_rate(mut self, v: f64) -> Self {
        self.learning_rate = v;
        self
    }

    /// Sets the number of steps per update.
    pub fn n_steps(mut self, v: usize) -> Self {
        self.n_steps = v;
        self
    }

    /// Sets the minibatch size.
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Sets the number of epochs per update.
    pub fn n_epochs(mut self, v: usize) -> Self {
        self.n_epochs = v;
        self
    }

    /// Sets the verbosity.
    pub fn verbose(mut self, v: usize) -> Self {
        self.verbose = v;
        self
    }

    /// Sets the directory of TensorBoard logs.
    pub fn tensorboard_log(mut self, v: Option<PathBuf>) -> Self {
        self.tensorboard_log = v;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: Option<u64>) -> Self {
        self.seed = v;
        self
    }

    /// Constructs [`PpoConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PpoConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
