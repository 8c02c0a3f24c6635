//! Configuration of the evaluation pipeline.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Configuration of the evaluation pipeline.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EvaluatorConfig {
    /// Path given to [`Agent::save`](crate::Agent::save) when the model was saved.
    pub model_path: PathBuf,

    /// Where videos of the episodes are written. Every episode is recorded.
    pub video_dir: PathBuf,

    /// The number of evaluation episodes.
    pub n_episodes: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/final_model"),
            video_dir: PathBuf::from("./video_output"),
            n_episodes: 3,
        }
    }
}

impl EvaluatorConfig {
    /// Sets the path of the model.
    pub fn model_path(mut self, v: impl Into<PathBuf>) -> Self {
        self.model_path = v.into();
        self
    }

    /// Sets the directory of videos.
    pub fn video_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.video_dir = v.into();
        self
    }

    /// Sets the number of episodes.
    pub fn n_episodes(mut self, v: usize) -> Self {
        self.n_episodes = v;
        self
    }

    /// Constructs [`EvaluatorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EvaluatorConfig`].
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
    fn test_serde_evaluator_config() -> Result<()> {
        let config = EvaluatorConfig::default()
            .model_path("models/final_driver")
            .n_episodes(5);

        let dir = TempDir::new("evaluator_config")?;
        let path = dir.path().join("evaluator_config.yaml");
        config.save(&path)?;
        assert_eq!(EvaluatorConfig::load(&path)?, config);
        Ok(())
    }
}
