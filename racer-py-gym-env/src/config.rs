//! Configuration of [`GymEnv`](crate::GymEnv).
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Video recording of every episode with `gymnasium.wrappers.RecordVideo`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct VideoConfig {
    /// Where the videos are written.
    pub folder: PathBuf,

    /// Prefix of file names of the videos.
    pub name_prefix: String,
}

/// Configuration of [`GymEnv`](crate::GymEnv).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GymEnvConfig {
    /// Name of the environment, e.g., `CarRacing-v3`.
    pub name: String,

    /// Continuous control if `true`, discrete actions otherwise.
    pub continuous: bool,

    /// Render mode given to `gymnasium.make()`.
    pub render_mode: Option<String>,

    /// Episodes are truncated at this number of steps, in addition to the
    /// time limit of the environment itself.
    pub max_steps: Option<usize>,

    /// Video recording, if any.
    pub video: Option<VideoConfig>,
}

impl Default for GymEnvConfig {
    fn default() -> Self {
        Self {
            name: "CarRacing-v3".to_string(),
            continuous: true,
            render_mode: None,
            max_steps: None,
            video: None,
        }
    }
}

impl GymEnvConfig {
    /// Set the name of the environment.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set continuous or discrete control.
    pub fn continuous(mut self, v: bool) -> Self {
        self.continuous = v;
        self
    }

    /// Set the render mode.
    pub fn render_mode(mut self, render_mode: Option<String>) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Set the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Records every episode in `folder`.
    ///
    /// Frames are rendered as RGB arrays for the video writer, so the render mode
    /// is set to `rgb_array`.
    pub fn record_video(mut self, folder: impl Into<PathBuf>) -> Self {
        self.render_mode = Some("rgb_array".to_string());
        self.video = Some(VideoConfig {
            folder: folder.into(),
            name_prefix: "rl-video".to_string(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_video_sets_render_mode() {
        let config = GymEnvConfig::default().record_video("./video_output");
        assert_eq!(config.render_mode.as_deref(), Some("rgb_array"));
        assert_eq!(
            config.video.as_ref().map(|v| v.folder.clone()),
            Some(PathBuf::from("./video_output"))
        );
    }

    #[test]
    fn test_serde_gym_env_config() {
        let config = GymEnvConfig::default()
            .max_steps(Some(1000))
            .record_video("videos");
        let yaml = serde_yaml::to_string(&config).unwrap();
        let config_: GymEnvConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, config_);
    }
}
