//! Evaluate a trained [`Policy`](crate::Policy).
mod config;
mod rollout;
mod video;
use crate::{error::RacerError, Agent, Env};
use anyhow::Result;
pub use config::EvaluatorConfig;
use log::info;
pub use rollout::{EpisodeResult, Evaluator};
use std::path::Path;
pub use video::{VideoFile, VideoReport};

/// Loads an agent saved with [`Agent::save`].
///
/// Returns [`RacerError::ModelNotFound`] if nothing has been saved at `path`.
pub fn load_agent<E, A>(config: &A::Config, path: &Path) -> Result<A>
where
    E: Env,
    A: Agent<E>,
{
    let artifact = A::artifact_path(path);
    if !artifact.is_file() {
        return Err(RacerError::ModelNotFound(path.to_path_buf()).into());
    }
    let agent = A::load(config, path)?;
    info!("Loaded the model from {:?}", &artifact);
    Ok(agent)
}
