//! Agent.
use super::{Env, Policy};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Something whose current state can be written to disk.
///
/// During learning, the state of an agent may live outside of the agent object
/// (e.g., in a Python interpreter), so [`LearnCallback`] receives a [`Snapshot`]
/// instead of the agent itself.
pub trait Snapshot {
    /// Saves the current state to `path`.
    fn save_snapshot(&self, path: &Path) -> Result<()>;
}

/// Tells the learning loop whether to continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackFlow {
    /// Continue learning.
    Continue,

    /// Stop learning as soon as possible.
    Stop,
}

/// Called by [`Agent::learn`] after every environment step.
pub trait LearnCallback {
    /// Called after an environment step.
    ///
    /// `num_timesteps` is the number of environment steps done so far, starting from 1.
    fn on_step(&mut self, num_timesteps: usize, snapshot: &dyn Snapshot) -> Result<CallbackFlow>;
}

/// How a call of [`Agent::learn`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnOutcome {
    /// The step budget was consumed.
    Completed,

    /// Learning was interrupted by the user or stopped by the callback.
    Interrupted,
}

/// Represents a trainable policy on an environment.
///
/// The learning algorithm is owned by an external library. An [`Agent`] is bound to
/// an environment when built and runs the whole learning loop in [`Agent::learn`].
pub trait Agent<E: Env>: Policy<E> + Snapshot {
    /// Configuration of the agent, e.g., hyperparameters.
    type Config: Clone;

    /// Builds a fresh agent bound to the given environment.
    fn build(config: &Self::Config, env: &E) -> Result<Self>
    where
        Self: Sized;

    /// Runs the learning loop for `total_timesteps` environment steps.
    ///
    /// A user interrupt during the loop is not an error: it ends the loop with
    /// [`LearnOutcome::Interrupted`]. The same holds when `callback` returns
    /// [`CallbackFlow::Stop`].
    fn learn(
        &mut self,
        total_timesteps: usize,
        callback: Box<dyn LearnCallback>,
    ) -> Result<LearnOutcome>;

    /// Saves the agent to `path`.
    fn save(&self, path: &Path) -> Result<()>;

    /// Loads an agent saved with [`Agent::save`].
    fn load(config: &Self::Config, path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Returns the file actually written by [`Agent::save`] for the given `path`.
    ///
    /// Some libraries append an extension to the path given to their save function.
    fn artifact_path(path: &Path) -> PathBuf
    where
        Self: Sized,
    {
        path.to_path_buf()
    }
}
