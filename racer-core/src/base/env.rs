//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// The simulation itself is owned by an external library; implementors bridge
/// its `reset`/`step`/`close` calls.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    ///
    /// The seed is used at the first call of [`Env::reset`].
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation of a new episode.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step.
    ///
    /// The returned [`Record`] holds optional information emitted by the environment.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Releases resources held by the environment, e.g., video writers.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
