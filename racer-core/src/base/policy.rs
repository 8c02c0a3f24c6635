//! Policy.
use super::Env;
use anyhow::Result;

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy<E: Env> {
    /// Predicts an action given an observation.
    ///
    /// If `deterministic` is `true`, the action is selected without exploration noise.
    fn predict(&mut self, obs: &E::Obs, deterministic: bool) -> Result<E::Act>;
}
