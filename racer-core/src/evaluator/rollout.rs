//! Deterministic rollouts of a policy.
use crate::{Env, Policy};
use anyhow::Result;
use log::{info, trace};
use std::fmt;

/// Result of an evaluation episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeResult {
    /// The number of [`Env::step`] calls in the episode.
    pub steps: usize,

    /// Sum of the rewards in the episode.
    pub total_reward: f32,
}

impl fmt::Display for EpisodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "steps: {}, score: {:.2}", self.steps, self.total_reward)
    }
}

/// Runs a fixed number of episodes with deterministic actions.
///
/// Episodes are independent: only the policy and the environment are shared.
pub struct Evaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> {
    /// Constructs a new [`Evaluator`].
    ///
    /// The environment is typically built with a recording wrapper, so that every
    /// episode is captured to a video file.
    pub fn new(env: E, n_episodes: usize) -> Self {
        Self { n_episodes, env }
    }

    /// Runs the episodes and returns the result of each episode.
    pub fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<Vec<EpisodeResult>> {
        self.evaluate_with_progress(policy, |_, _| {})
    }

    /// Runs the episodes, calling `progress` with the index (starting from 0) and the
    /// result of each episode as soon as it ends.
    pub fn evaluate_with_progress<P, F>(
        &mut self,
        policy: &mut P,
        mut progress: F,
    ) -> Result<Vec<EpisodeResult>>
    where
        P: Policy<E>,
        F: FnMut(usize, &EpisodeResult),
    {
        let mut results = Vec::with_capacity(self.n_episodes);

        for ix in 0..self.n_episodes {
            info!("Episode {}/{}", ix + 1, self.n_episodes);
            let result = self.run_episode(policy)?;
            info!("Episode {} ended, {}", ix + 1, result);
            progress(ix, &result);
            results.push(result);
        }

        Ok(results)
    }

    fn run_episode<P: Policy<E>>(&mut self, policy: &mut P) -> Result<EpisodeResult> {
        let mut obs = self.env.reset()?;
        let mut steps = 0;
        let mut total_reward = 0f32;

        loop {
            let act = policy.predict(&obs, true)?;
            let (step, _) = self.env.step(&act)?;
            trace!("step {}, reward {}", steps, step.reward);
            total_reward += step.reward;
            steps += 1;
            if step.is_done() {
                break;
            }
            obs = step.obs;
        }

        Ok(EpisodeResult {
            steps,
            total_reward,
        })
    }

    /// Closes the environment, e.g., to finalize the video of the last episode.
    pub fn close(mut self) -> Result<()> {
        self.env.close()
    }
}
