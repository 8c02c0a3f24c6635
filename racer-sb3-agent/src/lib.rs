//! A PPO agent of [Stable-Baselines3](https://stable-baselines3.readthedocs.io) on Python.
//!
//! [`PpoAgent`] implements [`Agent`](racer_core::Agent) for
//! [`GymEnv`](racer_py_gym_env::GymEnv). The learning loop runs in the Python
//! interpreter; a `BaseCallback` subclass forwards every environment step to the
//! [`LearnCallback`](racer_core::LearnCallback) given to
//! [`Agent::learn`](racer_core::Agent::learn), which is how checkpoints are taken
//! from Rust.
//!
//! A `KeyboardInterrupt` raised in the learning loop ends it with
//! [`LearnOutcome::Interrupted`](racer_core::LearnOutcome::Interrupted) instead of
//! an error.
mod base;
mod config;
mod hook;
pub use base::PpoAgent;
pub use config::PpoConfig;
