//! A wrapper of [Gymnasium](https://gymnasium.farama.org) environments on Python.
//!
//! [`GymEnv`] bridges a Gymnasium environment through [`PyO3`](https://github.com/PyO3/pyo3).
//! It targets `CarRacing-v3` with continuous control: observations are RGB frames
//! converted to [`PixelObs`], and actions are `[steering, gas, brake]` vectors given as
//! [`ContinuousAct`].
//!
//! ## Video recording
//!
//! [`GymEnvConfig::record_video`] wraps the environment with
//! `gymnasium.wrappers.RecordVideo`, so that the selected episodes are written as
//! `.mp4` files in a folder. The video of an episode is finalized when the next
//! episode starts or when the environment is closed with [`Env::close`].
//!
//! [`Env::close`]: racer_core::Env::close
mod act;
mod base;
mod config;
mod obs;
pub mod util;
pub use act::ContinuousAct;
pub use base::{GymEnv, GymInfo};
pub use config::{GymEnvConfig, VideoConfig};
pub use obs::PixelObs;
