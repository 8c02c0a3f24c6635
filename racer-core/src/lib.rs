#![warn(missing_docs)]
//! Core functionalities for training and evaluating driving policies.
//!
//! The crate defines the capability interfaces of the external collaborators,
//! i.e., [`Env`], [`Policy`] and [`Agent`], and two drivers built on top of them:
//!
//! * [`Trainer`] runs the learning loop of an [`Agent`], writes checkpoints every
//!   `checkpoint_freq` environment steps and always saves the final model, even when
//!   the learning loop is interrupted.
//! * [`Evaluator`] runs deterministic rollouts of a trained [`Policy`] and
//!   collects an [`EpisodeResult`] for each episode.
//!
//! Concrete environments and agents live in other crates of the workspace.
//! The [`dummy`] module provides lightweight ones used in tests.
pub mod dummy;
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{
    Act, Agent, CallbackFlow, Env, Info, LearnCallback, LearnOutcome, Obs, Policy, Snapshot, Step,
};

mod trainer;
pub use trainer::{
    Checkpoint, CheckpointCallback, Interrupt, TrainReport, Trainer, TrainerConfig,
};

mod evaluator;
pub use evaluator::{
    load_agent, EpisodeResult, Evaluator, EvaluatorConfig, VideoFile, VideoReport,
};
