//! Train [`Agent`].
mod checkpoint;
mod config;
mod interrupt;
use crate::{
    record::{Record, RecordValue, Recorder},
    Agent, Env, LearnOutcome,
};
use anyhow::Result;
use chrono::Local;
pub use checkpoint::{Checkpoint, CheckpointCallback};
pub use config::TrainerConfig;
pub use interrupt::Interrupt;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Summary of a call of [`Trainer::train`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// How the learning loop ended.
    pub outcome: LearnOutcome,

    /// Checkpoints written during the learning loop, in order.
    pub checkpoints: Vec<PathBuf>,

    /// The path given to [`Agent::save`] for the final model.
    pub final_model: PathBuf,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training pipeline.
///
/// # Training pipeline
///
/// ```mermaid
/// graph LR
///     A[Env::build]-->B[Agent::build]
///     B-->C[Agent::learn]
///     C-->|every checkpoint_freq steps|D[checkpoint_dir]
///     C-->|completed or interrupted|E["model_dir/final_(model_name)"]
/// ```
///
/// 1. The checkpoint, log and model directories are created if missing.
/// 2. The environment is built, then the agent bound to it. Failures here abort
///    training before the learning loop starts.
/// 3. [`Agent::learn`] runs `total_timesteps` environment steps with a
///    [`CheckpointCallback`], which saves a snapshot every `checkpoint_freq` steps in
///    `(checkpoint_dir)/(model_name)_(steps)_steps`.
/// 4. Whether learning completed or was interrupted, the final model is saved in
///    `(model_dir)/final_(model_name)` and the environment is closed.
pub struct Trainer {
    config: TrainerConfig,
    interrupt: Interrupt,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self {
            config,
            interrupt: Interrupt::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Returns a handle which stops the learning loop when triggered.
    pub fn interrupt(&self) -> Interrupt {
        self.interrupt.clone()
    }

    fn save_model<E: Env, A: Agent<E>>(
        agent: &A,
        path: &Path,
        steps: Option<usize>,
        recorder: &mut dyn Recorder,
    ) -> Result<()> {
        agent.save(path)?;
        info!("Saved the model in {:?}", path);

        let mut record = Record::from_slice(&[
            ("final_model", RecordValue::String(path.display().to_string())),
            ("saved_at", RecordValue::DateTime(Local::now())),
        ]);
        if let Some(steps) = steps {
            record.insert("env_steps", RecordValue::Scalar(steps as f32));
        }
        recorder.write(record);
        Ok(())
    }

    fn record_checkpoints(checkpoints: &[Checkpoint], recorder: &mut dyn Recorder) {
        for (i, checkpoint) in checkpoints.iter().enumerate() {
            recorder.write(Record::from_slice(&[
                ("env_steps", RecordValue::Scalar(checkpoint.env_steps as f32)),
                (
                    "checkpoint",
                    RecordValue::String(checkpoint.path.display().to_string()),
                ),
                ("checkpoint_index", RecordValue::Scalar((i + 1) as f32)),
                ("saved_at", RecordValue::DateTime(checkpoint.saved_at)),
            ]));
        }
    }

    /// Train the agent.
    ///
    /// Returns an error if the environment or the agent cannot be built, or if the
    /// learning loop fails for a reason other than an interruption. An interrupted
    /// loop is reported in [`TrainReport::outcome`].
    pub fn train<E, A>(
        &mut self,
        env_config: &E::Config,
        agent_config: &A::Config,
        recorder: &mut dyn Recorder,
    ) -> Result<TrainReport>
    where
        E: Env,
        A: Agent<E>,
    {
        self.config.validate()?;
        self.config.create_dirs()?;

        let mut env = E::build(env_config, 0)?;
        let mut agent = A::build(agent_config, &env)?;

        let callback = {
            let config = self.config.clone();
            CheckpointCallback::new(
                self.config.checkpoint_freq,
                self.config.total_timesteps,
                move |steps| config.checkpoint_path(steps),
                self.interrupt.clone(),
            )
        };
        let saved = callback.saved();

        info!(
            "Start training for {} steps, checkpoint every {} steps",
            self.config.total_timesteps, self.config.checkpoint_freq
        );
        let outcome = agent.learn(self.config.total_timesteps, Box::new(callback))?;
        match outcome {
            LearnOutcome::Completed => info!("Training completed"),
            LearnOutcome::Interrupted => warn!("Training was interrupted, saving the current model"),
        }

        let saved = saved.lock().map(|v| v.clone()).unwrap_or_default();
        Self::record_checkpoints(&saved, recorder);
        let checkpoints = saved.into_iter().map(|c| c.path).collect();

        let final_model = self.config.final_model_path();
        let steps = match outcome {
            LearnOutcome::Completed => Some(self.config.total_timesteps),
            LearnOutcome::Interrupted => None,
        };
        Self::save_model::<E, A>(&agent, &final_model, steps, recorder)?;
        recorder.flush();

        env.close()?;

        Ok(TrainReport {
            outcome,
            checkpoints,
            final_model,
        })
    }
}
