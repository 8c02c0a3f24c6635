//! Periodic checkpointing during learning.
use super::Interrupt;
use crate::{CallbackFlow, LearnCallback, Snapshot};
use anyhow::Result;
use chrono::{DateTime, Local};
use log::info;
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

/// A checkpoint written by [`CheckpointCallback`].
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    /// The number of environment steps at which the snapshot was taken.
    pub env_steps: usize,

    /// Where the snapshot was saved.
    pub path: PathBuf,

    /// When the snapshot was saved.
    pub saved_at: DateTime<Local>,
}

/// Saves a snapshot every `save_freq` environment steps.
///
/// Steps beyond `total_timesteps` never produce a checkpoint. Learning libraries
/// may collect a few more steps than requested to complete a rollout, but the
/// number of checkpoints stays `floor(total_timesteps / save_freq)`.
///
/// The callback also asks the learning loop to stop once the [`Interrupt`] is
/// triggered.
pub struct CheckpointCallback {
    save_freq: usize,
    total_timesteps: usize,
    path_fn: Box<dyn Fn(usize) -> PathBuf>,
    interrupt: Interrupt,
    saved: Arc<Mutex<Vec<Checkpoint>>>,
}

impl CheckpointCallback {
    /// Constructs a [`CheckpointCallback`].
    ///
    /// `path_fn` gives the path of the checkpoint at a step.
    pub fn new(
        save_freq: usize,
        total_timesteps: usize,
        path_fn: impl Fn(usize) -> PathBuf + 'static,
        interrupt: Interrupt,
    ) -> Self {
        Self {
            save_freq,
            total_timesteps,
            path_fn: Box::new(path_fn),
            interrupt,
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a handle to the list of checkpoints written so far.
    ///
    /// The callback is moved into the learning loop, so the list is shared.
    pub fn saved(&self) -> Arc<Mutex<Vec<Checkpoint>>> {
        self.saved.clone()
    }
}

impl LearnCallback for CheckpointCallback {
    fn on_step(&mut self, num_timesteps: usize, snapshot: &dyn Snapshot) -> Result<CallbackFlow> {
        if num_timesteps <= self.total_timesteps && num_timesteps % self.save_freq == 0 {
            let path = (self.path_fn)(num_timesteps);
            snapshot.save_snapshot(&path)?;
            info!("Saved checkpoint at {} steps in {:?}", num_timesteps, &path);
            if let Ok(mut saved) = self.saved.lock() {
                saved.push(Checkpoint {
                    env_steps: num_timesteps,
                    path,
                    saved_at: Local::now(),
                });
            }
        }

        match self.interrupt.is_triggered() {
            true => Ok(CallbackFlow::Stop),
            false => Ok(CallbackFlow::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, path::Path};

    #[derive(Default)]
    struct CountingSnapshot(RefCell<Vec<PathBuf>>);

    impl Snapshot for CountingSnapshot {
        fn save_snapshot(&self, path: &Path) -> Result<()> {
            self.0.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    fn run(total: usize, freq: usize, steps_done: usize) -> Vec<PathBuf> {
        let snapshot = CountingSnapshot::default();
        let mut callback = CheckpointCallback::new(
            freq,
            total,
            |steps| PathBuf::from(format!("ckpt_{}", steps)),
            Interrupt::new(),
        );
        for t in 1..=steps_done {
            callback.on_step(t, &snapshot).unwrap();
        }
        snapshot.0.into_inner()
    }

    #[test]
    fn test_checkpoints_every_freq_steps() {
        let saved = run(100, 20, 100);
        assert_eq!(saved.len(), 5);
        assert_eq!(saved[0], PathBuf::from("ckpt_20"));
        assert_eq!(saved[4], PathBuf::from("ckpt_100"));
    }

    #[test]
    fn test_saved_checkpoints_keep_steps() {
        let snapshot = CountingSnapshot::default();
        let mut callback = CheckpointCallback::new(
            20,
            50,
            |steps| PathBuf::from(format!("ckpt_{}", steps)),
            Interrupt::new(),
        );
        let saved = callback.saved();
        for t in 1..=64 {
            callback.on_step(t, &snapshot).unwrap();
        }
        let saved = saved.lock().unwrap();
        let steps = saved.iter().map(|c| c.env_steps).collect::<Vec<_>>();
        assert_eq!(steps, vec![20, 40]);
        assert_eq!(saved[1].path, PathBuf::from("ckpt_40"));
    }

    #[test]
    fn test_no_checkpoint_when_budget_below_freq() {
        assert!(run(19, 20, 19).is_empty());
    }

    #[test]
    fn test_extra_steps_beyond_budget_are_ignored() {
        // e.g., a rollout of 64 steps overshoots a budget of 90 steps
        let saved = run(90, 20, 128);
        assert_eq!(saved.len(), 4);
    }

    #[test]
    fn test_interrupt_stops_learning() {
        let snapshot = CountingSnapshot::default();
        let interrupt = Interrupt::new();
        let mut callback = CheckpointCallback::new(
            10,
            100,
            |steps| PathBuf::from(format!("ckpt_{}", steps)),
            interrupt.clone(),
        );
        assert_eq!(callback.on_step(1, &snapshot).unwrap(), CallbackFlow::Continue);
        interrupt.trigger();
        assert_eq!(callback.on_step(2, &snapshot).unwrap(), CallbackFlow::Stop);
    }
}
