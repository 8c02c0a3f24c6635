use anyhow::Result;
use racer_core::{
    dummy::{DummyAgent, DummyAgentConfig, DummyEnv, DummyEnvConfig},
    record::{BufferedRecorder, NullRecorder, RecordValue},
    Agent, LearnOutcome, Trainer, TrainerConfig,
};
use std::path::Path;
use tempdir::TempDir;

fn trainer_config(dir: &Path, total_timesteps: usize, checkpoint_freq: usize) -> TrainerConfig {
    TrainerConfig::default()
        .total_timesteps(total_timesteps)
        .checkpoint_freq(checkpoint_freq)
        .model_name("driver")
        .checkpoint_dir(dir.join("checkpoints"))
        .log_dir(dir.join("logs"))
        .model_dir(dir.join("models"))
}

fn count_files(dir: &Path) -> Result<usize> {
    Ok(std::fs::read_dir(dir)?.count())
}

fn train(
    dir: &Path,
    total_timesteps: usize,
    checkpoint_freq: usize,
    agent_config: &DummyAgentConfig,
) -> Result<racer_core::TrainReport> {
    let mut trainer = Trainer::build(trainer_config(dir, total_timesteps, checkpoint_freq));
    trainer.train::<DummyEnv, DummyAgent>(
        &DummyEnvConfig::default(),
        agent_config,
        &mut NullRecorder::default(),
    )
}

#[test]
fn test_checkpoint_count_is_floor_of_budget_over_freq() -> Result<()> {
    for &(total, freq) in &[(100, 20), (100, 30), (19, 20), (20, 20), (7, 1)] {
        let dir = TempDir::new("checkpoint_count")?;
        let report = train(dir.path(), total, freq, &DummyAgentConfig::default())?;
        assert_eq!(report.outcome, LearnOutcome::Completed);
        assert_eq!(report.checkpoints.len(), total / freq);
        assert_eq!(count_files(&dir.path().join("checkpoints"))?, total / freq);
    }
    Ok(())
}

#[test]
fn test_rollout_overshoot_does_not_add_checkpoints() -> Result<()> {
    let dir = TempDir::new("overshoot")?;
    // 3 rollouts of 16 steps = 48 steps for a budget of 40 steps
    let agent_config = DummyAgentConfig::default().rollout_len(16);
    let report = train(dir.path(), 40, 20, &agent_config)?;
    assert_eq!(report.checkpoints.len(), 2);
    assert_eq!(
        report.checkpoints[1],
        dir.path().join("checkpoints").join("driver_40_steps")
    );
    Ok(())
}

#[test]
fn test_final_model_is_saved_once() -> Result<()> {
    let dir = TempDir::new("final_model")?;
    let report = train(dir.path(), 50, 20, &DummyAgentConfig::default())?;
    assert_eq!(report.final_model, dir.path().join("models").join("final_driver"));
    assert_eq!(count_files(&dir.path().join("models"))?, 1);

    let agent = DummyAgent::load(&DummyAgentConfig::default(), &report.final_model)?;
    assert_eq!(agent.num_timesteps(), 50);
    Ok(())
}

#[test]
fn test_interrupted_training_still_saves_final_model() -> Result<()> {
    let dir = TempDir::new("interrupted")?;
    let agent_config = DummyAgentConfig::default().interrupt_at(Some(45));
    let report = train(dir.path(), 100, 20, &agent_config)?;
    assert_eq!(report.outcome, LearnOutcome::Interrupted);
    assert_eq!(report.checkpoints.len(), 2);

    let agent = DummyAgent::load(&DummyAgentConfig::default(), &report.final_model)?;
    assert_eq!(agent.num_timesteps(), 44);
    Ok(())
}

#[test]
fn test_interrupt_handle_stops_training() -> Result<()> {
    let dir = TempDir::new("interrupt_handle")?;
    let mut trainer = Trainer::build(trainer_config(dir.path(), 100, 20));
    trainer.interrupt().trigger();
    let report = trainer.train::<DummyEnv, DummyAgent>(
        &DummyEnvConfig::default(),
        &DummyAgentConfig::default(),
        &mut NullRecorder::default(),
    )?;
    assert_eq!(report.outcome, LearnOutcome::Interrupted);
    assert!(report.final_model.is_file());
    Ok(())
}

#[test]
fn test_env_build_failure_aborts_before_training() -> Result<()> {
    let dir = TempDir::new("env_failure")?;
    let mut trainer = Trainer::build(trainer_config(dir.path(), 100, 20));
    let result = trainer.train::<DummyEnv, DummyAgent>(
        &DummyEnvConfig::default().fail_on_build(true),
        &DummyAgentConfig::default(),
        &mut NullRecorder::default(),
    );
    assert!(result.is_err());
    assert_eq!(count_files(&dir.path().join("checkpoints"))?, 0);
    assert_eq!(count_files(&dir.path().join("models"))?, 0);
    Ok(())
}

#[test]
fn test_learning_error_is_fatal() -> Result<()> {
    let dir = TempDir::new("learn_failure")?;
    let agent_config = DummyAgentConfig::default().fail_at(Some(30));
    assert!(train(dir.path(), 100, 20, &agent_config).is_err());
    assert_eq!(count_files(&dir.path().join("models"))?, 0);
    Ok(())
}

#[test]
fn test_records_of_checkpoints_and_final_model() -> Result<()> {
    let dir = TempDir::new("records")?;
    let mut recorder = BufferedRecorder::new();
    let mut trainer = Trainer::build(trainer_config(dir.path(), 60, 20));
    trainer.train::<DummyEnv, DummyAgent>(
        &DummyEnvConfig::default(),
        &DummyAgentConfig::default(),
        &mut recorder,
    )?;

    // three checkpoints and the final model
    assert_eq!(recorder.len(), 4);
    for (i, record) in recorder.iter().take(3).enumerate() {
        let steps = 20 * (i + 1);
        assert_eq!(record.get_scalar("env_steps")?, steps as f32);
        assert!(record
            .get_string("checkpoint")?
            .ends_with(&format!("driver_{}_steps", steps)));
        assert!(matches!(
            record.get("saved_at"),
            Some(RecordValue::DateTime(_))
        ));
    }
    let last = recorder.iter().last().unwrap();
    assert_eq!(last.get_scalar("env_steps")?, 60.0);
    assert!(last.get_string("final_model")?.ends_with("final_driver"));
    Ok(())
}
