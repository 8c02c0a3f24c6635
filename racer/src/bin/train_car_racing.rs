use anyhow::Result;
use racer::car_racing::{banner, TrainSettings, TRAIN_CONFIG_FILE};
use racer_core::{LearnOutcome, Trainer};
use racer_py_gym_env::GymEnv;
use racer_sb3_agent::PpoAgent;
use racer_tensorboard::TensorboardRecorder;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = TrainSettings::default();
    let mut trainer = Trainer::build(settings.trainer.clone());
    trainer.config().create_dirs()?;
    settings.save(settings.trainer.model_dir.join(TRAIN_CONFIG_FILE))?;
    let mut recorder = TensorboardRecorder::new(&settings.trainer.log_dir);

    println!("{}", banner(trainer.config()));
    let report =
        trainer.train::<GymEnv, PpoAgent>(&settings.env, &settings.agent, &mut recorder)?;

    match report.outcome {
        LearnOutcome::Completed => println!("\nTraining completed!"),
        LearnOutcome::Interrupted => println!("\nTraining was interrupted by the user."),
    }
    for path in report.checkpoints.iter() {
        println!("Checkpoint: {}", path.display());
    }
    println!("Saved the final model: {}", report.final_model.display());
    println!("\nAll done!");

    Ok(())
}
