use anyhow::Result;
use racer::car_racing::{eval_env_config, evaluator_config, ppo_config};
use racer_core::{error::RacerError, load_agent, Env, Evaluator, VideoReport};
use racer_py_gym_env::GymEnv;
use racer_sb3_agent::PpoAgent;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = evaluator_config();
    std::fs::create_dir_all(&config.video_dir)?;

    println!("Loading the trained model...");
    let mut agent = match load_agent::<GymEnv, PpoAgent>(&ppo_config(), &config.model_path) {
        Ok(agent) => agent,
        Err(e) => match e.downcast_ref::<RacerError>() {
            Some(err @ RacerError::ModelNotFound(_)) => {
                println!("{}", err);
                println!("Run train_car_racing first to train the model.");
                std::process::exit(err.exit_code());
            }
            _ => return Err(e),
        },
    };
    println!("Model loaded!");

    println!("\nSetting up the environment with video recording...");
    let env = GymEnv::build(&eval_env_config(&config), 0)?;
    let mut evaluator = Evaluator::new(env, config.n_episodes);

    let rule = "=".repeat(50);
    println!("\n{}\nStart test drive!\n{}", rule, rule);
    let n_episodes = config.n_episodes;
    evaluator.evaluate_with_progress(&mut agent, |ix, result| {
        println!("\nEpisode {}/{} finished", ix + 1, n_episodes);
        println!("   {}", result);
    })?;
    evaluator.close()?;

    println!("\n{}\nSaved videos:\n{}", rule, rule);
    println!("{}", VideoReport::scan(&config.video_dir)?);
    println!("\nOpen the videos with a player such as VLC.");

    Ok(())
}
