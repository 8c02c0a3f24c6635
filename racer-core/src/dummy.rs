//! Lightweight environment and agent used in tests.
//!
//! [`DummyEnv`] emits random rewards and ends episodes after a random number of
//! steps. When a video directory is configured, it writes one placeholder `.mp4`
//! file per recorded episode, as a recording wrapper would do.
//! [`DummyAgent`] runs a learning loop without learning anything and saves its
//! step counter as YAML.
use crate::{
    record::Record, Act, Agent, CallbackFlow, Env, LearnCallback, LearnOutcome,
    Obs, Policy, Snapshot, Step,
};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Dummy observation, the number of steps since the last reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DummyObs(pub usize);

impl Obs for DummyObs {}

/// Dummy action.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyAct(pub f32);

impl Act for DummyAct {}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    /// Minimum length of an episode.
    pub min_episode_len: usize,

    /// Maximum length of an episode.
    pub max_episode_len: usize,

    /// Episodes are truncated at this number of steps.
    pub max_steps: Option<usize>,

    /// Where placeholder videos of every episode are written.
    pub video_dir: Option<PathBuf>,

    /// Building the environment fails if `true`.
    pub fail_on_build: bool,
}

impl Default for DummyEnvConfig {
    fn default() -> Self {
        Self {
            min_episode_len: 5,
            max_episode_len: 20,
            max_steps: None,
            video_dir: None,
            fail_on_build: false,
        }
    }
}

impl DummyEnvConfig {
    /// Sets the range of episode lengths.
    pub fn episode_len(mut self, min: usize, max: usize) -> Self {
        self.min_episode_len = min;
        self.max_episode_len = max;
        self
    }

    /// Sets the step cap of episodes.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Records episodes in the given directory.
    pub fn record_video(mut self, dir: impl Into<PathBuf>) -> Self {
        self.video_dir = Some(dir.into());
        self
    }

    /// Makes [`Env::build`] fail.
    pub fn fail_on_build(mut self, v: bool) -> Self {
        self.fail_on_build = v;
        self
    }
}

/// Dummy environment.
#[derive(Clone)]
pub struct DummyEnv {
    config: DummyEnvConfig,
    rng: fastrand::Rng,
    t: usize,
    episode_len: usize,
    episode: Option<usize>,
    rewards: Vec<f32>,
    n_steps: usize,
}

impl DummyEnv {
    /// Rewards emitted since the last reset.
    pub fn episode_rewards(&self) -> &[f32] {
        &self.rewards
    }

    /// The number of steps done since the environment was built.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    fn write_video(&self, episode: usize) -> Result<()> {
        if let Some(dir) = self.config.video_dir.as_ref() {
            let path = dir.join(format!("rl-video-episode-{}.mp4", episode));
            // one byte per frame, including the frame of the reset
            let frames = vec![0u8; self.t + 1];
            std::fs::write(path, frames)?;
        }
        Ok(())
    }
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Obs = DummyObs;
    type Act = DummyAct;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        if config.fail_on_build {
            bail!("Failed to build DummyEnv");
        }
        if config.min_episode_len == 0 || config.min_episode_len > config.max_episode_len {
            bail!("Invalid episode length range");
        }
        if let Some(dir) = config.video_dir.as_ref() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self {
            config: config.clone(),
            rng: fastrand::Rng::with_seed(seed as u64),
            t: 0,
            episode_len: 0,
            episode: None,
            rewards: Vec::new(),
            n_steps: 0,
        })
    }

    fn reset(&mut self) -> Result<DummyObs> {
        self.episode = Some(self.episode.map_or(0, |e| e + 1));
        self.t = 0;
        self.episode_len = self
            .rng
            .usize(self.config.min_episode_len..=self.config.max_episode_len);
        self.rewards.clear();
        Ok(DummyObs(0))
    }

    fn step(&mut self, a: &DummyAct) -> Result<(Step<Self>, Record)> {
        let episode = match self.episode {
            Some(e) => e,
            None => bail!("DummyEnv::step() called before reset()"),
        };
        self.t += 1;
        self.n_steps += 1;
        let reward = self.rng.f32() * 2.0 - 1.0;
        self.rewards.push(reward);

        let is_terminated = self.t >= self.episode_len;
        let is_truncated = !is_terminated && self.config.max_steps.map_or(false, |m| self.t >= m);
        if is_terminated || is_truncated {
            self.write_video(episode)?;
        }

        let step = Step::new(
            DummyObs(self.t),
            a.clone(),
            reward,
            is_terminated,
            is_truncated,
            (),
        );
        Ok((step, Record::empty()))
    }
}

/// Configuration of [`DummyAgent`].
#[derive(Clone, Debug, Default)]
pub struct DummyAgentConfig {
    /// Steps collected at once before calling the callback, like a rollout of
    /// on-policy algorithms. Zero is regarded as one.
    pub rollout_len: usize,

    /// Simulates a user interrupt before the given step.
    pub interrupt_at: Option<usize>,

    /// Learning fails with an error at the given step.
    pub fail_at: Option<usize>,
}

impl DummyAgentConfig {
    /// Sets the rollout length.
    pub fn rollout_len(mut self, v: usize) -> Self {
        self.rollout_len = v;
        self
    }

    /// Simulates a user interrupt before the given step.
    pub fn interrupt_at(mut self, v: Option<usize>) -> Self {
        self.interrupt_at = v;
        self
    }

    /// Learning fails at the given step.
    pub fn fail_at(mut self, v: Option<usize>) -> Self {
        self.fail_at = v;
        self
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct DummyAgentState {
    num_timesteps: usize,
}

/// Dummy agent.
pub struct DummyAgent {
    config: DummyAgentConfig,
    env: Option<DummyEnv>,
    num_timesteps: usize,
}

impl DummyAgent {
    /// The number of environment steps done in learning loops.
    pub fn num_timesteps(&self) -> usize {
        self.num_timesteps
    }

    fn collect_rollout(&mut self, n: usize) -> Result<()> {
        let env = match self.env.as_mut() {
            Some(env) => env,
            None => bail!("DummyAgent is not bound to an environment"),
        };
        let mut obs = env.reset()?;
        for _ in 0..n {
            let (step, _) = env.step(&DummyAct(obs.0 as f32))?;
            obs = match step.is_done() {
                true => env.reset()?,
                false => step.obs,
            };
        }
        Ok(())
    }
}

impl Policy<DummyEnv> for DummyAgent {
    fn predict(&mut self, obs: &DummyObs, deterministic: bool) -> Result<DummyAct> {
        let a = obs.0 as f32 * 0.1;
        match deterministic {
            true => Ok(DummyAct(a)),
            false => Ok(DummyAct(a + fastrand::f32() - 0.5)),
        }
    }
}

impl Snapshot for DummyAgent {
    fn save_snapshot(&self, path: &Path) -> Result<()> {
        self.save(path)
    }
}

impl Agent<DummyEnv> for DummyAgent {
    type Config = DummyAgentConfig;

    fn build(config: &Self::Config, env: &DummyEnv) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            env: Some(env.clone()),
            num_timesteps: 0,
        })
    }

    fn learn(
        &mut self,
        total_timesteps: usize,
        mut callback: Box<dyn LearnCallback>,
    ) -> Result<LearnOutcome> {
        let rollout_len = self.config.rollout_len.max(1);
        let mut done = 0;

        while done < total_timesteps {
            self.collect_rollout(rollout_len)?;
            for _ in 0..rollout_len {
                done += 1;
                if self.config.interrupt_at == Some(done) {
                    return Ok(LearnOutcome::Interrupted);
                }
                if self.config.fail_at == Some(done) {
                    bail!("DummyAgent failed at step {}", done);
                }
                self.num_timesteps += 1;
                if callback.on_step(self.num_timesteps, &*self)? == CallbackFlow::Stop {
                    return Ok(LearnOutcome::Interrupted);
                }
            }
        }

        Ok(LearnOutcome::Completed)
    }

    fn save(&self, path: &Path) -> Result<()> {
        let state = DummyAgentState {
            num_timesteps: self.num_timesteps,
        };
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&state)?.as_bytes())?;
        Ok(())
    }

    fn load(config: &Self::Config, path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let state: DummyAgentState = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(Self {
            config: config.clone(),
            env: None,
            num_timesteps: state.num_timesteps,
        })
    }
}
