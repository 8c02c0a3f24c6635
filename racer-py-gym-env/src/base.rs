//! Wrapper of gym environments implemented in Python.
use crate::{
    util::{act_to_pyobj, init_interpreter, pyany_to_pixel_obs},
    ContinuousAct, GymEnvConfig, PixelObs,
};
use anyhow::Result;
use log::{info, trace};
use pyo3::types::{IntoPyDict, PyModule, PyTuple};
use pyo3::{PyObject, Python, ToPyObject};
use racer_core::{record::Record, util::path_to_string, Env, Info, Step};

const MAKE_ENV: &str = r#"
import gymnasium as gym
from gymnasium.wrappers import RecordVideo


def make_env(name, continuous, render_mode, video_folder, name_prefix):
    kwargs = {"continuous": continuous}
    if render_mode is not None:
        kwargs["render_mode"] = render_mode
    env = gym.make(name, **kwargs)
    if video_folder is not None:
        env = RecordVideo(
            env,
            video_folder=video_folder,
            episode_trigger=lambda episode_id: True,
            name_prefix=name_prefix,
        )
    return env
"#;

/// Information given at every step of the interaction with the environment.
///
/// Currently, it is empty and used to match the type signature.
pub struct GymInfo {}

impl Info for GymInfo {}

/// An environment in [Gymnasium](https://gymnasium.farama.org).
#[derive(Debug)]
pub struct GymEnv {
    env: PyObject,

    count_steps: usize,

    max_steps: Option<usize>,

    /// Initial seed.
    ///
    /// This value will be used at the first call of the reset method.
    initial_seed: Option<i64>,
}

impl GymEnv {
    /// Returns the Python environment object.
    ///
    /// Agents implemented in Python are bound to this object.
    pub fn as_pyobject(&self) -> PyObject {
        Python::with_gil(|py| self.env.clone_ref(py))
    }
}

impl Env for GymEnv {
    type Obs = PixelObs;
    type Act = ContinuousAct;
    type Info = GymInfo;
    type Config = GymEnvConfig;

    /// Resets the environment and returns an observation.
    ///
    /// At the first call, `env.reset(seed=seed)` is called in the Python interpreter.
    fn reset(&mut self) -> Result<PixelObs> {
        trace!("GymEnv::reset()");
        self.count_steps = 0;

        Python::with_gil(|py| {
            let ret_values = if let Some(seed) = self.initial_seed.take() {
                let kwargs = vec![("seed", seed)].into_py_dict(py);
                self.env.call_method(py, "reset", (), Some(kwargs))?
            } else {
                self.env.call_method0(py, "reset")?
            };
            let ret_values: &PyTuple = ret_values.extract(py)?;
            pyany_to_pixel_obs(ret_values.get_item(0))
        })
    }

    /// Runs a step of the environment's dynamics.
    fn step(&mut self, a: &ContinuousAct) -> Result<(Step<Self>, Record)> {
        trace!("GymEnv::step()");

        Python::with_gil(|py| {
            let a_py = act_to_pyobj(py, a);
            let ret = self.env.call_method(py, "step", (a_py,), None)?;
            let step: &PyTuple = ret.extract(py)?;
            let obs = pyany_to_pixel_obs(step.get_item(0))?;
            let reward: f32 = step.get_item(1).extract()?;
            let is_terminated = step.get_item(2).is_true()?;
            let mut is_truncated = step.get_item(3).is_true()?;

            self.count_steps += 1;
            if let Some(max_steps) = self.max_steps {
                if self.count_steps >= max_steps {
                    is_truncated = true;
                }
            };

            Ok((
                Step::new(
                    obs,
                    a.clone(),
                    reward,
                    is_terminated,
                    is_truncated,
                    GymInfo {},
                ),
                Record::empty(),
            ))
        })
    }

    /// Closes the environment.
    ///
    /// With video recording, the video of the last episode is written here.
    fn close(&mut self) -> Result<()> {
        Python::with_gil(|py| {
            self.env.call_method0(py, "close")?;
            Ok(())
        })
    }

    /// Constructs [`GymEnv`].
    ///
    /// * `seed` - The seed value of the random number generator.
    ///   This value will be used at the first call of the reset method.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Python::with_gil(|py| {
            init_interpreter(py)?;
            info!("Initialize GymEnv {}", config.name);

            let (video_folder, name_prefix) = match config.video.as_ref() {
                Some(video) => {
                    std::fs::create_dir_all(&video.folder)?;
                    (
                        Some(path_to_string(&video.folder)),
                        video.name_prefix.clone(),
                    )
                }
                None => (None, String::new()),
            };

            let module = PyModule::from_code(py, MAKE_ENV, "racer_make_env.py", "racer_make_env")?;
            let kwargs = vec![
                ("continuous", config.continuous.to_object(py)),
                ("render_mode", config.render_mode.to_object(py)),
                ("video_folder", video_folder.to_object(py)),
                ("name_prefix", name_prefix.to_object(py)),
            ]
            .into_py_dict(py);
            let env = module
                .getattr("make_env")?
                .call((config.name.as_str(),), Some(kwargs))?;
            info!("Observation space = {}", env.getattr("observation_space")?);
            info!("Action space = {}", env.getattr("action_space")?);

            Ok(GymEnv {
                env: env.into(),
                count_steps: 0,
                max_steps: config.max_steps,
                initial_seed: Some(seed),
            })
        })
    }
}
