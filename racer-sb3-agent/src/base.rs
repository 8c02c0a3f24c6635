//! PPO agent of Stable-Baselines3.
use crate::{hook::StepHook, PpoConfig};
use anyhow::{anyhow, Result};
use log::{info, warn};
use pyo3::{
    exceptions::PyKeyboardInterrupt,
    types::{IntoPyDict, PyModule},
    Py, PyObject, Python, ToPyObject,
};
use racer_core::{
    util::path_to_string, Agent, LearnCallback, LearnOutcome, Policy, Snapshot,
};
use racer_py_gym_env::{
    util::{pixel_obs_to_pyobj, pyany_to_act},
    ContinuousAct, GymEnv, PixelObs,
};
use std::path::{Path, PathBuf};

const PPO_GLUE: &str = r#"
import signal

import numpy as np
from stable_baselines3 import PPO
from stable_baselines3.common.callbacks import BaseCallback
from stable_baselines3.common.vec_env import DummyVecEnv


class RustCallback(BaseCallback):
    def __init__(self, hook):
        super().__init__(verbose=0)
        self._hook = hook

    def _on_step(self):
        return bool(self._hook(self.num_timesteps, self.model))


def install_interrupt_handler():
    signal.signal(signal.SIGINT, signal.default_int_handler)


def make_ppo(env, policy, **kwargs):
    vec_env = DummyVecEnv([lambda: env])
    return PPO(policy, vec_env, **kwargs)


def learn(model, total_timesteps, hook, tb_log_name):
    model.learn(
        total_timesteps=total_timesteps,
        callback=RustCallback(hook),
        tb_log_name=tb_log_name,
    )


def load_ppo(path):
    return PPO.load(path)


def predict(model, obs, deterministic):
    action, _ = model.predict(obs, deterministic=deterministic)
    return np.asarray(action, dtype=np.float32)
"#;

fn glue(py: Python<'_>) -> Result<Py<PyModule>> {
    let module = PyModule::from_code(py, PPO_GLUE, "racer_ppo.py", "racer_ppo")?;
    Ok(module.into())
}

/// PPO agent of [Stable-Baselines3](https://stable-baselines3.readthedocs.io).
///
/// The model lives in the Python interpreter. It is bound to the Python object of
/// a [`GymEnv`] wrapped in `DummyVecEnv` when built, or loaded without an
/// environment for prediction.
pub struct PpoAgent {
    model: PyObject,
    glue: Py<PyModule>,
    config: PpoConfig,
}

impl PpoAgent {
    /// Returns the configuration.
    pub fn config(&self) -> &PpoConfig {
        &self.config
    }
}

impl Policy<GymEnv> for PpoAgent {
    fn predict(&mut self, obs: &PixelObs, deterministic: bool) -> Result<ContinuousAct> {
        Python::with_gil(|py| {
            let obs = pixel_obs_to_pyobj(py, obs);
            let act = self
                .glue
                .as_ref(py)
                .getattr("predict")?
                .call1((self.model.clone_ref(py), obs, deterministic))?;
            pyany_to_act(act)
        })
    }
}

impl Snapshot for PpoAgent {
    fn save_snapshot(&self, path: &Path) -> Result<()> {
        self.save(path)
    }
}

impl Agent<GymEnv> for PpoAgent {
    type Config = PpoConfig;

    /// Creates a PPO model bound to the environment.
    ///
    /// The `SIGINT` handler of Python is installed here, so that Ctrl-C raises
    /// `KeyboardInterrupt` in the learning loop.
    fn build(config: &Self::Config, env: &GymEnv) -> Result<Self> {
        Python::with_gil(|py| {
            let glue = glue(py)?;
            let module = glue.as_ref(py);
            module.getattr("install_interrupt_handler")?.call0()?;

            let tensorboard_log = config.tensorboard_log.as_deref().map(path_to_string);
            let kwargs = vec![
                ("verbose", config.verbose.to_object(py)),
                ("tensorboard_log", tensorboard_log.to_object(py)),
                ("learning_rate", config.learning_rate.to_object(py)),
                ("n_steps", config.n_steps.to_object(py)),
                ("batch_size", config.batch_size.to_object(py)),
                ("n_epochs", config.n_epochs.to_object(py)),
                ("seed", config.seed.to_object(py)),
            ]
            .into_py_dict(py);
            let model = module
                .getattr("make_ppo")?
                .call((env.as_pyobject(), config.policy.as_str()), Some(kwargs))?;
            info!("Created PPO with {}", config.policy);

            Ok(Self {
                model: model.into(),
                glue,
                config: config.clone(),
            })
        })
    }

    fn learn(
        &mut self,
        total_timesteps: usize,
        callback: Box<dyn LearnCallback>,
    ) -> Result<LearnOutcome> {
        Python::with_gil(|py| {
            let hook = Py::new(py, StepHook::new(callback))?;
            let result = self.glue.as_ref(py).getattr("learn")?.call1((
                self.model.clone_ref(py),
                total_timesteps,
                hook.clone_ref(py),
                self.config.tb_log_name.as_str(),
            ));

            let mut hook = hook.borrow_mut(py);
            if let Some(e) = hook.take_error() {
                return Err(e);
            }
            match result {
                Ok(_) if hook.is_stopped() => Ok(LearnOutcome::Interrupted),
                Ok(_) => Ok(LearnOutcome::Completed),
                Err(e) if e.is_instance::<PyKeyboardInterrupt>(py) => {
                    warn!("KeyboardInterrupt in the learning loop");
                    Ok(LearnOutcome::Interrupted)
                }
                Err(e) => Err(anyhow!("Learning loop failed: {}", e)),
            }
        })
    }

    /// Saves the model with `model.save(path)`.
    ///
    /// The library appends `.zip` to `path` if it has no extension.
    fn save(&self, path: &Path) -> Result<()> {
        Python::with_gil(|py| {
            self.model
                .call_method1(py, "save", (path_to_string(path),))?;
            Ok(())
        })
    }

    fn load(config: &Self::Config, path: &Path) -> Result<Self> {
        Python::with_gil(|py| {
            let glue = glue(py)?;
            let model = glue
                .as_ref(py)
                .getattr("load_ppo")?
                .call1((path_to_string(path),))?;
            Ok(Self {
                model: model.into(),
                glue,
                config: config.clone(),
            })
        })
    }

    fn artifact_path(path: &Path) -> PathBuf {
        match path.extension() {
            Some(_) => path.to_path_buf(),
            None => path.with_extension("zip"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_path() {
        assert_eq!(
            PpoAgent::artifact_path(Path::new("models/final_driver")),
            Path::new("models/final_driver.zip")
        );
        assert_eq!(
            PpoAgent::artifact_path(Path::new("models/final_driver.zip")),
            Path::new("models/final_driver.zip")
        );
    }
}
