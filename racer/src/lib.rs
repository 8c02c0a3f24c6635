//! Train and evaluate a driving policy on Gymnasium `CarRacing-v3`.
//!
//! The workspace consists of the following crates:
//!
//! * [racer-core](racer_core) provides the traits of environments and agents, the
//!   training driver `Trainer` and the evaluation driver `Evaluator`.
//! * [racer-tensorboard](racer_tensorboard) has `TensorboardRecorder` to write records
//!   which can be shown in TensorBoard.
//! * [racer-py-gym-env](racer_py_gym_env) is a wrapper of the
//!   [Gymnasium](https://gymnasium.farama.org) environments written in Python.
//! * [racer-sb3-agent](racer_sb3_agent) wraps the PPO agent of
//!   [Stable-Baselines3](https://stable-baselines3.readthedocs.io).
//! * [racer](crate) has the settings of the CarRacing runs in [`car_racing`] and two
//!   binaries, `train_car_racing` and `eval_car_racing`.
pub mod car_racing;
