//! Continuous action for [`GymEnv`](crate::GymEnv).
use ndarray::Array1;
use racer_core::Act;

/// Continuous action `[steering, gas, brake]`.
///
/// Steering is in `[-1, 1]`, gas and brake are in `[0, 1]`. Policies of the
/// agent are responsible for keeping actions in the bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuousAct(pub Array1<f32>);

impl Act for ContinuousAct {}
