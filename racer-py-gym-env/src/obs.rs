//! Observation for [`GymEnv`](crate::GymEnv).
use ndarray::Array3;
use racer_core::Obs;

/// An RGB frame of shape `(height, width, 3)`.
///
/// The dtype is the same as the Python environment, so the frame goes back to
/// Python policies without conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelObs(pub Array3<u8>);

impl Obs for PixelObs {}
