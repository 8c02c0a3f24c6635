//! Core functionalities.
mod agent;
mod env;
mod policy;
mod step;
pub use agent::{Agent, CallbackFlow, LearnCallback, LearnOutcome, Snapshot};
pub use env::Env;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Vectorized environments are not supported, so an [`Obs`] always holds
/// a single observation.
pub trait Obs: Clone + Debug {}

/// An action of an environment.
pub trait Act: Clone + Debug {}
