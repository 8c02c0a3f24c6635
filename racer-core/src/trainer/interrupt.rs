use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A cloneable flag requesting the learning loop to stop.
///
/// Triggering it makes [`CheckpointCallback`](super::CheckpointCallback) return
/// [`CallbackFlow::Stop`](crate::CallbackFlow::Stop), after which the trainer
/// proceeds to the final save as for a user interrupt.
#[derive(Clone, Debug, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Constructs an untriggered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the learning loop to stop.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` if [`Interrupt::trigger`] has been called on any clone.
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
