//! Step callback called from the learning loop in Python.
use anyhow::Result;
use log::error;
use pyo3::{exceptions::PyKeyboardInterrupt, prelude::*};
use racer_core::{util::path_to_string, CallbackFlow, LearnCallback, Snapshot};
use std::path::Path;

/// A model object of the library, saved with `model.save(path)`.
pub(crate) struct ModelSnapshot<'py> {
    model: &'py PyAny,
}

impl<'py> ModelSnapshot<'py> {
    pub(crate) fn new(model: &'py PyAny) -> Self {
        Self { model }
    }
}

impl Snapshot for ModelSnapshot<'_> {
    fn save_snapshot(&self, path: &Path) -> Result<()> {
        self.model.call_method1("save", (path_to_string(path),))?;
        Ok(())
    }
}

/// What the learning loop does after a step callback.
#[derive(Debug)]
pub(crate) enum HookFlow {
    Continue,
    Stop,
    Fail(anyhow::Error),
}

impl HookFlow {
    /// Maps the result of [`LearnCallback::on_step`].
    ///
    /// An error for which `is_interrupt` holds, e.g., a `KeyboardInterrupt` raised
    /// while a checkpoint is being saved, stops learning like a user interrupt.
    pub(crate) fn from_result(
        result: Result<CallbackFlow>,
        is_interrupt: impl Fn(&anyhow::Error) -> bool,
    ) -> Self {
        match result {
            Ok(CallbackFlow::Continue) => Self::Continue,
            Ok(CallbackFlow::Stop) => Self::Stop,
            Err(e) if is_interrupt(&e) => Self::Stop,
            Err(e) => Self::Fail(e),
        }
    }
}

/// `true` if `e` is a `KeyboardInterrupt` raised in Python.
pub(crate) fn is_keyboard_interrupt(py: Python<'_>, e: &anyhow::Error) -> bool {
    e.downcast_ref::<PyErr>()
        .map_or(false, |e| e.is_instance::<PyKeyboardInterrupt>(py))
}

/// Wraps a [`LearnCallback`] so that it can be called as a Python function.
///
/// `RustCallback._on_step()` calls this object with `num_timesteps` and the model.
/// The return value tells the library whether to continue learning. An error of
/// the callback stops learning and is kept until the learning loop returns.
#[pyclass(unsendable)]
pub(crate) struct StepHook {
    callback: Box<dyn LearnCallback>,
    error: Option<anyhow::Error>,
    stopped: bool,
}

impl StepHook {
    pub(crate) fn new(callback: Box<dyn LearnCallback>) -> Self {
        Self {
            callback,
            error: None,
            stopped: false,
        }
    }

    /// `true` if the callback asked the learning loop to stop.
    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Takes the error of the callback, if any.
    pub(crate) fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn on_step(&mut self, py: Python<'_>, num_timesteps: usize, model: &PyAny) -> bool {
        let snapshot = ModelSnapshot::new(model);
        let result = self.callback.on_step(num_timesteps, &snapshot);
        match HookFlow::from_result(result, |e| is_keyboard_interrupt(py, e)) {
            HookFlow::Continue => true,
            HookFlow::Stop => {
                self.stopped = true;
                false
            }
            HookFlow::Fail(e) => {
                error!("Step callback failed at {} steps: {}", num_timesteps, e);
                self.error = Some(e);
                false
            }
        }
    }
}

#[pymethods]
impl StepHook {
    #[call]
    fn __call__(&mut self, py: Python<'_>, num_timesteps: usize, model: &PyAny) -> bool {
        self.on_step(py, num_timesteps, model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_callback_flow_is_kept() {
        assert!(matches!(
            HookFlow::from_result(Ok(CallbackFlow::Continue), |_| false),
            HookFlow::Continue
        ));
        assert!(matches!(
            HookFlow::from_result(Ok(CallbackFlow::Stop), |_| false),
            HookFlow::Stop
        ));
    }

    #[test]
    fn test_interrupt_while_saving_stops_learning() {
        let flow = HookFlow::from_result(Err(anyhow!("KeyboardInterrupt")), |_| true);
        assert!(matches!(flow, HookFlow::Stop));
    }

    #[test]
    fn test_other_errors_fail_learning() {
        let flow = HookFlow::from_result(Err(anyhow!("disk full")), |_| false);
        match flow {
            HookFlow::Fail(e) => assert_eq!(e.to_string(), "disk full"),
            _ => panic!("the error must be kept"),
        }
    }
}
