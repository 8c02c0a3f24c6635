//! Conversion between Rust and Python objects.
use crate::{ContinuousAct, PixelObs};
use anyhow::Result;
use log::info;
use ndarray::Array1;
use numpy::{PyArray1, PyArray3, PyArrayDyn};
use pyo3::{types::IntoPyDict, IntoPy, PyAny, PyObject, Python};

/// Convert a `numpy.ndarray` of `uint8` with shape `(h, w, c)` to [`PixelObs`].
pub fn pyany_to_pixel_obs(obs: &PyAny) -> Result<PixelObs> {
    let obs: &PyArray3<u8> = obs.extract()?;
    Ok(PixelObs(obs.readonly().as_array().to_owned()))
}

/// Convert [`PixelObs`] to a `numpy.ndarray` of `uint8`.
pub fn pixel_obs_to_pyobj(py: Python<'_>, obs: &PixelObs) -> PyObject {
    PyArray3::<u8>::from_array(py, &obs.0).into_py(py)
}

/// Convert [`ContinuousAct`] to a `numpy.ndarray` of `float32`.
///
/// This function does not support batch action.
pub fn act_to_pyobj(py: Python<'_>, act: &ContinuousAct) -> PyObject {
    PyArray1::<f32>::from_array(py, &act.0).into_py(py)
}

/// Convert a `numpy.ndarray` of `float32` to [`ContinuousAct`].
///
/// A leading batch axis of size 1 is removed.
pub fn pyany_to_act(act: &PyAny) -> Result<ContinuousAct> {
    let act: &PyArrayDyn<f32> = act.extract()?;
    let v = act.readonly().as_array().iter().copied().collect::<Vec<_>>();
    Ok(ContinuousAct(Array1::from(v)))
}

/// Prepares the embedded Python interpreter.
///
/// `sys.argv` is used by pygame, which is responsible for rendering.
/// Depending on the python interpreter, however, sys.argv can be empty.
/// See <https://github.com/PyO3/pyo3/issues/1241#issuecomment-715952517>
pub fn init_interpreter(py: Python<'_>) -> Result<()> {
    let locals = [("sys", py.import("sys")?)].into_py_dict(py);
    let argv_len: usize = py.eval("len(sys.argv)", None, Some(locals))?.extract()?;
    if argv_len == 0 {
        py.eval("sys.argv.insert(0, 'racer')", None, Some(locals))?;
    }
    let ver = py.eval("sys.version", None, Some(locals))?;
    info!("Python version = {}", ver);
    Ok(())
}
