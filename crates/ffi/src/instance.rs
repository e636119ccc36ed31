use std::ptr;
use std::slice;
use std::sync::Mutex;

use fire_risk_core::{FireAutomaton, Landscape};

use crate::error::{DefaultFfiError, FireRiskErrorCode};
use crate::helpers::{clear_last_error, track_error};
use crate::FireRiskParams;

/// A live fire automaton plus the landscape it was built from.
///
/// # Thread Safety
/// The automaton sits behind a `Mutex`, so stepping and querying may be called
/// from any thread. Snapshot buffers handed out by `fire_risk_get_grid` and
/// `fire_risk_get_fire_age` each have their own `Mutex` and are reused between
/// calls to avoid per-frame allocations.
pub struct FireRiskInstance {
    pub(crate) automaton: Mutex<FireAutomaton>,
    /// Original landscape; forecasts read population and forest from it.
    pub(crate) landscape: Landscape,
    pub(crate) grid_snapshot: Mutex<Vec<i32>>,
    pub(crate) age_snapshot: Mutex<Vec<u32>>,
}

impl FireRiskInstance {
    /// Build an instance from landscape codes and ignite one tree.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLandscape` for bad codes or dimensions, `InvalidParameter`
    /// for out-of-range params and `NoFuel` when the landscape has no trees.
    pub(crate) fn new(
        codes: &[i32],
        width: usize,
        height: usize,
        params: &FireRiskParams,
        seed: u64,
    ) -> Result<Box<Self>, DefaultFfiError> {
        let landscape = Landscape::from_codes(width, height, codes)?;
        let automaton = FireAutomaton::with_seed(&landscape, params.to_spread_params(), seed)?;
        let cells = landscape.cells().len();

        Ok(Box::new(Self {
            automaton: Mutex::new(automaton),
            landscape,
            grid_snapshot: Mutex::new(Vec::with_capacity(cells)),
            age_snapshot: Mutex::new(Vec::with_capacity(cells)),
        }))
    }
}

/// Create a new fire risk instance and return it via out-parameter.
///
/// Parameters
/// - `codes`: `width * height` landscape codes in row-major order: `-1` for a
///   tree, `0..=8` for land of that density. Copied; the caller keeps ownership.
/// - `params`: Spread tunables, usually from `fire_risk_default_params()`.
/// - `seed`: Seeds the instance's random stream; equal seeds give equal runs.
/// - `out_instance`: Receives the instance on success and null on failure.
///
/// Returns
/// - `FireRiskErrorCode::Ok` (0) - success, `out_instance` contains valid pointer
/// - `FireRiskErrorCode::NullPointer` - `codes` or `out_instance` is null
/// - `FireRiskErrorCode::InvalidLandscape` - zero dimensions or an invalid code
/// - `FireRiskErrorCode::InvalidParameter` - a tunable is out of range
/// - `FireRiskErrorCode::NoFuel` - the landscape has no tree cells
///
/// # Safety
///
/// - `codes` must point to at least `width * height` readable `i32` values.
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `fire_risk_destroy` exactly once.
///
/// Example (C++)
/// ```cpp
/// FireRiskInstance* sim = nullptr;
/// FireRiskErrorCode err = fire_risk_new(codes, 100, 100, fire_risk_default_params(), 42, &sim);
/// if (err != FireRiskErrorCode::Ok) {
///     fprintf(stderr, "Failed to create simulation: %s\n", fire_risk_get_last_error());
///     return;
/// }
/// // ... use sim ...
/// fire_risk_destroy(sim);
/// ```
#[no_mangle]
pub unsafe extern "C" fn fire_risk_new(
    codes: *const i32,
    width: usize,
    height: usize,
    params: FireRiskParams,
    seed: u64,
    out_instance: *mut *mut FireRiskInstance,
) -> FireRiskErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_instance"));
    }
    unsafe {
        *out_instance = ptr::null_mut();
    }
    if codes.is_null() {
        return track_error(&DefaultFfiError::null_pointer("codes"));
    }
    let Some(len) = width.checked_mul(height) else {
        return track_error(&DefaultFfiError::invalid_parameter(format!(
            "Grid of {width}x{height} cells overflows"
        )));
    };

    // SAFETY: caller guarantees `codes` holds `width * height` values
    let codes = unsafe { slice::from_raw_parts(codes, len) };

    match FireRiskInstance::new(codes, width, height, &params, seed) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            clear_last_error();
            FireRiskErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Destroys an instance previously created by `fire_risk_new`.
///
/// Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `fire_risk_new` and not freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn fire_risk_destroy(ptr: *mut FireRiskInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: `ptr` came from `Box::into_raw` in `fire_risk_new`
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
