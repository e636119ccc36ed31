use crate::error::{DefaultFfiError, FireRiskErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, lock_automaton};
use crate::instance::FireRiskInstance;

/// Advance the fire by `steps` synchronous steps.
///
/// Returns
/// - `FireRiskErrorCode::Ok` (0) on success
/// - `FireRiskErrorCode::NullPointer` if `ptr` is null
/// - `FireRiskErrorCode::LockPoisoned` if the automaton lock is poisoned
///
/// Borrowed grid and age snapshots stay readable but describe the state at the
/// time they were taken.
///
/// # Safety
///
/// `ptr` must be null or a live pointer returned by `fire_risk_new`.
#[no_mangle]
pub unsafe extern "C" fn fire_risk_step(
    ptr: *const FireRiskInstance,
    steps: usize,
) -> FireRiskErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr)? };
        lock_automaton(instance)?.advance(steps);
        Ok::<(), DefaultFfiError>(())
    })
}
