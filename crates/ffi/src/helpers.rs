use std::ffi::CString;
use std::sync::MutexGuard;

use fire_risk_core::FireAutomaton;

use crate::error::{with_last_error_mut, DefaultFfiError, FfiError, FireRiskErrorCode};
use crate::instance::FireRiskInstance;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record `error` and return its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> FireRiskErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FireRiskErrorCode::Ok;
    });
}

/// Run `f`, recording its error if it fails and clearing the last error if it succeeds.
pub(crate) fn handle_ffi_result_error<F, E>(f: F) -> FireRiskErrorCode
where
    F: FnOnce() -> Result<(), E>,
    E: FfiError,
{
    match f() {
        Ok(()) => {
            clear_last_error();
            FireRiskErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow the instance behind an FFI handle.
///
/// # Safety
///
/// `ptr` must be null or a live pointer returned by `fire_risk_new`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const FireRiskInstance,
) -> Result<&'a FireRiskInstance, DefaultFfiError> {
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultFfiError::null_pointer("ptr"))
}

/// Lock the instance's automaton, mapping poisoning to an FFI error.
pub(crate) fn lock_automaton(
    instance: &FireRiskInstance,
) -> Result<MutexGuard<'_, FireAutomaton>, DefaultFfiError> {
    instance
        .automaton
        .lock()
        .map_err(|_| DefaultFfiError::lock_poisoned("automaton"))
}
