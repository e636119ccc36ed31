use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use fire_risk_core::FireRiskError;

/// Common interface for errors that cross the FFI boundary.
///
/// - `code()` - error code returned to the caller
/// - `msg()` - diagnostic message exposed through `fire_risk_get_last_error`
pub(crate) trait FfiError {
    fn code(&self) -> FireRiskErrorCode;

    fn msg(&self) -> &str;
}

/// Error code plus message, built either directly or from a [`FireRiskError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFfiError {
    code: FireRiskErrorCode,
    msg: String,
}

impl DefaultFfiError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FireRiskErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a mutex poisoned by a panic on another thread.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: FireRiskErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for a caller buffer shorter than the grid.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Self {
            code: FireRiskErrorCode::BufferTooSmall,
            msg: format!("Output buffer holds {provided} cells, {required} required"),
        }
    }

    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: FireRiskErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl FfiError for DefaultFfiError {
    fn code(&self) -> FireRiskErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<FireRiskError> for DefaultFfiError {
    fn from(error: FireRiskError) -> Self {
        let code = match error {
            FireRiskError::NoFuel => FireRiskErrorCode::NoFuel,
            FireRiskError::ShapeMismatch { .. } => FireRiskErrorCode::ShapeMismatch,
            FireRiskError::InvalidDimensions { .. } | FireRiskError::InvalidCell { .. } => {
                FireRiskErrorCode::InvalidLandscape
            }
            FireRiskError::InvalidParameter(_) => FireRiskErrorCode::InvalidParameter,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by fire risk functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRiskErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Landscape codes or dimensions are invalid (zero size, wrong length,
    /// fire cells, densities above 8).
    InvalidLandscape = 3,

    /// Invalid parameter passed to function.
    InvalidParameter = 4,

    /// Landscape has no tree to ignite.
    NoFuel = 5,

    /// Grid layers disagree in shape.
    ShapeMismatch = 6,

    /// Caller-provided output buffer is shorter than the grid.
    BufferTooSmall = 7,
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    static LAST_ERROR: RefCell<(Option<CString>, FireRiskErrorCode)> =
        const { RefCell::new((None, FireRiskErrorCode::Ok)) };
}

pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FireRiskErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FireRiskErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded or no call has been made.
///
/// The pointer stays valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// FireRiskInstance* sim = nullptr;
/// FireRiskErrorCode err = fire_risk_new(codes, 100, 100, fire_risk_default_params(), 42, &sim);
/// if (err != FireRiskErrorCode::Ok) {
///     const char* error = fire_risk_get_last_error();
///     if (error) {
///         printf("Fire risk creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fire_risk_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
///
/// Returns `FireRiskErrorCode::Ok` (0) if the last call succeeded.
#[no_mangle]
pub extern "C" fn fire_risk_get_last_error_code() -> FireRiskErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
