use std::ptr;
use std::slice;

use fire_risk_core::ThreatAggregator;

use crate::error::{DefaultFfiError, FireRiskErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, lock_automaton, track_error};
use crate::instance::FireRiskInstance;

#[no_mangle]
/// Write the grid width and height to `out_width` / `out_height`.
///
/// Returns
/// - `FireRiskErrorCode::Ok` (0) on success
/// - `FireRiskErrorCode::NullPointer` if any pointer is null
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `fire_risk_new`.
/// - `out_width` and `out_height` must be valid pointers to writable `usize`.
pub unsafe extern "C" fn fire_risk_get_dimensions(
    ptr: *const FireRiskInstance,
    out_width: *mut usize,
    out_height: *mut usize,
) -> FireRiskErrorCode {
    if out_width.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_width"));
    }
    if out_height.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_height"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr)? };
        let (width, height) = instance.landscape.dimensions();
        unsafe {
            *out_width = width;
            *out_height = height;
        }
        Ok::<(), DefaultFfiError>(())
    })
}

#[no_mangle]
/// Return a borrowed pointer to a snapshot of the live grid codes.
///
/// Codes are row-major: `-1` tree, `100` burning, `0..=8` land density.
/// Cells that have burned out read as `0`.
///
/// - The buffer is reused; the pointer is valid until the next call to this
///   function on the same instance or `fire_risk_destroy`. **DO NOT FREE THIS POINTER**.
/// - On failure `out_array` is set to null and `out_len` to 0.
///
/// Returns
/// - `FireRiskErrorCode::Ok` (0) on success with `out_len` set to `width * height`
/// - `FireRiskErrorCode::NullPointer` if `ptr`, `out_len`, or `out_array` is null
/// - `FireRiskErrorCode::LockPoisoned` if an internal lock is poisoned
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `fire_risk_new`.
/// - `out_len` and `out_array` must be valid pointers to writable memory.
pub unsafe extern "C" fn fire_risk_get_grid(
    ptr: *const FireRiskInstance,
    out_len: *mut usize,
    out_array: *mut *const i32,
) -> FireRiskErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_len"));
    }
    if out_array.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultFfiError::null_pointer("out_array"));
    }

    let result = handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr)? };
        let mut snapshot = instance
            .grid_snapshot
            .lock()
            .map_err(|_| DefaultFfiError::lock_poisoned("grid_snapshot"))?;
        snapshot.clear();
        {
            let automaton = lock_automaton(instance)?;
            snapshot.extend(automaton.grid().iter().map(|cell| cell.code()));
        }

        unsafe {
            *out_len = snapshot.len();
            *out_array = snapshot.as_ptr();
        }
        Ok::<(), DefaultFfiError>(())
    });

    if result != FireRiskErrorCode::Ok {
        unsafe {
            *out_array = ptr::null();
            *out_len = 0;
        }
    }
    result
}

#[no_mangle]
/// Return a borrowed pointer to a snapshot of per-cell burn ages.
///
/// Ages are row-major; `0` means not burning. Buffer lifetime and failure
/// behavior match `fire_risk_get_grid`.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `fire_risk_new`.
/// - `out_len` and `out_array` must be valid pointers to writable memory.
pub unsafe extern "C" fn fire_risk_get_fire_age(
    ptr: *const FireRiskInstance,
    out_len: *mut usize,
    out_array: *mut *const u32,
) -> FireRiskErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_len"));
    }
    if out_array.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultFfiError::null_pointer("out_array"));
    }

    let result = handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr)? };
        let mut snapshot = instance
            .age_snapshot
            .lock()
            .map_err(|_| DefaultFfiError::lock_poisoned("age_snapshot"))?;
        snapshot.clear();
        {
            let automaton = lock_automaton(instance)?;
            snapshot.extend_from_slice(automaton.fire_age().as_slice());
        }

        unsafe {
            *out_len = snapshot.len();
            *out_array = snapshot.as_ptr();
        }
        Ok::<(), DefaultFfiError>(())
    });

    if result != FireRiskErrorCode::Ok {
        unsafe {
            *out_array = ptr::null();
            *out_len = 0;
        }
    }
    result
}

#[no_mangle]
/// Write the number of currently burning cells to `out_count`.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `fire_risk_new`.
/// - `out_count` must be a valid pointer to a writable `usize`.
pub unsafe extern "C" fn fire_risk_get_burning_count(
    ptr: *const FireRiskInstance,
    out_count: *mut usize,
) -> FireRiskErrorCode {
    if out_count.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_count"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr)? };
        let count = lock_automaton(instance)?.burning_count();
        unsafe {
            *out_count = count;
        }
        Ok::<(), DefaultFfiError>(())
    })
}

#[no_mangle]
/// Forecast fire risk over `horizon` steps and write levels `0..=9` to `out_buf`.
///
/// The live automaton is advanced by `horizon` steps as a side effect, exactly
/// like calling `fire_risk_step(ptr, horizon)`. Population and forest layers
/// come from the landscape the instance was created with.
///
/// Returns
/// - `FireRiskErrorCode::Ok` (0) on success with `width * height` levels written
/// - `FireRiskErrorCode::NullPointer` if `ptr` or `out_buf` is null
/// - `FireRiskErrorCode::BufferTooSmall` if `buf_len < width * height`; nothing is advanced
/// - `FireRiskErrorCode::LockPoisoned` if the automaton lock is poisoned
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `fire_risk_new`.
/// - `out_buf` must point to at least `buf_len` writable bytes.
pub unsafe extern "C" fn fire_risk_forecast(
    ptr: *const FireRiskInstance,
    horizon: usize,
    out_buf: *mut u8,
    buf_len: usize,
) -> FireRiskErrorCode {
    if out_buf.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_buf"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr)? };
        let landscape = &instance.landscape;
        let required = landscape.cells().len();
        if buf_len < required {
            return Err(DefaultFfiError::buffer_too_small(required, buf_len));
        }

        let forecast = {
            let mut automaton = lock_automaton(instance)?;
            ThreatAggregator::new(horizon).forecast(
                &mut *automaton,
                landscape,
                &landscape.forest_mask(),
            )?
        };

        // SAFETY: caller guarantees `out_buf` holds `buf_len >= required` bytes
        let out = unsafe { slice::from_raw_parts_mut(out_buf, required) };
        out.copy_from_slice(forecast.risk.levels().as_slice());
        Ok::<(), DefaultFfiError>(())
    })
}
