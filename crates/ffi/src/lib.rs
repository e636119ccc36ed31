//! C ABI for the fire risk core
//!
//! An instance owns one landscape and one live fire automaton. Callers create it
//! from landscape codes with `fire_risk_new`, advance it with `fire_risk_step`,
//! read borrowed snapshots of the grid and burn ages, and request risk
//! forecasts into caller-owned buffers. Every fallible call returns a
//! [`FireRiskErrorCode`]; details of the last failure on the calling thread are
//! available from `fire_risk_get_last_error`.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{fire_risk_get_last_error, fire_risk_get_last_error_code, FireRiskErrorCode};
pub use instance::{fire_risk_destroy, fire_risk_new, FireRiskInstance};
pub use queries::{
    fire_risk_forecast, fire_risk_get_burning_count, fire_risk_get_dimensions,
    fire_risk_get_fire_age, fire_risk_get_grid,
};
pub use simulation::fire_risk_step;

use fire_risk_core::automaton::{
    DEFAULT_BURN_DURATION, DEFAULT_EMPTY_SPREAD_PROB, DEFAULT_SPREAD_DENSITY_SCALE,
    DEFAULT_TREE_SPREAD_PROB,
};
use fire_risk_core::{SpreadParams, WindBias};

/// C-compatible spread tunables
///
/// Wind is ignored unless `wind_enabled` is true.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRiskParams {
    pub tree_spread_prob: f64,
    pub empty_spread_prob: f64,
    pub spread_density_scale: f64,
    pub burn_duration: u32,
    pub wind_enabled: bool,
    /// Heading the wind blows toward, degrees counter-clockwise from +x
    pub wind_direction_degrees: f64,
    pub wind_strength: f64,
}

impl FireRiskParams {
    pub(crate) fn to_spread_params(self) -> SpreadParams {
        SpreadParams {
            tree_spread_prob: self.tree_spread_prob,
            empty_spread_prob: self.empty_spread_prob,
            spread_density_scale: self.spread_density_scale,
            burn_duration: self.burn_duration,
            wind: self
                .wind_enabled
                .then(|| WindBias::new(self.wind_direction_degrees, self.wind_strength)),
        }
    }
}

/// Default spread tunables with wind disabled
#[no_mangle]
pub extern "C" fn fire_risk_default_params() -> FireRiskParams {
    FireRiskParams {
        tree_spread_prob: DEFAULT_TREE_SPREAD_PROB,
        empty_spread_prob: DEFAULT_EMPTY_SPREAD_PROB,
        spread_density_scale: DEFAULT_SPREAD_DENSITY_SCALE,
        burn_duration: DEFAULT_BURN_DURATION,
        wind_enabled: false,
        wind_direction_degrees: 0.0,
        wind_strength: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    const SIZE: usize = 6;

    fn mixed_codes() -> Vec<i32> {
        (0..SIZE * SIZE)
            .map(|i| if i % 3 == 0 { -1 } else { (i % 9) as i32 })
            .collect()
    }

    fn create(codes: &[i32], params: FireRiskParams, seed: u64) -> *mut FireRiskInstance {
        let mut instance = ptr::null_mut();
        let code =
            unsafe { fire_risk_new(codes.as_ptr(), SIZE, SIZE, params, seed, &mut instance) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        assert!(!instance.is_null());
        instance
    }

    fn grid_snapshot(instance: *const FireRiskInstance) -> Vec<i32> {
        let mut len = 0;
        let mut array = ptr::null();
        let code = unsafe { fire_risk_get_grid(instance, &mut len, &mut array) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        unsafe { std::slice::from_raw_parts(array, len) }.to_vec()
    }

    fn last_error_message() -> String {
        let msg = fire_risk_get_last_error();
        assert!(!msg.is_null());
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_params_convert() {
        let params = fire_risk_default_params().to_spread_params();
        assert_eq!(params, SpreadParams::default());
    }

    #[test]
    fn test_wind_only_when_enabled() {
        let mut params = fire_risk_default_params();
        params.wind_direction_degrees = 90.0;
        params.wind_strength = 0.5;
        assert_eq!(params.to_spread_params().wind, None);

        params.wind_enabled = true;
        assert_eq!(
            params.to_spread_params().wind,
            Some(WindBias::new(90.0, 0.5))
        );
    }

    #[test]
    fn test_lifecycle() {
        let codes = mixed_codes();
        let instance = create(&codes, fire_risk_default_params(), 3);

        let mut width = 0;
        let mut height = 0;
        let code = unsafe { fire_risk_get_dimensions(instance, &mut width, &mut height) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        assert_eq!((width, height), (SIZE, SIZE));

        let initial = grid_snapshot(instance);
        assert_eq!(initial.len(), SIZE * SIZE);
        assert_eq!(initial.iter().filter(|&&c| c == 100).count(), 1);

        let mut burning = 0;
        let code = unsafe { fire_risk_get_burning_count(instance, &mut burning) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        assert_eq!(burning, 1);

        assert_eq!(unsafe { fire_risk_step(instance, 3) }, FireRiskErrorCode::Ok);

        let mut len = 0;
        let mut ages = ptr::null();
        let code = unsafe { fire_risk_get_fire_age(instance, &mut len, &mut ages) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        let ages = unsafe { std::slice::from_raw_parts(ages, len) }.to_vec();
        let grid = grid_snapshot(instance);
        for (&cell, &age) in grid.iter().zip(&ages) {
            assert_eq!(cell == 100, age > 0);
        }

        let mut levels = vec![u8::MAX; SIZE * SIZE];
        let code = unsafe { fire_risk_forecast(instance, 10, levels.as_mut_ptr(), levels.len()) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        assert!(levels.iter().all(|&l| l <= 9));
        assert_eq!(fire_risk_get_last_error_code(), FireRiskErrorCode::Ok);
        assert!(fire_risk_get_last_error().is_null());

        unsafe { fire_risk_destroy(instance) };
    }

    #[test]
    fn test_same_seed_same_grid() {
        let codes = mixed_codes();
        let a = create(&codes, fire_risk_default_params(), 11);
        let b = create(&codes, fire_risk_default_params(), 11);
        unsafe {
            fire_risk_step(a, 8);
            fire_risk_step(b, 8);
        }
        assert_eq!(grid_snapshot(a), grid_snapshot(b));
        unsafe {
            fire_risk_destroy(a);
            fire_risk_destroy(b);
        }
    }

    #[test]
    fn test_new_reports_no_fuel() {
        let codes = vec![2; SIZE * SIZE];
        let mut instance = ptr::null_mut();
        let code = unsafe {
            fire_risk_new(
                codes.as_ptr(),
                SIZE,
                SIZE,
                fire_risk_default_params(),
                0,
                &mut instance,
            )
        };
        assert_eq!(code, FireRiskErrorCode::NoFuel);
        assert!(instance.is_null());
        assert_eq!(fire_risk_get_last_error_code(), FireRiskErrorCode::NoFuel);
        assert!(last_error_message().contains("no tree"));
    }

    #[test]
    fn test_new_rejects_bad_input() {
        let mut codes = mixed_codes();
        codes[4] = 100;
        let mut instance = ptr::null_mut();
        let code = unsafe {
            fire_risk_new(
                codes.as_ptr(),
                SIZE,
                SIZE,
                fire_risk_default_params(),
                0,
                &mut instance,
            )
        };
        assert_eq!(code, FireRiskErrorCode::InvalidLandscape);

        let mut params = fire_risk_default_params();
        params.tree_spread_prob = 1.5;
        let codes = mixed_codes();
        let code = unsafe { fire_risk_new(codes.as_ptr(), SIZE, SIZE, params, 0, &mut instance) };
        assert_eq!(code, FireRiskErrorCode::InvalidParameter);

        let code = unsafe {
            fire_risk_new(
                ptr::null(),
                SIZE,
                SIZE,
                fire_risk_default_params(),
                0,
                &mut instance,
            )
        };
        assert_eq!(code, FireRiskErrorCode::NullPointer);
        assert!(last_error_message().contains("codes"));

        let code = unsafe {
            fire_risk_new(
                codes.as_ptr(),
                SIZE,
                SIZE,
                fire_risk_default_params(),
                0,
                ptr::null_mut(),
            )
        };
        assert_eq!(code, FireRiskErrorCode::NullPointer);
    }

    #[test]
    fn test_forecast_rejects_short_buffer() {
        let codes = mixed_codes();
        let instance = create(&codes, fire_risk_default_params(), 5);

        let mut levels = vec![0u8; SIZE * SIZE - 1];
        let code = unsafe { fire_risk_forecast(instance, 10, levels.as_mut_ptr(), levels.len()) };
        assert_eq!(code, FireRiskErrorCode::BufferTooSmall);

        // Rejected forecast leaves the fire where it was
        let mut burning = 0;
        unsafe { fire_risk_get_burning_count(instance, &mut burning) };
        assert_eq!(burning, 1);

        unsafe { fire_risk_destroy(instance) };
    }

    #[test]
    fn test_null_instance_is_reported() {
        assert_eq!(
            unsafe { fire_risk_step(ptr::null(), 1) },
            FireRiskErrorCode::NullPointer
        );

        let mut len = 7;
        let mut array = ptr::null();
        let code = unsafe { fire_risk_get_grid(ptr::null(), &mut len, &mut array) };
        assert_eq!(code, FireRiskErrorCode::NullPointer);
        assert_eq!(len, 0);
        assert!(array.is_null());

        unsafe { fire_risk_destroy(ptr::null_mut()) };
    }
}
