//! Max-normalization and quantization helpers

use crate::core_types::Grid;

/// Highest risk level a cell can be assigned
pub const MAX_RISK_LEVEL: u8 = 9;

/// Scale a map into `[0, 1]` by dividing by its maximum
///
/// A map whose maximum is zero (or that is empty) is returned unchanged rather
/// than divided by zero.
#[must_use]
pub fn normalize_by_max(map: &Grid<f64>) -> Grid<f64> {
    match map.max_value() {
        Some(max) if max > 0.0 => map.map(|&v| v / max),
        _ => map.clone(),
    }
}

/// Quantize a `[0, 1]` map to integer risk levels `0..=9`
///
/// Values are scaled by 9, rounded half-to-even and clipped.
#[must_use]
pub fn quantize(map: &Grid<f64>) -> Grid<u8> {
    let top = f64::from(MAX_RISK_LEVEL);
    map.map(|&v| (v * top).round_ties_even().clamp(0.0, top) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_by_max() {
        let map = Grid::from_vec(2, 2, vec![0.0, 2.0, 4.0, 1.0]).unwrap();
        let norm = normalize_by_max(&map);
        assert_relative_eq!(norm.as_slice()[1], 0.5);
        assert_relative_eq!(norm.as_slice()[2], 1.0);
        assert_relative_eq!(norm.as_slice()[3], 0.25);
    }

    #[test]
    fn test_all_zero_map_stays_zero() {
        let map: Grid<f64> = Grid::new(3, 3);
        let norm = normalize_by_max(&map);
        assert!(norm.iter().all(|&v| v == 0.0));
        assert!(norm.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_quantize_rounds_half_to_even_and_clips() {
        let map = Grid::from_vec(6, 1, vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.2]).unwrap();
        // 2.25 -> 2, 4.5 -> 4, 6.75 -> 7
        assert_eq!(quantize(&map).into_vec(), vec![0, 2, 4, 7, 9, 9]);
    }
}
