//! Error type for landscape construction, ignition and forecasting

/// Errors reported by the fire-risk core
///
/// All variants are precondition violations detected synchronously; nothing
/// in the crate retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FireRiskError {
    /// The landscape has no tree cells, so there is nothing to ignite
    NoFuel,
    /// Two grids that must share a shape do not
    ShapeMismatch {
        /// Which input disagreed (e.g. `"forest mask"`)
        context: &'static str,
        /// Expected `(width, height)`
        expected: (usize, usize),
        /// Actual `(width, height)`
        found: (usize, usize),
    },
    /// Grid dimensions are zero or disagree with the buffer length
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },
    /// A landscape cell holds a value that is neither a tree nor a density
    InvalidCell {
        /// Flat row-major index of the offending cell
        index: usize,
        /// Raw value found there
        value: i32,
    },
    /// A tunable is outside its valid range
    InvalidParameter(String),
}

impl std::fmt::Display for FireRiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FireRiskError::NoFuel => {
                write!(f, "Landscape contains no tree cells to ignite")
            }
            FireRiskError::ShapeMismatch {
                context,
                expected,
                found,
            } => write!(
                f,
                "Shape mismatch for {context}: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            FireRiskError::InvalidDimensions { width, height, len } => write!(
                f,
                "Invalid grid dimensions {width}x{height} for {len} cells"
            ),
            FireRiskError::InvalidCell { index, value } => {
                write!(f, "Invalid landscape value {value} at cell {index}")
            }
            FireRiskError::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
        }
    }
}

impl std::error::Error for FireRiskError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            FireRiskError::NoFuel.to_string(),
            "Landscape contains no tree cells to ignite"
        );
        let err = FireRiskError::ShapeMismatch {
            context: "forest mask",
            expected: (5, 5),
            found: (4, 5),
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch for forest mask: expected 5x5, found 4x5"
        );
    }
}
