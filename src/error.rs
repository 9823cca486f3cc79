use core::fmt;

/// Result alias for `husc`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the index mapper, distance routines and partitioner.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Length mismatch between two inputs that must agree (usize).
    DimensionMismatch {
        /// Expected length (e.g. number of samples).
        expected: usize,
        /// Found length (e.g. number of labels).
        found: usize,
    },

    /// Metric name not recognised.
    InvalidMetric(String),

    /// Index outside the valid range.
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Exclusive upper bound.
        len: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidMetric(name) => write!(f, "unknown distance metric '{name}'"),
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = Error::DimensionMismatch {
            expected: 6,
            found: 5,
        };
        assert_eq!(e.to_string(), "dimension mismatch: expected 6, found 5");

        let e = Error::InvalidMetric("euclidian".to_string());
        assert!(e.to_string().contains("euclidian"));
    }
}
