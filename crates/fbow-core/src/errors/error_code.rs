//! FbowErrorCode trait for structured error reporting.

/// Every error enum implements this to provide a stable, machine-readable
/// error code alongside its human-readable message.
pub trait FbowErrorCode {
    /// Returns the error code string (e.g., "DIMENSION_MISMATCH").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
pub const EMPTY_BAG: &str = "EMPTY_BAG";
pub const UNKNOWN_MEASURE: &str = "UNKNOWN_MEASURE";
pub const MISSING_UNIVERSE: &str = "MISSING_UNIVERSE";
pub const DATASET_IO: &str = "DATASET_IO";
pub const MALFORMED_DATASET: &str = "MALFORMED_DATASET";
pub const UNKNOWN_TASK: &str = "UNKNOWN_TASK";
pub const UNKNOWN_SPLIT: &str = "UNKNOWN_SPLIT";
pub const INSUFFICIENT_SAMPLES: &str = "INSUFFICIENT_SAMPLES";
pub const LENGTH_MISMATCH: &str = "LENGTH_MISMATCH";
pub const ENCODER_ERROR: &str = "ENCODER_ERROR";
pub const BOOTSTRAP_ERROR: &str = "BOOTSTRAP_ERROR";
