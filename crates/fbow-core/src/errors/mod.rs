//! Error handling for fbow.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod dataset_error;
pub mod error_code;
pub mod evaluation_error;
pub mod similarity_error;

pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use error_code::FbowErrorCode;
pub use evaluation_error::{EvaluationError, EvaluationResult};
pub use similarity_error::SimilarityError;
