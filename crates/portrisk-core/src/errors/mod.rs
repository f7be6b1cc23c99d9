//! Error handling for the port-risk engine.
//! One error enum per subsystem, `thiserror` only.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod ingest_error;
pub mod match_error;
pub mod pipeline_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use error_code::RiskErrorCode;
pub use ingest_error::IngestError;
pub use match_error::MatchError;
pub use pipeline_error::{PipelineError, PipelineResult};
