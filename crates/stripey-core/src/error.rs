//! Top-level error for a render run.
//!
//! Each variant names the stage that failed, so the message printed by the
//! CLI reads like `rotating image: decoding PNG: ...`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::decode::DecodeError;
use crate::draw::DrawError;
use crate::encode::EncodeError;
use crate::output::OutputTarget;
use crate::transform::TransformError;
use crate::zpl::ParseError;

/// Errors that abort a render run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config is required")]
    MissingConfig,

    #[error("parsing config JSON: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    #[error("{0}")]
    InvalidArguments(String),

    #[error("reading stdin: {0}")]
    InputRead(#[source] std::io::Error),

    #[error("parsing ZPL: {0}")]
    MarkupParse(#[from] ParseError),

    #[error("no labels found in ZPL content")]
    NoLabelsFound,

    #[error("generating label image: {0}")]
    Render(#[from] DrawError),

    #[error("rotating image: decoding PNG: {0}")]
    ImageDecode(#[source] DecodeError),

    #[error("rotating image: encoding PNG: {0}")]
    ImageEncode(#[source] EncodeError),

    #[error("writing to {destination}: {source}")]
    OutputWrite {
        destination: OutputTarget,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Process exit status: 2 for command-line mistakes, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::MissingConfig | PipelineError::InvalidArguments(_) => 2,
            _ => 1,
        }
    }

    /// Whether the usage text should accompany the error.
    pub fn shows_usage(&self) -> bool {
        matches!(self, PipelineError::MissingConfig)
    }
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing => PipelineError::MissingConfig,
            ConfigError::Invalid(e) => PipelineError::InvalidConfig(e),
            ConfigError::InvalidArguments(message) => PipelineError::InvalidArguments(message),
        }
    }
}

impl From<TransformError> for PipelineError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::Decode(e) => PipelineError::ImageDecode(e),
            TransformError::Encode(e) => PipelineError::ImageEncode(e),
        }
    }
}
