use completion_sdk_core::SdkError;
use std::process::ExitCode;
use thiserror::Error;

/// Errors surfaced by a classify run.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error(transparent)]
    Sdk(#[from] SdkError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ClassifyError {
    /// Process exit status for this failure. Every failure is non-zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            ClassifyError::Sdk(SdkError::ConfigError(_)) => 2,
            ClassifyError::Sdk(SdkError::AuthenticationError { .. }) => 3,
            ClassifyError::Sdk(SdkError::TransportError(_)) => 4,
            ClassifyError::Sdk(SdkError::NoCompletionError { .. }) => 5,
            ClassifyError::Sdk(SdkError::RateLimited(_)) => 6,
            ClassifyError::Sdk(SdkError::SerializationError(_)) => 7,
            ClassifyError::Sdk(SdkError::ApiError(_)) | ClassifyError::Output(_) => 1,
        }
    }
}

impl From<&ClassifyError> for ExitCode {
    fn from(err: &ClassifyError) -> Self {
        ExitCode::from(err.exit_code())
    }
}
