//! Method ARN parsing (pure Rust)

pub mod method_arn;

pub use method_arn::MethodArn;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MethodArnError {
    #[error("Not an ARN: {0}")]
    NotAnArn(String),
    #[error("Expected execute-api service, found '{0}'")]
    WrongService(String),
    #[error("Expected 6 colon-separated fields, found {0}")]
    WrongFieldCount(usize),
    #[error("Missing stage in method ARN: {0}")]
    MissingStage(String),
    #[error("Empty {0} in method ARN")]
    EmptyField(&'static str),
}

pub type MethodArnResult<T> = Result<T, MethodArnError>;
