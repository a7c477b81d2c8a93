//! Error types for the authorizer policy crate

use thiserror::Error;

use crate::parsing::MethodArnError;

/// Errors raised while building a policy document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The effect did not normalize to `Allow` or `Deny`
    #[error("Invalid effect: {0:?}")]
    InvalidEffect(String),
}

/// Top-level error for the authorize command
#[derive(Debug, Error)]
pub enum AuthorizerError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    MethodArn(#[from] MethodArnError),
}

pub type PolicyResult<T> = Result<T, PolicyError>;

pub type AuthorizerResult<T> = Result<T, AuthorizerError>;
