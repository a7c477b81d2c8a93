//! This crate builds the policy documents returned by API Gateway request
//! authorizers:
//! - Statement accumulation against one API scope (region, account, API, stage)
//! - Method ARN parsing
//! - The authorizer response envelope (principal id, policy, context)
//!

pub mod commands;
mod error;
mod parsing;
mod response;
mod synthesis;
mod types;

// Re-exports for a small, focused public API
pub use commands::{authorize, Grant, GrantTarget};
pub use error::{AuthorizerError, AuthorizerResult, PolicyError, PolicyResult};
pub use parsing::{MethodArn, MethodArnError, MethodArnResult};
pub use response::{AuthorizerResponse, ContextValue};
pub use synthesis::PolicyBuilder;
pub use types::{
    ApiScope, Effect, HttpMethod, PolicyDocument, Statement, ALL_RESOURCES, INVOKE_ACTION,
    POLICY_VERSION,
};
