//! Policy document types emitted to API Gateway
//!
//! Field names serialize in the IAM policy grammar (`Version`, `Statement`,
//! `Effect`, `Action`, `Resource`) so a document can be handed to the gateway
//! without any further mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// IAM policy language version stamped on every document
pub const POLICY_VERSION: &str = "2012-10-17";

/// The only action an authorizer policy can grant or deny
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Token matching every resource path in a scope
pub const ALL_RESOURCES: &str = "*";

/// Access decision carried by a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    /// Canonical capitalized form used in policy documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = PolicyError;

    /// Case-insensitive: `"ALLOW"`, `"allow"` and `"Allow"` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("allow") {
            Ok(Self::Allow)
        } else if s.eq_ignore_ascii_case("deny") {
            Ok(Self::Deny)
        } else {
            Err(PolicyError::InvalidEffect(s.to_string()))
        }
    }
}

/// HTTP method tokens used in execute-api resource names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    /// Wildcard matching every method
    All,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::All => "*",
        }
    }
}

impl AsRef<str> for HttpMethod {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            "*" => Ok(Self::All),
            _ => Err(format!("Unknown HTTP method: {s}")),
        }
    }
}

/// One deployed API surface: the fixed part of every resource name
///
/// The fields are interpolated verbatim. Identifiers containing `:` or `/`
/// change the shape of the resulting ARN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiScope {
    pub region: String,
    pub account_id: String,
    pub api_id: String,
    pub stage: String,
}

impl ApiScope {
    pub fn new(
        region: impl Into<String>,
        account_id: impl Into<String>,
        api_id: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            account_id: account_id.into(),
            api_id: api_id.into(),
            stage: stage.into(),
        }
    }

    /// Resource name for `method` on `resource_path` within this scope
    ///
    /// A single leading `/` is stripped from the path so that `/users` and
    /// `users` name the same resource.
    pub fn resource_arn(&self, method: &str, resource_path: &str) -> String {
        let path = resource_path.strip_prefix('/').unwrap_or(resource_path);
        format!(
            "arn:aws:execute-api:{}:{}:{}/{}/{}/{}",
            self.region, self.account_id, self.api_id, self.stage, method, path
        )
    }
}

/// A single rule of an authorizer policy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,
    pub action: String,
    pub resource: String,
}

impl Statement {
    pub(crate) fn invoke(effect: Effect, resource: String) -> Self {
        Self {
            effect,
            action: INVOKE_ACTION.to_string(),
            resource,
        }
    }
}

/// IAM policy document returned to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    pub fn new() -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: Vec::new(),
        }
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::new()
    }
}
