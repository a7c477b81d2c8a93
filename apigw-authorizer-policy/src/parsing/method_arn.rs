//! Parser for the method ARN API Gateway passes to request authorizers
//!
//! `arn:<partition>:execute-api:<region>:<account>:<apiId>/<stage>/<method>/<resourcePath...>`

use std::fmt;
use std::str::FromStr;

use log::trace;

use super::{MethodArnError, MethodArnResult};
use crate::types::ApiScope;

const EXECUTE_API_SERVICE: &str = "execute-api";

/// Components of an inbound method ARN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodArn {
    pub partition: String,
    pub region: String,
    pub account_id: String,
    pub api_id: String,
    pub stage: String,
    /// `None` when the ARN stops at the stage; never empty
    pub http_method: Option<String>,
    /// Everything after the method, without its leading separator.
    /// `Some("")` denotes the root resource.
    pub resource_path: Option<String>,
}

impl MethodArn {
    pub fn parse(arn: &str) -> MethodArnResult<Self> {
        let fields: Vec<&str> = arn.splitn(6, ':').collect();
        if fields.first() != Some(&"arn") {
            return Err(MethodArnError::NotAnArn(arn.to_string()));
        }
        if fields.len() != 6 {
            return Err(MethodArnError::WrongFieldCount(fields.len()));
        }
        if fields[2] != EXECUTE_API_SERVICE {
            return Err(MethodArnError::WrongService(fields[2].to_string()));
        }

        let partition = non_empty(fields[1], "partition")?;
        let region = non_empty(fields[3], "region")?;
        let account_id = non_empty(fields[4], "account id")?;

        // Only the first three separators delimit fields; the rest belong to the path.
        let mut segments = fields[5].splitn(4, '/');
        let api_id = non_empty(segments.next().unwrap_or_default(), "API id")?;
        let stage = match segments.next() {
            Some(stage) if !stage.is_empty() => stage.to_string(),
            _ => return Err(MethodArnError::MissingStage(arn.to_string())),
        };
        let http_method = segments
            .next()
            .map(|method| non_empty(method, "method"))
            .transpose()?;
        let resource_path = segments.next().map(str::to_string);

        trace!(
            "Parsed method ARN: region={} account={} api={} stage={} method={:?} path={:?}",
            region,
            account_id,
            api_id,
            stage,
            http_method,
            resource_path
        );

        Ok(Self {
            partition,
            region,
            account_id,
            api_id,
            stage,
            http_method,
            resource_path,
        })
    }

    /// Scope for building a policy that covers this ARN's API stage
    pub fn scope(&self) -> ApiScope {
        ApiScope::new(
            self.region.clone(),
            self.account_id.clone(),
            self.api_id.clone(),
            self.stage.clone(),
        )
    }

    pub fn http_method(&self) -> Option<&str> {
        self.http_method.as_deref()
    }

    pub fn resource_path(&self) -> Option<&str> {
        self.resource_path.as_deref()
    }
}

fn non_empty(value: &str, name: &'static str) -> MethodArnResult<String> {
    if value.is_empty() {
        Err(MethodArnError::EmptyField(name))
    } else {
        Ok(value.to_string())
    }
}

impl FromStr for MethodArn {
    type Err = MethodArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MethodArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}/{}",
            self.partition, EXECUTE_API_SERVICE, self.region, self.account_id, self.api_id, self.stage
        )?;
        if let Some(method) = &self.http_method {
            write!(f, "/{method}")?;
        }
        if let Some(path) = &self.resource_path {
            write!(f, "/{path}")?;
        }
        Ok(())
    }
}
