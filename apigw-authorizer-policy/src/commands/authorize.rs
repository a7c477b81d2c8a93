//! Authorize logic: turn a method ARN and a set of decisions into a response

use log::{debug, info, warn};

use crate::error::AuthorizerResult;
use crate::parsing::MethodArn;
use crate::response::AuthorizerResponse;
use crate::synthesis::PolicyBuilder;
use crate::types::{HttpMethod, ALL_RESOURCES};

/// What a grant applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantTarget {
    /// Every method on every resource of the stage
    AllMethods,
    /// The method and path named by the incoming method ARN
    RequestedMethod,
    Method {
        method: String,
        resource_path: String,
    },
}

/// One access decision to record in the policy
///
/// The effect is kept as text and validated by the builder, so an unknown
/// effect surfaces as [`PolicyError::InvalidEffect`].
///
/// [`PolicyError::InvalidEffect`]: crate::PolicyError::InvalidEffect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub effect: String,
    pub target: GrantTarget,
}

impl Grant {
    pub fn new(effect: impl Into<String>, target: GrantTarget) -> Self {
        Self {
            effect: effect.into(),
            target,
        }
    }
}

/// Build the authorizer response for `principal_id` calling `method_arn`
///
/// Grants are applied in order. The first invalid one aborts the whole call;
/// no partial response is produced. An empty grant list yields a policy with
/// no statements, which the gateway treats as a deny.
pub fn authorize(
    principal_id: &str,
    method_arn: &str,
    grants: &[Grant],
) -> AuthorizerResult<AuthorizerResponse> {
    let arn = MethodArn::parse(method_arn).map_err(|e| {
        warn!("Unable to parse method ARN '{}': {}", method_arn, e);
        e
    })?;

    if arn.partition != "aws" {
        warn!(
            "Method ARN is in partition '{}'; generated resources use 'aws'",
            arn.partition
        );
    }

    let mut builder = PolicyBuilder::from_scope(arn.scope());

    for grant in grants {
        match &grant.target {
            GrantTarget::AllMethods => {
                builder.add_statement(&grant.effect, HttpMethod::All, ALL_RESOURCES)?
            }
            GrantTarget::RequestedMethod => {
                let method = arn.http_method().unwrap_or(HttpMethod::All.as_str());
                let resource_path = arn.resource_path().unwrap_or_default();
                builder.add_statement(&grant.effect, method, resource_path)?
            }
            GrantTarget::Method {
                method,
                resource_path,
            } => builder.add_statement(&grant.effect, method, resource_path)?,
        }
    }

    if builder.is_empty() {
        debug!("No grants supplied for {}; policy has no statements", principal_id);
    }

    info!(
        "Built policy with {} statement(s) for principal {} on {}/{}",
        builder.len(),
        principal_id,
        arn.api_id,
        arn.stage
    );

    Ok(AuthorizerResponse::new(principal_id, builder.build()))
}
