//! Accumulates execute-api statements for one API scope

use log::{debug, warn};

use crate::error::PolicyResult;
use crate::types::{ApiScope, Effect, HttpMethod, PolicyDocument, Statement, ALL_RESOURCES};

/// Builds the policy document returned by a request authorizer
///
/// A builder is bound to a single [`ApiScope`] and owns its statements.
/// Statements are only ever appended, in call order.
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    scope: ApiScope,
    policy: PolicyDocument,
}

impl PolicyBuilder {
    pub fn new(
        region: impl Into<String>,
        account_id: impl Into<String>,
        api_id: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self::from_scope(ApiScope::new(region, account_id, api_id, stage))
    }

    pub fn from_scope(scope: ApiScope) -> Self {
        Self {
            scope,
            policy: PolicyDocument::new(),
        }
    }

    pub fn scope(&self) -> &ApiScope {
        &self.scope
    }

    /// Number of statements accumulated so far
    pub fn len(&self) -> usize {
        self.policy.statement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policy.statement.is_empty()
    }

    /// Append one statement for `method` on `resource_path`
    ///
    /// `effect` is matched case-insensitively against `allow` and `deny`. Any
    /// other value fails with [`PolicyError::InvalidEffect`] and leaves the
    /// document untouched.
    ///
    /// [`PolicyError::InvalidEffect`]: crate::PolicyError::InvalidEffect
    pub fn add_statement(
        &mut self,
        effect: &str,
        method: impl AsRef<str>,
        resource_path: &str,
    ) -> PolicyResult<()> {
        let effect = effect.parse::<Effect>().map_err(|e| {
            warn!("Rejected statement for {}: {}", self.scope.api_id, e);
            e
        })?;

        let resource = self.scope.resource_arn(method.as_ref(), resource_path);
        debug!("Adding {} statement on {}", effect, resource);

        self.policy.statement.push(Statement::invoke(effect, resource));
        Ok(())
    }

    pub fn allow_all_methods(&mut self) -> PolicyResult<()> {
        self.add_statement(Effect::Allow.as_str(), HttpMethod::All, ALL_RESOURCES)
    }

    pub fn deny_all_methods(&mut self) -> PolicyResult<()> {
        self.add_statement(Effect::Deny.as_str(), HttpMethod::All, ALL_RESOURCES)
    }

    pub fn allow_method(
        &mut self,
        method: impl AsRef<str>,
        resource_path: &str,
    ) -> PolicyResult<()> {
        self.add_statement(Effect::Allow.as_str(), method, resource_path)
    }

    pub fn deny_method(
        &mut self,
        method: impl AsRef<str>,
        resource_path: &str,
    ) -> PolicyResult<()> {
        self.add_statement(Effect::Deny.as_str(), method, resource_path)
    }

    /// Snapshot of the document as it stands now
    ///
    /// The returned value is detached: statements added afterwards show up in
    /// the next call, never in a document already returned.
    pub fn build(&self) -> PolicyDocument {
        self.policy.clone()
    }
}
