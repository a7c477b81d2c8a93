//! Authorizer response envelope
//!
//! The shape API Gateway expects back from a Lambda request/token authorizer:
//! the caller's principal id, the policy document, and an optional map of
//! context values forwarded to the backend integration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::PolicyDocument;

/// A value in the authorizer context map
///
/// API Gateway only forwards strings, numbers and booleans; nested objects
/// and arrays are rejected at the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl ContextValue {
    /// Infer a value from its textual form
    ///
    /// `true`/`false` become booleans. A JSON number becomes a number only
    /// when it prints back exactly as given, so `007`, `1e5` and integers
    /// beyond `u64` stay strings. Everything else stays a string.
    pub fn parse_literal(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        match raw.parse::<serde_json::Number>() {
            Ok(n) if n.to_string() == raw => Self::Number(n),
            _ => Self::String(raw.to_string()),
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for ContextValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Response returned to the invoking gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, ContextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_identifier_key: Option<String>,
}

impl AuthorizerResponse {
    pub fn new(principal_id: impl Into<String>, policy_document: PolicyDocument) -> Self {
        Self {
            principal_id: principal_id.into(),
            policy_document,
            context: BTreeMap::new(),
            usage_identifier_key: None,
        }
    }

    /// Add one context entry, replacing any previous value under `key`
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// API key used by usage plans when the key source is the authorizer
    pub fn with_usage_identifier_key(mut self, key: impl Into<String>) -> Self {
        self.usage_identifier_key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PolicyBuilder;
    use serde_json::json;

    #[test]
    fn test_parse_literal() {
        assert_eq!(ContextValue::parse_literal("true"), ContextValue::Bool(true));
        assert_eq!(ContextValue::parse_literal("false"), ContextValue::Bool(false));
        assert_eq!(ContextValue::parse_literal("123"), ContextValue::from(123));
        assert_eq!(
            ContextValue::parse_literal("1.5"),
            ContextValue::Number(serde_json::Number::from_f64(1.5).unwrap())
        );
        assert_eq!(ContextValue::parse_literal("-42"), ContextValue::from(-42));
        assert_eq!(
            ContextValue::parse_literal("18446744073709551615"),
            ContextValue::from(u64::MAX)
        );
        assert_eq!(ContextValue::parse_literal("True"), ContextValue::from("True"));
        assert_eq!(ContextValue::parse_literal("NaN"), ContextValue::from("NaN"));
        assert_eq!(ContextValue::parse_literal(""), ContextValue::from(""));
    }

    #[test]
    fn test_parse_literal_keeps_text_that_would_change() {
        for raw in [
            "007",
            "0123456789",
            "18446744073709551616",
            "1e5",
            "1.50",
            "+5",
            "-0",
            " 12",
        ] {
            assert_eq!(
                ContextValue::parse_literal(raw),
                ContextValue::from(raw),
                "{raw:?} should stay a string"
            );
        }
    }

    #[test]
    fn test_response_json_shape() {
        let mut builder = PolicyBuilder::new("us-east-1", "123456789012", "abcd1234", "prod");
        builder.deny_all_methods().unwrap();

        let response = AuthorizerResponse::new("user|xxxx", builder.build())
            .with_context("stringKey", "string")
            .with_context("numberKey", 123)
            .with_context("booleanKey", true);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "principalId": "user|xxxx",
                "policyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Effect": "Deny",
                        "Action": "execute-api:Invoke",
                        "Resource": "arn:aws:execute-api:us-east-1:123456789012:abcd1234/prod/*/*"
                    }]
                },
                "context": {
                    "booleanKey": true,
                    "numberKey": 123,
                    "stringKey": "string"
                }
            })
        );
    }

    #[test]
    fn test_empty_context_and_usage_key() {
        let response = AuthorizerResponse::new("user", PolicyBuilder::new("r", "a", "i", "s").build());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("context").is_none());
        assert!(json.get("usageIdentifierKey").is_none());

        let json = serde_json::to_value(response.with_usage_identifier_key("key-1")).unwrap();
        assert_eq!(json["usageIdentifierKey"], "key-1");
    }

    #[test]
    fn test_response_deserializes_context_types() {
        let response: AuthorizerResponse = serde_json::from_value(json!({
            "principalId": "abc",
            "policyDocument": {"Version": "2012-10-17", "Statement": []},
            "context": {"s": "x", "n": 4, "b": false}
        }))
        .unwrap();

        assert_eq!(response.context["s"], ContextValue::from("x"));
        assert_eq!(response.context["n"], ContextValue::from(4));
        assert_eq!(response.context["b"], ContextValue::from(false));
    }
}
