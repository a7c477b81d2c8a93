//! apigw-authorizer - build API Gateway authorizer responses
//!
//! Reads the method ARN and principal from flags or the environment, applies
//! the requested grants and prints the authorizer response as JSON on stdout.
//! Logs go to stderr.

use std::process::ExitCode;

use anyhow::{Context, Result};
use apigw_authorizer_policy::{
    authorize, AuthorizerError, AuthorizerResponse, ContextValue, Effect, Grant, GrantTarget,
};
use clap::{ArgAction, Parser};
use log::{debug, warn};

/// Exit code for rejected input (bad ARN, bad effect, bad flag value)
const EXIT_INVALID_INPUT: u8 = 2;

/// Build the policy an API Gateway request authorizer returns
///
/// Grants are applied in this order: --allow-all, --deny-all,
/// --allow-requested, --deny-requested, --allow, --deny, --effect.
#[derive(Parser, Debug)]
#[command(name = "apigw-authorizer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Method ARN of the request being authorized
    #[arg(long, env = "AUTHORIZER_METHOD_ARN")]
    method_arn: String,

    /// Principal identifier to return to the gateway
    #[arg(long, env = "AUTHORIZER_PRINCIPAL_ID")]
    principal_id: String,

    /// Allow every method on every resource of the stage
    #[arg(long)]
    allow_all: bool,

    /// Deny every method on every resource of the stage
    #[arg(long)]
    deny_all: bool,

    /// Allow the method and path named by the method ARN
    #[arg(long)]
    allow_requested: bool,

    /// Deny the method and path named by the method ARN
    #[arg(long)]
    deny_requested: bool,

    /// Allow a method on a resource path (repeatable)
    #[arg(long, value_name = "METHOD:PATH", value_parser = parse_method_target)]
    allow: Vec<MethodTarget>,

    /// Deny a method on a resource path (repeatable)
    #[arg(long, value_name = "METHOD:PATH", value_parser = parse_method_target)]
    deny: Vec<MethodTarget>,

    /// Effect of a single explicit statement ("allow" or "deny", any case)
    #[arg(long, requires = "method")]
    effect: Option<String>,

    /// Method of the explicit statement
    #[arg(long, requires = "effect")]
    method: Option<String>,

    /// Resource path of the explicit statement [default: *]
    #[arg(long, requires = "effect")]
    resource: Option<String>,

    /// Context entry forwarded to the integration (repeatable)
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_context_entry)]
    context: Vec<ContextEntry>,

    /// Usage plan API key to associate with the request
    #[arg(long)]
    usage_identifier_key: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone)]
struct MethodTarget {
    method: String,
    resource_path: String,
}

#[derive(Debug, Clone)]
struct ContextEntry {
    key: String,
    value: ContextValue,
}

fn parse_method_target(raw: &str) -> Result<MethodTarget, String> {
    match raw.split_once(':') {
        Some((method, path)) if !method.is_empty() => {
            let path = if path.is_empty() { "*" } else { path };
            Ok(MethodTarget {
                method: method.to_string(),
                resource_path: path.to_string(),
            })
        }
        _ => Err(format!("expected METHOD:PATH, got '{raw}'")),
    }
}

fn parse_context_entry(raw: &str) -> Result<ContextEntry, String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(ContextEntry {
            key: key.to_string(),
            value: ContextValue::parse_literal(value),
        }),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

impl Cli {
    fn grants(&self) -> Vec<Grant> {
        let allow = Effect::Allow.as_str();
        let deny = Effect::Deny.as_str();
        let mut grants = Vec::new();

        if self.allow_all {
            grants.push(Grant::new(allow, GrantTarget::AllMethods));
        }
        if self.deny_all {
            grants.push(Grant::new(deny, GrantTarget::AllMethods));
        }
        if self.allow_requested {
            grants.push(Grant::new(allow, GrantTarget::RequestedMethod));
        }
        if self.deny_requested {
            grants.push(Grant::new(deny, GrantTarget::RequestedMethod));
        }
        for (effect, targets) in [(allow, &self.allow), (deny, &self.deny)] {
            for target in targets {
                grants.push(Grant::new(
                    effect,
                    GrantTarget::Method {
                        method: target.method.clone(),
                        resource_path: target.resource_path.clone(),
                    },
                ));
            }
        }
        if let (Some(effect), Some(method)) = (&self.effect, &self.method) {
            grants.push(Grant::new(
                effect.clone(),
                GrantTarget::Method {
                    method: method.clone(),
                    resource_path: self.resource.clone().unwrap_or_else(|| "*".to_string()),
                },
            ));
        }

        grants
    }

    fn response(&self) -> Result<AuthorizerResponse> {
        let grants = self.grants();
        if grants.is_empty() {
            warn!("No grants given; the policy has no statements and every request is denied");
        }
        debug!("Applying {} grant(s)", grants.len());

        let mut response = authorize(&self.principal_id, &self.method_arn, &grants)
            .context("Failed to build authorizer policy")?;

        for entry in &self.context {
            response = response.with_context(entry.key.clone(), entry.value.clone());
        }
        if let Some(key) = &self.usage_identifier_key {
            response = response.with_usage_identifier_key(key.clone());
        }

        Ok(response)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let response = cli.response()?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    }
    .context("Failed to serialize authorizer response")?;

    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if e.downcast_ref::<AuthorizerError>().is_some() {
                ExitCode::from(EXIT_INVALID_INPUT)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
