//! aws CLI wrapper
//!
//! Runs `aws <service> <operation> --output json` and classifies
//! failures into the shared error taxonomy. The heavyweight SDK chain is
//! deliberately not linked; the CLI is the transport, exactly like the
//! other cloud wrappers in this family of tools.

use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;
use vpcflow_cloud::{CloudError, Result};

const ERROR_PREFIX: &str = "An error occurred (";

/// aws CLI invoker with optional region/profile overrides.
///
/// Credentials come from the CLI's own configuration chain (environment,
/// shared config, SSO); this wrapper never touches secrets.
#[derive(Debug, Clone, Default)]
pub struct AwsCli {
    region: Option<String>,
    profile: Option<String>,
}

impl AwsCli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Run an aws command and return stdout.
    pub(crate) async fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("aws");
        if let Some(region) = &self.region {
            cmd.arg("--region").arg(region);
        }
        if let Some(profile) = &self.profile {
            cmd.arg("--profile").arg(profile);
        }
        cmd.args(args);
        cmd.arg("--output").arg("json");
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: aws {}", args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_cli_error(stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Verify the CLI is configured and the credentials resolve.
    pub async fn check_auth(&self) -> Result<CallerIdentity> {
        let output = self.run(&["sts", "get-caller-identity"]).await?;
        let identity: CallerIdentity = serde_json::from_str(&output)?;
        Ok(identity)
    }
}

/// Identity answering `sts get-caller-identity`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallerIdentity {
    #[serde(rename = "Account")]
    pub account: String,

    #[serde(rename = "Arn")]
    pub arn: String,
}

/// Classify an aws CLI failure by its structured error code.
///
/// The CLI prints `An error occurred (<Code>) when calling the <Op>
/// operation: <message>`; the code, not the message text, decides the
/// variant. Output without a code means the CLI itself failed before the
/// API answered.
pub(crate) fn classify_cli_error(stderr: &str) -> CloudError {
    let Some(code) = extract_error_code(stderr) else {
        return CloudError::CommandFailed(stderr.to_string());
    };

    if code.ends_with(".Duplicate") || code.contains("AlreadyExists") {
        CloudError::ResourceAlreadyExists(code)
    } else if code.ends_with(".NotFound") || code.ends_with("NotFoundFault") {
        CloudError::ResourceNotFound(code)
    } else if matches!(
        code.as_str(),
        "RequestLimitExceeded" | "Throttling" | "ThrottlingException"
    ) {
        CloudError::RateLimited(stderr.to_string())
    } else if matches!(
        code.as_str(),
        "AuthFailure"
            | "UnauthorizedOperation"
            | "ExpiredToken"
            | "RequestExpired"
            | "InvalidClientTokenId"
    ) {
        CloudError::AuthenticationFailed(stderr.to_string())
    } else {
        CloudError::Api {
            code: Some(code),
            message: stderr.to_string(),
        }
    }
}

fn extract_error_code(stderr: &str) -> Option<String> {
    let start = stderr.find(ERROR_PREFIX)? + ERROR_PREFIX.len();
    let rest = &stderr[start..];
    let end = rest.find(')')?;
    Some(rest[..end].to_string())
}
