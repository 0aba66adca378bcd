//! AWS resource client for vpcflow
//!
//! Implements the [`ResourceClient`](vpcflow_cloud::ResourceClient)
//! facade by wrapping the `aws` CLI with JSON output. Authentication,
//! retries below the API, and region resolution all belong to the CLI's
//! configuration chain; this crate only translates operations and
//! classifies failures.

pub mod awscli;
pub mod client;

// Re-exports
pub use awscli::{AwsCli, CallerIdentity};
pub use client::AwsResourceClient;
