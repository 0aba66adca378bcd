//! Shared mock resource client for provisioner tests

use async_trait::async_trait;
use ipnet::Ipv4Net;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use vpcflow_cloud::{CloudError, LifecycleState, ResourceClient, Result};

/// In-memory client that hands out sequential identifiers and records
/// every call, with optional failure injection on the n-th occurrence of
/// one operation.
pub struct MockClient {
    zones: Vec<String>,
    pub calls: Mutex<Vec<String>>,
    op_counts: Mutex<HashMap<&'static str, u32>>,
    next_id: AtomicU32,
    fail_op: Option<&'static str>,
    fail_at: u32,
    subnets_stay_pending: bool,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            zones: vec!["us-east-1a".into(), "us-east-1b".into()],
            calls: Mutex::new(Vec::new()),
            op_counts: Mutex::new(HashMap::new()),
            next_id: AtomicU32::new(1),
            fail_op: None,
            fail_at: 0,
            subnets_stay_pending: false,
        }
    }

    pub fn with_zones(mut self, zones: &[&str]) -> Self {
        self.zones = zones.iter().map(|z| z.to_string()).collect();
        self
    }

    /// Fail the `occurrence`-th (1-based) invocation of `op`.
    pub fn fail_on(mut self, op: &'static str, occurrence: u32) -> Self {
        self.fail_op = Some(op);
        self.fail_at = occurrence;
        self
    }

    /// Keep every subnet in `pending` so waiters never succeed.
    pub fn with_pending_subnets(mut self) -> Self {
        self.subnets_stay_pending = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(op))
            .count()
    }

    /// Position of the first call starting with `op`, for ordering checks.
    pub fn position_of(&self, op: &str) -> Option<usize> {
        self.calls.lock().unwrap().iter().position(|c| c.starts_with(op))
    }

    pub fn has_call(&self, call: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == call)
    }

    /// True when some `op` call was recorded with `suffix` as its last token.
    pub fn has_call_ending(&self, op: &str, suffix: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.starts_with(op) && c.ends_with(suffix))
    }

    fn record(&self, op: &'static str, detail: String) -> Result<()> {
        self.calls.lock().unwrap().push(if detail.is_empty() {
            op.to_string()
        } else {
            format!("{op} {detail}")
        });

        let mut counts = self.op_counts.lock().unwrap();
        let count = counts.entry(op).or_insert(0);
        *count += 1;

        if self.fail_op == Some(op) && *count == self.fail_at {
            return Err(CloudError::Api {
                code: Some("InternalError".into()),
                message: format!("injected failure on {op}"),
            });
        }
        Ok(())
    }

    fn issue_id(&self, prefix: &str) -> String {
        format!("{prefix}-{:04}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ResourceClient for MockClient {
    async fn create_vpc(&self, cidr: Ipv4Net) -> Result<String> {
        self.record("create_vpc", cidr.to_string())?;
        Ok(self.issue_id("vpc"))
    }

    async fn describe_vpc(&self, vpc_id: &str) -> Result<LifecycleState> {
        self.record("describe_vpc", vpc_id.to_string())?;
        Ok(LifecycleState::Available)
    }

    async fn enable_vpc_dns(&self, vpc_id: &str) -> Result<()> {
        self.record("enable_vpc_dns", vpc_id.to_string())
    }

    async fn create_internet_gateway(&self) -> Result<String> {
        self.record("create_internet_gateway", String::new())?;
        Ok(self.issue_id("igw"))
    }

    async fn attach_internet_gateway(&self, igw_id: &str, vpc_id: &str) -> Result<()> {
        self.record("attach_internet_gateway", format!("{igw_id} {vpc_id}"))
    }

    async fn create_subnet(&self, vpc_id: &str, cidr: Ipv4Net, zone: &str) -> Result<String> {
        self.record("create_subnet", format!("{vpc_id} {cidr} {zone}"))?;
        Ok(self.issue_id("subnet"))
    }

    async fn describe_subnet(&self, subnet_id: &str) -> Result<LifecycleState> {
        self.record("describe_subnet", subnet_id.to_string())?;
        if self.subnets_stay_pending {
            Ok(LifecycleState::Pending)
        } else {
            Ok(LifecycleState::Available)
        }
    }

    async fn enable_public_ip_on_launch(&self, subnet_id: &str) -> Result<()> {
        self.record("enable_public_ip_on_launch", subnet_id.to_string())
    }

    async fn create_route_table(&self, vpc_id: &str) -> Result<String> {
        self.record("create_route_table", vpc_id.to_string())?;
        Ok(self.issue_id("rtb"))
    }

    async fn create_route(
        &self,
        route_table_id: &str,
        destination: Ipv4Net,
        gateway_id: &str,
    ) -> Result<()> {
        self.record(
            "create_route",
            format!("{route_table_id} {destination} {gateway_id}"),
        )
    }

    async fn associate_route_table(&self, route_table_id: &str, subnet_id: &str) -> Result<()> {
        self.record(
            "associate_route_table",
            format!("{route_table_id} {subnet_id}"),
        )
    }

    async fn tag_resource(&self, resource_id: &str, name: &str) -> Result<()> {
        self.record("tag_resource", format!("{resource_id} {name}"))
    }

    async fn available_zones(&self) -> Result<Vec<String>> {
        self.record("available_zones", String::new())?;
        Ok(self.zones.clone())
    }

    async fn create_db_subnet_group(&self, name: &str, subnet_ids: &[String]) -> Result<String> {
        self.record(
            "create_db_subnet_group",
            format!("{name} [{}]", subnet_ids.join(" ")),
        )?;
        Ok(name.to_string())
    }
}
