//! Topology provisioner
//!
//! Executes the resource-creation pipeline in dependency order: virtual
//! network, internet gateway, then one public/private subnet pair per
//! index with route tables and associations. Forward-only: any provider
//! failure ends the run with the partial topology attached.

use crate::error::{ProvisionError, Result};
use crate::report::{SubnetPairRecord, VpcTopology};
use crate::step::ProvisionStep;
use ipnet::Ipv4Net;
use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use vpcflow_cloud::{LifecycleState, ResourceClient, ResourceKind, WaitSettings, wait_for_state};
use vpcflow_net::{MIN_ZONE_COUNT, NetError, ProvisionRequest, SubnetPlan, SubnetRole};

/// Destination for the public route tables' internet route.
const DEFAULT_ROUTE: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::UNSPECIFIED, 0);

/// Orchestrates one provisioning run against an injected resource client.
pub struct TopologyProvisioner {
    client: Arc<dyn ResourceClient>,
    wait: WaitSettings,
}

impl TopologyProvisioner {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            wait: WaitSettings::default(),
        }
    }

    /// Override the per-kind waiter cadences.
    pub fn with_wait_settings(mut self, wait: WaitSettings) -> Self {
        self.wait = wait;
        self
    }

    /// Build the full topology for `request`.
    ///
    /// The request is validated and the zone list fetched before the
    /// first mutating call; configuration problems never leave partial
    /// infrastructure behind.
    pub async fn provision(&self, request: &ProvisionRequest) -> Result<VpcTopology> {
        request.validate()?;

        let zones = self
            .client
            .available_zones()
            .await
            .map_err(|e| {
                ProvisionError::step(
                    ProvisionStep::DescribeAvailabilityZones,
                    None,
                    e,
                    &VpcTopology::new(request),
                )
            })?;
        let distinct: BTreeSet<&str> = zones.iter().map(String::as_str).collect();
        if distinct.len() < MIN_ZONE_COUNT {
            return Err(NetError::NotEnoughZones {
                found: distinct.len(),
            }
            .into());
        }

        tracing::info!(
            "provisioning {} ({}) with {} subnet pairs across {} zones",
            request.vpc_name,
            request.vpc_cidr,
            request.pair_count,
            distinct.len()
        );

        let mut topology = VpcTopology::new(request);

        self.create_vpc(request, &mut topology).await?;
        self.create_gateway(request, &mut topology).await?;

        for index in 0..request.pair_count {
            let zone = &zones[index as usize % zones.len()];
            self.create_pair(request, &mut topology, index, zone).await?;
        }

        topology.completed = true;
        tracing::info!(
            "topology for {} complete: {} resources",
            request.vpc_name,
            topology.created_ids().len()
        );
        Ok(topology)
    }

    /// Group the private subnets of a completed topology for managed
    /// database placement. Needs pairs in at least two distinct zones.
    pub async fn create_db_subnet_group(
        &self,
        name: &str,
        topology: &VpcTopology,
    ) -> Result<String> {
        let zones: BTreeSet<&str> = topology
            .pairs
            .iter()
            .filter(|p| p.private_subnet_id.is_some())
            .map(|p| p.zone())
            .collect();
        if zones.len() < MIN_ZONE_COUNT {
            return Err(NetError::NotEnoughZones { found: zones.len() }.into());
        }

        let subnet_ids = topology.private_subnet_ids();
        let group_id = self
            .client
            .create_db_subnet_group(name, &subnet_ids)
            .await
            .map_err(|e| {
                ProvisionError::step(ProvisionStep::CreateDbSubnetGroup, None, e, topology)
            })?;

        tracing::info!("db subnet group {name} spans {} private subnets", subnet_ids.len());
        Ok(group_id)
    }

    async fn create_vpc(
        &self,
        request: &ProvisionRequest,
        topology: &mut VpcTopology,
    ) -> Result<()> {
        let vpc_id = self
            .client
            .create_vpc(request.vpc_cidr)
            .await
            .map_err(|e| ProvisionError::step(ProvisionStep::CreateVpc, None, e, topology))?;
        tracing::info!("created vpc {vpc_id} ({})", request.vpc_cidr);
        topology.vpc_id = Some(vpc_id.clone());

        wait_for_state(
            self.client.as_ref(),
            ResourceKind::Vpc,
            &vpc_id,
            LifecycleState::Available,
            self.wait.for_kind(ResourceKind::Vpc),
        )
        .await
        .map_err(|e| ProvisionError::step(ProvisionStep::WaitVpcAvailable, None, e, topology))?;

        self.client
            .enable_vpc_dns(&vpc_id)
            .await
            .map_err(|e| ProvisionError::step(ProvisionStep::EnableVpcDns, None, e, topology))?;

        self.client
            .tag_resource(&vpc_id, &request.vpc_name)
            .await
            .map_err(|e| ProvisionError::step(ProvisionStep::TagVpc, None, e, topology))?;

        Ok(())
    }

    async fn create_gateway(
        &self,
        request: &ProvisionRequest,
        topology: &mut VpcTopology,
    ) -> Result<()> {
        let igw_id = self.client.create_internet_gateway().await.map_err(|e| {
            ProvisionError::step(ProvisionStep::CreateInternetGateway, None, e, topology)
        })?;
        tracing::info!("created internet gateway {igw_id}");
        topology.internet_gateway_id = Some(igw_id.clone());

        self.client
            .tag_resource(&igw_id, &format!("{}-IGW", request.vpc_name))
            .await
            .map_err(|e| {
                ProvisionError::step(ProvisionStep::TagInternetGateway, None, e, topology)
            })?;

        // vpc_id is always set by the time the gateway is attached
        let vpc_id = topology.vpc_id.clone().unwrap_or_default();
        self.client
            .attach_internet_gateway(&igw_id, &vpc_id)
            .await
            .map_err(|e| {
                ProvisionError::step(ProvisionStep::AttachInternetGateway, None, e, topology)
            })?;

        Ok(())
    }

    async fn create_pair(
        &self,
        request: &ProvisionRequest,
        topology: &mut VpcTopology,
        index: u32,
        zone: &str,
    ) -> Result<()> {
        let vpc_id = topology.vpc_id.clone().unwrap_or_default();
        let igw_id = topology.internet_gateway_id.clone().unwrap_or_default();

        let public_plan = SubnetPlan::compute(
            request.vpc_cidr,
            request.pair_count,
            index,
            SubnetRole::Public,
            zone,
        )?;
        let private_plan = SubnetPlan::compute(
            request.vpc_cidr,
            request.pair_count,
            index,
            SubnetRole::Private,
            zone,
        )?;
        tracing::debug!(
            "pair {index} in {zone}: public {}, private {}",
            public_plan.cidr,
            private_plan.cidr
        );

        topology
            .pairs
            .push(SubnetPairRecord::new(public_plan, private_plan));
        let slot = index as usize;
        let fail = |step, e, t: &VpcTopology| ProvisionError::step(step, Some(index), e, t);

        // Public subnet
        let public_cidr = topology.pairs[slot].public_plan.cidr;
        let public_subnet_id = self
            .client
            .create_subnet(&vpc_id, public_cidr, zone)
            .await
            .map_err(|e| fail(ProvisionStep::CreatePublicSubnet, e, topology))?;
        topology.pairs[slot].public_subnet_id = Some(public_subnet_id.clone());

        wait_for_state(
            self.client.as_ref(),
            ResourceKind::Subnet,
            &public_subnet_id,
            LifecycleState::Available,
            self.wait.for_kind(ResourceKind::Subnet),
        )
        .await
        .map_err(|e| fail(ProvisionStep::WaitPublicSubnetAvailable, e, topology))?;

        self.client
            .tag_resource(
                &public_subnet_id,
                &pair_name(&request.vpc_name, "public-subnet", index),
            )
            .await
            .map_err(|e| fail(ProvisionStep::TagPublicSubnet, e, topology))?;

        self.client
            .enable_public_ip_on_launch(&public_subnet_id)
            .await
            .map_err(|e| fail(ProvisionStep::EnablePublicIp, e, topology))?;

        // Private subnet
        let private_cidr = topology.pairs[slot].private_plan.cidr;
        let private_subnet_id = self
            .client
            .create_subnet(&vpc_id, private_cidr, zone)
            .await
            .map_err(|e| fail(ProvisionStep::CreatePrivateSubnet, e, topology))?;
        topology.pairs[slot].private_subnet_id = Some(private_subnet_id.clone());

        wait_for_state(
            self.client.as_ref(),
            ResourceKind::Subnet,
            &private_subnet_id,
            LifecycleState::Available,
            self.wait.for_kind(ResourceKind::Subnet),
        )
        .await
        .map_err(|e| fail(ProvisionStep::WaitPrivateSubnetAvailable, e, topology))?;

        self.client
            .tag_resource(
                &private_subnet_id,
                &pair_name(&request.vpc_name, "private-subnet", index),
            )
            .await
            .map_err(|e| fail(ProvisionStep::TagPrivateSubnet, e, topology))?;

        // Public route table: default route to the gateway, then associate
        let public_rt_id = self
            .client
            .create_route_table(&vpc_id)
            .await
            .map_err(|e| fail(ProvisionStep::CreatePublicRouteTable, e, topology))?;
        topology.pairs[slot].public_route_table_id = Some(public_rt_id.clone());

        self.client
            .tag_resource(
                &public_rt_id,
                &pair_name(&request.vpc_name, "public-rt", index),
            )
            .await
            .map_err(|e| fail(ProvisionStep::TagPublicRouteTable, e, topology))?;

        self.client
            .create_route(&public_rt_id, DEFAULT_ROUTE, &igw_id)
            .await
            .map_err(|e| fail(ProvisionStep::AddDefaultRoute, e, topology))?;

        self.client
            .associate_route_table(&public_rt_id, &public_subnet_id)
            .await
            .map_err(|e| fail(ProvisionStep::AssociatePublicRouteTable, e, topology))?;

        // Private route table: local routes only
        let private_rt_id = self
            .client
            .create_route_table(&vpc_id)
            .await
            .map_err(|e| fail(ProvisionStep::CreatePrivateRouteTable, e, topology))?;
        topology.pairs[slot].private_route_table_id = Some(private_rt_id.clone());

        self.client
            .tag_resource(
                &private_rt_id,
                &pair_name(&request.vpc_name, "private-rt", index),
            )
            .await
            .map_err(|e| fail(ProvisionStep::TagPrivateRouteTable, e, topology))?;

        self.client
            .associate_route_table(&private_rt_id, &private_subnet_id)
            .await
            .map_err(|e| fail(ProvisionStep::AssociatePrivateRouteTable, e, topology))?;

        Ok(())
    }
}

/// Resource names are 1-based, matching the operator-facing numbering.
fn pair_name(base: &str, kind: &str, index: u32) -> String {
    format!("{base}-{kind}-{}", index + 1)
}
