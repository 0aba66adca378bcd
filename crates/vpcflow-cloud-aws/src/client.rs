//! ResourceClient implementation over the aws CLI

use crate::awscli::{AwsCli, CallerIdentity};
use async_trait::async_trait;
use ipnet::Ipv4Net;
use serde::Deserialize;
use vpcflow_cloud::{CloudError, LifecycleState, ResourceClient, Result};

/// AWS-backed resource client.
///
/// Thin translation layer: each trait operation maps onto one `aws ec2`
/// (or `aws rds`) invocation and pulls the relevant identifier out of
/// the JSON response.
pub struct AwsResourceClient {
    cli: AwsCli,
}

impl AwsResourceClient {
    pub fn new(cli: AwsCli) -> Self {
        Self { cli }
    }

    /// Resolve the active credentials, for a pre-flight auth check.
    pub async fn check_auth(&self) -> Result<CallerIdentity> {
        self.cli.check_auth().await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VpcState {
    state: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateVpcResponse {
    vpc: VpcId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VpcId {
    vpc_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeVpcsResponse {
    vpcs: Vec<VpcState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateInternetGatewayResponse {
    internet_gateway: InternetGatewayId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InternetGatewayId {
    internet_gateway_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateSubnetResponse {
    subnet: SubnetId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SubnetId {
    subnet_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SubnetState {
    state: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeSubnetsResponse {
    subnets: Vec<SubnetState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateRouteTableResponse {
    route_table: RouteTableId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RouteTableId {
    route_table_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAvailabilityZonesResponse {
    availability_zones: Vec<AvailabilityZone>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AvailabilityZone {
    zone_name: String,
}

#[derive(Debug, Deserialize)]
struct CreateDbSubnetGroupResponse {
    #[serde(rename = "DBSubnetGroup")]
    db_subnet_group: DbSubnetGroupName,
}

#[derive(Debug, Deserialize)]
struct DbSubnetGroupName {
    #[serde(rename = "DBSubnetGroupName")]
    db_subnet_group_name: String,
}

#[async_trait]
impl ResourceClient for AwsResourceClient {
    async fn create_vpc(&self, cidr: Ipv4Net) -> Result<String> {
        let cidr = cidr.to_string();
        let output = self
            .cli
            .run(&["ec2", "create-vpc", "--cidr-block", &cidr])
            .await?;
        let response: CreateVpcResponse = serde_json::from_str(&output)?;
        Ok(response.vpc.vpc_id)
    }

    async fn describe_vpc(&self, vpc_id: &str) -> Result<LifecycleState> {
        let output = self
            .cli
            .run(&["ec2", "describe-vpcs", "--vpc-ids", vpc_id])
            .await?;
        let response: DescribeVpcsResponse = serde_json::from_str(&output)?;
        let vpc = response
            .vpcs
            .first()
            .ok_or_else(|| CloudError::InvalidResponse(format!("no vpc in response for {vpc_id}")))?;
        Ok(LifecycleState::parse(&vpc.state))
    }

    async fn enable_vpc_dns(&self, vpc_id: &str) -> Result<()> {
        // One attribute per call, the API refuses combined updates
        self.cli
            .run(&[
                "ec2",
                "modify-vpc-attribute",
                "--vpc-id",
                vpc_id,
                "--enable-dns-support",
            ])
            .await?;
        self.cli
            .run(&[
                "ec2",
                "modify-vpc-attribute",
                "--vpc-id",
                vpc_id,
                "--enable-dns-hostnames",
            ])
            .await?;
        Ok(())
    }

    async fn create_internet_gateway(&self) -> Result<String> {
        let output = self.cli.run(&["ec2", "create-internet-gateway"]).await?;
        let response: CreateInternetGatewayResponse = serde_json::from_str(&output)?;
        Ok(response.internet_gateway.internet_gateway_id)
    }

    async fn attach_internet_gateway(&self, igw_id: &str, vpc_id: &str) -> Result<()> {
        self.cli
            .run(&[
                "ec2",
                "attach-internet-gateway",
                "--internet-gateway-id",
                igw_id,
                "--vpc-id",
                vpc_id,
            ])
            .await?;
        Ok(())
    }

    async fn create_subnet(&self, vpc_id: &str, cidr: Ipv4Net, zone: &str) -> Result<String> {
        let cidr = cidr.to_string();
        let output = self
            .cli
            .run(&[
                "ec2",
                "create-subnet",
                "--vpc-id",
                vpc_id,
                "--cidr-block",
                &cidr,
                "--availability-zone",
                zone,
            ])
            .await?;
        let response: CreateSubnetResponse = serde_json::from_str(&output)?;
        Ok(response.subnet.subnet_id)
    }

    async fn describe_subnet(&self, subnet_id: &str) -> Result<LifecycleState> {
        let output = self
            .cli
            .run(&["ec2", "describe-subnets", "--subnet-ids", subnet_id])
            .await?;
        let response: DescribeSubnetsResponse = serde_json::from_str(&output)?;
        let subnet = response.subnets.first().ok_or_else(|| {
            CloudError::InvalidResponse(format!("no subnet in response for {subnet_id}"))
        })?;
        Ok(LifecycleState::parse(&subnet.state))
    }

    async fn enable_public_ip_on_launch(&self, subnet_id: &str) -> Result<()> {
        self.cli
            .run(&[
                "ec2",
                "modify-subnet-attribute",
                "--subnet-id",
                subnet_id,
                "--map-public-ip-on-launch",
            ])
            .await?;
        Ok(())
    }

    async fn create_route_table(&self, vpc_id: &str) -> Result<String> {
        let output = self
            .cli
            .run(&["ec2", "create-route-table", "--vpc-id", vpc_id])
            .await?;
        let response: CreateRouteTableResponse = serde_json::from_str(&output)?;
        Ok(response.route_table.route_table_id)
    }

    async fn create_route(
        &self,
        route_table_id: &str,
        destination: Ipv4Net,
        gateway_id: &str,
    ) -> Result<()> {
        let destination = destination.to_string();
        self.cli
            .run(&[
                "ec2",
                "create-route",
                "--route-table-id",
                route_table_id,
                "--destination-cidr-block",
                &destination,
                "--gateway-id",
                gateway_id,
            ])
            .await?;
        Ok(())
    }

    async fn associate_route_table(&self, route_table_id: &str, subnet_id: &str) -> Result<()> {
        self.cli
            .run(&[
                "ec2",
                "associate-route-table",
                "--route-table-id",
                route_table_id,
                "--subnet-id",
                subnet_id,
            ])
            .await?;
        Ok(())
    }

    async fn tag_resource(&self, resource_id: &str, name: &str) -> Result<()> {
        let tag = format!("Key=Name,Value={name}");
        self.cli
            .run(&["ec2", "create-tags", "--resources", resource_id, "--tags", &tag])
            .await?;
        Ok(())
    }

    async fn available_zones(&self) -> Result<Vec<String>> {
        let output = self
            .cli
            .run(&[
                "ec2",
                "describe-availability-zones",
                "--filters",
                "Name=state,Values=available",
            ])
            .await?;
        let response: DescribeAvailabilityZonesResponse = serde_json::from_str(&output)?;
        Ok(response
            .availability_zones
            .into_iter()
            .map(|z| z.zone_name)
            .collect())
    }

    async fn create_db_subnet_group(&self, name: &str, subnet_ids: &[String]) -> Result<String> {
        let description = format!("Subnet group for {name}");
        let mut args = vec![
            "rds",
            "create-db-subnet-group",
            "--db-subnet-group-name",
            name,
            "--db-subnet-group-description",
            &description,
            "--subnet-ids",
        ];
        for id in subnet_ids {
            args.push(id.as_str());
        }

        let output = self.cli.run(&args).await?;
        let response: CreateDbSubnetGroupResponse = serde_json::from_str(&output)?;
        Ok(response.db_subnet_group.db_subnet_group_name)
    }
}
