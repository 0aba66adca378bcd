//! Provisioning pipeline tests against the mock resource client

mod common;

use common::MockClient;
use ipnet::Ipv4Net;
use std::str::FromStr;
use std::sync::Arc;
use vpcflow_cloud::{WaitConfig, WaitSettings};
use vpcflow_net::{NetError, ProvisionRequest};
use vpcflow_topology::{ProvisionError, ProvisionStep, TopologyProvisioner};

fn request(pairs: u32) -> ProvisionRequest {
    ProvisionRequest::new("demo", Ipv4Net::from_str("10.0.0.0/16").unwrap(), pairs)
}

fn provisioner(client: &Arc<MockClient>) -> TopologyProvisioner {
    TopologyProvisioner::new(client.clone())
        .with_wait_settings(WaitSettings::uniform(WaitConfig::new(3, 0)))
}

#[tokio::test]
async fn test_full_run_builds_two_pairs() {
    let client = Arc::new(MockClient::new());
    let topology = provisioner(&client).provision(&request(2)).await.unwrap();

    assert!(topology.completed);
    assert!(topology.vpc_id.is_some());
    assert!(topology.internet_gateway_id.is_some());
    assert_eq!(topology.pairs.len(), 2);
    assert!(topology.pairs.iter().all(|p| p.is_complete()));

    // Deterministic partitioning of 10.0.0.0/16 into two pairs
    assert_eq!(topology.pairs[0].public_plan.cidr.to_string(), "10.0.0.0/18");
    assert_eq!(topology.pairs[1].public_plan.cidr.to_string(), "10.0.64.0/18");
    assert_eq!(topology.pairs[0].private_plan.cidr.to_string(), "10.0.128.0/18");
    assert_eq!(topology.pairs[1].private_plan.cidr.to_string(), "10.0.192.0/18");

    // Zone round robin
    assert_eq!(topology.pairs[0].zone(), "us-east-1a");
    assert_eq!(topology.pairs[1].zone(), "us-east-1b");

    // 2 subnets + 2 route tables per pair
    assert_eq!(client.calls_for("create_subnet"), 4);
    assert_eq!(client.calls_for("create_route_table"), 4);
    assert_eq!(client.calls_for("create_route"), 2);
    assert_eq!(client.calls_for("associate_route_table"), 4);
}

#[tokio::test]
async fn test_resource_names_follow_the_vpc_name() {
    let client = Arc::new(MockClient::new());
    provisioner(&client).provision(&request(2)).await.unwrap();

    assert!(client.has_call_ending("tag_resource", " demo"));
    assert!(client.has_call_ending("tag_resource", " demo-IGW"));
    assert!(client.has_call_ending("tag_resource", " demo-public-subnet-1"));
    assert!(client.has_call_ending("tag_resource", " demo-private-subnet-2"));
    assert!(client.has_call_ending("tag_resource", " demo-public-rt-1"));
    assert!(client.has_call_ending("tag_resource", " demo-private-rt-2"));
}

#[tokio::test]
async fn test_dependency_ordering() {
    let client = Arc::new(MockClient::new());
    provisioner(&client).provision(&request(1)).await.unwrap();

    let vpc = client.position_of("create_vpc").unwrap();
    let igw = client.position_of("create_internet_gateway").unwrap();
    let attach = client.position_of("attach_internet_gateway").unwrap();
    let subnet = client.position_of("create_subnet").unwrap();
    let route = client.position_of("create_route").unwrap();
    let associate = client.position_of("associate_route_table").unwrap();

    assert!(vpc < igw);
    assert!(igw < attach);
    assert!(attach < subnet);
    assert!(subnet < route);
    assert!(route < associate);
}

#[tokio::test]
async fn test_pair_count_out_of_range_makes_no_calls() {
    let client = Arc::new(MockClient::new());
    let err = provisioner(&client).provision(&request(201)).await.unwrap_err();

    assert!(matches!(
        err,
        ProvisionError::Config(NetError::PairCountOutOfRange(201))
    ));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_exhausted_parent_rejected_before_any_call() {
    let client = Arc::new(MockClient::new());
    let req = ProvisionRequest::new("demo", Ipv4Net::from_str("10.0.0.0/24").unwrap(), 16);
    let err = provisioner(&client).provision(&req).await.unwrap_err();

    assert!(matches!(
        err,
        ProvisionError::Config(NetError::InsufficientAddressSpace { .. })
    ));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_single_zone_rejected_before_mutating_calls() {
    let client = Arc::new(MockClient::new().with_zones(&["us-east-1a"]));
    let err = provisioner(&client).provision(&request(2)).await.unwrap_err();

    assert!(matches!(
        err,
        ProvisionError::Config(NetError::NotEnoughZones { found: 1 })
    ));
    // Only the read-only zone listing may have happened
    assert_eq!(client.call_count(), 1);
    assert_eq!(client.calls_for("available_zones"), 1);
}

#[tokio::test]
async fn test_private_subnet_failure_keeps_partial_topology() {
    // Pair 0 creates subnets on calls 1 and 2; pair 1's private subnet is call 4
    let client = Arc::new(MockClient::new().fail_on("create_subnet", 4));
    let err = provisioner(&client).provision(&request(2)).await.unwrap_err();

    let ProvisionError::Step {
        step,
        pair_index,
        topology,
        ..
    } = &err
    else {
        panic!("expected step failure, got {err:?}");
    };
    assert_eq!(*step, ProvisionStep::CreatePrivateSubnet);
    assert_eq!(*pair_index, Some(1));
    assert!(!err.is_timeout());

    assert!(!topology.completed);
    assert_eq!(topology.pairs.len(), 2);
    assert!(topology.pairs[0].is_complete());
    assert!(topology.pairs[1].public_subnet_id.is_some());
    assert!(topology.pairs[1].private_subnet_id.is_none());
    assert!(topology.pairs[1].private_route_table_id.is_none());

    // vpc + igw + 3 subnets + pair 0's route tables are all reported for cleanup
    assert_eq!(topology.created_ids().len(), 7);
}

#[tokio::test]
async fn test_waiter_timeout_is_distinguishable() {
    let client = Arc::new(MockClient::new().with_pending_subnets());
    let err = provisioner(&client).provision(&request(1)).await.unwrap_err();

    assert!(err.is_timeout());
    let ProvisionError::Step { step, topology, .. } = &err else {
        panic!("expected step failure, got {err:?}");
    };
    assert_eq!(*step, ProvisionStep::WaitPublicSubnetAvailable);
    // The subnet id is in the report so the operator can re-poll it
    assert!(topology.pairs[0].public_subnet_id.is_some());
    // Exactly max_attempts polls, no more
    assert_eq!(client.calls_for("describe_subnet"), 3);
}

#[tokio::test]
async fn test_zone_round_robin_wraps() {
    let client = Arc::new(MockClient::new());
    let topology = provisioner(&client).provision(&request(3)).await.unwrap();

    let zones: Vec<&str> = topology.pairs.iter().map(|p| p.zone()).collect();
    assert_eq!(zones, vec!["us-east-1a", "us-east-1b", "us-east-1a"]);
}

#[tokio::test]
async fn test_db_subnet_group_uses_private_subnets() {
    let client = Arc::new(MockClient::new());
    let p = provisioner(&client);
    let topology = p.provision(&request(2)).await.unwrap();

    let group = p.create_db_subnet_group("demo-db", &topology).await.unwrap();
    assert_eq!(group, "demo-db");

    let ids = topology.private_subnet_ids();
    assert_eq!(ids.len(), 2);
    assert!(client.has_call(&format!("create_db_subnet_group demo-db [{}]", ids.join(" "))));
}

#[tokio::test]
async fn test_db_subnet_group_requires_zone_diversity() {
    let client = Arc::new(MockClient::new());
    let p = provisioner(&client);
    // One pair lands in a single zone
    let topology = p.provision(&request(1)).await.unwrap();

    let err = p.create_db_subnet_group("demo-db", &topology).await.unwrap_err();
    assert!(matches!(
        err,
        ProvisionError::Config(NetError::NotEnoughZones { found: 1 })
    ));
    assert_eq!(client.calls_for("create_db_subnet_group"), 0);
}
