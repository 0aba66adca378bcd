use crate::OutputFormat;
use colored::Colorize;
use ipnet::Ipv4Net;
use std::sync::Arc;
use vpcflow_cloud::WaitSettings;
use vpcflow_cloud_aws::{AwsCli, AwsResourceClient};
use vpcflow_net::ProvisionRequest;
use vpcflow_topology::{TopologyProvisioner, VpcTopology};

/// VPC トポロジを構築する。
///
/// 認証確認のあとにリクエストを検証し、VPC → IGW → サブネットペアの
/// 順でリソースを作成する。失敗時は作成済みリソースの一覧を表示して
/// 終了する（自動ロールバックはしない）。
#[allow(clippy::too_many_arguments)]
pub async fn handle(
    vpc_name: String,
    vpc_cidr: Ipv4Net,
    pairs: u32,
    region: Option<String>,
    profile: Option<String>,
    db_subnet_group: Option<String>,
    wait: WaitSettings,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let mut cli = AwsCli::new();
    if let Some(region) = region {
        cli = cli.with_region(region);
    }
    if let Some(profile) = profile {
        cli = cli.with_profile(profile);
    }
    let client = AwsResourceClient::new(cli);

    println!("{}", "認証を確認中...".blue());
    let identity = client.check_auth().await?;
    println!("  アカウント: {}", identity.account.cyan());

    let request = ProvisionRequest::new(vpc_name, vpc_cidr, pairs);
    let provisioner = TopologyProvisioner::new(Arc::new(client)).with_wait_settings(wait);

    println!();
    println!(
        "{}",
        format!(
            "トポロジを構築中: {} ({}, {} ペア)",
            request.vpc_name, request.vpc_cidr, request.pair_count
        )
        .blue()
    );

    let topology = match provisioner.provision(&request).await {
        Ok(topology) => topology,
        Err(err) => {
            eprintln!("{} {}", "✗".red(), err);
            if let Some(partial) = err.partial_topology() {
                print_cleanup_list(partial);
            }
            return Err(err.into());
        }
    };

    println!("{} トポロジ構築完了", "✓".green());

    let group = if let Some(name) = db_subnet_group {
        match provisioner.create_db_subnet_group(&name, &topology).await {
            Ok(group) => {
                println!("{} DB サブネットグループ: {}", "✓".green(), group.cyan());
                Some(group)
            }
            Err(err) => {
                eprintln!("{} {}", "✗".red(), err);
                print_cleanup_list(&topology);
                return Err(err.into());
            }
        }
    } else {
        None
    };

    match output {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "topology": &topology,
                "db_subnet_group": group,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_topology(&topology),
    }

    Ok(())
}

fn print_topology(topology: &VpcTopology) {
    println!();
    println!("{}", "--- 構築結果 ---".bold());
    if let Some(vpc_id) = &topology.vpc_id {
        println!("VPC ID: {} (Name: {})", vpc_id.cyan(), topology.vpc_name);
    }
    if let Some(igw_id) = &topology.internet_gateway_id {
        println!("Internet Gateway ID: {}", igw_id.cyan());
    }

    for pair in &topology.pairs {
        println!();
        println!("サブネットペア {} ({}):", pair.index() + 1, pair.zone());
        if let Some(id) = &pair.public_subnet_id {
            println!(
                "  Public Subnet ID: {} (CIDR: {})",
                id.cyan(),
                pair.public_plan.cidr
            );
        }
        if let Some(id) = &pair.private_subnet_id {
            println!(
                "  Private Subnet ID: {} (CIDR: {})",
                id.cyan(),
                pair.private_plan.cidr
            );
        }
        if let Some(id) = &pair.public_route_table_id {
            println!("  Public Route Table ID: {}", id.cyan());
        }
        if let Some(id) = &pair.private_route_table_id {
            println!("  Private Route Table ID: {}", id.cyan());
        }
    }
    println!("{}", "----------------".bold());
}

fn print_cleanup_list(topology: &VpcTopology) {
    let ids = topology.created_ids();
    if ids.is_empty() {
        return;
    }
    eprintln!("作成済みのリソース（手動クリーンアップ対象）:");
    for id in ids {
        eprintln!("  • {id}");
    }
}
