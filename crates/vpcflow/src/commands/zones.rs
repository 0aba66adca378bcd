use colored::Colorize;
use vpcflow_cloud::ResourceClient;
use vpcflow_cloud_aws::{AwsCli, AwsResourceClient};

/// 新規サブネットを受け入れ可能なアベイラビリティゾーンを一覧表示する。
pub async fn handle(region: Option<String>, profile: Option<String>) -> anyhow::Result<()> {
    let mut cli = AwsCli::new();
    if let Some(region) = region {
        cli = cli.with_region(region);
    }
    if let Some(profile) = profile {
        cli = cli.with_profile(profile);
    }
    let client = AwsResourceClient::new(cli);

    let zones = client.available_zones().await?;
    println!("{}", format!("利用可能なゾーン ({} 個):", zones.len()).bold());
    for zone in &zones {
        println!("  • {}", zone.cyan());
    }

    Ok(())
}
