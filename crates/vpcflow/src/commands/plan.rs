use crate::OutputFormat;
use colored::Colorize;
use ipnet::Ipv4Net;
use vpcflow_net::{SubnetRole, allocate_subnet_cidr, subnet_prefix_len};

/// サブネット分割プランを計算して表示する。純粋計算のみで、
/// プロバイダ API には一切アクセスしない。
pub fn handle(vpc_cidr: Ipv4Net, pairs: u32, output: OutputFormat) -> anyhow::Result<()> {
    let prefix = subnet_prefix_len(vpc_cidr, pairs)?;

    let mut subnets = Vec::with_capacity(pairs as usize * 2);
    for index in 0..pairs {
        for role in [SubnetRole::Public, SubnetRole::Private] {
            let cidr = allocate_subnet_cidr(vpc_cidr, pairs, index, role)?;
            subnets.push((index, role, cidr));
        }
    }

    match output {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "vpc_cidr": vpc_cidr.to_string(),
                "pair_count": pairs,
                "subnet_prefix_len": prefix,
                "subnets": subnets
                    .iter()
                    .map(|(index, role, cidr)| {
                        serde_json::json!({
                            "index": index,
                            "role": role,
                            "cidr": cidr.to_string(),
                        })
                    })
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "{} {} を {} ペアに分割 (サブネットは /{prefix})",
                "プラン:".bold(),
                vpc_cidr.to_string().cyan(),
                pairs
            );
            for (index, role, cidr) in &subnets {
                println!("  {:>7} {}: {}", role.to_string(), index + 1, cidr.to_string().cyan());
            }
        }
    }

    Ok(())
}
