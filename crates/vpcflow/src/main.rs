mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use ipnet::Ipv4Net;
use vpcflow_cloud::{WaitConfig, WaitSettings};

#[derive(Parser)]
#[command(name = "vpcflow")]
#[command(version)]
#[command(about = "宣言して、待つだけ。VPC トポロジ構築ツール", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 人が読むためのテキスト
    Text,
    /// 機械処理向けの JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// VPC トポロジを構築（VPC、IGW、サブネットペア、ルートテーブル）
    Up {
        /// VPC の Name タグ
        #[arg(long)]
        vpc_name: String,
        /// VPC の CIDR ブロック (例: 10.0.0.0/16)
        #[arg(long)]
        vpc_cidr: Ipv4Net,
        /// 作成する public/private サブネットペア数 (1..=200)
        #[arg(long)]
        pairs: u32,
        /// AWS リージョン
        #[arg(long, env = "VPCFLOW_REGION")]
        region: Option<String>,
        /// AWS プロファイル
        #[arg(long, env = "VPCFLOW_PROFILE")]
        profile: Option<String>,
        /// private サブネットから DB サブネットグループを作成する
        #[arg(long)]
        db_subnet_group: Option<String>,
        /// 状態待機のポーリング回数上限
        #[arg(long, default_value = "40")]
        wait_attempts: u32,
        /// 状態待機のポーリング間隔（ミリ秒）
        #[arg(long, default_value = "3000")]
        wait_interval_ms: u64,
        /// 出力フォーマット
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
    /// サブネット分割プランを表示（API 呼び出しなし）
    Plan {
        /// VPC の CIDR ブロック (例: 10.0.0.0/16)
        #[arg(long)]
        vpc_cidr: Ipv4Net,
        /// public/private サブネットペア数 (1..=200)
        #[arg(long)]
        pairs: u32,
        /// 出力フォーマット
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
    /// 利用可能なアベイラビリティゾーンを表示
    Zones {
        /// AWS リージョン
        #[arg(long, env = "VPCFLOW_REGION")]
        region: Option<String>,
        /// AWS プロファイル
        #[arg(long, env = "VPCFLOW_PROFILE")]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Up {
            vpc_name,
            vpc_cidr,
            pairs,
            region,
            profile,
            db_subnet_group,
            wait_attempts,
            wait_interval_ms,
            output,
        } => {
            let wait = WaitSettings::uniform(WaitConfig::new(wait_attempts, wait_interval_ms));
            commands::up::handle(
                vpc_name,
                vpc_cidr,
                pairs,
                region,
                profile,
                db_subnet_group,
                wait,
                output,
            )
            .await?;
        }
        Commands::Plan {
            vpc_cidr,
            pairs,
            output,
        } => {
            commands::plan::handle(vpc_cidr, pairs, output)?;
        }
        Commands::Zones { region, profile } => {
            commands::zones::handle(region, profile).await?;
        }
    }

    Ok(())
}
