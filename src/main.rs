//! # SSO Fixtures CLI
//!
//! `generate` writes a new dataset, `show` summarizes an existing one.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, error::ErrorKind};
use sso_fixtures::{
    config::{ConfigLoader, GenerationConfig},
    generator,
    report::DatasetReport,
    storage, telemetry,
};

/// SSO 测试数据生成工具
#[derive(Parser)]
#[command(name = "sso-fixtures")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成新的测试数据
    Generate(GenerateArgs),
    /// 显示测试数据统计
    Show(ShowArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// 用户数量
    #[arg(short = 'u', long = "users", default_value_t = 10, allow_negative_numbers = true)]
    users: i64,

    /// 组织架构深度
    #[arg(short = 'd', long = "org-depth", default_value_t = 3, allow_negative_numbers = true)]
    org_depth: i64,

    /// 每层组织分支数
    #[arg(short = 'b', long = "org-branches", default_value_t = 2, allow_negative_numbers = true)]
    org_branches: i64,

    /// 从JSON配置文件读取参数
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// 输出文件路径
    #[arg(short = 'o', long = "output", default_value = "./test-data/test-data.json")]
    output: PathBuf,
}

#[derive(Args)]
struct ShowArgs {
    /// 要显示的测试数据文件路径
    #[arg(short = 'f', long = "file")]
    file: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("错误: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let app_config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;
    if let Err(err) = telemetry::init_tracing(&app_config) {
        eprintln!("警告: 日志初始化失败: {err}");
    }

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Show(args) => show(args),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => GenerationConfig::from_file(path)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?,
        None => GenerationConfig::from_values(args.users, args.org_depth, args.org_branches)
            .context("参数无效")?,
    };

    println!("正在生成测试数据...");
    println!("- 用户数量: {}", config.user_count);
    println!("- 组织深度: {}", config.org_depth);
    println!("- 每层分支数: {}", config.org_branches);

    let dataset = generator::generate(&config);

    println!("生成完成:");
    println!("- 实际生成用户: {}", dataset.users.len());
    println!("- 实际生成组织: {}", dataset.orgs.len());

    storage::save(&dataset, &args.output).context("保存文件失败")?;
    println!("测试数据已保存到: {}", args.output.display());
    Ok(())
}

fn show(args: ShowArgs) -> Result<()> {
    let dataset = storage::load(&args.file).context("加载测试数据失败")?;
    print!("{}", DatasetReport::new(&dataset));
    Ok(())
}
