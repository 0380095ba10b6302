//! crawler-validate：校验本地爬虫语料库文件
//!
//! 退出码：
//! - 0：校验通过
//! - 1：校验失败或文件格式不规范
//! - 2：文件读取或 JSON 解析失败

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crawler_agents::utils::{canonical_form, is_canonical};
use crawler_agents::{
    ConfigManager, CustomConfigBuilder, FailurePolicy, MatchMode, OverlapMode, RawCorpus,
    ValidationReport, Validator,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OverlapArg {
    Search,
    Prefix,
}

impl From<OverlapArg> for OverlapMode {
    fn from(arg: OverlapArg) -> Self {
        match arg {
            OverlapArg::Search => OverlapMode::Search,
            OverlapArg::Prefix => OverlapMode::Prefix,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "crawler-validate")]
#[command(about = "Validate a crawler user-agent pattern corpus")]
#[command(version)]
struct Args {
    /// 语料库文件路径
    #[arg(default_value = "crawler-user-agents.json")]
    path: PathBuf,

    /// instances 字段可选
    #[arg(long)]
    lenient: bool,

    /// 语料库实例总数下限
    #[arg(long, value_name = "N")]
    min_instances: Option<usize>,

    /// 重叠检测语义
    #[arg(long, value_enum, default_value = "search")]
    overlap_mode: OverlapArg,

    /// 实例校验忽略大小写
    #[arg(long)]
    case_insensitive: bool,

    /// 遇到第一条违规即停止
    #[arg(long)]
    fail_fast: bool,

    /// 检查文件是否为规范格式
    #[arg(long)]
    check_format: bool,

    /// 将文件重写为规范格式
    #[arg(long, conflicts_with = "check_format")]
    write_format: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn validator(&self) -> Validator {
        let base = if self.lenient {
            ConfigManager::lenient()
        } else {
            ConfigManager::get_default()
        };
        let mut builder = CustomConfigBuilder::from_config(base)
            .overlap_mode(self.overlap_mode.into())
            .instance_mode(MatchMode::from_case_sensitive(!self.case_insensitive));
        if let Some(min) = self.min_instances {
            builder = builder.min_instances(min);
        }
        if self.fail_fast {
            builder = builder.failure_policy(FailurePolicy::FailFast);
        }
        Validator::new(builder.build())
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 校验失败返回 Ok(false)，IO/JSON 错误返回 Err
fn run(args: &Args) -> anyhow::Result<bool> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    debug!("Corpus file loaded | Path: {} | Bytes: {}", args.path.display(), text.len());

    if args.write_format {
        let formatted = canonical_form(&text)
            .with_context(|| format!("failed to parse {}", args.path.display()))?;
        if formatted != text {
            fs::write(&args.path, &formatted)
                .with_context(|| format!("failed to write {}", args.path.display()))?;
            info!("Rewrote {} in canonical format", args.path.display());
        }
    } else if args.check_format
        && !is_canonical(&text).with_context(|| format!("failed to parse {}", args.path.display()))?
    {
        eprintln!(
            "{} is not in canonical format (run with --write-format to fix)",
            args.path.display()
        );
        return Ok(false);
    }

    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", args.path.display()))?;

    let validator = args.validator();
    let outcome = RawCorpus::from_value(value)
        .map_err(ValidationReport::from)
        .and_then(|raw| validator.validate(&raw));

    match outcome {
        Ok(()) => {
            println!("Validation passed");
            Ok(true)
        }
        Err(report) => {
            for error in report.errors() {
                eprintln!("{}", error);
            }
            eprintln!("Validation failed with {} violation(s)", report.len());
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
