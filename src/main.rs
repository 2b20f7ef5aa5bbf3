// ==========================================
// 超市销售数据看板 - 命令行主入口
// ==========================================
// 配置合并顺序: 配置文件 → 环境变量 → 命令行参数
// 输出: stdout 为页面内容（文本或 JSON），日志写 stderr
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use supermarket_sales::api::PageView;
use supermarket_sales::app::{console, AppState};
use supermarket_sales::config::DashboardConfig;
use supermarket_sales::logging::{self, LogFormat};
use supermarket_sales::{i18n, APP_NAME, VERSION};

/// 页面输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// 超市销售数据看板
///
/// 加载销售表（xlsx / csv），派生时间字段，按页面目录回答业务问题。
///
/// Examples:
///   supermarket-sales --list
///   supermarket-sales --page sales --locale en
///   supermarket-sales --data supermarket_sales.csv --format json
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 数据文件路径（xlsx / xls / csv）
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// JSON 配置文件路径
    #[arg(short, long, value_name = "FILE", env = "SUPERMARKET_SALES_CONFIG")]
    config: Option<PathBuf>,

    /// 自定义页面目录（JSON）
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// 显示语言（pt-BR / en / zh-CN）
    #[arg(short, long)]
    locale: Option<String>,

    /// 页面 id（默认渲染全部页面）
    #[arg(short, long)]
    page: Option<String>,

    /// 只列出导航菜单
    #[arg(long)]
    list: bool,

    /// 输出格式
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// 日志格式
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 配置文件先于日志初始化读取（日志格式可能来自配置）
    let loaded = args.config.as_deref().map(DashboardConfig::load);
    let mut config = match &loaded {
        Some(Ok(config)) => config.clone(),
        _ => DashboardConfig::default(),
    };
    config.apply_env_overrides();

    logging::init(args.log_format.unwrap_or(config.log_format));

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    if let Some(Err(e)) = &loaded {
        tracing::warn!(error = %e, "配置文件无效，使用默认配置");
    }

    apply_cli_overrides(&mut config, &args)?;
    config.validate().context("配置校验失败")?;

    let state = AppState::new(config);
    let api = &state.dashboard_api;

    if args.list {
        let pages = api.list_pages();
        match args.format {
            OutputFormat::Text => print!("{}", console::render_menu(api.locale(), &pages)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pages)?),
        }
        return Ok(());
    }

    let views: Vec<PageView> = match &args.page {
        Some(id) => vec![api.render_page(id)?],
        None => api.render_all(),
    };

    match args.format {
        OutputFormat::Text => {
            for view in &views {
                print!("{}", console::render_page(view));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&views)?),
    }

    Ok(())
}

/// 命令行参数覆写配置
fn apply_cli_overrides(config: &mut DashboardConfig, args: &Args) -> Result<()> {
    if let Some(path) = &args.data {
        config.data_path = Some(path.clone());
    }
    if let Some(path) = &args.catalog {
        config.catalog_path = Some(path.clone());
    }
    if let Some(locale) = &args.locale {
        if !i18n::is_supported(locale) {
            anyhow::bail!(
                "不支持的语言: {} (可用: {})",
                locale,
                i18n::available_locales().join(", ")
            );
        }
        config.locale = locale.clone();
    }
    if let Some(format) = args.log_format {
        config.log_format = format;
    }
    Ok(())
}
