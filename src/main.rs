use std::fs;
use std::path::PathBuf;

use booklet::{BookletConfig, DEFAULT_CONFIG_PATH, FsPageFetcher, HtmlBundleRenderer, Result, generate_booklet};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 📚 Booklet - 文档站点打印工具
#[derive(Parser)]
#[command(name = "booklet")]
#[command(about = "将文档站点的所有页面整理为一个可打印的文档")]
#[command(version)]
struct Args {
    /// 入口页面路径
    #[arg(help = "第一个页面的路径，例如 /docs/intro", required_unless_present = "init_config")]
    entry_point: Option<String>,

    /// 站点构建输出目录
    #[arg(short, long, default_value = "build", help = "站点生成器的输出目录")]
    base_dir: PathBuf,

    /// 输出文件
    #[arg(short, long, default_value = "booklet.html", help = "生成的文档路径")]
    output: PathBuf,

    /// 配置文件
    #[arg(short, long, help = "YAML配置文件路径")]
    config: Option<PathBuf>,

    #[arg(long, help = "封面标题（覆盖配置文件）")]
    cover_title: Option<String>,

    #[arg(long, help = "封面副标题（覆盖配置文件）")]
    cover_subtitle: Option<String>,

    #[arg(long, help = "封面背景图片（覆盖配置文件）")]
    cover_background: Option<PathBuf>,

    #[arg(long, help = "不为标题编号")]
    no_autonumber: bool,

    /// 生成默认配置文件后退出
    #[arg(long, help = "在当前目录生成默认配置文件 booklet.yaml")]
    init_config: bool,
}

fn main() {
    init_tracing();

    if let Err(err) = run(Args::parse()) {
        error!(error = %err, "booklet generation failed");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if args.init_config {
        BookletConfig::generate_default_config(DEFAULT_CONFIG_PATH)?;
        info!("default config written to {}", DEFAULT_CONFIG_PATH);
        return Ok(());
    }

    let mut config = BookletConfig::load_or_default(args.config.as_deref())?;
    if let Some(title) = args.cover_title {
        config.cover.title = title;
    }
    if let Some(subtitle) = args.cover_subtitle {
        config.cover.subtitle = Some(subtitle);
    }
    if let Some(background) = args.cover_background {
        config.cover.background_image = Some(background);
    }
    if args.no_autonumber {
        config.autonumber = false;
    }

    let entry_point = args.entry_point.unwrap_or_default();
    let fetcher = FsPageFetcher::new(&args.base_dir);
    let document = generate_booklet(&config, &entry_point, &fetcher, &HtmlBundleRenderer)?;

    fs::write(&args.output, document)?;
    info!("booklet written to {}", args.output.display());
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
