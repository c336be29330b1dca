mod cli;

use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::debug;

use rust_gradebook::config::AppConfig;
use rust_gradebook::errors::{GradebookError, Result};
use rust_gradebook::runtime::{RunRequest, run};
use rust_gradebook::services::GradeService;
use rust_gradebook::utils::parse_timestamp;

use cli::Cli;

fn main() -> ExitCode {
    dotenv().ok();
    setup_panic!();

    let cli = Cli::parse();

    // 初始化配置
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志（输出到 stderr，stdout 只用于结果）
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    debug!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.system_name
    );

    match execute(&cli, config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            #[cfg(not(debug_assertions))]
            eprintln!("{}", e.format_simple());
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli, config: &AppConfig) -> Result<String> {
    let source = cli
        .source()
        .ok_or_else(|| GradebookError::validation("缺少输入文件"))?;

    // 评估时间只确定一次：命令行 > 配置 > 当前时间
    let now = match cli.now.as_deref() {
        Some(value) => parse_timestamp(value)?,
        None => config.evaluation_time()?.unwrap_or_else(chrono::Utc::now),
    };

    let request = RunRequest {
        source,
        now,
        pretty: config.output.pretty && !cli.compact,
        precision: config.output_precision()?,
    };

    run(&request, &GradeService::new(config.grading_policy()?))
}
