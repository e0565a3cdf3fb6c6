use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    fmt::{format::FmtSpan, writer::MakeWriterExt},
    EnvFilter,
};

pub const CLI_PREFIX: &str = "cli";

const DEFAULT_LEVEL: &str = "info";
const KEPT_LOG_FILES: usize = 5;

/// Where and how much the CLI logs. Files always go to `<data dir>/logs`, the console only
/// receives logs when `echo` is set.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub prefix: &'static str,
    pub dir: PathBuf,
    pub level: Option<LevelFilter>,
    pub echo: bool,
}

impl LogConfig {
    pub fn new(prefix: &'static str, data_dir: &Path) -> Self {
        Self {
            prefix,
            dir: data_dir.join("logs"),
            level: None,
            echo: false,
        }
    }

    /// Directive for this crate only, so dependencies stay quiet.
    fn directive(&self) -> String {
        let level = resolve_level(self.level, std::env::var("RUST_LOG").ok());
        format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
    }
}

/// `--log-filter` wins over `RUST_LOG`, which wins over the default.
fn resolve_level(flag: Option<LevelFilter>, env: Option<String>) -> String {
    flag.map(|v| v.to_string().to_lowercase())
        .or(env.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_LEVEL.into())
}

/// Installs the global subscriber. The console echo goes to stderr so that listings printed on
/// stdout stay tab separated.
pub fn enable_logging(config: LogConfig) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(KEPT_LOG_FILES)
        .filename_prefix(config.prefix)
        .build(&config.dir)?;

    let echo = config.echo;
    let console = std::io::stderr.with_filter(move |_| echo);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.directive()))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(console.and(appender))
        .pretty()
        .init();
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
