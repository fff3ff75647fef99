//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//! 库代码只调用 `tracing` 宏，订阅者由可执行程序通过 [`init_logger`] 安装。
//!
//! # 使用示例
//!
//! ```no_run
//! use dist_waves::core::log;
//! use dist_waves::core::config::LogLevel;
//!
//! log::init_logger(LogLevel::Info, false, None).expect("logger");
//! tracing::info!(rows = 128, cols = 128, "Wave field created");
//! ```

use std::path::Path;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::config::LogLevel;
use super::error::{DistWavesError, Result};

/// 初始化日志系统
///
/// 必须在程序开始时调用一次，重复调用返回 `DistWavesError::Log`。
///
/// # 参数
///
/// * `level` - 日志级别，`RUST_LOG` 环境变量存在时优先使用环境变量
/// * `file_output` - 是否同时输出到文件（按天滚动）
/// * `log_file_path` - 日志文件路径（可选，默认为 "distwaves.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(true);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer);

    let result = if file_output {
        let log_path = log_file_path.unwrap_or("distwaves.log");
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("distwaves.log");

        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(file_appender);

        registry.with(file_layer).try_init()
    } else {
        registry.try_init()
    };

    result.map_err(|e| DistWavesError::Log(e.to_string()))
}

impl LogLevel {
    /// `EnvFilter` 使用的指令字符串
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// 模拟核心日志 - Debug 级别
#[macro_export]
macro_rules! sim_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "distwaves::sim", $($arg)*)
    };
}

/// 模拟核心日志 - Warn 级别
#[macro_export]
macro_rules! sim_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "distwaves::sim", $($arg)*)
    };
}

/// 驱动层日志 - Info 级别
#[macro_export]
macro_rules! app_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "distwaves::app", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(LogLevel::Trace.as_filter(), "trace");
    }
}
