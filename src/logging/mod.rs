//! # 日志记录模块 (Logging Module)
//!
//! ## 业务说明
//! 看板核心只记录两类信息：用户的选择操作，以及数据质量问题
//! （例如状态码无法识别而被排除的读数）。输出由 env_logger 负责。
//!
//! ## Rust知识点
//! - **日志宏**: 使用log crate的宏系统
//! - **环境配置**: `RUST_LOG` 优先于配置文件中的级别

use log::LevelFilter;

use crate::utils::config::LoggingConfig;
use crate::utils::error::{AppError, AppResult};

/// 解析配置中的日志级别
pub fn parse_level(level: &str) -> AppResult<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(AppError::configuration_error(format!(
            "无效的日志级别: {}，有效值: off/error/warn/info/debug/trace",
            other
        ))),
    }
}

/// 初始化全局日志，重复初始化时静默忽略
pub fn init_logger(config: &LoggingConfig) -> AppResult<()> {
    if !config.console_output {
        log::set_max_level(LevelFilter::Off);
        return Ok(());
    }

    let level = parse_level(&config.log_level)?;
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    if builder.try_init().is_err() {
        log::debug!("日志系统已经初始化，跳过");
    }
    Ok(())
}

/// 记录数据质量问题（不中断本次请求）
#[macro_export]
macro_rules! log_data_quality {
    ($msg:expr) => {
        log::warn!("[数据质量] {}", $msg);
    };
    ($msg:expr, $($arg:tt)*) => {
        log::warn!("[数据质量] {}", format!($msg, $($arg)*));
    };
}

/// 记录用户操作日志
#[macro_export]
macro_rules! log_user_operation {
    ($msg:expr) => {
        log::info!("[用户操作] {}", $msg);
    };
    ($msg:expr, $($arg:tt)*) => {
        log::info!("[用户操作] {}", format!($msg, $($arg)*));
    };
}

// 重新导出宏
pub use log_data_quality;
pub use log_user_operation;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" debug ").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("verbose").unwrap_err().error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_init_logger_twice_is_ok() {
        let config = LoggingConfig::default();
        assert!(init_logger(&config).is_ok());
        assert!(init_logger(&config).is_ok());
    }
}
