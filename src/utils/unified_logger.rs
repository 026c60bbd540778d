/// 统一日志模块
/// 基于 env_logger，RUST_LOG 优先于配置中的日志级别
use chrono::Local;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub default_level: String,
    pub show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: "INFO".to_string(),
            show_target: true,
        }
    }
}

impl LogConfig {
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            default_level: level.into(),
            ..Self::default()
        }
    }

    /// 无法识别的级别回退到 INFO
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.default_level.trim()).unwrap_or_else(|_| {
            eprintln!("未知日志级别 {}，使用 INFO", self.default_level);
            LevelFilter::Info
        })
    }
}

/// 初始化全局日志，重复调用返回错误
pub fn init_logger(config: &LogConfig) -> Result<(), log::SetLoggerError> {
    let default_filter = config.level_filter().to_string();
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let show_target = config.show_target;

    env_logger::Builder::from_env(env)
        .format(move |buf, record| {
            if show_target {
                writeln!(
                    buf,
                    "[{}] [{}] [{}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    record.args()
                )
            } else {
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            }
        })
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_parsing() {
        assert_eq!(LogConfig::with_level("DEBUG").level_filter(), LevelFilter::Debug);
        assert_eq!(LogConfig::with_level("warn").level_filter(), LevelFilter::Warn);
        assert_eq!(LogConfig::with_level(" info ").level_filter(), LevelFilter::Info);
        assert_eq!(LogConfig::with_level("verbose").level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_fails() {
        let config = LogConfig::with_level("ERROR");
        let _ = init_logger(&config);
        assert!(init_logger(&config).is_err());
    }
}
