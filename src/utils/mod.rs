// 工具模块
pub mod default_config;
pub mod unified_logger;

pub use default_config::create_default_config;
pub use unified_logger::{init_logger, LogConfig};
