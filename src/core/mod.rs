// 核心模块 - 配置、错误与数据类型
pub mod config;
pub mod error;
pub mod types;

pub use self::config::*;
pub use error::{ErrorSeverity, SaleError};
pub use types::SaleQuote;
