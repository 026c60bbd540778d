pub mod core;
pub mod strategies;
pub mod utils;

// 选择性导出，避免与 std::result::Result 冲突
pub use crate::core::config::{BehaviorEntry, SaleConfig, SaleSettings};
pub use crate::core::error::{ErrorSeverity, SaleError};
pub use crate::core::types::SaleQuote;
pub use strategies::*;
