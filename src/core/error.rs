use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaleError {
    #[error("构造错误: {0}")]
    ConstructionError(String),

    #[error("状态错误: {0}")]
    InvalidState(String),

    #[error("参数验证错误: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("不支持的策略类型: {0}")]
    UnsupportedBehavior(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("配置加载错误: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("YAML配置错误: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON序列化错误: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),
}

impl SaleError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SaleError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SaleError::ValidationError { .. } => ErrorSeverity::Warning,
            SaleError::UnsupportedBehavior(_) => ErrorSeverity::Error,
            SaleError::SerdeError(_) | SaleError::IoError(_) => ErrorSeverity::Error,
            SaleError::InvalidState(_) => ErrorSeverity::Critical,
            SaleError::ConstructionError(_) => ErrorSeverity::Critical,
            SaleError::ConfigError(_) | SaleError::ConfigSource(_) | SaleError::YamlError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 按严重程度映射到日志级别
    pub fn log_level(&self) -> log::Level {
        match self.severity() {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // 信息性错误
    Warning,  // 输入问题，修正参数即可
    Error,    // 一般错误
    Critical, // 上下文或配置不可用
}
