use crate::core::error::SaleError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 环境变量覆盖前缀，例如 RUSTSALE__SALE__DEFAULT_BEHAVIOR=foreign
pub const ENV_PREFIX: &str = "RUSTSALE";

fn default_log_level() -> String {
    "INFO".to_string()
}

/// 运行参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleSettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub default_behavior: String,
}

/// 单个策略的配置项，params 按 kind 交给注册表中的工厂解析
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorEntry {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleConfig {
    pub sale: SaleSettings,
    pub behaviors: Vec<BehaviorEntry>,
}

impl SaleConfig {
    /// 从配置文件加载（按扩展名识别YAML/TOML），再叠加环境变量覆盖
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SaleError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SaleError::ConfigError(format!(
                "配置文件不存在: {}",
                path.display()
            )));
        }

        let config: SaleConfig = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!(
            "已加载配置 {}: {} 个策略",
            path.display(),
            config.behaviors.len()
        );
        Ok(config)
    }

    /// 直接解析YAML文本，不读取环境变量
    pub fn from_yaml_str(contents: &str) -> Result<Self, SaleError> {
        let config: SaleConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SaleError> {
        if self.behaviors.is_empty() {
            return Err(SaleError::ConfigError("未配置任何策略".to_string()));
        }

        let mut seen = HashSet::new();
        for entry in &self.behaviors {
            if entry.name.trim().is_empty() {
                return Err(SaleError::validation("behaviors.name", "策略名称不能为空"));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(SaleError::ConfigError(format!(
                    "策略名称重复: {}",
                    entry.name
                )));
            }
        }

        if !seen.contains(self.sale.default_behavior.as_str()) {
            return Err(SaleError::ConfigError(format!(
                "默认策略 {} 未在 behaviors 中配置",
                self.sale.default_behavior
            )));
        }

        Ok(())
    }

    pub fn entry(&self, name: &str) -> Option<&BehaviorEntry> {
        self.behaviors.iter().find(|entry| entry.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.iter().map(|entry| entry.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // 环境变量为进程级共享，读取文件的测试需串行
    static ENV_LOCK: Mutex<()> = Mutex::new(());
    const DEFAULT_BEHAVIOR_VAR: &str = "RUSTSALE__SALE__DEFAULT_BEHAVIOR";

    fn write_sample() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = r#"
sale:
  log_level: DEBUG
  default_behavior: regular
behaviors:
  - name: regular
    kind: fixed_rate
    params:
      rate: 0.16
  - name: discount
    kind: discounted_rate
    params:
      rate: 0.16
      discount: 3.0
  - name: foreign
    kind: fixed_conversion
    params:
      conversion_factor: 18.0
"#;

    #[test]
    fn test_parse_yaml() {
        let config = SaleConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.sale.log_level, "DEBUG");
        assert_eq!(
            config.names().collect::<Vec<_>>(),
            vec!["regular", "discount", "foreign"]
        );
        let discount = config.entry("discount").unwrap();
        assert_eq!(discount.kind, "discounted_rate");
        assert_eq!(discount.params["discount"].as_f64(), Some(3.0));
    }

    #[test]
    fn test_log_level_defaults_to_info() {
        let yaml = r#"
sale:
  default_behavior: only
behaviors:
  - name: only
    kind: fixed_rate
    params: { rate: 0.0 }
"#;
        let config = SaleConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.sale.log_level, "INFO");
    }

    #[test]
    fn test_missing_default_behavior_rejected() {
        let yaml = r#"
sale:
  default_behavior: missing
behaviors:
  - name: regular
    kind: fixed_rate
    params: { rate: 0.16 }
"#;
        let err = SaleConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SaleError::ConfigError(_)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let yaml = r#"
sale:
  default_behavior: regular
behaviors:
  - name: regular
    kind: fixed_rate
    params: { rate: 0.16 }
  - name: regular
    kind: fixed_conversion
    params: { conversion_factor: 18.0 }
"#;
        let err = SaleConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SaleError::ConfigError(_)));
    }

    #[test]
    fn test_from_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = write_sample();

        let config = SaleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.behaviors.len(), 3);
        assert_eq!(config.sale.default_behavior, "regular");
        let foreign = config.entry("foreign").unwrap();
        assert_eq!(foreign.params["conversion_factor"].as_f64(), Some(18.0));
    }

    #[test]
    fn test_env_overrides_default_behavior() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = write_sample();

        std::env::set_var(DEFAULT_BEHAVIOR_VAR, "foreign");
        let result = SaleConfig::from_file(file.path());
        std::env::remove_var(DEFAULT_BEHAVIOR_VAR);

        let config = result.unwrap();
        assert_eq!(config.sale.default_behavior, "foreign");
        assert_eq!(config.sale.log_level, "DEBUG");
        assert_eq!(config.behaviors.len(), 3);
    }

    #[test]
    fn test_env_override_to_unknown_behavior_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = write_sample();

        std::env::set_var(DEFAULT_BEHAVIOR_VAR, "missing");
        let result = SaleConfig::from_file(file.path());
        std::env::remove_var(DEFAULT_BEHAVIOR_VAR);

        let err = result.unwrap_err();
        assert!(matches!(err, SaleError::ConfigError(ref msg) if msg.contains("missing")));
    }

    #[test]
    fn test_from_file_missing() {
        let err = SaleConfig::from_file("does/not/exist.yml").unwrap_err();
        assert!(matches!(err, SaleError::ConfigError(_)));
    }
}
