use crate::core::config::{BehaviorEntry, SaleConfig, SaleSettings};
use crate::strategies::{DiscountedRateBehavior, FixedConversionBehavior, FixedRateBehavior};
use serde_yaml::{Mapping, Value};

/// 默认税率 16%
pub const DEFAULT_TAX_RATE: f64 = 0.16;
/// 折扣销售的固定减免额
pub const DEFAULT_DISCOUNT: f64 = 3.0;
/// 外币销售的固定汇率
pub const DEFAULT_CONVERSION_FACTOR: f64 = 18.0;

fn params(pairs: &[(&str, f64)]) -> Value {
    let mut mapping = Mapping::new();
    for (key, value) in pairs {
        mapping.insert(Value::from(*key), Value::from(*value));
    }
    Value::Mapping(mapping)
}

/// 创建默认配置：常规、折扣、外币三种销售策略
pub fn create_default_config() -> SaleConfig {
    SaleConfig {
        sale: SaleSettings {
            log_level: "INFO".to_string(),
            default_behavior: "regular".to_string(),
        },
        behaviors: vec![
            BehaviorEntry {
                name: "regular".to_string(),
                kind: FixedRateBehavior::KIND.to_string(),
                params: params(&[("rate", DEFAULT_TAX_RATE)]),
            },
            BehaviorEntry {
                name: "discount".to_string(),
                kind: DiscountedRateBehavior::KIND.to_string(),
                params: params(&[("rate", DEFAULT_TAX_RATE), ("discount", DEFAULT_DISCOUNT)]),
            },
            BehaviorEntry {
                name: "foreign".to_string(),
                kind: FixedConversionBehavior::KIND.to_string(),
                params: params(&[("conversion_factor", DEFAULT_CONVERSION_FACTOR)]),
            },
        ],
    }
}
