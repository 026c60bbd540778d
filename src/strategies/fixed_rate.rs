use crate::core::error::SaleError;
use crate::strategies::common::application::strategy::Behavior;

/// 常规销售：金额加上固定税率
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRateBehavior {
    name: String,
    rate: f64,
}

impl FixedRateBehavior {
    pub const KIND: &'static str = "fixed_rate";

    pub fn new(rate: f64) -> Result<Self, SaleError> {
        Self::named(Self::KIND, rate)
    }

    pub fn named(name: impl Into<String>, rate: f64) -> Result<Self, SaleError> {
        validate_rate(rate)?;
        Ok(Self {
            name: name.into(),
            rate,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Behavior for FixedRateBehavior {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, amount: f64) -> f64 {
        amount + amount * self.rate
    }

    fn describe(&self) -> String {
        format!("rate={}", self.rate())
    }
}

/// 税率必须为非负有限数，上限不做限制
pub(crate) fn validate_rate(rate: f64) -> Result<(), SaleError> {
    if !rate.is_finite() {
        return Err(SaleError::validation("rate", format!("必须为有限数值: {}", rate)));
    }
    if rate < 0.0 {
        return Err(SaleError::validation("rate", format!("不能为负数: {}", rate)));
    }
    Ok(())
}
