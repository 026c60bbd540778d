use crate::core::error::SaleError;
use crate::strategies::common::application::strategy::Behavior;

/// 外币销售：按构造时给定的汇率换算
#[derive(Debug, Clone, PartialEq)]
pub struct FixedConversionBehavior {
    name: String,
    conversion_factor: f64,
}

impl FixedConversionBehavior {
    pub const KIND: &'static str = "fixed_conversion";

    pub fn new(conversion_factor: f64) -> Result<Self, SaleError> {
        Self::named(Self::KIND, conversion_factor)
    }

    pub fn named(name: impl Into<String>, conversion_factor: f64) -> Result<Self, SaleError> {
        if !conversion_factor.is_finite() {
            return Err(SaleError::validation(
                "conversion_factor",
                format!("必须为有限数值: {}", conversion_factor),
            ));
        }
        Ok(Self {
            name: name.into(),
            conversion_factor,
        })
    }

    pub fn conversion_factor(&self) -> f64 {
        self.conversion_factor
    }
}

impl Behavior for FixedConversionBehavior {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, amount: f64) -> f64 {
        amount * self.conversion_factor
    }

    fn describe(&self) -> String {
        format!("conversion_factor={}", self.conversion_factor())
    }
}
