use crate::core::error::SaleError;
use crate::strategies::common::application::strategy::Behavior;
use crate::strategies::fixed_rate::validate_rate;

/// 折扣销售：含税金额减去固定折扣
///
/// 折扣超过含税金额时结果为负数，原样返回，不做截断。
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedRateBehavior {
    name: String,
    rate: f64,
    discount: f64,
}

impl DiscountedRateBehavior {
    pub const KIND: &'static str = "discounted_rate";

    pub fn new(rate: f64, discount: f64) -> Result<Self, SaleError> {
        Self::named(Self::KIND, rate, discount)
    }

    pub fn named(name: impl Into<String>, rate: f64, discount: f64) -> Result<Self, SaleError> {
        validate_rate(rate)?;
        if !discount.is_finite() {
            return Err(SaleError::validation(
                "discount",
                format!("必须为有限数值: {}", discount),
            ));
        }
        Ok(Self {
            name: name.into(),
            rate,
            discount,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }
}

impl Behavior for DiscountedRateBehavior {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, amount: f64) -> f64 {
        amount + amount * self.rate - self.discount
    }

    fn describe(&self) -> String {
        format!("rate={} discount={}", self.rate(), self.discount())
    }
}
