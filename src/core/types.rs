use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一次策略计算的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleQuote {
    pub behavior: String,
    pub amount: f64,
    pub total: f64,
    pub computed_at: DateTime<Utc>,
}

impl SaleQuote {
    pub fn new(behavior: impl Into<String>, amount: f64, total: f64) -> Self {
        Self {
            behavior: behavior.into(),
            amount,
            total,
            computed_at: Utc::now(),
        }
    }

    /// 策略带来的增减额（税费为正，折扣超出时为负）
    pub fn adjustment(&self) -> f64 {
        self.total - self.amount
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_sign() {
        let taxed = SaleQuote::new("regular", 10.0, 11.6);
        assert!((taxed.adjustment() - 1.6).abs() < 1e-9);

        let overshoot = SaleQuote::new("discount", 1.0, -1.84);
        assert!(overshoot.adjustment() < 0.0);
    }

    #[test]
    fn test_json_contains_fields() {
        let quote = SaleQuote::new("foreign", 10.0, 180.0);
        let json = quote.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["behavior"], "foreign");
        assert_eq!(value["total"], 180.0);
        assert!(value["computed_at"].is_string());
    }
}
