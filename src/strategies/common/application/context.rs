use std::sync::Arc;

use crate::core::error::SaleError;
use crate::core::types::SaleQuote;

use super::registry::BehaviorSet;
use super::strategy::Behavior;

/// 策略上下文，持有当前生效的计价行为并把计算委托给它
#[derive(Debug, Clone)]
pub struct StrategyContext {
    active: Option<Arc<dyn Behavior>>,
}

impl StrategyContext {
    pub fn new(behavior: Arc<dyn Behavior>) -> Self {
        Self {
            active: Some(behavior),
        }
    }

    /// 行为缺失时构造失败，不产生上下文
    pub fn try_new(behavior: Option<Arc<dyn Behavior>>) -> Result<Self, SaleError> {
        let behavior = behavior
            .ok_or_else(|| SaleError::ConstructionError("缺少初始策略".to_string()))?;
        Ok(Self::new(behavior))
    }

    /// 用配置中的具名策略作为初始行为
    pub fn from_set(set: &BehaviorSet, name: &str) -> Result<Self, SaleError> {
        let behavior = set.get(name).ok_or_else(|| {
            SaleError::ConstructionError(format!("未找到策略: {}", name))
        })?;
        log::info!("策略上下文已创建，初始策略: {}", name);
        Ok(Self::new(behavior))
    }

    /// 替换当前策略；旧策略只释放本上下文持有的引用
    pub fn set_behavior(&mut self, behavior: Arc<dyn Behavior>) {
        log::debug!(
            "切换策略: {} -> {}",
            self.behavior_name().unwrap_or("-"),
            behavior.name()
        );
        self.active = Some(behavior);
    }

    pub fn behavior(&self) -> Result<&Arc<dyn Behavior>, SaleError> {
        self.active
            .as_ref()
            .ok_or_else(|| SaleError::InvalidState("上下文未设置策略".to_string()))
    }

    pub fn behavior_name(&self) -> Option<&str> {
        self.active.as_ref().map(|behavior| behavior.name())
    }

    /// 每次调用只读取一次当前策略
    pub fn execute(&self, amount: f64) -> Result<f64, SaleError> {
        Ok(self.behavior()?.compute(amount))
    }

    pub fn quote(&self, amount: f64) -> Result<SaleQuote, SaleError> {
        let behavior = self.behavior()?;
        Ok(SaleQuote::new(
            behavior.name(),
            amount,
            behavior.compute(amount),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::{DiscountedRateBehavior, FixedConversionBehavior, FixedRateBehavior};

    fn regular() -> Arc<dyn Behavior> {
        Arc::new(FixedRateBehavior::named("regular", 0.16).unwrap())
    }

    fn discount() -> Arc<dyn Behavior> {
        Arc::new(DiscountedRateBehavior::named("discount", 0.16, 3.0).unwrap())
    }

    fn foreign() -> Arc<dyn Behavior> {
        Arc::new(FixedConversionBehavior::named("foreign", 18.0).unwrap())
    }

    #[test]
    fn test_switching_sequence() {
        let mut sale = StrategyContext::new(regular());
        assert!((sale.execute(10.0).unwrap() - 11.6).abs() < 1e-9);

        sale.set_behavior(discount());
        assert!((sale.execute(10.0).unwrap() - 8.6).abs() < 1e-9);

        sale.set_behavior(foreign());
        assert!((sale.execute(10.0).unwrap() - 180.0).abs() < 1e-9);
        assert_eq!(sale.behavior_name(), Some("foreign"));
    }

    #[test]
    fn test_execute_returns_behavior_result_unchanged() {
        let behavior = discount();
        let sale = StrategyContext::new(behavior.clone());
        for amount in [0.0, 1.0, 2.5, 10.0, 1000.0] {
            assert_eq!(sale.execute(amount).unwrap(), behavior.compute(amount));
        }
    }

    #[test]
    fn test_set_same_behavior_twice() {
        let shared = discount();
        let mut once = StrategyContext::new(regular());
        once.set_behavior(shared.clone());

        let mut twice = StrategyContext::new(regular());
        twice.set_behavior(shared.clone());
        twice.set_behavior(shared.clone());

        assert!(Arc::ptr_eq(once.behavior().unwrap(), twice.behavior().unwrap()));
        for amount in [1.0, 10.0, 50.0] {
            assert_eq!(once.execute(amount).unwrap(), twice.execute(amount).unwrap());
        }
    }

    #[test]
    fn test_replaced_behavior_survives_for_other_holders() {
        let first = regular();
        let mut sale = StrategyContext::new(first.clone());
        assert_eq!(Arc::strong_count(&first), 2);

        sale.set_behavior(foreign());
        assert_eq!(Arc::strong_count(&first), 1);
        assert!((first.compute(10.0) - 11.6).abs() < 1e-9);
    }

    #[test]
    fn test_try_new_without_behavior() {
        let err = StrategyContext::try_new(None).unwrap_err();
        assert!(matches!(err, SaleError::ConstructionError(_)));

        let sale = StrategyContext::try_new(Some(regular())).unwrap();
        assert_eq!(sale.behavior_name(), Some("regular"));
    }

    #[test]
    fn test_execute_without_behavior_is_invalid_state() {
        let sale = StrategyContext { active: None };
        assert!(matches!(
            sale.execute(10.0).unwrap_err(),
            SaleError::InvalidState(_)
        ));
        assert!(matches!(
            sale.quote(10.0).unwrap_err(),
            SaleError::InvalidState(_)
        ));
        assert_eq!(sale.behavior_name(), None);
    }

    #[test]
    fn test_quote_carries_behavior_name() {
        let sale = StrategyContext::new(foreign());
        let quote = sale.quote(10.0).unwrap();
        assert_eq!(quote.behavior, "foreign");
        assert_eq!(quote.amount, 10.0);
        assert!((quote.total - 180.0).abs() < 1e-9);
    }
}
