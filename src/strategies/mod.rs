// 销售计价策略
pub mod common;
pub mod discounted_rate;
pub mod fixed_conversion;
pub mod fixed_rate;

pub use common::{global_registry, Behavior, BehaviorRegistry, BehaviorSet, StrategyContext};
pub use discounted_rate::DiscountedRateBehavior;
pub use fixed_conversion::FixedConversionBehavior;
pub use fixed_rate::FixedRateBehavior;
