pub mod context;
pub mod registry;
pub mod strategy;

pub use context::StrategyContext;
pub use registry::{global_registry, BehaviorFactoryFn, BehaviorRegistry, BehaviorSet};
pub use strategy::Behavior;
