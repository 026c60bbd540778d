pub mod application;

pub use application::{global_registry, Behavior, BehaviorRegistry, BehaviorSet, StrategyContext};
