use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::Value;

use super::strategy::Behavior;
use crate::core::config::SaleConfig;
use crate::core::error::SaleError;
use crate::strategies::{DiscountedRateBehavior, FixedConversionBehavior, FixedRateBehavior};

/// 策略工厂函数签名：(策略名称, 参数) -> 行为实例
pub type BehaviorFactoryFn =
    dyn Fn(&str, &Value) -> Result<Arc<dyn Behavior>, SaleError> + Send + Sync;

/// 策略注册表，运行时按类型创建行为实例
pub struct BehaviorRegistry {
    factories: HashMap<String, Arc<BehaviorFactoryFn>>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&str, &Value) -> Result<Arc<dyn Behavior>, SaleError> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Arc::new(factory));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn create(
        &self,
        kind: &str,
        name: &str,
        params: &Value,
    ) -> Result<Arc<dyn Behavior>, SaleError> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| SaleError::UnsupportedBehavior(kind.to_string()))?;
        factory(name, params)
    }

    /// 按配置顺序实例化全部策略
    pub fn build_all(&self, config: &SaleConfig) -> Result<BehaviorSet, SaleError> {
        let mut set = BehaviorSet::default();
        for entry in &config.behaviors {
            let behavior = self.create(&entry.kind, &entry.name, &entry.params)?;
            log::debug!("已创建策略 {} (类型: {})", entry.name, entry.kind);
            set.insert(entry.name.clone(), behavior);
        }
        Ok(set)
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        let mut registry = BehaviorRegistry::new();
        registry.register(FixedRateBehavior::KIND, fixed_rate_factory());
        registry.register(DiscountedRateBehavior::KIND, discounted_rate_factory());
        registry.register(FixedConversionBehavior::KIND, fixed_conversion_factory());
        registry
    }
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

// 单例模式的全局策略注册表，首次访问时初始化
lazy_static::lazy_static! {
    static ref GLOBAL_BEHAVIOR_REGISTRY: BehaviorRegistry = BehaviorRegistry::default();
}

/// 获取全局策略注册表
pub fn global_registry() -> &'static BehaviorRegistry {
    &GLOBAL_BEHAVIOR_REGISTRY
}

/// 按名称保存已实例化的策略，保持配置顺序
#[derive(Debug, Clone, Default)]
pub struct BehaviorSet {
    entries: Vec<(String, Arc<dyn Behavior>)>,
}

impl BehaviorSet {
    pub fn insert(&mut self, name: impl Into<String>, behavior: Arc<dyn Behavior>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = behavior,
            None => self.entries.push((name, behavior)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Behavior>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, behavior)| behavior.clone())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Behavior>)> {
        self.entries
            .iter()
            .map(|(name, behavior)| (name.as_str(), behavior))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 解析完整的切换序列：首项为初始策略，其后依次切换
    ///
    /// `then` 为空时切换到除初始策略外的全部策略（保持配置顺序）。
    /// 任一名称缺失时整体失败，不返回部分序列。
    pub fn resolve_sequence(
        &self,
        initial: &str,
        then: Option<&[String]>,
    ) -> Result<Vec<Arc<dyn Behavior>>, SaleError> {
        let names: Vec<&str> = match then {
            Some(names) => std::iter::once(initial)
                .chain(names.iter().map(String::as_str))
                .collect(),
            None => std::iter::once(initial)
                .chain(self.names().filter(|name| *name != initial))
                .collect(),
        };

        names
            .into_iter()
            .map(|name| {
                self.get(name).ok_or_else(|| {
                    SaleError::ConstructionError(format!("未找到策略: {}", name))
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct FixedRateParams {
    rate: f64,
}

#[derive(Debug, Deserialize)]
struct DiscountedRateParams {
    rate: f64,
    discount: f64,
}

#[derive(Debug, Deserialize)]
struct FixedConversionParams {
    conversion_factor: f64,
}

fn parse_params<T: DeserializeOwned>(kind: &str, params: &Value) -> Result<T, SaleError> {
    serde_yaml::from_value(params.clone()).map_err(|e| {
        SaleError::ConfigError(format!("策略类型 {} 参数解析失败: {}", kind, e))
    })
}

fn fixed_rate_factory(
) -> impl Fn(&str, &Value) -> Result<Arc<dyn Behavior>, SaleError> + Send + Sync + 'static {
    |name, params| {
        let params: FixedRateParams = parse_params(FixedRateBehavior::KIND, params)?;
        let behavior = FixedRateBehavior::named(name, params.rate)?;
        Ok(Arc::new(behavior))
    }
}

fn discounted_rate_factory(
) -> impl Fn(&str, &Value) -> Result<Arc<dyn Behavior>, SaleError> + Send + Sync + 'static {
    |name, params| {
        let params: DiscountedRateParams = parse_params(DiscountedRateBehavior::KIND, params)?;
        let behavior = DiscountedRateBehavior::named(name, params.rate, params.discount)?;
        Ok(Arc::new(behavior))
    }
}

fn fixed_conversion_factory(
) -> impl Fn(&str, &Value) -> Result<Arc<dyn Behavior>, SaleError> + Send + Sync + 'static {
    |name, params| {
        let params: FixedConversionParams = parse_params(FixedConversionBehavior::KIND, params)?;
        let behavior = FixedConversionBehavior::named(name, params.conversion_factor)?;
        Ok(Arc::new(behavior))
    }
}
