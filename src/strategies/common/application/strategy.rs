use std::fmt::Debug;
use std::sync::Arc;

/// 可替换的计价行为
///
/// 所有实现对外接口一致，仅计算方式不同；`compute` 必须是纯函数，
/// 不持有对上下文的引用。
pub trait Behavior: Debug + Send + Sync {
    /// 行为名称，用于日志和报价输出
    fn name(&self) -> &str;

    fn compute(&self, amount: f64) -> f64;

    /// 参数摘要，例如 `rate=0.16`
    fn describe(&self) -> String;
}

impl<B: Behavior + ?Sized> Behavior for Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compute(&self, amount: f64) -> f64 {
        (**self).compute(amount)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
