/// 番种模块
///
/// 番种表（声明式定义）、判定输入和聚合器

pub mod definition;
pub mod input;
pub mod catalog;
pub mod aggregator;

// 重新导出常用类型
pub use definition::{Counter, ExclusivityGroup, FanDefinition, FanId, FanTier, MatchedFan, Predicate};
pub use input::{FanInput, WinSlot};
pub use catalog::CATALOG;
pub use aggregator::{FanAggregator, FanOutcome, FanTally};
