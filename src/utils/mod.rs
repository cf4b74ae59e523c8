/// 工具模块
///
/// 拆牌与番型判定共用的计数表

pub mod tile_counts;

pub use tile_counts::TileCounts;
