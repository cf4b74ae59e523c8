/// 国标麻将胡牌判定与番数计算引擎
/// 
/// 拆牌、番种表、番数聚合与倍数计分，全部是无状态的纯函数

pub mod tile;
pub mod utils;
pub mod fan;
pub mod game;

// 重新导出常用类型
pub use tile::{parse_tiles, Decomposition, Group, GroupKind, Hand, Meld, MeldKind, Suit, Tile, WinChecker, WinShape, Wind};
pub use utils::TileCounts;
pub use fan::{FanAggregator, FanDefinition, FanId, FanInput, FanOutcome, FanTally, FanTier, MatchedFan, CATALOG};
pub use game::context::{Actor, LastAction, ScoringContext, UnknownLastAction};
pub use game::rules::ScoringRules;
pub use game::scoring::{ActionFlags, Bonus, ScoreCalculator};
pub use game::game_engine::{can_win, score_win, waiting_tiles, HandError, ScoreResult, ScoringEngine, WinOutcome};

// Python 绑定模块
#[cfg(feature = "python")]
pub mod python;
