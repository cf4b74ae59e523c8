/// 牌相关模块
///
/// 包含牌（Tile）、手牌（Hand）、副露（Meld）和胡牌判定（拆牌）

pub mod tile;
pub mod meld;
pub mod hand;
pub mod win_check;

// 重新导出常用类型
pub use tile::{parse_tiles, Suit, Tile, TileParseError, Wind};
pub use meld::{Meld, MeldKind};
pub use hand::Hand;
pub use win_check::{decompose, is_win, Decomposition, Group, GroupKind, WinChecker, WinShape};
