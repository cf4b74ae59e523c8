/// 牌局常量定义
///
/// 集中管理张数相关的魔法数字

/// 胡牌时的张数（暗手 + 3 × 副露，杠的第 4 张不计）
pub const WINNING_HAND_SIZE: usize = 14;

/// 听牌时的张数
pub const WAITING_HAND_SIZE: usize = 13;

/// 基本牌型的面子数
pub const GROUPS_PER_HAND: usize = 4;

/// 每组副露按 3 张计入张数
pub const TILES_PER_MELD: usize = 3;

/// 七对的对子数
pub const SEVEN_PAIRS: usize = 7;

/// 花牌数量上限
pub const MAX_FLOWERS: u8 = 8;
