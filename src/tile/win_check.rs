use super::{Hand, Meld, MeldKind, Suit, Tile};
use crate::game::constants::{GROUPS_PER_HAND, SEVEN_PAIRS, TILES_PER_MELD, WAITING_HAND_SIZE, WINNING_HAND_SIZE};
use crate::game::game_engine::HandError;
use crate::utils::TileCounts;
use smallvec::SmallVec;

/// 胡牌牌型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum WinShape {
    /// 基本胡牌型（4 组面子 + 1 对将）
    Standard,
    /// 七对（7 个不同的对子）
    SevenPairs,
    /// 十三幺（13 种幺九字牌 + 其中一张的重复）
    ThirteenOrphans,
    /// 全不靠（组合龙中的牌与字牌各不相同，共 14 张）
    HonorsAndKnitted,
    /// 组合龙（147/258/369 分属三门）+ 1 组面子 + 1 对将
    KnittedStraight,
}

/// 牌组类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GroupKind {
    /// 顺子
    Chow,
    /// 刻子
    Pung,
    /// 杠
    Kong,
}

/// 牌组（顺子、刻子或杠）
///
/// `is_declared` 表示来自已声明的副露，`is_concealed` 表示暗手中的组或暗杠
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Group {
    pub kind: GroupKind,
    pub tile: Tile,
    pub is_concealed: bool,
    pub is_declared: bool,
}

impl Group {
    fn hidden(kind: GroupKind, tile: Tile) -> Self {
        Self { kind, tile, is_concealed: true, is_declared: false }
    }

    /// 由副露转换
    pub fn from_meld(meld: &Meld) -> Self {
        let kind = match meld.kind {
            MeldKind::Chow => GroupKind::Chow,
            MeldKind::Pung => GroupKind::Pung,
            MeldKind::Kong => GroupKind::Kong,
        };
        Self { kind, tile: meld.tile, is_concealed: meld.is_concealed, is_declared: true }
    }

    #[inline]
    pub fn is_chow(&self) -> bool {
        self.kind == GroupKind::Chow
    }

    /// 刻子或杠
    #[inline]
    pub fn is_pung_like(&self) -> bool {
        matches!(self.kind, GroupKind::Pung | GroupKind::Kong)
    }

    #[inline]
    pub fn is_kong(&self) -> bool {
        self.kind == GroupKind::Kong
    }

    /// 组内是否包含某张牌
    pub fn contains(&self, tile: Tile) -> bool {
        match self.kind {
            GroupKind::Chow => {
                tile.suit() == self.tile.suit() && tile.rank() >= self.tile.rank() && tile.rank() <= self.tile.rank() + 2
            }
            GroupKind::Pung | GroupKind::Kong => tile == self.tile,
        }
    }

    /// 组内的牌（杠为 4 张）
    pub fn tiles(&self) -> SmallVec<[Tile; 4]> {
        match self.kind {
            GroupKind::Chow => (0..3).filter_map(|delta| self.tile.offset(delta)).collect(),
            GroupKind::Pung => SmallVec::from_elem(self.tile, 3),
            GroupKind::Kong => SmallVec::from_elem(self.tile, 4),
        }
    }
}

/// 一种拆牌结果
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Decomposition {
    pub shape: WinShape,
    /// 将牌（七对、十三幺、全不靠没有单独的将）
    pub pair: Option<Tile>,
    /// 面子：已声明的副露在前，暗手拆出的在后
    pub groups: SmallVec<[Group; 4]>,
    /// 组合龙 / 全不靠所用的花色排列：依次承载 147、258、369
    pub knitted: Option<[Suit; 3]>,
}

impl Decomposition {
    fn special(shape: WinShape) -> Self {
        Self { shape, pair: None, groups: SmallVec::new(), knitted: None }
    }
}

/// 组合龙的 6 种花色排列
const KNITTED_ORDERS: [[Suit; 3]; 6] = [
    [Suit::Wan, Suit::Tong, Suit::Tiao],
    [Suit::Wan, Suit::Tiao, Suit::Tong],
    [Suit::Tong, Suit::Wan, Suit::Tiao],
    [Suit::Tong, Suit::Tiao, Suit::Wan],
    [Suit::Tiao, Suit::Wan, Suit::Tong],
    [Suit::Tiao, Suit::Tong, Suit::Wan],
];

/// 某种排列下组合龙的 9 张牌
pub fn knitted_tiles(order: &[Suit; 3]) -> [Tile; 9] {
    let mut tiles = [Tile::Wan(1); 9];
    for (slot, suit) in order.iter().enumerate() {
        for step in 0..3u8 {
            if let Some(tile) = Tile::new(*suit, slot as u8 + 1 + step * 3) {
                tiles[slot * 3 + step as usize] = tile;
            }
        }
    }
    tiles
}

/// 校验手牌张数与牌的合法性
///
/// `expected` 为 14（完整手牌）或 13（等待胡牌的手牌），每个副露按 3 张计
pub(crate) fn validate_tiles(hand: &Hand, melds: &[Meld], expected: usize) -> Result<(), HandError> {
    if melds.len() > GROUPS_PER_HAND {
        return Err(HandError::TooManyMelds(melds.len()));
    }
    if let Some(meld) = melds.iter().find(|m| !m.is_valid()) {
        return Err(HandError::InvalidMeld(*meld));
    }
    let actual = hand.total_count() + melds.len() * TILES_PER_MELD;
    if actual != expected {
        return Err(HandError::TileCount { expected, actual });
    }
    let mut all = *hand.counts();
    for meld in melds {
        for tile in meld.tiles() {
            if !all.add(tile) {
                return Err(HandError::TooManyCopies(tile));
            }
        }
    }
    Ok(())
}

/// 胡牌判定器
///
/// 无状态：所有方法都是纯函数，可以在多个线程上并发调用。
///
/// # 算法
///
/// 1. 没有副露时先检查特殊牌型（七对、十三幺、全不靠），它们与基本牌型互斥，命中即返回
/// 2. 基本牌型：枚举每种可能的将牌，对剩余牌从最小的一张开始递归地取刻子或顺子，回溯穷举
/// 3. 组合龙：取出 9 张组合龙后，剩余牌必须是 1 组面子 + 1 对将
pub struct WinChecker;

impl WinChecker {
    /// 枚举所有合法的拆牌
    ///
    /// `hand` 为包含胡牌张在内的暗手，`melds` 为已声明的副露。
    /// 张数不符时返回 `Err`；不能胡牌时返回空列表。
    pub fn decompose(hand: &Hand, melds: &[Meld]) -> Result<Vec<Decomposition>, HandError> {
        validate_tiles(hand, melds, WINNING_HAND_SIZE)?;
        let counts = *hand.counts();

        if melds.is_empty() {
            if let Some(special) = Self::special_shape(&counts) {
                return Ok(vec![special]);
            }
        }

        let declared: SmallVec<[Group; 4]> = melds.iter().map(Group::from_meld).collect();
        let mut result = Self::standard(&counts, &declared);
        result.extend(Self::knitted_straight(&counts, &declared));
        log::trace!("{} concealed tiles, {} melds -> {} decompositions", counts.total(), melds.len(), result.len());
        Ok(result)
    }

    /// 判定是否为胡牌牌型（张数不符视为不胡）
    pub fn is_winning(hand: &Hand, melds: &[Meld]) -> bool {
        Self::decompose(hand, melds).map(|d| !d.is_empty()).unwrap_or(false)
    }

    /// 听牌：13 张（含副露）的手牌加入哪些牌后可以组成胡牌牌型
    pub fn waiting_tiles(hand: &Hand, melds: &[Meld]) -> Result<Vec<Tile>, HandError> {
        validate_tiles(hand, melds, WAITING_HAND_SIZE)?;
        let waits = Tile::all_kinds()
            .filter(|&tile| {
                hand.with_tile(tile)
                    .map(|full| Self::is_winning(&full, melds))
                    .unwrap_or(false)
            })
            .collect();
        Ok(waits)
    }

    /// 特殊牌型（只在没有副露时检查）
    fn special_shape(counts: &TileCounts) -> Option<Decomposition> {
        if Self::is_seven_pairs(counts) {
            return Some(Decomposition::special(WinShape::SevenPairs));
        }
        if Self::is_thirteen_orphans(counts) {
            return Some(Decomposition::special(WinShape::ThirteenOrphans));
        }
        Self::honors_and_knitted(counts).map(|order| Decomposition {
            knitted: Some(order),
            ..Decomposition::special(WinShape::HonorsAndKnitted)
        })
    }

    /// 七对：14 张，恰好 7 个不同的对子（四张相同不算两对）
    fn is_seven_pairs(counts: &TileCounts) -> bool {
        counts.total() == WINNING_HAND_SIZE && counts.distinct() == SEVEN_PAIRS && counts.iter().all(|(_, count)| count == 2)
    }

    /// 十三幺：13 种幺九字牌各至少一张，共 14 张
    fn is_thirteen_orphans(counts: &TileCounts) -> bool {
        counts.total() == WINNING_HAND_SIZE
            && counts.distinct() == WAITING_HAND_SIZE
            && counts.iter().all(|(tile, _)| tile.is_terminal_or_honor())
    }

    /// 全不靠：14 张各不相同，序数牌全部属于同一种组合龙排列
    fn honors_and_knitted(counts: &TileCounts) -> Option<[Suit; 3]> {
        if counts.total() != WINNING_HAND_SIZE || counts.distinct() != WINNING_HAND_SIZE {
            return None;
        }
        KNITTED_ORDERS.iter().copied().find(|order| {
            let knitted = knitted_tiles(order);
            counts.iter().all(|(tile, _)| tile.is_honor() || knitted.contains(&tile))
        })
    }

    /// 基本牌型：枚举将牌后递归拆分
    fn standard(counts: &TileCounts, declared: &[Group]) -> Vec<Decomposition> {
        let mut work = *counts;
        let mut result = Vec::new();
        for idx in 0..Tile::KINDS {
            if !work.take(idx, 2) {
                continue;
            }
            let mut found = Vec::new();
            let mut groups = SmallVec::new();
            search_groups(&mut work, &mut groups, &mut found);
            work.restore(idx, 2);

            let Some(pair) = Tile::from_index(idx) else { continue };
            for concealed in found {
                let mut all: SmallVec<[Group; 4]> = declared.iter().copied().collect();
                all.extend(concealed);
                result.push(Decomposition { shape: WinShape::Standard, pair: Some(pair), groups: all, knitted: None });
            }
        }
        result
    }

    /// 组合龙：9 张组合龙 + 1 组面子 + 1 对将
    fn knitted_straight(counts: &TileCounts, declared: &[Group]) -> Vec<Decomposition> {
        let mut result = Vec::new();
        if declared.len() > 1 {
            return result;
        }
        for order in KNITTED_ORDERS {
            let knitted = knitted_tiles(&order);
            if knitted.iter().any(|&tile| counts.count(tile) == 0) {
                continue;
            }
            let mut rest = *counts;
            for tile in knitted {
                rest.remove(tile);
            }
            let remaining = Self::standard(&rest, declared);
            result.extend(remaining.into_iter().map(|d| Decomposition {
                shape: WinShape::KnittedStraight,
                knitted: Some(order),
                ..d
            }));
        }
        result
    }
}

/// 递归拆分剩余牌：最小的一张要么组成刻子，要么作为顺子的起点
fn search_groups(counts: &mut TileCounts, groups: &mut SmallVec<[Group; 4]>, out: &mut Vec<SmallVec<[Group; 4]>>) {
    let Some(idx) = counts.first_nonzero(0) else {
        out.push(groups.clone());
        return;
    };
    let Some(tile) = Tile::from_index(idx) else { return };

    // 刻子
    if counts.take(idx, 3) {
        groups.push(Group::hidden(GroupKind::Pung, tile));
        search_groups(counts, groups, out);
        groups.pop();
        counts.restore(idx, 3);
    }

    // 顺子（只有序数牌，起点不超过 7，保证三张在同一花色内）
    if tile.is_numeral() && tile.rank() <= 7 && counts.count_at(idx + 1) > 0 && counts.count_at(idx + 2) > 0 {
        counts.take(idx, 1);
        counts.take(idx + 1, 1);
        counts.take(idx + 2, 1);
        groups.push(Group::hidden(GroupKind::Chow, tile));
        search_groups(counts, groups, out);
        groups.pop();
        counts.restore(idx, 1);
        counts.restore(idx + 1, 1);
        counts.restore(idx + 2, 1);
    }
}

/// 便捷函数：检查手牌是否胡牌
pub fn is_win(hand: &Hand, melds: &[Meld]) -> bool {
    WinChecker::is_winning(hand, melds)
}

/// 便捷函数：枚举所有拆牌
pub fn decompose(hand: &Hand, melds: &[Meld]) -> Result<Vec<Decomposition>, HandError> {
    WinChecker::decompose(hand, melds)
}
