use crate::game::context::ScoringContext;
use crate::tile::{Decomposition, Group, Suit, Tile, WinShape};
use crate::utils::TileCounts;
use smallvec::SmallVec;

/// 胡的那张牌在拆牌中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinSlot {
    /// 作为将牌
    Pair,
    /// 作为第 i 个面子的一部分（下标对应 `Decomposition::groups`）
    Group(usize),
    /// 特殊牌型或组合龙中的牌
    Other,
}

/// 番种判定的输入
///
/// 一种“拆牌 + 胡牌张位置”的解释，番种判定函数只读取它，不会修改。
#[derive(Debug, Clone, Copy)]
pub struct FanInput<'a> {
    pub decomposition: &'a Decomposition,
    pub context: &'a ScoringContext,
    pub win_slot: WinSlot,
    /// 胡牌前听牌的种类数
    pub wait_count: usize,
    /// 全部牌（暗手 + 副露，杠按 4 张计）
    pub tiles: &'a TileCounts,
}

impl<'a> FanInput<'a> {
    pub fn new(
        decomposition: &'a Decomposition,
        context: &'a ScoringContext,
        win_slot: WinSlot,
        wait_count: usize,
        tiles: &'a TileCounts,
    ) -> Self {
        Self { decomposition, context, win_slot, wait_count, tiles }
    }

    #[inline]
    pub fn shape(&self) -> WinShape {
        self.decomposition.shape
    }

    #[inline]
    pub fn groups(&self) -> &[Group] {
        &self.decomposition.groups
    }

    #[inline]
    pub fn pair(&self) -> Option<Tile> {
        self.decomposition.pair
    }

    /// 基本牌型（4 组面子 + 1 对将）
    #[inline]
    pub fn is_standard(&self) -> bool {
        self.shape() == WinShape::Standard
    }

    #[inline]
    pub fn winning_tile(&self) -> Option<Tile> {
        self.context.winning_tile
    }

    /// 胡牌张所在的面子
    pub fn winning_group(&self) -> Option<&Group> {
        match self.win_slot {
            WinSlot::Group(idx) => self.groups().get(idx),
            _ => None,
        }
    }

    /// 顺子的起始牌（已排序）
    pub fn chows(&self) -> SmallVec<[Tile; 4]> {
        let mut chows: SmallVec<[Tile; 4]> = self.groups().iter().filter(|g| g.is_chow()).map(|g| g.tile).collect();
        chows.sort();
        chows
    }

    /// 刻子和杠的牌（已排序）
    pub fn pungs(&self) -> SmallVec<[Tile; 4]> {
        let mut pungs: SmallVec<[Tile; 4]> =
            self.groups().iter().filter(|g| g.is_pung_like()).map(|g| g.tile).collect();
        pungs.sort();
        pungs
    }

    /// 某花色的刻子（含杠）数
    pub fn pungs_of_suit(&self, suit: Suit) -> usize {
        self.pungs().iter().filter(|t| t.suit() == suit).count()
    }

    /// 是否有某张牌的刻子（含杠）
    pub fn has_pung_of(&self, tile: Tile) -> bool {
        self.pungs().contains(&tile)
    }

    pub fn kong_count(&self) -> usize {
        self.groups().iter().filter(|g| g.is_kong()).count()
    }

    pub fn concealed_kong_count(&self) -> usize {
        self.groups().iter().filter(|g| g.is_kong() && g.is_concealed).count()
    }

    pub fn melded_kong_count(&self) -> usize {
        self.groups().iter().filter(|g| g.is_kong() && !g.is_concealed).count()
    }

    /// 暗刻数（含暗杠）
    ///
    /// 点炮胡时，胡牌张所在的刻子算明刻
    pub fn concealed_pung_count(&self) -> usize {
        self.groups()
            .iter()
            .enumerate()
            .filter(|(idx, g)| g.is_pung_like() && g.is_concealed && !self.completed_by_discard(*idx))
            .count()
    }

    fn completed_by_discard(&self, idx: usize) -> bool {
        !self.context.is_self_draw && self.win_slot == WinSlot::Group(idx)
    }

    /// 明露的副露数（暗杠不算）
    pub fn exposed_meld_count(&self) -> usize {
        self.groups().iter().filter(|g| g.is_declared && !g.is_concealed).count()
    }

    /// 门前清（暗杠不破坏门清）
    #[inline]
    pub fn is_concealed_hand(&self) -> bool {
        self.exposed_meld_count() == 0
    }

    /// 所有牌都满足条件
    pub fn all_tiles(&self, pred: impl Fn(Tile) -> bool) -> bool {
        self.tiles.iter().all(|(tile, _)| pred(tile))
    }

    /// 存在满足条件的牌
    pub fn any_tile(&self, pred: impl Fn(Tile) -> bool) -> bool {
        self.tiles.iter().any(|(tile, _)| pred(tile))
    }

    #[inline]
    pub fn has_honors(&self) -> bool {
        self.any_tile(|t| t.is_honor())
    }

    /// 出现的序数花色
    pub fn numeral_suits(&self) -> SmallVec<[Suit; 3]> {
        Suit::numerals()
            .into_iter()
            .filter(|&suit| self.tiles.suit_total(suit) > 0)
            .collect()
    }

    /// 每个面子和将牌都满足条件（只对基本牌型有意义）
    pub fn every_set(&self, pred: impl Fn(&[Tile]) -> bool) -> bool {
        let Some(pair) = self.pair() else { return false };
        pred(&[pair, pair]) && self.groups().iter().all(|g| pred(&g.tiles()))
    }
}
