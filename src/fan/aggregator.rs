use super::catalog::CATALOG;
use super::definition::{ExclusivityGroup, FanDefinition, FanId, MatchedFan};
use super::input::{FanInput, WinSlot};
use crate::game::context::ScoringContext;
use crate::game::game_engine::HandError;
use crate::game::rules::ScoringRules;
use crate::tile::win_check::knitted_tiles;
use crate::tile::{Decomposition, Hand, Meld, Tile, WinChecker, WinShape};
use crate::utils::TileCounts;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// 一种解释下的番种统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanTally {
    pub shape: WinShape,
    /// 命中的番种（按番种表顺序）
    pub fans: Vec<MatchedFan>,
    /// 封顶前总番数
    pub pre_cap_total: u32,
    /// 封顶后总番数
    pub capped_total: u32,
}

impl FanTally {
    pub fn contains(&self, id: FanId) -> bool {
        self.fans.iter().any(|fan| fan.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.fans.is_empty()
    }
}

/// 番种统计结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FanOutcome {
    /// 胡牌且至少命中一个番种
    Scored(FanTally),
    /// 牌型合法但没有任何番种（不允许胡牌）
    ShapeValidButUnscored,
    /// 不是胡牌牌型
    NoValidDecomposition,
}

/// 番种聚合器
///
/// 对每种“拆牌 + 胡牌张位置”的解释计算番种，保留总番数最高的一种。
pub struct FanAggregator;

impl FanAggregator {
    /// 按番种表计算一种解释的番数
    ///
    /// 所有判定函数都会执行，然后按表顺序处理互斥：
    /// 同组已有番种或被已计番种包含时跳过。
    pub fn evaluate(input: &FanInput, rules: &ScoringRules) -> FanTally {
        Self::evaluate_with(CATALOG, input, rules)
    }

    /// 使用指定的番种表计算（测试和自定义规则使用）
    pub fn evaluate_with(catalog: &[FanDefinition], input: &FanInput, rules: &ScoringRules) -> FanTally {
        let hits: Vec<(&FanDefinition, u8)> =
            catalog.iter().map(|def| (def, def.occurrences(input))).collect();

        let mut claimed: SmallVec<[ExclusivityGroup; 8]> = SmallVec::new();
        let mut excluded: SmallVec<[FanId; 16]> = SmallVec::new();
        let mut fans = Vec::new();

        for (def, count) in hits {
            if count == 0 || excluded.contains(&def.id) {
                continue;
            }
            if let Some(group) = def.exclusivity_group {
                if claimed.contains(&group) {
                    continue;
                }
                claimed.push(group);
            }
            excluded.extend_from_slice(def.excludes);
            fans.push(MatchedFan::new(def.id, def.tier, count));
        }

        let pre_cap_total = fans.iter().fold(0u32, |sum, fan| sum.saturating_add(fan.points));
        FanTally {
            shape: input.shape(),
            fans,
            pre_cap_total,
            capped_total: rules.cap(pre_cap_total),
        }
    }

    /// 计算整手牌的番数
    ///
    /// `hand` 为包含胡牌张在内的暗手，胡牌张取自 `context.winning_tile`。
    /// 多种拆牌时选择封顶前总番数最高的一种，相同时取先出现的。
    pub fn score(
        hand: &Hand,
        melds: &[Meld],
        context: &ScoringContext,
        rules: &ScoringRules,
    ) -> Result<FanOutcome, HandError> {
        let decompositions = WinChecker::decompose(hand, melds)?;
        if decompositions.is_empty() {
            return Ok(FanOutcome::NoValidDecomposition);
        }

        let tiles = all_tiles(hand, melds);
        let wait_count = wait_count(hand, melds, context.winning_tile);

        let mut best: Option<FanTally> = None;
        for decomposition in &decompositions {
            for slot in win_slots(decomposition, context.winning_tile) {
                let input = FanInput::new(decomposition, context, slot, wait_count, &tiles);
                let tally = Self::evaluate(&input, rules);
                log::trace!("{:?} {:?} -> {} fans", decomposition.shape, slot, tally.pre_cap_total);
                if best.as_ref().map_or(true, |b| tally.pre_cap_total > b.pre_cap_total) {
                    best = Some(tally);
                }
            }
        }

        match best {
            Some(tally) if !tally.is_empty() => {
                log::debug!(
                    "best interpretation {:?}: {} fans ({} capped) from {} decompositions",
                    tally.shape,
                    tally.pre_cap_total,
                    tally.capped_total,
                    decompositions.len()
                );
                Ok(FanOutcome::Scored(tally))
            }
            _ => {
                log::debug!("shape valid but no fan matched");
                Ok(FanOutcome::ShapeValidButUnscored)
            }
        }
    }
}

/// 暗手加上副露的全部牌（杠按 4 张）
fn all_tiles(hand: &Hand, melds: &[Meld]) -> TileCounts {
    let mut tiles = *hand.counts();
    for meld in melds {
        for tile in meld.tiles() {
            tiles.add(tile);
        }
    }
    tiles
}

/// 胡牌前的听牌种类数（未知胡牌张时为 0，不计听牌方式）
fn wait_count(hand: &Hand, melds: &[Meld], winning: Option<Tile>) -> usize {
    let Some(winning) = winning else { return 0 };
    let mut before = hand.clone();
    if !before.remove_tile(winning) {
        return 0;
    }
    WinChecker::waiting_tiles(&before, melds).map_or(0, |waits| waits.len())
}

/// 胡牌张可能所在的位置
fn win_slots(decomposition: &Decomposition, winning: Option<Tile>) -> SmallVec<[WinSlot; 5]> {
    let mut slots = SmallVec::new();
    if let Some(winning) = winning {
        if decomposition.pair == Some(winning) {
            slots.push(WinSlot::Pair);
        }
        for (idx, group) in decomposition.groups.iter().enumerate() {
            if !group.is_declared && group.contains(winning) {
                slots.push(WinSlot::Group(idx));
            }
        }
        let in_knitted = decomposition.shape == WinShape::KnittedStraight
            && decomposition
                .knitted
                .map_or(false, |order| knitted_tiles(&order).contains(&winning));
        if in_knitted {
            slots.push(WinSlot::Other);
        }
    }
    if slots.is_empty() {
        slots.push(WinSlot::Other);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fan::{FanDefinition, FanTier};

    fn score(code: &str, melds: &[Meld], winning: Tile, ctx: ScoringContext) -> FanOutcome {
        let hand = Hand::from_code(code).unwrap();
        let ctx = ctx.with_winning_tile(winning);
        FanAggregator::score(&hand, melds, &ctx, &ScoringRules::default().with_max_fan(88)).unwrap()
    }

    fn tally(outcome: FanOutcome) -> FanTally {
        match outcome {
            FanOutcome::Scored(tally) => tally,
            other => panic!("expected a scored hand, got {:?}", other),
        }
    }

    #[test]
    fn test_best_interpretation_prefers_pungs() {
        // 111222333万 + 789筒 + 55条：三暗刻 + 一色三节高 好于 一色三同顺
        let t = tally(score("111222333m789p55s", &[], Tile::Tiao(5), ScoringContext::new().with_self_draw(true)));
        assert!(t.contains(FanId::PureShiftedPungs));
        assert!(t.contains(FanId::ThreeConcealedPungs));
        assert!(!t.contains(FanId::PureTripleChow));
    }

    #[test]
    fn test_group_keeps_first_match() {
        // 三个风刻 + 风将：小四喜，不再计大三风
        let melds = [Meld::pung(Tile::Wind(1)), Meld::pung(Tile::Wind(2)), Meld::pung(Tile::Wind(3))];
        let t = tally(score("123m44z", &melds, Tile::Wan(3), ScoringContext::new()));
        assert!(t.contains(FanId::LittleFourWinds));
        assert!(!t.contains(FanId::BigThreeWinds));
    }

    #[test]
    fn test_excludes_drop_implied_fans() {
        // 清一色不再计无字、缺一门
        let t = tally(score("123456789m11122m", &[], Tile::Wan(2), ScoringContext::new()));
        assert!(t.contains(FanId::FullFlush));
        assert!(!t.contains(FanId::NoHonors));
        assert!(!t.contains(FanId::OneVoidedSuit));
    }

    #[test]
    fn test_counted_fans() {
        // 两个非门风、非圈风的风刻（南、西）各计一次幺九刻
        let melds = [Meld::pung(Tile::Wind(2)), Meld::pung(Tile::Wind(3))];
        let t = tally(score("234m567p99s", &melds, Tile::Tiao(9), ScoringContext::new()));
        let fan = t.fans.iter().find(|f| f.id == FanId::PungOfTerminalsOrHonors).unwrap();
        assert_eq!(fan.count, 2);
        assert_eq!(fan.points, 2);
    }

    #[test]
    fn test_no_decomposition() {
        assert_eq!(
            score("123456789m12457p", &[], Tile::Tong(7), ScoringContext::new()),
            FanOutcome::NoValidDecomposition
        );
    }

    #[test]
    fn test_zero_fan_hand() {
        let melds = [Meld::chow(Tile::Wan(2)), Meld::chow(Tile::Tong(5)), Meld::pung(Tile::Tiao(8))];
        assert_eq!(
            score("345s11z", &melds, Tile::Tiao(5), ScoringContext::new()),
            FanOutcome::ShapeValidButUnscored
        );
    }

    #[test]
    fn test_evaluate_with_custom_catalog() {
        fn always(_: &FanInput) -> bool {
            true
        }
        let catalog = [
            FanDefinition::new(FanId::AllPungs, FanTier::Six, always).excluding(&[FanId::NoHonors]),
            FanDefinition::new(FanId::NoHonors, FanTier::One, always),
            FanDefinition::new(FanId::SelfDrawn, FanTier::One, always).stacking(),
        ];
        let hand = Hand::from_code("11122233344455m").unwrap();
        let decomposition = WinChecker::decompose(&hand, &[]).unwrap().remove(0);
        let ctx = ScoringContext::new();
        let tiles = all_tiles(&hand, &[]);
        let input = FanInput::new(&decomposition, &ctx, WinSlot::Other, 0, &tiles);

        let t = FanAggregator::evaluate_with(&catalog, &input, &ScoringRules::default().with_max_fan(5));
        assert_eq!(t.fans.len(), 2);
        assert_eq!(t.pre_cap_total, 7);
        assert_eq!(t.capped_total, 5);
    }

    #[test]
    fn test_win_slots() {
        let hand = Hand::from_code("123m123p123s11z789m").unwrap();
        let decomposition = WinChecker::decompose(&hand, &[]).unwrap().remove(0);
        let slots = win_slots(&decomposition, Some(Tile::Wan(1)));
        assert_eq!(slots.len(), 1);
        assert!(matches!(slots[0], WinSlot::Group(_)));
        assert_eq!(win_slots(&decomposition, Some(Tile::Wind(1))).as_slice(), &[WinSlot::Pair]);
        assert_eq!(win_slots(&decomposition, None).as_slice(), &[WinSlot::Other]);
    }
}
