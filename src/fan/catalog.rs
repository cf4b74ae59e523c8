use super::definition::{ExclusivityGroup as G, FanDefinition as Fan, FanId as F, FanTier as T};
use super::input::{FanInput, WinSlot};
use crate::tile::win_check::knitted_tiles;
use crate::tile::{Suit, Tile, WinShape};
use smallvec::SmallVec;

/// 番种表
///
/// 按番数从高到低排列。聚合器按这个顺序处理互斥组：同组只保留先命中的番种，
/// 先命中的番种的 `excludes` 会屏蔽后面的番种。
pub const CATALOG: &[Fan] = &[
    // 88 番
    Fan::new(F::BigFourWinds, T::EightyEight, big_four_winds)
        .in_group(G::Winds)
        .excluding(&[F::PrevalentWind, F::SeatWind, F::AllPungs, F::PungOfTerminalsOrHonors]),
    Fan::new(F::BigThreeDragons, T::EightyEight, big_three_dragons).in_group(G::Dragons),
    Fan::new(F::AllGreen, T::EightyEight, all_green).excluding(&[F::HalfFlush]),
    Fan::new(F::NineGates, T::EightyEight, nine_gates).excluding(&[
        F::FullFlush,
        F::ConcealedHand,
        F::FullyConcealedHand,
        F::PungOfTerminalsOrHonors,
        F::NoHonors,
    ]),
    Fan::new(F::FourKongs, T::EightyEight, four_kongs)
        .in_group(G::Kongs)
        .excluding(&[F::AllPungs, F::SingleWait]),
    Fan::new(F::SevenShiftedPairs, T::EightyEight, seven_shifted_pairs)
        .in_group(G::SevenPairsFamily)
        .excluding(&[F::FullFlush, F::ConcealedHand, F::FullyConcealedHand, F::SingleWait, F::NoHonors]),
    Fan::new(F::ThirteenOrphans, T::EightyEight, thirteen_orphans).excluding(&[
        F::AllTerminalsAndHonors,
        F::AllTypes,
        F::ConcealedHand,
        F::FullyConcealedHand,
        F::SingleWait,
    ]),
    // 64 番
    Fan::new(F::AllTerminals, T::SixtyFour, all_terminals).excluding(&[
        F::AllTerminalsAndHonors,
        F::AllPungs,
        F::OutsideHand,
        F::DoublePung,
        F::PungOfTerminalsOrHonors,
        F::NoHonors,
    ]),
    Fan::new(F::LittleFourWinds, T::SixtyFour, little_four_winds).in_group(G::Winds),
    Fan::new(F::LittleThreeDragons, T::SixtyFour, little_three_dragons).in_group(G::Dragons),
    Fan::new(F::AllHonors, T::SixtyFour, all_honors).excluding(&[
        F::AllTerminalsAndHonors,
        F::AllPungs,
        F::OutsideHand,
        F::PungOfTerminalsOrHonors,
    ]),
    Fan::new(F::FourConcealedPungs, T::SixtyFour, four_concealed_pungs)
        .in_group(G::ConcealedPungs)
        .excluding(&[F::AllPungs, F::ConcealedHand, F::FullyConcealedHand]),
    Fan::new(F::PureTerminalChows, T::SixtyFour, pure_terminal_chows).excluding(&[
        F::FullFlush,
        F::AllChows,
        F::PureDoubleChow,
        F::TwoTerminalChows,
        F::NoHonors,
    ]),
    // 48 番
    Fan::new(F::QuadrupleChow, T::FortyEight, quadruple_chow)
        .in_group(G::ChowRepeat)
        .excluding(&[F::TileHog]),
    Fan::new(F::FourPureShiftedPungs, T::FortyEight, four_pure_shifted_pungs)
        .in_group(G::ShiftedPungs)
        .excluding(&[F::AllPungs]),
    // 32 番
    Fan::new(F::FourPureShiftedChows, T::ThirtyTwo, four_pure_shifted_chows)
        .in_group(G::ShiftedChows)
        .excluding(&[F::ShortStraight, F::TwoTerminalChows]),
    Fan::new(F::ThreeKongs, T::ThirtyTwo, three_kongs).in_group(G::Kongs),
    Fan::new(F::AllTerminalsAndHonors, T::ThirtyTwo, all_terminals_and_honors).excluding(&[
        F::AllPungs,
        F::OutsideHand,
        F::PungOfTerminalsOrHonors,
    ]),
    // 24 番
    Fan::new(F::SevenPairs, T::TwentyFour, seven_pairs)
        .in_group(G::SevenPairsFamily)
        .excluding(&[F::ConcealedHand, F::FullyConcealedHand, F::SingleWait]),
    Fan::new(F::GreaterHonorsAndKnittedTiles, T::TwentyFour, greater_honors_and_knitted)
        .in_group(G::Knitted)
        .excluding(&[F::AllTypes, F::ConcealedHand, F::FullyConcealedHand, F::SingleWait]),
    Fan::new(F::AllEvenPungs, T::TwentyFour, all_even_pungs).excluding(&[F::AllPungs, F::AllSimples, F::NoHonors]),
    Fan::new(F::FullFlush, T::TwentyFour, full_flush)
        .in_group(G::Flush)
        .excluding(&[F::OneVoidedSuit, F::NoHonors]),
    Fan::new(F::PureTripleChow, T::TwentyFour, pure_triple_chow).in_group(G::ChowRepeat),
    Fan::new(F::PureShiftedPungs, T::TwentyFour, pure_shifted_pungs).in_group(G::ShiftedPungs),
    Fan::new(F::UpperTiles, T::TwentyFour, upper_tiles).in_group(G::Range).excluding(&[F::NoHonors]),
    Fan::new(F::MiddleTiles, T::TwentyFour, middle_tiles)
        .in_group(G::Range)
        .excluding(&[F::AllSimples, F::NoHonors]),
    Fan::new(F::LowerTiles, T::TwentyFour, lower_tiles).in_group(G::Range).excluding(&[F::NoHonors]),
    // 16 番
    Fan::new(F::PureStraight, T::Sixteen, pure_straight).excluding(&[F::ShortStraight, F::TwoTerminalChows]),
    Fan::new(F::ThreeSuitedTerminalChows, T::Sixteen, three_suited_terminal_chows).excluding(&[
        F::AllChows,
        F::MixedDoubleChow,
        F::TwoTerminalChows,
        F::NoHonors,
    ]),
    Fan::new(F::PureShiftedChows, T::Sixteen, pure_shifted_chows).in_group(G::ShiftedChows),
    Fan::new(F::AllFives, T::Sixteen, all_fives).excluding(&[F::AllSimples]),
    Fan::new(F::TriplePung, T::Sixteen, triple_pung).in_group(G::SameRankPungs),
    Fan::new(F::ThreeConcealedPungs, T::Sixteen, three_concealed_pungs).in_group(G::ConcealedPungs),
    // 12 番
    Fan::new(F::LesserHonorsAndKnittedTiles, T::Twelve, lesser_honors_and_knitted)
        .in_group(G::Knitted)
        .excluding(&[F::AllTypes, F::ConcealedHand, F::FullyConcealedHand, F::SingleWait]),
    Fan::new(F::KnittedStraight, T::Twelve, knitted_straight),
    Fan::new(F::UpperFour, T::Twelve, upper_four).in_group(G::Range).excluding(&[F::NoHonors]),
    Fan::new(F::LowerFour, T::Twelve, lower_four).in_group(G::Range).excluding(&[F::NoHonors]),
    Fan::new(F::BigThreeWinds, T::Twelve, big_three_winds).in_group(G::Winds),
    // 8 番
    Fan::new(F::MixedStraight, T::Eight, mixed_straight),
    Fan::new(F::ReversibleTiles, T::Eight, reversible_tiles).excluding(&[F::OneVoidedSuit]),
    Fan::new(F::MixedTripleChow, T::Eight, mixed_triple_chow).excluding(&[F::MixedDoubleChow]),
    Fan::new(F::MixedShiftedPungs, T::Eight, mixed_shifted_pungs).in_group(G::ShiftedPungs),
    // 6 番
    Fan::new(F::AllPungs, T::Six, all_pungs),
    Fan::new(F::HalfFlush, T::Six, half_flush).in_group(G::Flush).excluding(&[F::OneVoidedSuit]),
    Fan::new(F::MixedShiftedChows, T::Six, mixed_shifted_chows).in_group(G::ShiftedChows),
    Fan::new(F::AllTypes, T::Six, all_types),
    Fan::new(F::MeldedHand, T::Six, melded_hand).excluding(&[F::SingleWait]),
    Fan::new(F::TwoConcealedKongs, T::Six, two_concealed_kongs)
        .in_group(G::Kongs)
        .excluding(&[F::TwoConcealedPungs]),
    Fan::new(F::TwoDragonPungs, T::Six, two_dragon_pungs).in_group(G::Dragons),
    // 4 番
    Fan::new(F::OutsideHand, T::Four, outside_hand),
    Fan::new(F::FullyConcealedHand, T::Four, fully_concealed_hand).excluding(&[F::ConcealedHand]),
    Fan::new(F::TwoMeldedKongs, T::Four, two_melded_kongs).in_group(G::Kongs),
    Fan::new(F::LastTile, T::Four, last_tile),
    // 2 番
    Fan::new(F::DragonPung, T::Two, has_dragon_pung).counted(dragon_pung_count).in_group(G::Dragons),
    Fan::new(F::PrevalentWind, T::Two, prevalent_wind),
    Fan::new(F::SeatWind, T::Two, seat_wind),
    Fan::new(F::ConcealedHand, T::Two, concealed_hand),
    Fan::new(F::AllChows, T::Two, all_chows).excluding(&[F::NoHonors]),
    Fan::new(F::TileHog, T::Two, has_tile_hog).counted(tile_hog_count),
    Fan::new(F::DoublePung, T::Two, has_double_pung).counted(double_pung_count).in_group(G::SameRankPungs),
    Fan::new(F::TwoConcealedPungs, T::Two, two_concealed_pungs).in_group(G::ConcealedPungs),
    Fan::new(F::ConcealedKong, T::Two, concealed_kong),
    Fan::new(F::AllSimples, T::Two, all_simples).excluding(&[F::NoHonors]),
    // 1 番
    Fan::new(F::PureDoubleChow, T::One, has_pure_double_chow)
        .counted(pure_double_chow_count)
        .in_group(G::ChowRepeat),
    Fan::new(F::MixedDoubleChow, T::One, has_mixed_double_chow).counted(mixed_double_chow_count),
    Fan::new(F::ShortStraight, T::One, has_short_straight).counted(short_straight_count),
    Fan::new(F::TwoTerminalChows, T::One, has_two_terminal_chows).counted(two_terminal_chows_count),
    Fan::new(F::PungOfTerminalsOrHonors, T::One, has_terminal_pung).counted(terminal_pung_count),
    Fan::new(F::MeldedKong, T::One, melded_kong),
    Fan::new(F::OneVoidedSuit, T::One, one_voided_suit),
    Fan::new(F::NoHonors, T::One, no_honors),
    Fan::new(F::EdgeWait, T::One, edge_wait).in_group(G::Wait),
    Fan::new(F::ClosedWait, T::One, closed_wait).in_group(G::Wait),
    Fan::new(F::SingleWait, T::One, single_wait).in_group(G::Wait),
    Fan::new(F::SelfDrawn, T::One, self_drawn).stacking(),
    Fan::new(F::FlowerTiles, T::One, has_flowers).counted(flower_count).stacking(),
];

/// 按标识查找番种定义
pub fn find(id: F) -> Option<&'static Fan> {
    CATALOG.iter().find(|def| def.id == id)
}

// ---------------------------------------------------------------------------
// 辅助函数
// ---------------------------------------------------------------------------

/// 任取三个（下标递增）满足条件
fn any_triple(items: &[Tile], pred: impl Fn(Tile, Tile, Tile) -> bool) -> bool {
    let n = items.len();
    (0..n).any(|a| (a + 1..n).any(|b| (b + 1..n).any(|c| pred(items[a], items[b], items[c]))))
}

/// 三张牌分属三种不同的序数花色
fn distinct_numeral_suits(a: Tile, b: Tile, c: Tile) -> bool {
    a.is_numeral()
        && b.is_numeral()
        && c.is_numeral()
        && a.suit() != b.suit()
        && b.suit() != c.suit()
        && a.suit() != c.suit()
}

fn same_suit(a: Tile, b: Tile, c: Tile) -> bool {
    a.suit() == b.suit() && b.suit() == c.suit()
}

fn sorted_ranks(a: Tile, b: Tile, c: Tile) -> [u8; 3] {
    let mut ranks = [a.rank(), b.rank(), c.rank()];
    ranks.sort();
    ranks
}

/// 等差数列，公差为 `step`
fn is_stepped(ranks: &[u8], step: u8) -> bool {
    ranks.windows(2).all(|w| w[0] + step == w[1])
}

/// `haystack` 包含 `needles` 中的每一张（按多重集计）
fn contains_all(haystack: &[Tile], needles: &[Tile]) -> bool {
    let mut used = vec![false; haystack.len()];
    needles.iter().all(|needle| {
        match haystack.iter().enumerate().position(|(idx, t)| !used[idx] && t == needle) {
            Some(idx) => {
                used[idx] = true;
                true
            }
            None => false,
        }
    })
}

fn numeral_pungs(i: &FanInput) -> SmallVec<[Tile; 4]> {
    i.pungs().into_iter().filter(|t| t.is_numeral()).collect()
}

/// 只有一种序数花色时返回该花色
fn single_numeral_suit(i: &FanInput) -> Option<Suit> {
    let suits = i.numeral_suits();
    if suits.len() == 1 {
        Some(suits[0])
    } else {
        None
    }
}

fn tile(suit: Suit, rank: u8) -> Option<Tile> {
    Tile::new(suit, rank)
}

// ---------------------------------------------------------------------------
// 风牌、箭牌
// ---------------------------------------------------------------------------

fn wind_pungs(i: &FanInput) -> usize {
    i.pungs_of_suit(Suit::Wind)
}

fn dragon_pungs(i: &FanInput) -> usize {
    i.pungs_of_suit(Suit::Dragon)
}

fn pair_is(i: &FanInput, suit: Suit) -> bool {
    i.pair().map_or(false, |p| p.suit() == suit)
}

fn big_four_winds(i: &FanInput) -> bool {
    wind_pungs(i) == 4
}

fn little_four_winds(i: &FanInput) -> bool {
    wind_pungs(i) == 3 && pair_is(i, Suit::Wind)
}

fn big_three_winds(i: &FanInput) -> bool {
    wind_pungs(i) == 3
}

fn big_three_dragons(i: &FanInput) -> bool {
    dragon_pungs(i) == 3
}

fn little_three_dragons(i: &FanInput) -> bool {
    dragon_pungs(i) == 2 && pair_is(i, Suit::Dragon)
}

fn two_dragon_pungs(i: &FanInput) -> bool {
    dragon_pungs(i) == 2
}

fn dragon_pung_count(i: &FanInput) -> u8 {
    dragon_pungs(i) as u8
}

fn has_dragon_pung(i: &FanInput) -> bool {
    dragon_pung_count(i) > 0
}

fn prevalent_wind(i: &FanInput) -> bool {
    i.has_pung_of(i.context.round_wind.tile())
}

fn seat_wind(i: &FanInput) -> bool {
    i.has_pung_of(i.context.seat_wind.tile())
}

/// 幺九刻：序数幺九的刻子，加上既非门风也非圈风的风刻
///
/// 三个以上风刻时风刻已由大三风 / 小四喜 / 大四喜计算
fn terminal_pung_count(i: &FanInput) -> u8 {
    let seat = i.context.seat_wind.tile();
    let round = i.context.round_wind.tile();
    let count_winds = wind_pungs(i) < 3;
    i.pungs()
        .iter()
        .filter(|&&t| t.is_terminal() || (count_winds && t.suit() == Suit::Wind && t != seat && t != round))
        .count() as u8
}

fn has_terminal_pung(i: &FanInput) -> bool {
    terminal_pung_count(i) > 0
}

// ---------------------------------------------------------------------------
// 整手牌的用牌范围
// ---------------------------------------------------------------------------

fn all_green(i: &FanInput) -> bool {
    i.all_tiles(|t| t.is_green())
}

fn all_terminals(i: &FanInput) -> bool {
    i.all_tiles(|t| t.is_terminal())
}

fn all_honors(i: &FanInput) -> bool {
    i.all_tiles(|t| t.is_honor())
}

fn all_terminals_and_honors(i: &FanInput) -> bool {
    i.all_tiles(|t| t.is_terminal_or_honor())
}

fn all_simples(i: &FanInput) -> bool {
    i.all_tiles(|t| !t.is_terminal_or_honor())
}

fn reversible_tiles(i: &FanInput) -> bool {
    i.all_tiles(|t| t.is_reversible())
}

fn ranks_within(i: &FanInput, low: u8, high: u8) -> bool {
    i.all_tiles(|t| t.is_numeral() && t.rank() >= low && t.rank() <= high)
}

fn upper_tiles(i: &FanInput) -> bool {
    ranks_within(i, 7, 9)
}

fn middle_tiles(i: &FanInput) -> bool {
    ranks_within(i, 4, 6)
}

fn lower_tiles(i: &FanInput) -> bool {
    ranks_within(i, 1, 3)
}

fn upper_four(i: &FanInput) -> bool {
    ranks_within(i, 6, 9)
}

fn lower_four(i: &FanInput) -> bool {
    ranks_within(i, 1, 4)
}

fn full_flush(i: &FanInput) -> bool {
    single_numeral_suit(i).is_some() && !i.has_honors()
}

fn half_flush(i: &FanInput) -> bool {
    single_numeral_suit(i).is_some() && i.has_honors()
}

fn all_types(i: &FanInput) -> bool {
    i.numeral_suits().len() == 3 && i.any_tile(|t| t.suit() == Suit::Wind) && i.any_tile(|t| t.suit() == Suit::Dragon)
}

fn one_voided_suit(i: &FanInput) -> bool {
    i.numeral_suits().len() == 2
}

fn no_honors(i: &FanInput) -> bool {
    !i.has_honors()
}

// ---------------------------------------------------------------------------
// 特殊牌型
// ---------------------------------------------------------------------------

/// 九莲宝灯：门清，胡牌前为同一花色的 1112345678999
fn nine_gates(i: &FanInput) -> bool {
    if !i.is_standard() || i.groups().iter().any(|g| g.is_declared) || i.has_honors() {
        return false;
    }
    let (Some(suit), Some(winning)) = (single_numeral_suit(i), i.winning_tile()) else {
        return false;
    };
    (1..=9u8).all(|rank| {
        let Some(t) = tile(suit, rank) else { return false };
        let expected = if rank == 1 || rank == 9 { 3 } else { 1 };
        let count = i.tiles.count(t);
        let before_win = if t == winning { count.saturating_sub(1) } else { count };
        before_win == expected
    })
}

fn thirteen_orphans(i: &FanInput) -> bool {
    i.shape() == WinShape::ThirteenOrphans
}

fn seven_pairs(i: &FanInput) -> bool {
    i.shape() == WinShape::SevenPairs
}

/// 连七对：同一花色数字相连的七个对子
fn seven_shifted_pairs(i: &FanInput) -> bool {
    if !seven_pairs(i) || !full_flush(i) {
        return false;
    }
    let ranks: SmallVec<[u8; 7]> = i.tiles.iter().map(|(t, _)| t.rank()).collect();
    match (ranks.first(), ranks.last()) {
        (Some(low), Some(high)) => high - low == 6,
        _ => false,
    }
}

fn lesser_honors_and_knitted(i: &FanInput) -> bool {
    i.shape() == WinShape::HonorsAndKnitted
}

/// 七星不靠：全不靠且七种字牌齐全
fn greater_honors_and_knitted(i: &FanInput) -> bool {
    lesser_honors_and_knitted(i) && i.tiles.iter().filter(|(t, _)| t.is_honor()).count() == 7
}

/// 组合龙：组合龙牌型，或全不靠中包含完整的 9 张组合龙
fn knitted_straight(i: &FanInput) -> bool {
    match i.shape() {
        WinShape::KnittedStraight => true,
        WinShape::HonorsAndKnitted => i
            .decomposition
            .knitted
            .map_or(false, |order| knitted_tiles(&order).iter().all(|&t| i.tiles.count(t) > 0)),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// 顺子
// ---------------------------------------------------------------------------

fn quadruple_chow(i: &FanInput) -> bool {
    let chows = i.chows();
    chows.len() == 4 && chows.iter().all(|&c| c == chows[0])
}

fn pure_triple_chow(i: &FanInput) -> bool {
    any_triple(&i.chows(), |a, b, c| a == b && b == c)
}

fn four_pure_shifted_chows(i: &FanInput) -> bool {
    let chows = i.chows();
    if chows.len() != 4 || !chows.iter().all(|c| c.suit() == chows[0].suit()) {
        return false;
    }
    let ranks: SmallVec<[u8; 4]> = chows.iter().map(|c| c.rank()).collect();
    is_stepped(&ranks, 1) || is_stepped(&ranks, 2)
}

/// 一色三步高：同花色三组顺子，依次递增一位或两位
fn pure_shifted_chows(i: &FanInput) -> bool {
    any_triple(&i.chows(), |a, b, c| {
        let ranks = sorted_ranks(a, b, c);
        same_suit(a, b, c) && (is_stepped(&ranks, 1) || is_stepped(&ranks, 2))
    })
}

fn mixed_shifted_chows(i: &FanInput) -> bool {
    any_triple(&i.chows(), |a, b, c| {
        distinct_numeral_suits(a, b, c) && is_stepped(&sorted_ranks(a, b, c), 1)
    })
}

fn pure_straight(i: &FanInput) -> bool {
    any_triple(&i.chows(), |a, b, c| same_suit(a, b, c) && sorted_ranks(a, b, c) == [1, 4, 7])
}

fn mixed_straight(i: &FanInput) -> bool {
    any_triple(&i.chows(), |a, b, c| {
        distinct_numeral_suits(a, b, c) && sorted_ranks(a, b, c) == [1, 4, 7]
    })
}

fn mixed_triple_chow(i: &FanInput) -> bool {
    any_triple(&i.chows(), |a, b, c| {
        distinct_numeral_suits(a, b, c) && a.rank() == b.rank() && b.rank() == c.rank()
    })
}

/// 一色双龙会：同花色 123、123、789、789，将牌为 5
fn pure_terminal_chows(i: &FanInput) -> bool {
    let Some(suit) = single_numeral_suit(i) else { return false };
    if i.has_honors() || i.pair() != tile(suit, 5) {
        return false;
    }
    match (tile(suit, 1), tile(suit, 7)) {
        (Some(low), Some(high)) => i.chows().as_slice() == [low, low, high, high],
        _ => false,
    }
}

/// 三色双龙会：两种花色的 123 和 789，将牌为第三种花色的 5
fn three_suited_terminal_chows(i: &FanInput) -> bool {
    let Some(pair) = i.pair() else { return false };
    if !i.is_standard() || !pair.is_numeral() || pair.rank() != 5 {
        return false;
    }
    let needed: SmallVec<[Tile; 4]> = Suit::numerals()
        .into_iter()
        .filter(|&suit| suit != pair.suit())
        .flat_map(|suit| [tile(suit, 1), tile(suit, 7)])
        .flatten()
        .collect();
    needed.len() == 4 && contains_all(&i.chows(), &needed)
}

fn all_chows(i: &FanInput) -> bool {
    i.is_standard() && i.chows().len() == 4 && i.pair().map_or(false, |p| p.is_numeral())
}

/// 一般高：两组相同的顺子（两两不重复使用）
fn pure_double_chow_count(i: &FanInput) -> u8 {
    let chows = i.chows();
    let mut count = 0;
    let mut idx = 0;
    while idx + 1 < chows.len() {
        if chows[idx] == chows[idx + 1] {
            count += 1;
            idx += 2;
        } else {
            idx += 1;
        }
    }
    count
}

fn has_pure_double_chow(i: &FanInput) -> bool {
    pure_double_chow_count(i) > 0
}

/// 喜相逢：两种花色数字相同的顺子
fn mixed_double_chow_count(i: &FanInput) -> u8 {
    let chows = i.chows();
    (1..=7u8)
        .map(|rank| {
            let mut per_suit = [0u8; 3];
            for chow in chows.iter().filter(|c| c.rank() == rank) {
                per_suit[chow.suit() as usize] += 1;
            }
            let total: u8 = per_suit.iter().sum();
            let largest = per_suit.iter().copied().max().unwrap_or(0);
            (total / 2).min(total - largest)
        })
        .sum()
}

fn has_mixed_double_chow(i: &FanInput) -> bool {
    mixed_double_chow_count(i) > 0
}

/// 连六：同花色起始数字相差 3 的两组顺子
fn short_straight_count(i: &FanInput) -> u8 {
    let chows = i.chows();
    let mut used = vec![false; chows.len()];
    let mut count = 0;
    for a in 0..chows.len() {
        if used[a] {
            continue;
        }
        let partner = (a + 1..chows.len()).find(|&b| {
            !used[b] && chows[b].suit() == chows[a].suit() && chows[b].rank() == chows[a].rank() + 3
        });
        if let Some(b) = partner {
            used[a] = true;
            used[b] = true;
            count += 1;
        }
    }
    count
}

fn has_short_straight(i: &FanInput) -> bool {
    short_straight_count(i) > 0
}

/// 老少副：同花色的 123 与 789
fn two_terminal_chows_count(i: &FanInput) -> u8 {
    let chows = i.chows();
    Suit::numerals()
        .into_iter()
        .map(|suit| {
            let low = chows.iter().filter(|c| c.suit() == suit && c.rank() == 1).count();
            let high = chows.iter().filter(|c| c.suit() == suit && c.rank() == 7).count();
            low.min(high) as u8
        })
        .sum()
}

fn has_two_terminal_chows(i: &FanInput) -> bool {
    two_terminal_chows_count(i) > 0
}

// ---------------------------------------------------------------------------
// 刻子
// ---------------------------------------------------------------------------

fn all_pungs(i: &FanInput) -> bool {
    i.is_standard() && i.pungs().len() == 4
}

fn all_even_pungs(i: &FanInput) -> bool {
    all_pungs(i) && i.all_tiles(|t| t.is_numeral() && t.rank() % 2 == 0)
}

fn four_pure_shifted_pungs(i: &FanInput) -> bool {
    let pungs = numeral_pungs(i);
    if pungs.len() != 4 || !pungs.iter().all(|p| p.suit() == pungs[0].suit()) {
        return false;
    }
    let ranks: SmallVec<[u8; 4]> = pungs.iter().map(|p| p.rank()).collect();
    is_stepped(&ranks, 1)
}

fn pure_shifted_pungs(i: &FanInput) -> bool {
    any_triple(&numeral_pungs(i), |a, b, c| same_suit(a, b, c) && is_stepped(&sorted_ranks(a, b, c), 1))
}

fn mixed_shifted_pungs(i: &FanInput) -> bool {
    any_triple(&numeral_pungs(i), |a, b, c| {
        distinct_numeral_suits(a, b, c) && is_stepped(&sorted_ranks(a, b, c), 1)
    })
}

fn triple_pung(i: &FanInput) -> bool {
    any_triple(&numeral_pungs(i), |a, b, c| {
        distinct_numeral_suits(a, b, c) && a.rank() == b.rank() && b.rank() == c.rank()
    })
}

/// 双同刻：两种花色数字相同的刻子
fn double_pung_count(i: &FanInput) -> u8 {
    let pungs = numeral_pungs(i);
    (1..=9u8)
        .filter(|&rank| pungs.iter().filter(|p| p.rank() == rank).count() >= 2)
        .count() as u8
}

fn has_double_pung(i: &FanInput) -> bool {
    double_pung_count(i) > 0
}

fn four_concealed_pungs(i: &FanInput) -> bool {
    i.concealed_pung_count() == 4
}

fn three_concealed_pungs(i: &FanInput) -> bool {
    i.concealed_pung_count() == 3
}

fn two_concealed_pungs(i: &FanInput) -> bool {
    i.concealed_pung_count() == 2
}

/// 全带五：每组面子和将牌都含 5
fn all_fives(i: &FanInput) -> bool {
    i.is_standard() && i.every_set(|tiles| tiles.iter().any(|t| t.is_numeral() && t.rank() == 5))
}

/// 全带幺：每组面子和将牌都含幺九牌或字牌
fn outside_hand(i: &FanInput) -> bool {
    i.is_standard() && i.every_set(|tiles| tiles.iter().any(|t| t.is_terminal_or_honor()))
}

/// 四归一：四张相同的牌没有开杠
fn tile_hog_count(i: &FanInput) -> u8 {
    i.tiles
        .iter()
        .filter(|&(t, count)| count == Tile::COPIES && !i.groups().iter().any(|g| g.is_kong() && g.tile == t))
        .count() as u8
}

fn has_tile_hog(i: &FanInput) -> bool {
    tile_hog_count(i) > 0
}

// ---------------------------------------------------------------------------
// 杠
// ---------------------------------------------------------------------------

fn four_kongs(i: &FanInput) -> bool {
    i.kong_count() == 4
}

fn three_kongs(i: &FanInput) -> bool {
    i.kong_count() == 3
}

fn two_concealed_kongs(i: &FanInput) -> bool {
    i.kong_count() == 2 && i.concealed_kong_count() == 2
}

fn two_melded_kongs(i: &FanInput) -> bool {
    i.kong_count() == 2 && i.melded_kong_count() == 2
}

fn concealed_kong(i: &FanInput) -> bool {
    i.kong_count() <= 2 && i.concealed_kong_count() == 1
}

fn melded_kong(i: &FanInput) -> bool {
    i.kong_count() <= 2 && i.melded_kong_count() == 1
}

// ---------------------------------------------------------------------------
// 门清、胡牌方式
// ---------------------------------------------------------------------------

fn concealed_hand(i: &FanInput) -> bool {
    i.is_concealed_hand() && !i.context.is_self_draw
}

fn fully_concealed_hand(i: &FanInput) -> bool {
    i.is_concealed_hand() && i.context.is_self_draw
}

/// 全求人：四组明露的副露，单钓他人打出的牌
fn melded_hand(i: &FanInput) -> bool {
    i.exposed_meld_count() == 4 && !i.context.is_self_draw && i.win_slot == WinSlot::Pair
}

fn last_tile(i: &FanInput) -> bool {
    i.context.is_last_of_kind
}

fn self_drawn(i: &FanInput) -> bool {
    i.context.is_self_draw
}

fn flower_count(i: &FanInput) -> u8 {
    i.context.flower_tile_count
}

fn has_flowers(i: &FanInput) -> bool {
    flower_count(i) > 0
}

// ---------------------------------------------------------------------------
// 听牌方式（只听一张时才计）
// ---------------------------------------------------------------------------

/// 胡牌张在暗手顺子中的位置
fn chow_position(i: &FanInput) -> Option<(u8, u8)> {
    let group = i.winning_group()?;
    let winning = i.winning_tile()?;
    if !group.is_chow() || group.is_declared || !group.contains(winning) {
        return None;
    }
    Some((group.tile.rank(), winning.rank()))
}

fn edge_wait(i: &FanInput) -> bool {
    i.wait_count == 1 && matches!(chow_position(i), Some((1, 3)) | Some((7, 7)))
}

fn closed_wait(i: &FanInput) -> bool {
    i.wait_count == 1 && matches!(chow_position(i), Some((start, rank)) if rank == start + 1)
}

fn single_wait(i: &FanInput) -> bool {
    i.wait_count == 1 && i.win_slot == WinSlot::Pair
}
