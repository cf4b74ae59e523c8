use super::input::FanInput;
use serde::{Deserialize, Serialize};

/// 番数档位
///
/// 只允许固定的几个值，避免手写番数时出错
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FanTier {
    One,
    Two,
    Four,
    /// 6 番：固定档位之外的扩展档，碰碰和、混一色、五门齐等番种使用
    Six,
    Eight,
    Twelve,
    Sixteen,
    TwentyFour,
    ThirtyTwo,
    /// 保留档位，目前没有番种使用
    ThirtySix,
    FortyEight,
    SixtyFour,
    EightyEight,
}

impl FanTier {
    /// 番数
    pub const fn points(self) -> u32 {
        match self {
            FanTier::One => 1,
            FanTier::Two => 2,
            FanTier::Four => 4,
            FanTier::Six => 6,
            FanTier::Eight => 8,
            FanTier::Twelve => 12,
            FanTier::Sixteen => 16,
            FanTier::TwentyFour => 24,
            FanTier::ThirtyTwo => 32,
            FanTier::ThirtySix => 36,
            FanTier::FortyEight => 48,
            FanTier::SixtyFour => 64,
            FanTier::EightyEight => 88,
        }
    }

    /// 从番数反查档位
    pub fn from_points(points: u32) -> Option<Self> {
        Self::all().into_iter().find(|tier| tier.points() == points)
    }

    pub fn all() -> [FanTier; 13] {
        [
            FanTier::One,
            FanTier::Two,
            FanTier::Four,
            FanTier::Six,
            FanTier::Eight,
            FanTier::Twelve,
            FanTier::Sixteen,
            FanTier::TwentyFour,
            FanTier::ThirtyTwo,
            FanTier::ThirtySix,
            FanTier::FortyEight,
            FanTier::SixtyFour,
            FanTier::EightyEight,
        ]
    }
}

/// 互斥组
///
/// 同一组内按番种表顺序只保留第一个命中的番种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExclusivityGroup {
    /// 大四喜 / 小四喜 / 大三风
    Winds,
    /// 大三元 / 小三元 / 双箭刻 / 箭刻
    Dragons,
    /// 四杠 / 三杠 / 双暗杠 / 双明杠
    Kongs,
    /// 四暗刻 / 三暗刻 / 双暗刻
    ConcealedPungs,
    /// 一色四同顺 / 一色三同顺 / 一般高
    ChowRepeat,
    /// 一色四步高 / 一色三步高 / 三色三步高
    ShiftedChows,
    /// 一色四节高 / 一色三节高 / 三色三节高
    ShiftedPungs,
    /// 三同刻 / 双同刻
    SameRankPungs,
    /// 清一色 / 混一色
    Flush,
    /// 全大 / 全中 / 全小 / 大于五 / 小于五
    Range,
    /// 连七对 / 七对
    SevenPairsFamily,
    /// 七星不靠 / 全不靠
    Knitted,
    /// 边张 / 嵌张 / 单钓将
    Wait,
}

/// 番种标识
///
/// `name()` 返回规范的英文标识，用于显示和序列化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanId {
    // 88 番
    BigFourWinds,
    BigThreeDragons,
    AllGreen,
    NineGates,
    FourKongs,
    SevenShiftedPairs,
    ThirteenOrphans,
    // 64 番
    AllTerminals,
    LittleFourWinds,
    LittleThreeDragons,
    AllHonors,
    FourConcealedPungs,
    PureTerminalChows,
    // 48 番
    QuadrupleChow,
    FourPureShiftedPungs,
    // 32 番
    FourPureShiftedChows,
    ThreeKongs,
    AllTerminalsAndHonors,
    // 24 番
    SevenPairs,
    GreaterHonorsAndKnittedTiles,
    AllEvenPungs,
    FullFlush,
    PureTripleChow,
    PureShiftedPungs,
    UpperTiles,
    MiddleTiles,
    LowerTiles,
    // 16 番
    PureStraight,
    ThreeSuitedTerminalChows,
    PureShiftedChows,
    AllFives,
    TriplePung,
    ThreeConcealedPungs,
    // 12 番
    LesserHonorsAndKnittedTiles,
    KnittedStraight,
    UpperFour,
    LowerFour,
    BigThreeWinds,
    // 8 番
    MixedStraight,
    ReversibleTiles,
    MixedTripleChow,
    MixedShiftedPungs,
    // 6 番
    AllPungs,
    HalfFlush,
    MixedShiftedChows,
    AllTypes,
    MeldedHand,
    TwoConcealedKongs,
    TwoDragonPungs,
    // 4 番
    OutsideHand,
    FullyConcealedHand,
    TwoMeldedKongs,
    LastTile,
    // 2 番
    DragonPung,
    PrevalentWind,
    SeatWind,
    ConcealedHand,
    AllChows,
    TileHog,
    DoublePung,
    TwoConcealedPungs,
    ConcealedKong,
    AllSimples,
    // 1 番
    PureDoubleChow,
    MixedDoubleChow,
    ShortStraight,
    TwoTerminalChows,
    PungOfTerminalsOrHonors,
    MeldedKong,
    OneVoidedSuit,
    NoHonors,
    EdgeWait,
    ClosedWait,
    SingleWait,
    SelfDrawn,
    FlowerTiles,
}

impl FanId {
    /// 规范标识
    pub const fn name(self) -> &'static str {
        match self {
            FanId::BigFourWinds => "big_four_winds",
            FanId::BigThreeDragons => "big_three_dragons",
            FanId::AllGreen => "all_green",
            FanId::NineGates => "nine_gates",
            FanId::FourKongs => "four_kongs",
            FanId::SevenShiftedPairs => "seven_shifted_pairs",
            FanId::ThirteenOrphans => "thirteen_orphans",
            FanId::AllTerminals => "all_terminals",
            FanId::LittleFourWinds => "little_four_winds",
            FanId::LittleThreeDragons => "little_three_dragons",
            FanId::AllHonors => "all_honors",
            FanId::FourConcealedPungs => "four_concealed_pungs",
            FanId::PureTerminalChows => "pure_terminal_chows",
            FanId::QuadrupleChow => "quadruple_chow",
            FanId::FourPureShiftedPungs => "four_pure_shifted_pungs",
            FanId::FourPureShiftedChows => "four_pure_shifted_chows",
            FanId::ThreeKongs => "three_kongs",
            FanId::AllTerminalsAndHonors => "all_terminals_and_honors",
            FanId::SevenPairs => "seven_pairs",
            FanId::GreaterHonorsAndKnittedTiles => "greater_honors_and_knitted_tiles",
            FanId::AllEvenPungs => "all_even_pungs",
            FanId::FullFlush => "full_flush",
            FanId::PureTripleChow => "pure_triple_chow",
            FanId::PureShiftedPungs => "pure_shifted_pungs",
            FanId::UpperTiles => "upper_tiles",
            FanId::MiddleTiles => "middle_tiles",
            FanId::LowerTiles => "lower_tiles",
            FanId::PureStraight => "pure_straight",
            FanId::ThreeSuitedTerminalChows => "three_suited_terminal_chows",
            FanId::PureShiftedChows => "pure_shifted_chows",
            FanId::AllFives => "all_fives",
            FanId::TriplePung => "triple_pung",
            FanId::ThreeConcealedPungs => "three_concealed_pungs",
            FanId::LesserHonorsAndKnittedTiles => "lesser_honors_and_knitted_tiles",
            FanId::KnittedStraight => "knitted_straight",
            FanId::UpperFour => "upper_four",
            FanId::LowerFour => "lower_four",
            FanId::BigThreeWinds => "big_three_winds",
            FanId::MixedStraight => "mixed_straight",
            FanId::ReversibleTiles => "reversible_tiles",
            FanId::MixedTripleChow => "mixed_triple_chow",
            FanId::MixedShiftedPungs => "mixed_shifted_pungs",
            FanId::AllPungs => "all_pungs",
            FanId::HalfFlush => "half_flush",
            FanId::MixedShiftedChows => "mixed_shifted_chows",
            FanId::AllTypes => "all_types",
            FanId::MeldedHand => "melded_hand",
            FanId::TwoConcealedKongs => "two_concealed_kongs",
            FanId::TwoDragonPungs => "two_dragon_pungs",
            FanId::OutsideHand => "outside_hand",
            FanId::FullyConcealedHand => "fully_concealed_hand",
            FanId::TwoMeldedKongs => "two_melded_kongs",
            FanId::LastTile => "last_tile",
            FanId::DragonPung => "dragon_pung",
            FanId::PrevalentWind => "prevalent_wind",
            FanId::SeatWind => "seat_wind",
            FanId::ConcealedHand => "concealed_hand",
            FanId::AllChows => "all_chows",
            FanId::TileHog => "tile_hog",
            FanId::DoublePung => "double_pung",
            FanId::TwoConcealedPungs => "two_concealed_pungs",
            FanId::ConcealedKong => "concealed_kong",
            FanId::AllSimples => "all_simples",
            FanId::PureDoubleChow => "pure_double_chow",
            FanId::MixedDoubleChow => "mixed_double_chow",
            FanId::ShortStraight => "short_straight",
            FanId::TwoTerminalChows => "two_terminal_chows",
            FanId::PungOfTerminalsOrHonors => "pung_of_terminals_or_honors",
            FanId::MeldedKong => "melded_kong",
            FanId::OneVoidedSuit => "one_voided_suit",
            FanId::NoHonors => "no_honors",
            FanId::EdgeWait => "edge_wait",
            FanId::ClosedWait => "closed_wait",
            FanId::SingleWait => "single_wait",
            FanId::SelfDrawn => "self_drawn",
            FanId::FlowerTiles => "flower_tiles",
        }
    }
}

impl std::fmt::Display for FanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 判定函数
pub type Predicate = fn(&FanInput) -> bool;

/// 计次函数（可重复计番的番种，如幺九刻、花牌）
pub type Counter = fn(&FanInput) -> u8;

/// 番种定义
///
/// 番种表中的一条记录。互斥关系只通过 `exclusivity_group` 和 `excludes` 表达，
/// `stackable` 的番种不会出现在任何其他番种的组或 `excludes` 中。
#[derive(Clone, Copy)]
pub struct FanDefinition {
    pub id: FanId,
    pub tier: FanTier,
    pub predicate: Predicate,
    pub counter: Option<Counter>,
    pub exclusivity_group: Option<ExclusivityGroup>,
    /// 命中后不再计算的番种（被本番种包含）
    pub excludes: &'static [FanId],
    /// 与其他番种无条件叠加
    pub stackable: bool,
}

impl FanDefinition {
    /// 番种表用的构造器：不计次、不属于任何组、不包含其他番种
    pub const fn new(id: FanId, tier: FanTier, predicate: Predicate) -> Self {
        Self {
            id,
            tier,
            predicate,
            counter: None,
            exclusivity_group: None,
            excludes: &[],
            stackable: false,
        }
    }

    pub const fn counted(mut self, counter: Counter) -> Self {
        self.counter = Some(counter);
        self
    }

    pub const fn in_group(mut self, group: ExclusivityGroup) -> Self {
        self.exclusivity_group = Some(group);
        self
    }

    pub const fn excluding(mut self, excludes: &'static [FanId]) -> Self {
        self.excludes = excludes;
        self
    }

    pub const fn stacking(mut self) -> Self {
        self.stackable = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// 命中次数（未命中为 0）
    pub fn occurrences(&self, input: &FanInput) -> u8 {
        if !(self.predicate)(input) {
            return 0;
        }
        match self.counter {
            Some(counter) => counter(input),
            None => 1,
        }
    }
}

impl std::fmt::Debug for FanDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanDefinition")
            .field("id", &self.id)
            .field("tier", &self.tier)
            .field("exclusivity_group", &self.exclusivity_group)
            .field("excludes", &self.excludes)
            .field("stackable", &self.stackable)
            .finish()
    }
}

/// 命中的番种
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchedFan {
    pub id: FanId,
    pub name: String,
    pub tier: FanTier,
    /// 命中次数
    pub count: u8,
    /// 番数 = 档位 × 次数
    pub points: u32,
}

impl MatchedFan {
    pub fn new(id: FanId, tier: FanTier, count: u8) -> Self {
        Self {
            id,
            name: id.name().to_string(),
            tier,
            count,
            points: tier.points().saturating_mul(count as u32),
        }
    }
}
