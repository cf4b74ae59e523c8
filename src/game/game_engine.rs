use crate::fan::{FanAggregator, FanOutcome, MatchedFan};
use crate::game::constants::WAITING_HAND_SIZE;
use crate::game::context::ScoringContext;
use crate::game::rules::ScoringRules;
use crate::game::scoring::{ActionFlags, Bonus, ScoreCalculator};
use crate::tile::win_check::validate_tiles;
use crate::tile::{Hand, Meld, Tile, WinChecker, WinShape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 手牌错误（调用方传入了不合法的手牌）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    /// 张数不符（暗手 + 3 × 副露）
    TileCount { expected: usize, actual: usize },
    /// 同一张牌超过 4 张
    TooManyCopies(Tile),
    /// 花牌不能进入手牌
    FlowerInHand(Tile),
    /// 数字超出花色范围
    InvalidTile(Tile),
    /// 无法解析的牌代码
    InvalidTileCode(String),
    /// 不合法的副露
    InvalidMeld(Meld),
    /// 副露超过 4 组
    TooManyMelds(usize),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::TileCount { expected, actual } => {
                write!(f, "expected {} tiles (melds count as 3), got {}", expected, actual)
            }
            HandError::TooManyCopies(tile) => write!(f, "more than 4 copies of {}", tile),
            HandError::FlowerInHand(tile) => write!(f, "flower {} cannot be part of a hand", tile),
            HandError::InvalidTile(tile) => write!(f, "invalid tile {:?}", tile),
            HandError::InvalidTileCode(code) => write!(f, "invalid tile code: {}", code),
            HandError::InvalidMeld(meld) => write!(f, "invalid meld {:?}", meld),
            HandError::TooManyMelds(count) => write!(f, "{} melds declared, at most 4 allowed", count),
        }
    }
}

impl std::error::Error for HandError {}

/// 胡牌计分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 胡牌牌型
    pub shape: WinShape,
    /// 命中的番种（按番种表顺序）
    pub fans: Vec<MatchedFan>,
    /// 封顶前总番数
    pub pre_cap_total: u32,
    /// 封顶后总番数
    pub capped_total: u32,
    /// 生效的倍数加成
    pub bonuses: Vec<Bonus>,
    /// 总倍率
    pub multiplier: u32,
    /// 底分
    pub base_score: u32,
    /// 最终分数
    pub final_score: u32,
}

impl ScoreResult {
    /// 命中的番种名
    pub fn fan_names(&self) -> Vec<&str> {
        self.fans.iter().map(|fan| fan.name.as_str()).collect()
    }

    pub fn has_fan(&self, name: &str) -> bool {
        self.fans.iter().any(|fan| fan.name == name)
    }
}

/// 胡牌判定结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinOutcome {
    /// 可以胡牌
    Scored(ScoreResult),
    /// 牌型合法但没有番种
    ShapeValidButUnscored,
    /// 不是胡牌牌型
    NoValidDecomposition,
}

impl WinOutcome {
    #[inline]
    pub fn is_win(&self) -> bool {
        matches!(self, WinOutcome::Scored(_))
    }

    pub fn score(&self) -> Option<&ScoreResult> {
        match self {
            WinOutcome::Scored(result) => Some(result),
            _ => None,
        }
    }
}

/// 计分引擎
///
/// 只保存规则，本身无状态，可以在线程间共享
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoringEngine {
    pub rules: ScoringRules,
}

impl ScoringEngine {
    /// 创建计分引擎
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    /// 加入 `candidate` 后能否胡牌（牌型合法且至少一个番种）
    ///
    /// # 参数
    ///
    /// - `concealed`: 胡牌前的暗手（13 张减去 3 × 副露数）
    /// - `melds`: 已声明的副露
    /// - `candidate`: 自摸或别人打出的牌
    /// - `context`: 计分上下文
    pub fn can_win(
        &self,
        concealed: &[Tile],
        melds: &[Meld],
        candidate: Tile,
        context: &ScoringContext,
    ) -> Result<bool, HandError> {
        Ok(self.score_win(concealed, melds, candidate, context)?.is_win())
    }

    /// 计算胡牌分数
    ///
    /// `winning_tile` 会覆盖 `context.winning_tile`
    pub fn score_win(
        &self,
        concealed: &[Tile],
        melds: &[Meld],
        winning_tile: Tile,
        context: &ScoringContext,
    ) -> Result<WinOutcome, HandError> {
        let full = complete_hand(concealed, melds, winning_tile).map_err(|e| {
            log::warn!("rejected hand: {}", e);
            e
        })?;
        let context = context.with_winning_tile(winning_tile);

        let tally = match FanAggregator::score(&full, melds, &context, &self.rules)? {
            FanOutcome::Scored(tally) => tally,
            FanOutcome::ShapeValidButUnscored => return Ok(WinOutcome::ShapeValidButUnscored),
            FanOutcome::NoValidDecomposition => return Ok(WinOutcome::NoValidDecomposition),
        };

        let flags = ActionFlags::from_context(&context);
        let multiplier = flags.multiplier();
        let final_score = ScoreCalculator::from_rules(&self.rules)
            .total(tally.capped_total, multiplier)
            .unwrap_or(u32::MAX);
        log::debug!(
            "win on {}: {} fans, x{} -> {} points",
            winning_tile,
            tally.capped_total,
            multiplier,
            final_score
        );

        Ok(WinOutcome::Scored(ScoreResult {
            shape: tally.shape,
            fans: tally.fans,
            pre_cap_total: tally.pre_cap_total,
            capped_total: tally.capped_total,
            bonuses: flags.bonuses().to_vec(),
            multiplier,
            base_score: self.rules.base_score,
            final_score,
        }))
    }

    /// 听牌：哪些牌能让 13 张（含副露）的手牌组成胡牌牌型（不考虑番数）
    pub fn waiting_tiles(&self, concealed: &[Tile], melds: &[Meld]) -> Result<Vec<Tile>, HandError> {
        let hand = Hand::from_tiles(concealed)?;
        WinChecker::waiting_tiles(&hand, melds)
    }
}

/// 校验胡牌前的手牌并加入胡牌张
fn complete_hand(concealed: &[Tile], melds: &[Meld], winning_tile: Tile) -> Result<Hand, HandError> {
    let hand = Hand::from_tiles(concealed)?;
    validate_tiles(&hand, melds, WAITING_HAND_SIZE)?;
    if winning_tile.is_flower() {
        return Err(HandError::FlowerInHand(winning_tile));
    }
    if !winning_tile.is_valid() {
        return Err(HandError::InvalidTile(winning_tile));
    }
    hand.with_tile(winning_tile).ok_or(HandError::TooManyCopies(winning_tile))
}

/// 便捷函数：使用默认规则判断能否胡牌
pub fn can_win(
    concealed: &[Tile],
    melds: &[Meld],
    candidate: Tile,
    context: &ScoringContext,
) -> Result<bool, HandError> {
    ScoringEngine::default().can_win(concealed, melds, candidate, context)
}

/// 便捷函数：使用默认规则计算胡牌分数
pub fn score_win(
    concealed: &[Tile],
    melds: &[Meld],
    winning_tile: Tile,
    context: &ScoringContext,
) -> Result<WinOutcome, HandError> {
    ScoringEngine::default().score_win(concealed, melds, winning_tile, context)
}

/// 便捷函数：听牌列表
pub fn waiting_tiles(concealed: &[Tile], melds: &[Meld]) -> Result<Vec<Tile>, HandError> {
    ScoringEngine::default().waiting_tiles(concealed, melds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::context::LastAction;
    use crate::tile::parse_tiles;

    fn tiles(code: &str) -> Vec<Tile> {
        parse_tiles(code).unwrap()
    }

    #[test]
    fn test_score_win_fills_result() {
        let ctx = ScoringContext::new().with_self_draw(true).with_dealer(true);
        let outcome = score_win(&tiles("12345678m111p55p"), &[], Tile::Wan(9), &ctx).unwrap();
        let result = outcome.score().unwrap();

        assert!(result.has_fan("pure_straight"));
        assert!(result.has_fan("self_drawn"));
        assert_eq!(result.capped_total, 10);
        assert!(result.pre_cap_total > 10);
        assert_eq!(result.bonuses, vec![Bonus::Dealer]);
        assert_eq!(result.multiplier, 2);
        assert_eq!(result.final_score, 20);
    }

    #[test]
    fn test_winning_tile_overrides_context() {
        let ctx = ScoringContext::new().with_winning_tile(Tile::Wind(1));
        let outcome = score_win(&tiles("12345678m111p55p"), &[], Tile::Wan(9), &ctx).unwrap();
        assert!(outcome.is_win());
    }

    #[test]
    fn test_malformed_hands() {
        let ctx = ScoringContext::new();
        assert_eq!(
            score_win(&tiles("123m"), &[], Tile::Wan(4), &ctx),
            Err(HandError::TileCount { expected: 13, actual: 3 })
        );
        assert_eq!(
            score_win(&tiles("1111m23456789p1s"), &[], Tile::Wan(1), &ctx),
            Err(HandError::TooManyCopies(Tile::Wan(1)))
        );
        assert_eq!(
            score_win(&tiles("123456789m1234p"), &[], Tile::Flower(1), &ctx),
            Err(HandError::FlowerInHand(Tile::Flower(1)))
        );
        assert_eq!(
            can_win(&tiles("123456789m1234p"), &[], Tile::Wan(10), &ctx),
            Err(HandError::InvalidTile(Tile::Wan(10)))
        );
        let melds = [Meld::chow(Tile::Wan(8))];
        assert_eq!(
            score_win(&tiles("123456789m1p"), &melds, Tile::Tong(1), &ctx),
            Err(HandError::InvalidMeld(melds[0]))
        );
    }

    #[test]
    fn test_robbed_kong_multiplier() {
        let ctx = ScoringContext::new().with_last_action(LastAction::Kong(crate::game::context::Actor::Opponent));
        let engine = ScoringEngine::new(ScoringRules::default().with_base_score(3));
        let outcome = engine.score_win(&tiles("12345678m111p55p"), &[], Tile::Wan(9), &ctx).unwrap();
        let result = outcome.score().unwrap();
        assert_eq!(result.bonuses, vec![Bonus::RobbedKong]);
        assert_eq!(result.final_score, 3 * 10 * 2);
    }

    #[test]
    fn test_waiting_tiles_entry() {
        let waits = waiting_tiles(&tiles("123m456m789m123p5s"), &[]).unwrap();
        assert_eq!(waits, vec![Tile::Tiao(5)]);
    }

    #[test]
    fn test_error_display() {
        let err = HandError::TileCount { expected: 13, actual: 12 };
        assert_eq!(err.to_string(), "expected 13 tiles (melds count as 3), got 12");
        assert_eq!(HandError::TooManyCopies(Tile::Tong(3)).to_string(), "more than 4 copies of 3p");
    }
}
