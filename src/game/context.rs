use crate::game::constants::MAX_FLOWERS;
use crate::tile::{Tile, Wind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 动作的执行者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// 胡牌者自己
    Own,
    /// 其他玩家
    Opponent,
}

/// 胡牌前的最后一个动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LastAction {
    /// 普通摸牌（回合开始）
    #[default]
    Draw,
    /// 打出一张牌
    Discard(Actor),
    /// 开杠（对手开杠时可以抢杠）
    Kong(Actor),
    /// 杠后补牌
    ReplacementDraw,
    /// 补花
    SupplementFlower,
}

/// 未知的动作名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLastAction(pub String);

impl fmt::Display for UnknownLastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown last action: {}", self.0)
    }
}

impl std::error::Error for UnknownLastAction {}

impl FromStr for LastAction {
    type Err = UnknownLastAction;

    /// `discard` 等同于 `discard_opponent`
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "draw" => Ok(LastAction::Draw),
            "discard" | "discard_opponent" => Ok(LastAction::Discard(Actor::Opponent)),
            "discard_own" => Ok(LastAction::Discard(Actor::Own)),
            "kong_own" => Ok(LastAction::Kong(Actor::Own)),
            "kong_opponent" => Ok(LastAction::Kong(Actor::Opponent)),
            "replacement_draw" => Ok(LastAction::ReplacementDraw),
            "supplement_flower" => Ok(LastAction::SupplementFlower),
            _ => Err(UnknownLastAction(name.to_string())),
        }
    }
}

/// 计分上下文
///
/// 在宣布胡牌的瞬间构造，所有字段都有默认值，番种判定不需要检查字段是否存在。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringContext {
    /// 是否自摸
    pub is_self_draw: bool,
    /// 是否庄家
    pub is_dealer: bool,
    /// 门风
    pub seat_wind: Wind,
    /// 圈风
    pub round_wind: Wind,
    /// 胡的那张牌（入口函数会用参数覆盖）
    pub winning_tile: Option<Tile>,
    /// 是否牌墙最后一张
    pub is_last_tile_in_wall: bool,
    /// 最后一个动作
    pub last_action: LastAction,
    /// 连续开杠次数
    pub consecutive_kong_count: u8,
    /// 花牌数量
    pub flower_tile_count: u8,
    /// 胡的牌是否为场上最后一张（和绝张）
    pub is_last_of_kind: bool,
}

impl ScoringContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_self_draw(mut self, is_self_draw: bool) -> Self {
        self.is_self_draw = is_self_draw;
        self
    }

    pub fn with_dealer(mut self, is_dealer: bool) -> Self {
        self.is_dealer = is_dealer;
        self
    }

    pub fn with_seat_wind(mut self, wind: Wind) -> Self {
        self.seat_wind = wind;
        self
    }

    pub fn with_round_wind(mut self, wind: Wind) -> Self {
        self.round_wind = wind;
        self
    }

    pub fn with_winning_tile(mut self, tile: Tile) -> Self {
        self.winning_tile = Some(tile);
        self
    }

    pub fn with_last_tile_in_wall(mut self, is_last: bool) -> Self {
        self.is_last_tile_in_wall = is_last;
        self
    }

    pub fn with_last_action(mut self, action: LastAction) -> Self {
        self.last_action = action;
        self
    }

    pub fn with_consecutive_kongs(mut self, count: u8) -> Self {
        self.consecutive_kong_count = count;
        self
    }

    /// 花牌数（最多 8 张）
    pub fn with_flowers(mut self, count: u8) -> Self {
        self.flower_tile_count = count.min(MAX_FLOWERS);
        self
    }

    pub fn with_last_of_kind(mut self, is_last: bool) -> Self {
        self.is_last_of_kind = is_last;
        self
    }

    /// 杠上开花：自摸，且上一个动作是自己开杠、杠后补牌或补花
    pub fn is_kong_replacement_win(&self) -> bool {
        self.is_self_draw
            && matches!(
                self.last_action,
                LastAction::Kong(Actor::Own) | LastAction::ReplacementDraw | LastAction::SupplementFlower
            )
    }

    /// 抢杠和：不是自摸，且上一个动作是对手开杠
    pub fn is_robbed_kong_win(&self) -> bool {
        !self.is_self_draw && self.last_action == LastAction::Kong(Actor::Opponent)
    }

    /// 妙手回春 / 海底捞月
    pub fn is_last_tile_win(&self) -> bool {
        self.is_last_tile_in_wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = ScoringContext::default();
        assert!(!ctx.is_self_draw);
        assert_eq!(ctx.seat_wind, Wind::East);
        assert_eq!(ctx.last_action, LastAction::Draw);
        assert_eq!(ctx.winning_tile, None);
    }

    #[test]
    fn test_kong_replacement_win() {
        let ctx = ScoringContext::new().with_self_draw(true).with_last_action(LastAction::Kong(Actor::Own));
        assert!(ctx.is_kong_replacement_win());
        assert!(ScoringContext::new()
            .with_self_draw(true)
            .with_last_action(LastAction::SupplementFlower)
            .is_kong_replacement_win());

        // 点炮不算杠上开花
        let ctx = ScoringContext::new().with_last_action(LastAction::ReplacementDraw);
        assert!(!ctx.is_kong_replacement_win());
    }

    #[test]
    fn test_robbed_kong_win() {
        let ctx = ScoringContext::new().with_last_action(LastAction::Kong(Actor::Opponent));
        assert!(ctx.is_robbed_kong_win());
        assert!(!ctx.with_self_draw(true).is_robbed_kong_win());
        assert!(!ScoringContext::new()
            .with_last_action(LastAction::Discard(Actor::Opponent))
            .is_robbed_kong_win());
    }

    #[test]
    fn test_deserialize_partial_context() {
        let ctx: ScoringContext =
            serde_json::from_str(r#"{ "is_dealer": true, "seat_wind": "South" }"#).unwrap();
        assert!(ctx.is_dealer);
        assert_eq!(ctx.seat_wind, Wind::South);
        assert_eq!(ctx.round_wind, Wind::East);
    }

    #[test]
    fn test_last_action_from_name() {
        assert_eq!("draw".parse::<LastAction>(), Ok(LastAction::Draw));
        assert_eq!("discard".parse::<LastAction>(), Ok(LastAction::Discard(Actor::Opponent)));
        assert_eq!("discard_own".parse::<LastAction>(), Ok(LastAction::Discard(Actor::Own)));
        assert_eq!("kong_opponent".parse::<LastAction>(), Ok(LastAction::Kong(Actor::Opponent)));
        assert_eq!("supplement_flower".parse::<LastAction>(), Ok(LastAction::SupplementFlower));

        let ctx = ScoringContext::new()
            .with_self_draw(true)
            .with_last_action("replacement_draw".parse().unwrap());
        assert!(ctx.is_kong_replacement_win());

        assert_eq!("Draw".parse::<LastAction>(), Err(UnknownLastAction("Draw".to_string())));
    }
}
