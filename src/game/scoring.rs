use crate::game::context::ScoringContext;
use crate::game::rules::ScoringRules;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// 倍数加成
///
/// 这些加成只乘在最终分数上，不计入番数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bonus {
    /// 杠上开花 ×2
    KongReplacement,
    /// 抢杠和 ×2
    RobbedKong,
    /// 海底捞月 / 妙手回春 ×2
    LastTile,
    /// 庄家 ×2
    Dealer,
    /// 连杠 ×(次数 + 1)
    ConsecutiveKongs(u8),
}

impl Bonus {
    /// 倍率
    #[inline]
    pub fn factor(&self) -> u32 {
        match self {
            Bonus::KongReplacement | Bonus::RobbedKong | Bonus::LastTile | Bonus::Dealer => 2,
            Bonus::ConsecutiveKongs(count) => *count as u32 + 1,
        }
    }
}

/// 动作触发标志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionFlags {
    /// 是否杠上开花
    pub is_kong_replacement: bool,
    /// 是否抢杠和
    pub is_robbed_kong: bool,
    /// 是否牌墙最后一张
    pub is_last_tile: bool,
    /// 是否庄家
    pub is_dealer: bool,
    /// 连续开杠次数
    pub consecutive_kongs: u8,
}

impl ActionFlags {
    /// 从计分上下文推导
    pub fn from_context(context: &ScoringContext) -> Self {
        Self {
            is_kong_replacement: context.is_kong_replacement_win(),
            is_robbed_kong: context.is_robbed_kong_win(),
            is_last_tile: context.is_last_tile_win(),
            is_dealer: context.is_dealer,
            consecutive_kongs: context.consecutive_kong_count,
        }
    }

    /// 生效的加成（顺序固定，但不影响乘积）
    pub fn bonuses(&self) -> SmallVec<[Bonus; 5]> {
        let mut bonuses = SmallVec::new();
        if self.is_kong_replacement {
            bonuses.push(Bonus::KongReplacement);
        }
        if self.is_robbed_kong {
            bonuses.push(Bonus::RobbedKong);
        }
        if self.is_last_tile {
            bonuses.push(Bonus::LastTile);
        }
        if self.is_dealer {
            bonuses.push(Bonus::Dealer);
        }
        if self.consecutive_kongs > 0 {
            bonuses.push(Bonus::ConsecutiveKongs(self.consecutive_kongs));
        }
        bonuses
    }

    /// 总倍率
    pub fn multiplier(&self) -> u32 {
        multiplier_of(&self.bonuses())
    }
}

/// 加成的乘积，溢出时取 `u32::MAX`
///
/// 所有倍率都不小于 1，部分乘积单调不减，所以是否溢出与相乘顺序无关
pub fn multiplier_of(bonuses: &[Bonus]) -> u32 {
    bonuses
        .iter()
        .try_fold(1u32, |product, bonus| product.checked_mul(bonus.factor()))
        .unwrap_or(u32::MAX)
}

/// 分数计算器
///
/// # 公式
///
/// 最终分数 = 底分 × 封顶后番数 × 倍率
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCalculator {
    pub base_score: u32,
}

impl ScoreCalculator {
    pub fn new(base_score: u32) -> Self {
        Self { base_score }
    }

    pub fn from_rules(rules: &ScoringRules) -> Self {
        Self::new(rules.base_score)
    }

    /// 计算最终分数
    ///
    /// # 参数
    ///
    /// - `capped_fan_total`: 封顶后的番数
    /// - `context`: 计分上下文
    ///
    /// # 返回
    ///
    /// 最终分数，溢出时为 `u32::MAX`
    pub fn compute(&self, capped_fan_total: u32, context: &ScoringContext) -> u32 {
        let multiplier = ActionFlags::from_context(context).multiplier();
        self.total(capped_fan_total, multiplier).unwrap_or(u32::MAX)
    }

    /// 底分 × 番数 × 倍率，溢出返回 None
    #[inline]
    pub fn total(&self, capped_fan_total: u32, multiplier: u32) -> Option<u32> {
        self.base_score
            .checked_mul(capped_fan_total)?
            .checked_mul(multiplier)
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::from_rules(&ScoringRules::default())
    }
}
