use serde::{Deserialize, Serialize};

/// 计分规则
///
/// 默认值取自大众麻将通用规则：底分 1，封顶 10 番。
/// 可以直接构造，也可以从 JSON 读取，缺省字段使用默认值：
///
/// ```
/// use fan_engine::ScoringRules;
///
/// let rules = ScoringRules::from_json(r#"{ "max_fan": 24 }"#).unwrap();
/// assert_eq!(rules.base_score, 1);
/// assert_eq!(rules.max_fan, 24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// 底分
    pub base_score: u32,
    /// 番数封顶
    pub max_fan: u32,
}

impl ScoringRules {
    pub const DEFAULT_BASE_SCORE: u32 = 1;
    pub const DEFAULT_MAX_FAN: u32 = 10;

    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 读取规则
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn with_base_score(mut self, base_score: u32) -> Self {
        self.base_score = base_score;
        self
    }

    pub fn with_max_fan(mut self, max_fan: u32) -> Self {
        self.max_fan = max_fan;
        self
    }

    /// 封顶后的番数
    #[inline]
    pub fn cap(&self, fans: u32) -> u32 {
        fans.min(self.max_fan)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base_score: Self::DEFAULT_BASE_SCORE,
            max_fan: Self::DEFAULT_MAX_FAN,
        }
    }
}
