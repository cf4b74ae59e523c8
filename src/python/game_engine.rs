use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use crate::game::context::{LastAction, ScoringContext};
use crate::game::game_engine::{HandError, ScoreResult, ScoringEngine, WinOutcome};
use crate::game::rules::ScoringRules;
use crate::tile::{parse_tiles, Meld, Tile, Wind};

fn value_error(message: String) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(message)
}

fn hand_error(e: HandError) -> PyErr {
    value_error(format!("Malformed hand: {}", e))
}

/// 解析单张牌代码，例如 "5m"
fn parse_tile(code: &str) -> PyResult<Tile> {
    code.parse::<Tile>().map_err(|e| value_error(e.to_string()))
}

/// 解析副露，格式为 "chow:2m"、"pung:5z"、"kong:1p"、"concealed_kong:9s"
fn parse_meld(code: &str) -> PyResult<Meld> {
    code.parse::<Meld>().map_err(|e| value_error(e.to_string()))
}

fn parse_wind(name: &str) -> PyResult<Wind> {
    match name {
        "east" => Ok(Wind::East),
        "south" => Ok(Wind::South),
        "west" => Ok(Wind::West),
        "north" => Ok(Wind::North),
        _ => Err(value_error(format!("Invalid wind: {}", name))),
    }
}

/// 解析最后动作，例如 "draw"、"discard"、"kong_own"、"kong_opponent"、"replacement_draw"
fn parse_last_action(name: &str) -> PyResult<LastAction> {
    name.parse::<LastAction>().map_err(|e| value_error(e.to_string()))
}

/// 从 Python 字典构造计分上下文，缺省的键使用默认值
fn parse_context(context: Option<&PyDict>) -> PyResult<ScoringContext> {
    let mut ctx = ScoringContext::default();
    let Some(dict) = context else { return Ok(ctx) };

    if let Some(value) = dict.get_item("is_self_draw")? {
        ctx.is_self_draw = value.extract()?;
    }
    if let Some(value) = dict.get_item("is_dealer")? {
        ctx.is_dealer = value.extract()?;
    }
    if let Some(value) = dict.get_item("seat_wind")? {
        ctx.seat_wind = parse_wind(value.extract()?)?;
    }
    if let Some(value) = dict.get_item("round_wind")? {
        ctx.round_wind = parse_wind(value.extract()?)?;
    }
    if let Some(value) = dict.get_item("is_last_tile_in_wall")? {
        ctx.is_last_tile_in_wall = value.extract()?;
    }
    if let Some(value) = dict.get_item("last_action")? {
        ctx.last_action = parse_last_action(value.extract()?)?;
    }
    if let Some(value) = dict.get_item("consecutive_kong_count")? {
        ctx.consecutive_kong_count = value.extract()?;
    }
    if let Some(value) = dict.get_item("flower_tile_count")? {
        ctx = ctx.with_flowers(value.extract()?);
    }
    if let Some(value) = dict.get_item("is_last_of_kind")? {
        ctx.is_last_of_kind = value.extract()?;
    }
    Ok(ctx)
}

fn score_to_dict<'py>(py: Python<'py>, result: &ScoreResult) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item("shape", format!("{:?}", result.shape))?;
    let fans = PyList::empty(py);
    for fan in &result.fans {
        let fan_dict = PyDict::new(py);
        fan_dict.set_item("name", fan.name.as_str())?;
        fan_dict.set_item("tier", fan.tier.points())?;
        fan_dict.set_item("count", fan.count)?;
        fan_dict.set_item("points", fan.points)?;
        fans.append(fan_dict)?;
    }
    dict.set_item("fans", fans)?;
    dict.set_item("pre_cap_total", result.pre_cap_total)?;
    dict.set_item("capped_total", result.capped_total)?;
    let bonuses: Vec<String> = result.bonuses.iter().map(|b| format!("{:?}", b)).collect();
    dict.set_item("bonuses", bonuses)?;
    dict.set_item("multiplier", result.multiplier)?;
    dict.set_item("base_score", result.base_score)?;
    dict.set_item("final_score", result.final_score)?;
    Ok(dict)
}

/// Python 绑定的计分引擎
#[pyclass]
pub struct PyScoringEngine {
    inner: ScoringEngine,
}

impl PyScoringEngine {
    fn inputs(&self, concealed: &str, melds: Vec<String>) -> PyResult<(Vec<Tile>, Vec<Meld>)> {
        let tiles = parse_tiles(concealed).map_err(|e| value_error(e.to_string()))?;
        let melds = melds.iter().map(|m| parse_meld(m)).collect::<PyResult<Vec<_>>>()?;
        Ok((tiles, melds))
    }
}

#[pymethods]
impl PyScoringEngine {
    /// 创建计分引擎
    ///
    /// # 参数
    ///
    /// - `base_score`: 底分（默认 1）
    /// - `max_fan`: 番数封顶（默认 10）
    #[new]
    #[pyo3(signature = (base_score=None, max_fan=None))]
    pub fn new(base_score: Option<u32>, max_fan: Option<u32>) -> Self {
        let mut rules = ScoringRules::default();
        if let Some(base_score) = base_score {
            rules = rules.with_base_score(base_score);
        }
        if let Some(max_fan) = max_fan {
            rules = rules.with_max_fan(max_fan);
        }
        Self { inner: ScoringEngine::new(rules) }
    }

    /// 从 JSON 规则创建
    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        let rules = ScoringRules::from_json(json).map_err(|e| value_error(format!("Invalid rules: {}", e)))?;
        Ok(Self { inner: ScoringEngine::new(rules) })
    }

    /// 加入 `tile` 后能否胡牌
    #[pyo3(signature = (concealed, melds, tile, context=None))]
    pub fn can_win(&self, concealed: &str, melds: Vec<String>, tile: &str, context: Option<&PyDict>) -> PyResult<bool> {
        let (tiles, melds) = self.inputs(concealed, melds)?;
        self.inner
            .can_win(&tiles, &melds, parse_tile(tile)?, &parse_context(context)?)
            .map_err(hand_error)
    }

    /// 计算胡牌分数
    ///
    /// 返回字典：`status` 为 "scored"、"unscored" 或 "no_win"，胡牌时附带番种和分数
    #[pyo3(signature = (concealed, melds, tile, context=None))]
    pub fn score_win(
        &self,
        concealed: &str,
        melds: Vec<String>,
        tile: &str,
        context: Option<&PyDict>,
        py: Python,
    ) -> PyResult<PyObject> {
        let (tiles, melds) = self.inputs(concealed, melds)?;
        let outcome = self
            .inner
            .score_win(&tiles, &melds, parse_tile(tile)?, &parse_context(context)?)
            .map_err(hand_error)?;
        let dict = match outcome {
            WinOutcome::Scored(ref result) => {
                let dict = score_to_dict(py, result)?;
                dict.set_item("status", "scored")?;
                dict
            }
            WinOutcome::ShapeValidButUnscored => {
                let dict = PyDict::new(py);
                dict.set_item("status", "unscored")?;
                dict
            }
            WinOutcome::NoValidDecomposition => {
                let dict = PyDict::new(py);
                dict.set_item("status", "no_win")?;
                dict
            }
        };
        Ok(dict.into())
    }

    /// 听牌列表（牌代码）
    #[pyo3(signature = (concealed, melds=Vec::new()))]
    pub fn waiting_tiles(&self, concealed: &str, melds: Vec<String>) -> PyResult<Vec<String>> {
        let (tiles, melds) = self.inputs(concealed, melds)?;
        let waits = self.inner.waiting_tiles(&tiles, &melds).map_err(hand_error)?;
        Ok(waits.iter().map(|t| t.to_string()).collect())
    }

    fn __repr__(&self) -> String {
        format!(
            "PyScoringEngine(base_score={}, max_fan={})",
            self.inner.rules.base_score, self.inner.rules.max_fan
        )
    }
}

/// 使用默认规则判断能否胡牌
#[pyfunction]
#[pyo3(signature = (concealed, melds, tile, context=None))]
pub fn can_win(concealed: &str, melds: Vec<String>, tile: &str, context: Option<&PyDict>) -> PyResult<bool> {
    PyScoringEngine::new(None, None).can_win(concealed, melds, tile, context)
}

/// 使用默认规则计算胡牌分数
#[pyfunction]
#[pyo3(signature = (concealed, melds, tile, context=None))]
pub fn score_win(
    concealed: &str,
    melds: Vec<String>,
    tile: &str,
    context: Option<&PyDict>,
    py: Python,
) -> PyResult<PyObject> {
    PyScoringEngine::new(None, None).score_win(concealed, melds, tile, context, py)
}
