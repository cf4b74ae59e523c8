//! Python 绑定模块
//!
//! 提供 PyO3 接口，将胡牌判定和计分暴露给 Python 的牌局流程

// PyO3 宏会生成 non-local impl 定义
#![allow(non_local_definitions)]

#[cfg(feature = "python")]
pub mod game_engine;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python 模块初始化
///
/// Rust 侧的 `log` 记录通过 pyo3-log 转发到 Python 的 logging
#[cfg(feature = "python")]
#[pymodule]
fn fan_engine(_py: Python, m: &PyModule) -> PyResult<()> {
    use game_engine::PyScoringEngine;

    pyo3_log::init();

    m.add_class::<PyScoringEngine>()?;
    m.add_function(pyo3::wrap_pyfunction!(game_engine::can_win, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(game_engine::score_win, m)?)?;
    Ok(())
}
