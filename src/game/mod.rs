/// 计分逻辑模块
///
/// 包含计分上下文、规则配置、倍数加成和对外入口

pub mod constants;
pub mod context;
pub mod rules;
pub mod scoring;
pub mod game_engine;
