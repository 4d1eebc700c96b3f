//! 2048 AI 引擎
//!
//! 包含:
//! - 局面评估函数（空格数、蛇形权重、单调性、平滑度）
//! - Expectiminimax 搜索（己方选择层 + 环境随机层）
//! - 迭代加深 + 每步时间预算

mod evaluate;
mod search;

pub use evaluate::{
    Evaluator, WEIGHT_EMPTY, WEIGHT_MONOTONICITY, WEIGHT_SMOOTHNESS, WEIGHT_SNAKE,
};
pub use search::{AiConfig, AiEngine, Cancelled, Ply, DEFAULT_TIME_LIMIT_MS};
