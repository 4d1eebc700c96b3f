//! 搜索引擎
//!
//! 实现 Expectiminimax + 迭代加深 + 每步时间预算。
//! 深度按半层计：一层要么是己方移动（Max），要么是环境落块的
//! 完整概率分布（Chance），二者交替。

use std::time::{Duration, Instant};

use grid::{Direction, Grid, PROB_FOUR, PROB_TWO, TILE_FOUR, TILE_TWO};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::evaluate::Evaluator;

/// 默认每步时间预算（毫秒）
pub const DEFAULT_TIME_LIMIT_MS: u64 = 180;

/// 迭代加深的深度上限
///
/// 正常局面远在到达之前就会超时，这个上限只防止
/// 极端退化局面（随机层无格可落、整层瞬间完成）把深度推到溢出。
const MAX_SEARCH_DEPTH: u32 = 64;

/// 搜索被截止时间取消
///
/// 只在引擎内部沿调用链向上传播，由迭代加深驱动层吞掉，
/// 不会暴露给 choose_move 的调用方。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search deadline exceeded")]
pub struct Cancelled;

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ply {
    /// 己方选择层：对所有合法移动取最大值
    Max,
    /// 环境随机层：对所有落块结果取概率加权期望
    Chance,
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// 每步时间预算（毫秒）
    pub time_limit_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
        }
    }
}

/// AI 引擎
///
/// 除了每次决策开始时记录的截止时间，不在回合之间保留任何状态。
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    /// 用指定的时间预算创建
    pub fn with_time_limit(time_limit_ms: u64) -> Self {
        Self::new(AiConfig { time_limit_ms })
    }

    /// 获取配置
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索最佳移动
    ///
    /// 只有在棋盘没有任何合法移动时返回 None（调用方应该在终局前
    /// 停止调用）。只要存在合法移动，即使预算已经耗尽也会返回其中
    /// 第一个作为兜底。
    pub fn choose_move(&mut self, grid: &Grid) -> Option<Direction> {
        self.nodes_searched = 0;
        let deadline = Instant::now() + Duration::from_millis(self.config.time_limit_ms);

        let moves = grid.available_moves();
        if moves.is_empty() {
            return None;
        }

        let mut best_move: Option<Direction> = None;
        let mut depth: u32 = 1;

        // 迭代加深：只要还有时间就加深一层整体重搜
        while depth <= MAX_SEARCH_DEPTH && Instant::now() < deadline {
            match self.root_pass(grid, &moves, depth, deadline) {
                Ok((pass_best, pass_score)) => {
                    debug!(depth, best = %pass_best, score = pass_score, "depth pass complete");
                    best_move = Some(pass_best);
                    depth += 1;
                }
                // 超时：丢弃本层的部分结果，沿用上一个完整层的结论
                Err(Cancelled) => break,
            }
        }

        best_move.or_else(|| moves.first().copied())
    }

    /// 在固定深度上完整评估一遍所有根移动
    ///
    /// 任何一个根移动评估前或递归途中越过截止时间，整层作废。
    fn root_pass(
        &mut self,
        grid: &Grid,
        moves: &[Direction],
        depth: u32,
        deadline: Instant,
    ) -> Result<(Direction, f64), Cancelled> {
        let mut best_move = moves[0];
        let mut best_score = f64::NEG_INFINITY;

        for &mv in moves {
            if Instant::now() >= deadline {
                return Err(Cancelled);
            }

            let mut next = grid.clone();
            next.apply_move(mv);

            // 己方移动之后环境立即落块，所以从随机层继续往下搜
            let score = self.expectiminimax(&next, depth - 1, Ply::Chance, deadline)?;
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        Ok((best_move, best_score))
    }

    /// Expectiminimax 递归搜索
    fn expectiminimax(
        &mut self,
        grid: &Grid,
        depth: u32,
        ply: Ply,
        deadline: Instant,
    ) -> Result<f64, Cancelled> {
        self.nodes_searched += 1;

        if Instant::now() >= deadline {
            return Err(Cancelled);
        }

        // 无路可走即必败，要先于深度判断，终局不能被当成普通叶子
        let moves = grid.available_moves();
        if moves.is_empty() {
            return Ok(f64::NEG_INFINITY);
        }

        if depth == 0 {
            return Ok(Evaluator::evaluate(grid));
        }

        match ply {
            Ply::Max => {
                let mut best = f64::NEG_INFINITY;
                for mv in moves {
                    let mut next = grid.clone();
                    next.apply_move(mv);
                    let score = self.expectiminimax(&next, depth - 1, Ply::Chance, deadline)?;
                    best = best.max(score);
                }
                Ok(best)
            }
            Ply::Chance => {
                let cells = grid.available_cells();
                // 满盘但仍有合并可走：没有格子可落块，期望记 0
                if cells.is_empty() {
                    return Ok(0.0);
                }

                let cell_prob = 1.0 / cells.len() as f64;
                let mut expected = 0.0;
                for cell in cells {
                    for (value, prob) in [(TILE_TWO, PROB_TWO), (TILE_FOUR, PROB_FOUR)] {
                        let mut next = grid.clone();
                        // 枚举出的都是空格，插入必定成功
                        let _ = next.insert_tile(cell, value);
                        let score =
                            self.expectiminimax(&next, depth - 1, Ply::Max, deadline)?;
                        expected += prob * cell_prob * score;
                    }
                }
                Ok(expected)
            }
        }
    }

    /// 上一次决策访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}
