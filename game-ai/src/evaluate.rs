//! 局面评估函数
//!
//! 四个独立的启发式按固定权重加权求和，在搜索到达深度上限的叶子节点使用。

use grid::{Grid, GRID_SIZE};

/// 空格数权重
pub const WEIGHT_EMPTY: i64 = 100;

/// 蛇形权重项的权重
pub const WEIGHT_SNAKE: i64 = 1;

/// 单调性权重
pub const WEIGHT_MONOTONICITY: i64 = 10;

/// 平滑度权重
pub const WEIGHT_SMOOTHNESS: i64 = 5;

/// 蛇形权重表
///
/// 沿着从左上角出发的蛇形路径指数递减，
/// 奖励把大块沿这条路径排列的局面。
mod snake_table {
    /// 索引为 [行][列]
    pub const SNAKE: [[i64; 4]; 4] = [
        [1 << 15, 1 << 14, 1 << 13, 1 << 12],
        [1 << 8, 1 << 9, 1 << 10, 1 << 11],
        [1 << 7, 1 << 6, 1 << 5, 1 << 4],
        [1 << 0, 1 << 1, 1 << 2, 1 << 3],
    ];
}

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估局面（纯函数，不修改棋盘，不检查时间）
    pub fn evaluate(grid: &Grid) -> f64 {
        let score = WEIGHT_EMPTY * Self::empty_cells(grid)
            + WEIGHT_SNAKE * Self::snake_score(grid)
            + WEIGHT_MONOTONICITY * Self::monotonicity(grid)
            + WEIGHT_SMOOTHNESS * Self::smoothness(grid);
        score as f64
    }

    /// 空格数量
    pub fn empty_cells(grid: &Grid) -> i64 {
        grid.available_cells().len() as i64
    }

    /// 蛇形得分：块值与蛇形权重表的点积
    pub fn snake_score(grid: &Grid) -> i64 {
        let cells = grid.cells();
        let mut score = 0;
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                score += cells[y][x] as i64 * snake_table::SNAKE[y][x];
            }
        }
        score
    }

    /// 单调性得分
    ///
    /// 每行每列分别统计沿一个方向的总增量和总减量，取二者较大者，
    /// 所以一条线只要在某个方向上单调就能得分。
    /// 相邻对中有空格的跳过，不视为打断。
    pub fn monotonicity(grid: &Grid) -> i64 {
        let cells = grid.cells();
        let mut score = 0;

        // 行
        for y in 0..GRID_SIZE {
            let mut increasing = 0i64;
            let mut decreasing = 0i64;
            for x in 1..GRID_SIZE {
                let prev = cells[y][x - 1] as i64;
                let cur = cells[y][x] as i64;
                if prev == 0 || cur == 0 {
                    continue;
                }
                if cur >= prev {
                    increasing += cur - prev;
                }
                if cur <= prev {
                    decreasing += prev - cur;
                }
            }
            score += increasing.max(decreasing);
        }

        // 列
        for x in 0..GRID_SIZE {
            let mut increasing = 0i64;
            let mut decreasing = 0i64;
            for y in 1..GRID_SIZE {
                let prev = cells[y - 1][x] as i64;
                let cur = cells[y][x] as i64;
                if prev == 0 || cur == 0 {
                    continue;
                }
                if cur >= prev {
                    increasing += cur - prev;
                }
                if cur <= prev {
                    decreasing += prev - cur;
                }
            }
            score += increasing.max(decreasing);
        }

        score
    }

    /// 平滑度得分
    ///
    /// 所有相邻非空块对的值差绝对值之和取负，
    /// 0 是最好的（完全平滑），差距越大惩罚越重。
    pub fn smoothness(grid: &Grid) -> i64 {
        let cells = grid.cells();
        let mut score = 0i64;
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let value = cells[y][x] as i64;
                if value == 0 {
                    continue;
                }
                // 右邻居
                if x + 1 < GRID_SIZE && cells[y][x + 1] != 0 {
                    score -= (value - cells[y][x + 1] as i64).abs();
                }
                // 下邻居
                if y + 1 < GRID_SIZE && cells[y + 1][x] != 0 {
                    score -= (value - cells[y + 1][x] as i64).abs();
                }
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid::Cell;

    /// 矩阵转置（行列对称性测试用）
    fn transpose(cells: [[u32; 4]; 4]) -> [[u32; 4]; 4] {
        let mut result = [[0u32; 4]; 4];
        for y in 0..4 {
            for x in 0..4 {
                result[x][y] = cells[y][x];
            }
        }
        result
    }

    #[test]
    fn test_empty_grid_score() {
        let grid = Grid::empty();
        assert_eq!(Evaluator::empty_cells(&grid), 16);
        assert_eq!(Evaluator::snake_score(&grid), 0);
        assert_eq!(Evaluator::monotonicity(&grid), 0);
        assert_eq!(Evaluator::smoothness(&grid), 0);
        assert_eq!(Evaluator::evaluate(&grid), 1600.0);
    }

    #[test]
    fn test_evaluate_pure_and_deterministic() {
        let grid = Grid::from_cells([
            [16, 8, 4, 2],
            [2, 4, 0, 0],
            [0, 2, 0, 0],
            [0, 0, 0, 2],
        ]);
        let snapshot = grid.clone();

        let first = Evaluator::evaluate(&grid);
        let second = Evaluator::evaluate(&grid);
        assert_eq!(first, second);
        // 评估不修改输入
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_snake_prefers_corner() {
        // 同一个块放在蛇形路径起点比放在终点附近得分高
        let mut corner = Grid::empty();
        corner.set(Cell::new_unchecked(0, 0), 2);
        let mut far = Grid::empty();
        far.set(Cell::new_unchecked(3, 0), 2);

        assert_eq!(Evaluator::snake_score(&corner), 2 << 15);
        assert!(Evaluator::snake_score(&corner) > Evaluator::snake_score(&far));
    }

    #[test]
    fn test_monotonicity_sorted_row() {
        let grid = Grid::from_cells([
            [2, 4, 8, 16],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        // 递增总量 = 16 - 2 = 14，列里没有相邻非空对
        assert_eq!(Evaluator::monotonicity(&grid), 14);
    }

    #[test]
    fn test_monotonicity_direction_agnostic() {
        // 递增和递减的行得分相同
        let ascending = Grid::from_cells([
            [2, 4, 8, 16],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let descending = Grid::from_cells([
            [16, 8, 4, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert_eq!(
            Evaluator::monotonicity(&ascending),
            Evaluator::monotonicity(&descending)
        );
    }

    #[test]
    fn test_monotonicity_transpose_symmetry() {
        // 行排序的棋盘和它的转置有相同的单调性得分
        let cells = [
            [2, 4, 8, 16],
            [2, 2, 4, 8],
            [0, 2, 2, 4],
            [0, 0, 2, 2],
        ];
        let grid = Grid::from_cells(cells);
        let transposed = Grid::from_cells(transpose(cells));
        assert_eq!(
            Evaluator::monotonicity(&grid),
            Evaluator::monotonicity(&transposed)
        );
    }

    #[test]
    fn test_monotonicity_skips_empty_pairs() {
        // 隔着空格的 16 和 2 不构成相邻对，不打断单调性
        let grid = Grid::from_cells([
            [2, 4, 0, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        // 只有 (2, 4) 一对：递增 2
        assert_eq!(Evaluator::monotonicity(&grid), 2);
    }

    #[test]
    fn test_smoothness_uniform_is_zero() {
        let grid = Grid::from_cells([
            [2, 2, 2, 2],
            [2, 2, 2, 2],
            [2, 2, 2, 2],
            [2, 2, 2, 2],
        ]);
        assert_eq!(Evaluator::smoothness(&grid), 0);
    }

    #[test]
    fn test_smoothness_penalizes_jumps() {
        let mut grid = Grid::empty();
        grid.set(Cell::new_unchecked(0, 0), 2);
        grid.set(Cell::new_unchecked(1, 0), 128);
        // 一对水平邻居，差 126
        assert_eq!(Evaluator::smoothness(&grid), -126);
    }

    #[test]
    fn test_weighted_sum() {
        let mut grid = Grid::empty();
        grid.set(Cell::new_unchecked(0, 0), 4);
        // 15 个空格 + 蛇形 4 * 2^15，其余两项为 0
        let expected = (WEIGHT_EMPTY * 15 + WEIGHT_SNAKE * (4 << 15)) as f64;
        assert_eq!(Evaluator::evaluate(&grid), expected);
    }
}
