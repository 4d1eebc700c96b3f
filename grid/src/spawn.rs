//! 随机落块
//!
//! 环境每回合在随机空格落一个新块：90% 是 2，10% 是 4。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::constants::{PROB_TWO, TILE_FOUR, TILE_TWO};
use crate::grid::{Cell, Grid};

/// 落块器
pub struct TileSpawner {
    rng: StdRng,
}

impl TileSpawner {
    /// 创建新的落块器（系统熵播种）
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 用固定种子创建（测试用，结果可复现）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 在随机空格落一个新块
    ///
    /// 棋盘已满时返回 None，否则返回落块的位置和值。
    pub fn spawn(&mut self, grid: &mut Grid) -> Option<(Cell, u32)> {
        let cells = grid.available_cells();
        let cell = *cells.choose(&mut self.rng)?;
        let value = if self.rng.gen::<f64>() < PROB_TWO {
            TILE_TWO
        } else {
            TILE_FOUR
        };
        // 刚枚举出的空格，插入必定成功
        grid.insert_tile(cell, value).ok()?;
        Some((cell, value))
    }
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_fills_empty_cell() {
        let mut spawner = TileSpawner::with_seed(42);
        let mut grid = Grid::empty();

        let (cell, value) = spawner.spawn(&mut grid).unwrap();
        assert!(value == TILE_TWO || value == TILE_FOUR);
        assert_eq!(grid.get(cell), value);
        assert_eq!(grid.available_cells().len(), 15);
    }

    #[test]
    fn test_spawn_until_full() {
        let mut spawner = TileSpawner::with_seed(7);
        let mut grid = Grid::empty();

        for _ in 0..16 {
            assert!(spawner.spawn(&mut grid).is_some());
        }
        assert!(grid.is_full());
        // 棋盘满了以后不能再落块
        assert!(spawner.spawn(&mut grid).is_none());
    }

    #[test]
    fn test_spawn_deterministic_with_seed() {
        let mut a = TileSpawner::with_seed(123);
        let mut b = TileSpawner::with_seed(123);
        let mut grid_a = Grid::empty();
        let mut grid_b = Grid::empty();

        for _ in 0..8 {
            assert_eq!(a.spawn(&mut grid_a), b.spawn(&mut grid_b));
        }
        assert_eq!(grid_a, grid_b);
    }
}
