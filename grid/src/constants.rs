//! 游戏常量定义

/// 棋盘边长（4x4）
pub const GRID_SIZE: usize = 4;

/// 新块的小值
pub const TILE_TWO: u32 = 2;

/// 新块的大值
pub const TILE_FOUR: u32 = 4;

/// 落出 2 的概率
pub const PROB_TWO: f64 = 0.9;

/// 落出 4 的概率
pub const PROB_FOUR: f64 = 0.1;

/// 开局随机落块数
pub const INITIAL_TILES: usize = 2;

/// 胜利目标块
pub const WIN_TILE: u32 = 2048;
