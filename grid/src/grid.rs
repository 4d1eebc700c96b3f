//! 棋盘状态和滑动合并规则

use serde::{Deserialize, Serialize};

use crate::constants::GRID_SIZE;
use crate::error::GridError;
use crate::moves::Direction;

/// 棋盘格子坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// 列 (0-3)
    pub x: u8,
    /// 行 (0-3)
    pub y: u8,
}

impl Cell {
    /// 创建新坐标
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if (x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// 创建新坐标（不检查边界，内部使用）
    pub const fn new_unchecked(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 检查坐标是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.x as usize) < GRID_SIZE && (self.y as usize) < GRID_SIZE
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.y as usize * GRID_SIZE + self.x as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < GRID_SIZE * GRID_SIZE {
            Some(Self {
                x: (index % GRID_SIZE) as u8,
                y: (index / GRID_SIZE) as u8,
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 棋盘
///
/// 4x4 矩阵，0 表示空格，其余都是 >= 2 的 2 的幂。
/// 块值用 u32 存储，足够容纳远超实际对局能达到的 2^20。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// 按 [行][列] 索引
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// 从矩阵创建棋盘（测试和记录回放用）
    pub fn from_cells(cells: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// 获取指定格子的块值（0 表示空）
    pub fn get(&self, cell: Cell) -> u32 {
        if cell.is_valid() {
            self.cells[cell.y as usize][cell.x as usize]
        } else {
            0
        }
    }

    /// 设置指定格子的块值
    pub fn set(&mut self, cell: Cell, value: u32) {
        if cell.is_valid() {
            self.cells[cell.y as usize][cell.x as usize] = value;
        }
    }

    /// 获取底层矩阵（评估函数按行列扫描用）
    pub fn cells(&self) -> &[[u32; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// 在指定空格插入一个数字块
    pub fn insert_tile(&mut self, cell: Cell, value: u32) -> crate::Result<()> {
        if !cell.is_valid() {
            return Err(GridError::InvalidCell {
                x: cell.x,
                y: cell.y,
            });
        }
        if value < 2 || !value.is_power_of_two() {
            return Err(GridError::InvalidTile { value });
        }
        if self.get(cell) != 0 {
            return Err(GridError::CellOccupied {
                x: cell.x,
                y: cell.y,
            });
        }
        self.set(cell, value);
        Ok(())
    }

    /// 向指定方向滑动合并
    ///
    /// 棋盘没有变化时返回 None（该方向不是合法移动），
    /// 否则返回本次合并获得的分数（可能为 0）。
    /// 每个块在一次移动中至多参与一次合并，靠近目标边缘的先合并。
    pub fn apply_move(&mut self, direction: Direction) -> Option<u32> {
        let mut changed = false;
        let mut points = 0;

        match direction {
            Direction::Left | Direction::Right => {
                for y in 0..GRID_SIZE {
                    let mut line = self.cells[y];
                    if direction == Direction::Right {
                        line.reverse();
                    }
                    let (mut slid, gained) = slide_line(line);
                    if direction == Direction::Right {
                        slid.reverse();
                    }
                    if slid != self.cells[y] {
                        changed = true;
                    }
                    points += gained;
                    self.cells[y] = slid;
                }
            }
            Direction::Up | Direction::Down => {
                for x in 0..GRID_SIZE {
                    let mut line = [0u32; GRID_SIZE];
                    for y in 0..GRID_SIZE {
                        line[y] = self.cells[y][x];
                    }
                    if direction == Direction::Down {
                        line.reverse();
                    }
                    let (mut slid, gained) = slide_line(line);
                    if direction == Direction::Down {
                        slid.reverse();
                    }
                    for y in 0..GRID_SIZE {
                        if self.cells[y][x] != slid[y] {
                            changed = true;
                        }
                        self.cells[y][x] = slid[y];
                    }
                    points += gained;
                }
            }
        }

        if changed {
            Some(points)
        } else {
            None
        }
    }

    /// 枚举当前所有合法移动（按 Direction::ALL 顺序）
    pub fn available_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&direction| {
                let mut probe = self.clone();
                probe.apply_move(direction).is_some()
            })
            .collect()
    }

    /// 枚举当前所有空格（按行优先顺序）
    pub fn available_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                if self.cells[y][x] == 0 {
                    cells.push(Cell::new_unchecked(x as u8, y as u8));
                }
            }
        }
        cells
    }

    /// 棋盘上最大的块值
    pub fn max_tile(&self) -> u32 {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(|&v| v != 0))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for &value in row {
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// 把一行向索引 0 方向滑动合并
///
/// 返回滑动后的行和合并得分。相邻相等的块合并一次，
/// 合并产物不再参与本次移动的合并。
fn slide_line(line: [u32; GRID_SIZE]) -> ([u32; GRID_SIZE], u32) {
    // 先压缩掉空格
    let mut compact = [0u32; GRID_SIZE];
    let mut len = 0;
    for &value in line.iter() {
        if value != 0 {
            compact[len] = value;
            len += 1;
        }
    }

    // 再从近端开始合并
    let mut result = [0u32; GRID_SIZE];
    let mut points = 0;
    let mut write = 0;
    let mut read = 0;
    while read < len {
        if read + 1 < len && compact[read] == compact[read + 1] {
            let merged = compact[read] * 2;
            result[write] = merged;
            points += merged;
            read += 2;
        } else {
            result[write] = compact[read];
            read += 1;
        }
        write += 1;
    }

    (result, points)
}
