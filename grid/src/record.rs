//! 对局记录格式
//!
//! 支持 JSON 格式的对局存储，便于回放和离线分析

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::grid::{Cell, Grid};
use crate::moves::Direction;

/// 记录版本
pub const RECORD_VERSION: &str = "1.0";

/// 对局元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 玩家名（自动对局时是驱动程序名）
    pub player: String,
    /// 开局时间
    pub started_at: DateTime<Utc>,
    /// AI 每步时间预算（毫秒），人类对局时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_time_limit_ms: Option<u64>,
}

impl GameMetadata {
    /// 创建新的元数据（开局时间取当前时间）
    pub fn new(player: impl Into<String>, ai_time_limit_ms: Option<u64>) -> Self {
        Self {
            player: player.into(),
            started_at: Utc::now(),
            ai_time_limit_ms,
        }
    }
}

/// 落块记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRecord {
    /// 落块位置 [x, y]
    pub cell: [u8; 2],
    /// 落块的值（2 或 4）
    pub value: u32,
}

/// 单步记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 移动方向
    pub direction: Direction,
    /// 本步合并得分
    pub points: u32,
    /// 移动后环境落的新块（终局前最后一步可能没有）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawned: Option<SpawnRecord>,
}

/// 完整的对局记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 元数据
    pub metadata: GameMetadata,
    /// 按回合顺序的所有步
    pub moves: Vec<MoveRecord>,
    /// 终局总分
    pub final_score: u32,
    /// 终局最大块
    pub max_tile: u32,
    /// 终局棋盘
    pub final_grid: Grid,
}

impl GameRecord {
    /// 创建新的对局记录
    pub fn new(metadata: GameMetadata) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata,
            moves: Vec::new(),
            final_score: 0,
            max_tile: 0,
            final_grid: Grid::empty(),
        }
    }

    /// 追加一步
    pub fn push_move(&mut self, direction: Direction, points: u32, spawned: Option<(Cell, u32)>) {
        self.moves.push(MoveRecord {
            direction,
            points,
            spawned: spawned.map(|(cell, value)| SpawnRecord {
                cell: [cell.x, cell.y],
                value,
            }),
        });
    }

    /// 终局时填入最终状态
    pub fn finish(&mut self, grid: &Grid, score: u32) {
        self.final_score = score;
        self.max_tile = grid.max_tile();
        self.final_grid = grid.clone();
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 解析（版本不匹配时报错）
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let record: GameRecord = serde_json::from_str(json)?;
        if record.version != RECORD_VERSION {
            return Err(RecordError::UnsupportedVersion(record.version));
        }
        Ok(record)
    }

    /// 保存到文件
    pub fn save(&self, path: &std::path::Path) -> Result<(), RecordError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// 从文件加载
    pub fn load(path: &std::path::Path) -> Result<Self, RecordError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
