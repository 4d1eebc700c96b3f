//! 错误类型定义

use thiserror::Error;

/// 游戏规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// 坐标越界
    #[error("Invalid cell: ({x}, {y})")]
    InvalidCell { x: u8, y: u8 },

    /// 目标格子已有数字块
    #[error("Cell ({x}, {y}) is already occupied")]
    CellOccupied { x: u8, y: u8 },

    /// 非法的块值（必须是 >= 2 的 2 的幂）
    #[error("Invalid tile value: {value}")]
    InvalidTile { value: u32 },
}

/// 对局记录错误类型
#[derive(Error, Debug)]
pub enum RecordError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 记录版本不支持
    #[error("Unsupported record version: {0}")]
    UnsupportedVersion(String),
}

/// 游戏操作结果类型
pub type Result<T> = std::result::Result<T, GridError>;
