//! 2048 共享游戏库
//!
//! 包含:
//! - 方格、方向等核心数据结构
//! - 滑动合并规则和合法移动枚举
//! - 随机落块（90% 出 2，10% 出 4）
//! - 对局记录格式 (JSON)

mod constants;
mod error;
mod grid;
mod moves;
mod record;
mod spawn;

pub use constants::*;
pub use error::{GridError, RecordError, Result};
pub use grid::{Cell, Grid};
pub use moves::Direction;
pub use record::{GameMetadata, GameRecord, MoveRecord, SpawnRecord, RECORD_VERSION};
pub use spawn::TileSpawner;
