//! 自动对局驱动程序
//!
//! 用法: game-cli [局数] [--record <目录>] [--time-limit <毫秒>]
//!
//! 每回合调用一次 AI 引擎选择移动，然后由环境随机落块，
//! 直到没有合法移动为止。可选地把每局保存为 JSON 记录。

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_ai::{AiConfig, AiEngine, DEFAULT_TIME_LIMIT_MS};
use grid::{GameMetadata, GameRecord, Grid, TileSpawner, INITIAL_TILES, WIN_TILE};

/// 命令行参数
struct Args {
    games: usize,
    record_dir: Option<PathBuf>,
    time_limit_ms: u64,
}

fn parse_args() -> Result<Args> {
    let mut games = 1usize;
    let mut record_dir = None;
    let mut time_limit_ms = DEFAULT_TIME_LIMIT_MS;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--record" => {
                let dir = args.next().context("--record requires a directory")?;
                record_dir = Some(PathBuf::from(dir));
            }
            "--time-limit" => {
                let ms = args.next().context("--time-limit requires a value")?;
                time_limit_ms = ms
                    .parse()
                    .with_context(|| format!("invalid time limit: {}", ms))?;
            }
            other => {
                games = other
                    .parse()
                    .with_context(|| format!("invalid game count: {}", other))?;
            }
        }
    }

    Ok(Args {
        games,
        record_dir,
        time_limit_ms,
    })
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("game_cli=info".parse()?)
                .add_directive("game_ai=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    if let Some(dir) = &args.record_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create record dir {}", dir.display()))?;
    }

    let mut engine = AiEngine::new(AiConfig {
        time_limit_ms: args.time_limit_ms,
    });
    let mut spawner = TileSpawner::new();

    info!(
        games = args.games,
        time_limit_ms = args.time_limit_ms,
        "自动对局开始"
    );

    for game_no in 1..=args.games {
        play_game(&mut engine, &mut spawner, &args, game_no)?;
    }

    Ok(())
}

/// 完整地打一局
fn play_game(
    engine: &mut AiEngine,
    spawner: &mut TileSpawner,
    args: &Args,
    game_no: usize,
) -> Result<()> {
    let mut grid = Grid::empty();
    for _ in 0..INITIAL_TILES {
        spawner.spawn(&mut grid);
    }

    let mut record = GameRecord::new(GameMetadata::new(
        "game-cli",
        Some(engine.config().time_limit_ms),
    ));
    let mut score = 0u32;
    let mut turns = 0u32;

    while let Some(direction) = engine.choose_move(&grid) {
        let points = grid.apply_move(direction).unwrap_or(0);
        score += points;
        let spawned = spawner.spawn(&mut grid);
        record.push_move(direction, points, spawned);

        turns += 1;
        if turns % 100 == 0 {
            info!(
                game_no,
                turns,
                score,
                max_tile = grid.max_tile(),
                "对局进行中"
            );
        }
    }

    record.finish(&grid, score);
    info!(
        game_no,
        turns,
        score,
        max_tile = grid.max_tile(),
        won = grid.max_tile() >= WIN_TILE,
        "对局结束"
    );
    println!("{}", grid);

    if let Some(dir) = &args.record_dir {
        let path = dir.join(format!("game-{}.json", game_no));
        record.save(&path)?;
        info!(path = %path.display(), "记录已保存");
    }

    Ok(())
}
