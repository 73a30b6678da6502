use anyhow::Result;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use board_client::BoardClientPlugin;

fn main() -> Result<()> {
    // 初始化日志（禁用 Bevy 自带的 LogPlugin，统一走 tracing-subscriber）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("board_client=debug".parse()?)
                .add_directive("wgpu=error".parse()?),
        )
        .init();

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "国际象棋".into(),
                        resolution: (1280u32, 720u32).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(BoardClientPlugin)
        .run();

    Ok(())
}
