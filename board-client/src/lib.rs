//! 国际象棋棋盘客户端
//!
//! 使用 Bevy 引擎实现的交互棋盘：选子、高亮合法目标、提交走法。
//! 合法性裁定完全交给外部规则服务，本客户端不实现象棋规则。

pub mod board;
pub mod game;
pub mod network;
pub mod settings;
pub mod theme;
pub mod ui;

use bevy::prelude::*;

/// 客户端状态
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum GameState {
    /// 连接规则服务
    #[default]
    Connecting,
    /// 对局中
    Playing,
}

/// 客户端插件
pub struct BoardClientPlugin;

impl Plugin for BoardClientPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(Startup, setup_camera)
            .add_plugins((
                settings::SettingsPlugin,
                theme::ThemePlugin,
                board::BoardPlugin,
                game::GamePlugin,
                ui::UiPlugin,
                network::NetworkPlugin,
            ));
    }
}

/// 创建 2D 相机
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
