//! 对局交互模块
//!
//! 输入事件经控制器状态机转换为网关请求

mod input;
mod selection;
mod state;

pub use input::*;
pub use selection::{decide, Decision};
pub use state::*;
// Explicit re-export to disambiguate from bevy's prelude `Interaction`
// (both arrive via glob imports below).
pub use state::Interaction;

use bevy::prelude::*;
use protocol::Square;

use crate::network::NetworkEvent;
use crate::GameState;

/// 对局插件
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClientGame::default())
            .insert_resource(DragState::default())
            .add_message::<GameEvent>()
            .add_systems(
                Update,
                (handle_mouse_input, handle_game_events)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// 逻辑输入事件
#[derive(Message, Clone, Debug)]
pub enum GameEvent {
    /// 点击格子（按下并在原格抬起）
    ClickSquare { square: Square },
    /// 选中格子上的棋子（按下即生效，拖拽开始也走这里）
    SelectSquare { square: Square },
    /// 拖放落子
    DragDrop { from: Square, to: Square },
    /// 重置对局
    ResetGame,
}

/// 处理逻辑输入事件
///
/// 控制器返回的网关操作在这里转换为网络事件
fn handle_game_events(
    mut events: MessageReader<GameEvent>,
    mut game: ResMut<ClientGame>,
    mut network_events: MessageWriter<NetworkEvent>,
) {
    for event in events.read() {
        let command = match event {
            GameEvent::ClickSquare { square } => game.handle_click(*square),
            GameEvent::SelectSquare { square } => game.select(*square),
            GameEvent::DragDrop { from, to } => game.drop_on(*from, *to),
            GameEvent::ResetGame => Some(game.request_reset()),
        };

        if let Some(command) = command {
            network_events.write(NetworkEvent::from(command));
        }
    }
}
