//! 网络通信模块
//!
//! 把控制器的网关操作转换为协议请求，并把服务端应答
//! 和传输失败送回控制器。应答按主循环处理顺序应用，
//! 过期判定由控制器完成。

mod connection;

pub use connection::*;

use bevy::prelude::*;
use std::sync::Arc;

use protocol::{ClientMessage, Move, ServerMessage, Square};

use crate::game::{ClientGame, GatewayCommand};
use crate::settings::GameSettings;
use crate::GameState;

/// 网络插件
pub struct NetworkPlugin;

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(NetworkState::default())
            .insert_resource(GatewayHandle::default())
            .add_message::<NetworkEvent>()
            .add_systems(Startup, connect_on_startup)
            .add_systems(Update, (handle_network_events, poll_gateway));
    }
}

/// 网关连接句柄（Bevy 资源）
#[derive(Resource, Default, Clone)]
pub struct GatewayHandle {
    /// 共享的网关连接
    pub connection: Arc<GatewayConnection>,
}

/// 连接状态
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// 网络状态
#[derive(Resource, Default)]
pub struct NetworkState {
    /// 连接状态
    pub status: ConnectionStatus,
    /// 规则服务地址
    pub server_addr: String,
}

/// 网络事件（客户端发起）
#[derive(Message, Clone, Debug)]
pub enum NetworkEvent {
    /// 连接规则服务
    Connect { addr: String },
    /// 获取当前局面
    FetchBoard,
    /// 获取合法目标格
    FetchLegalMoves { from: Square },
    /// 提交走法
    SubmitMove { mv: Move },
    /// 重置对局
    ResetGame,
}

impl From<GatewayCommand> for NetworkEvent {
    fn from(command: GatewayCommand) -> Self {
        match command {
            GatewayCommand::FetchBoard => NetworkEvent::FetchBoard,
            GatewayCommand::FetchLegalMoves { from } => NetworkEvent::FetchLegalMoves { from },
            GatewayCommand::SubmitMove { mv } => NetworkEvent::SubmitMove { mv },
            GatewayCommand::ResetGame => NetworkEvent::ResetGame,
        }
    }
}

/// 启动时按设置连接规则服务
fn connect_on_startup(settings: Res<GameSettings>, mut events: MessageWriter<NetworkEvent>) {
    events.write(NetworkEvent::Connect {
        addr: settings.server_addr.clone(),
    });
}

/// 处理网络事件
fn handle_network_events(
    mut events: MessageReader<NetworkEvent>,
    mut network: ResMut<NetworkState>,
    conn_handle: Res<GatewayHandle>,
) {
    for event in events.read() {
        match event {
            NetworkEvent::Connect { addr } => {
                network.server_addr = addr.clone();
                network.status = ConnectionStatus::Connecting;
                tracing::info!("Connecting to rules service at {}", addr);
                conn_handle.connection.connect(addr.clone());
            }
            NetworkEvent::FetchBoard => {
                conn_handle.connection.queue_send(ClientMessage::GetBoard);
            }
            NetworkEvent::FetchLegalMoves { from } => {
                conn_handle
                    .connection
                    .queue_send(ClientMessage::GetLegalMoves { from: *from });
                tracing::debug!("Requesting legal moves for {}", from);
            }
            NetworkEvent::SubmitMove { mv } => {
                conn_handle
                    .connection
                    .queue_send(ClientMessage::MakeMove { mv: *mv });
                tracing::info!("Submitting move {}", mv);
            }
            NetworkEvent::ResetGame => {
                conn_handle.connection.queue_send(ClientMessage::ResetGame);
                tracing::info!("Requesting game reset");
            }
        }
    }
}

/// 轮询网关事件并交给控制器
fn poll_gateway(
    conn_handle: Res<GatewayHandle>,
    mut game: ResMut<ClientGame>,
    mut network: ResMut<NetworkState>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    for event in conn_handle.connection.drain_events() {
        match event {
            GatewayEvent::Connected => {
                network.status = ConnectionStatus::Connected;
                // 开局加载：连接建立后立即获取权威局面
                conn_handle.connection.queue_send(ClientMessage::GetBoard);
            }
            GatewayEvent::Message(msg) => apply_server_message(msg, &mut game, &mut game_state),
            GatewayEvent::TransportFailure(message) => {
                tracing::warn!("Transport failure: {}", message);
                network.status = ConnectionStatus::Error;
                game.apply_transport_failure(message);
            }
        }
    }
}

/// 把服务端应答应用到控制器
fn apply_server_message(
    msg: ServerMessage,
    game: &mut ClientGame,
    game_state: &mut NextState<GameState>,
) {
    match msg {
        ServerMessage::BoardState { snapshot } => {
            game.apply_board(snapshot);
            game_state.set(GameState::Playing);
        }
        ServerMessage::LegalMoves { from, targets } => {
            game.apply_legal_moves(from, targets);
        }
        ServerMessage::MoveAccepted { snapshot } => {
            game.apply_move_accepted(snapshot);
        }
        ServerMessage::MoveRejected { reason } => {
            tracing::info!("Move rejected: {}", reason);
            game.apply_move_rejected(reason);
        }
        ServerMessage::GameReset { snapshot } => {
            game.apply_reset(snapshot);
        }
        ServerMessage::Pong => {}
        ServerMessage::Error { code, message } => {
            tracing::error!("Rules service error {:?}: {}", code, message);
            game.apply_authority_error(message);
        }
    }
}
