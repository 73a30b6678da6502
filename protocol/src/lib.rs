//! 国际象棋棋盘客户端共享协议库
//!
//! 包含:
//! - 棋子、棋盘快照、格子等核心数据结构
//! - 网格坐标与代数记法的编解码
//! - 规则服务消息类型 (ClientMessage, ServerMessage)
//! - 传输层抽象 (Connector, Connection, Listener traits) 与帧编解码
//! - FEN 格式
//!
//! 本库不包含任何象棋规则：合法性由外部规则服务裁定。

mod board;
mod constants;
mod error;
mod fen;
mod message;
mod moves;
mod notation;
mod piece;
mod transport;

pub use board::{Board, BoardSnapshot};
pub use constants::*;
pub use error::{BoardError, ProtocolError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use message::{ClientMessage, ErrorCode, ServerMessage};
pub use moves::{Move, DEFAULT_PROMOTION};
pub use notation::GridCodec;
pub use piece::{Piece, PieceColor, PieceKind, Square};
pub use transport::{
    Connection, Connector, FrameReader, FrameWriter, Listener, TcpConnection, TcpConnector,
    TcpListener,
};
