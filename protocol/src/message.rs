//! 消息类型定义
//!
//! 规则服务边界的语言无关契约：客户端发出请求，
//! 服务端以携带完整局面快照的应答回复。

use serde::{Deserialize, Serialize};

use crate::board::BoardSnapshot;
use crate::moves::Move;
use crate::piece::Square;

/// 客户端发送给规则服务的消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientMessage {
    // === 局面查询 ===
    /// 获取当前局面
    GetBoard,
    /// 获取指定格子棋子的合法目标格
    GetLegalMoves { from: Square },

    // === 对局操作 ===
    /// 提交走法
    ///
    /// 超时后绝不静默重发：同一走法生效两次的局面是不同的。
    MakeMove { mv: Move },
    /// 重置对局
    ResetGame,

    // === 心跳 ===
    /// 心跳请求
    Ping,
}

/// 规则服务发送给客户端的消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// 当前局面
    BoardState { snapshot: BoardSnapshot },

    /// 合法目标格
    ///
    /// from 用于客户端的过期应答判定；targets 为空是有效应答
    /// （该棋子无路可走），不是错误。
    LegalMoves { from: Square, targets: Vec<Square> },

    /// 走法被接受，携带权威的新局面
    MoveAccepted { snapshot: BoardSnapshot },

    /// 走法被拒绝（格式良好的拒绝是成功应答，不是传输失败）
    MoveRejected { reason: String },

    /// 对局已重置，携带初始局面
    GameReset { snapshot: BoardSnapshot },

    /// 心跳响应
    Pong,

    /// 服务端错误
    Error { code: ErrorCode, message: String },
}

/// 错误码定义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum ErrorCode {
    // === 请求相关 (1xx) ===
    /// 无效格子
    InvalidSquare = 100,
    /// 格子上没有棋子
    EmptySquare = 101,

    // === 对局相关 (2xx) ===
    /// 不是该方走子
    NotYourTurn = 200,
    /// 对局已结束
    GameOver = 201,

    // === 系统相关 (5xx) ===
    /// 内部错误
    InternalError = 500,
    /// 超时
    Timeout = 501,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
