//! 错误类型定义

use thiserror::Error;

/// 棋盘坐标/记法错误
///
/// 这类错误属于本地输入契约违规：只要调用方统一经过记法编解码，
/// 就不应出现在用户面前。测试中必须显式失败，不允许静默纠偏。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// 行列越界
    #[error("Coordinates out of range: row {row}, col {col}")]
    OutOfRange { row: i32, col: i32 },

    /// 无效的代数记法（必须是 a-h 的列字母加 1-8 的行数字）
    #[error("Invalid square notation: {input:?}")]
    InvalidNotation { input: String },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },
}

/// 协议/传输错误
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误（bincode）
    #[error("Frame encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    /// 协议版本不匹配
    #[error("Protocol version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u8, actual: u8 },

    /// 帧大小超限
    #[error("Frame too large: {size} bytes (max: {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// 建立连接超时
    #[error("Connect timeout")]
    ConnectTimeout,

    /// 请求应答超时
    #[error("Request timed out waiting for a reply")]
    RequestTimeout,

    /// 连接已关闭
    #[error("Connection closed")]
    ConnectionClosed,

    /// 棋盘坐标错误
    #[error("Board error: {0}")]
    Board(#[from] BoardError),
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
