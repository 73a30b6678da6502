//! 协议常量定义

use std::time::Duration;

/// 协议版本号
pub const PROTOCOL_VERSION: u8 = 1;

/// 棋盘边长（8x8）
pub const BOARD_SIZE: usize = 8;

/// 消息帧最大大小
///
/// 最大的消息是携带完整局面的应答，远小于该上限
pub const MAX_FRAME_SIZE: usize = 32 * 1024;

/// 规则服务默认端口
pub const DEFAULT_PORT: u16 = 9372;

/// 建立连接超时（秒）
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// 请求应答超时（秒）- 超过此时间未收到任何应答视为传输失败
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// 心跳间隔（秒）
pub const HEARTBEAT_INTERVAL_SECS: u64 = 10;

/// 建立连接超时 Duration
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(CONNECT_TIMEOUT_SECS);

/// 请求应答超时 Duration
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(REQUEST_TIMEOUT_SECS);

/// 心跳间隔 Duration
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(HEARTBEAT_INTERVAL_SECS);
