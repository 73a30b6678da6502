//! 规则服务连接管理
//!
//! 使用全局静态 tokio Runtime 处理异步网络 IO。
//! Bevy 侧只做同步的入队/出队，后台泵任务负责真正的收发；
//! 失败（连接断开、应答超时）以事件的形式交还给主循环。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use lazy_static::lazy_static;
use tokio::runtime::Runtime;

use protocol::{
    ClientMessage, Connection, Connector, ServerMessage, TcpConnector, HEARTBEAT_INTERVAL,
    REQUEST_TIMEOUT,
};

lazy_static! {
    /// 全局 tokio Runtime，网络 IO 与 Bevy 主循环隔离
    static ref RUNTIME: Runtime =
        Runtime::new().expect("failed to create network runtime");
}

/// 接收轮询间隔
const RECV_POLL: Duration = Duration::from_millis(10);

/// 网关事件（后台泵任务 -> 主循环）
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    /// 连接建立成功
    Connected,
    /// 收到服务端消息
    Message(ServerMessage),
    /// 传输失败（连接失败、断开或应答超时）
    TransportFailure(String),
}

/// 规则服务连接包装器
///
/// 同步接口供 Bevy 系统调用；同一时刻至多一条活动连接。
#[derive(Default)]
pub struct GatewayConnection {
    /// 发送队列
    send_queue: Arc<StdMutex<Vec<ClientMessage>>>,
    /// 事件队列（接收方向）
    events: Arc<StdMutex<Vec<GatewayEvent>>>,
    /// 关闭标记，置位后泵任务退出
    closed: Arc<AtomicBool>,
}

impl GatewayConnection {
    /// 创建新的连接管理器
    pub fn new() -> Self {
        Self::default()
    }

    /// 发起连接（立即返回，结果以事件形式送达）
    pub fn connect(&self, addr: String) {
        self.closed.store(false, Ordering::SeqCst);

        let send_queue = Arc::clone(&self.send_queue);
        let events = Arc::clone(&self.events);
        let closed = Arc::clone(&self.closed);

        RUNTIME.spawn(async move {
            match TcpConnector.connect(&addr).await {
                Ok(conn) => {
                    tracing::info!("Connected to rules service: {}", addr);
                    push_event(&events, GatewayEvent::Connected);
                    pump(conn, send_queue, events, closed).await;
                }
                Err(e) => {
                    tracing::warn!("Connect to {} failed: {}", addr, e);
                    push_event(
                        &events,
                        GatewayEvent::TransportFailure(format!("无法连接规则服务: {e}")),
                    );
                }
            }
        });
    }

    /// 断开连接
    pub fn disconnect(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// 发送请求（加入发送队列，同步调用）
    pub fn queue_send(&self, msg: ClientMessage) {
        if let Ok(mut queue) = self.send_queue.lock() {
            queue.push(msg);
        }
    }

    /// 取出积累的网关事件（同步调用）
    pub fn drain_events(&self) -> Vec<GatewayEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}

fn push_event(events: &Arc<StdMutex<Vec<GatewayEvent>>>, event: GatewayEvent) {
    if let Ok(mut queue) = events.lock() {
        queue.push(event);
    }
}

/// 后台收发泵
///
/// 请求计时是单槽的：控制器保证同类请求至多一个在途，
/// 收到任何非 Pong 应答即认为最早的请求已被回答。
async fn pump(
    mut conn: protocol::TcpConnection,
    send_queue: Arc<StdMutex<Vec<ClientMessage>>>,
    events: Arc<StdMutex<Vec<GatewayEvent>>>,
    closed: Arc<AtomicBool>,
) {
    let mut awaiting_reply: Option<Instant> = None;
    let mut last_ping = Instant::now();

    loop {
        if closed.load(Ordering::SeqCst) {
            let _ = conn.close().await;
            return;
        }

        // 发送队列中的请求
        let outgoing: Vec<ClientMessage> = match send_queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        };
        for msg in outgoing {
            let expects_reply = !matches!(msg, ClientMessage::Ping);
            if let Err(e) = conn.send(&msg).await {
                tracing::warn!("Send failed: {}", e);
                push_event(
                    &events,
                    GatewayEvent::TransportFailure("发送请求失败，连接已断开".to_string()),
                );
                return;
            }
            if expects_reply && awaiting_reply.is_none() {
                awaiting_reply = Some(Instant::now());
            }
        }

        // 心跳
        if last_ping.elapsed() >= HEARTBEAT_INTERVAL {
            last_ping = Instant::now();
            if conn.send(&ClientMessage::Ping).await.is_err() {
                push_event(
                    &events,
                    GatewayEvent::TransportFailure("心跳发送失败，连接已断开".to_string()),
                );
                return;
            }
        }

        // 接收（短超时轮询，保持对发送队列的响应）
        match tokio::time::timeout(RECV_POLL, conn.recv::<ServerMessage>()).await {
            Ok(Ok(msg)) => {
                if !matches!(msg, ServerMessage::Pong) {
                    awaiting_reply = None;
                }
                push_event(&events, GatewayEvent::Message(msg));
            }
            Ok(Err(e)) => {
                tracing::warn!("Receive failed: {}", e);
                push_event(
                    &events,
                    GatewayEvent::TransportFailure("接收应答失败，连接已断开".to_string()),
                );
                return;
            }
            Err(_) => {
                // 超时，没有消息（正常情况）
            }
        }

        // 应答超时：保证有界时间内给出失败信号
        if let Some(started) = awaiting_reply {
            if started.elapsed() >= REQUEST_TIMEOUT {
                awaiting_reply = None;
                push_event(
                    &events,
                    GatewayEvent::TransportFailure("请求超时，未收到规则服务应答".to_string()),
                );
            }
        }
    }
}
