//! 网关连接与脚本化规则服务的端到端测试
//!
//! 服务端脚本运行在独立线程的 tokio Runtime 上，
//! 客户端一侧只使用 GatewayConnection 的同步接口，
//! 和 Bevy 系统的调用方式一致。

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use board_client::network::{GatewayConnection, GatewayEvent};
use protocol::{
    Board, BoardSnapshot, ClientMessage, Connection, Listener, Move, PieceColor, ServerMessage,
    Square, TcpListener,
};

fn sq(name: &str) -> Square {
    Square::parse(name).unwrap()
}

/// e2e4 之后的局面
fn board_after_e2e4() -> BoardSnapshot {
    let mut board = Board::initial();
    let pawn = board.get(sq("e2"));
    board.set(sq("e2"), None);
    board.set(sq("e4"), pawn);
    BoardSnapshot::from_board(board, PieceColor::Black)
}

/// 启动脚本化规则服务，处理 `quota` 条非心跳请求后断开
fn spawn_scripted_authority(quota: usize) -> (String, thread::JoinHandle<()>) {
    let (addr_tx, addr_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("test runtime");
        rt.block_on(async move {
            let mut listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            addr_tx.send(listener.local_addr().unwrap()).unwrap();
            let mut conn = listener.accept().await.unwrap();

            let mut handled = 0;
            while handled < quota {
                let msg: ClientMessage = match conn.recv().await {
                    Ok(msg) => msg,
                    Err(_) => return,
                };
                match msg {
                    ClientMessage::Ping => {
                        conn.send(&ServerMessage::Pong).await.unwrap();
                        continue;
                    }
                    ClientMessage::GetBoard => {
                        conn.send(&ServerMessage::BoardState {
                            snapshot: BoardSnapshot::initial(),
                        })
                        .await
                        .unwrap();
                    }
                    ClientMessage::GetLegalMoves { from } => {
                        let targets = if from == sq("e2") {
                            vec![sq("e3"), sq("e4")]
                        } else {
                            Vec::new()
                        };
                        conn.send(&ServerMessage::LegalMoves { from, targets })
                            .await
                            .unwrap();
                    }
                    ClientMessage::MakeMove { mv } => {
                        let reply = if mv == Move::new(sq("e2"), sq("e4")) {
                            ServerMessage::MoveAccepted {
                                snapshot: board_after_e2e4(),
                            }
                        } else {
                            ServerMessage::MoveRejected {
                                reason: "illegal move".to_string(),
                            }
                        };
                        conn.send(&reply).await.unwrap();
                    }
                    ClientMessage::ResetGame => {
                        conn.send(&ServerMessage::GameReset {
                            snapshot: BoardSnapshot::initial(),
                        })
                        .await
                        .unwrap();
                    }
                }
                handled += 1;
            }
            // 额度用尽即断开，模拟服务端消失
        });
    });

    (addr_rx.recv().unwrap(), handle)
}

/// 轮询网关事件直到谓词命中或超时
fn wait_for_event<F>(conn: &GatewayConnection, mut pred: F) -> GatewayEvent
where
    F: FnMut(&GatewayEvent) -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        for event in conn.drain_events() {
            if pred(&event) {
                return event;
            }
        }
        assert!(Instant::now() < deadline, "timed out waiting for event");
        thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn fresh_load_fetches_initial_board() {
    let (addr, server) = spawn_scripted_authority(1);
    let conn = GatewayConnection::new();
    conn.connect(addr);

    wait_for_event(&conn, |e| matches!(e, GatewayEvent::Connected));

    conn.queue_send(ClientMessage::GetBoard);
    let event = wait_for_event(&conn, |e| matches!(e, GatewayEvent::Message(_)));
    assert_eq!(
        event,
        GatewayEvent::Message(ServerMessage::BoardState {
            snapshot: BoardSnapshot::initial()
        })
    );

    conn.disconnect();
    server.join().unwrap();
}

#[test]
fn legal_move_round_trip() {
    let (addr, server) = spawn_scripted_authority(2);
    let conn = GatewayConnection::new();
    conn.connect(addr);
    wait_for_event(&conn, |e| matches!(e, GatewayEvent::Connected));

    conn.queue_send(ClientMessage::GetLegalMoves { from: sq("e2") });
    let event = wait_for_event(&conn, |e| matches!(e, GatewayEvent::Message(_)));
    assert_eq!(
        event,
        GatewayEvent::Message(ServerMessage::LegalMoves {
            from: sq("e2"),
            targets: vec![sq("e3"), sq("e4")],
        })
    );

    conn.queue_send(ClientMessage::MakeMove {
        mv: Move::new(sq("e2"), sq("e4")),
    });
    let event = wait_for_event(&conn, |e| matches!(e, GatewayEvent::Message(_)));
    assert_eq!(
        event,
        GatewayEvent::Message(ServerMessage::MoveAccepted {
            snapshot: board_after_e2e4()
        })
    );

    conn.disconnect();
    server.join().unwrap();
}

#[test]
fn rejected_move_is_a_normal_response() {
    let (addr, server) = spawn_scripted_authority(1);
    let conn = GatewayConnection::new();
    conn.connect(addr);
    wait_for_event(&conn, |e| matches!(e, GatewayEvent::Connected));

    conn.queue_send(ClientMessage::MakeMove {
        mv: Move::new(sq("e2"), sq("e5")),
    });
    let event = wait_for_event(&conn, |e| matches!(e, GatewayEvent::Message(_)));
    assert_eq!(
        event,
        GatewayEvent::Message(ServerMessage::MoveRejected {
            reason: "illegal move".to_string()
        })
    );

    conn.disconnect();
    server.join().unwrap();
}

#[test]
fn reset_after_server_gone_surfaces_transport_failure() {
    // 服务端只处理一条请求就消失；随后的重置请求必须以
    // 传输失败事件结束，而不是悄悄丢掉。事件到达顺序不固定，
    // 这里收集全部事件直到看到失败为止。
    let (addr, server) = spawn_scripted_authority(1);
    let conn = GatewayConnection::new();
    conn.connect(addr);
    wait_for_event(&conn, |e| matches!(e, GatewayEvent::Connected));

    conn.queue_send(ClientMessage::GetBoard);

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut saw_board = false;
    let mut reset_queued = false;
    let mut failure = None;
    while failure.is_none() {
        for event in conn.drain_events() {
            match event {
                GatewayEvent::Message(ServerMessage::BoardState { .. }) => saw_board = true,
                GatewayEvent::TransportFailure(message) => failure = Some(message),
                _ => {}
            }
        }
        if saw_board && !reset_queued {
            conn.queue_send(ClientMessage::ResetGame);
            reset_queued = true;
        }
        assert!(
            Instant::now() < deadline,
            "timed out waiting for transport failure"
        );
        thread::sleep(Duration::from_millis(20));
    }
    server.join().unwrap();

    assert!(saw_board, "board fetch should succeed before the failure");
    assert!(failure.is_some());
    conn.disconnect();
}
