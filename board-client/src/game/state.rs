//! 走子交互控制器
//!
//! 把点击和拖放统一成 Idle -> Selected -> Pending 的状态机。
//! 局面快照由控制器独占持有，只在规则服务成功应答后整体替换；
//! 过期的异步应答按发起格/走法与当前状态比对后丢弃。

use bevy::prelude::*;
use protocol::{BoardSnapshot, Fen, Move, Piece, Square};

use super::selection::{self, Decision};

/// 交互状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Interaction {
    /// 空闲
    #[default]
    Idle,
    /// 已选中棋子
    ///
    /// targets 在合法目标应答到达前为空；targets_loaded 区分
    /// "应答未到"与"该棋子确实无路可走"。
    Selected {
        from: Square,
        targets: Vec<Square>,
        targets_loaded: bool,
    },
    /// 走法已提交，等待权威裁定；同一时刻至多一个在途走法
    Pending { mv: Move },
}

/// 控制器要求网关执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayCommand {
    /// 获取当前局面
    FetchBoard,
    /// 获取合法目标格
    FetchLegalMoves { from: Square },
    /// 提交走法
    SubmitMove { mv: Move },
    /// 重置对局
    ResetGame,
}

/// 客户端对局状态（交互控制器）
#[derive(Resource, Default)]
pub struct ClientGame {
    /// 当前局面快照
    pub snapshot: Option<BoardSnapshot>,
    /// 交互状态
    pub interaction: Interaction,
    /// 最近一次失败的用户可见消息，任何成功操作都会清除
    pub error: Option<String>,
    /// 最后一步走法 (from, to)
    pub last_move: Option<(Square, Square)>,
}

impl ClientGame {
    /// 获取指定格子的棋子
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.snapshot.as_ref().and_then(|s| s.piece_at(square))
    }

    /// 当前选中的格子
    pub fn selected_square(&self) -> Option<Square> {
        match &self.interaction {
            Interaction::Selected { from, .. } => Some(*from),
            _ => None,
        }
    }

    /// 当前高亮的目标格
    pub fn highlighted_targets(&self) -> &[Square] {
        match &self.interaction {
            Interaction::Selected { targets, .. } => targets,
            _ => &[],
        }
    }

    /// 处理一次点击
    pub fn handle_click(&mut self, square: Square) -> Option<GatewayCommand> {
        // 在途走法未裁定前不接受新的交互输入
        if matches!(self.interaction, Interaction::Pending { .. }) {
            return None;
        }

        let selected = match &self.interaction {
            Interaction::Selected { from, targets, .. } => Some((*from, targets.as_slice())),
            _ => None,
        };

        match selection::decide(selected, square, self.piece_at(square)) {
            Decision::Select(from) => self.select(from),
            Decision::Deselect => {
                self.interaction = Interaction::Idle;
                None
            }
            Decision::Commit { from, to } => self.commit(from, to),
            Decision::Ignore => None,
        }
    }

    /// 选中一个棋子并发起合法目标请求
    ///
    /// 拖拽开始时也走这里：选择是同步完成的，不等待任何应答。
    pub fn select(&mut self, square: Square) -> Option<GatewayCommand> {
        if matches!(self.interaction, Interaction::Pending { .. }) {
            return None;
        }
        self.piece_at(square)?;

        // 新的选择使旧的合法目标请求过期：应答按发起格比对后丢弃
        self.interaction = Interaction::Selected {
            from: square,
            targets: Vec::new(),
            targets_loaded: false,
        };
        Some(GatewayCommand::FetchLegalMoves { from: square })
    }

    /// 拖拽落子
    ///
    /// 拖放绕过"点击高亮格"这一步，直接对落点提交走法，
    /// 但裁定仍然交给规则服务，绝不乐观应用。
    pub fn drop_on(&mut self, from: Square, to: Square) -> Option<GatewayCommand> {
        if matches!(self.interaction, Interaction::Pending { .. }) {
            return None;
        }
        if self.selected_square() != Some(from) || from == to {
            return None;
        }
        self.commit(from, to)
    }

    /// 提交走法，进入 Pending
    fn commit(&mut self, from: Square, to: Square) -> Option<GatewayCommand> {
        let piece = self.piece_at(from)?;
        let mv = Move::for_piece(piece, from, to);
        self.interaction = Interaction::Pending { mv };
        Some(GatewayCommand::SubmitMove { mv })
    }

    /// 请求重置对局
    ///
    /// 任何状态都可重置；选择立即清除，失败时当前局面保持不变。
    pub fn request_reset(&mut self) -> GatewayCommand {
        self.interaction = Interaction::Idle;
        GatewayCommand::ResetGame
    }

    /// 应用合法目标应答
    ///
    /// 应答的发起格与当前选择不一致时整体丢弃，防止慢应答
    /// 污染新选择的高亮集合。
    pub fn apply_legal_moves(&mut self, from: Square, new_targets: Vec<Square>) {
        match &mut self.interaction {
            Interaction::Selected {
                from: selected,
                targets,
                targets_loaded,
            } if *selected == from => {
                *targets = new_targets;
                *targets_loaded = true;
            }
            _ => {
                tracing::debug!(%from, "discarding stale legal-moves response");
            }
        }
    }

    /// 应用走法被接受的应答
    pub fn apply_move_accepted(&mut self, snapshot: BoardSnapshot) {
        let mv = match &self.interaction {
            Interaction::Pending { mv } => *mv,
            _ => {
                tracing::debug!("discarding move response with no pending move");
                return;
            }
        };
        tracing::debug!(position = %Fen::generate(&snapshot), "move {} accepted", mv);
        self.snapshot = Some(snapshot);
        self.last_move = Some((mv.from, mv.to));
        self.interaction = Interaction::Idle;
        self.error = None;
    }

    /// 应用走法被拒绝的应答（局面不变，不假设走法生效）
    pub fn apply_move_rejected(&mut self, reason: String) {
        if !matches!(self.interaction, Interaction::Pending { .. }) {
            tracing::debug!("discarding move rejection with no pending move");
            return;
        }
        self.interaction = Interaction::Idle;
        self.error = Some(reason);
    }

    /// 应用服务端错误应答（如无效的重置请求）
    pub fn apply_authority_error(&mut self, message: String) {
        self.interaction = Interaction::Idle;
        self.error = Some(message);
    }

    /// 应用局面查询应答
    pub fn apply_board(&mut self, snapshot: BoardSnapshot) {
        self.snapshot = Some(snapshot);
        self.interaction = Interaction::Idle;
        self.error = None;
    }

    /// 应用重置应答
    pub fn apply_reset(&mut self, snapshot: BoardSnapshot) {
        self.snapshot = Some(snapshot);
        self.interaction = Interaction::Idle;
        self.last_move = None;
        self.error = None;
    }

    /// 应用传输失败
    ///
    /// 局面保持不变；选择清除，避免用户对着过期的高亮集合重试。
    pub fn apply_transport_failure(&mut self, message: String) {
        self.interaction = Interaction::Idle;
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{Board, PieceColor, PieceKind};

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    /// 初始局面下已完成开局加载的控制器
    fn fresh_game() -> ClientGame {
        let mut game = ClientGame::default();
        game.apply_board(BoardSnapshot::initial());
        game
    }

    /// 选中 e2 并送达合法目标 e3/e4
    fn game_with_e2_selected() -> ClientGame {
        let mut game = fresh_game();
        let cmd = game.handle_click(sq("e2"));
        assert_eq!(
            cmd,
            Some(GatewayCommand::FetchLegalMoves { from: sq("e2") })
        );
        game.apply_legal_moves(sq("e2"), vec![sq("e3"), sq("e4")]);
        game
    }

    #[test]
    fn test_select_issues_legal_moves_fetch() {
        let mut game = fresh_game();
        let cmd = game.handle_click(sq("e2"));
        assert_eq!(
            cmd,
            Some(GatewayCommand::FetchLegalMoves { from: sq("e2") })
        );
        // 应答未到之前没有任何高亮
        assert_eq!(game.selected_square(), Some(sq("e2")));
        assert!(game.highlighted_targets().is_empty());
    }

    #[test]
    fn test_click_empty_square_from_idle_is_noop() {
        let mut game = fresh_game();
        assert_eq!(game.handle_click(sq("e4")), None);
        assert_eq!(game.interaction, Interaction::Idle);
    }

    #[test]
    fn test_selection_toggle() {
        let mut game = game_with_e2_selected();
        assert_eq!(game.handle_click(sq("e2")), None);
        assert_eq!(game.interaction, Interaction::Idle);
        assert!(game.highlighted_targets().is_empty());
    }

    #[test]
    fn test_commit_only_within_targets() {
        // 点击未高亮且无棋子的格子绝不提交走法
        let mut game = game_with_e2_selected();
        assert_eq!(game.handle_click(sq("e5")), None);
        assert_eq!(game.selected_square(), Some(sq("e2")));

        // 点击未高亮的己方棋子是重新选择，也不提交
        let cmd = game.handle_click(sq("d2"));
        assert_eq!(
            cmd,
            Some(GatewayCommand::FetchLegalMoves { from: sq("d2") })
        );
    }

    #[test]
    fn test_legal_move_scenario() {
        // 选 e2 -> 合法目标 e3/e4 -> 点 e4 -> 提交 -> 接受后局面替换
        let mut game = game_with_e2_selected();

        let cmd = game.handle_click(sq("e4"));
        let expected = Move::new(sq("e2"), sq("e4"));
        assert_eq!(cmd, Some(GatewayCommand::SubmitMove { mv: expected }));
        assert_eq!(game.interaction, Interaction::Pending { mv: expected });

        // 权威应答：e2 的兵到了 e4
        let mut board = Board::initial();
        let pawn = board.get(sq("e2"));
        board.set(sq("e2"), None);
        board.set(sq("e4"), pawn);
        let accepted = BoardSnapshot::from_board(board, PieceColor::Black);

        game.apply_move_accepted(accepted.clone());

        assert_eq!(game.interaction, Interaction::Idle);
        assert_eq!(game.snapshot, Some(accepted));
        assert!(game.piece_at(sq("e2")).is_none());
        assert_eq!(
            game.piece_at(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
        assert_eq!(game.last_move, Some((sq("e2"), sq("e4"))));
        assert!(game.error.is_none());
    }

    #[test]
    fn test_stale_legal_moves_discarded() {
        // 选择从 e2 换到 d2 后，e2 的慢应答不得污染 d2 的高亮
        let mut game = fresh_game();
        game.handle_click(sq("e2"));
        game.handle_click(sq("d2"));

        game.apply_legal_moves(sq("e2"), vec![sq("e3"), sq("e4")]);
        assert_eq!(game.selected_square(), Some(sq("d2")));
        assert!(game.highlighted_targets().is_empty());

        game.apply_legal_moves(sq("d2"), vec![sq("d3"), sq("d4")]);
        assert_eq!(game.highlighted_targets(), &[sq("d3"), sq("d4")]);
    }

    #[test]
    fn test_legal_moves_after_deselect_discarded() {
        let mut game = fresh_game();
        game.handle_click(sq("e2"));
        game.handle_click(sq("e2"));

        game.apply_legal_moves(sq("e2"), vec![sq("e3")]);
        assert_eq!(game.interaction, Interaction::Idle);
    }

    #[test]
    fn test_empty_targets_is_valid_answer() {
        // 无路可走不是错误：加载完成但高亮为空
        let mut game = fresh_game();
        game.handle_click(sq("a1"));
        game.apply_legal_moves(sq("a1"), Vec::new());
        assert_eq!(
            game.interaction,
            Interaction::Selected {
                from: sq("a1"),
                targets: Vec::new(),
                targets_loaded: true,
            }
        );
        assert!(game.error.is_none());
    }

    #[test]
    fn test_authority_rejection() {
        let mut game = game_with_e2_selected();
        game.handle_click(sq("e4"));

        let before = game.snapshot.clone();
        game.apply_move_rejected("illegal move".to_string());

        assert_eq!(game.snapshot, before);
        assert_eq!(game.interaction, Interaction::Idle);
        assert_eq!(game.error.as_deref(), Some("illegal move"));
    }

    #[test]
    fn test_no_input_while_pending() {
        let mut game = game_with_e2_selected();
        game.handle_click(sq("e4"));

        // 在途走法裁定前，点击和拖放都被忽略
        assert_eq!(game.handle_click(sq("d2")), None);
        assert_eq!(game.select(sq("d2")), None);
        assert_eq!(game.drop_on(sq("d2"), sq("d4")), None);
        assert!(matches!(game.interaction, Interaction::Pending { .. }));
    }

    #[test]
    fn test_transport_failure_clears_selection_keeps_board() {
        let mut game = game_with_e2_selected();
        let before = game.snapshot.clone();

        game.apply_transport_failure("无法连接规则服务".to_string());

        assert_eq!(game.snapshot, before);
        assert_eq!(game.interaction, Interaction::Idle);
        assert!(game.error.is_some());
    }

    #[test]
    fn test_error_cleared_by_next_success() {
        let mut game = fresh_game();
        game.apply_transport_failure("boom".to_string());
        assert!(game.error.is_some());

        game.apply_board(BoardSnapshot::initial());
        assert!(game.error.is_none());
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut game = game_with_e2_selected();
        assert_eq!(game.request_reset(), GatewayCommand::ResetGame);
        assert_eq!(game.interaction, Interaction::Idle);

        // 成功应答替换局面并清除错误和最后走法
        game.error = Some("old".to_string());
        game.last_move = Some((sq("e2"), sq("e4")));
        game.apply_reset(BoardSnapshot::initial());
        assert_eq!(game.snapshot, Some(BoardSnapshot::initial()));
        assert!(game.error.is_none());
        assert!(game.last_move.is_none());
    }

    #[test]
    fn test_reset_is_idempotent() {
        // 连续两次重置得到同一局面，且选择和错误都被清除
        let mut game = game_with_e2_selected();
        game.error = Some("old".to_string());

        game.request_reset();
        game.apply_reset(BoardSnapshot::initial());
        let first = game.snapshot.clone();

        game.request_reset();
        game.apply_reset(BoardSnapshot::initial());

        assert_eq!(game.snapshot, first);
        assert_eq!(game.interaction, Interaction::Idle);
        assert!(game.error.is_none());
    }

    #[test]
    fn test_reset_failure_keeps_board() {
        let mut game = game_with_e2_selected();
        let before = game.snapshot.clone();
        game.request_reset();

        game.apply_transport_failure("连接中断".to_string());
        assert_eq!(game.snapshot, before);
        assert!(game.error.is_some());
    }

    #[test]
    fn test_drag_commits_without_highlight() {
        // 拖放直接对落点提交，不要求落点在高亮集合内
        let mut game = fresh_game();
        let cmd = game.select(sq("e2"));
        assert_eq!(
            cmd,
            Some(GatewayCommand::FetchLegalMoves { from: sq("e2") })
        );

        let cmd = game.drop_on(sq("e2"), sq("e4"));
        let expected = Move::new(sq("e2"), sq("e4"));
        assert_eq!(cmd, Some(GatewayCommand::SubmitMove { mv: expected }));
    }

    #[test]
    fn test_drop_on_origin_keeps_selection() {
        let mut game = fresh_game();
        game.select(sq("e2"));
        assert_eq!(game.drop_on(sq("e2"), sq("e2")), None);
        assert_eq!(game.selected_square(), Some(sq("e2")));
    }

    #[test]
    fn test_stale_drag_drop_discarded() {
        // 拖拽来源与当前选择不符时不提交
        let mut game = fresh_game();
        game.select(sq("e2"));
        game.select(sq("d2"));
        assert_eq!(game.drop_on(sq("e2"), sq("e4")), None);
    }

    #[test]
    fn test_promotion_default_attached_on_commit() {
        // 构造 e7 上有白兵的局面
        let mut board = Board::empty();
        board.set(
            sq("e7"),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White)),
        );
        let mut game = ClientGame::default();
        game.apply_board(BoardSnapshot::from_board(board, PieceColor::White));

        game.select(sq("e7"));
        game.apply_legal_moves(sq("e7"), vec![sq("e8")]);
        let cmd = game.handle_click(sq("e8"));

        let expected = Move::with_promotion(sq("e7"), sq("e8"), PieceKind::Queen);
        assert_eq!(cmd, Some(GatewayCommand::SubmitMove { mv: expected }));
    }

    #[test]
    fn test_move_response_without_pending_discarded() {
        let mut game = fresh_game();
        let before = game.snapshot.clone();

        let mut board = Board::empty();
        board.set(sq("a1"), Some(Piece::new(PieceKind::King, PieceColor::White)));
        game.apply_move_accepted(BoardSnapshot::from_board(board, PieceColor::Black));

        assert_eq!(game.snapshot, before);
        assert_eq!(game.interaction, Interaction::Idle);
    }
}
