//! 棋盘快照

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::piece::{Piece, PieceColor, PieceKind, Square};

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 rank * 8 + file，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// 创建初始棋盘（标准开局）
    pub fn initial() -> Self {
        let mut board = Self::empty();

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        // 白方：底线 + 第 2 横排的兵
        for (file, kind) in back_rank.iter().enumerate() {
            board.set(
                Square::new_unchecked(file as u8, 0),
                Some(Piece::new(*kind, PieceColor::White)),
            );
            board.set(
                Square::new_unchecked(file as u8, 1),
                Some(Piece::new(PieceKind::Pawn, PieceColor::White)),
            );
        }

        // 黑方：镜像到第 8/7 横排
        for (file, kind) in back_rank.iter().enumerate() {
            board.set(
                Square::new_unchecked(file as u8, 7),
                Some(Piece::new(*kind, PieceColor::Black)),
            );
            board.set(
                Square::new_unchecked(file as u8, 6),
                Some(Piece::new(PieceKind::Pawn, PieceColor::Black)),
            );
        }

        board
    }

    /// 获取指定格子的棋子
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.to_index()]
    }

    /// 设置指定格子的棋子
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.to_index()] = piece;
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|square| self.get(square).map(|piece| (square, piece)))
            .collect()
    }

    /// 棋子总数
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 完整的局面快照（棋盘 + 走子方）
///
/// 快照在每次规则服务成功应答后整体替换，任何组件都不原地修改它。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub current_turn: PieceColor,
}

impl BoardSnapshot {
    /// 创建初始局面
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            current_turn: PieceColor::White,
        }
    }

    /// 从棋盘创建快照
    pub fn from_board(board: Board, current_turn: PieceColor) -> Self {
        Self {
            board,
            current_turn,
        }
    }

    /// 获取指定格子的棋子
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}
