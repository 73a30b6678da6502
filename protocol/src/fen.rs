//! FEN 格式解析和生成
//!
//! 快照只关心棋子摆放和走子方，FEN 的易位权、吃过路兵、
//! 步数计时等规则字段在解析时接受并忽略，生成时以占位符填充。
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`

use crate::board::{Board, BoardSnapshot};
use crate::constants::BOARD_SIZE;
use crate::error::BoardError;
use crate::piece::{Piece, PieceColor, Square};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为局面快照
    pub fn parse(fen: &str) -> Result<BoardSnapshot, BoardError> {
        let mut parts = fen.split_whitespace();

        let placement = parts.next().ok_or_else(|| BoardError::InvalidFen {
            reason: "empty FEN string".to_string(),
        })?;
        let board = Self::parse_placement(placement)?;

        // 走子方（缺省白方）
        let current_turn = match parts.next() {
            Some(field) => {
                let c = field.chars().next().unwrap_or('w');
                PieceColor::from_fen_char(c).ok_or_else(|| BoardError::InvalidFen {
                    reason: format!("invalid active color: {field:?}"),
                })?
            }
            None => PieceColor::White,
        };

        // 其余字段（易位权等）属于规则服务，这里不使用

        Ok(BoardSnapshot::from_board(board, current_turn))
    }

    /// 生成 FEN 字符串
    ///
    /// 规则字段以占位符输出，因此结果可被本模块解析，
    /// 但不保证与规则服务生成的 FEN 完全一致。
    pub fn generate(snapshot: &BoardSnapshot) -> String {
        let mut placement = String::new();

        // FEN 从第 8 横排写到第 1 横排
        for rank in (0..BOARD_SIZE as u8).rev() {
            let mut empty_run = 0;
            for file in 0..BOARD_SIZE as u8 {
                match snapshot.board.get(Square::new_unchecked(file, rank)) {
                    Some(piece) => {
                        if empty_run > 0 {
                            placement.push(char::from_digit(empty_run, 10).unwrap());
                            empty_run = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                placement.push(char::from_digit(empty_run, 10).unwrap());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        format!(
            "{} {} - - 0 1",
            placement,
            snapshot.current_turn.to_fen_char()
        )
    }

    /// 解析棋子摆放段
    fn parse_placement(placement: &str) -> Result<Board, BoardError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::InvalidFen {
                reason: format!("expected 8 ranks, got {}", rows.len()),
            });
        }

        let mut board = Board::empty();

        for (i, row) in rows.iter().enumerate() {
            // 第一段是第 8 横排
            let rank = (BOARD_SIZE - 1 - i) as u8;
            let mut file: u8 = 0;

            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                    continue;
                }
                let piece = Piece::from_fen_char(c).ok_or_else(|| BoardError::InvalidFen {
                    reason: format!("invalid piece char: {c:?}"),
                })?;
                let square =
                    Square::new(file, rank).ok_or_else(|| BoardError::InvalidFen {
                        reason: format!("rank overflow in row {row:?}"),
                    })?;
                board.set(square, Some(piece));
                file += 1;
            }

            if file as usize != BOARD_SIZE {
                return Err(BoardError::InvalidFen {
                    reason: format!("rank {row:?} does not cover 8 files"),
                });
            }
        }

        Ok(board)
    }
}
