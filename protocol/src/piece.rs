//! 棋子与格子定义

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::error::BoardError;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 兵
    Pawn,
    /// 马
    Knight,
    /// 象
    Bishop,
    /// 车
    Rook,
    /// 后
    Queen,
    /// 王
    King,
}

impl PieceKind {
    /// 获取 FEN 字符（白方大写，黑方小写）
    pub fn to_fen_char(&self, color: PieceColor) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            PieceColor::White => c.to_ascii_uppercase(),
            PieceColor::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceKind, PieceColor)> {
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    /// 白方（先手，默认显示在下方）
    White,
    /// 黑方（后手，默认显示在上方）
    Black,
}

impl PieceColor {
    /// 获取对方阵营
    pub fn opponent(&self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<PieceColor> {
        match c {
            'w' | 'W' => Some(PieceColor::White),
            'b' | 'B' => Some(PieceColor::Black),
            _ => None,
        }
    }
}

/// 棋子
///
/// 值类型；棋子的身份由其所在格子决定，"移动"在下一个快照里
/// 表现为旧格子为空、新格子出现同样的棋子。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    /// 创建新棋子
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// 获取棋子显示的 Unicode 符号
    pub fn display_char(&self) -> char {
        match (self.kind, self.color) {
            (PieceKind::King, PieceColor::White) => '♔',
            (PieceKind::Queen, PieceColor::White) => '♕',
            (PieceKind::Rook, PieceColor::White) => '♖',
            (PieceKind::Bishop, PieceColor::White) => '♗',
            (PieceKind::Knight, PieceColor::White) => '♘',
            (PieceKind::Pawn, PieceColor::White) => '♙',
            (PieceKind::King, PieceColor::Black) => '♚',
            (PieceKind::Queen, PieceColor::Black) => '♛',
            (PieceKind::Rook, PieceColor::Black) => '♜',
            (PieceKind::Bishop, PieceColor::Black) => '♝',
            (PieceKind::Knight, PieceColor::Black) => '♞',
            (PieceKind::Pawn, PieceColor::Black) => '♟',
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        PieceKind::from_fen_char(c).map(|(kind, color)| Piece { kind, color })
    }
}

/// 棋盘格子（代数坐标）
///
/// file 为列（0 = a 列），rank 为行（0 = 第 1 横排，白方底线）。
/// 恰好 64 个合法值，构造时检查边界。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// 创建新格子，越界返回 None
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < BOARD_SIZE && (rank as usize) < BOARD_SIZE {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// 创建新格子（不检查边界，仅限内部已验证的坐标）
    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// 列（0 = a 列）
    pub fn file(&self) -> u8 {
        self.file
    }

    /// 行（0 = 第 1 横排）
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// 解析代数记法，如 "e2"
    ///
    /// 列字母不区分大小写；任何其他形式都拒绝。
    pub fn parse(input: &str) -> Result<Self, BoardError> {
        let invalid = || BoardError::InvalidNotation {
            input: input.to_string(),
        };

        let mut chars = input.chars();
        let file_char = chars.next().ok_or_else(invalid)?;
        let rank_char = chars.next().ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }

        let file_char = file_char.to_ascii_lowercase();
        if !('a'..='h').contains(&file_char) {
            return Err(invalid());
        }
        let rank_digit = rank_char.to_digit(10).ok_or_else(invalid)?;
        if !(1..=8).contains(&rank_digit) {
            return Err(invalid());
        }

        Ok(Self {
            file: (file_char as u8) - b'a',
            rank: (rank_digit - 1) as u8,
        })
    }

    /// 转换为数组索引（rank * 8 + file）
    pub fn to_index(&self) -> usize {
        self.rank as usize * BOARD_SIZE + self.file as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Self {
                file: (index % BOARD_SIZE) as u8,
                rank: (index / BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 遍历全部 64 个格子
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE * BOARD_SIZE).map(|i| Square::from_index(i).unwrap())
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl std::str::FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_fen_char() {
        let white_king = Piece::new(PieceKind::King, PieceColor::White);
        assert_eq!(white_king.to_fen_char(), 'K');

        let black_queen = Piece::new(PieceKind::Queen, PieceColor::Black);
        assert_eq!(black_queen.to_fen_char(), 'q');

        assert_eq!(
            Piece::from_fen_char('R'),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
        assert_eq!(
            Piece::from_fen_char('n'),
            Some(Piece::new(PieceKind::Knight, PieceColor::Black))
        );
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn test_piece_display_char() {
        let white_king = Piece::new(PieceKind::King, PieceColor::White);
        assert_eq!(white_king.display_char(), '♔');

        let black_pawn = Piece::new(PieceKind::Pawn, PieceColor::Black);
        assert_eq!(black_pawn.display_char(), '♟');
    }

    #[test]
    fn test_square_parse() {
        let e2 = Square::parse("e2").unwrap();
        assert_eq!(e2.file(), 4);
        assert_eq!(e2.rank(), 1);
        assert_eq!(e2.to_string(), "e2");

        // 列字母不区分大小写
        assert_eq!(Square::parse("E2").unwrap(), e2);

        assert!(Square::parse("").is_err());
        assert!(Square::parse("e").is_err());
        assert!(Square::parse("e9").is_err());
        assert!(Square::parse("i1").is_err());
        assert!(Square::parse("e22").is_err());
    }

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn test_square_index_round_trip() {
        for square in Square::all() {
            assert_eq!(Square::from_index(square.to_index()), Some(square));
        }
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_color_opponent() {
        assert_eq!(PieceColor::White.opponent(), PieceColor::Black);
        assert_eq!(PieceColor::Black.opponent(), PieceColor::White);
    }
}
