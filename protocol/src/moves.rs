//! 走法类型
//!
//! 只描述"从哪到哪"；合法性完全由外部规则服务裁定，
//! 客户端不实现任何象棋规则。

use serde::{Deserialize, Serialize};

use crate::piece::{Piece, PieceColor, PieceKind, Square};

/// 升变的默认兵种
///
/// 客户端不提供升变选择界面，兵到达底线时固定按后升变提交，
/// 规则服务仍可能拒绝。
pub const DEFAULT_PROMOTION: PieceKind = PieceKind::Queen;

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
    /// 升变兵种（仅兵到达底线时填写）
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// 创建带升变的走法
    pub fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// 按移动的棋子决定是否附带默认升变
    ///
    /// 兵走到对方底线即视为升变，这不需要规则知识，
    /// 只看棋子种类和目标横排。
    pub fn for_piece(piece: Piece, from: Square, to: Square) -> Self {
        let last_rank = match piece.color {
            PieceColor::White => 7,
            PieceColor::Black => 0,
        };
        if piece.kind == PieceKind::Pawn && to.rank() == last_rank {
            Self::with_promotion(from, to, DEFAULT_PROMOTION)
        } else {
            Self::new(from, to)
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.promotion {
            Some(kind) => write!(
                f,
                "{}{}={}",
                self.from,
                self.to,
                kind.to_fen_char(PieceColor::White)
            ),
            None => write!(f, "{}{}", self.from, self.to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display() {
        let mv = Move::new(Square::parse("e2").unwrap(), Square::parse("e4").unwrap());
        assert_eq!(mv.to_string(), "e2e4");

        let promo = Move::with_promotion(
            Square::parse("e7").unwrap(),
            Square::parse("e8").unwrap(),
            PieceKind::Queen,
        );
        assert_eq!(promo.to_string(), "e7e8=Q");
    }

    #[test]
    fn test_default_promotion_attached() {
        let pawn = Piece::new(PieceKind::Pawn, PieceColor::White);
        let mv = Move::for_piece(
            pawn,
            Square::parse("e7").unwrap(),
            Square::parse("e8").unwrap(),
        );
        assert_eq!(mv.promotion, Some(PieceKind::Queen));

        // 未到底线的兵不升变
        let mv = Move::for_piece(
            pawn,
            Square::parse("e2").unwrap(),
            Square::parse("e4").unwrap(),
        );
        assert_eq!(mv.promotion, None);

        // 其他棋子到底线也不升变
        let rook = Piece::new(PieceKind::Rook, PieceColor::White);
        let mv = Move::for_piece(
            rook,
            Square::parse("a1").unwrap(),
            Square::parse("a8").unwrap(),
        );
        assert_eq!(mv.promotion, None);
    }

    #[test]
    fn test_black_pawn_promotes_on_first_rank() {
        let pawn = Piece::new(PieceKind::Pawn, PieceColor::Black);
        let mv = Move::for_piece(
            pawn,
            Square::parse("d2").unwrap(),
            Square::parse("d1").unwrap(),
        );
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
    }
}
