//! 网格坐标与代数记法的编解码
//!
//! 渲染层用 (row, col) 描述格子，协议层用代数记法（"a1".."h8"）。
//! 行到横排的映射由一个 flipped 开关决定，同一份编解码逻辑同时
//! 服务"白方在下"和按数组原序渲染两种布局，不重复映射代码。

use crate::constants::BOARD_SIZE;
use crate::error::BoardError;
use crate::piece::Square;

/// 网格编解码器
///
/// 默认（flipped = false）：row 0 是第 8 横排（画面顶部），
/// 即白方在画面底部。flipped = true 时 row 0 是第 1 横排。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCodec {
    flipped: bool,
}

impl GridCodec {
    /// 创建编解码器
    pub fn new(flipped: bool) -> Self {
        Self { flipped }
    }

    /// 白方在下的标准布局
    pub fn white_bottom() -> Self {
        Self::new(false)
    }

    /// 是否翻转
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// 将网格坐标转换为格子
    ///
    /// row/col 越界返回 `OutOfRange`。
    pub fn square_at(&self, row: i32, col: i32) -> Result<Square, BoardError> {
        if !(0..BOARD_SIZE as i32).contains(&row) || !(0..BOARD_SIZE as i32).contains(&col) {
            return Err(BoardError::OutOfRange { row, col });
        }

        let rank = if self.flipped {
            row as u8
        } else {
            (BOARD_SIZE as i32 - 1 - row) as u8
        };
        Ok(Square::new_unchecked(col as u8, rank))
    }

    /// 将格子转换为网格坐标 (row, col)
    ///
    /// `square_at` 的完全逆映射，对全部 64 个格子封闭。
    pub fn coords_of(&self, square: Square) -> (u8, u8) {
        let row = if self.flipped {
            square.rank()
        } else {
            BOARD_SIZE as u8 - 1 - square.rank()
        };
        (row, square.file())
    }

    /// 将代数记法转换为网格坐标
    ///
    /// 记法格式错误返回 `InvalidNotation`。
    pub fn coords_of_name(&self, name: &str) -> Result<(u8, u8), BoardError> {
        Ok(self.coords_of(Square::parse(name)?))
    }
}

impl Default for GridCodec {
    fn default() -> Self {
        Self::white_bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_squares() {
        for codec in [GridCodec::new(false), GridCodec::new(true)] {
            for row in 0..8 {
                for col in 0..8 {
                    let square = codec.square_at(row, col).unwrap();
                    assert_eq!(codec.coords_of(square), (row as u8, col as u8));
                }
            }
        }
    }

    #[test]
    fn test_white_bottom_mapping() {
        let codec = GridCodec::white_bottom();

        // row 0 是第 8 横排
        assert_eq!(codec.square_at(0, 0).unwrap().to_string(), "a8");
        assert_eq!(codec.square_at(7, 0).unwrap().to_string(), "a1");
        assert_eq!(codec.square_at(6, 4).unwrap().to_string(), "e2");
    }

    #[test]
    fn test_flipped_mapping() {
        let codec = GridCodec::new(true);

        // row 0 是第 1 横排（数组原序）
        assert_eq!(codec.square_at(0, 0).unwrap().to_string(), "a1");
        assert_eq!(codec.square_at(7, 7).unwrap().to_string(), "h8");
    }

    #[test]
    fn test_out_of_range() {
        let codec = GridCodec::white_bottom();
        assert!(matches!(
            codec.square_at(-1, 0),
            Err(BoardError::OutOfRange { .. })
        ));
        assert!(matches!(
            codec.square_at(0, 8),
            Err(BoardError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_coords_of_name() {
        let codec = GridCodec::white_bottom();
        assert_eq!(codec.coords_of_name("e2").unwrap(), (6, 4));
        assert!(matches!(
            codec.coords_of_name("e9"),
            Err(BoardError::InvalidNotation { .. })
        ));
    }
}
