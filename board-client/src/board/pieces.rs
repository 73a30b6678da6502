//! 棋子渲染
//!
//! 棋子用 Unicode 符号绘制，颜色按阵营取自主题

use bevy::prelude::*;
use protocol::PieceColor;

use super::projection::BoardView;
use super::{BoardLayout, BoardMarker};
use crate::theme::ColorTheme;

/// 棋子标记组件
#[derive(Component)]
pub struct PieceMarker;

/// 棋子显示位置组件
#[derive(Component)]
pub struct PiecePosition {
    pub row: u8,
    pub col: u8,
}

/// 按投影结果生成所有棋子
pub fn spawn_pieces(
    commands: &mut Commands,
    view: &BoardView,
    layout: &BoardLayout,
    theme: &ColorTheme,
) {
    for (row, cells) in view.cells.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let Some(piece) = cell.piece else {
                continue;
            };

            let pos = layout.board_to_screen(row as u8, col as u8);
            let color = match piece.color {
                PieceColor::White => theme.white_piece,
                PieceColor::Black => theme.black_piece,
            };

            commands.spawn((
                Text2d::new(piece.display_char().to_string()),
                TextFont {
                    font_size: layout.cell_size * 0.8,
                    ..default()
                },
                TextColor(color),
                Transform::from_xyz(pos.x, pos.y, 10.0),
                PieceMarker,
                PiecePosition {
                    row: row as u8,
                    col: col as u8,
                },
                BoardMarker,
            ));
        }
    }
}
