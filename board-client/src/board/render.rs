//! 棋盘渲染
//!
//! 棋盘格是静态的；选中/目标/最后走法高亮随交互状态重建

use bevy::prelude::*;

use super::{BoardLayout, BoardMarker, HighlightMarker, HighlightType};
use crate::theme::ColorTheme;

/// 生成棋盘（边框 + 64 个交替着色的格子）
pub fn spawn_board(commands: &mut Commands, layout: &BoardLayout, theme: &ColorTheme) {
    let board_span = layout.cell_size * 8.0;
    let center = layout.center();

    // 棋盘边框
    commands.spawn((
        Sprite {
            color: theme.board_border,
            custom_size: Some(Vec2::splat(board_span + 24.0)),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        BoardMarker,
    ));

    // 棋盘格：同一对角线颜色相同
    for row in 0..8u8 {
        for col in 0..8u8 {
            let color = if (row + col) % 2 == 0 {
                theme.light_square
            } else {
                theme.dark_square
            };
            let pos = layout.board_to_screen(row, col);
            commands.spawn((
                Sprite {
                    color,
                    custom_size: Some(Vec2::splat(layout.cell_size)),
                    ..default()
                },
                Transform::from_xyz(pos.x, pos.y, 1.0),
                BoardMarker,
            ));
        }
    }
}

/// 生成一个高亮
pub fn spawn_highlight(
    commands: &mut Commands,
    layout: &BoardLayout,
    row: u8,
    col: u8,
    color: Color,
    highlight_type: HighlightType,
) {
    let pos = layout.board_to_screen(row, col);

    let (size, z) = match highlight_type {
        HighlightType::Selected => (layout.cell_size, 3.0),
        HighlightType::Target => (layout.cell_size * 0.35, 4.0),
        HighlightType::LastMove => (layout.cell_size, 2.0),
    };

    commands.spawn((
        Sprite {
            color,
            custom_size: Some(Vec2::splat(size)),
            ..default()
        },
        Transform::from_xyz(pos.x, pos.y, z),
        HighlightMarker,
        BoardMarker,
    ));
}
