//! 棋盘渲染模块
//!
//! 负责棋盘格、棋子和高亮的显示；全部内容都从渲染投影重建，
//! 渲染系统本身不做任何交互决策。

pub mod pieces;
pub mod projection;
mod render;

pub use pieces::*;
pub use projection::{project, BoardView, CellView};
pub use render::*;

use bevy::prelude::*;
use protocol::GridCodec;

use crate::game::ClientGame;
use crate::settings::GameSettings;
use crate::theme::ColorTheme;
use crate::GameState;

/// 棋盘插件
pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(BoardLayout::default())
            .add_systems(OnEnter(GameState::Playing), setup_board)
            .add_systems(OnExit(GameState::Playing), cleanup_board)
            .add_systems(
                Update,
                (update_pieces, update_highlights).run_if(in_state(GameState::Playing)),
            );
    }
}

/// 棋盘布局配置
#[derive(Resource, Clone, Debug)]
pub struct BoardLayout {
    /// 显示行 7、列 0 的格子中心（屏幕坐标，画面左下角）
    pub origin: Vec2,
    /// 格子大小
    pub cell_size: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        let cell_size = 76.0;
        Self {
            // 居中显示：8 个格子，中心位于原点
            origin: Vec2::splat(-cell_size * 3.5),
            cell_size,
        }
    }
}

impl BoardLayout {
    /// 棋盘中心的屏幕坐标
    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::splat(self.cell_size * 3.5)
    }

    /// 将显示行列转换为屏幕坐标（row 0 在画面顶部）
    pub fn board_to_screen(&self, row: u8, col: u8) -> Vec2 {
        Vec2::new(
            self.origin.x + col as f32 * self.cell_size,
            self.origin.y + (7 - row) as f32 * self.cell_size,
        )
    }

    /// 将屏幕坐标转换为显示行列
    pub fn screen_to_board(&self, pos: Vec2) -> Option<(u8, u8)> {
        let relative = pos - self.origin;
        let col = (relative.x / self.cell_size + 0.5).floor() as i32;
        let inv_row = (relative.y / self.cell_size + 0.5).floor() as i32;

        if (0..8).contains(&col) && (0..8).contains(&inv_row) {
            Some(((7 - inv_row) as u8, col as u8))
        } else {
            None
        }
    }
}

/// 棋盘标记组件
#[derive(Component)]
pub struct BoardMarker;

/// 高亮标记组件
#[derive(Component)]
pub struct HighlightMarker;

/// 高亮类型
#[derive(Clone, Copy, Debug)]
pub enum HighlightType {
    /// 当前选中格
    Selected,
    /// 合法目标格
    Target,
    /// 最后走法的起止格
    LastMove,
}

/// 设置棋盘
fn setup_board(mut commands: Commands, layout: Res<BoardLayout>, theme: Res<ColorTheme>) {
    render::spawn_board(&mut commands, &layout, &theme);
}

/// 清理棋盘
fn cleanup_board(mut commands: Commands, query: Query<Entity, With<BoardMarker>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// 更新棋子显示
fn update_pieces(
    mut commands: Commands,
    game: Res<ClientGame>,
    settings: Res<GameSettings>,
    layout: Res<BoardLayout>,
    theme: Res<ColorTheme>,
    pieces_query: Query<Entity, With<PieceMarker>>,
) {
    if !game.is_changed() && !settings.is_changed() {
        return;
    }

    for entity in pieces_query.iter() {
        commands.entity(entity).despawn();
    }

    let view = projection::project(&game, GridCodec::new(settings.flipped));
    pieces::spawn_pieces(&mut commands, &view, &layout, &theme);
}

/// 更新高亮显示
fn update_highlights(
    mut commands: Commands,
    game: Res<ClientGame>,
    settings: Res<GameSettings>,
    layout: Res<BoardLayout>,
    theme: Res<ColorTheme>,
    highlights_query: Query<Entity, With<HighlightMarker>>,
) {
    if !game.is_changed() && !settings.is_changed() {
        return;
    }

    for entity in highlights_query.iter() {
        commands.entity(entity).despawn();
    }

    let codec = GridCodec::new(settings.flipped);
    let view = projection::project(&game, codec);

    for (row, cells) in view.cells.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if cell.is_selected {
                render::spawn_highlight(
                    &mut commands,
                    &layout,
                    row as u8,
                    col as u8,
                    theme.selected_highlight,
                    HighlightType::Selected,
                );
            }
            if cell.is_highlighted && settings.show_targets {
                render::spawn_highlight(
                    &mut commands,
                    &layout,
                    row as u8,
                    col as u8,
                    theme.target_indicator,
                    HighlightType::Target,
                );
            }
        }
    }

    // 最后走法高亮
    if let Some((from, to)) = game.last_move {
        for square in [from, to] {
            let (row, col) = codec.coords_of(square);
            render::spawn_highlight(
                &mut commands,
                &layout,
                row,
                col,
                theme.last_move_highlight,
                HighlightType::LastMove,
            );
        }
    }
}
