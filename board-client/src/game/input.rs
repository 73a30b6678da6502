//! 输入处理
//!
//! 点击和拖放都归并为同一组逻辑输入：选子、提交、取消。
//! 按下即完成选子（拖拽开始不需要等待任何应答），
//! 原地抬起是点击，异地抬起是拖放落子。

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use protocol::{GridCodec, Square};

use super::{ClientGame, GameEvent, Interaction};
use crate::board::BoardLayout;
use crate::settings::GameSettings;

/// 拖拽进行状态
#[derive(Resource, Default)]
pub struct DragState {
    /// 按下时所在的格子
    origin: Option<Square>,
    /// 按下这一刻是否已经发出过选子事件
    selected_on_press: bool,
}

/// 处理鼠标输入
pub fn handle_mouse_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    layout: Res<BoardLayout>,
    settings: Res<GameSettings>,
    game: Res<ClientGame>,
    mut drag: ResMut<DragState>,
    mut events: MessageWriter<GameEvent>,
) {
    let pressed = mouse_button.just_pressed(MouseButton::Left);
    let released = mouse_button.just_released(MouseButton::Left);
    if !pressed && !released {
        return;
    }

    let square = cursor_square(&windows, &camera_query, &layout, &settings);

    if pressed {
        drag.origin = square;
        drag.selected_on_press = false;

        if let Some(square) = square {
            // 按下即选子（= 拖拽开始的 select 转移）。已选中的格子等
            // 抬起时走点击取消；高亮目标等抬起时走点击提交；在途走法
            // 期间不接受新选择。
            let on_target = game.highlighted_targets().contains(&square);
            let already_selected = game.selected_square() == Some(square);
            let pending = matches!(game.interaction, Interaction::Pending { .. });

            if !on_target && !already_selected && !pending && game.piece_at(square).is_some() {
                events.write(GameEvent::SelectSquare { square });
                drag.selected_on_press = true;
            }
        }
    }

    if released {
        let origin = drag.origin.take();
        let selected_on_press = std::mem::take(&mut drag.selected_on_press);

        let Some(square) = square else {
            // 棋盘外抬起：拖拽结束，选择保持原样
            return;
        };

        match origin {
            Some(origin) if origin == square => {
                // 原地点击；按下时已完成的选子不再重复处理
                if !selected_on_press {
                    events.write(GameEvent::ClickSquare { square });
                }
            }
            Some(origin) => {
                events.write(GameEvent::DragDrop {
                    from: origin,
                    to: square,
                });
            }
            None => {}
        }
    }
}

/// 光标位置对应的格子
fn cursor_square(
    windows: &Query<&Window, With<PrimaryWindow>>,
    camera_query: &Query<(&Camera, &GlobalTransform)>,
    layout: &BoardLayout,
    settings: &GameSettings,
) -> Option<Square> {
    let window = windows.single().ok()?;
    let cursor_position = window.cursor_position()?;

    let (camera, camera_transform) = camera_query.single().ok()?;
    let world_position = camera
        .viewport_to_world_2d(camera_transform, cursor_position)
        .ok()?;

    let (row, col) = layout.screen_to_board(world_position)?;
    GridCodec::new(settings.flipped)
        .square_at(row as i32, col as i32)
        .ok()
}
