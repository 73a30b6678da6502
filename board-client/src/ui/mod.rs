//! UI 模块
//!
//! 连接提示、错误横幅、行棋方指示和重置按钮

use bevy::prelude::*;

use protocol::PieceColor;

use crate::game::{ClientGame, GameEvent, Interaction as GameInteraction};
use crate::network::{ConnectionStatus, NetworkState};
use crate::theme::ColorTheme;
use crate::GameState;

/// 按钮配色
const NORMAL_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);
const HOVERED_BUTTON: Color = Color::srgb(0.35, 0.35, 0.35);
const PRESSED_BUTTON: Color = Color::srgb(0.45, 0.45, 0.45);

/// UI 插件
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            // 连接中
            .add_systems(OnEnter(GameState::Connecting), setup_connecting_ui)
            .add_systems(OnExit(GameState::Connecting), cleanup_connecting_ui)
            .add_systems(
                Update,
                update_connecting_text.run_if(in_state(GameState::Connecting)),
            )
            // 对局 HUD
            .add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(OnExit(GameState::Playing), cleanup_hud)
            .add_systems(
                Update,
                (update_error_banner, update_turn_indicator, handle_reset_button)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// 连接画面标记
#[derive(Component)]
pub struct ConnectingMarker;

/// 连接画面提示文字标记
#[derive(Component)]
pub struct ConnectingText;

/// HUD 标记
#[derive(Component)]
pub struct HudMarker;

/// 错误横幅文字标记
#[derive(Component)]
pub struct ErrorBanner;

/// 行棋方指示文字标记
#[derive(Component)]
pub struct TurnIndicator;

/// 重置按钮标记
#[derive(Component)]
pub struct ResetButton;

/// 设置连接画面
fn setup_connecting_ui(mut commands: Commands, theme: Res<ColorTheme>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            ConnectingMarker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("连接规则服务中..."),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(theme.hud_text),
                ConnectingText,
            ));
        });
}

/// 连接失败时更新提示文字
fn update_connecting_text(
    network: Res<NetworkState>,
    game: Res<ClientGame>,
    mut query: Query<(&mut Text, &mut TextColor), With<ConnectingText>>,
    theme: Res<ColorTheme>,
) {
    if !network.is_changed() && !game.is_changed() {
        return;
    }
    if network.status != ConnectionStatus::Error {
        return;
    }

    let message = game
        .error
        .clone()
        .unwrap_or_else(|| "无法连接规则服务".to_string());
    for (mut text, mut color) in query.iter_mut() {
        *text = Text::new(message.clone());
        *color = TextColor(theme.error_text);
    }
}

/// 清理连接画面
fn cleanup_connecting_ui(mut commands: Commands, query: Query<Entity, With<ConnectingMarker>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// 设置对局 HUD
fn setup_hud(mut commands: Commands, theme: Res<ColorTheme>) {
    // 顶部错误横幅
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            HudMarker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(theme.error_text),
                Visibility::Hidden,
                ErrorBanner,
            ));
        });

    // 右侧面板：行棋方 + 重置按钮
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(20.0),
                width: Val::Px(220.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(15.0)),
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.85)),
            HudMarker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("白方行棋"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(theme.hud_text),
                TurnIndicator,
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(160.0),
                        height: Val::Px(44.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(NORMAL_BUTTON),
                    ResetButton,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new("重新开始"),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(theme.hud_text),
                    ));
                });
        });
}

/// 清理对局 HUD
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudMarker>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// 更新错误横幅
fn update_error_banner(
    game: Res<ClientGame>,
    mut query: Query<(&mut Text, &mut Visibility), With<ErrorBanner>>,
) {
    if !game.is_changed() {
        return;
    }

    for (mut text, mut visibility) in query.iter_mut() {
        match &game.error {
            Some(message) => {
                *text = Text::new(message.clone());
                *visibility = Visibility::Visible;
            }
            None => {
                *visibility = Visibility::Hidden;
            }
        }
    }
}

/// 更新行棋方指示
fn update_turn_indicator(
    game: Res<ClientGame>,
    mut query: Query<&mut Text, With<TurnIndicator>>,
) {
    if !game.is_changed() {
        return;
    }

    let label = if matches!(game.interaction, GameInteraction::Pending { .. }) {
        "等待裁定..."
    } else {
        match game.snapshot.as_ref().map(|s| s.current_turn) {
            Some(PieceColor::White) => "白方行棋",
            Some(PieceColor::Black) => "黑方行棋",
            None => "加载局面...",
        }
    };

    for mut text in query.iter_mut() {
        *text = Text::new(label);
    }
}

/// 处理重置按钮
fn handle_reset_button(
    mut interactions: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<ResetButton>),
    >,
    mut events: MessageWriter<GameEvent>,
) {
    for (interaction, mut background) in interactions.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                *background = BackgroundColor(PRESSED_BUTTON);
                events.write(GameEvent::ResetGame);
            }
            Interaction::Hovered => {
                *background = BackgroundColor(HOVERED_BUTTON);
            }
            Interaction::None => {
                *background = BackgroundColor(NORMAL_BUTTON);
            }
        }
    }
}
