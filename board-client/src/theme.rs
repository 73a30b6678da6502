//! 主题和配色方案
//!
//! 定义棋盘格、棋子和交互高亮的颜色配置

use bevy::prelude::*;

/// 主题插件
pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ColorTheme::classic());
    }
}

/// 颜色主题配置
#[derive(Resource, Clone, Debug)]
pub struct ColorTheme {
    pub name: String,

    // 棋盘
    pub light_square: Color,
    pub dark_square: Color,
    pub board_border: Color,

    // 棋子
    pub white_piece: Color,
    pub black_piece: Color,

    // 交互高亮
    pub selected_highlight: Color,
    pub target_indicator: Color,
    pub last_move_highlight: Color,

    // 文字
    pub hud_text: Color,
    pub error_text: Color,
}

impl ColorTheme {
    /// 经典木质配色
    pub fn classic() -> Self {
        Self {
            name: "经典木质".to_string(),

            light_square: Color::srgb_u8(240, 217, 181), // #F0D9B5 浅木色
            dark_square: Color::srgb_u8(181, 136, 99),   // #B58863 深木色
            board_border: Color::srgb_u8(78, 52, 46),    // #4E342E 深棕色

            white_piece: Color::srgb_u8(250, 250, 250), // 象牙白
            black_piece: Color::srgb_u8(33, 33, 33),    // 墨黑色

            selected_highlight: Color::srgba_u8(255, 213, 79, 200), // #FFD54F 金黄色
            target_indicator: Color::srgba_u8(129, 199, 132, 200),  // #81C784 淡绿色半透明
            last_move_highlight: Color::srgba_u8(100, 181, 246, 150), // #64B5F6 淡蓝色

            hud_text: Color::srgb_u8(230, 230, 230),
            error_text: Color::srgb_u8(244, 67, 54), // #F44336 红色警告
        }
    }

    /// 高对比度配色
    #[allow(dead_code)]
    pub fn high_contrast() -> Self {
        Self {
            name: "高对比度".to_string(),

            light_square: Color::srgb_u8(255, 255, 255),
            dark_square: Color::srgb_u8(120, 120, 120),
            board_border: Color::srgb_u8(0, 0, 0),

            white_piece: Color::srgb_u8(255, 255, 255),
            black_piece: Color::srgb_u8(0, 0, 0),

            selected_highlight: Color::srgba_u8(255, 235, 59, 230),
            target_indicator: Color::srgba_u8(0, 200, 83, 230),
            last_move_highlight: Color::srgba_u8(41, 121, 255, 180),

            hud_text: Color::srgb_u8(255, 255, 255),
            error_text: Color::srgb_u8(255, 23, 68),
        }
    }
}
