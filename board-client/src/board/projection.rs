//! 渲染投影
//!
//! 从 (局面快照, 交互状态, 错误) 到网格描述的纯映射。
//! 无副作用、无异步；相同输入必须产出相同结果，
//! 渲染系统只消费这里的输出，不自带任何逻辑。

use protocol::{GridCodec, Piece};

use crate::game::ClientGame;

/// 单个格子的显示描述
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellView {
    /// 格子上的棋子
    pub piece: Option<Piece>,
    /// 是否为当前选中格
    pub is_selected: bool,
    /// 是否为合法目标高亮格
    pub is_highlighted: bool,
}

/// 整盘的显示描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// 8x8 格子，按显示行列索引 cells[row][col]
    pub cells: Vec<Vec<CellView>>,
    /// 错误横幅（无错误时为 None）
    pub error_banner: Option<String>,
}

impl BoardView {
    /// 指定显示坐标的格子
    pub fn cell(&self, row: usize, col: usize) -> &CellView {
        &self.cells[row][col]
    }
}

/// 生成整盘的显示描述
pub fn project(game: &ClientGame, codec: GridCodec) -> BoardView {
    let selected = game.selected_square();
    let targets = game.highlighted_targets();

    let cells = (0..8)
        .map(|row| {
            (0..8)
                .map(|col| {
                    // 行列来自受控循环，越界属于编程契约违规，直接失败
                    let square = codec
                        .square_at(row, col)
                        .expect("grid coordinates stay in range");
                    CellView {
                        piece: game.piece_at(square),
                        is_selected: selected == Some(square),
                        is_highlighted: targets.contains(&square),
                    }
                })
                .collect()
        })
        .collect();

    BoardView {
        cells,
        error_banner: game.error.clone(),
    }
}
