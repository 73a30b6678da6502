//! 选子决策
//!
//! 纯函数：给定当前选中状态、被点击的格子和该格的棋子，
//! 决定这次点击是选子、取消、提交走法还是无操作。
//! 不触发任何异步请求，合法目标的获取由控制器负责。

use protocol::{Piece, Square};

/// 一次点击的决策结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// 选中该格的棋子，开始新的选择周期
    Select(Square),
    /// 取消当前选择
    Deselect,
    /// 提交走法（点击落在已高亮的目标格上）
    Commit { from: Square, to: Square },
    /// 无操作（选择和高亮保持不变）
    Ignore,
}

/// 决定一次点击的含义
///
/// `selected` 为当前选中的格子及其已获取的合法目标；
/// `occupant` 为被点击格子上的棋子。
///
/// 点击空白且未高亮的格子时保持现状：这里刻意不做取消处理，
/// 取消只通过再次点击已选中的格子完成。
pub fn decide(
    selected: Option<(Square, &[Square])>,
    clicked: Square,
    occupant: Option<Piece>,
) -> Decision {
    let Some((from, targets)) = selected else {
        // 没有选择时，点到棋子即选中
        return match occupant {
            Some(_) => Decision::Select(clicked),
            None => Decision::Ignore,
        };
    };

    if clicked == from {
        return Decision::Deselect;
    }

    if targets.contains(&clicked) {
        // 落在高亮目标上是走子尝试，不是重新选择
        return Decision::Commit { from, to: clicked };
    }

    if occupant.is_some() {
        // 高亮集合之外的棋子：放弃旧选择，开始新的选择周期
        return Decision::Select(clicked);
    }

    Decision::Ignore
}
