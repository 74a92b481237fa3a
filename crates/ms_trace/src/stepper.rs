// crates/ms_trace/src/stepper.rs

//! 网格线步进
//!
//! 计算从给定点沿给定方向出发，与下一条网格线（整数坐标线）的精确
//! 交点。坐标在网格索引空间。
//!
//! # 算法
//!
//! 对每个坐标轴独立计算到前后两条整数线的带符号步长
//! `t_lo = (floor(a − ε) − a) / v_a`、`t_hi = (ceil(a + ε) − a) / v_a`；
//! 对非零的 `v_a`，两者恰有一个为正有限值，取 `max` 即得该轴朝行进
//! 方向的可用步长。两轴取 `min`，即先碰到的那条网格线。
//!
//! 容差 ε 将恰好落在网格线上的点推离该线，避免原地打转：整数坐标
//! 处 `floor(a − ε)` 与 `ceil(a + ε)` 分别落到相邻两条线上，分子
//! 永不为零。
//!
//! # 前置条件
//!
//! 方向向量两个分量不能同时为零——单轴为零产生无穷候选并被 `min`
//! 正确排除，双轴为零则结果未定义。积分器在每次调用前都做了停滞
//! 检查，这里不重复防御。

use glam::DVec2;

/// 网格线判定容差
pub const GRID_LINE_EPSILON: f64 = 1e-5;

/// 沿 `v` 方向从 `origin` 步进到最近的网格线交点
#[inline]
pub fn grid_step(origin: DVec2, v: DVec2) -> DVec2 {
    let tx_lo = ((origin.x - GRID_LINE_EPSILON).floor() - origin.x) / v.x;
    let tx_hi = ((origin.x + GRID_LINE_EPSILON).ceil() - origin.x) / v.x;
    let ty_lo = ((origin.y - GRID_LINE_EPSILON).floor() - origin.y) / v.y;
    let ty_hi = ((origin.y + GRID_LINE_EPSILON).ceil() - origin.y) / v.y;

    let tx = tx_lo.max(tx_hi);
    let ty = ty_lo.max(ty_hi);
    let t = tx.min(ty);

    origin + v * t
}
