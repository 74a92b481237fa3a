// crates/ms_trace/src/ribbon.rs

//! 条带网格缓冲
//!
//! 把流线截面展开为三角带顶点：每个截面沿曲线法线向两侧各偏移
//! 半宽，得到左右两个顶点与两份颜色。相邻截面的顶点对连成
//! triangle strip 后近似一条等宽条带；细条带不做转角斜接，视觉上
//! 可以接受。
//!
//! 缓冲是纯数据，由调用方持有并交给渲染器；这里不发出任何绘制
//! 调用。

use glam::{DVec2, Vec3};
use ms_field::color::Rgba;

use crate::integrator::CrossSection;

/// 顶点 alpha 的样式系数：`a = 0.3 × (r + g)`
const ALPHA_STYLE_FACTOR: f32 = 0.3;

/// 一条流线的顶点/颜色缓冲对
///
/// 两个序列始终等长且为偶数——每个截面恰好追加两项。按
/// triangle strip 解释时相邻四个顶点构成两个三角形。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonBuffer {
    positions: Vec<Vec3>,
    colors: Vec<Rgba>,
}

impl RibbonBuffer {
    /// 创建空缓冲
    pub fn new() -> Self {
        Self::default()
    }

    /// 按截面数预分配
    pub fn with_capacity(sections: usize) -> Self {
        Self {
            positions: Vec::with_capacity(sections * 2),
            colors: Vec::with_capacity(sections * 2),
        }
    }

    /// 从整条流线展开缓冲
    ///
    /// `depth` 统一施加到本条流线所有顶点的 z 分量，用于在输出坐标
    /// 系中分离相互覆盖的流线。
    pub fn from_streamline(line: &[CrossSection], depth: f64, half_width: f64) -> Self {
        let mut buffer = Self::with_capacity(line.len());
        for section in line {
            buffer.push_section(section.point, section.direction, section.color, depth, half_width);
        }
        buffer
    }

    /// 追加一个截面的左右顶点对
    ///
    /// 法线取 `direction` 的左垂直方向（旋转 90°）。方向退化（仅出现
    /// 在停滞的初始截面）时两个顶点塌缩到中线上，而不是产出 NaN。
    pub fn push_section(
        &mut self,
        point: DVec2,
        direction: DVec2,
        color: Rgba,
        depth: f64,
        half_width: f64,
    ) {
        let normal = direction.perp().normalize_or_zero();
        let left = point + normal * half_width;
        let right = point - normal * half_width;

        let styled = Rgba {
            a: ALPHA_STYLE_FACTOR * (color.r + color.g),
            ..color
        };
        self.colors.push(styled);
        self.colors.push(styled);

        let z = depth as f32;
        self.positions.push(Vec3::new(left.x as f32, left.y as f32, z));
        self.positions.push(Vec3::new(right.x as f32, right.y as f32, z));
    }

    /// 顶点位置（网格索引空间，z 为深度）
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// 顶点颜色
    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// 顶点数
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
