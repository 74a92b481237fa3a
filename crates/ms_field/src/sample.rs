// crates/ms_field/src/sample.rs

//! 场采样契约与双线性插值
//!
//! 定义追踪器依赖的抽象采样接口（[`VectorSource`] / [`ScalarSource`]），
//! 以及离散场对 [`FieldPair`] 的钳位双线性实现。
//!
//! # 采样契约
//!
//! 输入为归一化坐标 `[0,1]²`；越界输入（例如边界处理产生的轻微出界点）
//! 先钳位到有效域再插值，调用方永远得到有定义的结果。
//!
//! # 插值
//!
//! 取目标点周围最近的四个采样点做双线性加权。权重在每次采样时即时
//! 计算——追踪访问模式是沿曲线的散点查询，预计算权重表（批量插值的
//! 做法）在这里没有收益。

use glam::DVec2;
use ms_foundation::error::{MsError, MsResult};
use ms_foundation::float::clamp_unit;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, ScalarField, VectorField};

// ============================================================
// 采样 trait
// ============================================================

/// 向量场采样源
///
/// 追踪器通过本 trait 访问流向数据，便于用合成场替换真实模拟输出。
pub trait VectorSource {
    /// 场尺寸 (宽, 高)，即每个方向的采样点数
    fn dims(&self) -> (usize, usize);

    /// 在归一化坐标 `p ∈ [0,1]²` 处采样流向
    ///
    /// 越界输入钳位到有效域。
    fn velocity(&self, p: DVec2) -> DVec2;
}

/// 标量场采样源
pub trait ScalarSource {
    /// 在归一化坐标 `p ∈ [0,1]²` 处采样标量值
    ///
    /// 越界输入钳位到有效域。
    fn value(&self, p: DVec2) -> f64;
}

// ============================================================
// 双线性插值
// ============================================================

/// 可线性插值的网格元素
pub trait Lerp: Copy {
    /// `a + (b - a) * t`
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for DVec2 {
    #[inline]
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// 钳位双线性插值
///
/// `p` 为归一化坐标；映射到索引空间后取周围四点加权。
pub fn bilinear<T: Lerp>(grid: &Grid<T>, p: DVec2) -> T {
    let (w, h) = grid.dims();
    let gx = clamp_unit(p.x) * (w - 1) as f64;
    let gy = clamp_unit(p.y) * (h - 1) as f64;

    let x0 = gx.floor() as usize;
    let y0 = gy.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = gx - x0 as f64;
    let fy = gy - y0 as f64;

    let bottom = T::lerp(grid.at(x0, y0), grid.at(x1, y0), fx);
    let top = T::lerp(grid.at(x0, y1), grid.at(x1, y1), fx);
    T::lerp(bottom, top, fy)
}

// ============================================================
// 场对
// ============================================================

/// 配对的向量场与标量场
///
/// 两场尺寸必须一致；一次追踪过程中视为不可变快照。
/// 每个方向至少两个采样点，保证归一化坐标换算 `(dimension - 1)` 非零。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldPair {
    vector: VectorField,
    scalar: ScalarField,
}

impl FieldPair {
    /// 创建场对
    ///
    /// # 错误
    ///
    /// - 两场尺寸不一致时返回 `DimensionMismatch`
    /// - 任一方向少于两个采样点时返回 `InvalidInput`
    pub fn new(vector: VectorField, scalar: ScalarField) -> MsResult<Self> {
        if vector.dims() != scalar.dims() {
            return Err(MsError::dimension_mismatch(vector.dims(), scalar.dims()));
        }
        let (w, h) = vector.dims();
        if w < 2 || h < 2 {
            return Err(MsError::invalid_input(format!(
                "场尺寸每个方向至少为 2: {w}x{h}"
            )));
        }
        Ok(Self { vector, scalar })
    }

    /// 向量场
    #[inline]
    pub fn vector(&self) -> &VectorField {
        &self.vector
    }

    /// 标量场
    #[inline]
    pub fn scalar(&self) -> &ScalarField {
        &self.scalar
    }
}

impl VectorSource for FieldPair {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        self.vector.dims()
    }

    #[inline]
    fn velocity(&self, p: DVec2) -> DVec2 {
        bilinear(&self.vector, p)
    }
}

impl ScalarSource for FieldPair {
    #[inline]
    fn value(&self, p: DVec2) -> f64 {
        bilinear(&self.scalar, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_foundation::float::{approx_eq, DEFAULT_EPSILON};

    fn ramp_pair() -> FieldPair {
        // 标量场沿 x 线性增长，向量场恒定
        let scalar = ScalarField::from_fn(5, 4, |ix, _| ix as f64).unwrap();
        let vector = VectorField::new(5, 4, DVec2::new(1.0, 0.0)).unwrap();
        FieldPair::new(vector, scalar).unwrap()
    }

    #[test]
    fn test_bilinear_at_sample_points() {
        let pair = ramp_pair();
        assert!(approx_eq(pair.value(DVec2::new(0.0, 0.0)), 0.0, DEFAULT_EPSILON));
        assert!(approx_eq(pair.value(DVec2::new(1.0, 1.0)), 4.0, DEFAULT_EPSILON));
    }

    #[test]
    fn test_bilinear_midpoint() {
        let pair = ramp_pair();
        // 归一化 x=0.5 对应索引 2.0
        let v = pair.value(DVec2::new(0.5, 0.5));
        assert!(approx_eq(v, 2.0, DEFAULT_EPSILON));
        // 采样点之间线性
        let v = pair.value(DVec2::new(0.375, 0.0));
        assert!(approx_eq(v, 1.5, DEFAULT_EPSILON));
    }

    #[test]
    fn test_bilinear_clamps_out_of_range() {
        let pair = ramp_pair();
        // y 越界点按钳位后的值采样，不越界访问
        let inside = pair.value(DVec2::new(0.5, 1.0));
        let outside = pair.value(DVec2::new(0.5, 1.7));
        assert_eq!(inside, outside);
        let outside = pair.value(DVec2::new(-0.3, 0.5));
        assert_eq!(outside, pair.value(DVec2::new(0.0, 0.5)));
    }

    #[test]
    fn test_field_pair_dimension_mismatch() {
        let vector = VectorField::new(5, 4, DVec2::ZERO).unwrap();
        let scalar = ScalarField::new(5, 3, 0.0).unwrap();
        assert!(FieldPair::new(vector, scalar).is_err());
    }

    #[test]
    fn test_field_pair_rejects_degenerate_axis() {
        let vector = VectorField::new(1, 4, DVec2::ZERO).unwrap();
        let scalar = ScalarField::new(1, 4, 0.0).unwrap();
        assert!(FieldPair::new(vector, scalar).is_err());
    }

    #[test]
    fn test_vector_interpolation() {
        let vector = VectorField::from_fn(3, 3, |ix, _| DVec2::new(ix as f64, 0.0)).unwrap();
        let scalar = ScalarField::new(3, 3, 0.0).unwrap();
        let pair = FieldPair::new(vector, scalar).unwrap();
        let v = pair.velocity(DVec2::new(0.5, 0.5));
        assert!(approx_eq(v.x, 1.0, DEFAULT_EPSILON));
        assert!(approx_eq(v.y, 0.0, DEFAULT_EPSILON));
    }
}
