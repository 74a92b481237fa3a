// crates/ms_field/src/synthetic.rs

//! 解析合成场
//!
//! 实现与离散场相同采样契约的确定性解析源，用于在没有模拟后端的
//! 情况下测试追踪器与演示输出。相同输入必得相同输出。

use glam::DVec2;

use crate::color::{ColorSource, Rgba};
use crate::sample::VectorSource;

/// 匀速直线流
///
/// 整个域内方向与模长恒定。
#[derive(Debug, Clone, Copy)]
pub struct UniformFlow {
    width: usize,
    height: usize,
    direction: DVec2,
}

impl UniformFlow {
    /// 创建匀速流
    pub fn new(width: usize, height: usize, direction: DVec2) -> Self {
        Self {
            width,
            height,
            direction,
        }
    }
}

impl VectorSource for UniformFlow {
    fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn velocity(&self, _p: DVec2) -> DVec2 {
        self.direction
    }
}

/// 绕中心的旋涡流
///
/// 速度与到中心的向量垂直（逆时针），模长随半径线性增长。
#[derive(Debug, Clone, Copy)]
pub struct VortexFlow {
    width: usize,
    height: usize,
    center: DVec2,
    strength: f64,
}

impl VortexFlow {
    /// 创建以归一化坐标 `center` 为中心的旋涡
    pub fn new(width: usize, height: usize, center: DVec2, strength: f64) -> Self {
        Self {
            width,
            height,
            center,
            strength,
        }
    }
}

impl VectorSource for VortexFlow {
    fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn velocity(&self, p: DVec2) -> DVec2 {
        let offset = p - self.center;
        DVec2::new(-offset.y, offset.x) * self.strength
    }
}

/// 全域静止场
///
/// 每个点的速度都是零向量，用于停滞终止路径的测试。
#[derive(Debug, Clone, Copy)]
pub struct StagnantFlow {
    width: usize,
    height: usize,
}

impl StagnantFlow {
    /// 创建静止场
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl VectorSource for StagnantFlow {
    fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn velocity(&self, _p: DVec2) -> DVec2 {
        DVec2::ZERO
    }
}

/// 恒定颜色源
#[derive(Debug, Clone, Copy)]
pub struct ConstColor(
    /// 颜色值
    pub Rgba,
);

impl ColorSource for ConstColor {
    fn color(&self, _p: DVec2) -> Rgba {
        self.0
    }
}
