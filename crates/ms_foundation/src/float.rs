// crates/ms_foundation/src/float.rs

//! 数值常量与浮点辅助函数
//!
//! 集中管理工作空间共享的数值阈值，避免魔法数散落各处。
//! 追踪算法自身的参数（边界留白、停滞阈值等）属于运行时配置，
//! 定义在 `ms_trace::params` 中，不在本模块。

use serde::{Deserialize, Serialize};

// ============================================================
// 数值常量
// ============================================================

/// 浮点数相等性比较的默认容差
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// 安全除法的最小分母阈值
pub const SAFE_DIV_EPSILON: f64 = 1e-14;

// ============================================================
// 辅助函数
// ============================================================

/// 容差范围内的相等性比较
#[inline]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// 钳位到归一化区间 [0, 1]
///
/// 采样器的输入契约：越界点（例如 y 边界未钳位导致的轻微出界）
/// 一律先钳位再采样，保证结果有定义。
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// 分母过小时返回回退值的安全除法
#[inline]
pub fn safe_div(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator.abs() < SAFE_DIV_EPSILON {
        fallback
    } else {
        numerator / denominator
    }
}

// ============================================================
// 归一化范围
// ============================================================

/// 标量值范围，用于颜色标定的归一化
///
/// 记录一次扫描得到的 [min, max]，将任意值映射到 [0, 1]。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// 最小值
    pub min: f64,
    /// 最大值
    pub max: f64,
}

impl ValueRange {
    /// 从首个样本创建
    #[inline]
    pub fn from_sample(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// 吸收一个样本，扩展范围
    #[inline]
    pub fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// 范围跨度
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// 将值归一化到 [0, 1]
    ///
    /// 退化范围（span 过小）映射到 0.5，保证输出有定义。
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span < SAFE_DIV_EPSILON {
            0.5
        } else {
            clamp_unit((value - self.min) / span)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-13, DEFAULT_EPSILON));
        assert!(!approx_eq(1.0, 1.1, DEFAULT_EPSILON));
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(0.3), 0.3);
        assert_eq!(clamp_unit(1.5), 1.0);
    }

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(1.0, 2.0, 0.0), 0.5);
        assert_eq!(safe_div(1.0, 0.0, 7.0), 7.0);
    }

    #[test]
    fn test_value_range_include() {
        let mut range = ValueRange::from_sample(2.0);
        range.include(5.0);
        range.include(-1.0);
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 5.0);
        assert_eq!(range.span(), 6.0);
    }

    #[test]
    fn test_value_range_normalize() {
        let range = ValueRange {
            min: 0.0,
            max: 10.0,
        };
        assert!(approx_eq(range.normalize(5.0), 0.5, DEFAULT_EPSILON));
        // 越界值钳位
        assert_eq!(range.normalize(20.0), 1.0);
        assert_eq!(range.normalize(-5.0), 0.0);
    }

    #[test]
    fn test_value_range_degenerate() {
        let range = ValueRange {
            min: 3.0,
            max: 3.0,
        };
        assert_eq!(range.normalize(3.0), 0.5);
    }
}
