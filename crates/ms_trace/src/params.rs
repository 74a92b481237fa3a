// crates/ms_trace/src/params.rs

//! 追踪参数与播种配置
//!
//! 数值参数集中在两个可序列化的配置结构里：
//! - [`TraceParams`]: 单条流线积分与条带展开的数值参数
//! - [`SeedingConfig`]: 整组流线的播种与调度配置
//!
//! 改动任何一项默认值都会改变输出几何，序列化格式随之提供
//! 配置快照能力。

use ms_foundation::error::{MsError, MsResult};
use serde::{Deserialize, Serialize};

// ============================================================
// 追踪数值参数
// ============================================================

/// 单条流线的数值参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceParams {
    /// 边界留白（网格单位）
    ///
    /// 有效内域为 `[padding, width - padding]`（y 方向同理）。
    pub border_padding: f64,

    /// 停滞判定阈值，作用于校正后方向的 |v|²
    pub stagnation_threshold: f64,

    /// 自适应顶点发射的余弦阈值
    ///
    /// 位移方向与当前流向的夹角余弦低于该值才发射新截面；
    /// 直线段被折叠成单段，任何弯曲都会强制新顶点。
    pub emission_cos_threshold: f64,

    /// 迭代上限系数（上限 = 系数 × 场宽度）
    pub cap_multiplier: usize,

    /// 条带半宽（网格单位）
    pub half_width: f64,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            border_padding: 3.0,
            stagnation_threshold: 1e-7,
            emission_cos_threshold: 0.999_999_99,
            cap_multiplier: 3,
            half_width: 1.0,
        }
    }
}

impl TraceParams {
    /// 校验参数合法性
    pub fn validate(&self) -> MsResult<()> {
        if self.border_padding < 0.0 {
            return Err(MsError::invalid_config(
                "border_padding",
                self.border_padding.to_string(),
                "不能为负",
            ));
        }
        if self.stagnation_threshold <= 0.0 {
            return Err(MsError::invalid_config(
                "stagnation_threshold",
                self.stagnation_threshold.to_string(),
                "必须为正",
            ));
        }
        if !(-1.0..=1.0).contains(&self.emission_cos_threshold) {
            return Err(MsError::invalid_config(
                "emission_cos_threshold",
                self.emission_cos_threshold.to_string(),
                "余弦阈值必须在 [-1, 1] 内",
            ));
        }
        if self.cap_multiplier == 0 {
            return Err(MsError::invalid_config(
                "cap_multiplier",
                "0".to_string(),
                "迭代上限系数必须为正",
            ));
        }
        if self.half_width <= 0.0 {
            return Err(MsError::invalid_config(
                "half_width",
                self.half_width.to_string(),
                "条带半宽必须为正",
            ));
        }
        Ok(())
    }
}

// ============================================================
// 播种配置
// ============================================================

/// 调度策略
///
/// 种子之间没有共享可变状态，天然可并行；种子序列在分发前一次性
/// 生成，两种策略的输出逐字节一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    /// 串行执行
    Sequential,
    /// rayon 并行执行
    Parallel,
    /// 根据种子数自动选择
    #[default]
    Auto,
}

impl DispatchStrategy {
    /// 自动模式的并行下限
    pub const MIN_PARALLEL_SEEDS: usize = 64;

    /// 给定种子数时是否并行
    pub fn use_parallel(&self, seed_count: usize) -> bool {
        match self {
            Self::Sequential => false,
            Self::Parallel => true,
            Self::Auto => seed_count >= Self::MIN_PARALLEL_SEEDS,
        }
    }
}

/// 播种与调度配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedingConfig {
    /// 种子数量（每个种子产出正反两条流线）
    pub line_count: usize,

    /// 随机数种子常量
    ///
    /// 每次调用都用该常量重新播种，保证可复现输出。
    pub rng_seed: u64,

    /// 调度策略
    pub strategy: DispatchStrategy,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            line_count: 1000,
            rng_seed: 23123,
            strategy: DispatchStrategy::default(),
        }
    }
}

impl SeedingConfig {
    /// 校验配置合法性
    pub fn validate(&self) -> MsResult<()> {
        if self.line_count == 0 {
            return Err(MsError::invalid_config(
                "line_count",
                "0".to_string(),
                "种子数量必须为正",
            ));
        }
        Ok(())
    }

    /// 相邻种子之间的深度增量
    #[inline]
    pub fn depth_step(&self) -> f64 {
        2.0 / self.line_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_params_defaults_valid() {
        assert!(TraceParams::default().validate().is_ok());
    }

    #[test]
    fn test_trace_params_rejects_bad_values() {
        let p = TraceParams {
            border_padding: -1.0,
            ..Default::default()
        };
        assert!(p.validate().is_err());

        let p = TraceParams {
            stagnation_threshold: 0.0,
            ..Default::default()
        };
        assert!(p.validate().is_err());

        let p = TraceParams {
            emission_cos_threshold: 1.5,
            ..Default::default()
        };
        assert!(p.validate().is_err());

        let p = TraceParams {
            cap_multiplier: 0,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_seeding_defaults() {
        let cfg = SeedingConfig::default();
        assert_eq!(cfg.line_count, 1000);
        assert_eq!(cfg.rng_seed, 23123);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_seeding_rejects_zero_lines() {
        let cfg = SeedingConfig {
            line_count: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_depth_step() {
        let cfg = SeedingConfig {
            line_count: 1000,
            ..Default::default()
        };
        assert!((cfg.depth_step() - 0.002).abs() < 1e-15);
    }

    #[test]
    fn test_dispatch_strategy() {
        assert!(!DispatchStrategy::Sequential.use_parallel(10_000));
        assert!(DispatchStrategy::Parallel.use_parallel(1));
        assert!(DispatchStrategy::Auto.use_parallel(1000));
        assert!(!DispatchStrategy::Auto.use_parallel(8));
    }
}
