// crates/ms_trace/src/driver.rs

//! 播种与生成驱动
//!
//! 为一对场生成整组流线条带：
//!
//! 1. 颜色标定（每个场对恰好一次，先于任何颜色查询）；
//! 2. 用固定常量重新播种的随机源一次性生成全部种子；
//! 3. 每个种子以同一深度层追踪正反两条流线（`dir_sign = ±0.5`），
//!    深度每个种子递增 `2 / line_count`，依次分层；
//! 4. 每条流线展开为独立的顶点/颜色缓冲对，作为纯数据返回。
//!
//! 种子之间互不依赖，按配置可经 rayon 并行分发；种子与深度都在
//! 分发前生成完毕，串行与并行的输出逐字节一致。

use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use ms_field::color::{ColorMap, ColorSource, FieldColors};
use ms_field::sample::{FieldPair, VectorSource};
use ms_foundation::error::MsResult;

use crate::integrator::StreamlineIntegrator;
use crate::params::{SeedingConfig, TraceParams};
use crate::ribbon::RibbonBuffer;

/// 正向追踪的方向系数
pub const DIR_SIGN_FORWARD: f64 = 0.5;

/// 逆向追踪的方向系数
pub const DIR_SIGN_BACKWARD: f64 = -0.5;

/// 流线生成驱动
///
/// 持有播种配置与积分器；无内部可变状态，可跨线程共享。
#[derive(Debug, Clone)]
pub struct StreamlineDriver {
    seeding: SeedingConfig,
    integrator: StreamlineIntegrator,
}

impl StreamlineDriver {
    /// 创建驱动
    pub fn new(seeding: SeedingConfig, params: TraceParams) -> MsResult<Self> {
        seeding.validate()?;
        Ok(Self {
            seeding,
            integrator: StreamlineIntegrator::new(params)?,
        })
    }

    /// 默认配置的驱动
    pub fn with_defaults() -> Self {
        Self::new(SeedingConfig::default(), TraceParams::default())
            .expect("默认配置必须合法")
    }

    /// 播种配置
    #[inline]
    pub fn seeding(&self) -> &SeedingConfig {
        &self.seeding
    }

    /// 积分器
    #[inline]
    pub fn integrator(&self) -> &StreamlineIntegrator {
        &self.integrator
    }

    /// 为一对场生成整组条带缓冲
    ///
    /// 先对场对做颜色标定，再追踪全部种子。返回 `2 × line_count` 个
    /// 缓冲，每个种子的正反两条相邻排列，顺序与策略无关。
    pub fn generate(&self, fields: &FieldPair, map: &ColorMap) -> MsResult<Vec<RibbonBuffer>> {
        // 标定是一次性屏障：任何截面着色之前必须完成
        let calibrated = map.calibrate(fields)?;
        let colors = FieldColors::new(fields, &calibrated);
        Ok(self.generate_with(fields, &colors))
    }

    /// 用任意采样/颜色源生成条带缓冲
    ///
    /// [`generate`](Self::generate) 的低层入口，测试与演示可以直接
    /// 传入合成源。颜色源必须已完成标定（由类型保证）。
    pub fn generate_with<V, C>(&self, vector: &V, colors: &C) -> Vec<RibbonBuffer>
    where
        V: VectorSource + Sync,
        C: ColorSource + Sync,
    {
        let seeds = self.seed_points();
        let depth_step = self.seeding.depth_step();
        let half_width = self.integrator.params().half_width;

        let trace_seed = |(i, seed): (usize, &DVec2)| -> [RibbonBuffer; 2] {
            // 同一种子的两个方向共享同一深度层
            let depth = (i + 1) as f64 * depth_step;
            let forward = self
                .integrator
                .trace(*seed, DIR_SIGN_FORWARD, vector, colors);
            let backward = self
                .integrator
                .trace(*seed, DIR_SIGN_BACKWARD, vector, colors);
            [
                RibbonBuffer::from_streamline(&forward, depth, half_width),
                RibbonBuffer::from_streamline(&backward, depth, half_width),
            ]
        };

        let parallel = self.seeding.strategy.use_parallel(seeds.len());
        debug!(
            seeds = seeds.len(),
            parallel,
            "开始生成流线条带"
        );

        let pairs: Vec<[RibbonBuffer; 2]> = if parallel {
            seeds.par_iter().enumerate().map(trace_seed).collect()
        } else {
            seeds.iter().enumerate().map(trace_seed).collect()
        };

        let buffers: Vec<RibbonBuffer> = pairs.into_iter().flatten().collect();

        debug!(
            buffers = buffers.len(),
            vertices = buffers.iter().map(RibbonBuffer::vertex_count).sum::<usize>(),
            "流线条带生成完成"
        );
        buffers
    }

    /// 生成确定性种子序列
    ///
    /// 每次调用都用配置常量重新播种，整个序列在追踪开始前生成——
    /// 并行调度不会改变种子与结果的对应关系。
    fn seed_points(&self) -> Vec<DVec2> {
        let mut rng = StdRng::seed_from_u64(self.seeding.rng_seed);
        (0..self.seeding.line_count)
            .map(|_| DVec2::new(rng.gen::<f64>(), rng.gen::<f64>()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DispatchStrategy;

    fn small_driver(strategy: DispatchStrategy) -> StreamlineDriver {
        StreamlineDriver::new(
            SeedingConfig {
                line_count: 10,
                rng_seed: 23123,
                strategy,
            },
            TraceParams::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_seed_points_deterministic() {
        let driver = small_driver(DispatchStrategy::Sequential);
        let a = driver.seed_points();
        let b = driver.seed_points();
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn test_seed_points_in_unit_square() {
        let driver = small_driver(DispatchStrategy::Sequential);
        for seed in driver.seed_points() {
            assert!((0.0..1.0).contains(&seed.x));
            assert!((0.0..1.0).contains(&seed.y));
        }
    }

    #[test]
    fn test_different_seed_constant_changes_sequence() {
        let a = small_driver(DispatchStrategy::Sequential).seed_points();
        let b = StreamlineDriver::new(
            SeedingConfig {
                line_count: 10,
                rng_seed: 777,
                strategy: DispatchStrategy::Sequential,
            },
            TraceParams::default(),
        )
        .unwrap()
        .seed_points();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_zero_line_count() {
        let result = StreamlineDriver::new(
            SeedingConfig {
                line_count: 0,
                ..Default::default()
            },
            TraceParams::default(),
        );
        assert!(result.is_err());
    }
}
