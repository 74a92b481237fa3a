// crates/ms_trace/src/integrator.rs

//! 流线积分器
//!
//! 从一个种子点出发，沿向量场（或逆向）积分出一条流线，产出截面
//! 序列。积分在网格索引空间进行，步长由网格线交点决定（见
//! [`crate::stepper`]），方向采用 Heun 型预估-校正：
//!
//! ```text
//! v1 = v(x)                    当前点流向
//! x* = step(x, v1)             预估点
//! v2 = v(x*)                   预估点流向
//! v  = (v1 + v2) / 2           校正方向
//! x' = step(x, v)              实际推进
//! ```
//!
//! # 终止条件
//!
//! 1. **停滞**: 校正后 |v|² 低于阈值，路径已停滞；
//! 2. **边界**: 新点越出边界留白定义的内域；
//! 3. **迭代上限**: `cap_multiplier × width` 次迭代，兜底退化场中的
//!    不收敛路径。
//!
//! 停滞时不再推进（停滞方向喂给步进器会造成病态除法），收尾截面在
//! 原地发射。采样到的原始方向在预估步之前也做同样检查，保证步进器
//! 永远不会拿到近零向量。
//!
//! # 自适应发射
//!
//! 只有当路径自上次发射以来转过了可察觉的角度（位移方向与当前流向
//! 的余弦低于阈值）或者本轮即将终止时，才发射新截面。直线段因此
//! 折叠成单段，曲率越大顶点越密。

use glam::DVec2;
use ms_field::color::{ColorSource, Rgba};
use ms_field::sample::VectorSource;
use ms_foundation::error::MsResult;

use crate::params::TraceParams;
use crate::stepper::grid_step;

// ============================================================
// 截面与流线
// ============================================================

/// 流线上的一个截面：位置、局部方向与颜色
///
/// 位置在网格索引空间；方向不要求单位长度，条带展开只用它的指向。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    /// 网格索引空间中的位置
    pub point: DVec2,
    /// 局部方向（含 dir_sign 缩放）
    pub direction: DVec2,
    /// 截面颜色
    pub color: Rgba,
}

/// 一次积分产出的截面序列
///
/// 序列内的截面单调推进（没有反向步），仅在终止截面处例外。
pub type Streamline = Vec<CrossSection>;

// ============================================================
// 积分器
// ============================================================

/// 流线积分器
///
/// 持有数值参数，无内部可变状态；同一实例可被多个线程共享。
#[derive(Debug, Clone)]
pub struct StreamlineIntegrator {
    params: TraceParams,
}

impl StreamlineIntegrator {
    /// 创建积分器
    pub fn new(params: TraceParams) -> MsResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// 数值参数
    #[inline]
    pub fn params(&self) -> &TraceParams {
        &self.params
    }

    /// 从种子点积分一条流线
    ///
    /// # 参数
    /// - `seed`: 归一化坐标 `[0,1]²` 中的种子点
    /// - `dir_sign`: 符号选择沿场正向/逆向，模长缩放采样向量；
    ///   典型取值 `±0.5`，不能为零
    /// - `vector`: 向量场采样源
    /// - `colors`: 已标定的颜色源
    ///
    /// # 返回
    ///
    /// 截面序列，至少包含种子处的初始截面。
    pub fn trace<V, C>(&self, seed: DVec2, dir_sign: f64, vector: &V, colors: &C) -> Streamline
    where
        V: VectorSource,
        C: ColorSource,
    {
        let (width, height) = vector.dims();
        let scale = DVec2::new((width - 1) as f64, (height - 1) as f64);
        let pad = self.params.border_padding;
        let x_max = width as f64 - pad;
        let y_max = height as f64 - pad;

        let mut sections: Streamline = Vec::new();

        // 初始截面：种子处采样，无前一点可比较
        let mut grid = seed * scale;
        let v0 = vector.velocity(seed) * dir_sign;
        sections.push(CrossSection {
            point: grid,
            direction: v0,
            color: colors.color(seed),
        });

        let mut last_emitted = grid;
        let mut exit = false;

        for _ in 0..self.params.cap_multiplier * width {
            let p = grid / scale;
            let mut v1 = vector.velocity(p) * dir_sign;

            // 原始方向已停滞：不碰步进器，直接结束
            if v1.length_squared() < self.params.stagnation_threshold {
                break;
            }

            // 预估点处的流向，与当前流向取中点作为校正方向
            let predictor = grid_step(grid, v1);
            let v2 = vector.velocity(predictor / scale) * dir_sign;
            v1 = (v1 + v2) * 0.5;

            if v1.length_squared() < self.params.stagnation_threshold {
                // 校正后停滞：原地收尾，不再推进
                exit = true;
            } else {
                grid = grid_step(grid, v1);

                // 边界处理在两个轴上不对称：x 越界钳位到边界再退出，
                // y 只退出不钳位，终止截面可能落在内域之外。越界的 y
                // 采样由采样器的钳位契约吸收。
                if grid.x < pad {
                    grid.x = pad;
                    exit = true;
                }
                if grid.x > x_max {
                    grid.x = x_max;
                    exit = true;
                }
                if grid.y < pad || grid.y > y_max {
                    exit = true;
                }
            }

            // 新点处的流向，作为下一个截面的条带法线依据
            let p = grid / scale;
            let unit = vector.velocity(p).normalize_or_zero();
            let travel = unit * dir_sign.signum();

            // 自适应发射：终止必发射；否则仅在路径转向时发射
            let cos = (grid - last_emitted).normalize_or_zero().dot(travel);
            if exit || cos < self.params.emission_cos_threshold {
                sections.push(CrossSection {
                    point: grid,
                    direction: unit * dir_sign,
                    color: colors.color(p),
                });
                last_emitted = grid;
            }

            if exit {
                break;
            }
        }

        sections
    }
}
