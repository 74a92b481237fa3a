// crates/ms_trace/src/lib.rs

//! MariStream 追踪层
//!
//! 把一对只读场（向量场 + 着色标量场）变成可渲染的条带几何。
//! 数据单向流动：
//!
//! ```text
//! driver → integrator → stepper (反复) → ribbon → 顶点/颜色缓冲 → 渲染器
//! ```
//!
//! # 模块概览
//!
//! - [`params`]: 追踪数值参数与播种配置
//! - [`stepper`]: 网格线步进（射线与最近网格线的精确交点）
//! - [`integrator`]: 预估-校正流线积分器，产出截面序列
//! - [`ribbon`]: 把截面序列展开成三角带顶点/颜色缓冲
//! - [`driver`]: 确定性播种与整组流线的生成循环
//!
//! # 错误模型
//!
//! 追踪热循环不产生错误：停滞视为自然终止，失控路径被迭代上限
//! 截断，越界采样由采样器钳位吸收。`MsResult` 仅出现在构造与
//! 配置校验处。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod integrator;
pub mod params;
pub mod ribbon;
pub mod stepper;

pub use driver::StreamlineDriver;
pub use integrator::{CrossSection, Streamline, StreamlineIntegrator};
pub use params::{DispatchStrategy, SeedingConfig, TraceParams};
pub use ribbon::RibbonBuffer;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::driver::StreamlineDriver;
    pub use crate::integrator::{CrossSection, Streamline, StreamlineIntegrator};
    pub use crate::params::{DispatchStrategy, SeedingConfig, TraceParams};
    pub use crate::ribbon::RibbonBuffer;
}
