// crates/ms_foundation/src/lib.rs

//! MariStream 基础层
//!
//! 为流线可视化工作空间提供基础抽象，不包含任何几何或追踪逻辑。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型，仅用于构造期与配置校验
//! - [`float`]: 数值常量与浮点辅助函数
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 serde 和 thiserror
//! 2. **构造期报错**: 追踪热循环本身不产生错误，所有校验前置
//! 3. **零开销抽象**: 辅助函数全部 `#[inline]`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;

pub use error::{MsError, MsResult};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{MsError, MsResult};
    pub use crate::float::{approx_eq, clamp_unit, DEFAULT_EPSILON};
}
