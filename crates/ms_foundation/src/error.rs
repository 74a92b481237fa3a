// crates/ms_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `MsError` 枚举和 `MsResult` 类型别名。
//!
//! # 设计原则
//!
//! 1. **构造期校验**: 网格尺寸、场配对、配置合法性在构造时检查
//! 2. **热循环无错误**: 流线追踪通过不变量静默降级，不抛出运行时错误
//! 3. **易用性**: 提供便捷的构造方法
//!
//! # 示例
//!
//! ```
//! use ms_foundation::error::{MsError, MsResult};
//!
//! fn check_dims(w: usize, h: usize) -> MsResult<()> {
//!     if w < 2 || h < 2 {
//!         return Err(MsError::invalid_input("场尺寸每个方向至少为 2"));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// 统一结果类型
pub type MsResult<T> = Result<T, MsError>;

/// MariStream 错误类型
#[derive(Error, Debug)]
pub enum MsError {
    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 场尺寸不匹配
    #[error("场尺寸不匹配: 期望{expected:?}, 实际{actual:?}")]
    DimensionMismatch {
        /// 期望尺寸 (宽, 高)
        expected: (usize, usize),
        /// 实际尺寸 (宽, 高)
        actual: (usize, usize),
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: &'static str,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },
}

// ============================================================
// 便捷构造方法
// ============================================================

impl MsError {
    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 场尺寸不匹配
    pub fn dimension_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================
// 验证辅助方法
// ============================================================

impl MsError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> MsResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> MsResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }
}
