// crates/ms_field/src/grid.rs

//! 矩形网格存储
//!
//! 提供行主序的 `Grid<T>` 容器，外部模拟每帧写入一对
//! `VectorField` / `ScalarField`，追踪过程中只读。
//!
//! # 索引约定
//!
//! `(ix, iy)` 中 `ix ∈ [0, width)` 为列（x 方向），`iy ∈ [0, height)`
//! 为行（y 方向），底层存储偏移 `iy * width + ix`。

use glam::DVec2;
use ms_foundation::error::{MsError, MsResult};
use serde::{Deserialize, Serialize};

/// 二维向量场：每个采样点一个流向向量
pub type VectorField = Grid<DVec2>;

/// 标量场：与向量场同尺寸，仅用于着色
pub type ScalarField = Grid<f64>;

/// 行主序矩形网格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// 创建均匀填充的网格
    ///
    /// # 错误
    ///
    /// 任一维度为零时返回 `InvalidInput`。
    pub fn new(width: usize, height: usize, fill: T) -> MsResult<Self> {
        Self::validate_dims(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![fill; width * height],
        })
    }

    /// 从已有数据创建网格
    ///
    /// # 错误
    ///
    /// `data.len() != width * height` 时返回 `SizeMismatch`。
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> MsResult<Self> {
        Self::validate_dims(width, height)?;
        MsError::check_size("grid data", width * height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// 按坐标函数生成网格
    ///
    /// 便于从解析场或模拟输出构造测试夹具。
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> MsResult<Self> {
        Self::validate_dims(width, height)?;
        let mut data = Vec::with_capacity(width * height);
        for iy in 0..height {
            for ix in 0..width {
                data.push(f(ix, iy));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn validate_dims(width: usize, height: usize) -> MsResult<()> {
        if width == 0 || height == 0 {
            return Err(MsError::invalid_input(format!(
                "网格尺寸不能为零: {width}x{height}"
            )));
        }
        Ok(())
    }

    /// 网格宽度（x 方向采样点数）
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// 网格高度（y 方向采样点数）
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// 尺寸 (宽, 高)
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// 按整数索引取值
    ///
    /// # Panics
    ///
    /// debug 模式下索引越界时 panic；调用方负责保证索引有效。
    #[inline]
    pub fn at(&self, ix: usize, iy: usize) -> T {
        debug_assert!(ix < self.width && iy < self.height);
        self.data[iy * self.width + ix]
    }

    /// 写入整数索引处的值
    #[inline]
    pub fn set(&mut self, ix: usize, iy: usize, value: T) {
        debug_assert!(ix < self.width && iy < self.height);
        self.data[iy * self.width + ix] = value;
    }

    /// 底层数据切片（行主序）
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// 遍历所有值
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new_and_access() {
        let mut grid = Grid::new(4, 3, 0.0f64).unwrap();
        grid.set(2, 1, 5.0);
        assert_eq!(grid.at(2, 1), 5.0);
        assert_eq!(grid.at(0, 0), 0.0);
        assert_eq!(grid.dims(), (4, 3));
    }

    #[test]
    fn test_grid_row_major_layout() {
        let grid = Grid::from_fn(3, 2, |ix, iy| (iy * 10 + ix) as f64).unwrap();
        // 行主序：第二行从偏移 width 开始
        assert_eq!(grid.as_slice()[3], 10.0);
        assert_eq!(grid.at(0, 1), 10.0);
    }

    #[test]
    fn test_grid_from_vec_size_mismatch() {
        let result = Grid::from_vec(4, 3, vec![0.0f64; 11]);
        assert!(result.is_err());
    }

    #[test]
    fn test_grid_zero_dims_rejected() {
        assert!(Grid::new(0, 3, 0.0f64).is_err());
        assert!(Grid::new(3, 0, 0.0f64).is_err());
    }

    #[test]
    fn test_vector_field_alias() {
        let field = VectorField::new(5, 5, DVec2::new(1.0, 0.0)).unwrap();
        assert_eq!(field.at(4, 4), DVec2::new(1.0, 0.0));
    }
}
