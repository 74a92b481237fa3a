// crates/ms_field/src/color.rs

//! 颜色映射与标定
//!
//! 流线的颜色由标量场驱动：标定阶段扫描一次场对，记录标量值范围与
//! 最大流速；查询阶段将归一化标量映射到渐变色带，并按流速调制亮度。
//!
//! # 标定契约
//!
//! 查询仅在标定之后有效。这里用类型表达该顺序：[`ColorMap::calibrate`]
//! 消费场对引用并返回 [`CalibratedColors`]，颜色查询只存在于标定后的
//! 类型上，"未标定就查询"无法通过编译。
//!
//! # Alpha 约定
//!
//! 查询返回的 alpha 恒为 1.0；条带网格生成阶段会用自己的样式公式
//! 覆盖 alpha，这里不做预混。

use glam::DVec2;
use ms_foundation::error::{MsError, MsResult};
use ms_foundation::float::ValueRange;
use serde::{Deserialize, Serialize};

use crate::sample::{FieldPair, ScalarSource, VectorSource};

// ============================================================
// RGBA 颜色
// ============================================================

/// RGBA 颜色，分量范围 [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    /// 红
    pub r: f32,
    /// 绿
    pub g: f32,
    /// 蓝
    pub b: f32,
    /// 不透明度
    pub a: f32,
}

impl Rgba {
    /// 创建颜色
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建不透明颜色
    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// 颜色线性插值
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

// ============================================================
// 颜色源 trait
// ============================================================

/// 追踪器消费的颜色查询抽象
///
/// 坐标为归一化坐标，契约与采样 trait 一致。
pub trait ColorSource {
    /// 查询归一化坐标 `p` 处的颜色
    fn color(&self, p: DVec2) -> Rgba;
}

// ============================================================
// 颜色映射
// ============================================================

/// 渐变色带描述
///
/// 色标在 [0, 1] 上均匀分布。默认色带为深蓝→青→白的水体配色。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorMap {
    /// 渐变色标（至少两个）
    stops: Vec<Rgba>,
    /// 流速驱动的亮度比例，范围 [0, 1]
    ///
    /// 0 表示亮度与流速无关；0.4 表示静水区亮度压到 60%。
    speed_brightness: f32,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self {
            stops: vec![
                Rgba::opaque(0.05, 0.15, 0.45),
                Rgba::opaque(0.10, 0.45, 0.75),
                Rgba::opaque(0.35, 0.75, 0.85),
                Rgba::opaque(0.90, 0.97, 1.00),
            ],
            speed_brightness: 0.4,
        }
    }
}

impl ColorMap {
    /// 自定义色带
    ///
    /// # 错误
    ///
    /// 色标少于两个时返回 `InvalidConfig`。
    pub fn new(stops: Vec<Rgba>, speed_brightness: f32) -> MsResult<Self> {
        let map = Self {
            stops,
            speed_brightness,
        };
        map.validate()?;
        Ok(map)
    }

    fn validate(&self) -> MsResult<()> {
        if self.stops.len() < 2 {
            return Err(MsError::invalid_config(
                "stops",
                self.stops.len().to_string(),
                "渐变色带至少需要两个色标",
            ));
        }
        if !(0.0..=1.0).contains(&self.speed_brightness) {
            return Err(MsError::invalid_config(
                "speed_brightness",
                self.speed_brightness.to_string(),
                "必须在 [0, 1] 内",
            ));
        }
        Ok(())
    }

    /// 在色带上取值，`t ∈ [0, 1]`
    fn gradient(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let segments = (self.stops.len() - 1) as f32;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(self.stops.len() - 2);
        Rgba::lerp(self.stops[i], self.stops[i + 1], pos - i as f32)
    }

    /// 对场对做一次标定
    ///
    /// 扫描标量场的值范围与向量场的流速上限。每个场对在任何颜色查询
    /// 之前恰好标定一次；返回的 [`CalibratedColors`] 是后续查询的唯一
    /// 入口。
    pub fn calibrate(&self, fields: &FieldPair) -> MsResult<CalibratedColors> {
        self.validate()?;

        let mut scalar_range = ValueRange::from_sample(fields.scalar().as_slice()[0]);
        for &v in fields.scalar().iter() {
            scalar_range.include(v);
        }

        let mut speed_range = ValueRange::from_sample(0.0);
        for v in fields.vector().iter() {
            speed_range.include(v.length());
        }

        Ok(CalibratedColors {
            map: self.clone(),
            scalar_range,
            speed_range,
        })
    }
}

// ============================================================
// 标定结果
// ============================================================

/// 标定后的颜色查询状态
///
/// 持有一次扫描得到的归一化范围；只能由 [`ColorMap::calibrate`] 产生。
#[derive(Debug, Clone)]
pub struct CalibratedColors {
    map: ColorMap,
    scalar_range: ValueRange,
    speed_range: ValueRange,
}

impl CalibratedColors {
    /// 查询归一化坐标 `p` 处的颜色
    ///
    /// 标量值决定色带位置，流速调制亮度。`fields` 应当是标定时的同一
    /// 场对；换场对需要重新标定。
    pub fn color_at(&self, fields: &FieldPair, p: DVec2) -> Rgba {
        let t = self.scalar_range.normalize(fields.value(p)) as f32;
        let speed = self.speed_range.normalize(fields.velocity(p).length()) as f32;

        let base = self.map.gradient(t);
        let brightness = (1.0 - self.map.speed_brightness) + self.map.speed_brightness * speed;
        Rgba {
            r: base.r * brightness,
            g: base.g * brightness,
            b: base.b * brightness,
            a: 1.0,
        }
    }

    /// 标定得到的标量范围
    #[inline]
    pub fn scalar_range(&self) -> ValueRange {
        self.scalar_range
    }

    /// 标定得到的流速范围
    #[inline]
    pub fn speed_range(&self) -> ValueRange {
        self.speed_range
    }
}

// ============================================================
// 场对颜色适配器
// ============================================================

/// 将标定结果与场对绑定为 [`ColorSource`]
///
/// 追踪器只看到 trait，不关心标定细节。
#[derive(Debug, Clone, Copy)]
pub struct FieldColors<'a> {
    fields: &'a FieldPair,
    calibrated: &'a CalibratedColors,
}

impl<'a> FieldColors<'a> {
    /// 绑定场对与标定结果
    pub fn new(fields: &'a FieldPair, calibrated: &'a CalibratedColors) -> Self {
        Self { fields, calibrated }
    }
}

impl ColorSource for FieldColors<'_> {
    #[inline]
    fn color(&self, p: DVec2) -> Rgba {
        self.calibrated.color_at(self.fields, p)
    }
}
