//! 多边形几何与细胞形状描述子.
//!
//! 描述子定义:
//!
//! - 凸性 (convexity) = 凸包周长 / 周长
//! - 坚实度 (solidity) = 面积 / 凸包面积
//! - 圆度 (roundness) = 4π · 面积 / 凸包周长²

mod hull;
mod summary;

use crate::outline::Polygon;
use crate::Point;

pub use summary::{ShapeSummary, Stat};

/// 两点之间的欧几里得距离.
#[inline]
fn distance((x1, y1): Point, (x2, y2): Point) -> f64 {
    (((x1 - x2) as f64).powi(2) + ((y1 - y2) as f64).powi(2)).sqrt()
}

impl Polygon {
    /// 鞋带公式计算的有向面积. 首尾隐式相连.
    ///
    /// 在自然坐标系下, 逆时针为正, 顺时针为负.
    pub fn signed_area(&self) -> f64 {
        if self.len() < 3 {
            return 0.0;
        }
        // 鞋带公式
        let twice: i64 = self.edges().map(|((x1, y1), (x2, y2))| x1 * y2 - x2 * y1).sum();
        twice as f64 / 2.0
    }

    /// 面积 (绝对值).
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// 判断首尾相连的简单多边形是否是以顺时针连接的.
    ///
    /// # 注意
    ///
    /// 1. 多边形少于 3 个顶点时返回 `false`.
    /// 2. 图形必须是简单多边形, 否则结果无意义.
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// 闭合周长.
    pub fn perimeter(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }
        self.edges().map(|(a, b)| distance(a, b)).sum()
    }

    /// 凸包 (逆时针, 不含共线点).
    #[inline]
    pub fn convex_hull(&self) -> Polygon {
        Polygon(hull::monotone_chain(self.points()))
    }

    /// 计算全部形状描述子. 退化多边形 (少于 3 个顶点, 面积或周长为 0) 返回 `None`.
    pub fn descriptors(&self) -> Option<Descriptors> {
        if self.len() < 3 {
            return None;
        }
        let area = self.area();
        let perimeter = self.perimeter();
        if area <= 0.0 || perimeter <= 0.0 {
            return None;
        }
        let hull = self.convex_hull();
        let hull_area = hull.area();
        let hull_perimeter = hull.perimeter();
        debug_assert!(hull_area > 0.0 && hull_perimeter > 0.0);

        Some(Descriptors {
            area,
            perimeter,
            convexity: hull_perimeter / perimeter,
            solidity: area / hull_area,
            roundness: 4.0 * std::f64::consts::PI * area / hull_perimeter.powi(2),
        })
    }
}

/// 单个细胞的形状描述子.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Descriptors {
    /// 面积 (像素²).
    pub area: f64,

    /// 周长 (像素).
    pub perimeter: f64,

    /// 凸性, 取值 `(0, 1]`.
    pub convexity: f64,

    /// 坚实度, 取值 `(0, 1]`.
    pub solidity: f64,

    /// 圆度, 圆为 1.
    pub roundness: f64,
}
