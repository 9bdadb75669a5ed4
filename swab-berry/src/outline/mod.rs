//! 分割轮廓的数据模型与后处理.
//!
//! 一个轮廓 ([`Outline`]) 是一个首尾相连的多边形边界, 以交错的扁平整数序列
//! `[x0, y0, x1, y1, ..., xn, yn]` 存储. 一次分割运行产生一个有序的轮廓集合
//! ([`OutlineSet`]), 轮廓在集合中的位置即其身份, 集合从不重新排序.

mod io;
mod smooth;
mod transform;

use crate::{Coord, OutlineError, OutlineResult, Point, PointF};
use itertools::Itertools;

pub use io::{load_outlines, parse_outlines, read_outlines, save_outlines, to_wkt, wkt_rows};
pub use io::{write_outlines, WktRow};
pub use smooth::{moving_average, smooth, smooth_all};
pub use transform::{filter_to_region, iterative_scale_smooth, scale, scale_all, scale_int};
pub use transform::{IterativeSpec, Region};

/// 轮廓集合. 轮廓的身份是它在集合中的位置.
pub type OutlineSet = Vec<Outline>;

/// 交错存储的整数轮廓 `[x0, y0, x1, y1, ...]`.
///
/// 长度总是偶数. 一个有效多边形至少需要 3 个点, 但这里不强制检查.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outline(Vec<Coord>);

impl Outline {
    /// 从扁平交错序列构建轮廓. 如果长度为奇数则返回 `MalformedInput`.
    pub fn new(flat: Vec<Coord>) -> OutlineResult<Self> {
        if flat.len() % 2 != 0 {
            return Err(OutlineError::malformed(
                None,
                format!("odd-length coordinate sequence ({} values)", flat.len()),
            ));
        }
        Ok(Self(flat))
    }

    /// 从一组 `(x, y)` 点构建轮廓.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        Self(points.into_iter().flat_map(|(x, y)| [x, y]).collect())
    }

    /// 扁平交错序列.
    #[inline]
    pub fn as_flat(&self) -> &[Coord] {
        self.0.as_slice()
    }

    /// 消费自我, 获得底层扁平序列.
    #[inline]
    pub fn into_flat(self) -> Vec<Coord> {
        self.0
    }

    /// 点的个数 (即扁平序列长度的一半).
    #[inline]
    pub fn point_len(&self) -> usize {
        self.0.len() / 2
    }

    /// 是否不包含任何点.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(x, y)` 点迭代器.
    #[inline]
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().copied().tuples()
    }

    /// x 坐标子序列.
    #[inline]
    pub fn xs(&self) -> impl Iterator<Item = Coord> + '_ {
        self.0.iter().copied().step_by(2)
    }

    /// y 坐标子序列.
    #[inline]
    pub fn ys(&self) -> impl Iterator<Item = Coord> + '_ {
        self.0.iter().copied().skip(1).step_by(2)
    }

    /// 转换为点对形式的多边形.
    #[inline]
    pub fn to_polygon(&self) -> Polygon {
        Polygon(self.points().collect())
    }
}

impl TryFrom<Vec<Coord>> for Outline {
    type Error = OutlineError;

    #[inline]
    fn try_from(flat: Vec<Coord>) -> OutlineResult<Self> {
        Self::new(flat)
    }
}

/// 平滑 (或非整数缩放) 之后的浮点轮廓, 布局与 [`Outline`] 相同.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothedOutline(Vec<f64>);

impl SmoothedOutline {
    /// 从扁平交错序列构建. 如果长度为奇数则返回 `MalformedInput`.
    pub fn new(flat: Vec<f64>) -> OutlineResult<Self> {
        if flat.len() % 2 != 0 {
            return Err(OutlineError::malformed(
                None,
                format!("odd-length coordinate sequence ({} values)", flat.len()),
            ));
        }
        Ok(Self(flat))
    }

    /// 扁平交错序列.
    #[inline]
    pub fn as_flat(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// 点的个数.
    #[inline]
    pub fn point_len(&self) -> usize {
        self.0.len() / 2
    }

    /// `(x, y)` 点迭代器.
    #[inline]
    pub fn points(&self) -> impl Iterator<Item = PointF> + '_ {
        self.0.iter().copied().tuples()
    }

    /// 向零截断为整数轮廓. 这是绘制多边形时下游通常采用的策略.
    pub fn truncate(&self) -> Outline {
        Outline(self.0.iter().map(|&v| v as Coord).collect())
    }

    /// 四舍五入为整数轮廓.
    pub fn round(&self) -> Outline {
        Outline(self.0.iter().map(|&v| v.round() as Coord).collect())
    }
}

impl From<&Outline> for SmoothedOutline {
    #[inline]
    fn from(outline: &Outline) -> Self {
        Self(outline.0.iter().map(|&v| v as f64).collect())
    }
}

/// 点对形式的多边形 (首尾隐式相连), 仅用于绘制与几何计算, 不做持久化.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon(pub(crate) Vec<Point>);

impl Polygon {
    /// 从顶点构建.
    #[inline]
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// 顶点.
    #[inline]
    pub fn points(&self) -> &[Point] {
        self.0.as_slice()
    }

    /// 顶点个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 是否没有顶点.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 首尾相连的边 `(a, b)` 迭代器.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.0
            .iter()
            .copied()
            .zip(self.0.iter().copied().cycle().skip(1))
    }
}

impl From<&Outline> for Polygon {
    #[inline]
    fn from(outline: &Outline) -> Self {
        outline.to_polygon()
    }
}

/// 将整个轮廓集合转换为多边形列表, 保持顺序.
pub fn polygons(outlines: &[Outline]) -> Vec<Polygon> {
    outlines.iter().map(Outline::to_polygon).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_odd_length() {
        let e = Outline::new(vec![1, 2, 3]).unwrap_err();
        assert!(e.is_malformed_input());
        assert!(Outline::new(vec![]).is_ok());
    }

    #[test]
    fn test_outline_views() {
        let o = Outline::new(vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(o.point_len(), 3);
        assert_eq!(o.xs().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(o.ys().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(o.points().collect::<Vec<_>>(), vec![(0, 1), (2, 3), (4, 5)]);
        assert_eq!(Outline::from_points(o.points()), o);
    }

    #[test]
    fn test_polygon_edges_closed() {
        let p = Outline::new(vec![0, 0, 4, 0, 4, 4]).unwrap().to_polygon();
        let edges: Vec<_> = p.edges().collect();
        assert_eq!(
            edges,
            vec![((0, 0), (4, 0)), ((4, 0), (4, 4)), ((4, 4), (0, 0))]
        );
    }

    #[test]
    fn test_smoothed_truncate_and_round() {
        let s = SmoothedOutline::new(vec![1.7, -1.7, 2.5, 0.2]).unwrap();
        assert_eq!(s.truncate().as_flat(), &[1, -1, 2, 0]);
        assert_eq!(s.round().as_flat(), &[2, -2, 3, 0]);
    }
}
