//! 轮廓集合的形状统计.

use super::Descriptors;
use crate::outline::{Outline, Polygon};
use ordered_float::NotNan;

/// 单项统计量.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stat {
    /// 平均值.
    pub mean: f64,

    /// 最小值.
    pub min: f64,

    /// 最大值.
    pub max: f64,
}

impl Stat {
    /// 从一组有限值计算. 空输入或含 NaN 时返回 `None`.
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let checked: Vec<NotNan<f64>> = values
            .iter()
            .map(|&v| NotNan::new(v).ok())
            .collect::<Option<_>>()?;
        let min = checked.iter().min()?.into_inner();
        let max = checked.iter().max()?.into_inner();
        Some(Self {
            mean: values.iter().sum::<f64>() / values.len() as f64,
            min,
            max,
        })
    }
}

/// 一个轮廓集合的形状统计汇总.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeSummary {
    /// 轮廓总数.
    pub count: usize,

    /// 可计算描述子的 (非退化) 轮廓数.
    pub valid: usize,

    /// 面积.
    pub area: Option<Stat>,

    /// 凸性.
    pub convexity: Option<Stat>,

    /// 坚实度.
    pub solidity: Option<Stat>,

    /// 圆度.
    pub roundness: Option<Stat>,
}

impl ShapeSummary {
    /// 汇总多边形.
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let ds: Vec<Descriptors> = polygons.iter().filter_map(Polygon::descriptors).collect();
        if ds.len() < polygons.len() {
            log::debug!(
                "{} of {} polygons are degenerate",
                polygons.len() - ds.len(),
                polygons.len()
            );
        }
        let column = |f: fn(&Descriptors) -> f64| -> Option<Stat> {
            Stat::from_values(&ds.iter().map(f).collect::<Vec<_>>())
        };
        Self {
            count: polygons.len(),
            valid: ds.len(),
            area: column(|d| d.area),
            convexity: column(|d| d.convexity),
            solidity: column(|d| d.solidity),
            roundness: column(|d| d.roundness),
        }
    }

    /// 汇总轮廓集合.
    pub fn from_outlines(outlines: &[Outline]) -> Self {
        Self::from_polygons(&crate::outline::polygons(outlines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-8
    }

    #[test]
    fn test_summary() {
        let outlines = vec![
            Outline::new(vec![0, 0, 4, 0, 4, 4, 0, 4]).unwrap(),
            Outline::new(vec![0, 0, 2, 0, 2, 2, 0, 2]).unwrap(),
            Outline::new(vec![0, 0, 1, 1]).unwrap(),
        ];
        let s = ShapeSummary::from_outlines(&outlines);
        assert_eq!(s.count, 3);
        assert_eq!(s.valid, 2);
        let area = s.area.unwrap();
        assert!(f64_eq(area.mean, 10.0));
        assert!(f64_eq(area.min, 4.0));
        assert!(f64_eq(area.max, 16.0));
        assert!(f64_eq(s.solidity.unwrap().mean, 1.0));
    }

    #[test]
    fn test_empty_summary() {
        let s = ShapeSummary::from_outlines(&[]);
        assert_eq!(s, ShapeSummary::default());
    }
}
