//! 细胞计数.

use super::MaskSource;
use crate::{OutlineError, OutlineResult};

/// 上皮细胞与免疫细胞的计数结果. 未提供对应输入时为 `None`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCount {
    /// 上皮细胞个数.
    pub epithelial: Option<usize>,

    /// 免疫细胞个数.
    pub immune: Option<usize>,
}

impl CellCount {
    /// 免疫细胞占全部细胞的比例. 任一计数缺失或总数为 0 时返回 `None`.
    pub fn immune_ratio(&self) -> Option<f64> {
        let (e, i) = (self.epithelial?, self.immune?);
        let total = e + i;
        (total > 0).then(|| i as f64 / total as f64)
    }
}

/// 细胞计数器. 分别指定上皮细胞和免疫细胞的掩膜来源, 然后调用 [`CellCounter::count`].
#[derive(Copy, Clone, Debug, Default)]
pub struct CellCounter<'a> {
    epithelial: Option<&'a MaskSource>,
    immune: Option<&'a MaskSource>,
}

impl<'a> CellCounter<'a> {
    /// 初始化一个没有任何输入的计数器.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置上皮细胞掩膜来源.
    #[inline]
    pub fn epithelial(self, source: &'a MaskSource) -> Self {
        Self {
            epithelial: Some(source),
            ..self
        }
    }

    /// 设置免疫细胞掩膜来源.
    #[inline]
    pub fn immune(self, source: &'a MaskSource) -> Self {
        Self {
            immune: Some(source),
            ..self
        }
    }

    /// 计数. 两种来源都没有提供时返回 `InvalidArgument`.
    pub fn count(&self) -> OutlineResult<CellCount> {
        if self.epithelial.is_none() && self.immune.is_none() {
            return Err(OutlineError::invalid(
                "count_cells",
                "neither epithelial nor immune masks were given",
            ));
        }
        let ans = CellCount {
            epithelial: self.epithelial.map(MaskSource::count),
            immune: self.immune.map(MaskSource::count),
        };
        log::debug!("cell count: {ans:?}");
        Ok(ans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::tests::two_cells;
    use crate::outline::Outline;

    #[test]
    fn test_count_both() {
        let epi = MaskSource::from(two_cells());
        let imm = MaskSource::from(vec![Outline::new(vec![0, 0, 1, 0, 1, 1]).unwrap()]);
        let c = CellCounter::new().epithelial(&epi).immune(&imm).count().unwrap();
        assert_eq!(
            c,
            CellCount {
                epithelial: Some(2),
                immune: Some(1)
            }
        );
        assert!((c.immune_ratio().unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_count_single() {
        let epi = MaskSource::from(two_cells());
        let c = CellCounter::new().epithelial(&epi).count().unwrap();
        assert_eq!(c.epithelial, Some(2));
        assert_eq!(c.immune, None);
        assert_eq!(c.immune_ratio(), None);
    }

    #[test]
    fn test_count_nothing() {
        assert!(CellCounter::new().count().unwrap_err().is_invalid_argument());
    }
}
