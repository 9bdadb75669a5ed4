//! 实例分割标签掩膜.
//!
//! 掩膜是一个二维标签图, 每个像素要么是背景 (`0`), 要么是某个细胞实例的编号.
//! 本模块负责把掩膜转换为轮廓集合, 以及对掩膜或轮廓文件进行细胞计数.

mod count;
mod source;
mod trace;

use crate::consts::label::is_object;
use crate::outline::{Outline, OutlineSet};
use crate::{Idx2d, OutlineError, OutlineResult};
use ndarray::Array2;
use ndarray_npy::ReadNpyError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub use count::{CellCount, CellCounter};
pub use source::MaskSource;

/// 实例分割标签掩膜, 形状为 `(h, w)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelMask(Array2<u32>);

impl LabelMask {
    /// 包装一个标签数组.
    #[inline]
    pub fn new(labels: Array2<u32>) -> Self {
        Self(labels)
    }

    /// 从行优先的扁平数据构建. 长度与 `(height, width)` 不匹配时返回 `MalformedInput`.
    pub fn from_shape_vec(height: usize, width: usize, data: Vec<u32>) -> OutlineResult<Self> {
        Array2::from_shape_vec((height, width), data)
            .map(Self)
            .map_err(|e| OutlineError::malformed(None, format!("bad mask shape: {e}")))
    }

    /// 从二维 `.npy` 文件加载标签图.
    ///
    /// 支持 `uint32`, `uint16`, `uint8`, `int32`, `int64` 元素类型. 有符号类型中出现负数时返回
    /// `MalformedInput`.
    pub fn load_npy<P: AsRef<Path>>(path: P) -> OutlineResult<Self> {
        let path = path.as_ref();
        macro_rules! try_unsigned {
            ($($t: ty),+) => {
                $(
                    match ndarray_npy::read_npy::<_, Array2<$t>>(path) {
                        Ok(a) => return Ok(Self(a.mapv(u32::from))),
                        Err(ReadNpyError::WrongDescriptor(_)) => {}
                        Err(e) => return Err(e.into()),
                    }
                )+
            };
        }
        macro_rules! try_signed {
            ($($t: ty),+) => {
                $(
                    match ndarray_npy::read_npy::<_, Array2<$t>>(path) {
                        Ok(a) => {
                            let mut out = Array2::<u32>::zeros(a.raw_dim());
                            for (dst, &src) in out.iter_mut().zip(a.iter()) {
                                *dst = u32::try_from(src).map_err(|_| {
                                    OutlineError::malformed(None, format!("invalid label value {src}"))
                                })?;
                            }
                            return Ok(Self(out));
                        }
                        Err(ReadNpyError::WrongDescriptor(_)) => {}
                        Err(e) => return Err(e.into()),
                    }
                )+
            };
        }

        try_unsigned!(u32, u16, u8);
        try_signed!(i32, i64);
        Err(OutlineError::malformed(
            None,
            format!("`{}` has an unsupported element type", path.display()),
        ))
    }

    /// 底层标签数组.
    #[inline]
    pub fn labels(&self) -> &Array2<u32> {
        &self.0
    }

    /// `(h, w)`.
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.0.dim()
    }

    /// 出现过的所有非背景标签, 升序.
    pub fn objects(&self) -> BTreeSet<u32> {
        self.0.iter().copied().filter(|&p| is_object(p)).collect()
    }

    /// 细胞 (非背景实例) 个数.
    #[inline]
    pub fn count(&self) -> usize {
        self.objects().len()
    }

    /// 每个实例的像素个数.
    pub fn pixel_areas(&self) -> BTreeMap<u32, usize> {
        let mut ans = BTreeMap::new();
        for &p in self.0.iter().filter(|&&p| is_object(p)) {
            *ans.entry(p).or_insert(0) += 1;
        }
        ans
    }

    /// 提取每个实例的外轮廓, 按标签升序排列.
    ///
    /// 轮廓坐标为 `(x, y) = (列, 行)`, 按 8-邻接顺时针 (图像坐标系下) 排列.
    ///
    /// # 注意
    ///
    /// 如果一个标签由多个不连通的部分组成, 只追踪按行优先扫描时遇到的第一个部分.
    pub fn outlines(&self) -> OutlineSet {
        // 每个标签的第一个像素 (行优先) 必然位于外边界上.
        let mut seeds: BTreeMap<u32, Idx2d> = BTreeMap::new();
        for (pos, &p) in self.0.indexed_iter() {
            if is_object(p) {
                seeds.entry(p).or_insert(pos);
            }
        }
        seeds
            .into_iter()
            .map(|(label, seed)| {
                Outline::from_points(
                    trace::moore_boundary(&self.0, label, seed)
                        .into_iter()
                        .map(|(h, w)| (w as i64, h as i64)),
                )
            })
            .collect()
    }
}

impl From<Array2<u32>> for LabelMask {
    #[inline]
    fn from(labels: Array2<u32>) -> Self {
        Self(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    pub(super) fn two_cells() -> LabelMask {
        LabelMask::new(array![
            [1, 1, 0, 0],
            [1, 1, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 2],
        ])
    }

    #[test]
    fn test_count() {
        assert_eq!(two_cells().count(), 2);
        assert_eq!(LabelMask::new(Array2::zeros((3, 3))).count(), 0);
    }

    #[test]
    fn test_pixel_areas() {
        let areas = two_cells().pixel_areas();
        assert_eq!(areas.get(&1), Some(&4));
        assert_eq!(areas.get(&2), Some(&1));
    }

    #[test]
    fn test_outlines() {
        let outlines = two_cells().outlines();
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[0].as_flat(), &[0, 0, 1, 0, 1, 1, 0, 1]);
        assert_eq!(outlines[1].as_flat(), &[3, 3]);
    }

    #[test]
    fn test_from_shape_vec() {
        assert!(LabelMask::from_shape_vec(2, 2, vec![0, 1, 1, 0]).is_ok());
        assert!(LabelMask::from_shape_vec(2, 2, vec![0, 1, 1])
            .unwrap_err()
            .is_malformed_input());
    }

    #[test]
    fn test_npy_round_trip() {
        let dir = std::env::temp_dir();
        let p32 = dir.join(format!("swab-berry-mask-u32-{}.npy", std::process::id()));
        let p64 = dir.join(format!("swab-berry-mask-i64-{}.npy", std::process::id()));

        ndarray_npy::write_npy(&p32, two_cells().labels()).unwrap();
        assert_eq!(LabelMask::load_npy(&p32).unwrap(), two_cells());

        let signed = two_cells().labels().mapv(i64::from);
        ndarray_npy::write_npy(&p64, &signed).unwrap();
        assert_eq!(LabelMask::load_npy(&p64).unwrap(), two_cells());

        std::fs::remove_file(&p32).unwrap();
        std::fs::remove_file(&p64).unwrap();
    }

    #[test]
    fn test_npy_missing_file() {
        assert!(matches!(
            LabelMask::load_npy("/definitely/not/here.npy").unwrap_err(),
            OutlineError::Npy(_)
        ));
    }
}
