//! 全切片图像 (WSI) 金字塔元数据.
//!
//! 图像解码由外部负责, 这里只根据层级尺寸和降采样倍率计算缩放参数,
//! 例如分割模型所需的细胞直径 (像素).

use crate::consts::EPITHELIAL_CELL_DIAMETER_UM;
use crate::{OutlineError, OutlineResult};

/// 金字塔中的一个层级.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PyramidLevel {
    /// 宽 (像素).
    pub width: u32,

    /// 高 (像素).
    pub height: u32,

    /// 相对第 0 层的降采样倍率.
    pub downsample: f64,
}

/// 切片元数据: 每像素微米数 (mpp) 和各层级.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideMeta {
    mpp_x: f64,
    mpp_y: f64,
    levels: Vec<PyramidLevel>,
}

impl SlideMeta {
    /// 构建元数据.
    ///
    /// `levels` 不能为空, 且降采样倍率必须为正并按层级递增;
    /// `mpp_x`, `mpp_y` 必须为正有限值. 否则返回 `InvalidArgument`.
    pub fn new(mpp_x: f64, mpp_y: f64, levels: Vec<PyramidLevel>) -> OutlineResult<Self> {
        const OP: &str = "SlideMeta::new";
        if !(mpp_x.is_finite() && mpp_x > 0.0 && mpp_y.is_finite() && mpp_y > 0.0) {
            return Err(OutlineError::invalid(
                OP,
                format!("microns per pixel must be positive, got ({mpp_x}, {mpp_y})"),
            ));
        }
        if levels.is_empty() {
            return Err(OutlineError::invalid(OP, "slide has no pyramid levels"));
        }
        if levels.iter().any(|l| !(l.downsample.is_finite() && l.downsample > 0.0)) {
            return Err(OutlineError::invalid(OP, "downsample factors must be positive"));
        }
        if levels.windows(2).any(|w| w[0].downsample > w[1].downsample) {
            return Err(OutlineError::invalid(OP, "downsample factors must be increasing"));
        }
        Ok(Self {
            mpp_x,
            mpp_y,
            levels,
        })
    }

    /// 所有层级.
    #[inline]
    pub fn levels(&self) -> &[PyramidLevel] {
        self.levels.as_slice()
    }

    /// 平均每像素微米数.
    #[inline]
    pub fn mean_mpp(&self) -> f64 {
        (self.mpp_x + self.mpp_y) / 2.0
    }

    /// 降采样倍率不超过 `factor` 的最深层级的索引. 没有这样的层级时返回 0.
    pub fn best_level_for_downsample(&self, factor: f64) -> usize {
        self.levels
            .iter()
            .rposition(|l| l.downsample <= factor)
            .unwrap_or(0)
    }

    /// 计算在降采样 `factor` 之后, 细胞直径对应的像素数.
    ///
    /// - 给定 `cell_diameter` 时, 它被视为第 0 层上的像素直径, 结果为 `cell_diameter / factor`;
    /// - 否则以 [`EPITHELIAL_CELL_DIAMETER_UM`] 微米为准, 按 mpp 换算成像素,
    ///   再除以所选层级的实际降采样倍率.
    ///
    /// 返回 `(层级索引, 像素直径)`. `factor` 必须为正, 否则返回 `InvalidArgument`.
    pub fn cell_diameter_pixels(
        &self,
        factor: f64,
        cell_diameter: Option<f64>,
    ) -> OutlineResult<(usize, f64)> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(OutlineError::invalid(
                "cell_diameter_pixels",
                format!("downsample factor must be positive, got {factor}"),
            ));
        }
        let level = self.best_level_for_downsample(factor);
        let diameter = match cell_diameter {
            Some(d) => d / factor,
            None => {
                EPITHELIAL_CELL_DIAMETER_UM / self.mean_mpp() / self.levels[level].downsample
            }
        };
        Ok((level, diameter))
    }
}
