//! 通用常量.

/// 上皮细胞的典型直径 (单位: 微米).
pub const EPITHELIAL_CELL_DIAMETER_UM: f64 = 60.0;

/// 滑动平均的默认窗口长度.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// 迭代缩放的默认总倍率.
pub const DEFAULT_TOTAL_FACTOR: u32 = 8;

/// 迭代缩放的默认单步倍率.
pub const DEFAULT_STEP_FACTOR: u32 = 2;

/// 标签掩膜相关常量.
pub mod label {
    /// 标签掩膜中背景的像素值.
    pub const BACKGROUND: u32 = 0;

    /// 像素是否是背景?
    #[inline]
    pub const fn is_background(p: u32) -> bool {
        p == BACKGROUND
    }

    /// 像素是否属于某个细胞实例?
    #[inline]
    pub const fn is_object(p: u32) -> bool {
        !is_background(p)
    }
}

/// 三通道颜色.
pub mod rgb {
    /// 绘制掩膜填充的默认颜色 (偏红).
    pub const MASK_RED: [u8; 3] = [255, 55, 55];

    /// 黑色.
    pub const BLACK: [u8; 3] = [0, 0, 0];

    /// 白色.
    pub const WHITE: [u8; 3] = [255, 255, 255];
}

/// 细胞类别.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// 上皮细胞.
    Epithelial,

    /// 免疫细胞.
    Immune,
}

impl CellKind {
    /// 导出 WKT 表格时使用的对象名称.
    #[inline]
    pub const fn object_name(&self) -> &'static str {
        match self {
            Self::Epithelial => "Epithelial cell",
            Self::Immune => "Immune cell",
        }
    }
}
