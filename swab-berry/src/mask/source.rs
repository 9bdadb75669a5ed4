//! 掩膜输入源.

use super::LabelMask;
use crate::outline::{load_outlines, Outline, OutlineSet};
use crate::{OutlineError, OutlineResult};
use std::borrow::Cow;
use std::path::Path;

/// 细胞掩膜的输入源. 输入类型在边界处 (例如 [`MaskSource::open`]) 一次性确定.
#[derive(Clone, Debug, PartialEq)]
pub enum MaskSource {
    /// 已经提取好的轮廓集合, 通常来自 `.txt` 轮廓文件.
    Outlines(OutlineSet),

    /// 实例分割标签图, 通常来自 `.npy` 文件.
    Labels(LabelMask),
}

impl MaskSource {
    /// 根据扩展名打开文件: `.txt` 为轮廓文件, `.npy` 为标签图.
    ///
    /// 其它扩展名返回 `UnsupportedFormat`.
    pub fn open<P: AsRef<Path>>(path: P) -> OutlineResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("txt") => load_outlines(path).map(Self::Outlines),
            Some("npy") => LabelMask::load_npy(path).map(Self::Labels),
            _ => {
                log::error!("{} has incorrect file format", path.display());
                Err(OutlineError::UnsupportedFormat(path.to_owned()))
            }
        }
    }

    /// 细胞个数.
    pub fn count(&self) -> usize {
        match self {
            Self::Outlines(set) => set.len(),
            Self::Labels(mask) => mask.count(),
        }
    }

    /// 轮廓集合. 标签图会在此时被追踪为轮廓.
    pub fn outlines(&self) -> Cow<'_, [Outline]> {
        match self {
            Self::Outlines(set) => Cow::Borrowed(set.as_slice()),
            Self::Labels(mask) => Cow::Owned(mask.outlines()),
        }
    }
}

impl From<OutlineSet> for MaskSource {
    #[inline]
    fn from(set: OutlineSet) -> Self {
        Self::Outlines(set)
    }
}

impl From<LabelMask> for MaskSource {
    #[inline]
    fn from(mask: LabelMask) -> Self {
        Self::Labels(mask)
    }
}
