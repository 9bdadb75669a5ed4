//! 对 `swab-berry::dataset` 的更一层封装. 提供更直接的轮廓数据加载器.

use std::env;
use std::path::{Path, PathBuf};
use swab_berry::dataset::{self, OutlineLoader};
use swab_berry::OutlineResult;

/// 获取轮廓文件目录.
///
/// 1. 若环境变量 `$SWAB_OUTLINE_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/swab/outlines`.
///
/// 两者都无法确定时返回 `None`.
pub fn outline_dir_from_env_or_home() -> Option<PathBuf> {
    match env::var("SWAB_OUTLINE_DIR") {
        Ok(d) if !d.is_empty() => Some(PathBuf::from(d)),
        _ => dataset::home_dataset_dir_with(["swab", "outlines"]),
    }
}

/// 获取输出目录.
///
/// 1. 若环境变量 `$SWAB_OUTPUT_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `{input}/smoothed`.
pub fn output_dir_from_env_or<P: AsRef<Path>>(input: P) -> PathBuf {
    match env::var("SWAB_OUTPUT_DIR") {
        Ok(d) if !d.is_empty() => PathBuf::from(d),
        _ => input.as_ref().join("smoothed"),
    }
}

/// 获取可选的原图目录 `$SWAB_IMAGE_DIR`. 设置后, 批处理会额外输出掩膜叠加图.
pub fn image_dir_from_env() -> Option<PathBuf> {
    env::var("SWAB_IMAGE_DIR")
        .ok()
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
}

/// 获取轮廓文件加载器.
#[inline]
pub fn outline_loader<P: AsRef<Path>>(path: P) -> OutlineResult<OutlineLoader> {
    dataset::outline_loader(path)
}
