//! 数据集操作.
//!
//! 提供迭代器风格的轮廓文件加载.

use crate::outline::{load_outlines, OutlineSet};
use crate::{OutlineError, OutlineResult};
use std::path::{Path, PathBuf};

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}

/// 列出目录 `dir` 下所有扩展名为 `ext` 的文件, 按文件名排序.
pub fn list_with_extension<P: AsRef<Path>>(dir: P, ext: &str) -> OutlineResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut ans = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| OutlineError::io(dir, e))? {
        let path = entry.map_err(|e| OutlineError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            ans.push(path);
        }
    }
    ans.sort();
    Ok(ans)
}

/// 从目录 `dir` 创建 `.txt` 轮廓文件加载器.
///
/// 目录无法读取时返回 `Io`. 单个文件的错误会在迭代时返回, 不影响其它文件.
pub fn outline_loader<P: AsRef<Path>>(dir: P) -> OutlineResult<OutlineLoader> {
    let mut files = list_with_extension(dir, "txt")?;
    files.reverse();
    Ok(OutlineLoader { files_rev: files })
}

/// 轮廓文件加载器. 每次迭代返回文件路径及其加载结果.
#[derive(Debug)]
pub struct OutlineLoader {
    files_rev: Vec<PathBuf>,
}

impl Iterator for OutlineLoader {
    type Item = (PathBuf, OutlineResult<OutlineSet>);

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files_rev.pop()?;
        let data = load_outlines(&path);
        Some((path, data))
    }
}

impl ExactSizeIterator for OutlineLoader {
    #[inline]
    fn len(&self) -> usize {
        self.files_rev.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{save_outlines, Outline};

    #[test]
    fn test_outline_loader() {
        let dir = std::env::temp_dir().join(format!("swab-berry-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let good = vec![Outline::new(vec![0, 0, 3, 0, 3, 3]).unwrap()];
        save_outlines(dir.join("a.txt"), &good).unwrap();
        std::fs::write(dir.join("b.txt"), "1,2,oops\n").unwrap();
        std::fs::write(dir.join("c.npy"), b"ignored").unwrap();

        let mut loader = outline_loader(&dir).unwrap();
        assert_eq!(loader.len(), 2);
        let (p, r) = loader.next().unwrap();
        assert!(p.ends_with("a.txt"));
        assert_eq!(r.unwrap(), good);
        let (p, r) = loader.next().unwrap();
        assert!(p.ends_with("b.txt"));
        assert!(r.unwrap_err().is_malformed_input());
        assert!(loader.next().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_dir() {
        assert!(outline_loader("/definitely/not/a/dir").is_err());
    }
}
