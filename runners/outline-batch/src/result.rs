//! 批处理结果.

use std::io::{self, Write};
use std::path::PathBuf;
use swab_berry::shape::{ShapeSummary, Stat};

/// 单个文件的处理结果.
#[derive(Debug)]
pub struct FileReport {
    /// 原始轮廓的形状统计.
    pub summary: ShapeSummary,

    /// 平滑缩放后的轮廓保存位置.
    pub saved_to: PathBuf,

    /// 叠加图保存位置 (若有).
    pub overlay: Option<PathBuf>,
}

/// 将 `report` 的结果写进 `w` 中.
fn describe_into<W: Write>(name: &str, report: &FileReport, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    #[inline]
    fn stat_to_display(s: Option<Stat>) -> String {
        match s {
            Some(s) => format!("{:.4} (min {:.4}, max {:.4})", s.mean, s.min, s.max),
            None => "/".to_string(),
        }
    }

    let s = &report.summary;
    writeln!(w, "Outlines `{name}`:")?;
    writeln!(w, "{S4}Cells: {} ({} measurable)", s.count, s.valid)?;
    writeln!(w, "{S4}Area: {}", stat_to_display(s.area))?;
    writeln!(w, "{S4}Convexity: {}", stat_to_display(s.convexity))?;
    writeln!(w, "{S4}Solidity: {}", stat_to_display(s.solidity))?;
    writeln!(w, "{S4}Roundness: {}", stat_to_display(s.roundness))?;
    if let Some(p) = &report.overlay {
        writeln!(w, "{S4}Overlay: {}", p.display())?;
    }
    write!(w, "{S4}Saved to {}", report.saved_to.display())?;
    Ok(())
}

/// 批处理最终结果.
pub struct BatchResult {
    data: Vec<(String, Result<FileReport, String>)>,
}

impl BatchResult {
    pub fn new(data: Vec<(String, Result<FileReport, String>)>) -> Self {
        Self { data }
    }

    /// 失败的文件数.
    pub fn failed(&self) -> usize {
        self.data.iter().filter(|(_, r)| r.is_err()).count()
    }

    /// 输出运行结果.
    pub fn analyze(&self) {
        utils::sep();
        let mut buf = Vec::with_capacity(512);

        for (name, report) in self.data.iter() {
            match report {
                Ok(report) => {
                    if describe_into(name, report, &mut buf).is_ok() {
                        println!("{}", String::from_utf8_lossy(&buf));
                    }
                }
                Err(e) => println!("Outlines `{name}` failed: {e}"),
            }
            buf.clear();

            utils::sep();
        }
        let total: usize = self
            .data
            .iter()
            .filter_map(|(_, r)| r.as_ref().ok())
            .map(|r| r.summary.count)
            .sum();
        println!(
            "{} files, {} failed, {} cells in total",
            self.data.len(),
            self.failed(),
            total
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swab_berry::outline::Outline;

    #[test]
    fn test_describe_into() {
        let outlines = vec![Outline::new(vec![0, 0, 4, 0, 4, 4, 0, 4]).unwrap()];
        let report = FileReport {
            summary: ShapeSummary::from_outlines(&outlines),
            saved_to: PathBuf::from("/tmp/out/a.txt"),
            overlay: None,
        };
        let mut buf = Vec::new();
        describe_into("a.txt", &report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Outlines `a.txt`:"));
        assert!(text.contains("Cells: 1 (1 measurable)"));
        assert!(text.contains("Solidity: 1.0000"));
        assert!(text.ends_with("Saved to /tmp/out/a.txt"));
    }

    #[test]
    fn test_failed_count() {
        let r = BatchResult::new(vec![("x.txt".to_string(), Err("bad".to_string()))]);
        assert_eq!(r.failed(), 1);
    }
}
