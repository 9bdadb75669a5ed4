//! 轮廓的文本持久化存储.
//!
//! 文件格式: 每行一个轮廓, 交错坐标以逗号分隔 `x,y,x,y,...`, 无表头.

use super::{Outline, OutlineSet, Polygon};
use crate::consts::CellKind;
use crate::{Coord, OutlineError, OutlineResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// 解析一行文本为轮廓. `line_no` 从 1 开始, 仅用于报错.
///
/// 空行 (或只含空白的行) 是一个空轮廓, 它仍然占据集合中的一个位置.
fn parse_line(line: &str, line_no: usize) -> OutlineResult<Outline> {
    if line.trim().is_empty() {
        return Ok(Outline::default());
    }
    let flat = line
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<Coord>().map_err(|_| {
                OutlineError::malformed(Some(line_no), format!("`{token}` is not an integer"))
            })
        })
        .collect::<OutlineResult<Vec<_>>>()?;
    Outline::new(flat).map_err(|_| {
        OutlineError::malformed(Some(line_no), "odd number of coordinate values")
    })
}

/// 从文本解析轮廓集合. 每行一个轮廓, 空行解析为空轮廓.
///
/// 文件末尾的换行符只结束最后一行, 不产生额外的轮廓.
pub fn parse_outlines(text: &str) -> OutlineResult<OutlineSet> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}

/// 从 `reader` 读取轮廓集合. 规则同 [`parse_outlines`].
///
/// 底层读取错误以 `Io` 返回, 路径记为 `<reader>`.
pub fn read_outlines<R: BufRead>(reader: R) -> OutlineResult<OutlineSet> {
    let mut ans = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| OutlineError::io("<reader>", e))?;
        ans.push(parse_line(&line, idx + 1)?);
    }
    Ok(ans)
}

/// 从路径 `path` 加载轮廓集合.
pub fn load_outlines<P: AsRef<Path>>(path: P) -> OutlineResult<OutlineSet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| OutlineError::io(path, e))?;
    // 重新包装 I/O 错误, 让它带上真实路径.
    read_outlines(BufReader::new(file)).map_err(|e| match e {
        OutlineError::Io { source, .. } => OutlineError::io(path, source),
        other => other,
    })
}

/// 将轮廓集合写入 `w`, 每个轮廓一行.
pub fn write_outlines<W: Write>(mut w: W, outlines: &[Outline]) -> std::io::Result<()> {
    for o in outlines {
        let mut first = true;
        for v in o.as_flat() {
            if first {
                first = false;
            } else {
                w.write_all(b",")?;
            }
            write!(w, "{v}")?;
        }
        w.write_all(b"\n")?;
    }
    w.flush()
}

/// 将轮廓集合保存到路径 `path`. 文件会被覆盖.
pub fn save_outlines<P: AsRef<Path>>(path: P, outlines: &[Outline]) -> OutlineResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| OutlineError::io(path, e))?;
    write_outlines(BufWriter::new(file), outlines).map_err(|e| OutlineError::io(path, e))
}

/// 多边形的 WKT 表示 `Polygon ((x0 y0, x1 y1, ..., x0 y0))`.
///
/// 空多边形得到 `Polygon EMPTY`.
pub fn to_wkt(polygon: &Polygon) -> String {
    let Some(&(fx, fy)) = polygon.points().first() else {
        return "Polygon EMPTY".to_string();
    };
    let mut s = String::from("Polygon ((");
    for &(x, y) in polygon.points() {
        s.push_str(&format!("{x} {y}, "));
    }
    s.push_str(&format!("{fx} {fy}))"));
    s
}

/// 导出表格中的一行: WKT 多边形, 对象名称, 以及从 1 开始的对象编号.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WktRow {
    /// WKT 多边形.
    pub polygon: String,

    /// 对象名称.
    pub name: &'static str,

    /// 对象编号 (从 1 开始).
    pub object: usize,
}

/// 将轮廓集合导出为 WKT 表格.
pub fn wkt_rows(outlines: &[Outline], kind: CellKind) -> Vec<WktRow> {
    outlines
        .iter()
        .enumerate()
        .map(|(i, o)| WktRow {
            polygon: to_wkt(&o.to_polygon()),
            name: kind.object_name(),
            object: i + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> OutlineSet {
        vec![
            Outline::new(vec![0, 0, 4, 0, 4, 4, 0, 4]).unwrap(),
            Outline::new(vec![-3, 12, 7, 120, 1034, 5]).unwrap(),
            Outline::new(vec![]).unwrap(),
        ]
    }

    #[test]
    fn test_round_trip_in_memory() {
        let set = sample();
        let mut buf = Vec::new();
        write_outlines(&mut buf, &set).unwrap();
        assert_eq!(
            std::str::from_utf8(&buf).unwrap(),
            "0,0,4,0,4,4,0,4\n-3,12,7,120,1034,5\n\n"
        );
        let back = read_outlines(Cursor::new(buf)).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_empty_outline_keeps_position() {
        let set = vec![
            Outline::new(vec![0, 0, 4, 0, 4, 4]).unwrap(),
            Outline::default(),
            Outline::new(vec![9, 9, 8, 8, 7, 7]).unwrap(),
        ];
        let mut buf = Vec::new();
        write_outlines(&mut buf, &set).unwrap();
        let back = parse_outlines(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(back, set);
        assert_eq!(back[2].as_flat(), &[9, 9, 8, 8, 7, 7]);

        // 只有一个空轮廓的集合
        let single = vec![Outline::default()];
        let mut buf = Vec::new();
        write_outlines(&mut buf, &single).unwrap();
        assert_eq!(buf, b"\n");
        assert_eq!(parse_outlines("\n").unwrap(), single);
        assert!(parse_outlines("").unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_file() {
        let set = sample();
        let path = std::env::temp_dir().join(format!("swab-berry-io-{}.txt", std::process::id()));
        save_outlines(&path, &set).unwrap();
        let back = load_outlines(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_parse_whitespace_and_blank_lines() {
        let set = parse_outlines("1, 2 ,3,4\n\n  \n5,6,7,8,9,10\r\n").unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set[0].as_flat(), &[1, 2, 3, 4]);
        assert!(set[1].is_empty());
        assert!(set[2].is_empty());
        assert_eq!(set[3].as_flat(), &[5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_parse_errors_carry_line() {
        match parse_outlines("1,2,3,4\n1,x,3,4\n").unwrap_err() {
            OutlineError::MalformedInput { line, .. } => assert_eq!(line, Some(2)),
            e => panic!("unexpected error {e}"),
        }
        match parse_outlines("1,2,3\n").unwrap_err() {
            OutlineError::MalformedInput { line, .. } => assert_eq!(line, Some(1)),
            e => panic!("unexpected error {e}"),
        }
        // 小数不会被悄悄截断.
        assert!(parse_outlines("1.5,2\n").unwrap_err().is_malformed_input());
    }

    #[test]
    fn test_missing_file() {
        let e = load_outlines("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(e, OutlineError::Io { .. }));
        assert!(e.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_wkt() {
        let p = Outline::new(vec![0, 0, 4, 0, 4, 4]).unwrap().to_polygon();
        assert_eq!(to_wkt(&p), "Polygon ((0 0, 4 0, 4 4, 0 0))");
        assert_eq!(to_wkt(&Polygon::default()), "Polygon EMPTY");

        let rows = wkt_rows(&sample()[..2], CellKind::Epithelial);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].object, 2);
        assert_eq!(rows[0].name, "Epithelial cell");
    }
}
