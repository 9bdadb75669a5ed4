//! 循环滑动平均平滑.

use super::{Outline, SmoothedOutline};
use crate::{OutlineError, OutlineResult};
use itertools::izip;
use num::traits::AsPrimitive;

/// 对数值序列做首尾相接的滑动平均.
///
/// 序列被视为环: 第 `i` 个结果是从 `i` 开始的 `window` 个连续元素的算术平均,
/// 越过末尾后从头继续. 结果长度与输入相同, 空输入得到空输出.
///
/// `window` 为 0 时返回 `InvalidArgument`.
pub fn moving_average<T: AsPrimitive<f64>>(values: &[T], window: usize) -> OutlineResult<Vec<f64>> {
    check_window("moving_average", window)?;
    let len = values.len();
    let denom = window as f64;
    Ok((0..len)
        .map(|i| {
            (i..i + window)
                .map(|k| values[k % len].as_())
                .sum::<f64>()
                / denom
        })
        .collect())
}

/// 平滑一个轮廓: 对 x 子序列和 y 子序列分别做 [`moving_average`], 保持交错布局.
///
/// `window == 1` 时结果与输入相同.
pub fn smooth(outline: &Outline, window: usize) -> OutlineResult<SmoothedOutline> {
    check_window("smooth", window)?;
    let xs: Vec<_> = outline.xs().collect();
    let ys: Vec<_> = outline.ys().collect();
    let mx = moving_average(&xs, window)?;
    let my = moving_average(&ys, window)?;

    let mut flat = Vec::with_capacity(outline.as_flat().len());
    for (x, y) in izip!(mx, my) {
        flat.push(x);
        flat.push(y);
    }
    Ok(SmoothedOutline(flat))
}

/// 平滑整个轮廓集合, 结果保持原有顺序.
///
/// 打开 `rayon` feature 时会并行处理各个轮廓.
pub fn smooth_all(outlines: &[Outline], window: usize) -> OutlineResult<Vec<SmoothedOutline>> {
    check_window("smooth_all", window)?;
    log::debug!("smoothing {} outlines, window = {window}", outlines.len());

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        outlines.par_iter().map(|o| smooth(o, window)).collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        outlines.iter().map(|o| smooth(o, window)).collect()
    }
}

#[inline]
fn check_window(op: &'static str, window: usize) -> OutlineResult<()> {
    if window == 0 {
        Err(OutlineError::invalid(op, "smoothing window must be >= 1, got 0"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn square() -> Outline {
        Outline::new(vec![0, 0, 4, 0, 4, 4, 0, 4]).unwrap()
    }

    #[test]
    fn test_moving_average_wraps() {
        // [1, 2, 3, 4] + [1, 2]
        let r = moving_average(&[1i64, 2, 3, 4], 3).unwrap();
        let expect = [2.0, 3.0, 8.0 / 3.0, 7.0 / 3.0];
        assert_eq!(r.len(), 4);
        for (a, b) in r.iter().zip(expect) {
            assert!(f64_eq(*a, b), "{a} != {b}");
        }
    }

    #[test]
    fn test_moving_average_long_window_keeps_wrapping() {
        // 窗口比序列长时反复绕回: [1, 2, 1, 2, 1] 与 [2, 1, 2, 1, 2]
        let r = moving_average(&[1i64, 2], 5).unwrap();
        assert_eq!(r.len(), 2);
        assert!(f64_eq(r[0], 7.0 / 5.0));
        assert!(f64_eq(r[1], 8.0 / 5.0));

        let single = moving_average(&[4i64], 3).unwrap();
        assert!(f64_eq(single[0], 4.0));
    }

    #[test]
    fn test_moving_average_empty() {
        assert!(moving_average::<i64>(&[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(moving_average(&[1.0f64, 2.0], 0).unwrap_err().is_invalid_argument());
        assert!(smooth(&square(), 0).unwrap_err().is_invalid_argument());
        assert!(smooth_all(&[square()], 0)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_window_one_is_identity() {
        let o = Outline::new(vec![3, 9, -2, 7, 11, 0, 5, 5]).unwrap();
        let s = smooth(&o, 1).unwrap();
        assert_eq!(s.truncate(), o);
        assert_eq!(s, SmoothedOutline::from(&o));
    }

    #[test]
    fn test_smooth_keeps_interleaving() {
        // xs = [0, 4, 4, 0], ys = [0, 0, 4, 4]
        let s = smooth(&square(), 2).unwrap();
        assert_eq!(s.as_flat(), &[2.0, 0.0, 4.0, 2.0, 2.0, 4.0, 0.0, 2.0]);
    }

    #[test]
    fn test_smooth_all_keeps_order() {
        let a = square();
        let b = Outline::new(vec![10, 10, 20, 10, 20, 20]).unwrap();
        let r = smooth_all(&[a.clone(), b.clone()], 3).unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r[0], smooth(&a, 3).unwrap());
        assert_eq!(r[1], smooth(&b, 3).unwrap());
    }
}
