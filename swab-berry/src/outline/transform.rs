//! 轮廓缩放, 区域过滤, 以及迭代 "缩放 + 平滑".

use super::smooth::smooth;
use super::{Outline, OutlineSet, SmoothedOutline};
use crate::{Coord, OutlineError, OutlineResult, Point};

/// 将轮廓的每个坐标乘以 `factor`. 不做边界检查, `factor` 可以是小数.
pub fn scale(outline: &Outline, factor: f64) -> SmoothedOutline {
    SmoothedOutline(outline.as_flat().iter().map(|&v| v as f64 * factor).collect())
}

/// 整数倍缩放. 任一坐标溢出 `i64` 时返回 `InvalidArgument`.
pub fn scale_int(outline: &Outline, factor: Coord) -> OutlineResult<Outline> {
    outline
        .as_flat()
        .iter()
        .map(|&v| {
            v.checked_mul(factor).ok_or_else(|| {
                OutlineError::invalid("scale_int", format!("{v} * {factor} overflows"))
            })
        })
        .collect::<OutlineResult<Vec<_>>>()
        .map(Outline)
}

/// 对整个集合做整数倍缩放, 保持顺序.
pub fn scale_all(outlines: &[Outline], factor: Coord) -> OutlineResult<OutlineSet> {
    outlines.iter().map(|o| scale_int(o, factor)).collect()
}

/// 矩形区域 (开区间) 和坐标缩进.
///
/// 如果原图在分割之前被裁剪过, 那么轮廓坐标是相对于裁剪后图像的.
/// `indent_left` 和 `indent_top` 即裁剪时从原图左侧和上侧切掉的像素数,
/// 用于把轮廓放回原图坐标系再与区域比较.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    min_w: Coord,
    max_w: Coord,
    min_h: Coord,
    max_h: Coord,
    indent_left: Coord,
    indent_top: Coord,
}

impl Region {
    /// 构建区域 `(min_w, max_w) × (min_h, max_h)`, 缩进为 0.
    ///
    /// 如果 `min_w >= max_w` 或 `min_h >= max_h`, 或者宽高超出 `i64` 范围, 返回 `InvalidArgument`.
    pub fn new(min_w: Coord, max_w: Coord, min_h: Coord, max_h: Coord) -> OutlineResult<Self> {
        if min_w >= max_w {
            return Err(OutlineError::invalid(
                "filter_to_region",
                format!("min_w ({min_w}) must be less than max_w ({max_w})"),
            ));
        }
        if min_h >= max_h {
            return Err(OutlineError::invalid(
                "filter_to_region",
                format!("min_h ({min_h}) must be less than max_h ({max_h})"),
            ));
        }
        if max_w.checked_sub(min_w).is_none() || max_h.checked_sub(min_h).is_none() {
            return Err(OutlineError::invalid(
                "filter_to_region",
                "region width or height overflows",
            ));
        }
        Ok(Self {
            min_w,
            max_w,
            min_h,
            max_h,
            indent_left: 0,
            indent_top: 0,
        })
    }

    /// 设置缩进.
    #[inline]
    pub fn with_indent(self, indent_left: Coord, indent_top: Coord) -> Self {
        Self {
            indent_left,
            indent_top,
            ..self
        }
    }

    /// 区域宽度.
    #[inline]
    pub fn width(&self) -> Coord {
        self.max_w - self.min_w
    }

    /// 区域高度.
    #[inline]
    pub fn height(&self) -> Coord {
        self.max_h - self.min_h
    }

    /// 加上缩进之后的坐标. 溢出的坐标必然在任何区域之外, 返回 `None`.
    #[inline]
    fn shifted(&self, (x, y): Point) -> Option<Point> {
        Some((x.checked_add(self.indent_left)?, y.checked_add(self.indent_top)?))
    }

    /// 加上缩进之后, `(x, y)` 是否严格位于区域内部.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.shifted(p).is_some_and(|(x, y)| {
            self.min_w < x && x < self.max_w && self.min_h < y && y < self.max_h
        })
    }

    /// 将区域内部的 `(x, y)` 转换为以区域左上角为原点的坐标, 结果位于 `(0, width) × (0, height)`.
    ///
    /// 点不在区域内部时返回 `None`.
    #[inline]
    pub fn rebase(&self, p: Point) -> Option<Point> {
        if !self.contains(p) {
            return None;
        }
        let (x, y) = self.shifted(p)?;
        Some((x - self.min_w, y - self.min_h))
    }
}

/// 只保留全部点都落在 `region` 内部的轮廓, 并把它们重定基准到区域自身的坐标系.
///
/// # 注意
///
/// 哪怕只有一个点越界, 整个轮廓都会被丢弃, 而不是被裁剪.
pub fn filter_to_region(outlines: &[Outline], region: &Region) -> OutlineSet {
    let kept: OutlineSet = outlines
        .iter()
        .filter_map(|o| {
            o.points()
                .map(|p| region.rebase(p))
                .collect::<Option<Vec<_>>>()
                .map(Outline::from_points)
        })
        .collect();
    log::debug!(
        "filter_to_region kept {} of {} outlines",
        kept.len(),
        outlines.len()
    );
    kept
}

/// 迭代 "缩放 + 平滑" 的参数.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterativeSpec {
    window: usize,
    step_factor: u32,
    iterations: u32,
}

impl IterativeSpec {
    /// 构建参数.
    ///
    /// `total_factor` 必须恰好是 `step_factor` 的整数次幂, 即 `log(total, step)`
    /// 为精确整数. 否则, 或者 `window == 0`, `total_factor == 0`, `step_factor <= 1`
    /// 时返回 `InvalidArgument`. 非整数的迭代次数会让总倍率出错, 因此不做取整.
    pub fn new(window: usize, total_factor: u32, step_factor: u32) -> OutlineResult<Self> {
        const OP: &str = "iterative_scale_smooth";
        if window == 0 {
            return Err(OutlineError::invalid(OP, "smoothing window must be >= 1, got 0"));
        }
        if total_factor == 0 {
            return Err(OutlineError::invalid(OP, "total_factor must be >= 1, got 0"));
        }
        if step_factor <= 1 {
            return Err(OutlineError::invalid(
                OP,
                format!("step_factor must be >= 2, got {step_factor}"),
            ));
        }
        let iterations = exact_log(total_factor, step_factor).ok_or_else(|| {
            OutlineError::invalid(
                OP,
                format!("log({total_factor}, {step_factor}) is not an integer"),
            )
        })?;
        Ok(Self {
            window,
            step_factor,
            iterations,
        })
    }

    /// 平滑窗口.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// 单步倍率.
    #[inline]
    pub fn step_factor(&self) -> u32 {
        self.step_factor
    }

    /// 迭代次数, 即 `log(total, step)`.
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// 总倍率.
    #[inline]
    pub fn total_factor(&self) -> u32 {
        self.step_factor.pow(self.iterations)
    }

    /// 对单个轮廓执行: 先平滑一次, 然后交替 {缩放 `step_factor`, 平滑} 共 `iterations` 次.
    ///
    /// 每次平滑之后都向零截断为整数.
    pub fn apply_one(&self, outline: &Outline) -> OutlineResult<Outline> {
        let mut current = smooth(outline, self.window)?.truncate();
        for _ in 0..self.iterations {
            let scaled = scale_int(&current, Coord::from(self.step_factor))?;
            current = smooth(&scaled, self.window)?.truncate();
        }
        Ok(current)
    }

    /// 对整个集合执行 [`Self::apply_one`], 保持顺序.
    ///
    /// 打开 `rayon` feature 时会并行处理各个轮廓.
    pub fn apply(&self, outlines: &[Outline]) -> OutlineResult<OutlineSet> {
        log::debug!(
            "iterative scaling of {} outlines: window = {}, step = {}, iterations = {}",
            outlines.len(),
            self.window,
            self.step_factor,
            self.iterations
        );

        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            outlines.par_iter().map(|o| self.apply_one(o)).collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            outlines.iter().map(|o| self.apply_one(o)).collect()
        }
    }
}

/// 迭代缩放平滑. 等价于 `IterativeSpec::new(window, total, step)?.apply(outlines)`.
pub fn iterative_scale_smooth(
    outlines: &[Outline],
    smoothing_window: usize,
    total_factor: u32,
    step_factor: u32,
) -> OutlineResult<OutlineSet> {
    IterativeSpec::new(smoothing_window, total_factor, step_factor)?.apply(outlines)
}

/// 若 `total == base^k` 则返回 `Some(k)`.
fn exact_log(mut total: u32, base: u32) -> Option<u32> {
    debug_assert!(base > 1);
    let mut k = 0;
    while total > 1 {
        if total % base != 0 {
            return None;
        }
        total /= base;
        k += 1;
    }
    Some(k)
}
