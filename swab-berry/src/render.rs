//! 在图像上叠加绘制细胞掩膜.
//!
//! 绘制参数由调用方显式持有并传入 ([`Overlay`]), 不存在全局的画布或图形状态.

use crate::consts::rgb::{BLACK, MASK_RED};
use crate::outline::Polygon;
use crate::{OutlineError, OutlineResult, Point};
use image::{Rgb, RgbImage};
use std::path::Path;

/// 掩膜叠加绘制上下文.
///
/// 该对象是只读的. 若要修改参数, 你应该创建新的实例.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Overlay {
    fill: [u8; 3],
    alpha: f32,
    line: [u8; 3],
}

impl Default for Overlay {
    /// 半透明红色填充 (`alpha = 0.3`), 黑色轮廓线.
    #[inline]
    fn default() -> Self {
        Self {
            fill: MASK_RED,
            alpha: 0.3,
            line: BLACK,
        }
    }
}

impl Overlay {
    /// 构建绘制上下文. `alpha` 必须位于 `[0, 1]`, 否则返回 `InvalidArgument`.
    pub fn new(fill: [u8; 3], alpha: f32, line: [u8; 3]) -> OutlineResult<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(OutlineError::invalid(
                "Overlay::new",
                format!("alpha must be within [0, 1], got {alpha}"),
            ));
        }
        Ok(Self { fill, alpha, line })
    }

    /// 填充颜色.
    #[inline]
    pub fn fill(&self) -> [u8; 3] {
        self.fill
    }

    /// 填充透明度.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// 轮廓线颜色.
    #[inline]
    pub fn line(&self) -> [u8; 3] {
        self.line
    }

    /// 在 `image` 上原地绘制: 先以 `alpha` 混合填充所有多边形 (奇偶规则),
    /// 再绘制闭合的轮廓线. 图像外的部分被裁掉.
    pub fn draw(&self, image: &mut RgbImage, polygons: &[Polygon]) {
        let (width, height) = image.dimensions();
        let mut filled = vec![false; width as usize * height as usize];
        for polygon in polygons {
            scanline_fill(polygon, width, height, |x, y| {
                filled[(y * width + x) as usize] = true;
            });
        }

        let a = self.alpha;
        for (x, y, pix) in image.enumerate_pixels_mut() {
            if filled[(y * width + x) as usize] {
                for (c, f) in pix.0.iter_mut().zip(self.fill) {
                    *c = (a * f as f32 + (1.0 - a) * *c as f32).round() as u8;
                }
            }
        }

        for polygon in polygons {
            for (p, q) in polygon.edges() {
                bresenham(p, q, |x, y| {
                    if (0..width as i64).contains(&x) && (0..height as i64).contains(&y) {
                        image.put_pixel(x as u32, y as u32, Rgb(self.line));
                    }
                });
            }
        }
    }

    /// 以 `base` 为底图绘制, 返回新图像.
    pub fn render(&self, base: &RgbImage, polygons: &[Polygon]) -> RgbImage {
        let mut image = base.clone();
        self.draw(&mut image, polygons);
        image
    }

    /// 以 `base` 为底图绘制并保存到 `path`.
    pub fn save<P: AsRef<Path>>(
        &self,
        base: &RgbImage,
        polygons: &[Polygon],
        path: P,
    ) -> image::ImageResult<()> {
        self.render(base, polygons).save(path)
    }
}

/// 奇偶规则扫描线填充. 像素中心 `(x + 0.5, y + 0.5)` 在多边形内部时调用 `put(x, y)`.
fn scanline_fill<F: FnMut(u32, u32)>(polygon: &Polygon, width: u32, height: u32, mut put: F) {
    if polygon.len() < 3 {
        return;
    }
    let (y_lo, y_hi) = polygon
        .points()
        .iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    let y_lo = y_lo.max(0);
    let y_hi = y_hi.min(height as i64 - 1);

    let mut xs: Vec<f64> = Vec::with_capacity(8);
    for y in y_lo..=y_hi {
        let yc = y as f64 + 0.5;
        xs.clear();
        for ((x1, y1), (x2, y2)) in polygon.edges() {
            let (fy1, fy2) = (y1 as f64, y2 as f64);
            if (fy1 <= yc && yc < fy2) || (fy2 <= yc && yc < fy1) {
                xs.push(x1 as f64 + (yc - fy1) * (x2 - x1) as f64 / (fy2 - fy1));
            }
        }
        xs.sort_unstable_by(f64::total_cmp);
        for pair in xs.chunks_exact(2) {
            let x_start = ((pair[0] - 0.5).ceil() as i64).max(0);
            let x_end = ((pair[1] - 0.5).floor() as i64).min(width as i64 - 1);
            for x in x_start..=x_end {
                put(x as u32, y as u32);
            }
        }
    }
}

/// Bresenham 直线, 包含两个端点.
fn bresenham<F: FnMut(i64, i64)>((x0, y0): Point, (x1, y1): Point, mut put: F) {
    let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
    let (sx, sy) = (if x0 < x1 { 1 } else { -1 }, if y0 < y1 { 1 } else { -1 });
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;
    loop {
        put(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::rgb::WHITE;

    fn square() -> Polygon {
        Polygon::new(vec![(2, 2), (6, 2), (6, 6), (2, 6)])
    }

    #[test]
    fn test_overlay_invalid_alpha() {
        assert!(Overlay::new(MASK_RED, 1.5, BLACK).is_err());
        assert!(Overlay::new(MASK_RED, -0.1, BLACK).is_err());
        assert!(Overlay::new(MASK_RED, 0.0, BLACK).is_ok());
    }

    #[test]
    fn test_overlay_opaque() {
        let base = RgbImage::from_pixel(10, 10, Rgb(WHITE));
        let overlay = Overlay::new([255, 0, 0], 1.0, BLACK).unwrap();
        let img = overlay.render(&base, &[square()]);
        assert_eq!(img.get_pixel(4, 4).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(2, 2).0, BLACK);
        assert_eq!(img.get_pixel(6, 4).0, BLACK);
        assert_eq!(img.get_pixel(0, 0).0, WHITE);
        assert_eq!(img.get_pixel(8, 8).0, WHITE);
    }

    #[test]
    fn test_overlay_blend() {
        let base = RgbImage::from_pixel(10, 10, Rgb(WHITE));
        let overlay = Overlay::new([255, 0, 0], 0.5, BLACK).unwrap();
        let img = overlay.render(&base, &[square()]);
        assert_eq!(img.get_pixel(4, 4).0, [255, 128, 128]);
    }

    #[test]
    fn test_overlay_clips() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb(WHITE));
        let big = Polygon::new(vec![(-5, -5), (20, -5), (20, 20), (-5, 20)]);
        Overlay::new([0, 0, 255], 1.0, BLACK)
            .unwrap()
            .draw(&mut img, &[big]);
        assert!(img.pixels().all(|p| p.0 == [0, 0, 255]));
    }

    #[test]
    fn test_bresenham_diagonal() {
        let mut pts = vec![];
        bresenham((0, 0), (3, 3), |x, y| pts.push((x, y)));
        assert_eq!(pts, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }
}
