//! 凸包.

use crate::Point;

#[inline]
fn cross((ox, oy): Point, (ax, ay): Point, (bx, by): Point) -> i64 {
    (ax - ox) * (by - oy) - (ay - oy) * (bx - ox)
}

/// Andrew 单调链算法. 返回逆时针排列的凸包顶点, 共线点被剔除.
///
/// 少于 3 个不同点时, 原样返回去重排序后的点.
pub(crate) fn monotone_chain(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    pts.sort_unstable();
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(pts.len() * 2);
    // 下凸壳
    for &p in pts.iter() {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    // 上凸壳
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }
    // 最后一个点与起点重复
    hull.pop();
    hull
}
