//! Moore 邻域边界追踪.

use crate::Idx2d;
use ndarray::Array2;

/// 8-邻域方向 `(dh, dw)`, 从正西开始, 在图像坐标系下按顺时针排列.
const DIRS: [(isize, isize); 8] = [
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
];

/// 获得 `pos` 沿 `dir` 方向的邻居. 越界返回 `None`.
#[inline]
fn step(labels: &Array2<u32>, (h, w): Idx2d, dir: usize) -> Option<Idx2d> {
    let (dh, dw) = DIRS[dir];
    let nh = h.checked_add_signed(dh)?;
    let nw = w.checked_add_signed(dw)?;
    let (height, width) = labels.dim();
    (nh < height && nw < width).then_some((nh, nw))
}

/// 从 `seed` 出发, 追踪标签为 `label` 的连通区域的外边界, 返回 `(h, w)` 序列.
///
/// `seed` 必须是该标签在行优先扫描中遇到的第一个像素, 这样它左侧的像素必然不属于该区域.
/// 孤立像素返回只含 `seed` 的序列. 单像素宽的部分会被来回经过两次.
///
/// 当在 `seed` 处即将重复第一步移动时, 追踪结束.
pub(crate) fn moore_boundary(labels: &Array2<u32>, label: u32, seed: Idx2d) -> Vec<Idx2d> {
    debug_assert_eq!(labels[seed], label);

    let mut ans = vec![seed];
    let mut current = seed;
    // 回溯方向: 上一个检查过的非区域像素相对当前像素的方向.
    let mut back = 0;
    let mut first_move: Option<Idx2d> = None;

    // 每个像素至多从 8 个方向进入.
    let limit = labels.len() * 8 + 8;
    for _ in 0..limit {
        let found = (1..=8).map(|i| (back + i) % 8).find_map(|dir| {
            step(labels, current, dir)
                .filter(|&p| labels[p] == label)
                .map(|p| (dir, p))
        });
        let Some((dir, next)) = found else {
            // 孤立像素
            return ans;
        };

        if current == seed {
            match first_move {
                None => first_move = Some(next),
                Some(first) if first == next => {
                    // 末尾是重新回到的 `seed`.
                    ans.pop();
                    return ans;
                }
                Some(_) => {}
            }
        }

        back = if dir % 2 == 0 {
            (dir + 6) % 8
        } else {
            (dir + 5) % 8
        };
        ans.push(next);
        current = next;
    }

    log::warn!("boundary tracing of label {label} did not close, outline may be incomplete");
    ans
}
