#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 提供口腔拭子 (buccal swab) 细胞学图像分割轮廓的结构化表示和后处理算法.
//!
//! 分割本身 (神经网络模型), 远程图像数据库, 可视化面板和显微图像解码都不属于本 crate,
//! 它们作为外部协作方, 只通过轮廓 (`Outline`) 或标签掩膜 (`LabelMask`) 与本 crate 交互.
//!
//! # 注意
//!
//! 1. 所有变换都是纯函数, 输入轮廓不会被原地修改, 每次都会产生新的轮廓序列.
//! 2. 非法参数和格式错误的输入通过 [`OutlineError`] 立即返回给调用方, 不会重试或静默吞掉.
//!
//! # 开发计划
//!
//! ### 轮廓文本格式读写 ✅
//!
//! 每行一个轮廓, 逗号分隔的交错坐标 `x,y,x,y,...`.
//!
//! 实现位于 `swab-berry/src/outline/io.rs`.
//!
//! ### 循环滑动平均平滑 ✅
//!
//! 对 x 与 y 子序列分别做首尾相接的滑动平均.
//!
//! 实现位于 `swab-berry/src/outline/smooth.rs`.
//!
//! ### 缩放, 区域过滤, 迭代 "缩放 + 平滑" ✅
//!
//! 迭代次数必须是精确整数 `log(total, step)`, 否则拒绝执行.
//!
//! 实现位于 `swab-berry/src/outline/transform.rs`.
//!
//! ### 形状描述子 ✅
//!
//! 凸性 (convexity), 坚实度 (solidity), 圆度 (roundness).
//!
//! 实现位于 `swab-berry/src/shape`.
//!
//! ### 标签掩膜与细胞计数 ✅
//!
//! 输入类型在边界处一次性解析为 [`MaskSource`], 而不是在每个方法里反复判断.
//!
//! 实现位于 `swab-berry/src/mask`.
//!
//! ### 图像金字塔元数据 ✅
//!
//! 根据金字塔层级的降采样倍率计算细胞直径 (像素).
//!
//! 实现位于 `swab-berry/src/pyramid.rs`.
//!
//! ### 掩膜叠加绘制 ✅
//!
//! 显式传入的绘制上下文 [`Overlay`], 没有全局画布状态.
//!
//! 实现位于 `swab-berry/src/render.rs`.

/// 坐标分量类型. 轮廓坐标可能在重定基准后变为负数, 因此使用有符号整数.
pub type Coord = i64;

/// 二维整数点 `(x, y)`.
pub type Point = (Coord, Coord);

/// 高精度二维点 `(x, y)`.
type PointF = (f64, f64);

/// 二维图像索引 `(h, w)`, 即 `(行, 列)`.
pub type Idx2d = (usize, usize);

pub mod consts;
mod error;

pub use error::{OutlineError, OutlineResult};

pub mod outline;

pub use outline::{Outline, OutlineSet, Polygon, Region, SmoothedOutline};

pub mod shape;

pub mod mask;

pub use mask::{CellCount, CellCounter, LabelMask, MaskSource};

pub mod pyramid;

pub mod render;

pub use render::Overlay;

pub mod dataset;
pub mod prelude;
