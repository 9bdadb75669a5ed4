//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Coord, Idx2d, Point};
pub use crate::{OutlineError, OutlineResult};

pub use crate::outline::{
    filter_to_region, iterative_scale_smooth, load_outlines, save_outlines, scale, scale_int,
    smooth, IterativeSpec, Outline, OutlineSet, Polygon, Region, SmoothedOutline,
};

pub use crate::shape::{Descriptors, ShapeSummary};

pub use crate::mask::{CellCount, CellCounter, LabelMask, MaskSource};

pub use crate::pyramid::{PyramidLevel, SlideMeta};

pub use crate::render::Overlay;

pub use crate::consts::{CellKind, DEFAULT_SMOOTHING_WINDOW, DEFAULT_STEP_FACTOR, DEFAULT_TOTAL_FACTOR};

pub use crate::dataset::{self, outline_loader};
