//! Per-cell region classification.
//!
//! Every grid cell belongs to exactly one region of the nested-frame model:
//! outer border, sashing border, sashing, or block. Classification is pure
//! and cheap, so renderers call it for every cell on every repaint instead
//! of caching the result.

#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

use super::dimensions::GridDimensions;
use super::quilt::QuiltConfig;

/// Fallback color of unpainted block cells.
pub const BLOCK_COLOR: &str = "#ffffff";

/// Region a grid cell belongs to.
///
/// Variants are declared in priority order: when frame geometry overlaps,
/// a cell resolves to the first matching variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellType {
    /// Outermost frame
    Border,
    /// Frame directly around the sashed block field
    SashBorder,
    /// Strips between blocks
    Sashing,
    /// Block interior
    Block,
}

impl CellType {
    /// Classifies the cell at `(row, col)`.
    ///
    /// Coordinates are cell indices from the top-left corner of the whole
    /// quilt. Cells outside the grid are classified by the same rules, which
    /// keeps the function total.
    #[must_use]
    pub fn classify(row: usize, col: usize, cfg: &QuiltConfig, dims: &GridDimensions) -> Self {
        let r = row as f64;
        let c = col as f64;

        let border_w = dims.border_width;
        if border_w > 0.0
            && (r < border_w
                || r >= dims.total_height_in - border_w
                || c < border_w
                || c >= dims.total_width_in - border_w)
        {
            return Self::Border;
        }

        let in_core = dims.in_core(r, c);

        if dims.sash_border_width > 0.0 && !in_core {
            return Self::SashBorder;
        }

        let sash_w = dims.sash_width;
        if cfg.sashing_enabled && sash_w > 0.0 && in_core {
            let horizontal = in_sash_gap(
                r - dims.core_top,
                cfg.block_height,
                sash_w,
                cfg.rows,
            );
            let vertical = in_sash_gap(c - dims.core_left, cfg.block_width, sash_w, cfg.cols);
            if horizontal || vertical {
                return Self::Sashing;
            }
        }

        Self::Block
    }

    /// Region fallback color used when a cell carries no paint.
    #[must_use]
    pub fn region_color(self, cfg: &QuiltConfig) -> &str {
        match self {
            Self::Border => &cfg.border_color,
            Self::SashBorder => &cfg.sashing_border_color,
            Self::Sashing => &cfg.sashing_color,
            Self::Block => BLOCK_COLOR,
        }
    }

    /// Single-character tag used by plain-text renderings.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Border => 'B',
            Self::SashBorder => 'S',
            Self::Sashing => 'X',
            Self::Block => '.',
        }
    }

    /// Human-readable region name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Border => "border",
            Self::SashBorder => "sashing border",
            Self::Sashing => "sashing",
            Self::Block => "block",
        }
    }
}

/// Checks whether an offset into the core falls in a sashing gap along one
/// axis. Gaps only exist between blocks, so the tile after the last block
/// never has one.
fn in_sash_gap(offset: f64, block_len: f64, sash_w: f64, count: u32) -> bool {
    let repeat = block_len + sash_w;
    if repeat <= 0.0 {
        return false;
    }
    let index = (offset / repeat).floor();
    let pos = offset % repeat;
    index < f64::from(count) - 1.0 && pos >= block_len
}

/// Free-function form of [`CellType::classify`].
#[must_use]
pub fn classify(row: usize, col: usize, cfg: &QuiltConfig, dims: &GridDimensions) -> CellType {
    CellType::classify(row, col, cfg, dims)
}
