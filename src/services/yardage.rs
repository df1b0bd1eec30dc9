//! Fabric yardage and strip-count calculations.
//!
//! Both calculators are pure functions of the quilt configuration and the
//! cutting inputs (width of fabric, seam allowance, strip widths). Every
//! category is rounded up to a quarter yard on its own, the rounded values
//! are summed, and the sum is rounded again.
//!
//! # Examples
//!
//! ```
//! use quilt_planner::models::QuiltConfig;
//! use quilt_planner::services::yardage::{calculate_fabric, CalculatorInputs};
//!
//! let breakdown = calculate_fabric(&QuiltConfig::default(), &CalculatorInputs::default());
//! assert_eq!(breakdown.total, 8.25);
//! ```

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{GridDimensions, QuiltConfig};

/// Square inches of fabric per yard per inch of fabric width.
const INCHES_PER_YARD: f64 = 36.0;

/// Tolerance that keeps float noise just above a quarter from rounding up
/// to the next one.
const QUARTER_EPSILON: f64 = 1e-9;

/// Cutting inputs that are not part of the quilt geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInputs {
    /// Usable width of fabric (inches)
    pub wof: f64,
    /// Seam allowance added to both sides of every cut piece (inches)
    pub seam: f64,
    /// Cut width of sashing and sashing-border strips (inches)
    pub sash_strip_width: f64,
    /// Cut width of binding strips (inches)
    pub binding_strip_width: f64,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            wof: 42.0,
            seam: 0.25,
            sash_strip_width: 2.0,
            binding_strip_width: 2.5,
        }
    }
}

/// Yardage per material category, already rounded to quarter yards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricBreakdown {
    /// Block fabric
    pub blocks: f64,
    /// Sashing strips between blocks
    pub sashing: f64,
    /// Frame around the block field
    pub sashing_border: f64,
    /// Outer border
    pub border: f64,
    /// Backing panels
    pub backing: f64,
    /// Binding strips
    pub binding: f64,
    /// Rounded sum of the rounded categories
    pub total: f64,
}

/// Width-of-fabric strip counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripBreakdown {
    /// Sashing strips (zero when sashing is off)
    pub sashing_strips: u32,
    /// Strips for the frame around the core
    pub sashing_border_strips: u32,
    /// Binding strips around the perimeter
    pub binding_strips: u32,
    /// Sum of the three counts
    pub total_strips: u32,
    /// Length of fabric consumed by all strips (inches)
    pub total_inches: f64,
    /// `total_inches` in quarter yards
    pub yards: f64,
}

/// Finished quilt size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuiltSize {
    /// Finished width (inches)
    pub width_in: f64,
    /// Finished height (inches)
    pub height_in: f64,
}

impl QuiltSize {
    /// Finished size of a configuration.
    #[must_use]
    pub fn of(cfg: &QuiltConfig) -> Self {
        let dims = GridDimensions::compute(cfg);
        Self {
            width_in: dims.total_width_in,
            height_in: dims.total_height_in,
        }
    }
}

impl fmt::Display for QuiltSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\" x {}\"", self.width_in, self.height_in)
    }
}

/// Rounds up to the next quarter, carrying into the whole number when the
/// fraction rounds to 1.
///
/// Non-finite input is returned unchanged so it can surface as an empty
/// display value instead of a misleading number.
///
/// # Examples
///
/// ```
/// use quilt_planner::services::yardage::round_to_fourth;
///
/// assert_eq!(round_to_fourth(1.70), 1.75);
/// assert_eq!(round_to_fourth(0.80), 1.0);
/// assert_eq!(round_to_fourth(2.0), 2.0);
/// ```
#[must_use]
pub fn round_to_fourth(yards: f64) -> f64 {
    if !yards.is_finite() {
        return yards;
    }
    let whole = yards.floor();
    let quarters = ((yards - whole) * 4.0 - QUARTER_EPSILON).ceil().max(0.0);
    if quarters >= 4.0 {
        whole + 1.0
    } else {
        whole + quarters / 4.0
    }
}

/// Renders a quarter-yard value as a mixed fraction: `2 1/4`, `3`, `3/4`.
///
/// Fractions are always in fourths (`2/4`, not `1/2`). Non-finite values
/// render as an empty string.
#[must_use]
pub fn to_mixed_fraction(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let mut whole = value.floor();
    let mut fourths = ((value - whole) * 4.0).round();
    if fourths >= 4.0 {
        whole += 1.0;
        fourths = 0.0;
    }
    let whole = whole as i64;
    let fourths = fourths as i64;
    match (whole, fourths) {
        (w, 0) => w.to_string(),
        (w, f) if w > 0 => format!("{w} {f}/4"),
        (_, f) => format!("{f}/4"),
    }
}

/// Yardage per category for a quilt.
#[must_use]
pub fn calculate_fabric(cfg: &QuiltConfig, inputs: &CalculatorInputs) -> FabricBreakdown {
    let dims = GridDimensions::compute(cfg);
    let CalculatorInputs { wof, seam, .. } = *inputs;
    let rows = f64::from(cfg.rows);
    let cols = f64::from(cfg.cols);
    let per_yard = wof * INCHES_PER_YARD;

    let blocks = round_to_fourth(
        (cfg.block_width + 2.0 * seam) * (cfg.block_height + 2.0 * seam) * rows * cols / per_yard,
    );

    let sash_w = dims.sash_width;
    let sashing = if sash_w > 0.0 {
        let cut_w = sash_w + 2.0 * seam;
        let area = (cols - 1.0) * cut_w * (dims.core_height_in + 2.0 * seam)
            + (rows - 1.0) * cut_w * (dims.core_width_in + 2.0 * seam);
        round_to_fourth(area / per_yard)
    } else {
        0.0
    };

    let sash_border_w = dims.sash_border_width;
    let sashing_border = if sash_border_w > 0.0 {
        let cut_w = sash_border_w + 2.0 * seam;
        let vert_len = dims.core_height_in + 2.0 * sash_border_w + 2.0 * seam;
        let horiz_len = dims.core_width_in + 2.0 * sash_border_w + 2.0 * seam;
        round_to_fourth((2.0 * cut_w * vert_len + 2.0 * cut_w * horiz_len) / per_yard)
    } else {
        0.0
    };

    let border_w = dims.border_width;
    let border = if border_w > 0.0 {
        let cut_w = border_w + 2.0 * seam;
        let inner_w = dims.core_width_in + 2.0 * sash_border_w;
        let inner_h = dims.core_height_in + 2.0 * sash_border_w;
        let vert_len = inner_h + 2.0 * border_w + 2.0 * seam;
        let horiz_len = inner_w + 2.0 * border_w + 2.0 * seam;
        round_to_fourth((2.0 * cut_w * vert_len + 2.0 * cut_w * horiz_len) / per_yard)
    } else {
        0.0
    };

    let panels = (dims.total_width_in / wof).ceil().max(1.0);
    let backing = round_to_fourth(panels * dims.total_height_in / INCHES_PER_YARD);

    let binding_strips = (perimeter(&dims) / wof).ceil();
    let binding = round_to_fourth(binding_strips * inputs.binding_strip_width / INCHES_PER_YARD);

    let total = round_to_fourth(blocks + sashing + sashing_border + border + backing + binding);

    FabricBreakdown {
        blocks,
        sashing,
        sashing_border,
        border,
        backing,
        binding,
        total,
    }
}

/// Width-of-fabric strip counts for sashing, sashing border and binding.
///
/// The sashing-border count is always reported, even when that frame is
/// switched off, so the cutting plan can be compared before enabling it.
/// With a non-positive width of fabric every count is zero and the lengths
/// are NaN.
#[must_use]
pub fn calculate_strips(cfg: &QuiltConfig, inputs: &CalculatorInputs) -> StripBreakdown {
    let dims = GridDimensions::compute(cfg);
    let CalculatorInputs {
        wof,
        sash_strip_width,
        binding_strip_width,
        ..
    } = *inputs;

    if wof.is_nan() || wof <= 0.0 {
        return StripBreakdown {
            sashing_strips: 0,
            sashing_border_strips: 0,
            binding_strips: 0,
            total_strips: 0,
            total_inches: f64::NAN,
            yards: f64::NAN,
        };
    }

    let rows = f64::from(cfg.rows);
    let cols = f64::from(cfg.cols);

    let raw_sashing =
        strip_count((cols - 1.0) * dims.core_height_in + (rows - 1.0) * dims.core_width_in, wof);
    let sashing_strips = if dims.sash_width > 0.0 { raw_sashing } else { 0 };
    let sashing_border_strips = strip_count(2.0 * (dims.core_width_in + dims.core_height_in), wof);
    let binding_strips = strip_count(perimeter(&dims), wof);

    let total_inches = f64::from(sashing_strips) * sash_strip_width
        + f64::from(sashing_border_strips) * sash_strip_width
        + f64::from(binding_strips) * binding_strip_width;

    StripBreakdown {
        sashing_strips,
        sashing_border_strips,
        binding_strips,
        total_strips: sashing_strips + sashing_border_strips + binding_strips,
        total_inches,
        yards: round_to_fourth(total_inches / INCHES_PER_YARD),
    }
}

fn perimeter(dims: &GridDimensions) -> f64 {
    2.0 * (dims.total_width_in + dims.total_height_in)
}

fn strip_count(linear_inches: f64, wof: f64) -> u32 {
    let count = (linear_inches / wof).ceil();
    if count.is_finite() && count > 0.0 {
        count as u32
    } else {
        0
    }
}

impl fmt::Display for FabricBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let y = to_mixed_fraction;
        writeln!(f, "Blocks:         {} yards", y(self.blocks))?;
        writeln!(f, "Sashing:        {} yards", y(self.sashing))?;
        writeln!(f, "Sashing Border: {} yards", y(self.sashing_border))?;
        writeln!(f, "Border:         {} yards", y(self.border))?;
        writeln!(f, "Backing:        {} yards", y(self.backing))?;
        writeln!(f, "Binding:        {} yards", y(self.binding))?;
        writeln!(f, "-----------------------------")?;
        write!(f, "Total:          {} yards", y(self.total))
    }
}

impl fmt::Display for StripBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inches = if self.total_inches.is_finite() {
            format!("{:.1}", self.total_inches)
        } else {
            String::new()
        };
        writeln!(f, "Sashing Strips Needed: {}", self.sashing_strips)?;
        writeln!(f, "Sashing Border Strips Needed: {}", self.sashing_border_strips)?;
        writeln!(f, "Binding Strips Needed: {}", self.binding_strips)?;
        writeln!(f, "Total Strips: {}", self.total_strips)?;
        writeln!(f, "Total Inches: {inches}")?;
        write!(f, "Yardage: {} yards", to_mixed_fraction(self.yards))
    }
}
