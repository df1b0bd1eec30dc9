//! Quilt geometry flags shared by `size`, `yardage`, and `new`.

use crate::cli::common::{CliError, CliResult};
use crate::models::{GridDimensions, QuiltConfig};
use clap::Args;

/// Geometry flags. Anything omitted keeps the default quilt's value.
#[derive(Debug, Clone, Default, Args)]
pub struct GeometryArgs {
    /// Number of block rows
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: Option<u32>,

    /// Number of block columns
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub cols: Option<u32>,

    /// Finished block width in inches
    #[arg(long, value_name = "IN")]
    pub block_width: Option<f64>,

    /// Finished block height in inches
    #[arg(long, value_name = "IN")]
    pub block_height: Option<f64>,

    /// Separate blocks with sashing (default)
    #[arg(long, overrides_with = "no_sashing")]
    pub sashing: bool,

    /// Butt blocks together without sashing
    #[arg(long)]
    pub no_sashing: bool,

    /// Finished sashing width in inches
    #[arg(long, value_name = "IN")]
    pub sashing_width: Option<f64>,

    /// Frame the block field with a sashing border (default)
    #[arg(long, overrides_with = "no_sashing_border")]
    pub sashing_border: bool,

    /// Leave out the sashing border
    #[arg(long)]
    pub no_sashing_border: bool,

    /// Finished sashing border width in inches
    #[arg(long, value_name = "IN")]
    pub sashing_border_width: Option<f64>,

    /// Finished outer border width in inches
    #[arg(long, value_name = "IN")]
    pub border_width: Option<f64>,
}

impl GeometryArgs {
    /// Builds the configuration, rejecting lengths the geometry cannot use
    /// and quilts too large to lay out as a grid.
    pub fn to_config(&self) -> CliResult<QuiltConfig> {
        let mut cfg = QuiltConfig::default();

        if let Some(rows) = self.rows {
            cfg.rows = rows;
        }
        if let Some(cols) = self.cols {
            cfg.cols = cols;
        }
        if let Some(w) = self.block_width {
            cfg.block_width = positive("--block-width", w)?;
        }
        if let Some(h) = self.block_height {
            cfg.block_height = positive("--block-height", h)?;
        }
        if let Some(w) = self.sashing_width {
            cfg.sashing_width = non_negative("--sashing-width", w)?;
        }
        if let Some(w) = self.sashing_border_width {
            cfg.sashing_border_width = non_negative("--sashing-border-width", w)?;
        }
        if let Some(w) = self.border_width {
            cfg.border_width = non_negative("--border-width", w)?;
        }
        if self.no_sashing {
            cfg.sashing_enabled = false;
        }
        if self.no_sashing_border {
            cfg.sashing_border_enabled = false;
        }

        GridDimensions::compute(&cfg)
            .ensure_fits()
            .map_err(|e| CliError::validation(e.to_string()))?;
        Ok(cfg)
    }
}

fn positive(flag: &str, value: f64) -> CliResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CliError::validation(format!(
            "{flag} must be a positive number of inches, got {value}"
        )))
    }
}

fn non_negative(flag: &str, value: f64) -> CliResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CliError::validation(format!(
            "{flag} must not be negative, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_is_default_quilt() {
        let cfg = GeometryArgs::default().to_config().unwrap();
        assert_eq!(cfg, QuiltConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let args = GeometryArgs {
            rows: Some(2),
            cols: Some(2),
            block_width: Some(4.0),
            block_height: Some(4.0),
            sashing_width: Some(1.0),
            no_sashing_border: true,
            border_width: Some(0.0),
            ..GeometryArgs::default()
        };
        let cfg = args.to_config().unwrap();
        assert_eq!(cfg.rows, 2);
        assert_eq!(cfg.block_width, 4.0);
        assert!(cfg.sashing_enabled);
        assert!(!cfg.sashing_border_enabled);
        assert_eq!(cfg.border_width, 0.0);
    }

    #[test]
    fn test_rejects_bad_lengths() {
        let args = GeometryArgs {
            block_width: Some(0.0),
            ..GeometryArgs::default()
        };
        assert!(args.to_config().is_err());

        let args = GeometryArgs {
            border_width: Some(-1.0),
            ..GeometryArgs::default()
        };
        assert!(args.to_config().is_err());
    }

    #[test]
    fn test_rejects_oversized_quilt() {
        let args = GeometryArgs {
            rows: Some(1000),
            ..GeometryArgs::default()
        };
        let err = args.to_config().unwrap_err();
        assert!(err.to_string().contains("largest supported grid"));
    }
}
