//! Layout file I/O service.
//!
//! This module centralizes all layout file operations, providing a consistent
//! interface for loading, saving, and naming layout files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::constants::DEFAULT_EXPORT_FILENAME;
use crate::parser::{self, PersistedLayout};

/// Service for managing layout file I/O operations.
pub struct LayoutService;

impl LayoutService {
    /// Loads a layout from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not a layout document, or has
    /// an unsupported version. The underlying [`parser::LayoutError`] stays
    /// reachable through `downcast_ref`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use quilt_planner::services::LayoutService;
    ///
    /// let layout = LayoutService::load(Path::new("quilt-layout.json"))?;
    /// println!("{} x {} blocks", layout.quilt.rows, layout.quilt.cols);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<PersistedLayout> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        parser::deserialize(&content)
            .with_context(|| format!("Failed to load layout from {}", path.display()))
    }

    /// Saves a layout as JSON.
    ///
    /// This performs an atomic write using a temp file + rename pattern to ensure
    /// the file is never left in a corrupted state.
    pub fn save(layout: &PersistedLayout, path: &Path) -> Result<()> {
        let content = parser::serialize(layout).context("Failed to serialize layout")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to save layout to {}", path.display()))?;

        info!(path = %path.display(), "Layout saved");
        Ok(())
    }

    /// Where an export goes when the user gives no path: the configured
    /// layouts directory, or the current directory.
    #[must_use]
    pub fn default_export_path(config: &Config) -> PathBuf {
        config
            .paths
            .layouts_dir
            .as_ref()
            .map_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILENAME), |dir| {
                dir.join(DEFAULT_EXPORT_FILENAME)
            })
    }

    /// Appends `.json` unless the path already ends with it.
    #[must_use]
    pub fn with_json_extension(path: &Path) -> PathBuf {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            path.to_path_buf()
        } else {
            let mut name = path.as_os_str().to_os_string();
            name.push(".json");
            PathBuf::from(name)
        }
    }
}

/// Sanitizes a name for use as a filename.
///
/// Replaces problematic characters with underscores and converts to lowercase.
///
/// # Examples
///
/// ```
/// # use quilt_planner::services::layouts::sanitize_filename;
/// assert_eq!(sanitize_filename("Log Cabin"), "log_cabin");
/// assert_eq!(sanitize_filename("Baby/Quilt:Blue"), "baby_quilt_blue");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.replace(['/', '\\', ':', ' '], "_").to_lowercase()
}
