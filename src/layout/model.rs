//! Layout configuration model.
//!
//! The configuration is a pure data model validated once by
//! [`crate::Tiler::new`]; the engine never re-validates. The JSON surface
//! uses camelCase field names for compatibility with existing layout
//! descriptions.

use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    error::{TileError, TileResult},
    geometry::Margin,
};

/// Complete layout configuration for one [`crate::Tiler`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Canvas width in pixels.
    pub width: i32,
    /// Canvas height in pixels.
    pub height: i32,
    /// Prioritized draw areas. At least one is required; the area with the
    /// highest priority value is the default target for streams with no
    /// declared (or an unknown) area.
    pub areas: Vec<DrawArea>,
    /// Horizontal reading order of the produced layout.
    #[serde(default)]
    pub direction: Direction,
    /// Output serialization selected at construction time.
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// A prioritized rectangular sub-region of the canvas with its own grid
/// rules and overflow policy.
///
/// The engine does not clip areas to the canvas; keeping areas in bounds is
/// the caller's contract.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DrawArea {
    /// Unique key, also the ascending sort key.
    pub priority: i32,
    /// Area width in pixels.
    pub width: i32,
    /// Area height in pixels.
    pub height: i32,
    /// Area top edge in canvas coordinates.
    pub top: i32,
    /// Area left edge in canvas coordinates.
    pub left: i32,
    /// Where streams go once this area is at capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overflow: Option<Overflow>,
    /// Grid selection rules, matched first-to-last against the stream count.
    pub grid: Vec<GridRule>,
}

/// Overflow policy of a [`DrawArea`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Overflow {
    /// Keyword policy: `"none"` or `"next"`.
    Keyword(OverflowKeyword),
    /// Redirect to an explicit area priority. Taken verbatim; existence is
    /// checked when the chain is walked.
    To(i32),
}

/// Keyword form of [`Overflow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowKeyword {
    /// No overflow target.
    None,
    /// Target the area immediately following in priority order.
    Next,
}

/// A policy mapping a stream-count range to a column/row layout, margins
/// and an optional forced aspect ratio.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRule {
    /// Lowest stream count this rule applies to (inclusive).
    pub from_count: u32,
    /// Highest stream count this rule applies to (inclusive); `None` means
    /// unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_count: Option<u32>,
    /// Number of grid columns.
    pub col_count: u32,
    /// Nominal number of grid rows. Recomputed from the actual stream count
    /// at apply time; the nominal value still drives vertical socket sizing.
    pub row_count: u32,
    /// Socket margins: scalar or `[horizontal, vertical]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    /// Center the sockets of an incomplete last row.
    #[serde(default = "default_center_last")]
    pub center_last: bool,
    /// Force sockets onto this width/height ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_aspect_ratio: Option<f64>,
}

fn default_center_last() -> bool {
    true
}

/// Horizontal reading order of the produced layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right (default).
    #[default]
    Ltr,
    /// Right to left; socket order is mirrored about the canvas width.
    Rtl,
}

/// Output serialization of a composition call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Absolute-position box list for a browser-style layout.
    #[default]
    Web,
    /// Draw primitives for an ffmpeg-style compositor.
    Ffmpeg,
}

impl LayoutOptions {
    /// Parse a layout configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TileResult<Self> {
        serde_json::from_reader(r).map_err(|e| TileError::serde(format!("parse layout JSON: {e}")))
    }

    /// Parse a layout configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TileResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TileError::validation(format!("open layout JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate configuration invariants.
    ///
    /// Every violated precondition has one fixed message; the first hit
    /// stops validation. Called once by [`crate::Tiler::new`].
    pub fn validate(&self) -> TileResult<()> {
        if self.width <= 0 {
            return Err(TileError::validation("layout width must be > 0"));
        }
        if self.height <= 0 {
            return Err(TileError::validation("layout height must be > 0"));
        }
        if self.areas.is_empty() {
            return Err(TileError::validation(
                "layout areas must contain at least one area",
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for (idx, area) in self.areas.iter().enumerate() {
            area.validate(idx)?;
            if !seen.insert(area.priority) {
                return Err(TileError::validation(format!(
                    "area[{idx}] priority {} already in use",
                    area.priority
                )));
            }
        }
        Ok(())
    }
}

impl DrawArea {
    fn validate(&self, idx: usize) -> TileResult<()> {
        if self.width <= 0 {
            return Err(TileError::validation(format!(
                "area[{idx}] width must be > 0"
            )));
        }
        if self.height <= 0 {
            return Err(TileError::validation(format!(
                "area[{idx}] height must be > 0"
            )));
        }
        if self.grid.is_empty() {
            return Err(TileError::validation(format!(
                "area[{idx}] grid must contain at least one rule"
            )));
        }
        for (rule_idx, rule) in self.grid.iter().enumerate() {
            rule.validate(idx, rule_idx)?;
        }
        Ok(())
    }
}

impl GridRule {
    fn validate(&self, area_idx: usize, rule_idx: usize) -> TileResult<()> {
        if self.from_count == 0 {
            return Err(TileError::validation(format!(
                "area[{area_idx}] grid[{rule_idx}] fromCount must be > 0"
            )));
        }
        if self.to_count == Some(0) {
            return Err(TileError::validation(format!(
                "area[{area_idx}] grid[{rule_idx}] toCount must be > 0 when set"
            )));
        }
        if self.col_count == 0 {
            return Err(TileError::validation(format!(
                "area[{area_idx}] grid[{rule_idx}] colCount must be > 0"
            )));
        }
        if self.row_count == 0 {
            return Err(TileError::validation(format!(
                "area[{area_idx}] grid[{rule_idx}] rowCount must be > 0"
            )));
        }
        Ok(())
    }

    /// Does this rule cover `count` streams?
    pub fn matches(&self, count: u32) -> bool {
        self.from_count <= count && self.to_count.is_none_or(|to| to >= count)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
