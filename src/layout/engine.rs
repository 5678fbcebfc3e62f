//! The placement engine: partitions streams into areas, selects grid rules
//! and computes socket geometry, then hands the placed streams to the
//! configured output formatter.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    foundation::error::TileResult,
    foundation::geometry::{distribute, fix_aspect_ratio, resolve_margins},
    layout::index::AreaIndex,
    layout::model::{Direction, DrawArea, GridRule, LayoutOptions, OutputFormat},
    layout::stream::StreamInput,
    output::ffmpeg::{FfmpegOutput, format_for_ffmpeg},
    output::web::format_for_web,
};

/// A computed placement rectangle for exactly one stream, in canvas
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Socket {
    /// Socket width in pixels.
    pub width: i32,
    /// Socket height in pixels.
    pub height: i32,
    /// Top edge in canvas coordinates.
    pub top: i32,
    /// Left edge in canvas coordinates.
    pub left: i32,
}

/// A socket paired with the stream assigned to it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PlacedStream {
    /// The computed placement rectangle.
    #[serde(flatten)]
    pub socket: Socket,
    /// The stream occupying it.
    pub stream: StreamInput,
}

/// Result of one composition call, shaped per the configured
/// [`OutputFormat`].
#[derive(Clone, Debug, serde::Serialize)]
#[serde(untagged)]
pub enum TileOutput {
    /// Absolute-position box list for a browser-style layout.
    Web(Vec<PlacedStream>),
    /// Draw primitives for an ffmpeg-style compositor.
    Ffmpeg(FfmpegOutput),
}

/// The tiling engine.
///
/// Constructed once from a validated [`LayoutOptions`]; immutable
/// afterwards. Every [`Tiler::compose`] call recomputes placement from
/// scratch and shares no state with other calls, so concurrent calls on one
/// instance need no coordination.
#[derive(Clone, Debug)]
pub struct Tiler {
    options: LayoutOptions,
    index: AreaIndex,
}

impl Tiler {
    /// Validate `options` and build the engine.
    ///
    /// Areas are sorted ascending by priority and the capacity/overflow
    /// index is built here, once. Fails fast on the first violated
    /// precondition without partially applying anything.
    pub fn new(mut options: LayoutOptions) -> TileResult<Self> {
        options.validate()?;
        options.areas.sort_by_key(|area| area.priority);
        let index = AreaIndex::build(&options.areas);
        debug!(
            canvas_width = options.width,
            canvas_height = options.height,
            areas = options.areas.len(),
            "tiler constructed"
        );
        Ok(Self { options, index })
    }

    /// The validated, priority-sorted configuration.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Compute placement for `input` and serialize it for the configured
    /// output format.
    ///
    /// Stream order is preserved within an area: the i-th stream assigned
    /// to an area gets the i-th generated socket. Streams whose area and
    /// overflow chain are at capacity are dropped from the output (logged,
    /// not an error). Zero streams yield an empty output.
    #[tracing::instrument(skip(self, input), fields(streams = input.len()))]
    pub fn compose(&self, input: &[StreamInput]) -> TileOutput {
        let partitions = self.partition(input);
        let mut placed = Vec::with_capacity(input.len());
        for (priority, streams) in &partitions {
            let area = self.area(*priority);
            let grid = self.select_grid(area, streams.len());
            let mut sockets = self.sockets(area, &grid, streams.len());
            if self.options.direction == Direction::Rtl {
                for socket in &mut sockets {
                    socket.left = self.options.width - socket.left - socket.width;
                }
            }
            for (socket, stream) in sockets.into_iter().zip(streams.iter().cloned()) {
                placed.push(PlacedStream { socket, stream });
            }
        }
        match self.options.output_format {
            OutputFormat::Web => TileOutput::Web(format_for_web(placed)),
            OutputFormat::Ffmpeg => TileOutput::Ffmpeg(format_for_ffmpeg(&placed)),
        }
    }

    fn area(&self, priority: i32) -> &DrawArea {
        let idx = self
            .options
            .areas
            .binary_search_by_key(&priority, |area| area.priority)
            .unwrap_or(0);
        &self.options.areas[idx]
    }

    /// Sequential fold over the input: each stream is assigned an area
    /// against the occupancy accumulated so far, preserving input order per
    /// area.
    fn partition(&self, input: &[StreamInput]) -> BTreeMap<i32, Vec<StreamInput>> {
        let mut assigned: BTreeMap<i32, Vec<StreamInput>> = BTreeMap::new();
        for stream in input {
            let target = self.index.assign(&stream.id, stream.area, |priority| {
                assigned.get(&priority).map_or(0, Vec::len)
            });
            if let Some(priority) = target {
                debug!(stream = %stream.id, area = priority, "stream placed");
                assigned.entry(priority).or_default().push(stream.clone());
            }
        }
        assigned
    }

    /// First declared rule covering `count`; the last declared rule is a
    /// lenient fallback when none matches.
    fn select_grid(&self, area: &DrawArea, count: usize) -> GridRule {
        area.grid
            .iter()
            .find(|rule| rule.matches(count as u32))
            .unwrap_or_else(|| {
                warn!(
                    area = area.priority,
                    count, "no grid rule matches stream count, using last declared rule"
                );
                &area.grid[area.grid.len() - 1]
            })
            .clone()
    }

    fn sockets(&self, area: &DrawArea, grid: &GridRule, count: usize) -> Vec<Socket> {
        let margins = resolve_margins(grid.margin.as_ref());
        let nominal_width = distribute(area.width, margins[0], grid.col_count as i32);
        let nominal_height = distribute(area.height, margins[1], grid.row_count as i32);
        let (width, height, l_round, t_round) = fix_aspect_ratio(
            nominal_width,
            nominal_height,
            grid.force_aspect_ratio,
            grid.col_count as i32,
            grid.row_count as i32,
            area.width,
            area.height,
            margins,
        );
        debug!(
            area = area.priority,
            count, width, height, l_round, t_round, "socket geometry resolved"
        );

        let cols = grid.col_count as usize;
        let rows = count.div_ceil(cols);
        let mut last_row_offset = 0;
        if grid.to_count != Some(count as u32) && grid.center_last {
            let empty_slots = (cols * rows - count) as i32;
            last_row_offset = (empty_slots * width + empty_slots * margins[0]) / 2;
        }

        let mut sockets = Vec::with_capacity(count);
        for row in 0..rows {
            let row_i = row as i32;
            let top = area.top + row_i * height + (row_i + 1) * margins[1] + t_round;
            let row_offset = if row == rows - 1 { last_row_offset } else { 0 };
            for col in 0..cols {
                if sockets.len() == count {
                    break;
                }
                let col_i = col as i32;
                let left =
                    area.left + col_i * width + (col_i + 1) * margins[0] + row_offset + l_round;
                sockets.push(Socket {
                    width,
                    height,
                    top,
                    left,
                });
            }
        }
        sockets
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
