//! tilemux computes pixel-accurate placement of video streams inside
//! prioritized rectangular areas of a fixed canvas, and serializes the
//! placement for a downstream renderer.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: [`LayoutOptions`] -> [`Tiler`] (fails fast, once, at
//!    construction; the area capacity/overflow index is built here)
//! 2. **Place**: `&[StreamInput] -> sockets` (area assignment with overflow
//!    chaining, grid-rule selection, integer socket geometry)
//! 3. **Format**: sockets -> [`TileOutput`] (a browser-style box list, or
//!    compositor draw primitives with letterboxing, labels and z-order)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure and synchronous**: a composition call is a function of the
//!   engine configuration and the stream list; nothing is retained between
//!   calls and concurrent calls need no coordination.
//! - **Placement anomalies are policy, not errors**: unknown areas fall
//!   back to the default area, unmatched grid rules fall back to the last
//!   declared rule, and streams that fit nowhere are dropped from the
//!   output. All three are logged via `tracing`.
//! - **Integer pixels end-to-end**: geometry is computed in `i32` pixels
//!   with floor semantics; rounding leftovers are centered, not smeared.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod layout;
mod output;

pub use foundation::error::{TileError, TileResult};
pub use foundation::geometry::{Margin, distribute, fix_aspect_ratio, resolve_margins};
pub use layout::engine::{PlacedStream, Socket, TileOutput, Tiler};
pub use layout::model::{
    Direction, DrawArea, GridRule, LayoutOptions, OutputFormat, Overflow, OverflowKeyword,
};
pub use layout::stream::{ObjectFit, StreamInput, TitleSpec, VadSpec};
pub use output::ffmpeg::{
    Coords, FfmpegOutput, LabelSpec, RectangleSpec, StreamPlacement, format_for_ffmpeg,
};
pub use output::raster::calibration_raster;
pub use output::web::format_for_web;
