//! Browser-style output formatter.

use crate::layout::engine::PlacedStream;

/// Format placed streams for a browser-style absolute-position layout.
///
/// Each placed stream already is a `{top, left, width, height, stream}` box
/// description, so this is a structural pass-through with no computation.
pub fn format_for_web(placed: Vec<PlacedStream>) -> Vec<PlacedStream> {
    placed
}
