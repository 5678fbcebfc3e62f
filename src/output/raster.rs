//! Calibration pattern generator.
//!
//! Produces a compositor output that draws a pixel ruler over the canvas,
//! used to verify a downstream compositor's coordinate handling and font
//! sizing before trusting it with real layouts.

use crate::output::ffmpeg::{Coords, FfmpegOutput, LabelSpec, RectangleSpec};

const LABEL_LADDER_ROWS: i32 = 21;

/// Generate a calibration pattern for the given canvas.
///
/// Horizontal 1px lines run every 5 pixels, alternating red and yellow;
/// vertical lines alternate green and cyan. With `with_labels`, three
/// columns of text probe font sizing: fixed box height with growing font,
/// growing box height with matching font, and growing box height with a
/// fixed 16px font. Labels sit in the 1000+ z band, above the ruler lines.
pub fn calibration_raster(width: i32, height: i32, with_labels: bool) -> FfmpegOutput {
    let mut rectangles = Vec::new();
    let mut z = 0;
    for i in 0..height / 10 {
        let y = i * 10;
        rectangles.push(ruler_line(0, y, width, 1, "#CC0000", z));
        z += 1;
        if y + 5 <= height {
            rectangles.push(ruler_line(0, y + 5, width, 1, "#CCCC00", z));
            z += 1;
        }
    }
    for i in 0..width / 10 {
        let x = i * 10;
        rectangles.push(ruler_line(x, 0, 1, height, "#00CC00", z));
        z += 1;
        if x + 5 <= width {
            rectangles.push(ruler_line(x + 5, 0, 1, height, "#00CCCC", z));
            z += 1;
        }
    }

    let mut labels = Vec::new();
    if with_labels {
        for i in 0..LABEL_LADDER_ROWS {
            let y = 10 + 20 * i;
            labels.push(ladder_label(10, y, 20, i + 1, 1000 + i));
            labels.push(ladder_label(220, y, i + 1, i + 1, 1100 + i));
            labels.push(ladder_label(440, y, i + 1, 16, 1200 + i));
        }
    }

    FfmpegOutput {
        streams: std::collections::BTreeMap::new(),
        rectangles,
        labels,
    }
}

fn ruler_line(x: i32, y: i32, w: i32, h: i32, color: &str, z: i32) -> RectangleSpec {
    RectangleSpec {
        rect: Coords { x, y, w, h },
        z,
        color: color.to_string(),
        thickness: 1,
        fill: false,
    }
}

fn ladder_label(x: i32, y: i32, h: i32, size: i32, z: i32) -> LabelSpec {
    LabelSpec {
        rect: Coords { x, y, w: 200, h },
        z,
        color: "#FFFFFF".to_string(),
        text: format!("{size}size{y}y{h}h"),
        size,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/raster.rs"]
mod tests;
