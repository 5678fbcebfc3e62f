//! Compositor output formatter.
//!
//! Converts placed streams into draw primitives an ffmpeg-style compositor
//! consumes directly: cropped/scaled stream placements, letterbox
//! rectangles where aspect ratios mismatch, title-label rectangles and
//! text, and voice-activity borders. One z counter is shared across all
//! primitive kinds for the whole call, so z strictly increases in emission
//! order.

use std::collections::BTreeMap;

use crate::layout::{
    engine::PlacedStream,
    stream::{ObjectFit, TitleSpec},
};

/// Letterbox background color.
const LETTERBOX_COLOR: &str = "#000000";

/// Axis-aligned rectangle in compositor coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Coords {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Coords {
    fn aspect(self) -> f64 {
        f64::from(self.w) / f64::from(self.h)
    }
}

/// Placement of one stream: which part of the source frame to take and
/// where to draw it on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StreamPlacement {
    /// Draw order; higher is drawn later (on top).
    pub z: i32,
    /// Canvas rectangle the stream is drawn into.
    pub target: Coords,
    /// Source-frame rectangle to crop before scaling.
    pub source: Coords,
}

/// Filled or outlined rectangle primitive.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RectangleSpec {
    /// Rectangle bounds.
    #[serde(flatten)]
    pub rect: Coords,
    /// Draw order.
    pub z: i32,
    /// Stroke or fill color.
    pub color: String,
    /// Border thickness; `0` for filled rectangles.
    pub thickness: i32,
    /// Fill the rectangle instead of stroking its border.
    #[serde(default, skip_serializing_if = "is_false")]
    pub fill: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Text primitive.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LabelSpec {
    /// Text origin and box bounds.
    #[serde(flatten)]
    pub rect: Coords,
    /// Draw order.
    pub z: i32,
    /// Text color.
    pub color: String,
    /// Text content.
    pub text: String,
    /// Font size in pixels.
    pub size: i32,
}

/// Complete compositor output of one composition call.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FfmpegOutput {
    /// Stream placements keyed by stream id.
    pub streams: BTreeMap<String, StreamPlacement>,
    /// Rectangle primitives (letterboxes, label backgrounds, VAD borders).
    pub rectangles: Vec<RectangleSpec>,
    /// Text primitives.
    pub labels: Vec<LabelSpec>,
}

/// Strictly increasing z assignment, scoped to one formatter call.
#[derive(Debug, Default)]
struct ZCounter(i32);

impl ZCounter {
    fn next(&mut self) -> i32 {
        let z = self.0;
        self.0 += 1;
        z
    }
}

/// Select the source-frame crop for an object-fit policy.
///
/// `contain`, `fill` and `none` intentionally share the full-frame
/// strategy; only `cover` crops.
fn select_source(fit: ObjectFit, target_box: Coords, origin: Coords) -> Coords {
    match fit {
        ObjectFit::Cover => cover_source(target_box, origin),
        ObjectFit::Contain | ObjectFit::Fill | ObjectFit::None => Coords {
            x: 0,
            y: 0,
            w: origin.w,
            h: origin.h,
        },
    }
}

/// Crop the origin frame to the box's aspect ratio, centered on the
/// cropped axis.
fn cover_source(target_box: Coords, origin: Coords) -> Coords {
    let box_ratio = f64::from(target_box.h) / f64::from(target_box.w);
    let origin_ratio = f64::from(origin.h) / f64::from(origin.w);
    if box_ratio < origin_ratio {
        let h = (f64::from(origin.w) * box_ratio) as i32;
        Coords {
            x: 0,
            y: (origin.h - h) / 2,
            w: origin.w,
            h,
        }
    } else {
        let w = (f64::from(origin.h) / box_ratio) as i32;
        Coords {
            x: (origin.w - w) / 2,
            y: 0,
            w,
            h: origin.h,
        }
    }
}

/// Shrink the target so it keeps the source aspect ratio, centered inside
/// the original box along the constraining axis.
fn middle_offset(source: Coords, target: Coords) -> Coords {
    let source_aspect = source.aspect();
    let target_aspect = target.aspect();
    if target_aspect - source_aspect <= 0.0 {
        let scaled_h = (f64::from(target.w) / source_aspect) as i32;
        Coords {
            x: target.x,
            y: target.y + (target.h - scaled_h) / 2,
            w: target.w,
            h: scaled_h,
        }
    } else {
        let scaled_w = (f64::from(target.h) * source_aspect) as i32;
        Coords {
            x: target.x + (target.w - scaled_w) / 2,
            y: target.y,
            w: scaled_w,
            h: target.h,
        }
    }
}

/// Scale a source frame into a socket box under an object-fit policy.
///
/// Returns the source crop, the (possibly shrunk and centered) target, and
/// the letterbox rectangle, present when the chosen source crop's aspect
/// ratio does not exactly equal the box's.
fn scale_source_to_box(
    fit: ObjectFit,
    target_box: Coords,
    origin: Coords,
) -> (Coords, Coords, Option<Coords>) {
    let source = select_source(fit, target_box, origin);
    let mut target = target_box;
    let mut letterbox = None;
    if source.aspect() != target.aspect() {
        letterbox = Some(target);
        target = middle_offset(source, target);
    }
    (source, target, letterbox)
}

#[derive(Clone, Copy, Debug)]
struct LabelInsets {
    margin_top: i32,
    margin_right: i32,
    margin_bottom: i32,
    margin_left: i32,
    padding_top: i32,
    padding_bottom: i32,
    padding_left: i32,
}

impl LabelInsets {
    /// Per-side values default to the shared scalars, overridden
    /// individually when set.
    fn resolve(title: &TitleSpec) -> Self {
        let margin = title.margin.unwrap_or(0);
        let padding = title.padding.unwrap_or(0);
        Self {
            margin_top: title.margin_top.unwrap_or(margin),
            margin_right: title.margin_right.unwrap_or(margin),
            margin_bottom: title.margin_bottom.unwrap_or(margin),
            margin_left: title.margin_left.unwrap_or(margin),
            padding_top: title.padding_top.unwrap_or(padding),
            padding_bottom: title.padding_bottom.unwrap_or(padding),
            padding_left: title.padding_left.unwrap_or(padding),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VerticalAnchor {
    Top,
    Bottom,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HorizontalAnchor {
    Left,
    Right,
    Center,
}

/// Parse a `"vertical horizontal"` anchor pair; unrecognized tokens fall
/// back to `bottom` / `right`.
fn parse_position(position: &str) -> (VerticalAnchor, HorizontalAnchor) {
    let mut tokens = position.split_whitespace();
    let vertical = match tokens.next() {
        Some("top") => VerticalAnchor::Top,
        Some("middle") => VerticalAnchor::Middle,
        _ => VerticalAnchor::Bottom,
    };
    let horizontal = match tokens.next() {
        Some("left") => HorizontalAnchor::Left,
        Some("center") => HorizontalAnchor::Center,
        _ => HorizontalAnchor::Right,
    };
    (vertical, horizontal)
}

#[derive(Clone, Copy, Debug)]
struct LabelLayout {
    rect: Coords,
    text: Coords,
    font_size: i32,
}

/// Lay a title label out inside its base rectangle.
///
/// The label box is clamped to the base minus margins on each axis, then
/// anchored per the title's position pair. Font size derives from the
/// padded label height.
fn label_layout(base: Coords, title: &TitleSpec) -> LabelLayout {
    let insets = LabelInsets::resolve(title);
    let max_w = base.w - insets.margin_left - insets.margin_right;
    let max_h = base.h - insets.margin_top - insets.margin_bottom;
    let w = title.width.min(max_w);
    let h = title.height.min(max_h);
    let (vertical, horizontal) = parse_position(&title.position);
    let y = match vertical {
        VerticalAnchor::Top => base.y + insets.margin_top,
        VerticalAnchor::Bottom => base.y + base.h - insets.margin_bottom - h,
        VerticalAnchor::Middle => base.y + base.h / 2 - h / 2,
    };
    let x = match horizontal {
        HorizontalAnchor::Left => base.x + insets.margin_left,
        HorizontalAnchor::Right => base.x + base.w - insets.margin_right - w,
        HorizontalAnchor::Center => base.x + base.w / 2 - w / 2,
    };
    let font_size = (f64::from(h - insets.padding_top - insets.padding_bottom) / 1.5) as i32;
    LabelLayout {
        rect: Coords { x, y, w, h },
        text: Coords {
            x: x + insets.padding_left,
            y: y + insets.padding_top,
            w,
            h,
        },
        font_size,
    }
}

/// Format placed streams as compositor draw primitives.
///
/// Emission order per stream fixes the draw order: letterbox rectangle (if
/// any), stream placement, label rectangle and text (if a title is
/// present), VAD rectangle (if present). The z counter is shared across
/// the whole call and assigned in strict emission order over all streams
/// in input order.
pub fn format_for_ffmpeg(placed: &[PlacedStream]) -> FfmpegOutput {
    let mut streams = BTreeMap::new();
    let mut rectangles = Vec::new();
    let mut labels = Vec::new();
    let mut z = ZCounter::default();

    for record in placed {
        let target_box = Coords {
            x: record.socket.left,
            y: record.socket.top,
            w: record.socket.width,
            h: record.socket.height,
        };
        let origin = Coords {
            x: 0,
            y: 0,
            w: record.stream.base_width,
            h: record.stream.base_height,
        };
        let (source, target, letterbox) =
            scale_source_to_box(record.stream.object_fit, target_box, origin);
        let base = letterbox.unwrap_or_default();
        if base.w > 0 && base.h > 0 {
            rectangles.push(RectangleSpec {
                rect: base,
                z: z.next(),
                color: LETTERBOX_COLOR.to_string(),
                thickness: 0,
                fill: true,
            });
        }
        streams.insert(
            record.stream.id.clone(),
            StreamPlacement {
                z: z.next(),
                target,
                source,
            },
        );
        if let Some(title) = &record.stream.title {
            let layout = label_layout(base, title);
            rectangles.push(RectangleSpec {
                rect: layout.rect,
                z: z.next(),
                color: title.background.clone(),
                thickness: 0,
                fill: true,
            });
            labels.push(LabelSpec {
                rect: layout.text,
                z: z.next(),
                color: title.color.clone(),
                text: title.label.clone(),
                size: layout.font_size,
            });
        }
        if let Some(vad) = &record.stream.vad {
            rectangles.push(RectangleSpec {
                rect: base,
                z: z.next(),
                color: vad.color.clone(),
                thickness: vad.thickness,
                fill: false,
            });
        }
    }

    FfmpegOutput {
        streams,
        rectangles,
        labels,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/ffmpeg.rs"]
mod tests;
