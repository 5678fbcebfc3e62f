//! Per-call stream input model.

/// One input stream to place on the canvas.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInput {
    /// Opaque caller-supplied identifier, unique within one call.
    pub id: String,
    /// Target area priority. Unknown or absent falls back to the default
    /// (highest-priority) area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<i32>,
    /// Source frame width in pixels.
    #[serde(default)]
    pub base_width: i32,
    /// Source frame height in pixels.
    #[serde(default)]
    pub base_height: i32,
    /// Strategy for scaling the source frame into its socket.
    #[serde(default)]
    pub object_fit: ObjectFit,
    /// Optional title overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleSpec>,
    /// Optional voice-activity border overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vad: Option<VadSpec>,
}

/// Object-fit policy for scaling a source frame into a target box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    /// Fit the full frame inside the box, letterboxing the rest.
    Contain,
    /// Crop the frame so it fills the box.
    Cover,
    /// Stretch the frame over the box.
    Fill,
    /// No fitting (default).
    #[default]
    None,
}

/// Title-label overlay specification.
///
/// Per-side margins and paddings each default to the shared `margin` /
/// `padding` scalar and are overridden individually when set.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSpec {
    /// Label text.
    pub label: String,
    /// Desired label box width in pixels (clamped to the available box).
    pub width: i32,
    /// Desired label box height in pixels (clamped to the available box).
    pub height: i32,
    /// Two-token `"vertical horizontal"` anchor pair. Vertical tokens:
    /// `top`, `bottom`, `middle` (default `bottom`); horizontal tokens:
    /// `left`, `right`, `center` (default `right`).
    pub position: String,
    /// Label box background color.
    pub background: String,
    /// Label text color.
    pub color: String,
    /// Shared margin scalar in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<i32>,
    /// Top margin override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<i32>,
    /// Right margin override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<i32>,
    /// Bottom margin override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<i32>,
    /// Left margin override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<i32>,
    /// Shared padding scalar in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<i32>,
    /// Top padding override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<i32>,
    /// Right padding override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<i32>,
    /// Bottom padding override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<i32>,
    /// Left padding override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<i32>,
}

/// Voice-activity border overlay specification.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VadSpec {
    /// Border thickness in pixels.
    pub thickness: i32,
    /// Border color.
    pub color: String,
}
