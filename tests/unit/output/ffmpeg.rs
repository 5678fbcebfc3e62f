use super::*;
use crate::layout::{
    engine::{PlacedStream, Socket},
    stream::{StreamInput, VadSpec},
};

fn coords(x: i32, y: i32, w: i32, h: i32) -> Coords {
    Coords { x, y, w, h }
}

fn stream(id: &str, base_width: i32, base_height: i32, fit: ObjectFit) -> StreamInput {
    StreamInput {
        id: id.to_string(),
        area: None,
        base_width,
        base_height,
        object_fit: fit,
        title: None,
        vad: None,
    }
}

fn placed(socket: Socket, stream: StreamInput) -> PlacedStream {
    PlacedStream { socket, stream }
}

fn title(width: i32, height: i32, position: &str) -> TitleSpec {
    TitleSpec {
        label: "Speaker".to_string(),
        width,
        height,
        position: position.to_string(),
        background: "#222222".to_string(),
        color: "#FFFFFF".to_string(),
        margin: None,
        margin_top: None,
        margin_right: None,
        margin_bottom: None,
        margin_left: None,
        padding: None,
        padding_top: None,
        padding_right: None,
        padding_bottom: None,
        padding_left: None,
    }
}

#[test]
fn middle_offset_matches_reference_values() {
    // (target, source, expected x/y offsets), from the known corpus.
    let cases = [
        (coords(0, 0, 300, 600), coords(0, 0, 300, 600), (0, 0)),
        (coords(0, 0, 300, 600), coords(0, 0, 600, 300), (0, 225)),
        (coords(0, 0, 300, 300), coords(0, 0, 1280, 720), (0, 66)),
        (coords(0, 0, 600, 300), coords(0, 0, 1280, 720), (33, 0)),
        (coords(0, 0, 1920, 1080), coords(0, 0, 1080, 1920), (656, 0)),
        (coords(0, 0, 1080, 1920), coords(0, 0, 1920, 1080), (0, 656)),
        (coords(0, 0, 1920, 1080), coords(0, 0, 300, 300), (420, 0)),
    ];
    for (target, source, (dx, dy)) in cases {
        let fitted = middle_offset(source, target);
        assert_eq!(
            (fitted.x, fitted.y),
            (dx, dy),
            "target {}x{} source {}x{}",
            target.w,
            target.h,
            source.w,
            source.h
        );
    }
}

#[test]
fn middle_offset_preserves_the_box_origin() {
    let fitted = middle_offset(coords(0, 0, 300, 600), coords(702, 404, 1080, 1920));
    assert_eq!((fitted.x, fitted.y), (762, 404));
    assert_eq!((fitted.w, fitted.h), (960, 1920));
}

#[test]
fn cover_crops_the_taller_origin_vertically() {
    let source = cover_source(coords(0, 0, 1920, 1080), coords(0, 0, 720, 1280));
    assert_eq!(source, coords(0, 437, 720, 405));
}

#[test]
fn cover_crops_the_wider_origin_horizontally() {
    let source = cover_source(coords(0, 0, 720, 1280), coords(0, 0, 1920, 1080));
    assert_eq!(source, coords(656, 0, 607, 1080));
}

#[test]
fn contain_fill_and_none_share_the_full_frame() {
    let target_box = coords(0, 0, 640, 360);
    let origin = coords(0, 0, 720, 1280);
    let full = coords(0, 0, 720, 1280);
    assert_eq!(select_source(ObjectFit::Contain, target_box, origin), full);
    assert_eq!(select_source(ObjectFit::Fill, target_box, origin), full);
    assert_eq!(select_source(ObjectFit::None, target_box, origin), full);
}

#[test]
fn aspect_mismatch_emits_letterbox_behind_the_shrunk_target() {
    let socket = Socket {
        width: 200,
        height: 100,
        top: 20,
        left: 10,
    };
    let out = format_for_ffmpeg(&[placed(socket, stream("a", 100, 100, ObjectFit::None))]);
    assert_eq!(out.rectangles.len(), 1);
    let letterbox = &out.rectangles[0];
    assert_eq!(letterbox.rect, coords(10, 20, 200, 100));
    assert_eq!(letterbox.z, 0);
    assert_eq!(letterbox.color, "#000000");
    assert!(letterbox.fill);
    assert_eq!(letterbox.thickness, 0);

    let placement = &out.streams["a"];
    assert_eq!(placement.z, 1);
    assert_eq!(placement.source, coords(0, 0, 100, 100));
    assert_eq!(placement.target, coords(60, 20, 100, 100));
}

#[test]
fn matching_aspect_emits_no_letterbox() {
    let socket = Socket {
        width: 200,
        height: 200,
        top: 0,
        left: 0,
    };
    let out = format_for_ffmpeg(&[placed(socket, stream("a", 100, 100, ObjectFit::None))]);
    assert!(out.rectangles.is_empty());
    assert_eq!(out.streams["a"].z, 0);
    assert_eq!(out.streams["a"].target, coords(0, 0, 200, 200));
}

#[test]
fn z_increases_by_one_per_primitive_across_the_call() {
    let socket = Socket {
        width: 200,
        height: 100,
        top: 0,
        left: 0,
    };
    let decorated = |id: &str| {
        let mut s = stream(id, 100, 100, ObjectFit::None);
        s.title = Some(title(80, 30, "bottom right"));
        s.vad = Some(VadSpec {
            thickness: 2,
            color: "#00FF00".to_string(),
        });
        s
    };
    let out = format_for_ffmpeg(&[
        placed(socket, decorated("a")),
        placed(socket, decorated("b")),
    ]);

    // Per stream: letterbox, stream, label rect, label text, vad.
    assert_eq!(out.streams["a"].z, 1);
    assert_eq!(out.streams["b"].z, 6);
    let rect_z: Vec<i32> = out.rectangles.iter().map(|r| r.z).collect();
    assert_eq!(rect_z, vec![0, 2, 4, 5, 7, 9]);
    let label_z: Vec<i32> = out.labels.iter().map(|l| l.z).collect();
    assert_eq!(label_z, vec![3, 8]);

    let mut all: Vec<i32> = rect_z
        .into_iter()
        .chain(label_z)
        .chain([out.streams["a"].z, out.streams["b"].z])
        .collect();
    all.sort_unstable();
    assert_eq!(all, (0..10).collect::<Vec<i32>>());
}

#[test]
fn label_defaults_anchor_bottom_right_and_clamp_to_the_box() {
    let mut spec = title(500, 40, "diagonal everywhere");
    spec.margin = Some(10);
    let layout = label_layout(coords(0, 0, 200, 100), &spec);
    // Width clamps to the base minus margins; unknown anchors fall back to
    // bottom right.
    assert_eq!(layout.rect, coords(10, 50, 180, 40));
    assert_eq!(layout.text, coords(10, 50, 180, 40));
    assert_eq!(layout.font_size, 26);
}

#[test]
fn label_top_left_offsets_text_by_padding() {
    let mut spec = title(100, 30, "top left");
    spec.padding = Some(4);
    let layout = label_layout(coords(0, 0, 200, 100), &spec);
    assert_eq!(layout.rect, coords(0, 0, 100, 30));
    assert_eq!(layout.text.x, 4);
    assert_eq!(layout.text.y, 4);
    assert_eq!(layout.font_size, 14);
}

#[test]
fn label_middle_center_splits_the_box() {
    let layout = label_layout(coords(0, 0, 200, 100), &title(100, 30, "middle center"));
    assert_eq!(layout.rect, coords(50, 35, 100, 30));
}

#[test]
fn per_side_overrides_beat_shared_scalars() {
    let mut spec = title(100, 30, "top left");
    spec.margin = Some(10);
    spec.margin_left = Some(2);
    spec.padding = Some(4);
    spec.padding_top = Some(0);
    let layout = label_layout(coords(0, 0, 200, 100), &spec);
    assert_eq!(layout.rect.x, 2);
    assert_eq!(layout.rect.y, 10);
    assert_eq!(layout.text.y, layout.rect.y);
    // Font height loses only the overridden top padding.
    assert_eq!(layout.font_size, ((30 - 0 - 4) as f64 / 1.5) as i32);
}

#[test]
fn vad_border_reuses_the_letterbox_bounds_after_labels() {
    let socket = Socket {
        width: 200,
        height: 100,
        top: 0,
        left: 0,
    };
    let mut s = stream("a", 100, 100, ObjectFit::None);
    s.title = Some(title(80, 30, "bottom right"));
    s.vad = Some(VadSpec {
        thickness: 3,
        color: "#FF0000".to_string(),
    });
    let out = format_for_ffmpeg(&[placed(socket, s)]);
    let vad = out.rectangles.last().unwrap();
    assert_eq!(vad.rect, coords(0, 0, 200, 100));
    assert_eq!(vad.thickness, 3);
    assert_eq!(vad.color, "#FF0000");
    assert!(!vad.fill);
    assert!(vad.z > out.rectangles[1].z);
}

#[test]
fn zero_sized_origin_still_places_the_stream() {
    let socket = Socket {
        width: 200,
        height: 100,
        top: 0,
        left: 0,
    };
    let out = format_for_ffmpeg(&[placed(socket, stream("a", 0, 0, ObjectFit::None))]);
    assert!(out.streams.contains_key("a"));
}
