//! Integer geometry primitives shared by the placement engine.
//!
//! All arithmetic is pixel-exact: divisions truncate toward zero, matching
//! the floor semantics of the downstream compositors for the positive
//! extents the engine works with. Leftover pixels from a division are not
//! smeared across sockets; half of the remainder is applied once as a
//! centering offset.

use serde_json::Value;

/// Margin specification as it appears in layout JSON: either a single
/// uniform pixel value or a `[horizontal, vertical]` array.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Margin {
    /// One value applied to both axes.
    Uniform(i32),
    /// Per-axis values; see [`resolve_margins`] for how lengths other than
    /// two are interpreted.
    PerAxis(Vec<Value>),
}

fn numeric_or_zero(value: &Value) -> i32 {
    value.as_f64().map_or(0, |v| v as i32)
}

/// Normalize a margin specification into `[horizontal, vertical]` pixels.
///
/// Absent margin and empty arrays resolve to `[0, 0]`, a single entry is
/// replicated to both axes, extra entries beyond the first two are ignored,
/// and non-numeric entries resolve to `0` at their position.
pub fn resolve_margins(margin: Option<&Margin>) -> [i32; 2] {
    match margin {
        None => [0, 0],
        Some(Margin::Uniform(m)) => [*m, *m],
        Some(Margin::PerAxis(values)) => match values.as_slice() {
            [] => [0, 0],
            [only] => [numeric_or_zero(only), numeric_or_zero(only)],
            [h, v, ..] => [numeric_or_zero(h), numeric_or_zero(v)],
        },
    }
}

fn length_without_margins(length: i32, margin: i32, count: i32) -> i32 {
    length - margin * (count + 1)
}

fn half_remainder(without_margins: i32, size: i32, count: i32) -> i32 {
    (without_margins - size * count) / 2
}

/// Distribute a linear extent across `count` sockets separated (and edged)
/// by `margin` pixels.
///
/// Returns the per-socket size and the halved rounding remainder. The
/// remainder is an offset applied once to center the leftover pixels, not
/// added per socket.
pub fn distribute(length: i32, margin: i32, count: i32) -> (i32, i32) {
    let without_margins = length_without_margins(length, margin, count);
    let size = without_margins / count;
    (size, half_remainder(without_margins, size, count))
}

/// Force the nominal socket onto a target width/height ratio.
///
/// Takes the `(size, half_remainder)` pairs produced by [`distribute`] for
/// each axis. When a ratio is set and the nominal ratio differs, the
/// constrained dimension shrinks and its centering remainder is recomputed
/// against the extent that axis was distributed from; the other dimension
/// is held fixed.
#[allow(clippy::too_many_arguments)]
pub fn fix_aspect_ratio(
    (width, l_round): (i32, i32),
    (height, t_round): (i32, i32),
    ratio: Option<f64>,
    cols: i32,
    rows: i32,
    area_width: i32,
    area_height: i32,
    margins: [i32; 2],
) -> (i32, i32, i32, i32) {
    let Some(ratio) = ratio else {
        return (width, height, l_round, t_round);
    };
    let nominal = f64::from(width) / f64::from(height);
    if nominal == ratio {
        return (width, height, l_round, t_round);
    }
    if nominal > ratio {
        let without_margins = length_without_margins(area_width, margins[0], cols);
        let new_width = (f64::from(height) * ratio) as i32;
        let new_l_round = half_remainder(without_margins, new_width, cols);
        (new_width, height, new_l_round, t_round)
    } else {
        let without_margins = length_without_margins(area_height, margins[1], rows);
        let new_height = (f64::from(width) / ratio) as i32;
        let new_t_round = half_remainder(without_margins, new_height, rows);
        (width, new_height, l_round, new_t_round)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
