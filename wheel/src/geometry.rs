//! Segment geometry: angular spans, SVG sector paths, and label placement.
//!
//! Everything here is a pure function of the ordered segment list. The layout
//! is recomputed whenever the list changes and never depends on rotation or
//! time; the renderer applies the current rotation as a single transform on
//! top of it.
//!
//! Angles are in degrees, measured clockwise from the positive x axis (the
//! pointer sits at 3 o'clock), in the wheel's unrotated frame.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::Serialize;

use crate::consts::{FULL_TURN_DEG, LABEL_ELLIPSIS, WHEEL_CENTER, WHEEL_COLORS, WHEEL_RADIUS};
use crate::error::WheelError;

/// A point in view-box coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point at `angle_deg` on a circle of `radius` around the wheel center.
    #[must_use]
    pub fn on_wheel(angle_deg: f64, radius: f64) -> Self {
        let rad = angle_deg.to_radians();
        Self::new(WHEEL_CENTER + radius * rad.cos(), WHEEL_CENTER + radius * rad.sin())
    }
}

/// Draw data for one wheel slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentGeometry {
    pub index: usize,
    /// Full entry text.
    pub text: String,
    /// Text as drawn, possibly truncated.
    pub label: String,
    pub color: &'static str,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub arc_start: Point,
    pub arc_end: Point,
    pub large_arc: bool,
    /// SVG path data for the filled sector.
    pub path: String,
    pub label_anchor: Point,
    /// Label rotation in degrees about `label_anchor`; never upside-down.
    pub label_rotation: f64,
}

/// The full wheel layout for one segment list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelLayout {
    pub angle_per_segment: f64,
    pub label_radius: f64,
    pub font_size: f64,
    pub max_label_chars: usize,
    pub segments: Vec<SegmentGeometry>,
}

impl WheelLayout {
    /// Build the layout for `segments`.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::DegenerateGeometry`] for an empty list. Callers
    /// normally pass [`crate::roster::Roster::display_segments`], which never
    /// is empty.
    pub fn build(segments: &[String]) -> Result<Self, WheelError> {
        let count = segments.len();
        let span = angle_per_segment(count)?;
        let label_radius = WHEEL_RADIUS * label_radius_factor(count);
        let max_label_chars = max_label_chars(count);

        let segments = segments
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let start_angle = count_to_f64(index) * span;
                let end_angle = count_to_f64(index + 1) * span;
                let mid_angle = start_angle + span / 2.0;
                let arc_start = Point::on_wheel(start_angle, WHEEL_RADIUS);
                let arc_end = Point::on_wheel(end_angle, WHEEL_RADIUS);
                let large_arc = span > 180.0;
                SegmentGeometry {
                    index,
                    text: text.clone(),
                    label: truncate_label(text, max_label_chars),
                    color: WHEEL_COLORS[index % WHEEL_COLORS.len()],
                    start_angle,
                    end_angle,
                    mid_angle,
                    arc_start,
                    arc_end,
                    large_arc,
                    path: sector_path(arc_start, arc_end, large_arc),
                    label_anchor: Point::on_wheel(mid_angle, label_radius),
                    label_rotation: upright_label_rotation(mid_angle),
                }
            })
            .collect();

        Ok(Self { angle_per_segment: span, label_radius, font_size: label_font_size(count), max_label_chars, segments })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Angular span of each of `count` equal segments.
///
/// # Errors
///
/// Returns [`WheelError::DegenerateGeometry`] when `count` is zero.
pub fn angle_per_segment(count: usize) -> Result<f64, WheelError> {
    if count == 0 {
        return Err(WheelError::DegenerateGeometry);
    }
    Ok(FULL_TURN_DEG / count_to_f64(count))
}

/// Label distance from the center as a fraction of the radius.
#[must_use]
pub fn label_radius_factor(count: usize) -> f64 {
    match count {
        0..=30 => 0.75,
        31..=60 => 0.70,
        _ => 0.60,
    }
}

/// Longest label drawn before truncation kicks in.
#[must_use]
pub fn max_label_chars(count: usize) -> usize {
    match count {
        0..=15 => 12,
        16..=30 => 10,
        31..=60 => 8,
        _ => 6,
    }
}

/// Label font size in view-box units.
#[must_use]
pub fn label_font_size(count: usize) -> f64 {
    match count {
        0..=12 => 4.0,
        13..=30 => 3.0,
        31..=60 => 2.4,
        _ => 1.8,
    }
}

/// Shorten `text` to `max_chars`, ending in [`LABEL_ELLIPSIS`] when cut.
#[must_use]
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let keep = max_chars.saturating_sub(LABEL_ELLIPSIS.chars().count());
    let mut out = text.chars().take(keep).collect::<String>();
    out.push_str(LABEL_ELLIPSIS);
    out
}

/// Rotation for a label centered at `mid_angle`, flipped on the left half.
#[must_use]
pub fn upright_label_rotation(mid_angle: f64) -> f64 {
    if mid_angle > 90.0 && mid_angle < 270.0 { mid_angle + 180.0 } else { mid_angle }
}

/// Angle under the fixed pointer, in the wheel's unrotated frame.
///
/// Rotating the wheel clockwise by `r` brings the slice at `-r mod 360`
/// beneath the pointer.
///
/// A rotation a hair past a whole turn (say `1e-14`) makes `360 - r` round to
/// exactly 360, which wraps to 0 rather than just below 360. The pointer then
/// reads segment 0 instead of the last segment. The result stays in range and
/// the next frame that clears the rounding error reads the last segment.
#[must_use]
pub fn pointer_angle(rotation: f64) -> f64 {
    (FULL_TURN_DEG - rotation.rem_euclid(FULL_TURN_DEG)).rem_euclid(FULL_TURN_DEG)
}

/// Index of the segment under the pointer, clamped into `0..count`.
///
/// Returns `None` only when `count` is zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pointer_segment_index(rotation: f64, count: usize) -> Option<usize> {
    let Ok(span) = angle_per_segment(count) else {
        return None;
    };
    let raw = (pointer_angle(rotation) / span).floor();
    let index = if raw.is_finite() && raw > 0.0 { raw as usize } else { 0 };
    Some(index.min(count - 1))
}

fn sector_path(arc_start: Point, arc_end: Point, large_arc: bool) -> String {
    let c = fmt_coord(WHEEL_CENTER);
    let r = fmt_coord(WHEEL_RADIUS);
    format!(
        "M {c} {c} L {} {} A {r} {r} 0 {} 1 {} {} Z",
        fmt_coord(arc_start.x),
        fmt_coord(arc_start.y),
        u8::from(large_arc),
        fmt_coord(arc_end.x),
        fmt_coord(arc_end.y),
    )
}

/// Four decimal places, no trailing zeros, no negative zero.
fn fmt_coord(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0 + 0.0;
    format!("{rounded}")
}

#[allow(clippy::cast_precision_loss)]
fn count_to_f64(count: usize) -> f64 {
    count as f64
}
