#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Entry {i}")).collect()
}

// --- angle_per_segment ---

#[test]
fn angle_per_segment_rejects_zero() {
    assert_eq!(angle_per_segment(0), Err(WheelError::DegenerateGeometry));
}

#[test]
fn angle_per_segment_times_count_is_full_turn() {
    for n in 1..=100 {
        let span = angle_per_segment(n).unwrap();
        assert!(approx_eq(span * n as f64, 360.0), "n = {n}");
    }
}

// --- WheelLayout::build ---

#[test]
fn build_rejects_empty_list() {
    assert_eq!(WheelLayout::build(&[]), Err(WheelError::DegenerateGeometry));
}

#[test]
fn segments_tile_the_circle_without_gaps() {
    for n in 2..=100 {
        let layout = WheelLayout::build(&names(n)).unwrap();
        assert_eq!(layout.len(), n);
        assert_eq!(layout.segments[0].start_angle, 0.0);
        for pair in layout.segments.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
            assert!(pair[0].start_angle < pair[0].end_angle);
        }
        assert!(approx_eq(layout.segments[n - 1].end_angle, 360.0), "n = {n}");
    }
}

#[test]
fn two_segment_paths_are_half_discs() {
    let layout = WheelLayout::build(&names(2)).unwrap();
    assert_eq!(layout.segments[0].path, "M 50 50 L 100 50 A 50 50 0 0 1 0 50 Z");
    assert_eq!(layout.segments[1].path, "M 50 50 L 0 50 A 50 50 0 0 1 100 50 Z");
    assert!(!layout.segments[0].large_arc);
}

#[test]
fn single_segment_uses_large_arc() {
    let layout = WheelLayout::build(&names(1)).unwrap();
    assert!(layout.segments[0].large_arc);
    assert!(layout.segments[0].path.contains(" 0 1 1 "));
}

#[test]
fn quarter_segment_endpoints_lie_on_the_rim() {
    let layout = WheelLayout::build(&names(4)).unwrap();
    let seg = &layout.segments[0];
    assert!(approx_eq(seg.arc_start.x, 100.0));
    assert!(approx_eq(seg.arc_start.y, 50.0));
    assert!(approx_eq(seg.arc_end.x, 50.0));
    assert!(approx_eq(seg.arc_end.y, 100.0));
    assert_eq!(seg.mid_angle, 45.0);
}

#[test]
fn colors_cycle_through_palette() {
    let layout = WheelLayout::build(&names(10)).unwrap();
    assert_eq!(layout.segments[0].color, WHEEL_COLORS[0]);
    assert_eq!(layout.segments[8].color, WHEEL_COLORS[0]);
    assert_eq!(layout.segments[9].color, WHEEL_COLORS[1]);
}

#[test]
fn duplicate_entries_keep_distinct_slices() {
    let list = vec!["Sam".to_owned(), "Sam".to_owned(), "Kim".to_owned()];
    let layout = WheelLayout::build(&list).unwrap();
    assert_eq!(layout.segments[0].text, "Sam");
    assert_eq!(layout.segments[1].text, "Sam");
    assert_ne!(layout.segments[0].start_angle, layout.segments[1].start_angle);
}

#[test]
fn layout_serializes_camel_case() {
    let layout = WheelLayout::build(&names(2)).unwrap();
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["anglePerSegment"], 180.0);
    assert!(json["segments"][0]["labelAnchor"]["x"].is_number());
}

// --- label placement ---

#[test]
fn label_radius_shrinks_in_tiers() {
    assert_eq!(label_radius_factor(2), 0.75);
    assert_eq!(label_radius_factor(30), 0.75);
    assert_eq!(label_radius_factor(31), 0.70);
    assert_eq!(label_radius_factor(60), 0.70);
    assert_eq!(label_radius_factor(61), 0.60);
}

#[test]
fn label_anchor_sits_on_label_radius() {
    let layout = WheelLayout::build(&names(40)).unwrap();
    assert!(approx_eq(layout.label_radius, 35.0));
    for seg in &layout.segments {
        let dx = seg.label_anchor.x - 50.0;
        let dy = seg.label_anchor.y - 50.0;
        assert!(approx_eq(dx.hypot(dy), 35.0));
    }
}

#[test]
fn labels_on_left_half_are_flipped() {
    assert_eq!(upright_label_rotation(45.0), 45.0);
    assert_eq!(upright_label_rotation(90.0), 90.0);
    assert_eq!(upright_label_rotation(135.0), 315.0);
    assert_eq!(upright_label_rotation(269.0), 449.0);
    assert_eq!(upright_label_rotation(270.0), 270.0);
}

#[test]
fn font_size_tiers() {
    assert_eq!(label_font_size(12), 4.0);
    assert_eq!(label_font_size(13), 3.0);
    assert_eq!(label_font_size(31), 2.4);
    assert_eq!(label_font_size(61), 1.8);
}

// --- truncation ---

#[test]
fn truncation_limit_tiers() {
    assert_eq!(max_label_chars(15), 12);
    assert_eq!(max_label_chars(16), 10);
    assert_eq!(max_label_chars(31), 8);
    assert_eq!(max_label_chars(61), 6);
}

#[test]
fn short_labels_are_untouched() {
    assert_eq!(truncate_label("Charlie", 12), "Charlie");
    assert_eq!(truncate_label("exactly12chr", 12), "exactly12chr");
}

#[test]
fn long_labels_end_in_marker() {
    assert_eq!(truncate_label("Bartholomew Jones", 12), "Bartholome..");
    assert_eq!(truncate_label("Maximilian", 6), "Maxi..");
}

#[test]
fn truncation_counts_characters_not_bytes() {
    assert_eq!(truncate_label("Émilie-Æsa-Øystein", 8), "Émilie..");
}

#[test]
fn layout_applies_truncation_for_crowded_wheels() {
    let mut list = names(70);
    list[0] = "Christopher".to_owned();
    let layout = WheelLayout::build(&list).unwrap();
    assert_eq!(layout.max_label_chars, 6);
    assert_eq!(layout.segments[0].label, "Chri..");
    assert_eq!(layout.segments[0].text, "Christopher");
}

// --- points ---

#[test]
fn on_wheel_places_points_around_center() {
    assert_eq!(Point::on_wheel(0.0, 50.0), Point::new(100.0, 50.0));
    let bottom = Point::on_wheel(90.0, 25.0);
    assert!(approx_eq(bottom.x, 50.0));
    assert!(approx_eq(bottom.y, 75.0));
}

// --- pointer ---

#[test]
fn pointer_angle_mirrors_rotation() {
    assert_eq!(pointer_angle(0.0), 0.0);
    assert_eq!(pointer_angle(90.0), 270.0);
    assert_eq!(pointer_angle(1890.0), 270.0);
    assert_eq!(pointer_angle(360.0), 0.0);
}

#[test]
fn pointer_index_for_two_segments() {
    assert_eq!(pointer_segment_index(1890.0, 2), Some(1));
    assert_eq!(pointer_segment_index(1800.0, 2), Some(0));
    assert_eq!(pointer_segment_index(1.0, 2), Some(1));
}

#[test]
fn pointer_index_is_always_in_range() {
    let mut rotation = 0.0;
    while rotation < 3600.0 {
        for n in [2, 3, 7, 8, 99, 100] {
            let idx = pointer_segment_index(rotation, n).unwrap();
            assert!(idx < n);
        }
        rotation += 0.37;
    }
}

#[test]
fn pointer_wraps_to_first_segment_just_past_a_whole_turn() {
    // 360 - 1e-14 rounds to 360, which wraps to 0.
    assert_eq!(pointer_angle(1e-14), 0.0);
    assert_eq!(pointer_segment_index(1e-14, 7), Some(0));
    assert_eq!(pointer_segment_index(1e-9, 7), Some(6));
}

#[test]
fn pointer_index_none_for_empty_wheel() {
    assert_eq!(pointer_segment_index(45.0, 0), None);
}
