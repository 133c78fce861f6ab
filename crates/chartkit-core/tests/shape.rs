// File: crates/chartkit-core/tests/shape.rs
// Purpose: Pie layout ordering, arc paths/centroids and polyline path data.

use std::f64::consts::{PI, TAU};

use chartkit_core::shape::{line_path, pie, Arc};

#[test]
fn pie_places_largest_first_but_keeps_input_order() {
    let slices = pie(&[1.0, 3.0]);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].index, 0);
    assert_eq!(slices[1].start_angle, 0.0);
    assert!((slices[1].end_angle - 0.75 * TAU).abs() < 1e-12);
    assert!((slices[0].start_angle - 0.75 * TAU).abs() < 1e-12);
    assert!((slices[0].end_angle - TAU).abs() < 1e-12);
}

#[test]
fn pie_ignores_unusable_values() {
    let slices = pie(&[2.0, f64::NAN, -1.0, 2.0]);
    assert_eq!(slices[1].end_angle - slices[1].start_angle, 0.0);
    assert_eq!(slices[2].end_angle - slices[2].start_angle, 0.0);
    assert!((slices[0].end_angle - PI).abs() < 1e-12);
    assert!(slices[1].value.is_nan());

    let all_zero = pie(&[0.0, 0.0]);
    assert!(all_zero.iter().all(|s| s.end_angle == 0.0));
    assert!(pie(&[]).is_empty());
}

#[test]
fn arc_paths() {
    let arc = Arc::new(0.0, 100.0);
    let quarter = pie(&[1.0, 3.0])[0];
    let wedge = Arc::new(0.0, 100.0).path(&chartkit_core::PieSlice { start_angle: 0.0, end_angle: PI / 2.0, ..quarter });
    assert_eq!(wedge, "M0,-100A100,100,0,0,1,100,0L0,0Z");

    let full = pie(&[5.0]);
    let d = arc.path(&full[0]);
    assert!(d.starts_with("M0,-100A100,100,0,1,1,0,100"));
    assert!(d.ends_with('Z'));

    let empty = pie(&[0.0, 1.0]);
    assert_eq!(arc.path(&empty[0]), "M0,0Z");
}

#[test]
fn centroid_sits_mid_slice() {
    let arc = Arc::new(0.0, 150.0);
    let slices = pie(&[1.0, 1.0]);
    // first slice is the right half
    let (x, y) = arc.centroid(&slices[0]);
    assert!((x - 75.0).abs() < 1e-9);
    assert!(y.abs() < 1e-9);
    let (x, y) = arc.centroid(&slices[1]);
    assert!((x + 75.0).abs() < 1e-9);
    assert!(y.abs() < 1e-9);
}

#[test]
fn line_path_breaks_on_gaps() {
    assert_eq!(line_path(&[(0.0, 0.0), (10.0, 5.5)]), "M0,0L10,5.5");
    assert_eq!(
        line_path(&[(0.0, 0.0), (10.0, 5.0), (f64::NAN, 1.0), (20.0, 2.0)]),
        "M0,0L10,5M20,2"
    );
    assert_eq!(line_path(&[]), "");
}
