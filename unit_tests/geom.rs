use super::*;

#[test]
fn dist_is_euclidean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(a.dist(&b), 5.0);
}

#[test]
fn midpoint_averages_coordinates() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(4.0, 2.0);
    let m = a.midpoint(&b);
    assert_eq!(m, Point::new(2.0, 1.0));
}

#[test]
fn angle_to_east_is_zero() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);
    assert_eq!(a.angle_to(&b), 0.0);
}

#[test]
fn angle_to_north_is_half_pi() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(0.0, 1.0);
    assert!((a.angle_to(&b) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn bbox_of_single_point_is_degenerate() {
    let bbox = BBox::of([Point::new(1.0, 2.0)]);
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
}

#[test]
fn bbox_of_several_points_spans_them() {
    let bbox = BBox::of([
        Point::new(-1.0, 3.0),
        Point::new(5.0, -2.0),
        Point::new(0.0, 0.0),
    ]);
    assert_eq!(bbox.min, Point::new(-1.0, -2.0));
    assert_eq!(bbox.max, Point::new(5.0, 3.0));
    assert_eq!(bbox.width(), 6.0);
    assert_eq!(bbox.height(), 5.0);
}

#[test]
fn bbox_padded_grows_symmetrically() {
    let bbox = BBox::of([Point::new(0.0, 0.0), Point::new(2.0, 2.0)]);
    let padded = bbox.padded(1.0);
    assert_eq!(padded.min, Point::new(-1.0, -1.0));
    assert_eq!(padded.max, Point::new(3.0, 3.0));
}

#[test]
#[should_panic(expected = "at least one point")]
fn bbox_of_empty_panics() {
    BBox::of(std::iter::empty());
}

#[test]
fn polyline_length_sums_segments() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(3.0, 0.0),
        Point::new(3.0, 4.0),
    ];
    assert_eq!(polyline_length(&pts), 7.0);
}

#[test]
fn polyline_length_of_single_point_is_zero() {
    let pts = [Point::new(5.0, 5.0)];
    assert_eq!(polyline_length(&pts), 0.0);
}
