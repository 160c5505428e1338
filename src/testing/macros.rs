//! Assertion macros shared by this crate's own test suite.

/// Assert that every segment of a polyline (`&[Point]`) runs along one of the
/// eight octilinear compass directions, within `$eps` radians.
#[macro_export]
macro_rules! assert_octilinear_polyline {
    ($polyline:expr, $eps:expr) => {{
        let pts: &[$crate::geom::Point] = $polyline;
        for w in pts.windows(2) {
            let (a, b) = (w[0], w[1]);
            if a.dist(&b) < 1e-9 {
                continue;
            }
            let angle = a.angle_to(&b);
            let step = std::f64::consts::FRAC_PI_4;
            let nearest = (angle / step).round() * step;
            let mut diff = (angle - nearest).abs();
            if diff > std::f64::consts::PI {
                diff = 2.0 * std::f64::consts::PI - diff;
            }
            assert!(
                diff < $eps,
                "segment {:?} -> {:?} is not octilinear (angle {})",
                a,
                b,
                angle
            );
        }
    }};
}

/// Assert that every edge of a [`crate::transit_graph::TransitGraph`] keeps
/// its polyline octilinear, e.g. after a call to
/// [`crate::octilinearizer::octilinearize`].
#[macro_export]
macro_rules! assert_octilinear_graph {
    ($tg:expr, $eps:expr) => {{
        let tg: &$crate::transit_graph::TransitGraph = $tg;
        for e in tg.edge_indices() {
            $crate::assert_octilinear_polyline!(&tg.edge(e).polyline, $eps);
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::geom::Point;

    #[test]
    fn polyline_with_diagonal_and_axial_segments_passes() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 5.0),
        ];
        assert_octilinear_polyline!(&pts, 1e-9);
    }

    #[test]
    #[should_panic(expected = "not octilinear")]
    fn off_axis_polyline_fails() {
        let pts = [Point::new(0.0, 0.0), Point::new(3.0, 1.0)];
        assert_octilinear_polyline!(&pts, 1e-9);
    }
}
