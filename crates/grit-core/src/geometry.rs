//! Chebyshev distance, bearing and segment projection
//!
//! Bearings follow the stereo positioning convention used by the audio
//! engine: degrees clockwise from "up" (negative y), so 90 is due right and
//! 270 is due left.

use crate::types::Vec2i;

/// Chebyshev (chessboard) distance between two points, saturating at `i32::MAX`
pub fn chebyshev_distance(a: Vec2i, b: Vec2i) -> i32 {
    let d = a.x.abs_diff(b.x).max(a.y.abs_diff(b.y));
    i32::try_from(d).unwrap_or(i32::MAX)
}

/// Chebyshev distance and bearing (0..360 degrees) from `origin` to `target`.
///
/// Coincident points have bearing 0.
pub fn distance_and_bearing(origin: Vec2i, target: Vec2i) -> (i32, i32) {
    let distance = chebyshev_distance(origin, target);
    if target == origin {
        return (distance, 0);
    }
    let dx = target.x as f64 - origin.x as f64;
    let dy = target.y as f64 - origin.y as f64;
    let angle = dx.atan2(-dy).to_degrees().round() as i32;
    (distance, angle.rem_euclid(360))
}

/// The point on segment `a`-`b` closest to `p`, in integer coordinates.
///
/// A degenerate segment returns `a`. Projections before `a` or past `b` clamp
/// to the endpoints.
pub fn closest_point_on_segment(a: Vec2i, b: Vec2i, p: Vec2i) -> Vec2i {
    let lx = b.x as i128 - a.x as i128;
    let ly = b.y as i128 - a.y as i128;
    let length_squared = lx * lx + ly * ly;
    if length_squared == 0 {
        return a;
    }

    let numerator = (p.x as i128 - a.x as i128) * lx + (p.y as i128 - a.y as i128) * ly;
    if numerator <= 0 {
        return a;
    }
    if numerator >= length_squared {
        return b;
    }

    // Strictly between a and b, so both coordinates fit
    Vec2i::new(
        (a.x as i128 + numerator * lx / length_squared) as i32,
        (a.y as i128 + numerator * ly / length_squared) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev_distance() {
        assert_eq!(chebyshev_distance(Vec2i::ZERO, Vec2i::new(3, -7)), 7);
        assert_eq!(chebyshev_distance(Vec2i::new(5, 5), Vec2i::new(5, 5)), 0);
        assert_eq!(chebyshev_distance(Vec2i::new(-10, 2), Vec2i::new(10, 4)), 20);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let min = Vec2i::new(i32::MIN, 0);
        let max = Vec2i::new(i32::MAX, 0);
        assert_eq!(chebyshev_distance(min, max), i32::MAX);
        assert_eq!(distance_and_bearing(min, max), (i32::MAX, 90));
        assert_eq!(
            closest_point_on_segment(min, max, Vec2i::new(7, i32::MAX)),
            Vec2i::new(7, 0)
        );
    }

    #[test]
    fn test_bearing_compass_points() {
        let o = Vec2i::ZERO;
        assert_eq!(distance_and_bearing(o, Vec2i::new(0, -50)), (50, 0));
        assert_eq!(distance_and_bearing(o, Vec2i::new(100, 0)), (100, 90));
        assert_eq!(distance_and_bearing(o, Vec2i::new(0, 40)), (40, 180));
        assert_eq!(distance_and_bearing(o, Vec2i::new(-20, 0)), (20, 270));
    }

    #[test]
    fn test_bearing_diagonal() {
        let (distance, bearing) = distance_and_bearing(Vec2i::ZERO, Vec2i::new(30, -30));
        assert_eq!(distance, 30);
        assert_eq!(bearing, 45);
    }

    #[test]
    fn test_bearing_same_point() {
        assert_eq!(distance_and_bearing(Vec2i::new(7, 7), Vec2i::new(7, 7)), (0, 0));
    }

    #[test]
    fn test_closest_point_inside_segment() {
        let p = closest_point_on_segment(Vec2i::ZERO, Vec2i::new(100, 0), Vec2i::new(50, 30));
        assert_eq!(p, Vec2i::new(50, 0));
    }

    #[test]
    fn test_closest_point_clamps_to_endpoints() {
        let a = Vec2i::ZERO;
        let b = Vec2i::new(100, 0);
        assert_eq!(closest_point_on_segment(a, b, Vec2i::new(-10, 5)), a);
        assert_eq!(closest_point_on_segment(a, b, Vec2i::new(200, -5)), b);
    }

    #[test]
    fn test_closest_point_degenerate_segment() {
        let a = Vec2i::new(4, 4);
        assert_eq!(closest_point_on_segment(a, a, Vec2i::new(90, 90)), a);
    }
}
