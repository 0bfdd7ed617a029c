use nalgebra::{Point2, Vector2};

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn crossing_segments() {
        let hit = segment_intersection(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, -5.0),
            Point2::new(5.0, 5.0),
        )
        .unwrap();
        assert!((hit.point.x - 5.0).abs() < 1e-6);
        assert!(hit.point.y.abs() < 1e-6);
        assert!((hit.t - 0.5).abs() < 1e-6);
    }

    #[test]
    fn parallel_segments_no_hit() {
        let hit = segment_intersection(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(10.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn collinear_disjoint_no_hit() {
        // Collinear segments have a zero determinant, which counts as no hit
        // even when they overlap.
        let hit = segment_intersection(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 3.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn touching_endpoints() {
        // t = u = 1 is still inside the closed parameter range.
        let hit = segment_intersection(
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, -5.0),
        );
        assert!(hit.is_some());
    }

    #[test]
    fn miss_outside_parameter_range() {
        let hit = segment_intersection(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(5.0, -5.0),
            Point2::new(5.0, 5.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn reflect_head_on() {
        let r = reflect(Vector2::new(1.0, 0.0), Vector2::new(-1.0, 0.0));
        assert!((r.x + 1.0).abs() < 1e-6);
        assert!(r.y.abs() < 1e-6);
    }

    #[test]
    fn reflect_oblique() {
        // 45 degrees onto a vertical wall flips the x component only.
        let d = Vector2::new(1.0, 1.0).normalize();
        let r = reflect(d, Vector2::new(-1.0, 0.0));
        assert!((r.x + d.x).abs() < 1e-6);
        assert!((r.y - d.y).abs() < 1e-6);
    }
}

/// An intersection between a motion segment and a wall segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Intersection point.
    pub point: Point2<f32>,
    /// Parametric position along the first (motion) segment, in `[0, 1]`.
    pub t: f32,
}

/// Tests two line segments for intersection with the parametric determinant
/// method. A hit requires both parameters in `[0, 1]`; a zero determinant
/// (parallel or collinear segments) is defined as no intersection.
pub fn segment_intersection(
    a1: Point2<f32>,
    a2: Point2<f32>,
    b1: Point2<f32>,
    b2: Point2<f32>,
) -> Option<SegmentHit> {
    let denom = (a1.x - a2.x) * (b1.y - b2.y) - (a1.y - a2.y) * (b1.x - b2.x);
    if denom == 0.0 {
        return None;
    }

    let t = ((a1.x - b1.x) * (b1.y - b2.y) - (a1.y - b1.y) * (b1.x - b2.x)) / denom;
    let u = -((a1.x - a2.x) * (a1.y - b1.y) - (a1.y - a2.y) * (a1.x - b1.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(SegmentHit {
            point: a1 + t * (a2 - a1),
            t,
        })
    } else {
        None
    }
}

/// Reflects a direction vector about a wall normal: `R = D - 2(D.N)N`.
///
/// Walls are two-sided, so the result is the same whichever way the stored
/// normal happens to point.
pub fn reflect(dir: Vector2<f32>, normal: Vector2<f32>) -> Vector2<f32> {
    dir - 2.0 * dir.dot(&normal) * normal
}
