use glam::{DMat3, DVec2, DVec3};

/// Tolerance used to decide whether the bottom row of a transformation
/// matrix equals the canonical `[0, 0, 1]`.
///
/// Matrices built from floating-point arithmetic may carry noise in the
/// bottom row, so the check is approximate rather than bit-exact. When the
/// row is canonical the perspective division is skipped entirely.
pub const CANONICAL_ROW_TOL: f64 = 1e-8;

fn has_canonical_bottom_row(h: &DMat3) -> bool {
    h.x_axis.z.abs() <= CANONICAL_ROW_TOL
        && h.y_axis.z.abs() <= CANONICAL_ROW_TOL
        && (h.z_axis.z - 1.0).abs() <= CANONICAL_ROW_TOL
}

/// Apply a 3x3 transformation to a homogeneous point set.
///
/// Each input point is a column `[x, y, 1]`. The output is `H·Xᵢ` per point;
/// when the bottom row of `h` is not `[0, 0, 1]` (within
/// [`CANONICAL_ROW_TOL`]) every output column is divided by its own third
/// coordinate to restore canonical homogeneous form.
///
/// A point mapped onto the line at infinity has a third coordinate of zero;
/// the division then produces non-finite values, which are returned as-is.
pub fn transform_points(h: &DMat3, points: &[DVec3]) -> Vec<DVec3> {
    let rescale = !has_canonical_bottom_row(h);
    points
        .iter()
        .map(|&p| {
            let q = *h * p;
            if rescale {
                q / q.z
            } else {
                q
            }
        })
        .collect()
}

/// Single-point variant of [`transform_points`].
pub fn transform_point(h: &DMat3, p: DVec3) -> DVec3 {
    let q = *h * p;
    if has_canonical_bottom_row(h) {
        q
    } else {
        q / q.z
    }
}

/// Lift 2D points into homogeneous columns `[x, y, 1]`.
pub fn homogenize(points: &[DVec2]) -> Vec<DVec3> {
    points.iter().map(|p| p.extend(1.0)).collect()
}

/// Drop the homogeneous coordinate of an already-canonical point.
pub fn euclidean(p: DVec3) -> DVec2 {
    p.truncate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{affinity, projectivity, random_angle, similarity};
    use approx::assert_relative_eq;
    use glam::DMat2;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_affine_transform_skips_division() {
        let a = DMat2::from_cols_array(&[2.0, 1.0, -1.0, 0.5]);
        let h = affinity(a, 0.4, -0.2);
        let points = homogenize(&[DVec2::new(1.0, 2.0), DVec2::new(-0.5, 0.75)]);

        let out = transform_points(&h, &points);
        for (q, p) in out.iter().zip(&points) {
            // With a canonical bottom row the result is exactly H·X.
            assert_eq!(*q, h * *p);
            assert_eq!(q.z, 1.0);
        }
    }

    #[test]
    fn test_perspective_division_restores_canonical_form() {
        let h = projectivity(DMat2::IDENTITY, 0.0, 0.0, 1.0, 0.0, 1.0);
        let p = DVec3::new(1.0, 0.0, 1.0);

        // Raw product is (1, 0, 2); normalization halves the point.
        assert_eq!(h * p, DVec3::new(1.0, 0.0, 2.0));
        assert_eq!(transform_point(&h, p), DVec3::new(0.5, 0.0, 1.0));
    }

    #[test]
    fn test_perspective_division_applies_per_column() {
        let h = projectivity(DMat2::IDENTITY, 0.0, 0.0, 0.5, 0.5, 1.0);
        let points = homogenize(&[DVec2::new(1.0, 1.0), DVec2::new(2.0, 0.0)]);

        let out = transform_points(&h, &points);
        for q in &out {
            assert_relative_eq!(q.z, 1.0, epsilon = EPSILON);
        }
        assert_relative_eq!(out[0].x, 0.5, epsilon = EPSILON);
        assert_relative_eq!(out[0].y, 0.5, epsilon = EPSILON);
        assert_relative_eq!(out[1].x, 1.0, epsilon = EPSILON);
        assert_relative_eq!(out[1].y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_point_on_vanishing_line_goes_non_finite() {
        // Bottom row [1, 0, 1] sends x = -1 to the line at infinity.
        let h = projectivity(DMat2::IDENTITY, 0.0, 0.0, 1.0, 0.0, 1.0);
        let q = transform_point(&h, DVec3::new(-1.0, 2.0, 1.0));
        assert!(!q.is_finite());
    }

    #[test]
    fn test_round_trip_through_inverse() {
        let h = similarity(1.7, random_angle(), 0.3, -2.0);
        let h_inv = h.inverse();
        let points = homogenize(&[
            DVec2::new(1.5, 1.0),
            DVec2::new(0.75, 1.5),
            DVec2::new(0.5, 0.5),
        ]);

        let there = transform_points(&h, &points);
        let back = transform_points(&h_inv, &there);
        for (q, p) in back.iter().zip(&points) {
            assert_relative_eq!(q.x, p.x, epsilon = 1e-10);
            assert_relative_eq!(q.y, p.y, epsilon = 1e-10);
            assert_relative_eq!(q.z, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_noisy_bottom_row_within_tolerance_is_canonical() {
        let mut h = affinity(DMat2::IDENTITY, 1.0, 1.0);
        h.x_axis.z = 1e-12;
        let q = transform_point(&h, DVec3::new(4.0, 0.0, 1.0));
        // No division: the tiny residual stays in the third coordinate.
        assert_eq!(q.x, 5.0);
        assert_relative_eq!(q.z, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_homogenize_euclidean_round_trip() {
        let p = DVec2::new(-1.25, 3.5);
        let h = homogenize(&[p]);
        assert_eq!(h[0], DVec3::new(-1.25, 3.5, 1.0));
        assert_eq!(euclidean(h[0]), p);
    }
}
