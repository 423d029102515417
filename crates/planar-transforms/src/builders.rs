use glam::{DMat2, DMat3, DVec2, DVec3};
use rand::Rng;
use std::f64::consts::TAU;

/// Rotation matrix for a 2D rotation about the origin.
///
/// Returns `[[cos θ, -sin θ], [sin θ, cos θ]]` for an angle `theta` in
/// radians. Total over all finite inputs.
pub fn rotation(theta: f64) -> DMat2 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    DMat2::from_cols_array(&[cos_theta, sin_theta, -sin_theta, cos_theta])
}

/// Build a 2x2 affine matrix from scalings and rotations.
///
/// Computes `R(θ) · R(-φ) · diag(λ1, λ2) · R(φ)`: an anisotropic scaling by
/// `lambda1`/`lambda2` along axes oriented at angle `phi`, followed by an
/// overall rotation `theta`. The decomposition lets callers pick the scaling
/// axis independently of the final orientation.
pub fn affine_matrix(theta: f64, phi: f64, lambda1: f64, lambda2: f64) -> DMat2 {
    let d = DMat2::from_cols_array(&[lambda1, 0.0, 0.0, lambda2]);
    rotation(theta) * rotation(-phi) * d * rotation(phi)
}

/// Affine transformation: embeds a 2x2 matrix `a` and a translation
/// `(tx, ty)` into a 3x3 matrix with bottom row `[0, 0, 1]`.
///
/// The result preserves parallelism. `a` is expected to be non-singular;
/// this is a caller contract and is not checked.
pub fn affinity(a: DMat2, tx: f64, ty: f64) -> DMat3 {
    DMat3::from_cols(
        a.x_axis.extend(0.0),
        a.y_axis.extend(0.0),
        DVec3::new(tx, ty, 1.0),
    )
}

/// Isometric transformation: rotation by `theta` and translation, with an
/// optional reflection.
///
/// `eps` must be `+1.0` (orientation-preserving) or `-1.0`
/// (orientation-reversing); the contract is not enforced.
pub fn isometry(eps: f64, theta: f64, tx: f64, ty: f64) -> DMat3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    DMat3::from_cols(
        DVec3::new(eps * cos_theta, eps * sin_theta, 0.0),
        DVec3::new(-sin_theta, cos_theta, 0.0),
        DVec3::new(tx, ty, 1.0),
    )
}

/// Similarity transformation: isotropic scale `s`, rotation `theta` and
/// translation `(tx, ty)`.
pub fn similarity(s: f64, theta: f64, tx: f64, ty: f64) -> DMat3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    DMat3::from_cols(
        DVec3::new(s * cos_theta, s * sin_theta, 0.0),
        DVec3::new(-s * sin_theta, s * cos_theta, 0.0),
        DVec3::new(tx, ty, 1.0),
    )
}

/// Projective transformation: general 3x3 matrix with bottom row
/// `[v1, v2, v]`.
///
/// Non-zero `v1`/`v2` produce non-affine (perspective) behavior: finite
/// points can map to the line at infinity and vice versa.
pub fn projectivity(a: DMat2, tx: f64, ty: f64, v1: f64, v2: f64, v: f64) -> DMat3 {
    DMat3::from_cols(
        a.x_axis.extend(v1),
        a.y_axis.extend(v2),
        DVec3::new(tx, ty, v),
    )
}

/// Upper-left 2x2 block of a projective transformation, computed as
/// `s·(R·K) + [tx, ty]ᵀ·[v1, v2]`.
///
/// Exposes how the translation and the vanishing-point controls feed into
/// the linear part. Intended for analysis and decomposition rather than
/// construction.
pub fn projective_submatrix(
    s: f64,
    r: DMat2,
    k: DMat2,
    tx: f64,
    ty: f64,
    v1: f64,
    v2: f64,
) -> DMat2 {
    let t = DVec2::new(tx, ty);
    let outer = DMat2::from_cols(t * v1, t * v2);
    r * k * s + outer
}

/// Sample a rotation angle uniformly in `[0, τ)`.
pub fn random_angle() -> f64 {
    let mut rng = rand::rng();
    rng.random_range(0.0..TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-12;

    fn assert_mat2_eq(actual: DMat2, expected: DMat2) {
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(actual.col(i)[j], expected.col(i)[j], epsilon = EPSILON);
            }
        }
    }

    fn assert_mat3_eq(actual: DMat3, expected: DMat3) {
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(actual.col(i)[j], expected.col(i)[j], epsilon = EPSILON);
            }
        }
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        assert_mat2_eq(rotation(0.0), DMat2::IDENTITY);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let r = rotation(std::f64::consts::FRAC_PI_2);
        let v = r * DVec2::new(1.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(v.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_is_orthogonal() {
        let angles = [0.0, 0.3, std::f64::consts::FRAC_PI_4, 2.1, random_angle()];
        for &theta in &angles {
            let r = rotation(theta);
            assert_mat2_eq(r.transpose() * r, DMat2::IDENTITY);
            assert_relative_eq!(r.determinant(), 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_affine_matrix_identity_params() {
        assert_mat2_eq(affine_matrix(0.0, 0.0, 1.0, 1.0), DMat2::IDENTITY);
    }

    #[test]
    fn test_affine_matrix_axis_aligned_scaling() {
        // phi = 0 keeps the scaling axes aligned with x/y.
        let a = affine_matrix(0.0, 0.0, 2.0, 0.5);
        assert_mat2_eq(a, DMat2::from_cols_array(&[2.0, 0.0, 0.0, 0.5]));
    }

    #[test]
    fn test_affine_matrix_determinant_is_scale_product() {
        let a = affine_matrix(0.7, 1.2, 2.0, 3.0);
        assert_relative_eq!(a.determinant(), 6.0, epsilon = 1e-10);
    }

    #[test]
    fn test_affinity_matches_manual_affine_action() {
        let a = DMat2::from_cols_array(&[1.0, 0.5, -0.3, 2.0]);
        let (tx, ty) = (0.7, -1.1);
        let h = affinity(a, tx, ty);

        let p = DVec2::new(1.3, -0.4);
        let q = h * p.extend(1.0);
        let expected = a * p + DVec2::new(tx, ty);

        assert_relative_eq!(q.x, expected.x, epsilon = EPSILON);
        assert_relative_eq!(q.y, expected.y, epsilon = EPSILON);
        assert_relative_eq!(q.z, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_isometry_identity() {
        assert_mat3_eq(isometry(1.0, 0.0, 0.0, 0.0), DMat3::IDENTITY);
    }

    #[test]
    fn test_isometry_preserves_distance() {
        let h = isometry(1.0, 0.9, 2.0, -3.0);
        let p = DVec3::new(1.0, 2.0, 1.0);
        let q = DVec3::new(-0.5, 0.25, 1.0);
        let d_before = (p - q).truncate().length();
        let d_after = ((h * p) - (h * q)).truncate().length();
        assert_relative_eq!(d_before, d_after, epsilon = EPSILON);
    }

    #[test]
    fn test_isometry_mirror_reverses_orientation() {
        let h = isometry(-1.0, 0.4, 0.0, 0.0);
        // The linear part of a reflected isometry has determinant -1.
        let lin = DMat2::from_cols(h.x_axis.truncate(), h.y_axis.truncate());
        assert_relative_eq!(lin.determinant(), -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_similarity_with_unit_scale_is_isometry() {
        let theta = random_angle();
        let (tx, ty) = (0.25, -0.75);
        assert_mat3_eq(similarity(1.0, theta, tx, ty), isometry(1.0, theta, tx, ty));
    }

    #[test]
    fn test_similarity_scales_distance() {
        let h = similarity(2.5, 0.3, 1.0, 1.0);
        let p = DVec3::new(0.0, 0.0, 1.0);
        let q = DVec3::new(1.0, 1.0, 1.0);
        let d_before = (p - q).truncate().length();
        let d_after = ((h * p) - (h * q)).truncate().length();
        assert_relative_eq!(d_after, 2.5 * d_before, epsilon = EPSILON);
    }

    #[test]
    fn test_projectivity_layout() {
        let a = DMat2::from_cols_array(&[1.0, 3.0, 2.0, 4.0]);
        let h = projectivity(a, 5.0, 6.0, 7.0, 8.0, 9.0);
        // Row-wise: [[1, 2, 5], [3, 4, 6], [7, 8, 9]].
        assert_eq!(h.x_axis, DVec3::new(1.0, 3.0, 7.0));
        assert_eq!(h.y_axis, DVec3::new(2.0, 4.0, 8.0));
        assert_eq!(h.z_axis, DVec3::new(5.0, 6.0, 9.0));
    }

    #[test]
    fn test_projectivity_with_canonical_row_equals_affinity() {
        let a = DMat2::from_cols_array(&[0.8, -0.2, 0.1, 1.4]);
        assert_mat3_eq(
            projectivity(a, 0.3, 0.6, 0.0, 0.0, 1.0),
            affinity(a, 0.3, 0.6),
        );
    }

    #[test]
    fn test_projective_submatrix_no_perspective_terms() {
        // With v1 = v2 = 0 the outer product vanishes and only s·R·K remains.
        let r = rotation(0.5);
        let k = DMat2::from_cols_array(&[2.0, 0.0, 0.0, 3.0]);
        assert_mat2_eq(
            projective_submatrix(2.0, r, k, 9.0, 9.0, 0.0, 0.0),
            r * k * 2.0,
        );
    }

    #[test]
    fn test_projective_submatrix_outer_product() {
        let sub = projective_submatrix(1.0, DMat2::IDENTITY, DMat2::IDENTITY, 2.0, 3.0, 4.0, 5.0);
        // I + [2;3]·[4,5] = [[9, 10], [12, 16]].
        assert_mat2_eq(sub, DMat2::from_cols_array(&[9.0, 12.0, 10.0, 16.0]));
    }

    #[test]
    fn test_random_angle_in_range() {
        for _ in 0..32 {
            let theta = random_angle();
            assert!((0.0..TAU).contains(&theta));
        }
    }
}
