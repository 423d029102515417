#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Planar Transforms
//!
//! This crate provides the numeric core of the planar toolkit: closed-form
//! construction of 2D transformation matrices and application of a 3x3
//! homography to homogeneous point sets.
//!
//! ## Transform hierarchy
//!
//! - **Isometry**: rotation/reflection + translation (distance-preserving)
//! - **Similarity**: isometry + isotropic scaling
//! - **Affinity**: parallelism-preserving, bottom row `[0, 0, 1]`
//! - **Projectivity**: general homography, arbitrary bottom row
//!
//! ## Example
//!
//! ```rust
//! use glam::{DMat2, DVec3};
//! use planar_transforms::builders::projectivity;
//! use planar_transforms::points::transform_point;
//!
//! // A homography with a non-canonical bottom row [1, 0, 1].
//! let h = projectivity(DMat2::IDENTITY, 0.0, 0.0, 1.0, 0.0, 1.0);
//!
//! // (1, 0, 1) maps to (1, 0, 2), normalized back to w = 1.
//! let p = transform_point(&h, DVec3::new(1.0, 0.0, 1.0));
//! assert_eq!(p, DVec3::new(0.5, 0.0, 1.0));
//! ```

/// Closed-form builders for 2x2 and 3x3 transformation matrices.
pub mod builders;

/// Homogeneous point sets and perspective-dividing transform application.
pub mod points;

pub use builders::{
    affine_matrix, affinity, isometry, projective_submatrix, projectivity, random_angle, rotation,
    similarity,
};
pub use points::{euclidean, homogenize, transform_point, transform_points, CANONICAL_ROW_TOL};
