//! # Transforms
//!
//! 4×4 affine transforms mapping primitive object space to scene space.
//! Matrices in documents are written row by row; glam stores columns.

use glam::{DMat4, DVec3};

/// Builds a matrix from four rows.
///
/// ## Example
///
/// ```rust
/// use csg_tree::transform::{from_rows, transform_point};
/// use glam::DVec3;
///
/// let translate = from_rows([
///     [1.0, 0.0, 0.0, 5.0],
///     [0.0, 1.0, 0.0, 0.0],
///     [0.0, 0.0, 1.0, 0.0],
///     [0.0, 0.0, 0.0, 1.0],
/// ]);
/// assert_eq!(transform_point(&translate, DVec3::ZERO), DVec3::new(5.0, 0.0, 0.0));
/// ```
pub fn from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

pub fn scaling(scale: DVec3) -> DMat4 {
    DMat4::from_scale(scale)
}

pub fn uniform_scaling(scale: f64) -> DMat4 {
    DMat4::from_scale(DVec3::splat(scale))
}

/// Applies the full matrix to `point` with `w = 1`, without perspective
/// division.
pub fn transform_point(matrix: &DMat4, point: DVec3) -> DVec3 {
    (*matrix * point.extend(1.0)).truncate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_is_row_major() {
        let m = from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(m.row(0).to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.col(0).to_array(), [1.0, 5.0, 9.0, 13.0]);
    }

    #[test]
    fn test_scaling_then_translation_order() {
        let translate = from_rows([
            [1.0, 0.0, 0.0, 10.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let m = translate * uniform_scaling(2.0);
        assert_eq!(
            transform_point(&m, DVec3::ONE),
            DVec3::new(12.0, 2.0, 2.0)
        );
    }

    #[test]
    fn test_non_uniform_scaling() {
        let m = scaling(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform_point(&m, DVec3::ONE), DVec3::new(1.0, 2.0, 3.0));
    }
}
