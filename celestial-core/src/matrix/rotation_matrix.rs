//! 3x3 rotation matrices.
//!
//! Precession, nutation and frame bias are all expressed as rotation matrices
//! applied to Cartesian star directions. Rotations follow the ERFA convention:
//! `rotate_z(psi)` premultiplies by `Rz(psi)`, which rotates the *frame*
//! anticlockwise about +Z, so the vector `[1, 0, 0]` goes to
//! `[cos psi, -sin psi, 0]`.
//!
//! Storage is row-major; `m[(i, j)]` is row `i`, column `j`. For a proper
//! rotation the inverse is the transpose, which is how the apparent-to-mean
//! direction of the chain undoes the precession-nutation matrix.
//!
//! ```
//! use celestial_core::RotationMatrix3;
//!
//! let mut m = RotationMatrix3::identity();
//! m.rotate_z(0.5);
//! let product = m * m.transpose();
//! assert!((product[(0, 0)] - 1.0).abs() < 1e-15);
//! ```

use super::Vector3;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationMatrix3 {
    elements: [[f64; 3]; 3],
}

impl Default for RotationMatrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl RotationMatrix3 {
    pub fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Builds a matrix from row-major elements without validating it.
    pub fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[row][col]
    }

    pub fn elements(&self) -> &[[f64; 3]; 3] {
        &self.elements
    }

    /// `self = Rx(phi) * self`.
    pub fn rotate_x(&mut self, phi: f64) {
        let (s, c) = libm::sincos(phi);
        let e = &mut self.elements;
        for col in 0..3 {
            let a1 = c * e[1][col] + s * e[2][col];
            let a2 = -s * e[1][col] + c * e[2][col];
            e[1][col] = a1;
            e[2][col] = a2;
        }
    }

    /// `self = Ry(theta) * self`.
    pub fn rotate_y(&mut self, theta: f64) {
        let (s, c) = libm::sincos(theta);
        let e = &mut self.elements;
        for col in 0..3 {
            let a0 = c * e[0][col] - s * e[2][col];
            let a2 = s * e[0][col] + c * e[2][col];
            e[0][col] = a0;
            e[2][col] = a2;
        }
    }

    /// `self = Rz(psi) * self`.
    pub fn rotate_z(&mut self, psi: f64) {
        let (s, c) = libm::sincos(psi);
        let e = &mut self.elements;
        for col in 0..3 {
            let a0 = c * e[0][col] + s * e[1][col];
            let a1 = -s * e[0][col] + c * e[1][col];
            e[0][col] = a0;
            e[1][col] = a1;
        }
    }

    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0; 3]; 3];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..3 {
                    *cell += self.elements[i][k] * other.elements[k][j];
                }
            }
        }

        Self::from_array(result)
    }

    pub fn transpose(&self) -> Self {
        let e = &self.elements;
        Self::from_array([
            [e[0][0], e[1][0], e[2][0]],
            [e[0][1], e[1][1], e[2][1]],
            [e[0][2], e[1][2], e[2][2]],
        ])
    }

    pub fn apply(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        Vector3::new(
            e[0][0] * v.x + e[0][1] * v.y + e[0][2] * v.z,
            e[1][0] * v.x + e[1][1] * v.y + e[1][2] * v.z,
            e[2][0] * v.x + e[2][1] * v.y + e[2][2] * v.z,
        )
    }

    /// Applies the transpose (the inverse rotation) without forming it.
    pub fn apply_transpose(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        Vector3::new(
            e[0][0] * v.x + e[1][0] * v.y + e[2][0] * v.z,
            e[0][1] * v.x + e[1][1] * v.y + e[2][1] * v.z,
            e[0][2] * v.x + e[1][2] * v.y + e[2][2] * v.z,
        )
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.elements;

        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    pub fn is_rotation_matrix(&self, tolerance: f64) -> bool {
        if (self.determinant() - 1.0).abs() > tolerance {
            return false;
        }
        let product = self.multiply(&self.transpose());
        product.max_difference(&Self::identity()) <= tolerance
    }

    pub fn max_difference(&self, other: &Self) -> f64 {
        let mut max_diff: f64 = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                max_diff = max_diff.max((self.elements[i][j] - other.elements[i][j]).abs());
            }
        }
        max_diff
    }
}

impl std::ops::Mul for RotationMatrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&RotationMatrix3> for &RotationMatrix3 {
    type Output = RotationMatrix3;

    fn mul(self, rhs: &RotationMatrix3) -> RotationMatrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::Mul<Vector3> for &RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        self.apply(&vec)
    }
}

impl std::ops::Mul<Vector3> for RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        self.apply(&vec)
    }
}

impl std::ops::Index<(usize, usize)> for RotationMatrix3 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl fmt::Display for RotationMatrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RotationMatrix3:")?;
        for row in &self.elements {
            writeln!(f, "  [{:12.9} {:12.9} {:12.9}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
