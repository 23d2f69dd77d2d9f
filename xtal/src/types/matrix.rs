use std::ops::{Add, Sub, Mul, Index, IndexMut};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use super::Vector3D;

/// A 3x3 square matrix type.
///
/// `Matrix3` implements multiplication with another matrix or with a
/// [`Vector3D`], as well as addition and subtraction. The matrix is stored
/// row by row: `matrix[i][j]` is the element at row `i` and column `j`.
///
/// ```
/// # use xtal::{Matrix3, Vector3D};
/// let matrix = Matrix3::new([
///     [1.0, 0.0, 0.0],
///     [0.0, 2.0, 0.0],
///     [0.0, 0.0, 3.0],
/// ]);
///
/// assert_eq!(matrix[1][1], 2.0);
/// assert_eq!(matrix * Vector3D::new(1.0, 1.0, 1.0), Vector3D::new(1.0, 2.0, 3.0));
/// assert_eq!(matrix.determinant(), 6.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct Matrix3([[f64; 3]; 3]);

impl Matrix3 {
    /// Create a new `Matrix3` from the given rows
    pub fn new(data: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(data)
    }

    /// Create a new `Matrix3` using the three given vectors as columns
    pub fn from_columns(a: Vector3D, b: Vector3D, c: Vector3D) -> Matrix3 {
        Matrix3([
            [a[0], b[0], c[0]],
            [a[1], b[1], c[1]],
            [a[2], b[2], c[2]],
        ])
    }

    /// Create a new `Matrix3` with all components set to 0
    pub fn zero() -> Matrix3 {
        Matrix3([[0.0; 3]; 3])
    }

    /// Create the 3x3 identity matrix
    pub fn one() -> Matrix3 {
        Matrix3([
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Get the column at the given `index`
    pub fn column(&self, index: usize) -> Vector3D {
        Vector3D::new(self[0][index], self[1][index], self[2][index])
    }

    /// Get the row at the given `index`
    pub fn row(&self, index: usize) -> Vector3D {
        Vector3D::from(self[index])
    }

    /// Get the determinant of this matrix
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[2][1] * m[1][2]) -
        m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]) +
        m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Get the transposed matrix
    pub fn transposed(&self) -> Matrix3 {
        let m = &self.0;
        Matrix3([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Get the inverse of this matrix. The result is not finite if the matrix
    /// is singular, callers are expected to check the determinant first.
    pub fn inverse(&self) -> Matrix3 {
        let m = &self.0;
        let inv_det = 1.0 / self.determinant();

        Matrix3([
            [
                (m[1][1] * m[2][2] - m[2][1] * m[1][2]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[1][0] * m[0][2] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[2][0] * m[1][1]) * inv_det,
                (m[2][0] * m[0][1] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[1][0] * m[0][1]) * inv_det,
            ],
        ])
    }

    /// Check if all the components of this matrix are finite
    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }
}

impl From<[[f64; 3]; 3]> for Matrix3 {
    fn from(data: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(data)
    }
}

impl From<Matrix3> for [[f64; 3]; 3] {
    fn from(matrix: Matrix3) -> [[f64; 3]; 3] {
        matrix.0
    }
}

impl Index<usize> for Matrix3 {
    type Output = [f64; 3];
    #[inline]
    fn index(&self, index: usize) -> &[f64; 3] {
        &self.0[index]
    }
}

impl IndexMut<usize> for Matrix3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut [f64; 3] {
        &mut self.0[index]
    }
}

impl_arithmetic!(
    Matrix3, Matrix3, Add, add, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] + other[i][j];
            }
        }
        result
    }
);

impl_arithmetic!(
    Matrix3, Matrix3, Sub, sub, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] - other[i][j];
            }
        }
        result
    }
);

impl_arithmetic!(
    Matrix3, Matrix3, Mul, mul, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    result[i][j] += self[i][k] * other[k][j];
                }
            }
        }
        result
    }
);

impl_arithmetic!(
    Matrix3, Vector3D, Mul, mul, Vector3D,
    self, other,
    Vector3D::new(
        self[0][0] * other[0] + self[0][1] * other[1] + self[0][2] * other[2],
        self[1][0] * other[0] + self[1][1] * other[1] + self[1][2] * other[2],
        self[2][0] * other[0] + self[2][1] * other[1] + self[2][2] * other[2],
    )
);

lsh_scal_arithmetic!(
    Matrix3, Mul, mul, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] * other;
            }
        }
        result
    }
);

rhs_scal_arithmetic!(
    Matrix3, Mul, mul, Matrix3,
    self, other,
    other * self
);

impl AbsDiffEq for Matrix3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Matrix3, epsilon: f64) -> bool {
        self.0.iter().flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| f64::abs_diff_eq(a, b, epsilon))
    }
}

impl RelativeEq for Matrix3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Matrix3, epsilon: f64, max_relative: f64) -> bool {
        self.0.iter().flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| f64::relative_eq(a, b, epsilon, max_relative))
    }
}

impl UlpsEq for Matrix3 {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Matrix3, epsilon: f64, max_ulps: u32) -> bool {
        self.0.iter().flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| f64::ulps_eq(a, b, epsilon, max_ulps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_ulps_eq, assert_relative_eq};

    #[test]
    fn columns() {
        let matrix = Matrix3::from_columns(
            Vector3D::new(1.0, 2.0, 3.0),
            Vector3D::new(4.0, 5.0, 6.0),
            Vector3D::new(7.0, 8.0, 9.0),
        );

        assert_eq!(matrix[0], [1.0, 4.0, 7.0]);
        assert_eq!(matrix.column(1), Vector3D::new(4.0, 5.0, 6.0));
        assert_eq!(matrix.row(2), Vector3D::new(3.0, 6.0, 9.0));
        assert_eq!(matrix.transposed().column(1), Vector3D::new(2.0, 5.0, 8.0));
    }

    #[test]
    fn determinant() {
        assert_eq!(Matrix3::one().determinant(), 1.0);
        assert_eq!(Matrix3::zero().determinant(), 0.0);

        let matrix = Matrix3::new([
            [0.0, 0.5, 0.5],
            [0.5, 0.0, 0.5],
            [0.5, 0.5, 0.0],
        ]);
        assert_relative_eq!(matrix.determinant(), 0.25);

        // swapping two columns flips the sign
        let swapped = Matrix3::from_columns(matrix.column(1), matrix.column(0), matrix.column(2));
        assert_relative_eq!(swapped.determinant(), -0.25);
    }

    #[test]
    fn inverse() {
        let matrix = Matrix3::new([
            [3.0, 1.0, 0.5],
            [0.0, 4.0, -1.0],
            [2.0, 0.0, 5.0],
        ]);

        assert_ulps_eq!(matrix * matrix.inverse(), Matrix3::one(), epsilon = 1e-12);
        assert_ulps_eq!(matrix.inverse() * matrix, Matrix3::one(), epsilon = 1e-12);
    }

    #[test]
    fn products() {
        let matrix = Matrix3::new([
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 2.0],
        ]);

        assert_eq!(matrix * Vector3D::new(1.0, 1.0, 1.0), Vector3D::new(6.0, 1.0, 2.0));
        assert_eq!(matrix * Matrix3::one(), matrix);
        assert_eq!(2.0 * matrix, matrix + matrix);
        assert_eq!(matrix - matrix, Matrix3::zero());
    }
}
