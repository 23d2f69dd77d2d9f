//! The `Lattice` type represents the three vectors spanning the periodic cell
//! of a crystal.
use crate::{Error, Matrix3, Vector3D};
use crate::math::{integer_determinant, hermite_normal_form, to_integer_matrix, to_real_matrix};

use super::DEFAULT_TOLERANCE;

/// Integer 3x3 matrix, stored row by row, used to relate a lattice to its
/// superlattices
pub type IntegerMatrix3 = [[i64; 3]; 3];

/// A `Lattice` is defined by three linearly independent vectors, stored as
/// the columns of a 3x3 matrix.
///
/// A lattice is never degenerate: the constructors check that all vectors
/// have a non-zero length and that the matrix is invertible. The inverse is
/// computed once and cached, to convert between Cartesian and fractional
/// coordinates. The sign of the determinant is kept as given, left-handed
/// lattices are valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    /// Lattice vectors, as the columns of this matrix
    matrix: Matrix3,
    /// Inverse of the lattice matrix, cached from matrix
    inverse: Matrix3,
    /// Tolerance used for degeneracy and integer checks
    tol: f64,
}

impl Lattice {
    /// Create a new lattice from the matrix containing the lattice vectors as
    /// columns, using the default tolerance.
    pub fn new(column_vector_matrix: Matrix3) -> Result<Lattice, Error> {
        Lattice::with_tolerance(column_vector_matrix, DEFAULT_TOLERANCE)
    }

    /// Create a new lattice from the matrix containing the lattice vectors as
    /// columns, using the given tolerance `tol` to decide if the vectors are
    /// degenerate.
    pub fn with_tolerance(column_vector_matrix: Matrix3, tol: f64) -> Result<Lattice, Error> {
        if !(tol.is_finite() && tol > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "lattice tolerance must be positive and finite, got {}", tol
            )));
        }

        if !column_vector_matrix.is_finite() {
            return Err(Error::InvalidLattice(
                "lattice vectors contain non-finite values".into()
            ));
        }

        let mut lengths = [0.0; 3];
        for (i, length) in lengths.iter_mut().enumerate() {
            *length = column_vector_matrix.column(i).norm();
            if *length < tol {
                return Err(Error::InvalidLattice(format!(
                    "lattice vector {} has zero length", i
                )));
            }
        }

        // the determinant divided by the lengths is the volume of the
        // parallelepiped spanned by the unit vectors, independent of scale
        let determinant = column_vector_matrix.determinant();
        if f64::abs(determinant) / (lengths[0] * lengths[1] * lengths[2]) < tol {
            return Err(Error::InvalidLattice(format!(
                "lattice vectors are linearly dependent (determinant is {:e})", determinant
            )));
        }

        return Ok(Lattice {
            matrix: column_vector_matrix,
            inverse: column_vector_matrix.inverse(),
            tol: tol,
        });
    }

    /// Create a lattice from its three vectors `a`, `b` and `c`
    pub fn from_vectors(a: Vector3D, b: Vector3D, c: Vector3D) -> Result<Lattice, Error> {
        Lattice::new(Matrix3::from_columns(a, b, c))
    }

    /// Create a simple cubic lattice with the given edge `length`
    pub fn cubic(length: f64) -> Result<Lattice, Error> {
        Lattice::new(Matrix3::new([
            [length, 0.0, 0.0],
            [0.0, length, 0.0],
            [0.0, 0.0, length],
        ]))
    }

    /// Get the lattice vectors, as the columns of a matrix
    pub fn column_vector_matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the inverse of the column vector matrix
    pub fn inverse(&self) -> Matrix3 {
        self.inverse
    }

    /// Get the lattice vector at `index` (0, 1 or 2)
    pub fn vector(&self, index: usize) -> Vector3D {
        self.matrix.column(index)
    }

    /// Get the tolerance used by this lattice
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Get the signed determinant of the column vector matrix
    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    /// Get the volume of the cell
    pub fn volume(&self) -> f64 {
        f64::abs(self.determinant())
    }

    /// Check if the lattice vectors form a right-handed set
    pub fn is_right_handed(&self) -> bool {
        self.determinant() > 0.0
    }

    /// Get the lengths of the three lattice vectors `[a, b, c]`
    pub fn lengths(&self) -> [f64; 3] {
        [self.vector(0).norm(), self.vector(1).norm(), self.vector(2).norm()]
    }

    /// Get the angles `[alpha, beta, gamma]` between the lattice vectors, in
    /// degrees. `alpha` is the angle between `b` and `c`, `beta` between `a`
    /// and `c`, and `gamma` between `a` and `b`.
    pub fn angles(&self) -> [f64; 3] {
        let (a, b, c) = (self.vector(0), self.vector(1), self.vector(2));
        [
            angle(b, c).to_degrees(),
            angle(a, c).to_degrees(),
            angle(a, b).to_degrees(),
        ]
    }

    /// Get the fractional representation of the Cartesian `vector` in this
    /// lattice
    pub fn fractional(&self, vector: Vector3D) -> Vector3D {
        self.inverse * vector
    }

    /// Get the Cartesian representation of the `fractional` vector in this
    /// lattice
    pub fn cartesian(&self, fractional: Vector3D) -> Vector3D {
        self.matrix * fractional
    }
}

/// Operations creating new lattices
impl Lattice {
    /// Apply the Cartesian `linear_map` to all lattice vectors, and return the
    /// resulting lattice (`F * L`). The new lattice uses the same tolerance.
    pub fn transformed(&self, linear_map: &Matrix3) -> Result<Lattice, Error> {
        Lattice::with_tolerance(linear_map * self.matrix, self.tol)
    }

    /// Create the superlattice `S = L * T` of this lattice, where `T` is the
    /// integer `transformation` matrix.
    pub fn make_superlattice(&self, transformation: &IntegerMatrix3) -> Result<Lattice, Error> {
        match integer_determinant(transformation) {
            Some(0) => {
                return Err(Error::InvalidLattice(
                    "the transformation matrix to the superlattice is singular".into()
                ));
            }
            Some(_) => {}
            None => {
                return Err(Error::InvalidParameter(
                    "the determinant of the transformation matrix to the superlattice overflows".into()
                ));
            }
        }

        Lattice::with_tolerance(self.matrix * to_real_matrix(transformation), self.tol)
    }

    /// Find the integer matrix `T` such that `superlattice = self * T`. This
    /// returns `None` if `superlattice` is not a superlattice of `self`,
    /// within the tolerance of `self`.
    pub fn transformation_matrix_to_super(&self, superlattice: &Lattice) -> Option<IntegerMatrix3> {
        let transformation = self.inverse * superlattice.matrix;
        return to_integer_matrix(&transformation, self.tol);
    }

    /// Get the name of `superlattice` relative to this lattice, built from
    /// the Hermite normal form `H` of the transformation matrix to the
    /// superlattice as `SCELV_A_B_C_D_E_F`, where `V = A * B * C` is the
    /// volume ratio and
    ///
    /// ```text
    ///     | A F E |
    /// H = | 0 B D |
    ///     | 0 0 C |
    /// ```
    ///
    /// All superlattices describing the same supercell share the same name,
    /// whatever the choice of lattice vectors.
    pub fn supercell_name(&self, superlattice: &Lattice) -> Result<String, Error> {
        let transformation = self.transformation_matrix_to_super(superlattice).ok_or_else(|| {
            Error::InvalidParameter("the lattice is not a superlattice of this lattice".into())
        })?;

        let hnf = hermite_normal_form(&transformation).ok_or_else(|| Error::InvalidParameter(
            "can not compute the Hermite normal form of the transformation matrix".into()
        ))?;

        let [[a, f, e], [_, b, d], [_, _, c]] = hnf;
        let volume = integer_determinant(&hnf).ok_or_else(|| Error::InvalidParameter(
            "the volume of the superlattice overflows".into()
        ))?;

        return Ok(format!("SCEL{}_{}_{}_{}_{}_{}_{}", volume, a, b, c, d, e, f));
    }

    /// Create the superlattice of this lattice corresponding to `name`, as
    /// produced by [`Lattice::supercell_name`]. The vectors of the new
    /// lattice are given by the Hermite normal form encoded in the name.
    pub fn superlattice_from_name(&self, name: &str) -> Result<Lattice, Error> {
        let hnf = parse_supercell_name(name)?;
        return self.make_superlattice(&hnf);
    }
}

/// Get the Hermite normal form encoded in a supercell name
fn parse_supercell_name(name: &str) -> Result<IntegerMatrix3, Error> {
    let invalid = || Error::InvalidParameter(format!(
        "invalid supercell name '{}', expected 'SCELV_A_B_C_D_E_F'", name
    ));

    let values = name.strip_prefix("SCEL").ok_or_else(invalid)?
        .split('_')
        .map(|value| value.parse::<i64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, Error>>()?;

    let &[volume, a, b, c, d, e, f] = values.as_slice() else {
        return Err(invalid());
    };

    if a <= 0 || b <= 0 || c <= 0 {
        return Err(invalid());
    }

    let product = a.checked_mul(b).and_then(|ab| ab.checked_mul(c));
    if product != Some(volume) {
        return Err(Error::InvalidParameter(format!(
            "invalid supercell name '{}', the volume does not match the diagonal", name
        )));
    }

    return Ok([[a, f, e], [0, b, d], [0, 0, c]]);
}

/// Get the angles between the vectors `u` and `v`.
fn angle(u: Vector3D, v: Vector3D) -> f64 {
    let cos = u.normalized() * v.normalized();
    f64::acos(cos.clamp(-1.0, 1.0))
}
