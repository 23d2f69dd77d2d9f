use crate::Matrix3;

/// Get the determinant of an integer matrix, stored row by row. This returns
/// `None` if the computation overflows.
pub(crate) fn integer_determinant(m: &[[i64; 3]; 3]) -> Option<i64> {
    let minor = |a: i64, b: i64, c: i64, d: i64| a.checked_mul(b)?.checked_sub(c.checked_mul(d)?);

    let first = m[0][0].checked_mul(minor(m[1][1], m[2][2], m[2][1], m[1][2])?)?;
    let second = m[0][1].checked_mul(minor(m[1][0], m[2][2], m[1][2], m[2][0])?)?;
    let third = m[0][2].checked_mul(minor(m[1][0], m[2][1], m[1][1], m[2][0])?)?;

    return first.checked_sub(second)?.checked_add(third);
}

/// Get the Hermite normal form `H` of the non-singular integer matrix `m`,
/// such that `m = H * V` with `V` unimodular.
///
/// `H` is upper triangular, with a positive diagonal, and the entries on the
/// right of the diagonal are in `[0, H[i][i])`. This returns `None` if `m` is
/// singular or if the computation overflows.
pub(crate) fn hermite_normal_form(m: &[[i64; 3]; 3]) -> Option<[[i64; 3]; 3]> {
    let mut h = *m;

    // zero the entries on the left of the diagonal with column operations,
    // starting from the last row
    for row in (0..3).rev() {
        for column in 0..row {
            while h[row][column] != 0 {
                let quotient = h[row][row] / h[row][column];
                subtract_column(&mut h, row, column, quotient)?;
                swap_columns(&mut h, row, column);
            }
        }

        if h[row][row] == 0 {
            return None;
        }

        if h[row][row] < 0 {
            for line in &mut h {
                line[row] = line[row].checked_neg()?;
            }
        }
    }

    // reduce the entries on the right of the diagonal
    for row in (0..2).rev() {
        for column in (row + 1)..3 {
            let quotient = h[row][column].div_euclid(h[row][row]);
            subtract_column(&mut h, column, row, quotient)?;
        }
    }

    return Some(h);
}

/// Set `column[target] -= factor * column[source]`
fn subtract_column(m: &mut [[i64; 3]; 3], target: usize, source: usize, factor: i64) -> Option<()> {
    for line in m.iter_mut() {
        line[target] = line[target].checked_sub(factor.checked_mul(line[source])?)?;
    }
    return Some(());
}

fn swap_columns(m: &mut [[i64; 3]; 3], i: usize, j: usize) {
    for line in m.iter_mut() {
        line.swap(i, j);
    }
}

/// Round all entries of `matrix` to the nearest integer, returning `None` if
/// any entry is further than `tol` from it
pub(crate) fn to_integer_matrix(matrix: &Matrix3, tol: f64) -> Option<[[i64; 3]; 3]> {
    let mut result = [[0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            let rounded = matrix[i][j].round();
            if (matrix[i][j] - rounded).abs() > tol {
                return None;
            }
            result[i][j] = rounded as i64;
        }
    }
    return Some(result);
}

/// Convert an integer matrix to a floating point one
pub(crate) fn to_real_matrix(m: &[[i64; 3]; 3]) -> Matrix3 {
    Matrix3::new([
        [m[0][0] as f64, m[0][1] as f64, m[0][2] as f64],
        [m[1][0] as f64, m[1][1] as f64, m[1][2] as f64],
        [m[2][0] as f64, m[2][1] as f64, m[2][2] as f64],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(a: &[[i64; 3]; 3], b: &[[i64; 3]; 3]) -> [[i64; 3]; 3] {
        let mut result = [[0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = (0..3).map(|k| a[i][k] * b[k][j]).sum();
            }
        }
        return result;
    }

    #[test]
    fn determinant() {
        assert_eq!(integer_determinant(&[[1, 0, 0], [0, 1, 0], [0, 0, 1]]), Some(1));
        assert_eq!(integer_determinant(&[[2, 0, 0], [0, 2, 0], [0, 0, 2]]), Some(8));
        assert_eq!(integer_determinant(&[[1, 1, 0], [1, 1, 0], [0, 0, 1]]), Some(0));
        assert_eq!(integer_determinant(&[[0, 1, 0], [1, 0, 0], [0, 0, 1]]), Some(-1));

        let large = [[3_000_000_000, 0, 0], [0, 3_000_000_000, 0], [0, 0, 3]];
        assert_eq!(integer_determinant(&large), None);
        assert_eq!(integer_determinant(&[[i64::MIN, 0, 0], [0, 2, 0], [0, 0, 1]]), None);
    }

    #[test]
    fn hermite() {
        let tests = [
            ([[1, 0, 0], [0, 1, 0], [0, 0, 1]], [[1, 0, 0], [0, 1, 0], [0, 0, 1]]),
            ([[-1, 1, 1], [1, -1, 1], [1, 1, -1]], [[2, 0, 1], [0, 2, 1], [0, 0, 1]]),
            ([[1, 1, 0], [-1, 1, 0], [0, 0, 1]], [[2, 1, 0], [0, 1, 0], [0, 0, 1]]),
            ([[0, 1, 0], [1, 0, 0], [0, 0, 3]], [[1, 0, 0], [0, 1, 0], [0, 0, 3]]),
            ([[2, 1, 0], [0, 1, 3], [1, 0, 1]], [[5, 1, 2], [0, 1, 0], [0, 0, 1]]),
        ];

        for (matrix, expected) in tests {
            let hnf = hermite_normal_form(&matrix).unwrap();
            assert_eq!(hnf, expected);
            assert_eq!(
                integer_determinant(&hnf).unwrap(),
                integer_determinant(&matrix).unwrap().abs()
            );
        }

        // a unimodular transformation of the columns gives the same form
        let matrix = [[2, 1, 0], [0, 1, 3], [1, 0, 1]];
        let unimodular = [[1, 2, 0], [0, 1, 0], [-1, 3, 1]];
        assert_eq!(
            hermite_normal_form(&product(&matrix, &unimodular)),
            hermite_normal_form(&matrix)
        );

        assert_eq!(hermite_normal_form(&[[1, 1, 0], [1, 1, 0], [0, 0, 1]]), None);
    }

    #[test]
    fn rounding() {
        let matrix = Matrix3::new([
            [1.0 + 1e-9, 0.0, 0.0],
            [0.0, 2.0 - 1e-9, 0.0],
            [0.0, -1.0, 3.0],
        ]);
        assert_eq!(to_integer_matrix(&matrix, 1e-5), Some([[1, 0, 0], [0, 2, 0], [0, -1, 3]]));

        let matrix = Matrix3::new([
            [1.5, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        assert_eq!(to_integer_matrix(&matrix, 1e-5), None);

        assert_eq!(to_real_matrix(&[[1, 0, 0], [0, 1, 0], [0, 0, 1]]), Matrix3::one());
    }
}
