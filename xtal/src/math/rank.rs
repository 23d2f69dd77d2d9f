use ndarray::{Array2, ArrayView2};

/// Get the rank of the space spanned by the columns of `matrix`, using
/// Gaussian elimination with partial pivoting. Pivots smaller than `tol`
/// times the largest entry of the matrix are treated as zero.
pub(crate) fn column_rank(matrix: ArrayView2<'_, f64>, tol: f64) -> usize {
    let scale = matrix.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return 0;
    }

    // work on the transpose, so that elimination runs over the columns
    let mut work: Array2<f64> = matrix.t().to_owned();
    let (n_rows, n_cols) = work.dim();

    let mut rank = 0;
    for col in 0..n_cols {
        if rank == n_rows {
            break;
        }

        let mut pivot = rank;
        for row in (rank + 1)..n_rows {
            if work[[row, col]].abs() > work[[pivot, col]].abs() {
                pivot = row;
            }
        }

        if work[[pivot, col]].abs() <= tol * scale {
            continue;
        }

        if pivot != rank {
            for j in 0..n_cols {
                work.swap([pivot, j], [rank, j]);
            }
        }

        for row in (rank + 1)..n_rows {
            let factor = work[[row, col]] / work[[rank, col]];
            for j in col..n_cols {
                work[[row, j]] -= factor * work[[rank, j]];
            }
        }

        rank += 1;
    }

    return rank;
}
