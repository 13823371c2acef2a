//! Optimal one-to-one token assignment (Hungarian algorithm).
//!
//! Used by the hybrid Jaccard metric to pair tokens of two word sets so the
//! summed pair similarity is maximal. Runs in O(n² m) with n <= m, which is
//! trivial for label-sized inputs.

/// Maximum total weight of a one-to-one assignment between rows and columns.
///
/// `weights[i][j]` is the gain of pairing row `i` with column `j`; every row
/// must have the same length and weights are expected in `[0, 1]`. Rows or
/// columns left over in a rectangular matrix stay unpaired. An empty matrix
/// has weight `0.0`.
pub fn max_weight_assignment(weights: &[Vec<f64>]) -> f64 {
    let rows = weights.len();
    let cols = weights.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return 0.0;
    }
    if rows > cols {
        let transposed: Vec<Vec<f64>> = (0..cols)
            .map(|j| weights.iter().map(|row| row[j]).collect())
            .collect();
        return max_weight_assignment(&transposed);
    }

    let owner = hungarian(weights, rows, cols);
    // Sum in column order so the result does not depend on assignment order.
    (1..=cols)
        .filter(|&j| owner[j] != 0)
        .map(|j| weights[owner[j] - 1][j - 1])
        .sum()
}

/// Min-cost assignment over `1 - weight` with row/column potentials.
///
/// Returns `owner`, where `owner[j]` is the 1-based row assigned to 1-based
/// column `j` (0 = unassigned). Requires `rows <= cols`.
#[allow(clippy::needless_range_loop)]
fn hungarian(weights: &[Vec<f64>], rows: usize, cols: usize) -> Vec<usize> {
    let cost = |i: usize, j: usize| 1.0 - weights[i - 1][j - 1];

    let mut u = vec![0.0_f64; rows + 1];
    let mut v = vec![0.0_f64; cols + 1];
    let mut owner = vec![0usize; cols + 1];
    let mut way = vec![0usize; cols + 1];

    for i in 1..=rows {
        owner[0] = i;
        let mut j0 = 0usize;
        let mut min_slack = vec![f64::INFINITY; cols + 1];
        let mut used = vec![false; cols + 1];

        loop {
            used[j0] = true;
            let i0 = owner[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;

            for j in 1..=cols {
                if used[j] {
                    continue;
                }
                let slack = cost(i0, j) - u[i0] - v[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }

            for j in 0..=cols {
                if used[j] {
                    u[owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }

            j0 = j1;
            if owner[j0] == 0 {
                break;
            }
        }

        // Flip the augmenting path.
        loop {
            let j1 = way[j0];
            owner[j0] = owner[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    owner
}
