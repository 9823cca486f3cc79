//! Condensed layout of a symmetric, zero-diagonal distance matrix.
//!
//! An `n × n` pairwise distance matrix is fully described by its strict upper
//! triangle. Flattening that triangle row by row gives the **condensed**
//! vector of length `n(n-1)/2`:
//!
//! ```text
//!        j=1    j=2    j=3                    condensed
//! i=0  [ d01    d02    d03 ]
//! i=1  [        d12    d13 ]      ->   [d01, d02, d03, d12, d13, d23]
//! i=2  [               d23 ]             0    1    2    3    4    5
//! ```
//!
//! Row `i` starts after the `n-1 + n-2 + ... + n-i` entries of the rows above
//! it, i.e. at `n·i - i(i+1)/2`, so pair `(i, j)` with `i < j` lives at
//!
//! ```text
//! k = n·i - i(i+1)/2 + (j - i - 1)
//! ```
//!
//! which is the same closed form as `i·n + j - i(i+1)/2 - i - 1`. The product
//! `i(i+1)` is always even, so everything here is exact integer arithmetic.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1};

/// Number of entries in the condensed form of an `n × n` distance matrix.
///
/// `0` for `n < 2`.
#[inline]
pub fn condensed_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Map the `(i, j)` coordinate of an `n × n` distance matrix to its position
/// in the condensed vector.
///
/// Requires `i < j < n`. The one exception is the sentinel `i == j == n`,
/// which returns the total condensed length (see [`condensed_len`]).
///
/// ```rust
/// use husc::sq_to_dist;
///
/// assert_eq!(sq_to_dist(0, 1, 4), 0);
/// assert_eq!(sq_to_dist(2, 3, 4), 5);
/// assert_eq!(sq_to_dist(4, 4, 4), 6);
/// ```
#[inline]
pub fn sq_to_dist(i: usize, j: usize, n: usize) -> usize {
    if i == n && j == n {
        return condensed_len(n);
    }
    debug_assert!(i < j && j < n, "sq_to_dist requires i < j < n");
    n * i - i * (i + 1) / 2 + (j - i - 1)
}

/// Checked variant of [`sq_to_dist`].
///
/// The square matrix is symmetric, so `(i, j)` and `(j, i)` map to the same
/// position. Diagonal coordinates have no condensed entry.
pub fn condensed_index(i: usize, j: usize, n: usize) -> Result<usize> {
    let (a, b) = if i < j { (i, j) } else { (j, i) };
    if b >= n {
        return Err(Error::IndexOutOfBounds { index: b, len: n });
    }
    if a == b {
        return Err(Error::InvalidParameter {
            name: "(i, j)",
            message: "diagonal entries are not stored in condensed form",
        });
    }
    Ok(sq_to_dist(a, b, n))
}

/// Inverse of [`sq_to_dist`]: the `(i, j)` pair, `i < j`, stored at condensed
/// position `k`.
pub fn dist_to_sq(k: usize, n: usize) -> Result<(usize, usize)> {
    let len = condensed_len(n);
    if k >= len {
        return Err(Error::IndexOutOfBounds { index: k, len });
    }

    let mut i = 0;
    let mut offset = k;
    // Row i holds n - 1 - i entries.
    while offset >= n - 1 - i {
        offset -= n - 1 - i;
        i += 1;
    }
    Ok((i, i + 1 + offset))
}

/// Recover `n` from the length of a condensed vector.
///
/// An empty vector maps to `n = 1`.
pub fn n_from_condensed_len(len: usize) -> Result<usize> {
    let estimate = ((1.0 + (1.0 + 8.0 * len as f64).sqrt()) / 2.0).round() as usize;
    // The float estimate is only a starting point; verify in integers.
    let n = estimate.max(1);
    if condensed_len(n) == len {
        return Ok(n);
    }
    Err(Error::InvalidParameter {
        name: "condensed",
        message: "length is not n(n-1)/2 for any n",
    })
}

/// Expand a condensed vector into its square, symmetric, zero-diagonal matrix.
///
/// ```rust
/// use husc::squareform;
/// use ndarray::array;
///
/// let sq = squareform(array![1.0, 2.0, 3.0].view()).unwrap();
/// assert_eq!(sq, array![[0.0, 1.0, 2.0], [1.0, 0.0, 3.0], [2.0, 3.0, 0.0]]);
/// ```
pub fn squareform(condensed: ArrayView1<'_, f64>) -> Result<Array2<f64>> {
    let n = n_from_condensed_len(condensed.len())?;
    let mut square = Array2::zeros((n, n));
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = condensed[k];
            square[(i, j)] = d;
            square[(j, i)] = d;
            k += 1;
        }
    }
    Ok(square)
}
