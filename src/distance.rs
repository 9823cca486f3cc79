//! Pairwise distances between the rows of a data matrix.
//!
//! [`pdist`] returns the condensed distance vector of an `(n_samples,
//! n_features)` matrix: the distance between every unordered pair of rows
//! `(i, j)`, `i < j`, in row-major upper-triangular order (see
//! [`crate::condensed`]).
//!
//! # Metrics
//!
//! | Metric | Name | d(u, v) |
//! |--------|------|---------|
//! | [`Metric::Euclidean`] | `euclidean` | √Σ(uₖ - vₖ)² |
//! | [`Metric::SqEuclidean`] | `sqeuclidean` | Σ(uₖ - vₖ)² |
//! | [`Metric::Cityblock`] | `cityblock`, `manhattan` | Σ\|uₖ - vₖ\| |
//! | [`Metric::Chebyshev`] | `chebyshev` | max\|uₖ - vₖ\| |
//! | [`Metric::Cosine`] | `cosine` | 1 - u·v / (‖u‖‖v‖) |
//! | [`Metric::Correlation`] | `correlation` | cosine distance of the mean-centred rows |
//! | [`Metric::Canberra`] | `canberra` | Σ\|uₖ - vₖ\| / (\|uₖ\| + \|vₖ\|) |
//! | [`Metric::BrayCurtis`] | `braycurtis` | Σ\|uₖ - vₖ\| / Σ\|uₖ + vₖ\| |
//! | [`Metric::Hamming`] | `hamming` | fraction of coordinates that differ |
//!
//! All of them are symmetric and non-negative. Where a formula degenerates
//! (a zero-norm row under cosine, an all-zero pair under Bray-Curtis) the
//! distance is `0.0` rather than NaN.

use crate::error::{Error, Result};
use core::fmt;
use core::str::FromStr;
use ndarray::{Array1, ArrayView1, ArrayView2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distance metric between two feature vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// L2 norm of the difference.
    #[default]
    Euclidean,
    /// Squared L2 norm of the difference.
    SqEuclidean,
    /// L1 norm of the difference.
    Cityblock,
    /// L∞ norm of the difference.
    Chebyshev,
    /// One minus cosine similarity.
    Cosine,
    /// One minus Pearson correlation.
    Correlation,
    /// Weighted L1 (Canberra).
    Canberra,
    /// Bray-Curtis dissimilarity.
    BrayCurtis,
    /// Proportion of disagreeing coordinates.
    Hamming,
}

impl Metric {
    /// Every supported metric.
    pub const ALL: [Metric; 9] = [
        Metric::Euclidean,
        Metric::SqEuclidean,
        Metric::Cityblock,
        Metric::Chebyshev,
        Metric::Cosine,
        Metric::Correlation,
        Metric::Canberra,
        Metric::BrayCurtis,
        Metric::Hamming,
    ];

    /// Canonical lowercase name, as accepted by [`str::parse`].
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::SqEuclidean => "sqeuclidean",
            Metric::Cityblock => "cityblock",
            Metric::Chebyshev => "chebyshev",
            Metric::Cosine => "cosine",
            Metric::Correlation => "correlation",
            Metric::Canberra => "canberra",
            Metric::BrayCurtis => "braycurtis",
            Metric::Hamming => "hamming",
        }
    }

    /// Distance between two rows of equal length.
    pub fn distance(&self, u: ArrayView1<'_, f64>, v: ArrayView1<'_, f64>) -> f64 {
        debug_assert_eq!(u.len(), v.len());
        match self {
            Metric::Euclidean => sq_euclidean(u, v).sqrt(),
            Metric::SqEuclidean => sq_euclidean(u, v),
            Metric::Cityblock => u.iter().zip(v.iter()).map(|(a, b)| (a - b).abs()).sum(),
            Metric::Chebyshev => u
                .iter()
                .zip(v.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
            Metric::Cosine => cosine(u.iter().copied(), v.iter().copied()),
            Metric::Correlation => {
                let mu = mean(u);
                let mv = mean(v);
                cosine(u.iter().map(|a| a - mu), v.iter().map(|b| b - mv))
            }
            Metric::Canberra => u
                .iter()
                .zip(v.iter())
                .map(|(a, b)| {
                    let denom = a.abs() + b.abs();
                    if denom > 0.0 {
                        (a - b).abs() / denom
                    } else {
                        0.0
                    }
                })
                .sum(),
            Metric::BrayCurtis => {
                let (num, denom) = u
                    .iter()
                    .zip(v.iter())
                    .fold((0.0, 0.0), |(n, d), (a, b)| {
                        (n + (a - b).abs(), d + (a + b).abs())
                    });
                if denom > 0.0 {
                    num / denom
                } else {
                    0.0
                }
            }
            Metric::Hamming => {
                if u.is_empty() {
                    return 0.0;
                }
                let differing = u.iter().zip(v.iter()).filter(|(a, b)| a != b).count();
                differing as f64 / u.len() as f64
            }
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "euclidean" => Ok(Metric::Euclidean),
            "sqeuclidean" => Ok(Metric::SqEuclidean),
            "cityblock" | "manhattan" => Ok(Metric::Cityblock),
            "chebyshev" => Ok(Metric::Chebyshev),
            "cosine" => Ok(Metric::Cosine),
            "correlation" => Ok(Metric::Correlation),
            "canberra" => Ok(Metric::Canberra),
            "braycurtis" => Ok(Metric::BrayCurtis),
            "hamming" => Ok(Metric::Hamming),
            other => Err(Error::InvalidMetric(other.to_string())),
        }
    }
}

#[inline]
fn sq_euclidean(u: ArrayView1<'_, f64>, v: ArrayView1<'_, f64>) -> f64 {
    u.iter()
        .zip(v.iter())
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum()
}

fn mean(u: ArrayView1<'_, f64>) -> f64 {
    if u.is_empty() {
        0.0
    } else {
        u.sum() / u.len() as f64
    }
}

fn cosine(u: impl Iterator<Item = f64>, v: impl Iterator<Item = f64>) -> f64 {
    let mut dot = 0.0;
    let mut norm_u = 0.0;
    let mut norm_v = 0.0;
    for (a, b) in u.zip(v) {
        dot += a * b;
        norm_u += a * a;
        norm_v += b * b;
    }
    let denom = norm_u.sqrt() * norm_v.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    // Rounding can push identical rows a hair below zero.
    (1.0 - dot / denom).max(0.0)
}

/// Condensed pairwise distance vector of the rows of `x`.
///
/// The result has `n(n-1)/2` entries for `n = x.nrows()`, ordered
/// `(0,1), (0,2), ..., (0,n-1), (1,2), ..., (n-2,n-1)`.
///
/// ```rust
/// use husc::{pdist, Metric};
/// use ndarray::array;
///
/// let x = array![[0.0, 0.0], [3.0, 4.0], [6.0, 8.0]];
/// let d = pdist(x.view(), Metric::Euclidean);
/// assert_eq!(d.to_vec(), vec![5.0, 10.0, 5.0]);
/// ```
pub fn pdist(x: ArrayView2<'_, f64>, metric: Metric) -> Array1<f64> {
    log::trace!("pdist: metric={} n_samples={}", metric, x.nrows());
    pdist_with(x, |u, v| metric.distance(u, v))
}

/// Condensed pairwise distance vector using a caller-supplied metric.
///
/// `f` must be symmetric and non-negative for the result to describe a
/// distance matrix; it is only ever called with `i < j`.
pub fn pdist_with<F>(x: ArrayView2<'_, f64>, f: F) -> Array1<f64>
where
    F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64 + Sync,
{
    let n = x.nrows();
    if n < 2 {
        return Array1::zeros(0);
    }

    #[cfg(feature = "parallel")]
    let condensed: Vec<f64> = (0..n - 1)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| f(x.row(i), x.row(j)))
                .collect::<Vec<f64>>()
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();

    #[cfg(not(feature = "parallel"))]
    let condensed: Vec<f64> = {
        let mut condensed = Vec::with_capacity(crate::condensed::condensed_len(n));
        for i in 0..(n - 1) {
            for j in (i + 1)..n {
                condensed.push(f(x.row(i), x.row(j)));
            }
        }
        condensed
    };

    Array1::from(condensed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::condensed::{condensed_len, sq_to_dist, squareform};
    use ndarray::{array, Array2};
    use proptest::prelude::*;

    #[test]
    fn test_parse_names() {
        for m in Metric::ALL {
            assert_eq!(m.name().parse::<Metric>().unwrap(), m);
        }
        assert_eq!("manhattan".parse::<Metric>().unwrap(), Metric::Cityblock);
    }

    #[test]
    fn test_parse_unknown_metric() {
        assert_eq!(
            "euclidian".parse::<Metric>(),
            Err(Error::InvalidMetric("euclidian".to_string()))
        );
        assert!("Euclidean".parse::<Metric>().is_err());
    }

    #[test]
    fn test_default_is_euclidean() {
        assert_eq!(Metric::default(), Metric::Euclidean);
    }

    #[test]
    fn test_euclidean_is_l2() {
        let u = array![1.0, 1.0, 1.0];
        let v = array![4.0, 4.0, 4.0];
        let d = Metric::Euclidean.distance(u.view(), v.view());
        assert!((d - 3.0 * 3.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_simple_metrics() {
        let u = array![0.0, 1.0, 2.0];
        let v = array![2.0, 1.0, 0.0];
        let d = |m: Metric| m.distance(u.view(), v.view());
        assert!((d(Metric::SqEuclidean) - 8.0).abs() < 1e-12);
        assert!((d(Metric::Cityblock) - 4.0).abs() < 1e-12);
        assert!((d(Metric::Chebyshev) - 2.0).abs() < 1e-12);
        assert!((d(Metric::Canberra) - 2.0).abs() < 1e-12);
        assert!((d(Metric::BrayCurtis) - 4.0 / 6.0).abs() < 1e-12);
        assert!((d(Metric::Hamming) - 2.0 / 3.0).abs() < 1e-12);
        // Perfectly anti-correlated.
        assert!((d(Metric::Correlation) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_orthogonal_and_parallel() {
        let e1 = array![1.0, 0.0];
        let e2 = array![0.0, 1.0];
        let e1x3 = array![3.0, 0.0];
        assert!((Metric::Cosine.distance(e1.view(), e2.view()) - 1.0).abs() < 1e-12);
        assert!(Metric::Cosine.distance(e1.view(), e1x3.view()).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_rows_are_zero() {
        let z = array![0.0, 0.0];
        let c = array![5.0, 5.0];
        assert_eq!(Metric::Cosine.distance(z.view(), c.view()), 0.0);
        assert_eq!(Metric::Correlation.distance(c.view(), c.view()), 0.0);
        assert_eq!(Metric::BrayCurtis.distance(z.view(), z.view()), 0.0);
        assert_eq!(Metric::Canberra.distance(z.view(), z.view()), 0.0);
    }

    #[test]
    fn test_pdist_order() {
        let x = array![[0.0], [1.0], [3.0], [6.0]];
        let d = pdist(x.view(), Metric::Cityblock);
        assert_eq!(d.to_vec(), vec![1.0, 3.0, 6.0, 2.0, 5.0, 3.0]);
    }

    #[test]
    fn test_pdist_small_inputs() {
        let empty = Array2::<f64>::zeros((0, 3));
        assert_eq!(pdist(empty.view(), Metric::Euclidean).len(), 0);
        let single = Array2::<f64>::ones((1, 3));
        assert_eq!(pdist(single.view(), Metric::Euclidean).len(), 0);
    }

    #[test]
    fn test_pdist_with_custom_metric() {
        let x = array![[1.0, 2.0], [2.0, 4.0], [0.0, 0.0]];
        let d = pdist_with(x.view(), |u, v| (u.sum() - v.sum()).abs());
        assert_eq!(d.to_vec(), vec![3.0, 3.0, 6.0]);
    }

    #[test]
    fn test_squareform_matches_pdist() {
        let x = array![[0.0, 0.0], [3.0, 4.0], [6.0, 8.0], [1.0, 1.0]];
        let d = pdist(x.view(), Metric::Euclidean);
        let sq = squareform(d.view()).unwrap();
        for i in 0..4 {
            assert_eq!(sq[(i, i)], 0.0);
            for j in (i + 1)..4 {
                assert_eq!(sq[(i, j)], sq[(j, i)]);
                assert_eq!(sq[(i, j)], d[sq_to_dist(i, j, 4)]);
            }
        }
    }

    fn matrix() -> impl Strategy<Value = Array2<f64>> {
        (1usize..12, 1usize..5).prop_flat_map(|(n, d)| {
            proptest::collection::vec(-100.0f64..100.0, n * d)
                .prop_map(move |v| Array2::from_shape_vec((n, d), v).unwrap())
        })
    }

    proptest! {
        #[test]
        fn pdist_entries_match_direct_distance(x in matrix(), m in 0usize..9) {
            let metric = Metric::ALL[m];
            let n = x.nrows();
            let d = pdist(x.view(), metric);
            prop_assert_eq!(d.len(), condensed_len(n));
            for i in 0..n {
                for j in (i + 1)..n {
                    let direct = metric.distance(x.row(j), x.row(i));
                    prop_assert!(d[sq_to_dist(i, j, n)] >= 0.0);
                    prop_assert!((d[sq_to_dist(i, j, n)] - direct).abs() < 1e-9);
                }
            }
        }
    }
}
