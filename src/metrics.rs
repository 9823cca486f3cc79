//! Intra-group vs inter-group distance scores.
//!
//! Given a data matrix and one label per sample (e.g. the gene knocked down in
//! each well of a screen), every pairwise distance is either
//!
//! - **intra-group**: both samples carry the same label, or
//! - **inter-group**: the labels differ.
//!
//! Comparing the two distributions tells you whether replicates of the same
//! condition sit closer together than samples of different conditions.
//!
//! # Algorithm
//!
//! 1. Group sample indices by label (labels visited in sorted order).
//! 2. For every pair `(i, j)`, `i < j`, inside a group, record its condensed
//!    position [`sq_to_dist`]`(i, j, n)`.
//! 3. The inter-group positions are the ascending complement of those in
//!    `[0, n(n-1)/2)`.
//! 4. Compute the condensed distance vector once and gather both sides.
//!
//! Each distance lands in exactly one of the two outputs.
//!
//! # Example
//!
//! ```rust
//! use husc::gene_distance_score;
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 1.0, 1.0],
//!     [1.0, 1.0, 1.0],
//!     [4.0, 4.0, 4.0],
//!     [4.0, 4.0, 4.0],
//! ];
//! let genes = ["A", "A", "B", "B"];
//!
//! let scores = gene_distance_score(x.view(), &genes, "euclidean").unwrap();
//! assert_eq!(scores.intra.to_vec(), vec![0.0, 0.0]);
//! assert_eq!(scores.inter.len(), 4);
//! ```

use crate::condensed::sq_to_dist;
use crate::distance::{pdist, pdist_with, Metric};
use crate::error::{Error, Result};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use std::collections::BTreeMap;

/// Condensed positions split by label agreement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairPartition {
    intra: Vec<usize>,
    inter: Vec<usize>,
    n_samples: usize,
}

impl PairPartition {
    /// Positions of same-label pairs, grouped by label then in pair order.
    pub fn intra(&self) -> &[usize] {
        &self.intra
    }

    /// Positions of different-label pairs, ascending.
    pub fn inter(&self) -> &[usize] {
        &self.inter
    }

    /// Number of samples the partition was built for.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Total number of pairs, `n(n-1)/2`.
    pub fn len(&self) -> usize {
        self.intra.len() + self.inter.len()
    }

    /// True when there are no pairs at all (`n < 2`).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split the condensed index range of `labels.len()` samples into same-label
/// and different-label positions.
///
/// Groups with a single member contribute no intra-group pairs.
pub fn partition_pairs<L: Ord>(labels: &[L]) -> PairPartition {
    let n = labels.len();

    let mut groups: BTreeMap<&L, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(idx);
    }

    let mut intra = Vec::new();
    for members in groups.values() {
        for (a, &i) in members.iter().enumerate() {
            for &j in &members[a + 1..] {
                intra.push(sq_to_dist(i, j, n));
            }
        }
    }

    let total = sq_to_dist(n, n, n);
    let mut same = vec![false; total];
    for &k in &intra {
        same[k] = true;
    }
    let inter: Vec<usize> = (0..total).filter(|&k| !same[k]).collect();

    log::debug!(
        "partitioned {} samples in {} groups: {} intra pairs, {} inter pairs",
        n,
        groups.len(),
        intra.len(),
        inter.len()
    );

    PairPartition {
        intra,
        inter,
        n_samples: n,
    }
}

/// Intra-group and inter-group distances.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDistances {
    /// Distances between samples sharing a label.
    pub intra: Array1<f64>,
    /// Distances between samples with different labels.
    pub inter: Array1<f64>,
}

impl GroupDistances {
    fn empty() -> Self {
        Self {
            intra: Array1::zeros(0),
            inter: Array1::zeros(0),
        }
    }

    /// Total number of distances on both sides.
    pub fn len(&self) -> usize {
        self.intra.len() + self.inter.len()
    }

    /// True when no pairs were scored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mean intra-group distance, `None` if there are no same-label pairs.
    pub fn mean_intra(&self) -> Option<f64> {
        self.intra.mean()
    }

    /// Mean inter-group distance, `None` if there are no different-label pairs.
    pub fn mean_inter(&self) -> Option<f64> {
        self.inter.mean()
    }
}

/// Distance scoring configuration.
///
/// ```rust
/// use husc::{DistanceScore, Metric};
/// use ndarray::array;
///
/// let x = array![[0.0, 0.0], [0.0, 1.0], [5.0, 5.0]];
/// let scores = DistanceScore::new()
///     .with_metric(Metric::Cityblock)
///     .score(x.view(), &[0, 0, 1])
///     .unwrap();
/// assert_eq!(scores.intra.to_vec(), vec![1.0]);
/// assert_eq!(scores.inter.to_vec(), vec![10.0, 9.0]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistanceScore {
    metric: Metric,
}

impl DistanceScore {
    /// Euclidean scoring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the distance metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Configured metric.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Split the pairwise distances of `x` by label agreement.
    ///
    /// `labels[i]` is the label of row `i`.
    pub fn score<L: Ord>(&self, x: ArrayView2<'_, f64>, labels: &[L]) -> Result<GroupDistances> {
        let metric = self.metric;
        score_impl(x, labels, |x| pdist(x, metric))
    }

    /// Like [`DistanceScore::score`] with a caller-supplied metric in place of
    /// the configured one.
    pub fn score_with<L, F>(
        &self,
        x: ArrayView2<'_, f64>,
        labels: &[L],
        f: F,
    ) -> Result<GroupDistances>
    where
        L: Ord,
        F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64 + Sync,
    {
        score_impl(x, labels, |x| pdist_with(x, f))
    }
}

fn score_impl<L, D>(x: ArrayView2<'_, f64>, labels: &[L], distances: D) -> Result<GroupDistances>
where
    L: Ord,
    D: FnOnce(ArrayView2<'_, f64>) -> Array1<f64>,
{
    let n = x.nrows();
    if labels.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: labels.len(),
        });
    }
    if n < 2 {
        log::debug!("{} samples, no pairs to score", n);
        return Ok(GroupDistances::empty());
    }

    let partition = partition_pairs(labels);
    let condensed = distances(x);
    debug_assert_eq!(condensed.len(), partition.len());

    Ok(GroupDistances {
        intra: condensed.select(Axis(0), partition.intra()),
        inter: condensed.select(Axis(0), partition.inter()),
    })
}

/// Intra-gene and inter-gene distances between the samples of `x`.
///
/// `gene_list[i]` names the gene knocked down in sample `i`. `metric` is one of
/// the names listed in [`crate::distance`]; pass `"euclidean"` for the usual
/// L2 distance. Intra-gene values come grouped by gene (sorted) in pair order,
/// inter-gene values in ascending condensed order.
///
/// # Errors
///
/// - [`Error::InvalidMetric`] if `metric` is not recognised.
/// - [`Error::DimensionMismatch`] if `gene_list.len() != x.nrows()`.
pub fn gene_distance_score<L: Ord>(
    x: ArrayView2<'_, f64>,
    gene_list: &[L],
    metric: &str,
) -> Result<GroupDistances> {
    let metric: Metric = metric.parse()?;
    DistanceScore::new().with_metric(metric).score(x, gene_list)
}
