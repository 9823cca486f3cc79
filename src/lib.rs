//! # husc
//!
//! Intra-group vs inter-group pairwise distances for labelled sample matrices.
//!
//! Given an `(n_samples, n_features)` matrix and one label per sample, every
//! pairwise distance is split into distances between samples that share a
//! label and distances between samples that do not. Typical use: checking that
//! replicates of the same knock-down are more alike than different knock-downs.
//!
//! ```rust
//! use husc::gene_distance_score;
//! use ndarray::array;
//!
//! let x = array![[1.0, 1.0], [1.0, 1.0], [4.0, 5.0]];
//! let scores = gene_distance_score(x.view(), &["A", "A", "B"], "euclidean").unwrap();
//! assert_eq!(scores.intra.to_vec(), vec![0.0]);
//! assert_eq!(scores.inter.to_vec(), vec![5.0, 5.0]);
//! ```
//!
//! Enable the `parallel` feature to compute pairwise distances with rayon.

pub mod condensed;
pub mod distance;
/// Error types used across `husc`.
pub mod error;
pub mod metrics;


pub use condensed::{
    condensed_index, condensed_len, dist_to_sq, n_from_condensed_len, sq_to_dist, squareform,
};
pub use distance::{pdist, pdist_with, Metric};
pub use error::{Error, Result};
pub use metrics::{gene_distance_score, partition_pairs, DistanceScore, GroupDistances, PairPartition};
