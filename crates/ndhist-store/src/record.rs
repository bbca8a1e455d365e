//! Serializable snapshot of a histogram.

use ndhist::{BinningScheme, Histogram, NonEquispacedBinning};
use ndhist_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::float;

/// Everything needed to store and restore a histogram, read through its
/// public accessors only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramRecord {
    /// Number of dimensions.
    pub ndim: usize,
    /// Number of successful fills.
    pub nentries: u64,
    /// Histogram title.
    pub title: String,
    /// Bin count per dimension.
    pub shape: Vec<usize>,
    /// Sum of weights, flat row-major.
    #[serde(with = "float::vec")]
    pub bincontent: Vec<f64>,
    /// Sum of squared weights, flat row-major.
    #[serde(with = "float::vec")]
    pub squaredweights: Vec<f64>,
    /// Bin edges per dimension, sentinels included.
    #[serde(with = "float::nested")]
    pub binedges: Vec<Vec<f64>>,
    /// Dimension names.
    pub labels: Vec<String>,
}

impl HistogramRecord {
    /// Snapshot `hist`.
    pub fn from_histogram<B: BinningScheme, const N: usize>(hist: &Histogram<B, N>) -> Self {
        Self {
            ndim: hist.rank(),
            nentries: hist.n_entries(),
            title: hist.title().to_string(),
            shape: hist.shape().to_vec(),
            bincontent: hist.bincontent().as_slice().to_vec(),
            squaredweights: hist.squaredweights().as_slice().to_vec(),
            binedges: hist.binedges().iter().map(|e| e.to_vec()).collect(),
            labels: hist.labels().iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Check that all fields describe the same shape.
    pub fn validate(&self) -> Result<()> {
        if self.shape.len() != self.ndim
            || self.binedges.len() != self.ndim
            || self.labels.len() != self.ndim
        {
            return Err(Error::Shape(format!(
                "ndim={} but shape/binedges/labels have {}/{}/{} entries",
                self.ndim,
                self.shape.len(),
                self.binedges.len(),
                self.labels.len()
            )));
        }
        let size = self
            .shape
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| Error::Shape(format!("shape {:?} overflows usize", self.shape)))?;
        for (i, (edges, &n)) in self.binedges.iter().zip(&self.shape).enumerate() {
            if n.checked_add(1) != Some(edges.len()) {
                return Err(Error::Shape(format!(
                    "dimension {i}: {} edges for {n} bins",
                    edges.len()
                )));
            }
        }
        if self.bincontent.len() != size || self.squaredweights.len() != size {
            return Err(Error::Shape(format!(
                "shape {:?} needs {} bins, got bincontent={} squaredweights={}",
                self.shape,
                size,
                self.bincontent.len(),
                self.squaredweights.len()
            )));
        }
        Ok(())
    }

    /// Total sum of weights, flows included.
    pub fn sum_weights(&self) -> f64 {
        self.bincontent.iter().sum()
    }

    /// Rebuild a rank-`N` histogram with the stored edges and contents.
    ///
    /// Equispaced axes come back as [`NonEquispacedBinning`] with the same
    /// edges, so lookups agree up to floating-point rounding on bin edges.
    pub fn to_histogram<const N: usize>(&self) -> Result<Histogram<NonEquispacedBinning, N>> {
        self.validate()?;
        if self.ndim != N {
            return Err(Error::Shape(format!("record has rank {}, expected {}", self.ndim, N)));
        }
        let dims: Vec<NonEquispacedBinning> = self
            .binedges
            .iter()
            .zip(&self.labels)
            .map(|(edges, label)| NonEquispacedBinning::new(edges, label.clone()))
            .collect::<Result<_>>()?;
        let dims: [NonEquispacedBinning; N] = dims
            .try_into()
            .map_err(|_| Error::Shape(format!("record has rank {}, expected {}", self.ndim, N)))?;
        Histogram::from_parts(
            dims,
            self.title.clone(),
            self.nentries,
            self.bincontent.clone(),
            self.squaredweights.clone(),
        )
    }
}
