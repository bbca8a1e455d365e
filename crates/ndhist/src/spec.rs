//! JSON-describable histogram definitions.
//!
//! ```json
//! {
//!   "title": "muons",
//!   "axes": [
//!     { "kind": "equispaced", "name": "energy", "low": 1.0, "high": 1e6, "bins": 60, "transform": "log10" },
//!     { "kind": "equispaced", "name": "zenith", "low": 0.0, "high": 3.14159, "bins": 20, "transform": "cosine" },
//!     { "kind": "non_equispaced", "name": "depth", "edges": [0.0, 1.5, 2.5, 4.0] }
//!   ]
//! }
//! ```

use std::path::Path;

use ndhist_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::binning::{Binning, EquispacedBinning, NonEquispacedBinning, Transform};
use crate::histogram::Histogram;

/// Definition of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisSpec {
    /// Arbitrary ascending edges; `-inf`/`+inf` sentinels are added.
    NonEquispaced {
        /// Axis label.
        #[serde(default)]
        name: String,
        /// Strictly ascending finite edges.
        edges: Vec<f64>,
    },
    /// `bins` steps uniform under `transform` between `low` and `high`.
    Equispaced {
        /// Axis label.
        #[serde(default)]
        name: String,
        /// Lower edge of the first interior bin.
        low: f64,
        /// Upper edge of the last interior bin.
        high: f64,
        /// Requested number of bins.
        bins: usize,
        /// Spacing transform (identity if omitted).
        #[serde(default)]
        transform: Transform,
    },
}

impl AxisSpec {
    /// Axis label.
    pub fn name(&self) -> &str {
        match self {
            Self::NonEquispaced { name, .. } | Self::Equispaced { name, .. } => name,
        }
    }

    /// Build the validated binning scheme.
    pub fn build(&self) -> Result<Binning> {
        Ok(match self {
            Self::NonEquispaced { name, edges } => {
                NonEquispacedBinning::new(edges, name.clone())?.into()
            }
            Self::Equispaced { name, low, high, bins, transform } => {
                EquispacedBinning::new(*low, *high, *bins, *transform, name.clone())?.into()
            }
        })
    }
}

/// Definition of a histogram: a title plus one [`AxisSpec`] per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSpec {
    /// Histogram title.
    #[serde(default)]
    pub title: String,
    /// One entry per dimension, slowest-varying first.
    pub axes: Vec<AxisSpec>,
}

impl HistogramSpec {
    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading histogram spec from {}", path.display());
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    /// Build every axis in order.
    pub fn build_axes(&self) -> Result<Vec<Binning>> {
        self.axes.iter().map(AxisSpec::build).collect()
    }

    /// Build an empty histogram of rank `N`.
    ///
    /// Fails with [`Error::Shape`] if the spec does not have exactly `N` axes.
    pub fn build<const N: usize>(&self) -> Result<Histogram<Binning, N>> {
        let dims: [Binning; N] = self.build_axes()?.try_into().map_err(|axes: Vec<Binning>| {
            Error::Shape(format!("spec has {} axes, expected {}", axes.len(), N))
        })?;
        Histogram::try_with_title(dims, self.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndhist_core::BinningScheme;

    const DEMO: &str = r#"{
        "title": "demo",
        "axes": [
            { "kind": "equispaced", "name": "dimension", "low": 0.0, "high": 10.0, "bins": 11 },
            { "kind": "non_equispaced", "name": "general", "edges": [0.0, 1.0, 2.0] }
        ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let spec = HistogramSpec::from_json_str(DEMO).unwrap();
        assert_eq!(spec.rank(), 2);
        assert_eq!(spec.axes[0].name(), "dimension");

        let h = spec.build::<2>().unwrap();
        assert_eq!(h.title(), "demo");
        assert_eq!(h.shape(), [13, 4]);
        assert_eq!(h.labels(), ["dimension", "general"]);
    }

    #[test]
    fn test_build_matches_direct_construction() {
        let spec = HistogramSpec::from_json_str(DEMO).unwrap();
        let built = spec.build_axes().unwrap();
        let direct: Binning = EquispacedBinning::linear(0.0, 10.0, 11, "dimension").unwrap().into();
        assert_eq!(built[0], direct);
        assert_eq!(built[1].edges(), &[f64::NEG_INFINITY, 0.0, 1.0, 2.0, f64::INFINITY]);
    }

    #[test]
    fn test_transform_parsing() {
        let json = r#"{ "axes": [
            { "kind": "equispaced", "low": 1.0, "high": 100.0, "bins": 2, "transform": "log10" },
            { "kind": "equispaced", "low": 0.0, "high": 9.0, "bins": 3, "transform": { "power": 2 } }
        ] }"#;
        let spec = HistogramSpec::from_json_str(json).unwrap();
        assert_eq!(spec.title, "");
        match &spec.axes[1] {
            AxisSpec::Equispaced { transform, .. } => assert_eq!(*transform, Transform::Power(2)),
            other => panic!("unexpected axis {other:?}"),
        }
        assert!(spec.build::<2>().is_ok());
    }

    #[test]
    fn test_rank_mismatch() {
        let spec = HistogramSpec::from_json_str(DEMO).unwrap();
        assert!(matches!(spec.build::<3>(), Err(Error::Shape(_))));
    }

    #[test]
    fn test_invalid_axis_is_validation_error() {
        let json = r#"{ "axes": [ { "kind": "non_equispaced", "edges": [2.0, 1.0] } ] }"#;
        let spec = HistogramSpec::from_json_str(json).unwrap();
        assert!(matches!(spec.build::<1>(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(HistogramSpec::from_json_str("{ \"axes\": 3 }"), Err(Error::Json(_))));
    }
}
