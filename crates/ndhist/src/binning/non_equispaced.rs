//! Binning with arbitrary ascending edges.

use ndhist_core::{BinningScheme, Error, Result};

/// Non-equispaced binning scheme.
///
/// The bin holding a value is found by binary search over the edges, so
/// lookups cost `O(log n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NonEquispacedBinning {
    name: String,
    /// Sentinel-extended edges: first is `-inf`, last is `+inf`.
    edges: Vec<f64>,
}

impl NonEquispacedBinning {
    /// Build from strictly ascending `edges`, adding `-inf`/`+inf` sentinels
    /// where the supplied list does not already start/end with them.
    pub fn new(edges: &[f64], name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_edges(edges, &name)?;

        let mut all = Vec::with_capacity(edges.len() + 2);
        if edges[0] > f64::NEG_INFINITY {
            all.push(f64::NEG_INFINITY);
        }
        all.extend_from_slice(edges);
        if edges[edges.len() - 1] < f64::INFINITY {
            all.push(f64::INFINITY);
        }
        if all.len() < 3 {
            return Err(Error::Validation(format!(
                "axis '{name}': edges {edges:?} leave fewer than two bins"
            )));
        }

        log::debug!("non-equispaced axis '{}': {} bins", name, all.len() - 1);
        Ok(Self { name, edges: all })
    }

    /// Unnamed axis.
    pub fn unnamed(edges: &[f64]) -> Result<Self> {
        Self::new(edges, String::new())
    }
}

fn validate_edges(edges: &[f64], name: &str) -> Result<()> {
    if edges.is_empty() {
        return Err(Error::Validation(format!("axis '{name}': at least one bin edge is required")));
    }
    if let Some(i) = edges.iter().position(|e| e.is_nan()) {
        return Err(Error::Validation(format!("axis '{name}': edge {i} is NaN")));
    }
    if let Some(i) = edges.windows(2).position(|w| w[0] >= w[1]) {
        return Err(Error::Validation(format!(
            "axis '{name}': edges must be strictly ascending (edges[{i}]={} >= edges[{}]={})",
            edges[i],
            i + 1,
            edges[i + 1]
        )));
    }
    Ok(())
}

impl BinningScheme for NonEquispacedBinning {
    fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    fn edges(&self) -> &[f64] {
        &self.edges
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn index(&self, value: f64) -> usize {
        // First edge strictly greater than `value`.
        let upper = self.edges.partition_point(|&e| e <= value);
        assert!(upper > 0, "value {value} fell below the -inf sentinel of axis '{}'", self.name);
        // `+inf` passes every edge; keep it in the overflow bin.
        (upper - 1).min(self.edges.len() - 2)
    }
}
