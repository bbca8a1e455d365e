//! Binning with edges uniform under a [`Transform`].

use ndhist_core::{BinningScheme, Error, Result};

use super::transform::Transform;

/// Equispaced binning scheme.
///
/// Edges are uniform in `transform.imap(x)` between `low` and `high`, so the
/// bin of a value is computed in constant time. Asking for `n` bins yields
/// `n + 1` edges between `low` and `high`, i.e. `n` interior bins plus one
/// extra interior bin, and the two sentinel bins: `bin_count() == n + 2`.
///
/// Bins are half-open like [`NonEquispacedBinning`](super::NonEquispacedBinning)
/// up to floating-point rounding: `index` goes through `imap` instead of
/// comparing against `edges()`, so a value lying exactly on an interior edge
/// may land in the bin below it. Values strictly between two edges, and the
/// `low`/`high` boundaries, always agree with a search over `edges()`.
#[derive(Debug, Clone, PartialEq)]
pub struct EquispacedBinning {
    name: String,
    edges: Vec<f64>,
    transform: Transform,
    requested_bins: usize,
    /// `imap(low)`
    offset: f64,
    /// `imap(high) - imap(low)`
    range: f64,
    /// `map(offset)`, the first finite edge.
    min: f64,
    /// `map(offset + range)`, the last finite edge.
    max: f64,
    /// Number of finite edges.
    steps: usize,
}

impl EquispacedBinning {
    /// Build an axis over `[low, high]` with edges uniform under `transform`.
    pub fn new(
        low: f64,
        high: f64,
        bins: usize,
        transform: Transform,
        name: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if bins == 0 {
            return Err(Error::Validation(format!("axis '{name}': bin count must be positive")));
        }
        if !low.is_finite() || !high.is_finite() {
            return Err(Error::Validation(format!(
                "axis '{name}': range [{low}, {high}] must be finite"
            )));
        }

        let offset = transform.imap(low);
        let range = transform.imap(high) - offset;
        if !offset.is_finite() || !range.is_finite() || range == 0.0 {
            return Err(Error::Validation(format!(
                "axis '{name}': range [{low}, {high}] is degenerate under {} transform",
                transform.label()
            )));
        }

        let steps = bins + 1;
        let denom = (steps - 1) as f64;
        let mut edges = Vec::with_capacity(steps + 2);
        edges.push(f64::NEG_INFINITY);
        for k in 0..steps {
            edges.push(transform.map(range * (k as f64 / denom) + offset));
        }
        edges.push(f64::INFINITY);

        let finite = &edges[1..=steps];
        if let Some(i) =
            finite.windows(2).position(|w| !w[0].is_finite() || !w[1].is_finite() || w[0] >= w[1])
        {
            return Err(Error::Validation(format!(
                "axis '{name}': {} transform is not increasing on [{low}, {high}] \
                 (edge {} = {}, edge {} = {})",
                transform.label(),
                i,
                finite[i],
                i + 1,
                finite[i + 1]
            )));
        }

        let min = transform.map(offset);
        let max = transform.map(range + offset);
        // `map` must invert `imap` on the whole range, else the axis silently
        // covers something other than `[low, high]`.
        let tol = (1e-9 * low.abs().max(high.abs())).max(1e-6 * (high - low).abs());
        if (min - low).abs() > tol || (max - high).abs() > tol {
            return Err(Error::Validation(format!(
                "axis '{name}': {} transform is not invertible on [{low}, {high}] \
                 (edges would span [{min}, {max}])",
                transform.label()
            )));
        }

        log::debug!(
            "equispaced axis '{}': [{}, {}] {} bins ({} transform)",
            name,
            low,
            high,
            steps + 1,
            transform.label()
        );
        Ok(Self { name, edges, transform, requested_bins: bins, offset, range, min, max, steps })
    }

    /// Edges linear in `x`.
    pub fn linear(low: f64, high: f64, bins: usize, name: impl Into<String>) -> Result<Self> {
        Self::new(low, high, bins, Transform::Identity, name)
    }

    /// Edges linear in `log10(x)`.
    pub fn log10(low: f64, high: f64, bins: usize, name: impl Into<String>) -> Result<Self> {
        Self::new(low, high, bins, Transform::Log10, name)
    }

    /// Edges linear in `cos(theta)`.
    pub fn cosine(low: f64, high: f64, bins: usize, name: impl Into<String>) -> Result<Self> {
        Self::new(low, high, bins, Transform::Cosine, name)
    }

    /// Edges linear in `x^(1/n)`.
    pub fn power(
        n: i32,
        low: f64,
        high: f64,
        bins: usize,
        name: impl Into<String>,
    ) -> Result<Self> {
        Self::new(low, high, bins, Transform::Power(n), name)
    }

    /// First finite edge.
    pub fn low(&self) -> f64 {
        self.min
    }

    /// Last finite edge.
    pub fn high(&self) -> f64 {
        self.max
    }

    /// Transform the edges are uniform under.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Bin count passed at construction.
    pub fn requested_bins(&self) -> usize {
        self.requested_bins
    }
}

impl BinningScheme for EquispacedBinning {
    fn bin_count(&self) -> usize {
        self.steps + 1
    }

    fn edges(&self) -> &[f64] {
        &self.edges
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn index(&self, value: f64) -> usize {
        if value < self.min {
            0
        } else if value >= self.max {
            self.edges.len() - 2
        } else {
            let u = (self.transform.imap(value) - self.offset) / self.range;
            let k = ((self.steps - 1) as f64 * u).floor();
            // Rounding near `min`/`max` can push `k` one step outside the interior.
            (k.max(0.0) as usize).min(self.steps - 2) + 1
        }
    }
}
