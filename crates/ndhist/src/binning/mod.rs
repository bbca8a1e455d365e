//! Per-dimension binning schemes.
//!
//! - [`NonEquispacedBinning`]: arbitrary ascending edges, binary-search lookup.
//! - [`EquispacedBinning`]: edges uniform under a [`Transform`], O(1) lookup.
//! - [`Binning`]: either of the above, for histograms mixing both kinds.

mod equispaced;
mod non_equispaced;
pub mod transform;

pub use equispaced::EquispacedBinning;
pub use non_equispaced::NonEquispacedBinning;
pub use transform::Transform;

use ndhist_core::BinningScheme;

/// A binning scheme of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Binning {
    /// Arbitrary edges.
    NonEquispaced(NonEquispacedBinning),
    /// Uniform edges under a transform.
    Equispaced(EquispacedBinning),
}

impl From<NonEquispacedBinning> for Binning {
    fn from(b: NonEquispacedBinning) -> Self {
        Self::NonEquispaced(b)
    }
}

impl From<EquispacedBinning> for Binning {
    fn from(b: EquispacedBinning) -> Self {
        Self::Equispaced(b)
    }
}

impl BinningScheme for Binning {
    fn bin_count(&self) -> usize {
        match self {
            Self::NonEquispaced(b) => b.bin_count(),
            Self::Equispaced(b) => b.bin_count(),
        }
    }

    fn edges(&self) -> &[f64] {
        match self {
            Self::NonEquispaced(b) => b.edges(),
            Self::Equispaced(b) => b.edges(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::NonEquispaced(b) => b.name(),
            Self::Equispaced(b) => b.name(),
        }
    }

    #[inline]
    fn index(&self, value: f64) -> usize {
        match self {
            Self::NonEquispaced(b) => b.index(value),
            Self::Equispaced(b) => b.index(value),
        }
    }
}
