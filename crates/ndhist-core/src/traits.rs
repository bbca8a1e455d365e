//! Core traits for ndhist
//!
//! A histogram is composed from one binning scheme per dimension. The
//! composition only depends on this trait, so the indexing engine never
//! needs to know whether a dimension uses binary search or a closed-form
//! lookup.

/// Capability every dimension of a histogram must provide.
///
/// Implementations guarantee that `edges()` is strictly ascending, starts with
/// `-inf`, ends with `+inf`, and has `bin_count() + 1` entries. `index` must
/// return a value in `0..bin_count()` for every non-NaN input; callers filter
/// NaN before calling it.
pub trait BinningScheme {
    /// Number of bins, including the underflow and overflow bins.
    fn bin_count(&self) -> usize;

    /// Bin edges (length = `bin_count() + 1`).
    fn edges(&self) -> &[f64];

    /// Dimension label (empty if unnamed).
    fn name(&self) -> &str;

    /// Bin index for `value`.
    fn index(&self, value: f64) -> usize;
}

impl<T: BinningScheme + ?Sized> BinningScheme for &T {
    fn bin_count(&self) -> usize {
        (**self).bin_count()
    }

    fn edges(&self) -> &[f64] {
        (**self).edges()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn index(&self, value: f64) -> usize {
        (**self).index(value)
    }
}
