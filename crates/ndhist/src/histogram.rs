//! Fixed-rank histogram: indexing, accumulation and introspection.

use ndhist_core::{BinningScheme, Error, Result};

use crate::view::BinView;

/// A histogram over `N` dimensions, each discretized by a `B`.
///
/// Every dimension carries an underflow and an overflow bin, so every non-NaN
/// coordinate tuple lands in exactly one bin. Storage is two flat row-major
/// arrays (sum of weights, sum of squared weights) sized once at construction.
#[derive(Debug, Clone)]
pub struct Histogram<B, const N: usize> {
    dims: [B; N],
    title: String,
    n_entries: u64,
    /// Sum of weights per bin.
    bincontent: Vec<f64>,
    /// Sum of weights squared per bin.
    squaredweights: Vec<f64>,
}

impl<B: BinningScheme, const N: usize> Histogram<B, N> {
    /// Compose a histogram with an empty title.
    pub fn new(dims: [B; N]) -> Self {
        Self::with_title(dims, String::new())
    }

    /// Compose a histogram with the given title.
    ///
    /// # Panics
    /// If the total bin count overflows `usize`. See [`Histogram::try_with_title`].
    pub fn with_title(dims: [B; N], title: impl Into<String>) -> Self {
        Self::try_with_title(dims, title).expect("histogram bin count overflows usize")
    }

    /// Like [`Histogram::with_title`], but reports an overflowing total bin
    /// count as [`Error::Shape`].
    pub fn try_with_title(dims: [B; N], title: impl Into<String>) -> Result<Self> {
        let size = total_bins(&dims)?;
        let title = title.into();
        log::debug!("histogram '{}': rank {}, {} bins", title, N, size);
        Ok(Self {
            dims,
            title,
            n_entries: 0,
            bincontent: vec![0.0; size],
            squaredweights: vec![0.0; size],
        })
    }

    /// Rebuild a histogram from previously accumulated arrays.
    ///
    /// Used when restoring a persisted snapshot; both arrays must match the
    /// size implied by `dims`.
    pub fn from_parts(
        dims: [B; N],
        title: impl Into<String>,
        n_entries: u64,
        bincontent: Vec<f64>,
        squaredweights: Vec<f64>,
    ) -> Result<Self> {
        let size = total_bins(&dims)?;
        if bincontent.len() != size || squaredweights.len() != size {
            return Err(Error::Shape(format!(
                "expected {} bins, got bincontent={} squaredweights={}",
                size,
                bincontent.len(),
                squaredweights.len()
            )));
        }
        Ok(Self { dims, title: title.into(), n_entries, bincontent, squaredweights })
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        N
    }

    /// Total number of bins (product of per-dimension bin counts).
    pub fn size(&self) -> usize {
        self.bincontent.len()
    }

    /// Flat-offset multiplier of dimension `i`: the product of the bin counts
    /// of all later dimensions.
    ///
    /// # Panics
    /// If `i >= N`.
    pub fn stride(&self, i: usize) -> usize {
        assert!(i < N, "dimension {i} out of range for rank {N}");
        self.dims[i + 1..].iter().map(BinningScheme::bin_count).product()
    }

    /// Flat storage offset of `coords`. Coordinates must not be NaN.
    #[inline]
    pub fn index(&self, coords: &[f64; N]) -> usize {
        self.dims.iter().zip(coords).fold(0, |acc, (d, &v)| acc * d.bin_count() + d.index(v))
    }

    /// Per-dimension bin indices of a flat offset.
    ///
    /// # Panics
    /// If `offset >= self.size()`.
    pub fn unravel(&self, offset: usize) -> [usize; N] {
        assert!(offset < self.size(), "offset {offset} out of range for {} bins", self.size());
        let mut idx = [0; N];
        let mut rest = offset;
        for (slot, d) in idx.iter_mut().zip(&self.dims).rev() {
            let n = d.bin_count();
            *slot = rest % n;
            rest /= n;
        }
        idx
    }

    /// False if any coordinate is NaN.
    #[inline]
    pub fn valid(&self, coords: &[f64; N]) -> bool {
        !coords.iter().any(|v| v.is_nan())
    }

    /// Fill with unit weight. See [`Self::fill_with_weight`].
    #[inline]
    pub fn fill(&mut self, coords: [f64; N]) -> bool {
        self.fill_with_weight(1.0, coords)
    }

    /// Add `weight` to the bin holding `coords`.
    ///
    /// Returns `false` and leaves the histogram untouched if any coordinate is
    /// NaN. Infinite and out-of-range coordinates go to the flow bins.
    pub fn fill_with_weight(&mut self, weight: f64, coords: [f64; N]) -> bool {
        if !self.valid(&coords) {
            return false;
        }
        let offset = self.index(&coords);
        self.bincontent[offset] += weight;
        self.squaredweights[offset] += weight * weight;
        self.n_entries += 1;
        true
    }

    /// Bin count of every dimension.
    pub fn shape(&self) -> [usize; N] {
        std::array::from_fn(|i| self.dims[i].bin_count())
    }

    /// Bin edges of every dimension.
    pub fn binedges(&self) -> [&[f64]; N] {
        std::array::from_fn(|i| self.dims[i].edges())
    }

    /// Name of every dimension.
    pub fn labels(&self) -> [&str; N] {
        std::array::from_fn(|i| self.dims[i].name())
    }

    /// The binning schemes the histogram was composed from.
    pub fn dimensions(&self) -> &[B; N] {
        &self.dims
    }

    /// Sum of weights per bin.
    pub fn bincontent(&self) -> BinView<'_, N> {
        BinView::new(&self.bincontent, self.shape())
    }

    /// Sum of squared weights per bin.
    pub fn squaredweights(&self) -> BinView<'_, N> {
        BinView::new(&self.squaredweights, self.shape())
    }

    /// Number of successful fills.
    pub fn n_entries(&self) -> u64 {
        self.n_entries
    }

    /// Histogram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

fn total_bins<B: BinningScheme>(dims: &[B]) -> Result<usize> {
    dims.iter().try_fold(1usize, |acc, d| acc.checked_mul(d.bin_count())).ok_or_else(|| {
        let shape: Vec<usize> = dims.iter().map(BinningScheme::bin_count).collect();
        Error::Shape(format!("total bin count of shape {shape:?} overflows usize"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::{Binning, EquispacedBinning, NonEquispacedBinning};
    use approx::assert_relative_eq;

    fn general(edges: &[f64]) -> NonEquispacedBinning {
        NonEquispacedBinning::unnamed(edges).unwrap()
    }

    #[test]
    fn fill_simple() {
        let mut h = Histogram::new([general(&[0.0, 1.0, 2.0, 3.0])]);
        for x in [0.5, 1.5, 2.5, 0.5, -1.0, 3.5] {
            assert!(h.fill([x]));
        }
        assert_eq!(h.bincontent().as_slice(), &[1.0, 2.0, 1.0, 1.0, 1.0]);
        assert_eq!(h.n_entries(), 6);
    }

    #[test]
    fn fill_with_weight() {
        let mut h = Histogram::new([general(&[0.0, 1.0, 2.0])]);
        h.fill_with_weight(2.0, [0.5]);
        h.fill_with_weight(3.0, [1.5]);
        h.fill_with_weight(1.0, [0.5]);
        assert_eq!(h.bincontent().as_slice(), &[0.0, 3.0, 3.0, 0.0]);
        assert_eq!(h.squaredweights().as_slice(), &[0.0, 5.0, 9.0, 0.0]);
        assert_eq!(h.n_entries(), 3);
    }

    #[test]
    fn fill_same_coordinates_sums_squares() {
        let mut h = Histogram::new([general(&[0.0, 1.0]), general(&[0.0, 1.0])]);
        let w = 1.5;
        assert!(h.fill_with_weight(w, [0.5, 0.5]));
        assert!(h.fill_with_weight(w, [0.5, 0.5]));
        let idx = [1, 1];
        assert_relative_eq!(h.bincontent().get(idx).unwrap(), 2.0 * w);
        assert_relative_eq!(h.squaredweights().get(idx).unwrap(), 2.0 * w * w);
    }

    #[test]
    fn fill_nan_is_rejected() {
        let mut h = Histogram::new([general(&[0.0, 1.0]), general(&[0.0, 1.0])]);
        assert!(h.fill([0.5, 0.5]));
        let before_content = h.bincontent().as_slice().to_vec();
        let before_sq = h.squaredweights().as_slice().to_vec();

        assert!(!h.fill([f64::NAN, 0.5]));
        assert!(!h.fill_with_weight(4.0, [0.5, f64::NAN]));

        assert_eq!(h.n_entries(), 1);
        assert_eq!(h.bincontent().as_slice(), before_content.as_slice());
        assert_eq!(h.squaredweights().as_slice(), before_sq.as_slice());
    }

    #[test]
    fn fill_infinities_go_to_flow_bins() {
        let mut h = Histogram::new([general(&[0.0, 1.0, 2.0])]);
        assert!(h.fill([f64::NEG_INFINITY]));
        assert!(h.fill([f64::INFINITY]));
        assert_eq!(h.bincontent().as_slice(), &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn strides_are_row_major() {
        let h = Histogram::new([general(&[0.0]), general(&[0.0, 1.0]), general(&[0.0, 1.0, 2.0])]);
        assert_eq!(h.shape(), [2, 3, 4]);
        assert_eq!(h.size(), 24);
        assert_eq!(h.stride(0), 12);
        assert_eq!(h.stride(1), 4);
        assert_eq!(h.stride(2), 1);

        let coords = [0.5, -3.0, 1.5];
        let per_dim = [1, 0, 2];
        let expected: usize = (0..3).map(|i| per_dim[i] * h.stride(i)).sum();
        assert_eq!(h.index(&coords), expected);
        assert_eq!(h.unravel(expected), per_dim);
    }

    #[test]
    fn unravel_inverts_index() {
        let h = Histogram::new([general(&[0.0, 1.0]), general(&[-1.0, 0.0, 1.0, 2.0])]);
        for offset in 0..h.size() {
            let [i, j] = h.unravel(offset);
            assert_eq!(i * h.stride(0) + j * h.stride(1), offset);
        }
    }

    #[test]
    fn introspection_matches_dimensions() {
        let dims: [Binning; 2] = [
            EquispacedBinning::linear(0.0, 10.0, 11, "dimension").unwrap().into(),
            NonEquispacedBinning::new(&[0.0, 1.0, 2.0], "general").unwrap().into(),
        ];
        let mut h = Histogram::with_title(dims, "hola");
        assert_eq!(h.rank(), 2);
        assert_eq!(h.title(), "hola");
        assert_eq!(h.labels(), ["dimension", "general"]);

        let shape = h.shape();
        let edges = h.binedges();
        for i in 0..2 {
            assert_eq!(edges[i].len(), shape[i] + 1);
        }
        assert_eq!(h.size(), shape.iter().product::<usize>());

        h.set_title("renamed");
        assert_eq!(h.title(), "renamed");
        assert_eq!(h.dimensions()[1].name(), "general");
    }

    #[test]
    fn introspection_is_idempotent() {
        let h = Histogram::new([general(&[0.0, 1.0]), general(&[5.0])]);
        assert_eq!(h.shape(), h.shape());
        assert_eq!(h.binedges(), h.binedges());
        assert_eq!(h.labels(), h.labels());
        assert_eq!(h.title(), "");
    }

    #[test]
    fn oversized_shape_is_rejected() {
        let edges: Vec<f64> = (0..70_000).map(f64::from).collect();
        let d = general(&edges);
        let dims = [d.clone(), d.clone(), d.clone(), d];

        let err = Histogram::try_with_title(dims.clone(), "big").unwrap_err();
        assert!(matches!(err, Error::Shape(ref m) if m.contains("overflows")), "{err}");
        let err = Histogram::from_parts(dims, "big", 0, vec![], vec![]).unwrap_err();
        assert!(matches!(err, Error::Shape(_)), "{err}");
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn oversized_shape_panics_in_with_title() {
        let edges: Vec<f64> = (0..70_000).map(f64::from).collect();
        let d = general(&edges);
        let _ = Histogram::new([d.clone(), d.clone(), d.clone(), d]);
    }

    #[test]
    fn from_parts_checks_sizes() {
        let ok = Histogram::from_parts([general(&[0.0])], "t", 3, vec![1.0, 2.0], vec![1.0, 2.0]);
        assert_eq!(ok.unwrap().n_entries(), 3);

        let err = Histogram::from_parts([general(&[0.0])], "t", 0, vec![0.0; 3], vec![0.0; 2]);
        assert!(matches!(err, Err(Error::Shape(_))));
    }
}
