//! Borrowed views over a histogram's flat storage.

/// Read-only view of one of a histogram's flat arrays together with its shape.
///
/// The data is laid out row-major: the last dimension varies fastest. A view
/// borrows the histogram, so it cannot outlive it and no fill can happen while
/// it is alive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinView<'a, const N: usize> {
    data: &'a [f64],
    shape: [usize; N],
}

impl<'a, const N: usize> BinView<'a, N> {
    pub(crate) fn new(data: &'a [f64], shape: [usize; N]) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());
        Self { data, shape }
    }

    /// Flat, row-major data.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Base pointer of the flat data.
    pub fn as_ptr(&self) -> *const f64 {
        self.data.as_ptr()
    }

    /// Extent of each dimension.
    pub fn shape(&self) -> [usize; N] {
        self.shape
    }

    /// Total number of bins.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a view with no bins.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value of the bin at per-dimension indices `idx`, or `None` if any index
    /// is out of range.
    pub fn get(&self, idx: [usize; N]) -> Option<f64> {
        let mut offset = 0;
        for (&i, &extent) in idx.iter().zip(&self.shape) {
            if i >= extent {
                return None;
            }
            offset = offset * extent + i;
        }
        self.data.get(offset).copied()
    }

    /// Sum over all bins, flows included.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_row_major() {
        let data: Vec<f64> = (0..6).map(f64::from).collect();
        let v = BinView::new(&data, [2, 3]);
        assert_eq!(v.len(), 6);
        assert!(!v.is_empty());
        assert_eq!(v.get([0, 0]), Some(0.0));
        assert_eq!(v.get([0, 2]), Some(2.0));
        assert_eq!(v.get([1, 0]), Some(3.0));
        assert_eq!(v.get([1, 2]), Some(5.0));
        assert_eq!(v.get([2, 0]), None);
        assert_eq!(v.get([0, 3]), None);
        assert_eq!(v.sum(), 15.0);
        assert_eq!(v.as_ptr(), data.as_ptr());
    }
}
