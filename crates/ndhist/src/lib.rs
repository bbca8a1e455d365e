//! # ndhist
//!
//! Multi-dimensional weighted histograms with a fixed, compile-time rank.
//!
//! Each dimension is a binning scheme: either arbitrary edges searched in
//! `O(log n)` ([`NonEquispacedBinning`]) or edges uniform under a monotonic
//! [`Transform`] and found in `O(1)` ([`EquispacedBinning`]). Every axis has
//! an underflow and an overflow bin, so every non-NaN coordinate is counted.
//!
//! ## Example
//!
//! ```
//! use ndhist::{Binning, EquispacedBinning, Histogram, NonEquispacedBinning};
//!
//! let energy: Binning = EquispacedBinning::log10(1.0, 1e4, 8, "energy").unwrap().into();
//! let depth: Binning = NonEquispacedBinning::new(&[0.0, 1.5, 4.0], "depth").unwrap().into();
//!
//! let mut h = Histogram::with_title([energy, depth], "events");
//! assert!(h.fill_with_weight(0.5, [120.0, 2.0]));
//! assert!(!h.fill([f64::NAN, 2.0]));
//!
//! assert_eq!(h.n_entries(), 1);
//! assert_eq!(h.shape(), [10, 4]);
//! assert_eq!(h.bincontent().sum(), 0.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binning;
pub mod histogram;
pub mod spec;
pub mod view;

pub use binning::{Binning, EquispacedBinning, NonEquispacedBinning, Transform};
pub use histogram::Histogram;
pub use ndhist_core::{BinningScheme, Error, Result};
pub use spec::{AxisSpec, HistogramSpec};
pub use view::BinView;
