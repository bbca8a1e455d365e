//! # ndhist-store
//!
//! Persists ndhist histograms as JSON. A file holds any number of named
//! groups; each group is a [`HistogramRecord`] with the histogram's rank,
//! entry count, title, shape, both accumulated arrays, bin edges and labels.
//!
//! ## Example
//!
//! ```no_run
//! use ndhist::{Histogram, NonEquispacedBinning};
//!
//! let mut h = Histogram::new([NonEquispacedBinning::new(&[0.0, 1.0, 2.0], "x").unwrap()]);
//! h.fill([0.5]);
//! ndhist_store::save(&h, "hists.json", "x", true).unwrap();
//!
//! let record = ndhist_store::load("hists.json", "x").unwrap();
//! let restored = record.to_histogram::<1>().unwrap();
//! assert_eq!(restored.n_entries(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file;
pub(crate) mod float;
pub mod record;

pub use file::{list, load, save, save_record};
pub use record::HistogramRecord;
