//! # ndhist-core
//!
//! Shared building blocks for the ndhist workspace: the error type and the
//! [`BinningScheme`] capability that every histogram dimension implements.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;

pub use error::{Error, Result};
pub use traits::BinningScheme;
