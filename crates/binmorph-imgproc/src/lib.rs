#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// conversions between binary and grayscale images.
pub mod color;

/// binary morphology module.
pub mod morphology;
