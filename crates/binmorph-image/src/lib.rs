#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// allocator module for acquiring pixel buffers.
pub mod allocator;

/// Error types for the image module.
pub mod error;

/// image representation for binary morphology.
pub mod image;

pub use crate::allocator::{CpuAllocator, ImageAllocator, ImageAllocatorError};
pub use crate::error::ImageError;
pub use crate::image::{Binary, BinaryImage, Gray8, Gray8Image, Image, ImageSize, BLACK, WHITE};
