use binmorph_image::{ImageAllocatorError, ImageError};

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MorphologyError {
    /// The kernel has a zero dimension or more cells than `usize` can count.
    #[error("Invalid kernel dimensions {0}x{1}")]
    InvalidKernelSize(usize, usize),

    /// The kernel data does not match the declared kernel size.
    #[error("Kernel data length ({0}) does not match the kernel size {1}x{2}")]
    InvalidKernelLength(usize, usize, usize),

    /// The source or destination image is not usable for the operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The scratch image of a composite operation could not be acquired.
    #[error("Failed to acquire the scratch image: {0}")]
    OutOfMemory(#[from] ImageAllocatorError),
}
