use thiserror::Error;

/// An error type for image allocator operations.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ImageAllocatorError {
    /// The allocator could not provide memory for the requested buffer.
    #[error("Out of memory while allocating a buffer of {len} pixels")]
    OutOfMemory {
        /// Number of pixels requested.
        len: usize,
    },

    /// The requested buffer size in bytes does not fit in `isize`.
    #[error("Buffer of {0} pixels exceeds the addressable capacity")]
    CapacityOverflow(usize),
}

/// A trait for acquiring pixel buffers for images.
///
/// Implementors must report failure instead of aborting, so that callers can
/// surface an allocation failure as an ordinary error.
pub trait ImageAllocator: Clone {
    /// Allocates a buffer of `len` pixels, all set to `val`.
    fn alloc_buffer<T: Clone>(&self, len: usize, val: T) -> Result<Vec<T>, ImageAllocatorError>;
}

/// An image allocator that uses the system allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuAllocator;

impl ImageAllocator for CpuAllocator {
    /// Allocates a buffer through the global allocator.
    ///
    /// # Arguments
    ///
    /// * `len` - The number of pixels in the buffer.
    /// * `val` - The value every pixel is initialized with.
    ///
    /// # Returns
    ///
    /// The initialized buffer, or an error if the reservation failed.
    fn alloc_buffer<T: Clone>(&self, len: usize, val: T) -> Result<Vec<T>, ImageAllocatorError> {
        let num_bytes = len
            .checked_mul(std::mem::size_of::<T>())
            .ok_or(ImageAllocatorError::CapacityOverflow(len))?;
        if num_bytes > isize::MAX as usize {
            return Err(ImageAllocatorError::CapacityOverflow(len));
        }

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ImageAllocatorError::OutOfMemory { len })?;
        data.resize(len, val);

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_allocator() -> Result<(), ImageAllocatorError> {
        let allocator = CpuAllocator;
        let data = allocator.alloc_buffer(12, true)?;
        assert_eq!(data.len(), 12);
        assert!(data.iter().all(|&v| v));
        Ok(())
    }

    #[test]
    fn test_cpu_allocator_empty() -> Result<(), ImageAllocatorError> {
        let data = CpuAllocator.alloc_buffer(0, 0u8)?;
        assert!(data.is_empty());
        Ok(())
    }

    #[test]
    fn test_cpu_allocator_overflow() {
        let res = CpuAllocator.alloc_buffer(usize::MAX, 0u32);
        assert_eq!(res, Err(ImageAllocatorError::CapacityOverflow(usize::MAX)));
    }
}
