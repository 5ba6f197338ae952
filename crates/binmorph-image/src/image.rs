use crate::allocator::{CpuAllocator, ImageAllocator, ImageAllocatorError};
use crate::error::ImageError;

/// A two-valued pixel.
pub type Binary = bool;

/// An 8-bit grayscale pixel.
pub type Gray8 = u8;

/// The low end of the binary range.
///
/// Only a naming aid for callers choosing a background value.
pub const BLACK: Binary = false;

/// The high end of the binary range.
pub const WHITE: Binary = true;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use binmorph_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size, or `None` if it overflows `usize`.
    pub fn num_pixels(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents a single-channel image with pixel data.
///
/// The pixels are stored row-major, so the pixel at `(x, y)` lives at index
/// `y * width + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image<T> {
    size: ImageSize,
    data: Vec<T>,
}

/// A two-valued image.
pub type BinaryImage = Image<Binary>;

/// An 8-bit grayscale image.
pub type Gray8Image = Image<Gray8>;

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image, row-major.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use binmorph_image::{BinaryImage, ImageSize};
    ///
    /// let image = BinaryImage::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![false; 10 * 20],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // an overflowing size saturates and can never match a real buffer
        let num_pixels = size.num_pixels().unwrap_or(usize::MAX);
        if data.len() != num_pixels {
            return Err(ImageError::InvalidChannelShape(data.len(), num_pixels));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with every pixel set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use binmorph_image::{Gray8Image, ImageSize};
    ///
    /// let image = Gray8Image::from_size_val([4, 5].into(), 7).unwrap();
    ///
    /// assert_eq!(image.size(), ImageSize { width: 4, height: 5 });
    /// assert!(image.as_slice().iter().all(|&v| v == 7));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Self::from_size_val_in(size, val, &CpuAllocator)
    }

    /// Create a new image with every pixel set to `val`, acquiring the buffer
    /// from `allocator`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Allocation`] if the allocator cannot provide the
    /// buffer, or if `width * height` overflows `usize`.
    pub fn from_size_val_in<A: ImageAllocator>(
        size: ImageSize,
        val: T,
        allocator: &A,
    ) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let num_pixels = size
            .num_pixels()
            .ok_or(ImageAllocatorError::CapacityOverflow(usize::MAX))?;
        let data = allocator.alloc_buffer(num_pixels, val)?;
        Ok(Self { size, data })
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The pixel data as a row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The pixel data as a mutable row-major slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        Ok(y * self.size.width + x)
    }

    /// Get the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] if the coordinate is outside the image.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<&T, ImageError> {
        let idx = self.checked_index(x, y)?;
        Ok(&self.data[idx])
    }

    /// Set the pixel at `(x, y)` to `val`.
    pub fn set_pixel(&mut self, x: usize, y: usize, val: T) -> Result<(), ImageError> {
        let idx = self.checked_index(x, y)?;
        self.data[idx] = val;
        Ok(())
    }
}

impl Image<Binary> {
    /// Render the image as text, `#` for `foreground` pixels and `.` otherwise.
    ///
    /// Useful to inspect small masks in a terminal or in test failures.
    pub fn to_ascii(&self, foreground: Binary) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for row in self.data.chunks_exact(self.width().max(1)) {
            for &v in row {
                out.push(if v == foreground { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    /// Number of pixels equal to `foreground`.
    pub fn count(&self, foreground: Binary) -> usize {
        self.data.iter().filter(|&&v| v == foreground).count()
    }
}
