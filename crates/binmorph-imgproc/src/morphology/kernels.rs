use binmorph_image::{Binary, BLACK, WHITE};

use super::MorphologyError;

const O: Binary = BLACK;
const I: Binary = WHITE;

/// 3x3 cross (plus) structuring element.
pub const CROSS_3X3: [Binary; 9] = [
    O, I, O, //
    I, I, I, //
    O, I, O, //
];

/// Side length of [`CROSS_3X3`].
pub const CROSS_3X3_SIZE: usize = 3;

/// 3x3 full square structuring element.
pub const RECT_3X3: [Binary; 9] = [I; 9];

/// Side length of [`RECT_3X3`].
pub const RECT_3X3_SIZE: usize = 3;

/// 5x5 approximate circle structuring element.
pub const CIRCLE_5X5: [Binary; 25] = [
    O, O, I, O, O, //
    O, I, I, I, O, //
    I, I, I, I, I, //
    O, I, I, I, O, //
    O, O, I, O, O, //
];

/// Side length of [`CIRCLE_5X5`].
pub const CIRCLE_5X5_SIZE: usize = 5;

/// Shapes of morphological `Kernels`.
///
/// Generated kernels mark their active cells with [`WHITE`], which is the
/// foreground when operating with a [`BLACK`] background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelShape {
    /// A rectangle where every cell is active.
    Rect {
        /// Width of the rectangle.
        width: usize,
        /// Height of the rectangle.
        height: usize,
    },

    /// A plus shape: only the center row and the center column are active.
    Cross {
        /// Side length of the square kernel.
        size: usize,
    },

    /// A discrete disk of radius `size / 2` centered at the origin.
    ///
    /// For `size = 5` this yields [`CIRCLE_5X5`].
    Circle {
        /// Side length of the square kernel.
        size: usize,
    },
}

/// A binary structuring element.
///
/// The mask is stored row-major. Its origin is always at
/// `(width / 2, height / 2)`, so for even sizes it sits right of and below
/// the geometric center.
///
/// Which cells take part in an operation depends on the background passed to
/// the operator: a cell is active when its value is the complement of the
/// background. Use [`Kernel::inverted`] to reuse a mask with the opposite
/// background.
///
/// # Example
///
/// ```rust
/// use binmorph_imgproc::morphology::{Kernel, KernelShape, CROSS_3X3};
///
/// let kernel = Kernel::new(KernelShape::Cross { size: 3 }).unwrap();
/// assert_eq!(kernel.data(), &CROSS_3X3);
/// assert_eq!(kernel.origin(), (1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    data: Vec<Binary>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Create a kernel from one of the predefined shapes.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::InvalidKernelSize`] if a dimension is zero or
    /// `width * height` overflows `usize`.
    pub fn new(shape: KernelShape) -> Result<Self, MorphologyError> {
        let (width, height) = match shape {
            KernelShape::Rect { width, height } => (width, height),
            KernelShape::Cross { size } | KernelShape::Circle { size } => (size, size),
        };
        let num_cells = width
            .checked_mul(height)
            .filter(|&n| n > 0)
            .ok_or(MorphologyError::InvalidKernelSize(width, height))?;

        let (cx, cy) = (width / 2, height / 2);
        let mut data = vec![BLACK; num_cells];
        for (idx, cell) in data.iter_mut().enumerate() {
            let (kx, ky) = (idx % width, idx / width);
            *cell = match shape {
                KernelShape::Rect { .. } => WHITE,
                KernelShape::Cross { .. } => kx == cx || ky == cy,
                KernelShape::Circle { size } => {
                    let r = (size / 2) as isize;
                    let dx = kx as isize - cx as isize;
                    let dy = ky as isize - cy as isize;
                    dx * dx + dy * dy <= r * r
                }
            };
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a kernel from a row-major mask.
    ///
    /// # Arguments
    ///
    /// * `data` - The mask, `width * height` cells.
    /// * `width` - The width of the kernel.
    /// * `height` - The height of the kernel.
    ///
    /// # Errors
    ///
    /// Fails if a dimension is zero or the mask length does not match.
    ///
    /// # Example
    ///
    /// ```rust
    /// use binmorph_imgproc::morphology::{Kernel, CIRCLE_5X5, CIRCLE_5X5_SIZE};
    ///
    /// let kernel = Kernel::from_slice(&CIRCLE_5X5, CIRCLE_5X5_SIZE, CIRCLE_5X5_SIZE).unwrap();
    /// assert_eq!(kernel.origin(), (2, 2));
    /// ```
    pub fn from_slice(data: &[Binary], width: usize, height: usize) -> Result<Self, MorphologyError> {
        if width == 0 || height == 0 {
            return Err(MorphologyError::InvalidKernelSize(width, height));
        }
        if width.checked_mul(height) != Some(data.len()) {
            return Err(MorphologyError::InvalidKernelLength(
                data.len(),
                width,
                height,
            ));
        }

        Ok(Self {
            data: data.to_vec(),
            width,
            height,
        })
    }

    /// The predefined [`CROSS_3X3`] kernel.
    pub fn cross_3x3() -> Self {
        Self::from_const(&CROSS_3X3, CROSS_3X3_SIZE)
    }

    /// The predefined [`RECT_3X3`] kernel.
    pub fn rect_3x3() -> Self {
        Self::from_const(&RECT_3X3, RECT_3X3_SIZE)
    }

    /// The predefined [`CIRCLE_5X5`] kernel.
    pub fn circle_5x5() -> Self {
        Self::from_const(&CIRCLE_5X5, CIRCLE_5X5_SIZE)
    }

    fn from_const(data: &[Binary], size: usize) -> Self {
        Self {
            data: data.to_vec(),
            width: size,
            height: size,
        }
    }

    /// A kernel with every cell flipped.
    ///
    /// A mask written for a [`BLACK`] background selects the same cells under a
    /// [`WHITE`] background once inverted.
    pub fn inverted(&self) -> Self {
        Self {
            data: self.data.iter().map(|&v| !v).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Get a reference to the kernel mask.
    pub fn data(&self) -> &[Binary] {
        &self.data
    }

    /// Get the width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the kernel origin as `(x, y)`.
    pub fn origin(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Offsets `(dx, dy)` from the origin of the cells active for `foreground`.
    pub(crate) fn active_offsets(
        &self,
        foreground: Binary,
    ) -> impl Iterator<Item = (isize, isize)> + '_ {
        let (cx, cy) = self.origin();
        self.data
            .iter()
            .enumerate()
            .filter(move |(_, v)| **v == foreground)
            .map(move |(idx, _)| {
                let kx = idx % self.width;
                let ky = idx / self.width;
                (kx as isize - cx as isize, ky as isize - cy as isize)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_kernel() -> Result<(), MorphologyError> {
        let kernel = Kernel::new(KernelShape::Rect {
            width: 5,
            height: 3,
        })?;
        assert_eq!(kernel.width(), 5);
        assert_eq!(kernel.height(), 3);
        assert_eq!(kernel.origin(), (2, 1));
        assert!(kernel.data().iter().all(|&v| v));
        assert_eq!(Kernel::new(KernelShape::Rect { width: 3, height: 3 })?, Kernel::rect_3x3());
        Ok(())
    }

    #[test]
    fn test_cross_kernel() -> Result<(), MorphologyError> {
        let kernel = Kernel::new(KernelShape::Cross { size: 3 })?;
        assert_eq!(kernel, Kernel::cross_3x3());

        let kernel = Kernel::new(KernelShape::Cross { size: 5 })?;
        let data = kernel.data();
        assert_eq!(data.iter().filter(|&&v| v).count(), 9);
        // corners
        assert!(!data[0]);
        assert!(!data[4]);
        assert!(!data[20]);
        assert!(!data[24]);
        // center row
        assert!(data[10..15].iter().all(|&v| v));
        Ok(())
    }

    #[test]
    fn test_circle_kernel() -> Result<(), MorphologyError> {
        let kernel = Kernel::new(KernelShape::Circle { size: 5 })?;
        assert_eq!(kernel, Kernel::circle_5x5());

        let kernel = Kernel::new(KernelShape::Circle { size: 1 })?;
        assert_eq!(kernel.data(), &[WHITE]);
        Ok(())
    }

    #[test]
    fn test_kernel_zero_size() {
        assert_eq!(
            Kernel::new(KernelShape::Cross { size: 0 }),
            Err(MorphologyError::InvalidKernelSize(0, 0))
        );
        assert_eq!(
            Kernel::from_slice(&[], 0, 3),
            Err(MorphologyError::InvalidKernelSize(0, 3))
        );
    }

    #[test]
    fn test_kernel_size_overflow() {
        assert_eq!(
            Kernel::from_slice(&[], usize::MAX, 2),
            Err(MorphologyError::InvalidKernelLength(0, usize::MAX, 2))
        );
        assert_eq!(
            Kernel::new(KernelShape::Rect {
                width: usize::MAX,
                height: 2,
            }),
            Err(MorphologyError::InvalidKernelSize(usize::MAX, 2))
        );
        assert_eq!(
            Kernel::new(KernelShape::Cross { size: usize::MAX }),
            Err(MorphologyError::InvalidKernelSize(usize::MAX, usize::MAX))
        );
    }

    #[test]
    fn test_kernel_wrong_length() {
        assert_eq!(
            Kernel::from_slice(&RECT_3X3, 3, 2),
            Err(MorphologyError::InvalidKernelLength(9, 3, 2))
        );
    }

    #[test]
    fn test_kernel_even_origin() -> Result<(), MorphologyError> {
        let kernel = Kernel::from_slice(&[WHITE; 4], 2, 2)?;
        assert_eq!(kernel.origin(), (1, 1));
        let offsets: Vec<_> = kernel.active_offsets(WHITE).collect();
        assert_eq!(offsets, vec![(-1, -1), (0, -1), (-1, 0), (0, 0)]);
        Ok(())
    }

    #[test]
    fn test_active_offsets_follow_foreground() {
        let kernel = Kernel::cross_3x3();
        let active: Vec<_> = kernel.active_offsets(WHITE).collect();
        assert_eq!(active, vec![(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)]);

        let corners: Vec<_> = kernel.active_offsets(BLACK).collect();
        assert_eq!(corners, vec![(-1, -1), (1, -1), (-1, 1), (1, 1)]);

        let inverted: Vec<_> = kernel.inverted().active_offsets(BLACK).collect();
        assert_eq!(inverted, active);
    }
}
