use binmorph_image::{
    Binary, BinaryImage, CpuAllocator, ImageAllocator, ImageError, ImageSize,
};

use super::{Kernel, MorphologyError};

/// Read a source pixel, substituting `background` outside the image.
#[inline]
fn pixel_or_background(
    src: &[Binary],
    size: ImageSize,
    x: isize,
    y: isize,
    background: Binary,
) -> Binary {
    if x < 0 || y < 0 || x >= size.width as isize || y >= size.height as isize {
        return background;
    }
    src[y as usize * size.width + x as usize]
}

fn check_same_size(src: &BinaryImage, dst: &BinaryImage) -> Result<(), MorphologyError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            src.width(),
            src.height(),
        )
        .into());
    }
    Ok(())
}

/// Visit every destination pixel with its coordinates.
fn for_each_pixel(dst: &mut BinaryImage, mut f: impl FnMut(isize, isize) -> Binary) {
    let width = dst.width();
    if width == 0 {
        return;
    }
    for (y, row) in dst.as_slice_mut().chunks_exact_mut(width).enumerate() {
        for (x, out) in row.iter_mut().enumerate() {
            *out = f(x as isize, y as isize);
        }
    }
}

/// Erode a binary image using a [`Kernel`].
///
/// A destination pixel becomes foreground (the complement of `background`)
/// only if every active kernel cell lands on a foreground source pixel.
/// Pixels outside the source read as `background`, so a kernel reaching past
/// the border erodes that pixel.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The structuring element. Cells equal to the foreground are active.
/// * `background` - The background value, also used for out-of-bounds pixels.
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError::Image`] if the image sizes differ.
///
/// # Example
///
/// ```rust
/// use binmorph_image::{BinaryImage, BLACK, WHITE};
/// use binmorph_imgproc::morphology::{erode, Kernel};
///
/// let src = BinaryImage::new([3, 3].into(), vec![WHITE; 9]).unwrap();
/// let mut dst = BinaryImage::from_size_val(src.size(), BLACK).unwrap();
///
/// erode(&src, &mut dst, &Kernel::cross_3x3(), BLACK).unwrap();
/// assert_eq!(dst.to_ascii(WHITE), "...\n.#.\n...\n");
/// ```
pub fn erode(
    src: &BinaryImage,
    dst: &mut BinaryImage,
    kernel: &Kernel,
    background: Binary,
) -> Result<(), MorphologyError> {
    check_same_size(src, dst)?;

    let foreground = !background;
    let size = src.size();
    let src_data = src.as_slice();

    for_each_pixel(dst, |x, y| {
        let fits = kernel.active_offsets(foreground).all(|(dx, dy)| {
            pixel_or_background(src_data, size, x + dx, y + dy, background) == foreground
        });
        if fits {
            foreground
        } else {
            background
        }
    });

    Ok(())
}

/// Dilate a binary image using a [`Kernel`].
///
/// A destination pixel becomes foreground if at least one active kernel cell
/// lands on a foreground source pixel. Pixels outside the source read as
/// `background` and never contribute.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The structuring element. Cells equal to the foreground are active.
/// * `background` - The background value, also used for out-of-bounds pixels.
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError::Image`] if the image sizes differ.
///
/// # Example
///
/// ```rust
/// use binmorph_image::{BinaryImage, BLACK, WHITE};
/// use binmorph_imgproc::morphology::{dilate, Kernel};
///
/// let mut src = BinaryImage::from_size_val([3, 3].into(), BLACK).unwrap();
/// src.set_pixel(1, 1, WHITE).unwrap();
/// let mut dst = BinaryImage::from_size_val(src.size(), BLACK).unwrap();
///
/// dilate(&src, &mut dst, &Kernel::rect_3x3(), BLACK).unwrap();
/// assert_eq!(dst.count(WHITE), 9);
/// ```
pub fn dilate(
    src: &BinaryImage,
    dst: &mut BinaryImage,
    kernel: &Kernel,
    background: Binary,
) -> Result<(), MorphologyError> {
    check_same_size(src, dst)?;

    let foreground = !background;
    let size = src.size();
    let src_data = src.as_slice();

    for_each_pixel(dst, |x, y| {
        let hit = kernel.active_offsets(foreground).any(|(dx, dy)| {
            pixel_or_background(src_data, size, x + dx, y + dy, background) == foreground
        });
        if hit {
            foreground
        } else {
            background
        }
    });

    Ok(())
}

/// Acquire the intermediate image of a composite operation.
fn scratch_image<A: ImageAllocator>(
    size: ImageSize,
    background: Binary,
    allocator: &A,
) -> Result<BinaryImage, MorphologyError> {
    log::debug!("acquiring scratch image of {}", size);
    BinaryImage::from_size_val_in(size, background, allocator).map_err(|err| {
        log::warn!("scratch image of {} unavailable: {}", size, err);
        match err {
            ImageError::Allocation(err) => MorphologyError::OutOfMemory(err),
            err => MorphologyError::Image(err),
        }
    })
}

/// Opening: erosion followed by dilation.
///
/// Removes foreground specks smaller than the kernel while keeping larger
/// regions. Uses the [`CpuAllocator`] for the intermediate image; see
/// [`open_with_allocator`].
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The structuring element, used for both passes.
/// * `background` - The background value, used for both passes.
///
/// # Returns
///
/// Ok(()) on success. On error `dst` is left untouched.
pub fn open(
    src: &BinaryImage,
    dst: &mut BinaryImage,
    kernel: &Kernel,
    background: Binary,
) -> Result<(), MorphologyError> {
    open_with_allocator(src, dst, kernel, background, &CpuAllocator)
}

/// Opening with the intermediate image taken from `allocator`.
///
/// # Errors
///
/// Returns [`MorphologyError::OutOfMemory`] without writing to `dst` if the
/// scratch image cannot be acquired.
pub fn open_with_allocator<A: ImageAllocator>(
    src: &BinaryImage,
    dst: &mut BinaryImage,
    kernel: &Kernel,
    background: Binary,
    allocator: &A,
) -> Result<(), MorphologyError> {
    check_same_size(src, dst)?;
    let mut scratch = scratch_image(src.size(), background, allocator)?;
    erode(src, &mut scratch, kernel, background)?;
    dilate(&scratch, dst, kernel, background)
}

/// Closing: dilation followed by erosion.
///
/// Fills background holes smaller than the kernel while keeping larger
/// regions. Uses the [`CpuAllocator`] for the intermediate image; see
/// [`close_with_allocator`].
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The structuring element, used for both passes.
/// * `background` - The background value, used for both passes.
///
/// # Returns
///
/// Ok(()) on success. On error `dst` is left untouched.
pub fn close(
    src: &BinaryImage,
    dst: &mut BinaryImage,
    kernel: &Kernel,
    background: Binary,
) -> Result<(), MorphologyError> {
    close_with_allocator(src, dst, kernel, background, &CpuAllocator)
}

/// Closing with the intermediate image taken from `allocator`.
///
/// # Errors
///
/// Returns [`MorphologyError::OutOfMemory`] without writing to `dst` if the
/// scratch image cannot be acquired.
pub fn close_with_allocator<A: ImageAllocator>(
    src: &BinaryImage,
    dst: &mut BinaryImage,
    kernel: &Kernel,
    background: Binary,
    allocator: &A,
) -> Result<(), MorphologyError> {
    check_same_size(src, dst)?;
    let mut scratch = scratch_image(src.size(), background, allocator)?;
    dilate(src, &mut scratch, kernel, background)?;
    erode(&scratch, dst, kernel, background)
}

#[cfg(test)]
mod tests {
    use super::*;
    use binmorph_image::{ImageAllocatorError, BLACK, WHITE};

    #[derive(Clone)]
    struct NoMemory;

    impl ImageAllocator for NoMemory {
        fn alloc_buffer<T: Clone>(
            &self,
            len: usize,
            _val: T,
        ) -> Result<Vec<T>, ImageAllocatorError> {
            Err(ImageAllocatorError::OutOfMemory { len })
        }
    }

    fn image(width: usize, height: usize, rows: &[&str]) -> Result<BinaryImage, ImageError> {
        let data = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| c == '#'))
            .collect();
        BinaryImage::new([width, height].into(), data)
    }

    #[test]
    fn test_erode_single_pixel() -> Result<(), MorphologyError> {
        let src = image(3, 3, &["...", ".#.", "..."])?;
        let mut dst = BinaryImage::from_size_val(src.size(), WHITE)?;
        erode(&src, &mut dst, &Kernel::rect_3x3(), BLACK)?;
        assert_eq!(dst.count(WHITE), 0);
        Ok(())
    }

    #[test]
    fn test_dilate_single_pixel() -> Result<(), MorphologyError> {
        let src = image(3, 3, &["...", ".#.", "..."])?;
        let mut dst = BinaryImage::from_size_val(src.size(), BLACK)?;
        dilate(&src, &mut dst, &Kernel::rect_3x3(), BLACK)?;
        assert_eq!(dst.count(WHITE), 9);
        Ok(())
    }

    #[test]
    fn test_erode_cross() -> Result<(), MorphologyError> {
        let src = image(5, 5, &[".....", ".###.", ".###.", ".###.", "....."])?;
        let mut dst = BinaryImage::from_size_val(src.size(), BLACK)?;
        erode(&src, &mut dst, &Kernel::cross_3x3(), BLACK)?;
        assert_eq!(dst, image(5, 5, &[".....", ".....", "..#..", ".....", "....."])?);
        Ok(())
    }

    #[test]
    fn test_dilate_cross() -> Result<(), MorphologyError> {
        let src = image(5, 5, &[".....", ".....", "..#..", ".....", "....."])?;
        let mut dst = BinaryImage::from_size_val(src.size(), BLACK)?;
        dilate(&src, &mut dst, &Kernel::cross_3x3(), BLACK)?;
        assert_eq!(dst, image(5, 5, &[".....", "..#..", ".###.", "..#..", "....."])?);
        Ok(())
    }

    #[test]
    fn test_erode_border_is_background() -> Result<(), MorphologyError> {
        let src = BinaryImage::from_size_val([4, 3].into(), WHITE)?;
        let mut dst = BinaryImage::from_size_val(src.size(), BLACK)?;
        erode(&src, &mut dst, &Kernel::rect_3x3(), BLACK)?;
        assert_eq!(dst.to_ascii(WHITE), "....\n.##.\n....\n");
        Ok(())
    }

    #[test]
    fn test_white_background() -> Result<(), MorphologyError> {
        // dark blob on a white page
        let src = image(5, 5, &["#####", "#...#", "#...#", "#...#", "#####"])?;
        let mut dst = BinaryImage::from_size_val(src.size(), BLACK)?;
        erode(&src, &mut dst, &Kernel::cross_3x3().inverted(), WHITE)?;
        assert_eq!(dst, image(5, 5, &["#####", "#####", "##.##", "#####", "#####"])?);
        Ok(())
    }

    #[test]
    fn test_inactive_kernel() -> Result<(), MorphologyError> {
        let src = image(3, 2, &["#.#", ".#."])?;
        let kernel = Kernel::from_slice(&[BLACK; 9], 3, 3)?;
        let mut dst = BinaryImage::from_size_val(src.size(), BLACK)?;

        erode(&src, &mut dst, &kernel, BLACK)?;
        assert_eq!(dst.count(WHITE), 6);

        dilate(&src, &mut dst, &kernel, BLACK)?;
        assert_eq!(dst.count(WHITE), 0);
        Ok(())
    }

    #[test]
    fn test_even_kernel_origin() -> Result<(), MorphologyError> {
        // origin at (1, 0): the active cell to its left looks one pixel left
        let kernel = Kernel::from_slice(&[WHITE, BLACK], 2, 1)?;
        let src = image(4, 1, &[".#.."])?;
        let mut dst = BinaryImage::from_size_val(src.size(), BLACK)?;
        dilate(&src, &mut dst, &kernel, BLACK)?;
        assert_eq!(dst, image(4, 1, &["..#."])?);
        Ok(())
    }

    #[test]
    fn test_size_mismatch() -> Result<(), MorphologyError> {
        let src = BinaryImage::from_size_val([3, 3].into(), WHITE)?;
        let mut dst = BinaryImage::from_size_val([3, 2].into(), BLACK)?;
        let err = erode(&src, &mut dst, &Kernel::rect_3x3(), BLACK);
        assert_eq!(
            err,
            Err(MorphologyError::Image(ImageError::InvalidImageSize(
                3, 2, 3, 3
            )))
        );
        assert!(close(&src, &mut dst, &Kernel::rect_3x3(), BLACK).is_err());
        assert_eq!(dst.count(WHITE), 0);
        Ok(())
    }

    #[test]
    fn test_empty_image() -> Result<(), MorphologyError> {
        let src = BinaryImage::new([0, 4].into(), vec![])?;
        let mut dst = src.clone();
        erode(&src, &mut dst, &Kernel::rect_3x3(), BLACK)?;
        open(&src, &mut dst, &Kernel::rect_3x3(), BLACK)?;
        assert!(dst.as_slice().is_empty());
        Ok(())
    }

    #[test]
    fn test_open_removes_speck() -> Result<(), MorphologyError> {
        let src = image(
            6,
            6,
            &["#.....", "......", "..###.", "..###.", "..###.", "......"],
        )?;
        let mut dst = BinaryImage::from_size_val(src.size(), BLACK)?;
        open(&src, &mut dst, &Kernel::rect_3x3(), BLACK)?;
        assert_eq!(
            dst,
            image(
                6,
                6,
                &["......", "......", "..###.", "..###.", "..###.", "......"],
            )?
        );
        Ok(())
    }

    #[test]
    fn test_close_fills_hole() -> Result<(), MorphologyError> {
        let src = image(
            7,
            7,
            &[
                ".......", ".#####.", ".#####.", ".##.##.", ".#####.", ".#####.", ".......",
            ],
        )?;
        let mut dst = BinaryImage::from_size_val(src.size(), BLACK)?;
        close(&src, &mut dst, &Kernel::rect_3x3(), BLACK)?;
        assert_eq!(
            dst,
            image(
                7,
                7,
                &[
                    ".......", ".#####.", ".#####.", ".#####.", ".#####.", ".#####.", ".......",
                ],
            )?
        );
        Ok(())
    }

    #[test]
    fn test_open_close_out_of_memory() -> Result<(), MorphologyError> {
        let src = image(3, 3, &["###", "#.#", "###"])?;
        let mut dst = BinaryImage::from_size_val(src.size(), WHITE)?;
        let expected = dst.clone();

        let err = open_with_allocator(&src, &mut dst, &Kernel::rect_3x3(), BLACK, &NoMemory);
        assert_eq!(
            err,
            Err(MorphologyError::OutOfMemory(
                ImageAllocatorError::OutOfMemory { len: 9 }
            ))
        );
        assert_eq!(dst, expected);

        let err = close_with_allocator(&src, &mut dst, &Kernel::rect_3x3(), BLACK, &NoMemory);
        assert!(matches!(err, Err(MorphologyError::OutOfMemory(_))));
        assert_eq!(dst, expected);
        Ok(())
    }
}
