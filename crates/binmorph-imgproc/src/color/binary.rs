use binmorph_image::{BinaryImage, Gray8Image, Image, ImageError};

/// Grayscale value written for foreground pixels.
const GRAY8_FOREGROUND: u8 = 255;

fn check_same_size<T1, T2>(src: &Image<T1>, dst: &Image<T2>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }
    Ok(())
}

/// Convert a binary image to 8-bit grayscale.
///
/// `true` pixels map to 255 and `false` pixels to 0.
///
/// # Arguments
///
/// * `src` - The input binary image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use binmorph_image::{BinaryImage, Gray8Image};
/// use binmorph_imgproc::color::gray8_from_binary;
///
/// let image = BinaryImage::new([2, 1].into(), vec![true, false]).unwrap();
/// let mut gray = Gray8Image::from_size_val(image.size(), 0).unwrap();
///
/// gray8_from_binary(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[255, 0]);
/// ```
pub fn gray8_from_binary(src: &BinaryImage, dst: &mut Gray8Image) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    src.as_slice()
        .iter()
        .zip(dst.as_slice_mut())
        .for_each(|(&src_pixel, dst_pixel)| {
            *dst_pixel = if src_pixel { GRAY8_FOREGROUND } else { 0 };
        });

    Ok(())
}

/// Convert an 8-bit grayscale image to binary.
///
/// Any nonzero pixel maps to `true`, zero maps to `false`.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output binary image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use binmorph_image::{BinaryImage, Gray8Image, BLACK};
/// use binmorph_imgproc::color::binary_from_gray8;
///
/// let gray = Gray8Image::new([3, 1].into(), vec![0, 1, 200]).unwrap();
/// let mut image = BinaryImage::from_size_val(gray.size(), BLACK).unwrap();
///
/// binary_from_gray8(&gray, &mut image).unwrap();
/// assert_eq!(image.as_slice(), &[false, true, true]);
/// ```
pub fn binary_from_gray8(src: &Gray8Image, dst: &mut BinaryImage) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    src.as_slice()
        .iter()
        .zip(dst.as_slice_mut())
        .for_each(|(&src_pixel, dst_pixel)| {
            *dst_pixel = src_pixel != 0;
        });

    Ok(())
}

/// Invert every pixel of a binary image.
pub fn binary_not(src: &BinaryImage, dst: &mut BinaryImage) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    src.as_slice()
        .iter()
        .zip(dst.as_slice_mut())
        .for_each(|(&src_pixel, dst_pixel)| {
            *dst_pixel = !src_pixel;
        });

    Ok(())
}
