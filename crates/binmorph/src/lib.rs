#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Re-exports the image containers and the operators under one roof.
//!
//! ```rust
//! use binmorph::image::{BinaryImage, BLACK, WHITE};
//! use binmorph::imgproc::morphology::{open, Kernel};
//!
//! let mut src = BinaryImage::from_size_val([8, 8].into(), BLACK).unwrap();
//! src.set_pixel(0, 0, WHITE).unwrap();
//!
//! let mut dst = BinaryImage::from_size_val(src.size(), BLACK).unwrap();
//! open(&src, &mut dst, &Kernel::rect_3x3(), BLACK).unwrap();
//! assert_eq!(dst.count(WHITE), 0);
//! ```

#[doc(inline)]
pub use binmorph_image as image;

#[doc(inline)]
pub use binmorph_imgproc as imgproc;
