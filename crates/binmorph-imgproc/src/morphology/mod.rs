mod error;
pub use error::MorphologyError;

mod kernels;
pub use kernels::{
    Kernel, KernelShape, CIRCLE_5X5, CIRCLE_5X5_SIZE, CROSS_3X3, CROSS_3X3_SIZE, RECT_3X3,
    RECT_3X3_SIZE,
};

mod ops;
pub use ops::{close, close_with_allocator, dilate, erode, open, open_with_allocator};
