mod binary;
pub use binary::{binary_from_gray8, binary_not, gray8_from_binary};
