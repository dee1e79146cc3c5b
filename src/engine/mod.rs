//! Image engine
//!
//! Prepares artwork for upload: minimum-size validation, bounded
//! downsampling and JPEG re-encoding.

mod preparer;

pub use preparer::{ImagePreparer, PreparedImage, PrepareError};
