//! APIs for compiling and reading `.yep` asset pack files

pub mod codec;
pub mod compiling;
pub mod format;
pub mod reading;
