//! Utility modules shared by the conversion pipeline.

pub mod minify;
pub mod slug;
