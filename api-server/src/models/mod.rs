//! Request models

pub mod payload;

pub use payload::*;
