// src/core/mod.rs

pub mod dom;
pub mod sanitize;
#[cfg(feature = "cli")]
pub mod net;

pub use dom::{Document, Element};
