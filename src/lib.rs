// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod specs;

pub mod assemble;
pub mod csv;
pub mod expand;
pub mod file;
pub mod identity;
pub mod progress;
pub mod scrape;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::ScrapeError;
pub use scrape::{scrape_episode, scrape_html, ScrapeOutput};

#[doc(hidden)]
pub use tracing as __tracing;
