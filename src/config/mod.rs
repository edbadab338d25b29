//! Configuration module for Pin-Harvest
//!
//! Settings come from three layers: built-in defaults, an optional TOML file,
//! and command-line flags applied on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use pin_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlerConfig, OutputConfig, DEFAULT_BASE_URL, MIN_REQUESTS_PER_SECOND};

pub use parser::{load_config, parse_config};
pub use validation::validate;
