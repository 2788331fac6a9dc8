//! # Config Crate
//!
//! Centralized configuration constants for the CSG conversion pipeline.
//! Every literal the parser, printer and tree engine depend on is defined
//! here so the crates agree on defaults.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{GlobalConfig, DEFAULT_VERSION_NAME, MIN_BINARY_OPERANDS};
//!
//! assert_eq!(DEFAULT_VERSION_NAME, "undefined");
//! assert_eq!(MIN_BINARY_OPERANDS, 2);
//!
//! let config = GlobalConfig::default();
//! assert_eq!(config.indent_width, 2);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Format Compatible**: Defaults match the CSG text format
//! - **Validated Snapshots**: `GlobalConfig` rejects nonsensical values

pub mod constants;
