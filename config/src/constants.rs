//! # Configuration Constants
//!
//! Centralized constants for the CSG pipeline. Document defaults, printer
//! layout, bounding-volume extents and recursion limits are defined here.
//!
//! ## Categories
//!
//! - **Document**: Version defaults and structural rules of the CSG format
//! - **Printer**: Layout of serialized CSG text
//! - **Geometry**: Canonical primitive extents and material defaults
//! - **Limits**: Recursion and fixpoint iteration bounds
//! - **Files**: Extensions understood by the converter

use std::fmt;

// =============================================================================
// DOCUMENT CONSTANTS
// =============================================================================

/// Version name recorded in a file document without a version directive.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_VERSION_NAME;
///
/// let directive: Option<&str> = None;
/// assert_eq!(directive.unwrap_or(DEFAULT_VERSION_NAME), "undefined");
/// ```
pub const DEFAULT_VERSION_NAME: &str = "undefined";

/// Major version recorded in a file document without a version directive.
pub const DEFAULT_VERSION_MAJOR: u32 = 0;

/// Minor version recorded in a file document without a version directive.
pub const DEFAULT_VERSION_MINOR: u32 = 0;

/// Minimum number of children a binary boolean instruction must carry
/// (`union`, `difference`, `intersection`, `smin`) to be serialized.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_BINARY_OPERANDS;
///
/// let children = 1;
/// assert!(children < MIN_BINARY_OPERANDS);
/// ```
pub const MIN_BINARY_OPERANDS: usize = 2;

// =============================================================================
// PRINTER CONSTANTS
// =============================================================================

/// Number of spaces added per nesting level in serialized CSG text.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_INDENT_WIDTH;
///
/// let indent = " ".repeat(DEFAULT_INDENT_WIDTH * 2);
/// assert_eq!(indent.len(), 4);
/// ```
pub const DEFAULT_INDENT_WIDTH: usize = 2;

// =============================================================================
// GEOMETRY CONSTANTS
// =============================================================================

/// Half extent of the canonical primitive cube `[-1, 1]³`.
///
/// Every primitive is defined in object space inside this cube; its scene
/// bound is the image of the cube corners under the primitive transform.
pub const UNIT_HALF_EXTENT: f64 = 1.0;

/// Coordinate magnitude used for the bounds of complemented primitives.
///
/// Matches the largest single-precision float so the surface-area metric of
/// such a box stays finite in double precision.
///
/// # Example
///
/// ```rust
/// use config::constants::UNBOUNDED_EXTENT;
///
/// let side = 2.0 * UNBOUNDED_EXTENT;
/// assert!((side * side * 3.0).is_finite());
/// ```
pub const UNBOUNDED_EXTENT: f64 = f32::MAX as f64;

/// Radius used for spheres whose `r` property is missing or not positive.
pub const DEFAULT_SPHERE_RADIUS: f64 = 1.0;

/// Default material color (opaque white), RGBA in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Upper bound on clip/grow alternations when tightening tree bounds.
///
/// Each pass only shrinks bounds, so the loop reaches a fixpoint.
pub const DEFAULT_MAX_TIGHTENING_PASSES: usize = 64;

/// Remaining stack (in bytes) below which recursive passes grow the stack.
///
/// The `stacker` crate is used to handle deeply nested documents safely.
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Size (in bytes) of each stack segment allocated by `stacker`.
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

// =============================================================================
// FILE CONSTANTS
// =============================================================================

/// Extension of CSG text files.
pub const CSG_EXTENSION: &str = "csg";

/// Extension of structured-document (JSON) files.
pub const CSGJS_EXTENSION: &str = "csgjs";

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of settings shared between the printer and the tree
/// engine.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.max_tightening_passes > 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Spaces per nesting level in serialized CSG text.
    pub indent_width: usize,
    /// Maximum clip/grow alternations when tightening bounds.
    pub max_tightening_passes: usize,
}

impl GlobalConfig {
    /// Builds a configuration, rejecting zero-valued settings.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(4, 16).expect("valid config");
    /// assert_eq!(cfg.indent_width, 4);
    /// ```
    pub fn new(indent_width: usize, max_tightening_passes: usize) -> Result<Self, ConfigError> {
        if indent_width == 0 {
            return Err(ConfigError::InvalidIndentWidth(indent_width));
        }
        if max_tightening_passes == 0 {
            return Err(ConfigError::InvalidPassLimit(max_tightening_passes));
        }
        Ok(Self {
            indent_width,
            max_tightening_passes,
        })
    }

    /// Indentation string for the given nesting depth.
    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width * depth)
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            max_tightening_passes: DEFAULT_MAX_TIGHTENING_PASSES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the indentation width is zero.
    InvalidIndentWidth(usize),
    /// Raised when the tightening pass limit is zero.
    InvalidPassLimit(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidIndentWidth(value) => {
                write!(f, "indent_width must be positive: {value}")
            }
            ConfigError::InvalidPassLimit(value) => {
                write!(f, "max_tightening_passes must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
