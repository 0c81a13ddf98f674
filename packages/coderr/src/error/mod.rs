//! Classified errors
//!
//! Provides the error value and everything used to build and propagate it:
//! - Category tags with canonical labels
//! - Category-bound and free constructors that capture an origin
//! - Formatting macros and `?`-friendly extension traits
//! - Logging integration

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;

// Re-export all public types and traits
pub use constructors::{new, with_display_message, wrap};
pub use extensions::{OptionExt, ResultExt};
pub use types::{Category, Error, ParseCategoryError, Result};
