//! Classified errors for application code
//!
//! Attach a machine-readable [`Category`], a user-safe display message and
//! an origin trace to any failure, and keep the original cause reachable
//! through any number of wrapping layers:
//!
//! ```
//! use coderr::Category;
//!
//! let err = Category::NotFound.new("row missing");
//! let wrapped = coderr::wrap(err, "lookup failed");
//!
//! assert_eq!(coderr::code(&wrapped), Category::NotFound);
//! assert_eq!(coderr::display_message(&wrapped), "Not Found");
//! assert_eq!(wrapped.to_string(), "lookup failed: row missing");
//! assert_eq!(coderr::cause(&wrapped).to_string(), "row missing");
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod failure;
pub mod fault;
pub mod inspect;
pub mod origin;

pub use error::*;
pub use failure::{Failure, Foreign, Opaque};
pub use fault::Fault;
pub use inspect::{cause, chain, code, display_message, origin, root_origin, Chain, Layer, MAX_CHAIN_DEPTH};
#[cfg(feature = "full-backtrace")]
pub use origin::FullBacktrace;
pub use origin::{CallSite, Disabled, Frame, Origin, OriginCapture};
