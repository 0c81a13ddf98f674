//! Foundation failure: a message, an origin, and optionally what it wraps

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::config;
use crate::failure::{Failure, Foreign};
use crate::origin::Origin;

/// Unclassified failure carrying the origin trace.
///
/// A `Fault` either stands alone (a root created from a message) or wraps
/// another failure. Its text is `"<message>: <wrapped text>"` when it wraps.
#[derive(Clone)]
pub struct Fault {
    inner: Arc<FaultInner>,
}

struct FaultInner {
    message: String,
    cause: Option<Failure>,
    origin: Origin,
}

impl Fault {
    /// Root fault with an origin captured at the caller.
    #[track_caller]
    #[must_use]
    pub fn new(message: impl fmt::Display) -> Self {
        let origin = config::capture(Location::caller());
        Self::with_origin(message, None, origin)
    }

    /// Fault wrapping `cause`, with a fresh origin captured at the caller.
    ///
    /// The wrapped failure keeps its own origin; nothing inside it changes.
    #[track_caller]
    #[must_use]
    pub fn wrap(cause: impl Into<Failure>, message: impl fmt::Display) -> Self {
        let origin = config::capture(Location::caller());
        Self::with_origin(message, Some(cause.into()), origin)
    }

    /// Fault with an explicitly supplied origin.
    ///
    /// Useful when the trace comes from a capture strategy other than the
    /// installed one.
    #[must_use]
    pub fn with_origin(message: impl fmt::Display, cause: Option<Failure>, origin: Origin) -> Self {
        Self {
            inner: Arc::new(FaultInner {
                message: message.to_string(),
                cause,
                origin,
            }),
        }
    }

    /// This layer's own message, without the wrapped text
    #[must_use]
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// The wrapped failure, if any
    #[must_use]
    pub fn cause(&self) -> Option<&Failure> {
        self.inner.cause.as_ref()
    }

    /// Where this fault was created
    #[must_use]
    pub fn origin(&self) -> &Origin {
        &self.inner.origin
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.message)?;
        // iterative: wrap depth is unbounded
        let mut next = self.inner.cause.as_ref();
        while let Some(mut failure) = next {
            while let Failure::Classified(error) = failure {
                failure = error.wrapped();
            }
            f.write_str(": ")?;
            next = match failure {
                Failure::Foreign(Foreign::Fault(fault)) => {
                    f.write_str(fault.message())?;
                    fault.cause()
                }
                opaque => {
                    fmt::Display::fmt(opaque, f)?;
                    None
                }
            };
        }
        Ok(())
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("message", &self.inner.message)
            .field("origin", &self.inner.origin.caller().map(ToString::to_string))
            .field("cause", &self.inner.cause)
            .finish()
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.cause.as_ref().map(Failure::as_std_error)
    }
}
