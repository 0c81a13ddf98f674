//! Error constructors and methods

use super::types::{Category, Error, ErrorInner};
use crate::failure::Failure;
use crate::fault::Fault;
use crate::inspect::{self, Chain};
use crate::origin::Origin;
use std::fmt;
use std::sync::Arc;

impl Category {
    /// Create an error of this category with an origin captured here
    #[allow(clippy::new_ret_no_self)]
    #[track_caller]
    #[must_use]
    pub fn new(self, message: impl fmt::Display) -> Error {
        Error::from_parts(self, Fault::new(message).into(), None)
    }

    /// Wrap `err` under this category, overriding whatever it carried
    #[track_caller]
    #[must_use]
    pub fn wrap(self, err: impl Into<Failure>, message: impl fmt::Display) -> Error {
        let err = err.into();
        let display_message = inherited_display_message(&err);
        Error::from_parts(self, Fault::wrap(err, message).into(), display_message)
    }
}

/// Create an [`Category::Internal`] error
#[track_caller]
#[must_use]
pub fn new(message: impl fmt::Display) -> Error {
    Category::Internal.new(message)
}

/// Wrap `err`, keeping its category if it has one.
///
/// A foreign `err` becomes [`Category::Internal`].
#[track_caller]
#[must_use]
pub fn wrap(err: impl Into<Failure>, message: impl fmt::Display) -> Error {
    let err = err.into();
    let code = match &err {
        Failure::Classified(classified) => classified.code(),
        Failure::Foreign(_) => Category::Internal,
    };
    let display_message = inherited_display_message(&err);
    Error::from_parts(code, Fault::wrap(err, message).into(), display_message)
}

/// Attach user-facing text to `err`.
///
/// The category is inherited from a classified `err`, otherwise
/// [`Category::Internal`]. `err` itself becomes the cause unchanged.
#[must_use]
pub fn with_display_message(err: impl Into<Failure>, message: impl Into<String>) -> Error {
    let err = err.into();
    let code = match &err {
        Failure::Classified(classified) => classified.code(),
        Failure::Foreign(_) => Category::Internal,
    };
    Error::from_parts(code, err, Some(message.into()))
}

fn inherited_display_message(err: &Failure) -> Option<String> {
    err.as_classified()
        .and_then(|classified| classified.inner.display_message.clone())
}

impl Error {
    pub(crate) fn from_parts(code: Category, cause: Failure, display_message: Option<String>) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                code,
                cause,
                display_message,
            }),
        }
    }

    /// Get the category
    #[must_use]
    pub fn code(&self) -> Category {
        self.inner.code
    }

    /// The explicit display message, or the category label when none was set
    #[must_use]
    pub fn display_message(&self) -> &str {
        self.inner
            .display_message
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or(self.inner.code.label())
    }

    /// Whether a non-empty display message was set explicitly
    #[must_use]
    pub fn has_display_message(&self) -> bool {
        self.inner
            .display_message
            .as_deref()
            .is_some_and(|message| !message.is_empty())
    }

    /// The failure this error directly wraps
    #[must_use]
    pub fn wrapped(&self) -> &Failure {
        &self.inner.cause
    }

    /// Wrap this error, keeping its category
    #[track_caller]
    #[must_use]
    pub fn wrap(self, message: impl fmt::Display) -> Error {
        wrap(self, message)
    }

    /// Replace the display message on a new outer error
    #[must_use]
    pub fn with_display_message(self, message: impl Into<String>) -> Error {
        with_display_message(self, message)
    }

    /// The irreducible root failure
    #[must_use]
    pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        inspect::cause(self)
    }

    /// Origin of the first foundation failure in the chain
    #[must_use]
    pub fn origin(&self) -> Option<&Origin> {
        inspect::origin(self)
    }

    /// Iterate every layer, outermost first
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// Whether this error is classified under `code`
    #[must_use]
    pub fn is(&self, code: Category) -> bool {
        self.inner.code == code
    }
}
