//! Display and trait implementations for Error

use super::types::Error;
use crate::failure::Failure;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the description is the wrapped failure's text; the category and
        // display message are reported separately
        let mut cause = &self.inner.cause;
        while let Failure::Classified(error) = cause {
            cause = error.wrapped();
        }
        fmt::Display::fmt(cause, f)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &self.inner.code)
            .field("display_message", &self.inner.display_message)
            .field("cause", &self.inner.cause)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.inner.cause)
    }
}
