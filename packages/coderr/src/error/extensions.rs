//! Extension traits for classifying errors at `?` boundaries

use super::constructors::{with_display_message, wrap};
use super::types::{Category, Error, Result};
use crate::failure::Failure;
use std::fmt;

/// Adapters on `Result` for attaching context, categories and display text
pub trait ResultExt<T> {
    /// Wrap the error, keeping its category (or `Internal` if it had none)
    fn wrap_err<M: fmt::Display>(self, message: M) -> Result<T>;

    /// Wrap the error under `code`
    fn classify<M: fmt::Display>(self, code: Category, message: M) -> Result<T>;

    /// Wrap the error lazily; `message` only runs on failure
    fn wrap_err_with<M, F>(self, message: F) -> Result<T>
    where
        M: fmt::Display,
        F: FnOnce() -> M;

    /// Attach user-facing text to the error
    fn with_display_message<M: Into<String>>(self, message: M) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Failure>,
{
    #[track_caller]
    fn wrap_err<M: fmt::Display>(self, message: M) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(wrap(err, message)),
        }
    }

    #[track_caller]
    fn classify<M: fmt::Display>(self, code: Category, message: M) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(code.wrap(err, message)),
        }
    }

    #[track_caller]
    fn wrap_err_with<M, F>(self, message: F) -> Result<T>
    where
        M: fmt::Display,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(wrap(err, message())),
        }
    }

    fn with_display_message<M: Into<String>>(self, message: M) -> Result<T> {
        self.map_err(|err| with_display_message(err, message))
    }
}

/// Adapters on `Option` for turning absence into a classified error
pub trait OptionExt<T> {
    /// Fail with a new error of category `code` when `None`
    fn ok_or_code<M: fmt::Display>(self, code: Category, message: M) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    #[track_caller]
    fn ok_or_code<M: fmt::Display>(self, code: Category, message: M) -> Result<T> {
        match self {
            Some(value) => Ok(value),
            None => Err(code.new(message)),
        }
    }
}

/// I/O errors are classified by their kind so `?` keeps a useful category.
///
/// The conversion is a wrap, so the description reads
/// `"I/O error: <io text>"`. [`cause`](crate::cause) still returns the
/// original `io::Error`.
impl From<std::io::Error> for Error {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => Category::NotFound,
            std::io::ErrorKind::PermissionDenied => Category::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => Category::AlreadyExists,
            std::io::ErrorKind::InvalidInput => Category::InvalidArgument,
            std::io::ErrorKind::TimedOut => Category::Timeout,
            _ => Category::Internal,
        };
        code.wrap(err, "I/O error")
    }
}
