//! Core error types and definitions

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::failure::Failure;

/// Classified error value.
///
/// Immutable once built. Cloning shares the same inner value, so an `Error`
/// can be handed to any number of readers without copying its chain.
#[derive(Clone)]
pub struct Error {
    pub(crate) inner: Arc<ErrorInner>,
}

pub(crate) struct ErrorInner {
    /// The category this error is classified under
    pub code: Category,
    /// What actually failed
    pub cause: Failure,
    /// Explicit user-facing text, if any
    pub display_message: Option<String>,
}

/// Kinds of failure a caller can branch on.
///
/// `Display` prints the canonical label, which doubles as the default
/// user-facing message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum Category {
    /// Unclassified or unexpected failure
    #[default]
    #[error("Internal Error")]
    #[serde(rename = "Internal Error")]
    Internal,

    /// The requested entity does not exist
    #[error("Not Found")]
    #[serde(rename = "Not Found")]
    NotFound,

    /// The caller supplied something unusable
    #[error("Invalid Argument")]
    #[serde(rename = "Invalid Argument")]
    InvalidArgument,

    /// No valid credentials were presented
    #[error("Unauthenticated")]
    #[serde(rename = "Unauthenticated")]
    Unauthenticated,

    /// Credentials were valid but not sufficient
    #[error("Permission Denied")]
    #[serde(rename = "Permission Denied")]
    PermissionDenied,

    /// The failure could not be classified
    #[error("Unknown")]
    #[serde(rename = "Unknown")]
    Unknown,

    /// The entity being created already exists
    #[error("Already Exists")]
    #[serde(rename = "Already Exists")]
    AlreadyExists,

    /// A quota or other finite resource ran out
    #[error("Resource Exhausted")]
    #[serde(rename = "Resource Exhausted")]
    ResourceExhausted,

    /// The operation did not finish in time
    #[error("Timeout")]
    #[serde(rename = "Timeout")]
    Timeout,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 9] = [
        Category::Internal,
        Category::NotFound,
        Category::InvalidArgument,
        Category::Unauthenticated,
        Category::PermissionDenied,
        Category::Unknown,
        Category::AlreadyExists,
        Category::ResourceExhausted,
        Category::Timeout,
    ];

    /// Canonical human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Internal => "Internal Error",
            Category::NotFound => "Not Found",
            Category::InvalidArgument => "Invalid Argument",
            Category::Unauthenticated => "Unauthenticated",
            Category::PermissionDenied => "Permission Denied",
            Category::Unknown => "Unknown",
            Category::AlreadyExists => "Already Exists",
            Category::ResourceExhausted => "Resource Exhausted",
            Category::Timeout => "Timeout",
        }
    }

    fn variant_name(self) -> &'static str {
        match self {
            Category::Internal => "Internal",
            Category::NotFound => "NotFound",
            Category::InvalidArgument => "InvalidArgument",
            Category::Unauthenticated => "Unauthenticated",
            Category::PermissionDenied => "PermissionDenied",
            Category::Unknown => "Unknown",
            Category::AlreadyExists => "AlreadyExists",
            Category::ResourceExhausted => "ResourceExhausted",
            Category::Timeout => "Timeout",
        }
    }
}

/// A string did not name any [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts either the label ("Not Found") or the variant name
    /// ("NotFound"), ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(needle)
                    || c.variant_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
