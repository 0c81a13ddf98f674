//! The closed set of things a classified error can wrap
//!
//! [`Failure`] is matched exhaustively by the traversal code. Foreign values
//! enter through [`Failure::foreign`] or the `From` impls below; a foreign
//! value that turns out to be one of ours is routed to its typed variant.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::fault::Fault;

/// Either a classified error or a foreign one.
#[derive(Debug, Clone)]
pub enum Failure {
    /// Built by this crate and carrying a category
    Classified(Error),
    /// Anything unclassified
    Foreign(Foreign),
}

/// Unclassified failures.
#[derive(Debug, Clone)]
pub enum Foreign {
    /// Foundation failure carrying an origin trace
    Fault(Fault),
    /// Error produced outside this crate
    Opaque(Opaque),
}

/// Shared handle to an error produced outside this crate.
#[derive(Clone)]
pub struct Opaque(Arc<dyn StdError + Send + Sync + 'static>);

impl Opaque {
    /// Take ownership of a foreign error.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Take ownership of an already boxed foreign error.
    #[must_use]
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self(Arc::from(error))
    }

    /// The wrapped error
    #[must_use]
    pub fn get(&self) -> &(dyn StdError + 'static) {
        &*self.0
    }

    /// Borrow the wrapped error as a concrete type.
    #[must_use]
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.get().downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opaque").field(&self.0).finish()
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for Opaque {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl Failure {
    /// Accept any error value.
    ///
    /// Values that are really an [`Error`], [`Fault`], [`Opaque`] or
    /// [`Failure`] keep their typed form instead of becoming opaque.
    pub fn foreign<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(error))
    }

    /// Boxed variant of [`Failure::foreign`].
    #[must_use]
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        let error = match error.downcast::<Error>() {
            Ok(classified) => return Failure::Classified(*classified),
            Err(other) => other,
        };
        let error = match error.downcast::<Fault>() {
            Ok(fault) => return Failure::Foreign(Foreign::Fault(*fault)),
            Err(other) => other,
        };
        let error = match error.downcast::<Opaque>() {
            Ok(opaque) => return Failure::Foreign(Foreign::Opaque(*opaque)),
            Err(other) => other,
        };
        match error.downcast::<Failure>() {
            Ok(failure) => *failure,
            Err(other) => Failure::Foreign(Foreign::Opaque(Opaque::from_boxed(other))),
        }
    }

    /// The classified error, if this is one
    #[must_use]
    pub fn as_classified(&self) -> Option<&Error> {
        match self {
            Failure::Classified(error) => Some(error),
            Failure::Foreign(_) => None,
        }
    }

    /// Whether this failure carries a category of its own
    #[must_use]
    pub fn is_classified(&self) -> bool {
        matches!(self, Failure::Classified(_))
    }

    /// The underlying value as a standard error trait object.
    #[must_use]
    pub fn as_std_error(&self) -> &(dyn StdError + 'static) {
        match self {
            Failure::Classified(error) => error,
            Failure::Foreign(Foreign::Fault(fault)) => fault,
            Failure::Foreign(Foreign::Opaque(opaque)) => opaque.get(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_std_error(), f)
    }
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.as_std_error().source()
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Failure::Classified(error)
    }
}

impl From<Fault> for Failure {
    fn from(fault: Fault) -> Self {
        Failure::Foreign(Foreign::Fault(fault))
    }
}

impl From<Opaque> for Failure {
    fn from(opaque: Opaque) -> Self {
        Failure::Foreign(Foreign::Opaque(opaque))
    }
}

impl From<Foreign> for Failure {
    fn from(foreign: Foreign) -> Self {
        Failure::Foreign(foreign)
    }
}

impl From<std::io::Error> for Failure {
    fn from(error: std::io::Error) -> Self {
        Failure::foreign(error)
    }
}

impl From<std::fmt::Error> for Failure {
    fn from(error: std::fmt::Error) -> Self {
        Failure::foreign(error)
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for Failure {
    fn from(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Failure::from_boxed(error)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<Error>() {
            Ok(classified) => Failure::Classified(classified),
            Err(other) => Failure::from_boxed(other.into()),
        }
    }
}
