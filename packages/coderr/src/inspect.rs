//! Read-only walks over a failure chain
//!
//! Every function here accepts anything convertible into a [`Layer`]:
//! `&Error`, `&Failure`, `&Fault`, `&Opaque`, or a plain
//! `&(dyn std::error::Error + 'static)` for errors this crate never saw.

use std::error::Error as StdError;

use crate::error::{Category, Error};
use crate::failure::{Failure, Foreign, Opaque};
use crate::fault::Fault;
use crate::origin::Origin;

/// Longest run of consecutive opaque `source()` hops a walk will follow.
///
/// Values built by this crate cannot form cycles and are walked to any
/// depth. An opaque error's `source()` is arbitrary code, so only runs of
/// opaque layers are cut short.
pub const MAX_CHAIN_DEPTH: usize = 1024;

/// One link of a failure chain.
#[derive(Debug, Clone, Copy)]
pub enum Layer<'a> {
    /// A classified error
    Classified(&'a Error),
    /// A foundation failure
    Fault(&'a Fault),
    /// An error this crate does not know the type of
    Opaque(&'a (dyn StdError + 'static)),
}

impl<'a> Layer<'a> {
    /// Classify an arbitrary error, recovering our own types by downcast.
    #[must_use]
    pub fn from_dyn(error: &'a (dyn StdError + 'static)) -> Self {
        if let Some(classified) = error.downcast_ref::<Error>() {
            Layer::Classified(classified)
        } else if let Some(fault) = error.downcast_ref::<Fault>() {
            Layer::Fault(fault)
        } else if let Some(opaque) = error.downcast_ref::<Opaque>() {
            Layer::from_dyn(opaque.get())
        } else if let Some(failure) = error.downcast_ref::<Failure>() {
            Layer::from(failure)
        } else {
            Layer::Opaque(error)
        }
    }

    /// This layer as a standard error trait object.
    #[must_use]
    pub fn as_std_error(self) -> &'a (dyn StdError + 'static) {
        match self {
            Layer::Classified(error) => error,
            Layer::Fault(fault) => fault,
            Layer::Opaque(error) => error,
        }
    }

    /// The next layer down, if any.
    fn next(self) -> Option<Layer<'a>> {
        match self {
            Layer::Classified(error) => Some(Layer::from(error.wrapped())),
            Layer::Fault(fault) => fault.cause().map(Layer::from),
            Layer::Opaque(error) => error
                .source()
                .filter(|source| !same_object(*source, error))
                .map(Layer::from_dyn),
        }
    }
}

impl<'a> From<&'a Error> for Layer<'a> {
    fn from(error: &'a Error) -> Self {
        Layer::Classified(error)
    }
}

impl<'a> From<&'a Fault> for Layer<'a> {
    fn from(fault: &'a Fault) -> Self {
        Layer::Fault(fault)
    }
}

impl<'a> From<&'a Opaque> for Layer<'a> {
    fn from(opaque: &'a Opaque) -> Self {
        Layer::from_dyn(opaque.get())
    }
}

impl<'a> From<&'a Failure> for Layer<'a> {
    fn from(failure: &'a Failure) -> Self {
        match failure {
            Failure::Classified(error) => Layer::Classified(error),
            Failure::Foreign(Foreign::Fault(fault)) => Layer::Fault(fault),
            Failure::Foreign(Foreign::Opaque(opaque)) => Layer::from(opaque),
        }
    }
}

impl<'a> From<&'a (dyn StdError + 'static)> for Layer<'a> {
    fn from(error: &'a (dyn StdError + 'static)) -> Self {
        Layer::from_dyn(error)
    }
}

// address and vtable: a field at offset zero shares its owner's address
fn same_object(a: &(dyn StdError + 'static), b: &(dyn StdError + 'static)) -> bool {
    std::ptr::eq(a as *const dyn StdError, b as *const dyn StdError)
}

/// Iterator over a failure chain, outermost layer first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<Layer<'a>>,
    opaque_run: usize,
}

impl<'a> Chain<'a> {
    /// Walk the chain starting at `start`.
    pub fn new(start: impl Into<Layer<'a>>) -> Self {
        Self {
            next: Some(start.into()),
            opaque_run: 0,
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = Layer<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next();
        self.opaque_run = match current {
            Layer::Opaque(_) => self.opaque_run + 1,
            Layer::Classified(_) | Layer::Fault(_) => 0,
        };
        if self.opaque_run >= MAX_CHAIN_DEPTH && matches!(self.next, Some(Layer::Opaque(_))) {
            log::warn!(
                "foreign source chain exceeds {MAX_CHAIN_DEPTH} layers, likely a cycle; stopping at {:?}",
                current.as_std_error().to_string()
            );
            self.next = None;
        }
        Some(current)
    }
}

/// Every layer of `err`, outermost first.
pub fn chain<'a>(err: impl Into<Layer<'a>>) -> Chain<'a> {
    Chain::new(err)
}

/// Category of `err`.
///
/// Each wrap keeps its category current, so a classified error answers
/// directly. Anything foreign is [`Category::Internal`], whatever it wraps,
/// which keeps `code` in step with [`display_message`].
pub fn code<'a>(err: impl Into<Layer<'a>>) -> Category {
    match err.into() {
        Layer::Classified(error) => error.code(),
        Layer::Fault(_) | Layer::Opaque(_) => Category::Internal,
    }
}

/// The irreducible root failure under every wrapping layer.
///
/// Downcast the result to recover the original type.
pub fn cause<'a>(err: impl Into<Layer<'a>>) -> &'a (dyn StdError + 'static) {
    let start = err.into();
    Chain::new(start)
        .last()
        .unwrap_or(start)
        .as_std_error()
}

/// Text that is safe to show an end user.
pub fn display_message<'a>(err: impl Into<Layer<'a>>) -> &'a str {
    match err.into() {
        Layer::Classified(error) => error.display_message(),
        Layer::Fault(_) | Layer::Opaque(_) => Category::Internal.label(),
    }
}

/// Origin of the first foundation failure reachable from `err`.
///
/// An opaque error with no fault inside it carries no origin; that is a
/// defect in how the error entered the system and is logged as such.
pub fn origin<'a>(err: impl Into<Layer<'a>>) -> Option<&'a Origin> {
    let start = err.into();
    let found = find_origin(start);
    if found.is_none() {
        log::warn!(
            "no origin trace available for {:?}; it never passed through a Fault",
            start.as_std_error().to_string()
        );
    }
    found
}

/// Origin of the deepest foundation failure, where the root was created.
pub fn root_origin<'a>(err: impl Into<Layer<'a>>) -> Option<&'a Origin> {
    Chain::new(err)
        .filter_map(|layer| match layer {
            Layer::Fault(fault) => Some(fault.origin()),
            _ => None,
        })
        .last()
}

pub(crate) fn find_origin(start: Layer<'_>) -> Option<&Origin> {
    Chain::new(start).find_map(|layer| match layer {
        Layer::Fault(fault) => Some(fault.origin()),
        _ => None,
    })
}
