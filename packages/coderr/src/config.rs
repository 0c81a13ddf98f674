//! Origin capture configuration
//!
//! The capture strategy is process-wide and chosen once. Priority:
//! 1. a strategy passed to [`install`] / [`install_mode`] before the first failure is created
//! 2. the `CODERR_ORIGIN` environment variable (`off`, `caller`, `full`)
//! 3. [`OriginMode::default`]

use std::panic::Location;

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::origin::{CallSite, Disabled, Origin, OriginCapture};

/// Environment variable read when no strategy was installed.
pub const ORIGIN_ENV: &str = "CODERR_ORIGIN";

static CAPTURE: OnceCell<Box<dyn OriginCapture>> = OnceCell::new();

/// Built-in capture strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginMode {
    /// Record nothing
    Disabled,
    /// Record the caller location only
    CallSite,
    /// Record the caller location and a resolved stack walk
    Full,
}

impl Default for OriginMode {
    fn default() -> Self {
        if cfg!(feature = "full-backtrace") {
            OriginMode::Full
        } else {
            OriginMode::CallSite
        }
    }
}

impl OriginMode {
    /// Mode named by `CODERR_ORIGIN`, or the default when unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(ORIGIN_ENV) {
            Ok(raw) => Self::parse(&raw).unwrap_or_else(|| {
                log::warn!("ignoring unrecognised {ORIGIN_ENV}={raw:?}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse a mode name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" | "0" | "none" | "disabled" => Some(OriginMode::Disabled),
            "caller" | "callsite" | "1" => Some(OriginMode::CallSite),
            "full" | "backtrace" => Some(OriginMode::Full),
            _ => None,
        }
    }

    fn into_capture(self) -> Box<dyn OriginCapture> {
        match self {
            OriginMode::Disabled => Box::new(Disabled),
            OriginMode::CallSite => Box::new(CallSite),
            #[cfg(feature = "full-backtrace")]
            OriginMode::Full => Box::new(crate::origin::FullBacktrace),
            #[cfg(not(feature = "full-backtrace"))]
            OriginMode::Full => {
                log::debug!("full-backtrace feature disabled; capturing call sites only");
                Box::new(CallSite)
            }
        }
    }
}

/// Configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A strategy was already installed, or failures were already created
    /// with the environment-derived one.
    #[error("origin capture strategy is already installed")]
    AlreadyInstalled,
}

/// Install a custom capture strategy for the rest of the process.
pub fn install(capture: impl OriginCapture) -> Result<(), ConfigError> {
    CAPTURE
        .set(Box::new(capture))
        .map_err(|_| ConfigError::AlreadyInstalled)?;
    log::debug!("custom origin capture installed");
    Ok(())
}

/// Install one of the built-in strategies.
pub fn install_mode(mode: OriginMode) -> Result<(), ConfigError> {
    CAPTURE
        .set(mode.into_capture())
        .map_err(|_| ConfigError::AlreadyInstalled)?;
    log::debug!("origin capture mode {mode:?} installed");
    Ok(())
}

pub(crate) fn capture(caller: &'static Location<'static>) -> Origin {
    CAPTURE
        .get_or_init(|| OriginMode::from_env().into_capture())
        .capture(caller)
}
