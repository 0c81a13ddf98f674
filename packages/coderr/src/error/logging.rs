//! Logging integration
//!
//! The library logs through the `log` facade. Applications that have no
//! logger of their own can use [`init`], which sets up `env_logger`
//! configured from `RUST_LOG`:
//! - `RUST_LOG=warn` - defects detected while inspecting errors
//! - `RUST_LOG=coderr=debug` - configuration events as well

use log::Level;

use super::types::Category;
use crate::inspect::{self, Layer};

/// Initialize `env_logger` (call once at application startup)
pub fn init() -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .try_init()?;
    log::debug!("structured logging initialized");
    Ok(())
}

/// Initialize logging for test environments
///
/// Safe to call from every test; only the first call installs a logger.
pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

/// Log an error with its category, display message, description and origin.
///
/// `Internal` and `Unknown` errors are logged at `error`, everything else at
/// `warn`.
pub fn report<'a>(err: impl Into<Layer<'a>>) {
    let layer = err.into();
    let code = inspect::code(layer);
    let origin = inspect::find_origin(layer)
        .and_then(|origin| origin.caller())
        .map_or_else(|| "unknown".to_string(), ToString::to_string);

    log::log!(
        level_for(code),
        "[{code}] {} (display: {:?}, origin: {origin})",
        layer.as_std_error(),
        inspect::display_message(layer),
    );
}

fn level_for(code: Category) -> Level {
    match code {
        Category::Internal | Category::Unknown => Level::Error,
        _ => Level::Warn,
    }
}
