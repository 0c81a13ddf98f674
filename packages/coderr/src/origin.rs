//! Origin traces: where a failure was first created
//!
//! Capture is pluggable through [`OriginCapture`]. Every strategy receives the
//! caller location recorded by `#[track_caller]`, so even the cheapest one
//! points at user code rather than at this crate.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// One call location in an origin trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    function: Option<String>,
    file: String,
    line: u32,
    column: Option<u32>,
}

impl Frame {
    /// Build a frame from its parts.
    pub fn new(function: Option<String>, file: impl Into<String>, line: u32, column: Option<u32>) -> Self {
        Self {
            function,
            file: file.into(),
            line,
            column,
        }
    }

    /// Frame for a `#[track_caller]` location. Locations carry no symbol name.
    #[must_use]
    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(None, location.file(), location.line(), Some(location.column()))
    }

    /// Demangled function name, when known
    #[must_use]
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Source file path
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// 1-based line number
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column, when known
    #[must_use]
    pub fn column(&self) -> Option<u32> {
        self.column
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(function) = &self.function {
            write!(f, "{function}\n\t")?;
        }
        write!(f, "{}:{}", self.file, self.line)?;
        if let Some(column) = self.column {
            write!(f, ":{column}")?;
        }
        Ok(())
    }
}

/// Call locations captured when a failure was created, innermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    frames: Arc<[Frame]>,
}

impl Origin {
    /// Trace made of the given frames.
    #[must_use]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: Arc::from(frames),
        }
    }

    /// Trace with no frames, as produced when capture is disabled.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// All frames, innermost first
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The location that created the failure.
    #[must_use]
    pub fn caller(&self) -> Option<&Frame> {
        self.frames.first()
    }

    /// Number of frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing was captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

/// Strategy used to record an [`Origin`] when a failure is created.
pub trait OriginCapture: Send + Sync + 'static {
    /// Capture a trace for a failure created at `caller`.
    fn capture(&self, caller: &'static Location<'static>) -> Origin;
}

/// Records only the caller location. Cheap enough for hot paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallSite;

impl OriginCapture for CallSite {
    fn capture(&self, caller: &'static Location<'static>) -> Origin {
        Origin::new(vec![Frame::from_location(caller)])
    }
}

/// Records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl OriginCapture for Disabled {
    fn capture(&self, _caller: &'static Location<'static>) -> Origin {
        Origin::empty()
    }
}

/// Caller location followed by a resolved stack walk.
///
/// Frames belonging to this crate and to the unwinder are dropped, so the
/// walk starts at the code that asked for the failure.
#[cfg(feature = "full-backtrace")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FullBacktrace;

#[cfg(feature = "full-backtrace")]
impl OriginCapture for FullBacktrace {
    fn capture(&self, caller: &'static Location<'static>) -> Origin {
        let head = Frame::from_location(caller);
        let mut frames = vec![head];

        let trace = backtrace::Backtrace::new();
        for frame in trace.frames() {
            for symbol in frame.symbols() {
                let function = symbol.name().map(|name| format!("{name:#}"));
                if function.as_deref().is_some_and(is_capture_machinery) {
                    continue;
                }
                let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) else {
                    continue;
                };
                // the caller already heads the trace
                if is_caller(file, line, caller) {
                    continue;
                }
                frames.push(Frame::new(function, file.display().to_string(), line, symbol.colno()));
            }
        }

        Origin::new(frames)
    }
}

#[cfg(feature = "full-backtrace")]
fn is_capture_machinery(function: &str) -> bool {
    const PREFIXES: [&str; 3] = ["backtrace::", "coderr::", "<coderr::"];
    PREFIXES.iter().any(|prefix| function.starts_with(prefix)) || function.contains(" as coderr::")
}

// debug info usually holds absolute paths, `Location` a workspace-relative one
#[cfg(feature = "full-backtrace")]
fn is_caller(file: &std::path::Path, line: u32, caller: &Location<'_>) -> bool {
    line == caller.line() && file.ends_with(caller.file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_site_records_the_caller() {
        let origin = CallSite.capture(Location::caller());
        let frame = origin.caller().expect("one frame");
        assert_eq!(origin.len(), 1);
        assert!(frame.file().ends_with("origin.rs"));
        assert!(frame.function().is_none());
    }

    #[test]
    fn disabled_records_nothing() {
        assert!(Disabled.capture(Location::caller()).is_empty());
    }

    #[test]
    fn display_lists_one_frame_per_line() {
        let origin = Origin::new(vec![
            Frame::new(None, "src/a.rs", 3, Some(7)),
            Frame::new(Some("app::run".into()), "src/b.rs", 10, None),
        ]);
        assert_eq!(origin.to_string(), "src/a.rs:3:7\napp::run\n\tsrc/b.rs:10");
    }

    #[cfg(feature = "full-backtrace")]
    #[test]
    fn machinery_frames_are_recognised() {
        assert!(is_capture_machinery("coderr::fault::Fault::new"));
        assert!(is_capture_machinery("<coderr::origin::FullBacktrace as coderr::origin::OriginCapture>::capture"));
        assert!(is_capture_machinery("backtrace::capture::Backtrace::new"));
        assert!(is_capture_machinery(
            "<core::result::Result<T,E> as coderr::error::extensions::ResultExt<T>>::wrap_err"
        ));
        assert!(!is_capture_machinery("app::handlers::lookup"));
    }

    #[cfg(feature = "full-backtrace")]
    #[test]
    fn absolute_symbol_paths_match_the_caller() {
        let caller = Location::caller();
        let absolute = std::path::Path::new("/home/build/app").join(caller.file());
        assert!(is_caller(&absolute, caller.line(), caller));
        assert!(!is_caller(&absolute, caller.line() + 1, caller));
        assert!(!is_caller(std::path::Path::new("/home/build/app/src/other.rs"), caller.line(), caller));
    }

    #[cfg(feature = "full-backtrace")]
    #[test]
    fn full_backtrace_starts_at_the_caller() {
        let caller = Location::caller();
        let origin = FullBacktrace.capture(caller);
        let head = origin.caller().expect("caller frame");
        assert_eq!(head.line(), caller.line());
        assert!(origin
            .frames()
            .iter()
            .filter_map(Frame::function)
            .all(|name| !is_capture_machinery(name)));
        assert!(!origin.frames()[1..]
            .iter()
            .any(|frame| is_caller(std::path::Path::new(frame.file()), frame.line(), caller)));
    }
}
