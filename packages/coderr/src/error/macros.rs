//! Macros for error creation and handling

/// Create an error with a formatted message.
///
/// `newf!(NotFound, "row {} missing", id)` classifies it; without a leading
/// category it is [`Category::Internal`](crate::Category::Internal).
#[macro_export]
macro_rules! newf {
    ($category:ident, $($arg:tt)+) => {
        $crate::Category::$category.new(::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::new(::core::format_args!($($arg)+))
    };
}

/// Wrap an error with a formatted message.
///
/// `wrapf!(err, "loading {}", path)` keeps the category of `err`;
/// `wrapf!(NotFound => err, "loading {}", path)` overrides it.
#[macro_export]
macro_rules! wrapf {
    ($category:ident => $err:expr, $($arg:tt)+) => {
        $crate::Category::$category.wrap($err, ::core::format_args!($($arg)+))
    };
    ($err:expr, $($arg:tt)+) => {
        $crate::wrap($err, ::core::format_args!($($arg)+))
    };
}

/// Return early with an error built by [`newf!`]
#[macro_export]
macro_rules! bail {
    ($($arg:tt)+) => {
        return ::core::result::Result::Err($crate::newf!($($arg)+).into())
    };
}

/// Return early with an error if a condition does not hold
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::bail!($($arg)+);
        }
    };
}
