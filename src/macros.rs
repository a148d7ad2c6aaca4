//! Internal logging macros.
//!
//! Each macro forwards to `defmt` when the `defmt-0-3` feature is enabled, to the
//! `log` facade when the `log` feature is enabled, and otherwise expands to a
//! borrow of its arguments so call sites compile identically in every configuration.
//! Format strings must stick to `{}` and `{:?}` so both backends accept them.

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt-0-3")]
        ::defmt::trace!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt-0-3")))]
        ::log::trace!($s $(, $x)*);
        #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
        let _ = ($( &$x, )*);
    }};
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt-0-3")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt-0-3")))]
        ::log::debug!($s $(, $x)*);
        #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
        let _ = ($( &$x, )*);
    }};
}

macro_rules! warning {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt-0-3")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt-0-3")))]
        ::log::warn!($s $(, $x)*);
        #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
        let _ = ($( &$x, )*);
    }};
}

pub(crate) use {debug, trace, warning};
