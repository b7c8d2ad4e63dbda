//! Logging macros forwarding to `defmt` or `log`, whichever is enabled.
//!
//! Format strings must stay within the subset both backends accept: plain
//! `{}` and `{:?}` placeholders.

#![macro_use]
#![allow(unused_macros)]

macro_rules! fsci_log {
    ($level:ident, $s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::$level!($s $(, $x)*);
            #[cfg(feature = "log")]
            ::log::$level!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "log")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! trace {
    ($($arg:tt)*) => { fsci_log!(trace, $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { fsci_log!(debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { fsci_log!(info, $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { fsci_log!(warn, $($arg)*) };
}

macro_rules! error {
    ($($arg:tt)*) => { fsci_log!(error, $($arg)*) };
}
