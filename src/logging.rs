// Diagnostic output through `log` and/or `defmt`, nothing when both features are off.
// Format strings must stay within the subset both crates accept ({} and {:#x}).

macro_rules! mb_log {
    ($level:ident, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "log")]
        ::log::$level!($fmt $(, $arg)*);
        #[cfg(feature = "defmt")]
        ::defmt::$level!($fmt $(, $arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        {
            $(let _ = &($arg);)*
        }
    }};
}

macro_rules! mb_trace {
    ($($t:tt)*) => { mb_log!(trace, $($t)*) };
}

macro_rules! mb_debug {
    ($($t:tt)*) => { mb_log!(debug, $($t)*) };
}

macro_rules! mb_warn {
    ($($t:tt)*) => { mb_log!(warn, $($t)*) };
}
