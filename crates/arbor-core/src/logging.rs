#![forbid(unsafe_code)]

//! Logging shims.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported at
//! the crate root, so `arbor_core::debug!` and friends forward to the real
//! thing. Without it the same names expand to nothing and the span macros
//! produce a [`NoopSpan`], which keeps call sites free of `cfg` attributes:
//!
//! ```
//! let span = arbor_core::debug_span!("listbox_render", width = 80u16);
//! let _guard = span.enter();
//! arbor_core::trace!(rows = 3, "placed focus");
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Discards its arguments (`tracing` feature disabled).
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments (`tracing` feature disabled).
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments (`tracing` feature disabled).
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments (`tracing` feature disabled).
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments (`tracing` feature disabled).
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! warn_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! error_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Span stand-in used when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span. The guard does nothing.
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;

#[cfg(all(test, not(feature = "tracing")))]
mod tests {
    #[test]
    fn noop_macros_accept_tracing_syntax() {
        let rows = 3;
        crate::trace!(rows, "placed");
        crate::debug!(width = 80u16, height = 24u16, "layout");
        crate::warn!("row count mismatch at {:?}", (0, 1));
        let span = crate::debug_span!("listbox_render", width = 80u16);
        let _guard = span.enter();
    }
}
