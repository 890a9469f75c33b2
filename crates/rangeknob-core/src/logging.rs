//! Structured logging facade.
//!
//! With the `tracing` feature the macros below are re-exported from
//! [`tracing`]. Without it they expand to nothing, so call sites compile
//! identically in both configurations:
//!
//! ```ignore
//! use crate::{debug, debug_span};
//!
//! let _span = debug_span!("knob_drag", knob = ?knob).entered();
//! debug!(x, "knob moved");
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

/// Span stand-in returned by `debug_span!` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    #[must_use]
    pub fn entered(self) -> Self {
        self
    }
}

#[cfg(not(feature = "tracing"))]
mod noop {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}
