#![forbid(unsafe_code)]

//! Trace replay and invariant checking for `rangeknob-core`.
//!
//! The binary wraps three commands:
//! - `replay` feeds a JSON trace through the engine and prints every
//!   transition and effect, optionally with a `blake3` digest of the effect
//!   stream.
//! - `check` replays a trace and verifies the engine's invariants plus the
//!   trace's expected notifications.
//! - `scenario` prints the built-in reference traces.

pub mod check;
pub mod cli;
pub mod error;
pub mod logging;
pub mod replay;
pub mod scenario;
pub mod trace;

pub use cli::run_from_env;
pub use error::{HarnessError, Result};
