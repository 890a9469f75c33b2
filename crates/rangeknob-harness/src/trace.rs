#![forbid(unsafe_code)]

//! JSON trace files.
//!
//! A trace is a slider configuration, the pointer events to feed it, and an
//! optional block of expected value notifications:
//!
//! ```json
//! {
//!   "name": "snap-on-release",
//!   "config": { "minimum_value": 0.0, "maximum_value": 100.0 },
//!   "events": [
//!     { "event": "pointer_down", "knob": "right", "position": 218.0 },
//!     { "event": "pointer_move", "knob": "right", "delta": 19.856 },
//!     { "event": "pointer_up", "knob": "right" }
//!   ],
//!   "expect": { "notifications": [[25.0, 82.0]] }
//! }
//! ```
//!
//! Missing configuration keys take the control's defaults.

use std::fs;
use std::io;
use std::path::Path;

use rangeknob_core::{PointerEvent, SliderConfig};
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

const DEFAULT_TOLERANCE: f64 = 1e-6;

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub config: SliderConfig,
    #[serde(default)]
    pub events: Vec<PointerEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expectation>,
}

/// Value notifications a replay must produce, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    pub notifications: Vec<(f64, f64)>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Expectation {
    #[must_use]
    pub fn new(notifications: Vec<(f64, f64)>) -> Self {
        Self {
            notifications,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => HarnessError::MissingTrace {
                path: path.to_path_buf(),
            },
            _ => HarnessError::Io(err),
        })?;
        let trace = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            events = trace.events.len(),
            "loaded trace"
        );
        Ok(trace)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Display label: the trace name, or `unnamed`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}
