#![forbid(unsafe_code)]

//! Core: geometry and drag interaction engine for a dual-knob range slider.
//!
//! # Role in rangeknob
//! `rangeknob-core` is the whole control minus drawing. Hosts feed it
//! [`PointerEvent`]s and receive knob/range frames plus one value
//! notification per completed drag.
//!
//! # Primary responsibilities
//! - **ValueSpace**: value ↔ knob-centre pixel conversions and step snapping.
//! - **ConstraintEngine**: separation floor, crossing policy, track bounds.
//! - **KnobDragMachine**: per-knob `Idle -> Dragging -> Idle` lifecycle.
//! - **RangeSliderEngine**: composes the above and emits [`SliderEffect`]s.
//!
//! # Example
//! ```
//! use rangeknob_core::{
//!     KnobId, PointerEvent, RangeSlider, RecordedValues, RecordingRenderer, SliderConfig,
//! };
//!
//! let config = SliderConfig::default().with_domain(0.0, 100.0);
//! let mut slider =
//!     RangeSlider::new(config, RecordingRenderer::default(), RecordedValues::default())?;
//!
//! let knob = KnobId::Right;
//! slider.handle(&PointerEvent::PointerDown { knob, position: 218.0 });
//! slider.handle(&PointerEvent::PointerMove { knob, delta: 19.856 });
//! slider.handle(&PointerEvent::PointerUp { knob });
//!
//! let (min, max) = slider.observer().last().expect("one commit");
//! assert!((min - 25.0).abs() < 1e-9);
//! assert!((max - 82.0).abs() < 1e-9);
//! # Ok::<(), rangeknob_core::ConfigError>(())
//! ```

pub mod color;
pub mod config;
pub mod constraint;
pub mod drag;
pub mod error;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod recording;
pub mod selection;
pub mod slider;
pub mod value_space;

pub use color::Rgba;
pub use config::SliderConfig;
pub use constraint::{ConstraintEngine, MoveVerdict};
pub use drag::{
    CommitReason, DragPolicy, KnobDragEffect, KnobDragMachine, KnobDragNoopReason, KnobDragState,
    KnobDragTransition,
};
pub use error::{ConfigError, SelectionError};
pub use event::{KnobId, PointerEvent};
pub use geometry::Frame;
pub use recording::{RecordedValues, RecordingRenderer, RenderCall};
pub use selection::{Polarity, SelectedRange};
pub use slider::{
    RangeSlider, RangeSliderEngine, SliderEffect, SliderRenderer, SliderStep, ValuesObserver,
    dispatch,
};
pub use value_space::ValueSpace;

// Re-export tracing macros at crate root so modules import them the same way
// with or without the feature.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
