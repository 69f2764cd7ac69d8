#![forbid(unsafe_code)]

//! Core: geometry primitives and grid/pixel coordinate transforms.

pub mod geometry;
pub mod logging;
pub mod transform;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
