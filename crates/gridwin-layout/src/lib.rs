#![forbid(unsafe_code)]

//! Gesture engine and layout store for grid-snapped panels.
//!
//! This crate turns normalized pointer updates into live pixel-space
//! geometry while a gesture is in flight and into a single committed
//! grid-space command when it ends:
//!
//! ```text
//! pointer update -> GestureMachine -> LayoutCommand -> LayoutStore
//! ```
//!
//! - [`panel`] - panel identity, resize-handle descriptors, and the
//!   inbound pointer call shape
//! - [`gesture`] - the per-panel move/resize state machine
//! - [`store`] - authoritative grid-unit geometry and commands
//! - [`engine`] - the wiring between the two
//! - [`config`] - validated startup configuration

pub mod config;
pub mod engine;
pub mod gesture;
pub mod panel;
pub mod store;

pub use config::{ConfigError, LayoutConfig};
pub use engine::{EngineError, EngineOutput, GridEngine};
pub use gesture::{
    FrameChange, FrameCommit, GestureEffect, GestureMachine, GestureNoopReason, GestureSession,
    LiveFrame,
};
pub use gridwin_core::geometry::{Frame, Vec2};
pub use gridwin_core::transform::{GridMetrics, GridMetricsError};
pub use panel::{GestureKind, GesturePhase, PanelId, PanelIdError, PointerUpdate, ResizeHandle};
pub use store::{CommandDisposition, CommandPayload, LayoutCommand, LayoutStore, LayoutStoreError};
