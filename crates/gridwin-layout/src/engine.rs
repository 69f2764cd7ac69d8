#![forbid(unsafe_code)]

//! Pointer-to-store wiring.
//!
//! [`GridEngine`] owns the gesture machine and the layout store and
//! routes each inbound [`PointerUpdate`] through the gesture machine
//! and, on commit, into the store. Everything is synchronous and runs
//! to completion before the next update is processed.

use std::fmt;

use gridwin_core::geometry::{Frame, Vec2};
use gridwin_core::transform::{GridMetrics, GridMetricsError};

use crate::gesture::{GestureEffect, GestureMachine};
use crate::panel::{GesturePhase, PanelId, PointerUpdate};
use crate::store::{LayoutCommand, LayoutStore, LayoutStoreError};

/// Result of routing one pointer update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOutput {
    /// What the gesture machine did (live frames, settle, no-op).
    pub effect: GestureEffect,
    /// The command applied to the store, when the update committed.
    pub applied: Option<LayoutCommand>,
}

/// Engine-level failures; all are caller contract violations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineError {
    /// Gesture addressed to a panel the store does not hold.
    UnknownPanel { panel: PanelId },
    /// The store rejected a committed command.
    Store(LayoutStoreError),
    /// Invalid container geometry supplied at runtime.
    Metrics(GridMetricsError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPanel { panel } => write!(f, "no panel {panel} in layout"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Metrics(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownPanel { .. } => None,
            Self::Store(err) => Some(err),
            Self::Metrics(err) => Some(err),
        }
    }
}

impl From<LayoutStoreError> for EngineError {
    fn from(err: LayoutStoreError) -> Self {
        Self::Store(err)
    }
}

impl From<GridMetricsError> for EngineError {
    fn from(err: GridMetricsError) -> Self {
        Self::Metrics(err)
    }
}

/// The coordinate/gesture engine over one container.
#[derive(Debug, Clone)]
pub struct GridEngine {
    machine: GestureMachine,
    store: LayoutStore,
}

impl GridEngine {
    /// Build an engine from container metrics and a populated store.
    #[must_use]
    pub fn new(metrics: GridMetrics, store: LayoutStore) -> Self {
        Self {
            machine: GestureMachine::new(metrics),
            store,
        }
    }

    /// Container/grid metrics in use.
    #[must_use]
    pub fn metrics(&self) -> &GridMetrics {
        self.machine.metrics()
    }

    /// Read surface for rendering: committed grid-unit frames.
    #[must_use]
    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// Gesture machine state (active sessions).
    #[must_use]
    pub fn machine(&self) -> &GestureMachine {
        &self.machine
    }

    /// Route one pointer update.
    ///
    /// `Start` reads the panel's committed frame and opens a session;
    /// `Move` emits live geometry; `End` settles the gesture and, when
    /// it commits, applies the command to the store before returning.
    pub fn handle_pointer(&mut self, update: &PointerUpdate) -> Result<EngineOutput, EngineError> {
        match update.phase {
            GesturePhase::Start { kind } => {
                let committed =
                    self.store
                        .frame(update.panel)
                        .ok_or(EngineError::UnknownPanel {
                            panel: update.panel,
                        })?;
                let effect = self.machine.start(update.panel, kind, committed);
                Ok(EngineOutput {
                    effect,
                    applied: None,
                })
            }
            GesturePhase::Move => Ok(EngineOutput {
                effect: self.machine.update(update.panel, update.delta),
                applied: None,
            }),
            GesturePhase::End => {
                let effect = self.machine.finish(update.panel, update.delta);
                let applied = match effect {
                    GestureEffect::Settled {
                        commit: Some(commit),
                        ..
                    } => {
                        let command = LayoutCommand::from(commit);
                        self.store.apply(&command)?;
                        Some(command)
                    }
                    _ => None,
                };
                Ok(EngineOutput { effect, applied })
            }
        }
    }

    /// Add a panel with a committed grid-space frame.
    pub fn add_panel(&mut self, frame: Frame) -> Result<PanelId, EngineError> {
        Ok(self.store.insert(frame)?)
    }

    /// Remove a panel, discarding any gesture still in flight on it.
    ///
    /// The in-flight gesture never commits; returns the last committed
    /// frame, or `None` for an unknown panel.
    pub fn remove_panel(&mut self, panel: PanelId) -> Option<Frame> {
        let _ = self.machine.discard(panel);
        self.store.remove(panel)
    }

    /// Change the container pixel size, recomputing the cell size.
    pub fn set_container(&mut self, container: Vec2) -> Result<(), EngineError> {
        Ok(self.machine.metrics_mut().set_container(container)?)
    }
}
