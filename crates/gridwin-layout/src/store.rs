#![forbid(unsafe_code)]

//! Authoritative panel geometry store.
//!
//! Holds the committed grid-unit frame for every panel, in display
//! order. Committed [`LayoutCommand`]s are the only mutation channel;
//! each command applies atomically (a reader never observes a
//! half-applied frame) and strictly in arrival order.

use std::fmt;

use gridwin_core::geometry::{Frame, Vec2};
use serde::{Deserialize, Serialize};

use crate::gesture::{FrameChange, FrameCommit};
use crate::panel::{PanelId, PanelIdError};

/// Geometry fields carried by a command.
///
/// Emitted commands populate exactly one field, matching the command
/// type; the shape leaves room for origin-mutating resize handles
/// without a new command vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec2>,
}

impl CommandPayload {
    /// Payload carrying only a grid-space origin.
    #[must_use]
    pub fn origin(origin: Vec2) -> Self {
        Self {
            origin: Some(origin),
            size: None,
        }
    }

    /// Payload carrying only a grid-space size.
    #[must_use]
    pub fn size(size: Vec2) -> Self {
        Self {
            size: Some(size),
            origin: None,
        }
    }
}

/// Committed command addressed to one panel, grid units.
///
/// Command types outside the current vocabulary deserialize to
/// [`LayoutCommand::Unknown`] and are tolerated as no-ops so the wire
/// vocabulary can grow without breaking older stores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutCommand {
    /// Replace the panel's origin; size unchanged.
    Move {
        panel: PanelId,
        payload: CommandPayload,
    },
    /// Replace the panel's size; origin unchanged unless the payload
    /// carries one (origin-mutating handle extension point).
    Resize {
        panel: PanelId,
        payload: CommandPayload,
    },
    /// Forward-compatible catch-all; applying it is a no-op.
    #[serde(other)]
    Unknown,
}

impl From<FrameCommit> for LayoutCommand {
    fn from(commit: FrameCommit) -> Self {
        match commit.change {
            FrameChange::Move { origin } => Self::Move {
                panel: commit.panel,
                payload: CommandPayload::origin(origin),
            },
            FrameChange::Resize { size, origin } => Self::Resize {
                panel: commit.panel,
                payload: CommandPayload {
                    origin,
                    size: Some(size),
                },
            },
        }
    }
}

/// What [`LayoutStore::apply`] did with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandDisposition {
    /// The panel's frame was replaced.
    Applied,
    /// Unknown command type; state untouched.
    Ignored,
}

/// Caller contract violations surfaced by the store.
///
/// These indicate collaborator bugs, not runtime conditions, and are
/// never silently repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStoreError {
    /// Command addressed to a panel the store does not hold.
    UnknownPanel { panel: PanelId },
    /// Command arrived without the field its type requires.
    MissingPayloadField {
        command: &'static str,
        field: &'static str,
    },
    /// Panel ID space exhausted on insert.
    Id(PanelIdError),
}

impl fmt::Display for LayoutStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPanel { panel } => write!(f, "panel {panel} not found"),
            Self::MissingPayloadField { command, field } => {
                write!(f, "{command} command is missing payload field `{field}`")
            }
            Self::Id(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LayoutStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Id(err) = self {
            return Some(err);
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanelEntry {
    id: PanelId,
    frame: Frame,
}

/// Ordered panel geometry, the single source of truth for rendering.
#[derive(Debug, Clone, Default)]
pub struct LayoutStore {
    panels: Vec<PanelEntry>,
    next_id: Option<PanelId>,
}

impl LayoutStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            panels: Vec::new(),
            next_id: Some(PanelId::MIN),
        }
    }

    /// Add a panel with a committed grid-space frame, allocating its
    /// stable ID. Display order is insertion order.
    pub fn insert(&mut self, frame: Frame) -> Result<PanelId, LayoutStoreError> {
        let id = self.next_id.ok_or(LayoutStoreError::Id(
            PanelIdError::PanelIdOverflow {
                current: self.panels.last().map_or(PanelId::MIN, |p| p.id),
            },
        ))?;
        self.next_id = id.checked_next().ok();
        self.panels.push(PanelEntry { id, frame });
        Ok(id)
    }

    /// Remove a panel, returning its last committed frame.
    pub fn remove(&mut self, id: PanelId) -> Option<Frame> {
        let index = self.panels.iter().position(|p| p.id == id)?;
        Some(self.panels.remove(index).frame)
    }

    /// Committed frame for one panel.
    #[must_use]
    pub fn frame(&self, id: PanelId) -> Option<Frame> {
        self.panels.iter().find(|p| p.id == id).map(|p| p.frame)
    }

    /// Committed frames in display order (grid units).
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        self.panels.iter().map(|p| p.frame)
    }

    /// `(id, frame)` pairs in display order.
    pub fn panels(&self) -> impl Iterator<Item = (PanelId, Frame)> + '_ {
        self.panels.iter().map(|p| (p.id, p.frame))
    }

    /// Panel count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// True if the store holds no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Apply one committed command.
    ///
    /// Validation happens before any mutation, and the frame is
    /// replaced wholesale, so a failed command leaves the store
    /// bit-identical to before.
    pub fn apply(
        &mut self,
        command: &LayoutCommand,
    ) -> Result<CommandDisposition, LayoutStoreError> {
        match command {
            LayoutCommand::Move { panel, payload } => {
                let origin = payload.origin.ok_or(LayoutStoreError::MissingPayloadField {
                    command: "move",
                    field: "origin",
                })?;
                let entry = self.entry_mut(*panel)?;
                entry.frame = entry.frame.with_origin(origin);
                gridwin_core::debug!(panel = panel.get(), ?origin, "move applied");
                Ok(CommandDisposition::Applied)
            }
            LayoutCommand::Resize { panel, payload } => {
                let size = payload.size.ok_or(LayoutStoreError::MissingPayloadField {
                    command: "resize",
                    field: "size",
                })?;
                let origin = payload.origin;
                let entry = self.entry_mut(*panel)?;
                let mut next = entry.frame.with_size(size);
                if let Some(origin) = origin {
                    next = next.with_origin(origin);
                }
                entry.frame = next;
                gridwin_core::debug!(panel = panel.get(), ?size, "resize applied");
                Ok(CommandDisposition::Applied)
            }
            LayoutCommand::Unknown => {
                gridwin_core::debug!("unknown command type ignored");
                Ok(CommandDisposition::Ignored)
            }
        }
    }

    fn entry_mut(&mut self, id: PanelId) -> Result<&mut PanelEntry, LayoutStoreError> {
        self.panels
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LayoutStoreError::UnknownPanel { panel: id })
    }
}
