#![forbid(unsafe_code)]

//! Panel identity, resize-handle descriptors, and the inbound pointer
//! call shape.
//!
//! Panels are addressed by a stable opaque [`PanelId`] everywhere
//! (gesture sessions and layout commands alike); the layout store's
//! sequence order is used only for display.

use std::fmt;

use gridwin_core::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier for panels.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u64);

impl PanelId {
    /// Lowest valid panel ID.
    pub const MIN: Self = Self(1);

    /// Create a new panel ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, PanelIdError> {
        if raw == 0 {
            return Err(PanelIdError::ZeroPanelId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next ID, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, PanelIdError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(PanelIdError::PanelIdOverflow { current: self });
        };
        Self::new(next)
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invalid panel ID values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelIdError {
    ZeroPanelId,
    PanelIdOverflow { current: PanelId },
}

impl fmt::Display for PanelIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPanelId => write!(f, "panel id 0 is reserved"),
            Self::PanelIdOverflow { current } => {
                write!(f, "panel id overflow after {current}")
            }
        }
    }
}

impl std::error::Error for PanelIdError {}

/// Per-axis behavior descriptor for one resize handle.
///
/// Additional handles are pure configuration: an axis flagged in
/// `affects_origin` keeps the panel's far edge fixed and moves the
/// near edge (origin and size both change); an axis flagged only in
/// `affects_size` keeps the origin fixed and moves the far edge; an
/// axis flagged in neither is untouched by the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeHandle {
    /// Whether dragging this handle moves the origin on `[x, y]`.
    pub affects_origin: [bool; 2],
    /// Whether dragging this handle changes the size on `[x, y]`.
    pub affects_size: [bool; 2],
}

impl ResizeHandle {
    pub const TOP_LEFT: Self = Self {
        affects_origin: [true, true],
        affects_size: [true, true],
    };
    pub const TOP: Self = Self {
        affects_origin: [false, true],
        affects_size: [false, true],
    };
    pub const TOP_RIGHT: Self = Self {
        affects_origin: [false, true],
        affects_size: [true, true],
    };
    pub const LEFT: Self = Self {
        affects_origin: [true, false],
        affects_size: [true, false],
    };
    pub const RIGHT: Self = Self {
        affects_origin: [false, false],
        affects_size: [true, false],
    };
    pub const BOTTOM_LEFT: Self = Self {
        affects_origin: [true, false],
        affects_size: [true, true],
    };
    pub const BOTTOM: Self = Self {
        affects_origin: [false, false],
        affects_size: [false, true],
    };
    /// The only handle wired to the current inbound surface.
    pub const BOTTOM_RIGHT: Self = Self {
        affects_origin: [false, false],
        affects_size: [true, true],
    };

    /// True if the handle moves the origin on either axis.
    #[must_use]
    pub const fn mutates_origin(&self) -> bool {
        self.affects_origin[0] || self.affects_origin[1]
    }
}

/// Which gesture a pointer-down starts, selected by where it landed
/// (panel body vs. a resize handle). Fixed for the life of the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureKind {
    Move,
    Resize { handle: ResizeHandle },
}

/// Lifecycle phase of one pointer update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GesturePhase {
    /// Pointer down; carries the gesture kind chosen by the hit test.
    Start { kind: GestureKind },
    /// Pointer held and moving.
    Move,
    /// Pointer released.
    End,
}

/// One normalized pointer update from the gesture collaborator.
///
/// `delta` is the cumulative pointer displacement in pixels since the
/// gesture started, not an increment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerUpdate {
    pub panel: PanelId,
    #[serde(flatten)]
    pub phase: GesturePhase,
    #[serde(default)]
    pub delta: Vec2,
}

impl PointerUpdate {
    /// Pointer-down update starting a gesture.
    #[must_use]
    pub fn start(panel: PanelId, kind: GestureKind) -> Self {
        Self {
            panel,
            phase: GesturePhase::Start { kind },
            delta: [0.0, 0.0],
        }
    }

    /// Mid-gesture update with the cumulative delta so far.
    #[must_use]
    pub fn moved(panel: PanelId, delta: Vec2) -> Self {
        Self {
            panel,
            phase: GesturePhase::Move,
            delta,
        }
    }

    /// Pointer-up update with the final cumulative delta.
    #[must_use]
    pub fn end(panel: PanelId, delta: Vec2) -> Self {
        Self {
            panel,
            phase: GesturePhase::End,
            delta,
        }
    }
}
