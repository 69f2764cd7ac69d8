#![forbid(unsafe_code)]

//! Per-panel drag/resize gesture state machine.
//!
//! Each panel is either idle or in exactly one active gesture
//! (move or resize); the kind never switches mid-gesture.
//!
//! ```text
//! idle -> active(move | resize) -> idle
//! ```
//!
//! While active, every update produces a [`LiveFrame`]: the clamped
//! pixel geometry for smooth pointer following plus its grid-snapped
//! counterpart for the snap-preview indicator. Finishing a gesture
//! produces at most one [`FrameCommit`] — the only channel by which a
//! gesture reaches authoritative state. A session discarded without a
//! finish never commits anything.

use std::collections::BTreeMap;

use gridwin_core::geometry::{Frame, Vec2, zip_with};
use gridwin_core::transform::{GridMetrics, cap, cap2, px_to_grid, snap_to_grid};
use serde::{Deserialize, Serialize};

use crate::panel::{GestureKind, PanelId};

/// One in-flight gesture: created on pointer-down, removed on
/// pointer-up or discard. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Panel this gesture is addressed to.
    pub panel: PanelId,
    /// Move or resize, fixed at start.
    pub kind: GestureKind,
    /// Pixel-space rendition of the committed frame at gesture start.
    pub start_frame: Frame,
}

/// Live visual state for one panel, in pixel space.
///
/// `origin`/`size` follow the pointer continuously (clamped to the
/// container); `origin_snap`/`size_snap` are the grid-aligned preview.
/// The animation collaborator owns any smoothing between successive
/// values; the engine never interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveFrame {
    pub panel: PanelId,
    pub origin: Vec2,
    pub origin_snap: Vec2,
    pub size: Vec2,
    pub size_snap: Vec2,
}

/// Committed geometry change in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum FrameChange {
    /// New grid-space origin; size untouched.
    Move { origin: Vec2 },
    /// New grid-space size; `origin` is present only for handles that
    /// move the near edge (left/top), absent for the bottom-right.
    Resize { size: Vec2, origin: Option<Vec2> },
}

/// The single authoritative write produced by a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameCommit {
    pub panel: PanelId,
    #[serde(flatten)]
    pub change: FrameChange,
}

/// Why an input was safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureNoopReason {
    /// Start while this panel already has an active session.
    GestureInProgress,
    /// Update/end/discard with no active session for the panel.
    NoActiveGesture,
}

/// Outcome of applying one pointer update to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum GestureEffect {
    /// A session was created; no geometry emitted yet.
    Started { panel: PanelId, kind: GestureKind },
    /// Mid-gesture tentative geometry for exactly one panel.
    Live(LiveFrame),
    /// Gesture ended: final geometry plus the commit, if any.
    ///
    /// A move whose cumulative delta was zero on both axes settles
    /// without a commit (a click is not a zero-delta move); a resize
    /// always commits.
    Settled {
        live: LiveFrame,
        commit: Option<FrameCommit>,
    },
    /// Session dropped without a release; nothing was committed.
    Discarded { panel: PanelId },
    /// Input ignored, with the reason.
    Noop { reason: GestureNoopReason },
}

/// Gesture state machine over all panels.
///
/// Sessions are explicit records keyed by panel ID; panels without an
/// entry are idle. All methods are synchronous and touch at most one
/// panel's session.
#[derive(Debug, Clone)]
pub struct GestureMachine {
    metrics: GridMetrics,
    sessions: BTreeMap<PanelId, GestureSession>,
}

impl GestureMachine {
    /// Build a machine over the given container/grid metrics.
    #[must_use]
    pub fn new(metrics: GridMetrics) -> Self {
        Self {
            metrics,
            sessions: BTreeMap::new(),
        }
    }

    /// Container/grid metrics in use.
    #[must_use]
    pub const fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Mutable metrics, for container resizes between gestures.
    pub fn metrics_mut(&mut self) -> &mut GridMetrics {
        &mut self.metrics
    }

    /// True if the panel has an active session.
    #[must_use]
    pub fn is_active(&self, panel: PanelId) -> bool {
        self.sessions.contains_key(&panel)
    }

    /// Number of concurrently active sessions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Begin a gesture from the panel's committed grid-space frame.
    pub fn start(&mut self, panel: PanelId, kind: GestureKind, committed: Frame) -> GestureEffect {
        if self.sessions.contains_key(&panel) {
            return GestureEffect::Noop {
                reason: GestureNoopReason::GestureInProgress,
            };
        }
        let start_frame = self.metrics.frame_to_px(committed);
        gridwin_core::debug!(panel = panel.get(), ?kind, "gesture start");
        let _ = self.sessions.insert(panel, GestureSession {
            panel,
            kind,
            start_frame,
        });
        GestureEffect::Started { panel, kind }
    }

    /// Apply a mid-gesture cumulative delta, emitting live geometry.
    ///
    /// Idempotent for a given delta; other panels' sessions are
    /// untouched.
    pub fn update(&mut self, panel: PanelId, delta: Vec2) -> GestureEffect {
        match self.sessions.get(&panel) {
            Some(session) => GestureEffect::Live(live_geometry(session, delta, &self.metrics)),
            None => GestureEffect::Noop {
                reason: GestureNoopReason::NoActiveGesture,
            },
        }
    }

    /// Release the pointer: emit the settled geometry and the commit.
    pub fn finish(&mut self, panel: PanelId, delta: Vec2) -> GestureEffect {
        let Some(session) = self.sessions.remove(&panel) else {
            return GestureEffect::Noop {
                reason: GestureNoopReason::NoActiveGesture,
            };
        };
        let live = live_geometry(&session, delta, &self.metrics);
        let cell = self.metrics.cell();
        let commit = match session.kind {
            GestureKind::Move => {
                if delta == [0.0, 0.0] {
                    // A click that produced no movement is a no-op,
                    // not a zero-delta move command.
                    None
                } else {
                    Some(FrameCommit {
                        panel,
                        change: FrameChange::Move {
                            origin: zip_with(px_to_grid, live.origin_snap, cell),
                        },
                    })
                }
            }
            // A resize commits even when the size is unchanged.
            GestureKind::Resize { handle } => Some(FrameCommit {
                panel,
                change: FrameChange::Resize {
                    size: zip_with(px_to_grid, live.size_snap, cell),
                    origin: handle
                        .mutates_origin()
                        .then(|| zip_with(px_to_grid, live.origin_snap, cell)),
                },
            }),
        };
        gridwin_core::debug!(panel = panel.get(), committed = commit.is_some(), "gesture end");
        GestureEffect::Settled { live, commit }
    }

    /// Drop a session without a release (e.g. panel removed
    /// mid-gesture). The last committed state stands.
    pub fn discard(&mut self, panel: PanelId) -> GestureEffect {
        if self.sessions.remove(&panel).is_some() {
            gridwin_core::trace!(panel = panel.get(), "gesture discarded");
            GestureEffect::Discarded { panel }
        } else {
            GestureEffect::Noop {
                reason: GestureNoopReason::NoActiveGesture,
            }
        }
    }
}

/// Tentative-plus-snapped geometry for one session at a given delta.
fn live_geometry(session: &GestureSession, delta: Vec2, metrics: &GridMetrics) -> LiveFrame {
    let start = session.start_frame;
    let container = metrics.container();
    let cell = metrics.cell();

    match session.kind {
        GestureKind::Move => {
            // Clamp so the panel never leaves the container, then snap.
            let max = zip_with(|c, s| c - s, container, start.size);
            let origin = cap2(
                zip_with(|o, d| o + d, start.origin, delta),
                [0.0, 0.0],
                max,
            );
            LiveFrame {
                panel: session.panel,
                origin,
                origin_snap: zip_with(snap_to_grid, origin, cell),
                size: start.size,
                size_snap: start.size,
            }
        }
        GestureKind::Resize { handle } => {
            let far = start.far_corner();
            let mut origin = start.origin;
            let mut size = start.size;
            for axis in 0..2 {
                if handle.affects_origin[axis] {
                    // Near edge follows the pointer, far edge is the pivot.
                    origin[axis] = cap(start.origin[axis] + delta[axis], 0.0, far[axis]);
                    size[axis] = far[axis] - origin[axis];
                } else if handle.affects_size[axis] {
                    // Origin is the pivot; the far edge may not leave
                    // the container.
                    size[axis] = cap(
                        start.size[axis] + delta[axis],
                        0.0,
                        container[axis] - start.origin[axis],
                    );
                }
            }
            LiveFrame {
                panel: session.panel,
                origin,
                origin_snap: zip_with(snap_to_grid, origin, cell),
                size,
                size_snap: zip_with(snap_to_grid, size, cell),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::ResizeHandle;

    fn machine() -> GestureMachine {
        // 32x32 grid over 512x512px, so each cell is 16x16.
        GestureMachine::new(GridMetrics::new([512.0, 512.0], 32, 32).unwrap())
    }

    fn panel() -> PanelId {
        PanelId::new(3).unwrap()
    }

    const COMMITTED: Frame = Frame {
        origin: [9.0, 4.0],
        size: [6.0, 4.0],
    };

    #[test]
    fn start_converts_committed_frame_to_px() {
        let mut m = machine();
        let effect = m.start(panel(), GestureKind::Move, COMMITTED);
        assert_eq!(effect, GestureEffect::Started {
            panel: panel(),
            kind: GestureKind::Move,
        });
        assert!(m.is_active(panel()));

        let GestureEffect::Live(live) = m.update(panel(), [0.0, 0.0]) else {
            panic!("expected live frame");
        };
        assert_eq!(live.origin, [144.0, 64.0]);
        assert_eq!(live.size, [96.0, 64.0]);
    }

    #[test]
    fn duplicate_start_is_noop() {
        let mut m = machine();
        m.start(panel(), GestureKind::Move, COMMITTED);
        let effect = m.start(panel(), GestureKind::Move, COMMITTED);
        assert_eq!(effect, GestureEffect::Noop {
            reason: GestureNoopReason::GestureInProgress,
        });
    }

    #[test]
    fn update_without_session_is_noop() {
        let mut m = machine();
        assert_eq!(m.update(panel(), [5.0, 5.0]), GestureEffect::Noop {
            reason: GestureNoopReason::NoActiveGesture,
        });
        assert_eq!(m.finish(panel(), [5.0, 5.0]), GestureEffect::Noop {
            reason: GestureNoopReason::NoActiveGesture,
        });
    }

    #[test]
    fn move_update_follows_pointer_and_previews_snap() {
        let mut m = machine();
        m.start(panel(), GestureKind::Move, COMMITTED);

        let GestureEffect::Live(live) = m.update(panel(), [20.0, 5.0]) else {
            panic!("expected live frame");
        };
        assert_eq!(live.origin, [164.0, 69.0]);
        assert_eq!(live.origin_snap, [160.0, 64.0]);
        assert_eq!(live.size, [96.0, 64.0]);
        assert_eq!(live.size_snap, [96.0, 64.0]);
    }

    #[test]
    fn move_clamps_to_container_bounds() {
        let mut m = machine();
        m.start(panel(), GestureKind::Move, COMMITTED);

        let GestureEffect::Live(live) = m.update(panel(), [-1000.0, 1000.0]) else {
            panic!("expected live frame");
        };
        assert_eq!(live.origin[0], 0.0);
        // max y = container - height = 512 - 64.
        assert_eq!(live.origin[1], 448.0);
    }

    #[test]
    fn move_finish_commits_grid_origin() {
        let mut m = machine();
        m.start(panel(), GestureKind::Move, COMMITTED);
        m.update(panel(), [10.0, 2.0]);

        let GestureEffect::Settled { live, commit } = m.finish(panel(), [20.0, 5.0]) else {
            panic!("expected settled effect");
        };
        assert_eq!(live.origin_snap, [160.0, 64.0]);
        assert_eq!(
            commit,
            Some(FrameCommit {
                panel: panel(),
                change: FrameChange::Move {
                    origin: [10.0, 4.0],
                },
            })
        );
        assert!(!m.is_active(panel()));
    }

    #[test]
    fn zero_delta_move_settles_without_commit() {
        let mut m = machine();
        m.start(panel(), GestureKind::Move, COMMITTED);

        let GestureEffect::Settled { live, commit } = m.finish(panel(), [0.0, 0.0]) else {
            panic!("expected settled effect");
        };
        assert_eq!(commit, None);
        assert_eq!(live.origin_snap, [144.0, 64.0]);
    }

    #[test]
    fn bottom_right_resize_grows_from_fixed_origin() {
        let mut m = machine();
        m.start(
            panel(),
            GestureKind::Resize {
                handle: ResizeHandle::BOTTOM_RIGHT,
            },
            COMMITTED,
        );

        let GestureEffect::Live(live) = m.update(panel(), [10.0, 10.0]) else {
            panic!("expected live frame");
        };
        assert_eq!(live.origin, [144.0, 64.0]);
        assert_eq!(live.size, [106.0, 74.0]);
        assert_eq!(live.size_snap, [112.0, 80.0]);

        let GestureEffect::Settled { commit, .. } = m.finish(panel(), [10.0, 10.0]) else {
            panic!("expected settled effect");
        };
        assert_eq!(
            commit,
            Some(FrameCommit {
                panel: panel(),
                change: FrameChange::Resize {
                    size: [7.0, 5.0],
                    origin: None,
                },
            })
        );
    }

    #[test]
    fn resize_clamps_far_edge_to_container() {
        let mut m = machine();
        m.start(
            panel(),
            GestureKind::Resize {
                handle: ResizeHandle::BOTTOM_RIGHT,
            },
            COMMITTED,
        );

        let GestureEffect::Live(live) = m.update(panel(), [10_000.0, -10_000.0]) else {
            panic!("expected live frame");
        };
        // 512 - 144 = 368 on x; size floors at zero on y.
        assert_eq!(live.size, [368.0, 0.0]);
    }

    #[test]
    fn zero_delta_resize_still_commits() {
        // Deliberate asymmetry with the move gesture.
        let mut m = machine();
        m.start(
            panel(),
            GestureKind::Resize {
                handle: ResizeHandle::BOTTOM_RIGHT,
            },
            COMMITTED,
        );

        let GestureEffect::Settled { commit, .. } = m.finish(panel(), [0.0, 0.0]) else {
            panic!("expected settled effect");
        };
        assert_eq!(
            commit,
            Some(FrameCommit {
                panel: panel(),
                change: FrameChange::Resize {
                    size: [6.0, 4.0],
                    origin: None,
                },
            })
        );
    }

    #[test]
    fn top_left_resize_moves_origin_with_far_edge_pivot() {
        let mut m = machine();
        m.start(
            panel(),
            GestureKind::Resize {
                handle: ResizeHandle::TOP_LEFT,
            },
            COMMITTED,
        );

        // Drag the top-left corner 20px right/down: panel shrinks,
        // far corner (240, 128) stays put.
        let GestureEffect::Live(live) = m.update(panel(), [20.0, 20.0]) else {
            panic!("expected live frame");
        };
        assert_eq!(live.origin, [164.0, 84.0]);
        assert_eq!(live.size, [76.0, 44.0]);
        assert_eq!(
            zip_with(|o, s| o + s, live.origin, live.size),
            [240.0, 128.0]
        );

        let GestureEffect::Settled { commit, .. } = m.finish(panel(), [20.0, 20.0]) else {
            panic!("expected settled effect");
        };
        let Some(FrameCommit {
            change: FrameChange::Resize { size, origin },
            ..
        }) = commit
        else {
            panic!("expected resize commit");
        };
        // Snapped: origin 160,80 -> grid (10,5); size 80,48 -> grid (5,3).
        assert_eq!(origin, Some([10.0, 5.0]));
        assert_eq!(size, [5.0, 3.0]);
    }

    #[test]
    fn discard_drops_session_without_commit() {
        let mut m = machine();
        m.start(panel(), GestureKind::Move, COMMITTED);
        m.update(panel(), [50.0, 50.0]);

        assert_eq!(m.discard(panel()), GestureEffect::Discarded {
            panel: panel()
        });
        assert!(!m.is_active(panel()));
        assert_eq!(m.discard(panel()), GestureEffect::Noop {
            reason: GestureNoopReason::NoActiveGesture,
        });
    }

    #[test]
    fn concurrent_gestures_do_not_interfere() {
        let mut m = machine();
        let a = PanelId::new(1).unwrap();
        let b = PanelId::new(2).unwrap();
        m.start(a, GestureKind::Move, Frame::new(0.0, 0.0, 4.0, 4.0));
        m.start(
            b,
            GestureKind::Resize {
                handle: ResizeHandle::BOTTOM_RIGHT,
            },
            Frame::new(10.0, 10.0, 4.0, 4.0),
        );
        assert_eq!(m.active_count(), 2);

        let GestureEffect::Live(live_a) = m.update(a, [16.0, 0.0]) else {
            panic!("expected live frame");
        };
        assert_eq!(live_a.panel, a);
        assert_eq!(live_a.origin, [16.0, 0.0]);

        // Finishing a leaves b's session untouched.
        m.finish(a, [16.0, 0.0]);
        assert!(m.is_active(b));
        let GestureEffect::Live(live_b) = m.update(b, [8.0, 8.0]) else {
            panic!("expected live frame");
        };
        assert_eq!(live_b.size, [72.0, 72.0]);
    }
}
