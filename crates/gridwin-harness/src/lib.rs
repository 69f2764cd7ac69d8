#![forbid(unsafe_code)]

//! Scenario replay for the gesture engine.
//!
//! A scenario is a JSON document holding a layout configuration and a
//! sequence of pointer updates. Replaying it drives a fresh
//! [`GridEngine`] through every update and records what happened at
//! each step, which makes gesture bugs reproducible from a single
//! file.

use std::fmt;

use gridwin_core::geometry::Frame;
use gridwin_layout::{
    ConfigError, EngineError, GestureEffect, GridEngine, LayoutCommand, LayoutConfig, PanelId,
    PointerUpdate,
};
use serde::{Deserialize, Serialize};

/// One replayable session: starting layout plus the pointer stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: LayoutConfig,
    pub updates: Vec<PointerUpdate>,
}

/// What one pointer update produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    #[serde(flatten)]
    pub effect: GestureEffect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied: Option<LayoutCommand>,
}

/// Committed state of one panel after the replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalPanel {
    pub panel: PanelId,
    #[serde(flatten)]
    pub frame: Frame,
}

/// Full replay output: per-step records and the final layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub steps: Vec<StepRecord>,
    pub layout: Vec<FinalPanel>,
}

/// Replay failure, pinned to the step that caused it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReplayError {
    Config(ConfigError),
    Engine { step: usize, source: EngineError },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid scenario config: {err}"),
            Self::Engine { step, source } => write!(f, "update {step} failed: {source}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Engine { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for ReplayError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Replay a scenario against a fresh engine.
pub fn replay(scenario: &Scenario) -> Result<Replay, ReplayError> {
    let mut engine: GridEngine = scenario.config.build()?;
    let mut steps = Vec::with_capacity(scenario.updates.len());
    for (step, update) in scenario.updates.iter().enumerate() {
        let out = engine
            .handle_pointer(update)
            .map_err(|source| ReplayError::Engine { step, source })?;
        steps.push(StepRecord {
            step,
            effect: out.effect,
            applied: out.applied,
        });
    }
    let layout = engine
        .store()
        .panels()
        .map(|(panel, frame)| FinalPanel { panel, frame })
        .collect();
    Ok(Replay { steps, layout })
}
