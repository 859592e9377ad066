//! Scripted hand input for headless demos and integration tests.

use anyhow::Result;
use glam::Vec3;
use handcast_input::{GripState, HandFrame, HandTracker};
use serde::Deserialize;
use std::{fs, path::Path};

fn default_tracked() -> bool {
    true
}

/// One timed step of scripted hand motion.
#[derive(Debug, Clone, Deserialize)]
pub struct HandStep {
    /// Ticks this step lasts.
    pub duration_ticks: u64,
    /// Hand position while the step runs.
    #[serde(default)]
    pub x: f32,
    /// Hand position while the step runs.
    #[serde(default)]
    pub y: f32,
    /// Hand position while the step runs.
    #[serde(default)]
    pub z: f32,
    /// Whether the hand is closed during the step.
    #[serde(default)]
    pub closed: bool,
    /// False simulates tracking loss for the step.
    #[serde(default = "default_tracked")]
    pub tracked: bool,
}

impl HandStep {
    /// Position encoded by this step.
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    steps: Vec<HandStep>,
}

/// Deterministic [`HandTracker`] replaying a step list, one sample per
/// tick. Past the end of the script the hand reads as lost.
#[derive(Debug)]
pub struct ScriptedHand {
    steps: Vec<HandStep>,
    index: usize,
    ticks_in_step: u64,
}

impl ScriptedHand {
    /// Build a tracker from in-memory steps.
    pub fn from_steps(steps: Vec<HandStep>) -> Self {
        Self {
            steps,
            index: 0,
            ticks_in_step: 0,
        }
    }

    /// Load a JSON script (`{"steps": [...]}`) from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let file: ScriptFile = serde_json::from_str(&contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("hand script contains no steps");
        }
        Ok(Self::from_steps(file.steps))
    }

    /// Whether the script has steps left to play.
    pub fn finished(&self) -> bool {
        self.index >= self.steps.len()
    }
}

impl HandTracker for ScriptedHand {
    fn sample(&mut self) -> Option<HandFrame> {
        while self.index < self.steps.len()
            && self.ticks_in_step >= self.steps[self.index].duration_ticks
        {
            self.ticks_in_step = 0;
            self.index += 1;
        }

        let step = self.steps.get(self.index)?;
        self.ticks_in_step += 1;

        if !step.tracked {
            return None;
        }
        Some(HandFrame {
            position: step.position(),
            grip: if step.closed {
                GripState::Closed
            } else {
                GripState::Open
            },
        })
    }
}
