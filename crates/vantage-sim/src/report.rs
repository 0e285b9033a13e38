//! Run summary

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Focus moved on `frame`; `target` is `None` when focus was lost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusRecord {
    pub frame: u64,
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub frame: u64,
    pub target: String,
}

/// What happened during a scenario run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub scenario: String,
    pub frames: u64,
    /// Simulated seconds
    pub elapsed: f64,
    pub final_position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub grounded: bool,
    pub health: Option<f32>,
    pub died_at: Option<u64>,
    pub damage_taken: f32,
    pub healing_received: f32,
    pub focused: Option<String>,
    pub focus_changes: Vec<FocusRecord>,
    pub interactions: Vec<InteractionRecord>,
    pub destroyed: Vec<String>,
    pub field_of_view: Option<f32>,
    pub crosshair_size: f32,
}

impl RunReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable summary, one fact per line
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let [x, y, z] = self.final_position;
        let _ = writeln!(out, "Scenario: {}", self.scenario);
        let _ = writeln!(out, "Frames: {} ({:.2}s)", self.frames, self.elapsed);
        let _ = writeln!(out, "Position: ({:.2}, {:.2}, {:.2})", x, y, z);
        let _ = writeln!(out, "Yaw/pitch: {:.1} / {:.1}", self.yaw, self.pitch);
        match self.health {
            Some(health) => {
                let _ = writeln!(out, "Health: {:.1}", health);
            }
            None => {
                let _ = writeln!(out, "Health: none");
            }
        }
        if let Some(frame) = self.died_at {
            let _ = writeln!(out, "Died at frame {}", frame);
        }
        if let Some(fov) = self.field_of_view {
            let _ = writeln!(out, "Field of view: {:.1}", fov);
        }
        let _ = writeln!(out, "Crosshair: {:.1}", self.crosshair_size);
        let _ = writeln!(
            out,
            "Focus: {} ({} changes)",
            self.focused.as_deref().unwrap_or("-"),
            self.focus_changes.len()
        );
        for record in &self.interactions {
            let _ = writeln!(out, "  frame {}: interacted with {}", record.frame, record.target);
        }
        if !self.destroyed.is_empty() {
            let _ = writeln!(out, "Destroyed: {}", self.destroyed.join(", "));
        }
        out
    }
}
