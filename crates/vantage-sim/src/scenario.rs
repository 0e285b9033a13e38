//! Scenario file format and loading
//!
//! A scenario is a TOML file describing the player, the scene entities, and
//! a timeline of input spans replayed frame by frame.

use crate::body::BodySettings;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use vantage_core::{Result, VantageError, Vec2, Vec3};
use vantage_gameplay::utility::{
    LifetimeSettings, LookAtSettings, SimpleMoveSettings, SimpleRotateSettings,
};
use vantage_gameplay::{CrosshairSettings, InteractableInfo, PlayerSettings, VitalsSettings};
use vantage_runtime::{ActionKind, InputState};

/// Root structure of a scenario TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub scenario: ScenarioMetadata,
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub body: BodySettings,
    /// Player vitals; omit to run without a health component
    #[serde(default)]
    pub vitals: Option<VitalsSettings>,
    #[serde(default)]
    pub crosshair: CrosshairSettings,
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityDef>,
    #[serde(default, rename = "input")]
    pub inputs: Vec<InputSpan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Fixed frame delta in seconds
    #[serde(default = "default_dt")]
    pub dt: f64,
}

fn default_name() -> String {
    "untitled".to_string()
}

fn default_frames() -> u64 {
    120
}

fn default_dt() -> f64 {
    1.0 / 60.0
}

impl Default for ScenarioMetadata {
    fn default() -> Self {
        Self {
            name: default_name(),
            frames: default_frames(),
            dt: default_dt(),
        }
    }
}

/// An entity placed in the sandbox
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub position: Vec3,
    /// Euler angles in degrees
    #[serde(default)]
    pub rotation: Vec3,
    /// Box collider half extents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collider: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactable: Option<InteractableInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<LifetimeSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_move: Option<SimpleMoveSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_rotate: Option<SimpleRotateSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_at: Option<LookAtDef>,
}

/// Look-at behavior with its target given by entity name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookAtDef {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(flatten)]
    pub settings: LookAtSettings,
}

/// Input applied on every frame in `[start, end)`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSpan {
    pub start: u64,
    pub end: u64,
    /// Movement axis, x right and y forward
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#move: Option<Vec2>,
    /// Look delta per frame, x right and y up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look: Option<Vec2>,
    /// Buttons held for the whole span
    #[serde(default)]
    pub hold: Vec<String>,
}

impl InputSpan {
    pub fn is_active(&self, frame: u64) -> bool {
        self.start <= frame && frame < self.end
    }
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a scenario from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        let meta = &self.scenario;
        if meta.dt.is_nan() || meta.dt <= 0.0 {
            return Err(VantageError::ValueOutOfRange {
                field: "scenario.dt".into(),
                min: f64::MIN_POSITIVE,
                max: 0.25,
                value: meta.dt,
            });
        }

        let mut names = HashSet::new();
        for entity in &self.entities {
            if entity.name.is_empty() {
                return Err(VantageError::ScenarioError("entity without a name".to_string()));
            }
            if !names.insert(entity.name.as_str()) {
                return Err(VantageError::DuplicateEntityName(entity.name.clone()));
            }
        }
        for entity in &self.entities {
            if let Some(parent) = &entity.parent {
                if !names.contains(parent.as_str()) {
                    return Err(VantageError::ScenarioError(format!(
                        "entity '{}' has unknown parent '{}'",
                        entity.name, parent
                    )));
                }
            }
        }

        let input = InputState::new();
        let buttons: Vec<&str> = input
            .action_names()
            .into_iter()
            .filter(|name| input.kind(name) == Some(ActionKind::Button))
            .collect();
        for span in &self.inputs {
            if span.start >= span.end {
                return Err(VantageError::ScenarioError(format!(
                    "input span [{}, {}) is empty",
                    span.start, span.end
                )));
            }
            for button in &span.hold {
                if !buttons.contains(&button.as_str()) {
                    return Err(VantageError::ScenarioError(format!(
                        "unknown button '{}', expected one of {:?}",
                        button, buttons
                    )));
                }
            }
        }
        Ok(())
    }

    /// Sum of the movement axes active on `frame`
    pub fn move_at(&self, frame: u64) -> Vec2 {
        self.inputs
            .iter()
            .filter(|span| span.is_active(frame))
            .filter_map(|span| span.r#move)
            .sum()
    }

    /// Sum of the look deltas active on `frame`
    pub fn look_delta_at(&self, frame: u64) -> Vec2 {
        self.inputs
            .iter()
            .filter(|span| span.is_active(frame))
            .filter_map(|span| span.look)
            .sum()
    }

    /// Buttons held on `frame`, sorted and deduplicated
    pub fn held_at(&self, frame: u64) -> Vec<&str> {
        let mut held: Vec<&str> = self
            .inputs
            .iter()
            .filter(|span| span.is_active(frame))
            .flat_map(|span| span.hold.iter().map(String::as_str))
            .collect();
        held.sort_unstable();
        held.dedup();
        held
    }
}
