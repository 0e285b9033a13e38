//! Interaction capability

use serde::{Deserialize, Serialize};

/// Something the player can focus with the interaction trace and activate
pub trait Interactable {
    /// Activate the target. Called once per interact press while focused.
    fn interact_with(&mut self);

    /// Gain (`true`) or lose (`false`) focus
    fn set_focus(&mut self, focus: bool);

    /// Short call to action, e.g. "Open"
    fn prompt(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;
}

/// A plain interactable that records what happened to it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractableInfo {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip)]
    focused: bool,
    #[serde(skip)]
    interactions: u32,
}

impl InteractableInfo {
    pub fn new(
        prompt: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            name: name.into(),
            description: description.into(),
            focused: false,
            interactions: 0,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Number of times `interact_with` has been called
    pub fn interactions(&self) -> u32 {
        self.interactions
    }
}

impl Interactable for InteractableInfo {
    fn interact_with(&mut self) {
        self.interactions += 1;
        log::info!("{} {}", self.prompt, self.name);
    }

    fn set_focus(&mut self, focus: bool) {
        self.focused = focus;
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}
