//! Game events

use vantage_core::EntityId;

/// Notifications raised by a vitals component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VitalsEvent {
    /// Health was set; carries the new ratio and absolute value
    HealthUpdated { ratio: f32, current: f32 },
    /// Damage was applied; carries the health actually removed
    Damaged { amount: f32 },
    /// Healing was applied; carries the health actually restored
    Healed { amount: f32 },
    /// Health reached zero
    Death,
}

/// Events raised by gameplay behaviors for the host to consume
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The interaction trace moved focus from one target to another
    FocusChanged {
        controller: EntityId,
        previous: Option<EntityId>,
        current: Option<EntityId>,
    },
    /// The focused target was activated
    Interacted {
        controller: EntityId,
        target: EntityId,
    },
    /// A vitals component on `entity` changed
    Vitals { entity: EntityId, event: VitalsEvent },
    /// A behavior asked the host to destroy its owner
    DestroyRequested(EntityId),
}
