//! Bounded health with change notifications

use serde::{Deserialize, Serialize};
use vantage_core::EntityId;
use vantage_runtime::{EventBus, VitalsEvent};

const MIN_MAX_HEALTH: f32 = 1.0;
const MAX_MAX_HEALTH: f32 = 999.0;

/// Capability of anything that can be damaged and healed
pub trait Vitals {
    /// Restore health to its maximum
    fn reset_vitals(&mut self);

    /// Set health directly, clamped to `[0, max]`
    fn set_health(&mut self, value: f32);

    /// Apply damage. Ignored for non-positive amounts, a missing causer, or
    /// when already dead.
    fn take_damage(&mut self, amount: f32, causer: Option<EntityId>);

    /// Apply healing. Ignored for non-positive amounts, a missing causer, or
    /// when dead or already full.
    fn take_healing(&mut self, amount: f32, causer: Option<EntityId>);

    /// Current over max, 0 when max is 0
    fn health_ratio(&self) -> f32;

    fn current_health(&self) -> f32;

    fn max_health(&self) -> f32;

    fn is_dead(&self) -> bool {
        self.current_health() <= 0.0
    }

    fn is_full_health(&self) -> bool {
        self.current_health() >= self.max_health()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsSettings {
    /// Upper bound, also the starting health
    pub max_health: f32,
}

impl Default for VitalsSettings {
    fn default() -> Self {
        Self { max_health: 100.0 }
    }
}

/// Health holder that queues a `VitalsEvent` for every change
#[derive(Debug)]
pub struct VitalsComponent {
    max_health: f32,
    current_health: f32,
    events: EventBus<VitalsEvent>,
}

impl Default for VitalsComponent {
    fn default() -> Self {
        Self::new(&VitalsSettings::default())
    }
}

impl VitalsComponent {
    /// Create at full health. `max_health` is clamped to `[1, 999]`.
    pub fn new(settings: &VitalsSettings) -> Self {
        let max_health = if settings.max_health.is_nan() {
            log::warn!("max_health is NaN, using {}", MIN_MAX_HEALTH);
            MIN_MAX_HEALTH
        } else {
            settings.max_health.clamp(MIN_MAX_HEALTH, MAX_MAX_HEALTH)
        };

        let mut vitals = Self {
            max_health,
            current_health: 0.0,
            events: EventBus::new(),
        };
        vitals.set_health(max_health);
        vitals
    }

    fn can_be_damaged(&self) -> bool {
        self.current_health > 0.0
    }

    fn can_be_healed(&self) -> bool {
        self.current_health > 0.0 && self.current_health < self.max_health
    }

    /// Notifications queued since the last drain, oldest first
    pub fn pending_events(&self) -> &[VitalsEvent] {
        self.events.pending()
    }

    pub fn drain_events(&mut self) -> Vec<VitalsEvent> {
        self.events.drain()
    }
}

impl Vitals for VitalsComponent {
    fn reset_vitals(&mut self) {
        self.set_health(self.max_health);
    }

    fn set_health(&mut self, value: f32) {
        self.current_health = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.max_health)
        };

        let ratio = self.health_ratio();
        log::debug!(
            "Health updated: {:.1}/{:.1} ({:.2})",
            self.current_health,
            self.max_health,
            ratio
        );
        self.events.push(VitalsEvent::HealthUpdated {
            ratio,
            current: self.current_health,
        });

        if self.is_dead() {
            log::info!("Vitals depleted");
            self.events.push(VitalsEvent::Death);
        }
    }

    fn take_damage(&mut self, amount: f32, causer: Option<EntityId>) {
        let Some(causer) = causer else {
            return;
        };
        if amount.is_nan() || amount <= 0.0 || !self.can_be_damaged() {
            return;
        }

        let before = self.current_health;
        log::debug!("{} deals {:.1} damage", causer, amount);
        self.events.push(VitalsEvent::Damaged {
            amount: amount.min(before),
        });
        self.set_health(before - amount);
    }

    fn take_healing(&mut self, amount: f32, causer: Option<EntityId>) {
        let Some(causer) = causer else {
            return;
        };
        if amount.is_nan() || amount <= 0.0 || !self.can_be_healed() {
            return;
        }

        let before = self.current_health;
        log::debug!("{} heals {:.1}", causer, amount);
        self.events.push(VitalsEvent::Healed {
            amount: amount.min(self.max_health - before),
        });
        self.set_health(before + amount);
    }

    fn health_ratio(&self) -> f32 {
        if self.max_health != 0.0 {
            self.current_health / self.max_health
        } else {
            0.0
        }
    }

    fn current_health(&self) -> f32 {
        self.current_health
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }
}
