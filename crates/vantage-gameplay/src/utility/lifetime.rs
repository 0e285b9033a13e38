//! Self-destruct after a fixed time

use crate::host::EntityHost;
use serde::{Deserialize, Serialize};
use vantage_core::Result;
use vantage_runtime::Behavior;

const MIN_LIFETIME: f32 = 1.0;
const MAX_LIFETIME: f32 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeSettings {
    /// Seconds until the owner is destroyed, `[1, 100]`
    pub lifetime: f32,
}

impl Default for LifetimeSettings {
    fn default() -> Self {
        Self { lifetime: 10.0 }
    }
}

/// Destroys its owner once `lifetime` seconds have passed
#[derive(Debug, Clone)]
pub struct Lifetime {
    remaining: f32,
    expired: bool,
}

impl Lifetime {
    pub fn new(settings: &LifetimeSettings) -> Self {
        let lifetime = if settings.lifetime.is_nan() {
            MIN_LIFETIME
        } else {
            settings.lifetime.clamp(MIN_LIFETIME, MAX_LIFETIME)
        };
        if lifetime != settings.lifetime {
            log::warn!(
                "lifetime {} out of range, using {}",
                settings.lifetime,
                lifetime
            );
        }
        Self {
            remaining: lifetime,
            expired: false,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

impl<H: EntityHost + ?Sized> Behavior<H> for Lifetime {
    fn update(&mut self, host: &mut H, dt: f64) -> Result<()> {
        if self.expired {
            return Ok(());
        }
        self.remaining -= dt as f32;
        if self.remaining <= 0.0 {
            self.expired = true;
            log::info!("Lifetime of {} expired", host.owner());
            host.destroy();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "lifetime"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility::testing::TestEntity;

    #[test]
    fn test_destroys_exactly_once() {
        let mut lifetime = Lifetime::new(&LifetimeSettings { lifetime: 1.0 });
        let mut host = TestEntity::new();

        for _ in 0..3 {
            lifetime.update(&mut host, 0.25).unwrap();
        }
        assert_eq!(host.destroy_calls, 0);
        assert!((lifetime.remaining() - 0.25).abs() < 1e-6);

        for _ in 0..10 {
            lifetime.update(&mut host, 0.25).unwrap();
        }
        assert_eq!(host.destroy_calls, 1);
        assert!(lifetime.is_expired());
        assert_eq!(lifetime.remaining(), 0.0);
    }

    #[test]
    fn test_lifetime_clamped() {
        assert_eq!(
            Lifetime::new(&LifetimeSettings { lifetime: 0.1 }).remaining(),
            1.0
        );
        assert_eq!(
            Lifetime::new(&LifetimeSettings { lifetime: 500.0 }).remaining(),
            100.0
        );
        assert_eq!(
            Lifetime::new(&LifetimeSettings { lifetime: f32::NAN }).remaining(),
            1.0
        );
        assert_eq!(Lifetime::new(&LifetimeSettings::default()).remaining(), 10.0);
    }
}
