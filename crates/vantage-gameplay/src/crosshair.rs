//! Dynamic crosshair
//!
//! The crosshair grows with the player's horizontal speed, from `min_size`
//! when standing still up to `max_size`.

use crate::host::{CrosshairHost, CrosshairView};
use serde::{Deserialize, Serialize};
use vantage_core::{math, Color, Result, Vec2};
use vantage_runtime::Behavior;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairSettings {
    pub color: Color,
    pub min_size: f32,
    pub max_size: f32,
    /// Speed-to-spread factor
    pub size_scale: f32,
}

impl Default for CrosshairSettings {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            min_size: 96.0,
            max_size: 512.0,
            size_scale: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrosshairController {
    settings: CrosshairSettings,
    size: f32,
}

impl CrosshairController {
    pub fn new(settings: CrosshairSettings) -> Self {
        let size = settings.min_size;
        Self { settings, size }
    }

    pub fn settings(&self) -> &CrosshairSettings {
        &self.settings
    }

    /// Last size pushed to the view
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Paint the crosshair and reset it to its resting size
    pub fn awake(&mut self, view: &mut dyn CrosshairView) {
        self.size = self.settings.min_size;
        view.set_color(self.settings.color);
        view.set_size(Vec2::splat(self.size));
    }

    pub fn crosshair_size(&self, speed: f32) -> f32 {
        let CrosshairSettings {
            min_size,
            max_size,
            size_scale,
            ..
        } = self.settings;
        let t = math::clamp01(speed * size_scale);
        // min > max is tolerated, the upper bound wins
        math::lerp(min_size, max_size, t)
            .max(min_size)
            .min(max_size)
    }
}

impl<H: CrosshairHost + ?Sized> Behavior<H> for CrosshairController {
    fn update(&mut self, host: &mut H, _dt: f64) -> Result<()> {
        let Some(velocity) = host.player_velocity() else {
            return Ok(());
        };
        let speed = Vec2::new(velocity.x, velocity.z).length();
        self.size = self.crosshair_size(speed);
        host.crosshair_view().set_size(Vec2::splat(self.size));
        Ok(())
    }

    fn name(&self) -> &str {
        "crosshair"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::Vec3;

    #[derive(Default)]
    struct TestView {
        color: Option<Color>,
        size: Option<Vec2>,
    }

    impl CrosshairView for TestView {
        fn set_color(&mut self, color: Color) {
            self.color = Some(color);
        }

        fn set_size(&mut self, size: Vec2) {
            self.size = Some(size);
        }
    }

    struct TestHost {
        velocity: Option<Vec3>,
        view: TestView,
    }

    impl CrosshairHost for TestHost {
        fn player_velocity(&self) -> Option<Vec3> {
            self.velocity
        }

        fn crosshair_view(&mut self) -> &mut dyn CrosshairView {
            &mut self.view
        }
    }

    #[test]
    fn test_awake_paints_and_resets() {
        let settings = CrosshairSettings {
            color: Color::RED,
            ..CrosshairSettings::default()
        };
        let mut crosshair = CrosshairController::new(settings);
        let mut view = TestView::default();
        crosshair.awake(&mut view);
        assert_eq!(view.color, Some(Color::RED));
        assert_eq!(view.size, Some(Vec2::splat(96.0)));
    }

    #[test]
    fn test_size_bounds() {
        let crosshair = CrosshairController::default();
        assert_eq!(crosshair.crosshair_size(0.0), 96.0);
        // (max - min) / scale and beyond
        assert_eq!(crosshair.crosshair_size(4160.0), 512.0);
        assert_eq!(crosshair.crosshair_size(10.0), 512.0);
        assert!((crosshair.crosshair_size(5.0) - 304.0).abs() < 1e-3);
    }

    #[test]
    fn test_size_monotonic_in_speed() {
        let crosshair = CrosshairController::default();
        let sizes: Vec<f32> = (0..20)
            .map(|i| crosshair.crosshair_size(i as f32 * 0.75))
            .collect();
        assert!(sizes.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_update_ignores_vertical_speed() {
        let mut crosshair = CrosshairController::default();
        let mut host = TestHost {
            velocity: Some(Vec3::new(0.0, -50.0, 0.0)),
            view: TestView::default(),
        };
        crosshair.update(&mut host, 0.016).unwrap();
        assert_eq!(host.view.size, Some(Vec2::splat(96.0)));

        host.velocity = Some(Vec3::new(3.0, 0.0, 4.0));
        crosshair.update(&mut host, 0.016).unwrap();
        assert!((crosshair.size() - 304.0).abs() < 1e-3);
    }

    #[test]
    fn test_update_without_player_leaves_view() {
        let mut crosshair = CrosshairController::default();
        let mut host = TestHost {
            velocity: None,
            view: TestView::default(),
        };
        crosshair.update(&mut host, 0.016).unwrap();
        assert!(host.view.size.is_none());
    }

    #[test]
    fn test_settings_from_toml() {
        let settings: CrosshairSettings = toml::from_str(
            r#"
            max_size = 256.0
            color = { r = 0.0, g = 1.0, b = 0.0, a = 1.0 }
            "#,
        )
        .unwrap();
        assert_eq!(settings.min_size, 96.0);
        assert_eq!(settings.max_size, 256.0);
        assert_eq!(settings.color, Color::new(0.0, 1.0, 0.0, 1.0));
    }
}
