//! Behavior trait

use vantage_core::Result;

/// A component ticked by the host's frame loop
///
/// `H` is the collaborator the behavior needs. The host passes it in on
/// every call, so behaviors never hold references into the world. `update`
/// runs for every behavior before any `late_update`.
pub trait Behavior<H: ?Sized> {
    /// Called when the behavior becomes active (acquire input, reset state)
    fn on_enable(&mut self, _host: &mut H) {}

    /// Called when the behavior is deactivated (release input, cancel transitions)
    fn on_disable(&mut self, _host: &mut H) {}

    /// Called once per frame
    fn update(&mut self, host: &mut H, dt: f64) -> Result<()>;

    /// Called once per frame after every `update`
    fn late_update(&mut self, _host: &mut H, _dt: f64) -> Result<()> {
        Ok(())
    }

    /// Human-readable name for this behavior
    fn name(&self) -> &str;
}
