//! Host-framework coupling.
//!
//! The emitter does not reproduce a scene-graph event-subscription
//! hierarchy. Instead it exposes a small capability trait the host invokes
//! with direct dispatch from its per-frame update pass: attach once, toggle
//! on enable/disable changes, advance every frame.

/// Opaque handle to a host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

/// Capability interface a host scene drives each frame.
pub trait SceneComponent {
    /// Called once when the component joins a scene.
    fn on_attach(&mut self, scene: SceneHandle);
    /// Called when the host's effective enabled state changes.
    fn on_enabled_changed(&mut self, enabled: bool);
    /// Called once per frame with the elapsed seconds.
    fn advance(&mut self, dt: f32);
}

impl SceneComponent for crate::ParticleEmitter {
    fn on_attach(&mut self, scene: SceneHandle) {
        self.attach(scene);
    }

    fn on_enabled_changed(&mut self, enabled: bool) {
        self.set_enabled(enabled);
    }

    fn advance(&mut self, dt: f32) {
        crate::ParticleEmitter::advance(self, dt);
    }
}
