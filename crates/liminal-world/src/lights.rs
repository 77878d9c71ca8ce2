use liminal_core::types::LightHandle;

/// Resting intensity of a freshly registered light.
pub const BASE_LIGHT_INTENSITY: f32 = 0.7;

/// A light currently owned by a loaded chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedLight {
    pub handle: LightHandle,
    pub intensity: f32,
}

/// Every light belonging to a loaded chunk, in registration order.
///
/// Entries are added when their chunk loads and removed when it unloads.
/// Animation code iterates the registry each frame and writes intensities.
#[derive(Debug, Default)]
pub struct LightRegistry {
    lights: Vec<TrackedLight>,
}

impl LightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a light. Registering the same handle twice is a no-op.
    pub fn register(&mut self, handle: LightHandle) {
        if self.contains(handle) {
            return;
        }
        self.lights.push(TrackedLight {
            handle,
            intensity: BASE_LIGHT_INTENSITY,
        });
    }

    /// Remove a light. Returns whether it was present.
    pub fn remove(&mut self, handle: LightHandle) -> bool {
        let before = self.lights.len();
        self.lights.retain(|l| l.handle != handle);
        self.lights.len() != before
    }

    pub fn contains(&self, handle: LightHandle) -> bool {
        self.lights.iter().any(|l| l.handle == handle)
    }

    pub fn get(&self, handle: LightHandle) -> Option<&TrackedLight> {
        self.lights.iter().find(|l| l.handle == handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedLight> {
        self.lights.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TrackedLight> {
        self.lights.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_remove() {
        let mut registry = LightRegistry::new();
        registry.register(LightHandle(1));
        registry.register(LightHandle(2));
        assert_eq!(registry.len(), 2);
        assert!(registry.remove(LightHandle(1)));
        assert!(!registry.remove(LightHandle(1)));
        assert!(!registry.contains(LightHandle(1)));
        assert!(registry.contains(LightHandle(2)));
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut registry = LightRegistry::new();
        registry.register(LightHandle(5));
        registry.register(LightHandle(5));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = LightRegistry::new();
        for i in [3, 1, 2] {
            registry.register(LightHandle(i));
        }
        registry.remove(LightHandle(1));
        let order: Vec<u64> = registry.iter().map(|l| l.handle.0).collect();
        assert_eq!(order, vec![3, 2]);
    }

    #[test]
    fn test_new_lights_start_at_base_intensity() {
        let mut registry = LightRegistry::new();
        registry.register(LightHandle(9));
        let light = registry.get(LightHandle(9)).expect("registered");
        assert_eq!(light.intensity, BASE_LIGHT_INTENSITY);
    }
}
