use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Directional light and image-based lighting parameters.
pub struct LightingOptions {
    /// Linear RGB colour of the directional light.
    pub light_color: [f32; 3],
    /// Directional light intensity.
    pub light_intensity: f32,
    /// Position the light shines from, toward the origin.
    pub light_position: [f32; 3],
    /// Scale of the diffuse environment contribution.
    pub environment_strength: f32,
    /// Surface roughness (0.05 = glossy, 1.0 = matte).
    pub roughness: f32,
    /// Surface metalness.
    pub metalness: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            light_color: [1.0, 1.0, 1.0],
            light_intensity: 1.0,
            light_position: [-1.0, 2.0, 4.0],
            environment_strength: 1.0,
            roughness: 0.5,
            metalness: 0.0,
        }
    }
}
