//! The single-model scene: one model, one directional light, a background
//! colour and an optional environment map.

pub mod bounds;
pub mod environment;
pub mod loader;
pub mod model;

use glam::Vec3;

use self::bounds::{Bounded, BoundingBox};
use self::environment::EnvironmentMap;
use self::model::Model;
use crate::options::Options;

// ---------------------------------------------------------------------------
// Light
// ---------------------------------------------------------------------------

/// Directional light shining from `direction` toward the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the scene toward the light.
    pub direction: Vec3,
    /// Linear RGB colour.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-1.0, 2.0, 4.0).normalize(),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

impl DirectionalLight {
    /// Light placed at `position`, aimed at the origin.
    #[must_use]
    pub fn from_position(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            direction: position.normalize_or(Vec3::Y),
            color,
            intensity,
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Everything the renderer draws.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Linear RGB clear colour.
    pub background: [f32; 3],
    /// The key light.
    pub light: DirectionalLight,
    model: Option<Model>,
    environment: Option<EnvironmentMap>,
    /// Bumped whenever the model or environment changes.
    generation: u64,
}

impl Scene {
    /// Empty scene configured from options.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let mut scene = Self::default();
        scene.apply_options(options);
        scene
    }

    /// Refresh background and light from options.
    pub fn apply_options(&mut self, options: &Options) {
        let lighting = &options.lighting;
        self.background = options.display.background_linear();
        self.light = DirectionalLight::from_position(
            Vec3::from_array(lighting.light_position),
            Vec3::from_array(lighting.light_color),
            lighting.light_intensity,
        );
    }

    /// The loaded model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Replace the model. The scene holds at most one.
    pub fn set_model(&mut self, model: Model) -> Option<Model> {
        self.generation += 1;
        self.model.replace(model)
    }

    /// The environment map, if one was loaded.
    #[must_use]
    pub fn environment(&self) -> Option<&EnvironmentMap> {
        self.environment.as_ref()
    }

    /// Replace the environment map.
    pub fn set_environment(&mut self, environment: EnvironmentMap) {
        self.generation += 1;
        self.environment = Some(environment);
    }

    /// Monotonic change counter for model and environment.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Bounded for Scene {
    fn bounding_box(&self) -> Option<BoundingBox> {
        self.model.as_ref().and_then(Bounded::bounding_box)
    }
}
