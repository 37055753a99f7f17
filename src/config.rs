use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::MAX_DETAIL;
use crate::error::{Result, SceneError};
use crate::math::Color;

/// Marker class of the elements that host a scene
pub const CONTAINER_CLASS: &str = "three-canvas-container";
/// Marker class of the card ancestor that receives pointer events
pub const CARD_CLASS: &str = "glass";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin along +z
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 70.0,
            near: 0.1,
            far: 100.0,
            distance: 3.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Upper bound applied to the device pixel ratio
    pub max_pixel_ratio: f32,
    pub antialias: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            antialias: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub radius: f32,
    /// Icosahedron subdivision level
    pub detail: u32,
    pub color: Color,
    pub rest_opacity: f32,
    pub hover_opacity: f32,
    pub hover_scale: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            radius: 1.5,
            detail: 1,
            color: Color::from_hex(0x22c55e),
            rest_opacity: 0.15,
            hover_opacity: 0.4,
            hover_scale: 1.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Side length of the cube the particles are scattered in
    pub spread: f32,
    pub size: f32,
    pub color: Color,
    pub rest_opacity: f32,
    pub hover_opacity: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 20,
            spread: 4.0,
            size: 0.05,
            color: Color::from_hex(0x4ade80),
            rest_opacity: 0.4,
            hover_opacity: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Per-frame rotation increment at rest
    pub rest_speed: f32,
    /// Per-frame rotation increment while hovered
    pub hover_speed: f32,
    /// Tilt applied per unit of normalized pointer offset
    pub tilt_factor: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rest_speed: 0.005,
            hover_speed: 0.02,
            tilt_factor: 0.5,
        }
    }
}

/// Every tunable of the card scenes, defaults included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub renderer: RendererConfig,
    pub mesh: MeshConfig,
    pub particles: ParticleConfig,
    pub motion: MotionConfig,
    /// Intersection ratio below which a container counts as hidden
    pub visibility_threshold: f32,
    pub container_class: String,
    pub card_class: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            renderer: RendererConfig::default(),
            mesh: MeshConfig::default(),
            particles: ParticleConfig::default(),
            motion: MotionConfig::default(),
            visibility_threshold: 0.1,
            container_class: CONTAINER_CLASS.to_string(),
            card_class: CARD_CLASS.to_string(),
        }
    }
}

impl SceneConfig {
    /// Load a JSON config file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: SceneConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(SceneError::Config(format!("fov {} out of (0, 180)", camera.fov)));
        }
        if camera.near <= 0.0 || camera.far <= camera.near {
            return Err(SceneError::Config(format!(
                "clip planes near={} far={} must satisfy 0 < near < far",
                camera.near, camera.far
            )));
        }
        if !(self.visibility_threshold > 0.0 && self.visibility_threshold <= 1.0) {
            return Err(SceneError::Config(format!(
                "visibility threshold {} out of (0, 1]",
                self.visibility_threshold
            )));
        }
        if self.renderer.max_pixel_ratio <= 0.0 {
            return Err(SceneError::Config("max pixel ratio must be positive".to_string()));
        }
        if self.mesh.detail > MAX_DETAIL {
            return Err(SceneError::Config(format!(
                "mesh detail {} above {MAX_DETAIL}",
                self.mesh.detail
            )));
        }
        if self.card_class.is_empty() || self.container_class.is_empty() {
            return Err(SceneError::Config("marker classes must not be empty".to_string()));
        }
        if self.card_class == self.container_class {
            return Err(SceneError::Config(format!(
                "card and container share the class {:?}",
                self.card_class
            )));
        }
        Ok(())
    }
}
