use glam::Vec3;
use log::debug;
use rand::Rng;

use super::record::SceneRecord;
use crate::config::SceneConfig;
use crate::engine::{
    BasicMaterial, Mesh, Node, PerspectiveCamera, Points, PointsMaterial, PolyhedronGeometry,
    RenderContext, RendererOptions, Scene, Transform,
};
use crate::error::{Result, SceneError};
use crate::host::{ElementId, Page};

/// Builds one isolated scene per container
#[derive(Debug, Clone)]
pub struct SceneFactory {
    config: SceneConfig,
}

impl SceneFactory {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Provision the scene for `container` and attach its surface to it.
    ///
    /// Only renderer acquisition can fail; collapsed containers still get a
    /// usable camera and a zero-area drawing buffer.
    pub fn build(
        &self,
        page: &mut dyn Page,
        container: ElementId,
        context: &mut dyn RenderContext,
        rng: &mut impl Rng,
    ) -> Result<SceneRecord> {
        let size = page.client_size(container);
        let cfg = &self.config;

        let mut camera = PerspectiveCamera::new(cfg.camera.fov, size.aspect(), cfg.camera.near, cfg.camera.far);
        camera.position.z = cfg.camera.distance;

        let options = RendererOptions {
            alpha: true,
            antialias: cfg.renderer.antialias,
        };
        let mut renderer = context
            .create_renderer(&options)
            .map_err(|e| SceneError::ContextUnavailable {
                container,
                reason: e.to_string(),
            })?;
        renderer.set_size(size);
        renderer.set_pixel_ratio(page.device_pixel_ratio().min(cfg.renderer.max_pixel_ratio));
        page.append_surface(container, renderer.surface_id());

        let mut scene = Scene::new();
        let mesh = scene.add(Node::Mesh(Mesh {
            geometry: PolyhedronGeometry::icosahedron(cfg.mesh.radius, cfg.mesh.detail),
            material: BasicMaterial {
                color: cfg.mesh.color,
                wireframe: true,
                transparent: true,
                opacity: cfg.mesh.rest_opacity,
            },
            transform: Transform::default(),
        }));
        let particles = scene.add(Node::Points(Points {
            positions: scatter(rng, cfg.particles.count, cfg.particles.spread),
            material: PointsMaterial {
                color: cfg.particles.color,
                size: cfg.particles.size,
                size_attenuation: true,
                transparent: true,
                opacity: cfg.particles.rest_opacity,
            },
            transform: Transform::default(),
        }));

        debug!(
            "container {container}: {}x{} scene on surface {}",
            size.width,
            size.height,
            renderer.surface_id().0
        );

        Ok(SceneRecord {
            scene,
            camera,
            renderer,
            mesh,
            particles,
            container,
            visible: false,
            hover: false,
            rotation_speed: cfg.motion.rest_speed,
        })
    }
}

/// `count` points uniform in the axis-aligned cube of side `spread` around the origin
fn scatter(rng: &mut impl Rng, count: usize, spread: f32) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
            )
        })
        .collect()
}
