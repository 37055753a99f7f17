use glam::{Mat4, Vec2, Vec3};
use log::debug;

use super::{
    Mesh, Node, PerspectiveCamera, Points, RenderContext, Renderer, RendererOptions, Scene,
    SurfaceId,
};
use crate::core::{Canvas, DrawOp};
use crate::error::{Result, SceneError};
use crate::math::Size;

/// Rasterizes wireframe meshes and point clouds into an RGBA canvas
pub struct SoftwareRenderer {
    id: SurfaceId,
    options: RendererOptions,
    size: Size,
    pixel_ratio: f32,
    canvas: Canvas,
    frames: u64,
}

impl SoftwareRenderer {
    pub fn new(id: SurfaceId, options: RendererOptions) -> Self {
        Self {
            id,
            options,
            size: Size::default(),
            pixel_ratio: 1.0,
            canvas: Canvas::new(0, 0),
            frames: 0,
        }
    }

    /// Drawing buffer dimensions: CSS size times pixel ratio, collapsed sizes clamp to 0
    pub fn buffer_size(&self) -> (u32, u32) {
        let scale = |v: f32| (v * self.pixel_ratio).floor().max(0.0) as u32;
        (scale(self.size.width), scale(self.size.height))
    }

    /// Frames rendered since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn resize_buffer(&mut self) {
        let (w, h) = self.buffer_size();
        self.canvas.resize(w, h);
    }

    /// Clip-space to pixel coordinates; None behind the near plane
    fn project(mvp: &Mat4, p: Vec3, near: f32, buffer: (u32, u32)) -> Option<(Vec2, f32)> {
        let clip = *mvp * p.extend(1.0);
        if clip.w <= near {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x + 1.0) * 0.5 * buffer.0 as f32;
        let y = (1.0 - ndc.y) * 0.5 * buffer.1 as f32;
        Some((Vec2::new(x, y), clip.w))
    }

    fn draw_mesh(&mut self, mesh: &Mesh, view_proj: &Mat4, near: f32) {
        let buffer = self.canvas.dimensions();
        let mvp = *view_proj * mesh.transform.matrix();
        let projected: Vec<Option<(Vec2, f32)>> = mesh
            .geometry
            .vertices()
            .iter()
            .map(|v| Self::project(&mvp, *v, near, buffer))
            .collect();

        let color = mesh.material.color.to_rgba8(mesh.material.opacity);
        if mesh.material.wireframe {
            for [a, b] in mesh.geometry.edges() {
                if let (Some((pa, _)), Some((pb, _))) = (projected[*a as usize], projected[*b as usize]) {
                    self.canvas.execute(&DrawOp::Line {
                        x1: pa.x,
                        y1: pa.y,
                        x2: pb.x,
                        y2: pb.y,
                        color,
                        smooth: self.options.antialias,
                    });
                }
            }
        } else {
            // Solid meshes are drawn as vertex dots
            for (p, _) in projected.iter().flatten() {
                self.canvas.execute(&DrawOp::Pixel { x: p.x as i32, y: p.y as i32, color });
            }
        }
    }

    fn draw_points(&mut self, points: &Points, view_proj: &Mat4, near: f32) {
        let buffer = self.canvas.dimensions();
        let mvp = *view_proj * points.transform.matrix();
        let material = &points.material;
        let color = material.color.to_rgba8(material.opacity);
        let half_height = buffer.1 as f32 * 0.5;

        for position in &points.positions {
            let Some((p, depth)) = Self::project(&mvp, *position, near, buffer) else {
                continue;
            };
            let diameter = if material.size_attenuation {
                material.size * half_height / depth
            } else {
                material.size * self.pixel_ratio
            };
            self.canvas.execute(&DrawOp::FilledCircle {
                cx: p.x.round() as i32,
                cy: p.y.round() as i32,
                radius: (diameter * 0.5).max(0.5),
                color,
            });
        }
    }
}

impl Renderer for SoftwareRenderer {
    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.resize_buffer();
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        self.resize_buffer();
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()> {
        let clear = if self.options.alpha { [0, 0, 0, 0] } else { [0, 0, 0, 255] };
        self.canvas.execute(&DrawOp::Clear(clear));

        let view_proj = camera.view_projection();
        for node in scene.nodes() {
            match node {
                Node::Mesh(mesh) => self.draw_mesh(mesh, &view_proj, camera.near),
                Node::Points(points) => self.draw_points(points, &view_proj, camera.near),
            }
        }

        self.frames += 1;
        Ok(())
    }

    fn surface_id(&self) -> SurfaceId {
        self.id
    }

    fn output(&self) -> Option<&Canvas> {
        Some(&self.canvas)
    }
}

/// Hands out software renderers, optionally capped like a browser's
/// limit on live drawing contexts
#[derive(Debug, Default)]
pub struct SoftwareContext {
    issued: u32,
    limit: Option<u32>,
}

impl SoftwareContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse renderers after `limit` have been issued
    pub fn with_limit(limit: u32) -> Self {
        Self { issued: 0, limit: Some(limit) }
    }

    pub fn issued(&self) -> u32 {
        self.issued
    }
}

impl RenderContext for SoftwareContext {
    fn create_renderer(&mut self, options: &RendererOptions) -> Result<Box<dyn Renderer>> {
        if let Some(limit) = self.limit {
            if self.issued >= limit {
                return Err(SceneError::ContextRefused {
                    reason: format!("context limit of {limit} reached"),
                });
            }
        }
        let id = SurfaceId(self.issued);
        self.issued += 1;
        debug!("software renderer {} created ({:?})", id.0, options);
        Ok(Box::new(SoftwareRenderer::new(id, *options)))
    }
}
