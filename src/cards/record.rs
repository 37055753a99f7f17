use std::fmt;

use crate::engine::{Mesh, NodeId, PerspectiveCamera, Points, Renderer, Scene};
use crate::host::ElementId;

/// Position of a container in discovery order; stable for the life of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ordinal(pub usize);

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything one container's scene owns, plus its interactive state
pub struct SceneRecord {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub renderer: Box<dyn Renderer>,
    pub mesh: NodeId,
    pub particles: NodeId,
    pub container: ElementId,
    /// Written only by the visibility tracker
    pub visible: bool,
    /// Written only by the interaction binder
    pub hover: bool,
    pub rotation_speed: f32,
}

impl SceneRecord {
    pub fn mesh(&self) -> Option<&Mesh> {
        self.scene.mesh(self.mesh)
    }

    pub fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.scene.mesh_mut(self.mesh)
    }

    pub fn particles(&self) -> Option<&Points> {
        self.scene.points(self.particles)
    }

    pub fn particles_mut(&mut self) -> Option<&mut Points> {
        self.scene.points_mut(self.particles)
    }
}

impl fmt::Debug for SceneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneRecord")
            .field("container", &self.container)
            .field("surface", &self.renderer.surface_id())
            .field("visible", &self.visible)
            .field("hover", &self.hover)
            .field("rotation_speed", &self.rotation_speed)
            .finish()
    }
}

/// Scene records addressed by ordinal. A container whose setup failed keeps
/// its ordinal as an empty slot so later ordinals never shift.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Option<SceneRecord>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next slot; returns its ordinal
    pub fn push(&mut self, record: Option<SceneRecord>) -> Ordinal {
        self.slots.push(record);
        Ordinal(self.slots.len() - 1)
    }

    pub fn get(&self, ordinal: Ordinal) -> Option<&SceneRecord> {
        self.slots.get(ordinal.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, ordinal: Ordinal) -> Option<&mut SceneRecord> {
        self.slots.get_mut(ordinal.0).and_then(Option::as_mut)
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of ordinals handed out, failed setups included
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ordinal, &SceneRecord)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|r| (Ordinal(i), r)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Ordinal, &mut SceneRecord)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|r| (Ordinal(i), r)))
    }
}

/// Minimal live record for unit tests: an icosahedron and three particles
#[cfg(test)]
pub(crate) fn test_record(container: ElementId) -> SceneRecord {
    use glam::Vec3;

    use crate::engine::{
        BasicMaterial, Node, PointsMaterial, PolyhedronGeometry, RendererOptions, SoftwareRenderer, SurfaceId,
        Transform,
    };
    use crate::math::{Color, Size};

    let mut scene = Scene::new();
    let mesh = scene.add(Node::Mesh(Mesh {
        geometry: PolyhedronGeometry::icosahedron(1.5, 0),
        material: BasicMaterial {
            color: Color::from_hex(0x22c55e),
            wireframe: true,
            transparent: true,
            opacity: 0.15,
        },
        transform: Transform::default(),
    }));
    let particles = scene.add(Node::Points(Points {
        positions: vec![Vec3::X, Vec3::Y, Vec3::Z],
        material: PointsMaterial {
            color: Color::from_hex(0x4ade80),
            size: 0.05,
            size_attenuation: true,
            transparent: true,
            opacity: 0.4,
        },
        transform: Transform::default(),
    }));

    let mut renderer = SoftwareRenderer::new(
        SurfaceId(container.0),
        RendererOptions {
            alpha: true,
            antialias: false,
        },
    );
    renderer.set_size(Size::new(64.0, 32.0));
    let mut camera = PerspectiveCamera::new(70.0, 2.0, 0.1, 100.0);
    camera.position.z = 3.5;

    SceneRecord {
        scene,
        camera,
        renderer: Box::new(renderer),
        mesh,
        particles,
        container,
        visible: false,
        hover: false,
        rotation_speed: 0.005,
    }
}
