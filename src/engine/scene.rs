use glam::{Mat4, Vec3};

use super::geometry::PolyhedronGeometry;
use crate::math::Color;

/// Position, Euler rotation (radians, applied X then Y then Z) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Local-to-world matrix: T * Rx * Ry * Rz * S
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }
}

/// Unlit material for meshes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    pub wireframe: bool,
    pub transparent: bool,
    pub opacity: f32,
}

/// Material for point sprites; `size` is in world units when attenuated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    pub color: Color,
    pub size: f32,
    pub size_attenuation: bool,
    pub transparent: bool,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: PolyhedronGeometry,
    pub material: BasicMaterial,
    pub transform: Transform,
}

#[derive(Debug, Clone)]
pub struct Points {
    pub positions: Vec<Vec3>,
    pub material: PointsMaterial,
    pub transform: Transform,
}

#[derive(Debug, Clone)]
pub enum Node {
    Mesh(Mesh),
    Points(Points),
}

impl Node {
    pub fn transform(&self) -> &Transform {
        match self {
            Node::Mesh(mesh) => &mesh.transform,
            Node::Points(points) => &points.transform,
        }
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            Node::Mesh(mesh) => &mut mesh.transform,
            Node::Points(points) => &mut points.transform,
        }
    }
}

/// Handle to a node inside one `Scene`; meaningless for any other scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Flat scene graph: an ordered list of drawable nodes
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn mesh(&self, id: NodeId) -> Option<&Mesh> {
        match self.node(id) {
            Some(Node::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self, id: NodeId) -> Option<&mut Mesh> {
        match self.node_mut(id) {
            Some(Node::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn points(&self, id: NodeId) -> Option<&Points> {
        match self.node(id) {
            Some(Node::Points(points)) => Some(points),
            _ => None,
        }
    }

    pub fn points_mut(&mut self, id: NodeId) -> Option<&mut Points> {
        match self.node_mut(id) {
            Some(Node::Points(points)) => Some(points),
            _ => None,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
